//! intent-sync - push locally authored intents and entities to a
//! conversational-agent platform

pub mod api;
pub mod collect;
pub mod core;
pub mod project;
pub mod source;
pub mod sync;
