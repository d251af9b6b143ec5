//! Remote platform access: wire payloads and the HTTP client

pub mod client;
pub mod payload;

pub use client::{AgentApi, AgentClient};
pub use payload::{EntityPayload, IntentPayload};
