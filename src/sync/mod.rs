pub mod aggregate;
pub mod updater;

pub use aggregate::{aggregate, IntentUpdateRequest};
pub use updater::{failure_count, EntityUpdater, IntentUpdater, UpdateOutcome};
