//! Inspect-mode and selection handling.

mod machine;
mod state;

pub use machine::{SelectionMachine, SelectionSettings};
pub use state::{CaptureTrigger, ContextMenuOutcome, PendingCapture, SelectionState};

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
