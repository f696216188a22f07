//! Snapshot data model.

mod animation;
mod geometry;
mod snapshot;
mod tree;

pub use animation::*;
pub use geometry::*;
pub use snapshot::*;
pub use tree::*;

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
