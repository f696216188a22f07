//! Error types for the inspector protocol layer.

mod capture;
mod dom;
mod relay;

pub use capture::*;
pub use dom::*;
pub use relay::*;
