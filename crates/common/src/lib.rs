//! Shared value types used across the cubestage crates.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{Axis, NodeId};
