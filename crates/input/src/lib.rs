//! Pointer input mapped to orbit actions.
//!
//! # Invariants
//! - Hosts translate their raw events into [`PointerEvent`]s; camera code
//!   only ever sees [`OrbitAction`]s.
//! - A drag produces actions only while the button that started it is held.

pub mod action;

pub use action::{OrbitAction, PointerButton, PointerEvent, PointerTracker};

pub fn crate_info() -> &'static str {
    "cubestage-input v0.1.0"
}
