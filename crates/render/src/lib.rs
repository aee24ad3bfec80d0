//! Rendering Adapter: camera, orbit navigation, viewport sizing, frame loop
//! and a renderer-agnostic drawing interface.
//!
//! # Invariants
//! - Renderers never mutate the scene graph's structure.
//! - Orbit controls advance exactly once per running frame, before drawing.
//! - A stopped render loop draws nothing and ignores resize events.

mod camera;
mod frame;
mod orbit;
mod renderer;
mod viewport;

pub use camera::PerspectiveCamera;
pub use frame::{LoopState, RenderLoop};
pub use orbit::OrbitControls;
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::{Container, FixedContainer, Viewport, set_size};

pub fn crate_info() -> &'static str {
    "cubestage-render v0.1.0"
}
