//! Scene authoring: the factories that build the demo scene and the [`Demo`]
//! object that owns everything they produce.
//!
//! # Invariants
//! - Every factory registers its controls on the panel it is handed; there
//!   is no shared global panel.
//! - Build order is scene, directional light, ambient light, cubes, grid,
//!   axes, camera, then one resize.

mod demo;
pub mod factory;

pub use demo::{Demo, DemoOptions};
pub use factory::{CameraRig, DirectionalLightIds};

pub fn crate_info() -> &'static str {
    "cubestage-author v0.1.0"
}
