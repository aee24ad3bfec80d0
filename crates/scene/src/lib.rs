//! Scene graph for the cubestage demo.
//!
//! # Invariants
//! - Node order is insertion order; nodes live as long as the scene.
//! - A directional light's position only changes through
//!   [`Scene::set_directional_position`], which always refreshes the light's
//!   target matrix and every helper paired with it.
//! - Material kind changes replace the material; color carries over.

pub mod cube;
pub mod helpers;
pub mod light;
pub mod material;
mod scene;

pub use cube::Cube;
pub use helpers::{AxesHelper, GridHelper, LineVertex};
pub use light::{AmbientLight, DirectionalLight, DirectionalLightHelper};
pub use material::{Material, MaterialKind};
pub use scene::{Node, Scene, SceneError};

pub fn crate_info() -> &'static str {
    "cubestage-scene v0.1.0"
}
