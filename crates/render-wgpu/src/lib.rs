//! wgpu render backend for cubestage.
//!
//! Draws the scene's cubes as instanced meshes and its grid, axes and light
//! helpers as line lists, over a clear in the scene's background color.
//!
//! # Invariants
//! - The only scene state the renderer writes is the material upload flag.
//! - Camera motion belongs to the orbit controls, never to the renderer.
//! - Attachments are sized in physical pixels (the drawing buffer size).

mod gpu;
mod shaders;

pub use gpu::{MAX_DIRECTIONAL_LIGHTS, WgpuRenderer};
