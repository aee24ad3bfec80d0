use crate::camera::PerspectiveCamera;
use cubestage_scene::{Node, Scene};
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and camera, then produces output. It never
/// adds or removes nodes.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` through `camera`.
    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Produces a human-readable description of the scene.
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (background={}, nodes={}) ===",
            scene.background(),
            scene.len()
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov_degrees,
            camera.aspect
        );

        for (id, node) in scene.nodes() {
            let _ = write!(out, "  [{}] ", id.short());
            let _ = match node {
                Node::Mesh(cube) => {
                    let p = cube.position();
                    writeln!(
                        out,
                        "mesh {:?} pos=({:.2}, {:.2}, {:.2}) material={:?} color={}",
                        cube.name,
                        p.x,
                        p.y,
                        p.z,
                        cube.material().kind(),
                        cube.material().color()
                    )
                }
                Node::DirectionalLight(l) => {
                    let p = l.position();
                    writeln!(
                        out,
                        "directional light pos=({:.2}, {:.2}, {:.2}) color={} intensity={:.2}",
                        p.x, p.y, p.z, l.color, l.intensity
                    )
                }
                Node::DirectionalLightHelper(h) => {
                    let p = h.position();
                    writeln!(
                        out,
                        "light helper for [{}] pos=({:.2}, {:.2}, {:.2})",
                        h.light().short(),
                        p.x,
                        p.y,
                        p.z
                    )
                }
                Node::AmbientLight(l) => writeln!(
                    out,
                    "ambient light color={} intensity={:.2}",
                    l.color, l.intensity
                ),
                Node::Grid(g) => writeln!(out, "grid size={} divisions={}", g.size, g.divisions),
                Node::Axes(a) => writeln!(out, "axes size={}", a.size),
            };
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubestage_common::Color;
    use cubestage_scene::{AxesHelper, Cube};
    use glam::Vec3;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::default();
        let output = DebugTextRenderer::new().render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("background=#ffffff"));
        assert!(output.contains("nodes=0"));
    }

    #[test]
    fn debug_renderer_lists_nodes() {
        let mut scene = Scene::default();
        scene.add(Node::Mesh(Cube::new("cube2", Color::GREEN, 0.0)));
        scene.add(Node::Axes(AxesHelper::new(3.0)));
        let mut camera = PerspectiveCamera::default();
        camera.position = Vec3::new(0.0, 0.0, 10.0);

        let output = DebugTextRenderer::new().render(&scene, &camera);
        assert!(output.contains("nodes=2"));
        assert!(output.contains("mesh \"cube2\" pos=(0.00, 0.50, 0.00) material=Lit color=#008000"));
        assert!(output.contains("axes size=3"));
        assert!(output.contains("eye=(0.00, 0.00, 10.00)"));
    }
}
