use crate::material::{Material, MaterialKind};
use cubestage_common::Color;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Height of every cube's center, so unit cubes rest on the grid.
pub const CUBE_Y: f32 = 0.5;

/// A unit cube mesh with a swappable material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub name: String,
    position: Vec3,
    size: Vec3,
    material: Material,
}

impl Cube {
    /// Cube at `(x, 0.5, 0)` with a lit material of `color`.
    pub fn new(name: impl Into<String>, color: Color, x: f32) -> Self {
        Self {
            name: name.into(),
            position: Vec3::new(x, CUBE_Y, 0.0),
            size: Vec3::ONE,
            material: Material::describe(color, MaterialKind::Lit),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn set_color(&mut self, color: Color) {
        self.material.set_color(color);
    }

    /// Replace the material with one of `kind`, keeping the current color.
    pub fn set_material_kind(&mut self, kind: MaterialKind) {
        self.material = Material::describe(self.material.color(), kind);
    }

    pub fn mark_uploaded(&mut self) {
        self.material.mark_uploaded();
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.size, Quat::IDENTITY, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube2_scenario() {
        let cube = Cube::new("cube2", Color::parse("green").unwrap(), 0.0);
        assert_eq!(cube.position(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(cube.size(), Vec3::ONE);
        assert_eq!(cube.material().kind(), MaterialKind::Lit);
        assert_eq!(cube.material().color(), Color::GREEN);
    }

    #[test]
    fn color_survives_kind_swap() {
        let mut cube = Cube::new("c", Color::RED, -3.0);
        cube.set_color(Color::from_hex(0x336699));
        cube.set_material_kind(MaterialKind::Unlit);
        assert_eq!(cube.material().kind(), MaterialKind::Unlit);
        assert_eq!(cube.material().color(), Color::from_hex(0x336699));
        assert!(cube.material().needs_update());
    }

    #[test]
    fn double_toggle_round_trips() {
        let mut cube = Cube::new("c", Color::BLUE, 3.0);
        let before = cube.material().clone();
        cube.set_material_kind(before.kind().toggled());
        cube.set_material_kind(cube.material().kind().toggled());
        assert_eq!(cube.material().kind(), before.kind());
        assert_eq!(cube.material().color(), before.color());
    }

    #[test]
    fn model_matrix_translates() {
        let cube = Cube::new("c", Color::RED, -3.0);
        let p = cube.model_matrix().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::new(-3.0, 0.5, 0.0));
    }
}
