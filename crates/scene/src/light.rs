use crate::helpers::LineVertex;
use cubestage_common::{Color, NodeId};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Parallel light shining from `position` toward `target`.
///
/// The position is only writable from inside the crate; outside callers go
/// through [`crate::Scene::set_directional_position`], which keeps the target
/// matrix and the paired helpers in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    position: Vec3,
    target: Vec3,
    target_matrix_world: Mat4,
}

impl DirectionalLight {
    pub fn new(color: Color, intensity: f32, position: Vec3) -> Self {
        let mut light = Self {
            color,
            intensity,
            position,
            target: Vec3::ZERO,
            target_matrix_world: Mat4::IDENTITY,
        };
        light.update_target_matrix();
        light
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn target_matrix_world(&self) -> Mat4 {
        self.target_matrix_world
    }

    /// Unit vector from the light toward its target; zero when they coincide.
    pub fn direction(&self) -> Vec3 {
        (self.target_matrix_world.w_axis.truncate() - self.position).normalize_or_zero()
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn update_target_matrix(&mut self) {
        self.target_matrix_world = Mat4::from_translation(self.target);
    }
}

/// Gizmo drawing a directional light's emitting plane and aim line.
///
/// Does not track its light on its own; [`DirectionalLightHelper::update`]
/// must run after each light move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLightHelper {
    light: NodeId,
    pub size: f32,
    pub color: Color,
    position: Vec3,
    direction: Vec3,
    matrix_world: Mat4,
}

impl DirectionalLightHelper {
    pub fn new(light_id: NodeId, light: &DirectionalLight, size: f32, color: Color) -> Self {
        let mut helper = Self {
            light: light_id,
            size,
            color,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            matrix_world: Mat4::IDENTITY,
        };
        helper.update(light);
        helper
    }

    pub fn light(&self) -> NodeId {
        self.light
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn matrix_world(&self) -> Mat4 {
        self.matrix_world
    }

    /// Re-read position and aim from `light`.
    pub fn update(&mut self, light: &DirectionalLight) {
        self.position = light.position();
        self.direction = light.direction();
        let rotation = if self.direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Z, self.direction)
        };
        self.matrix_world = Mat4::from_rotation_translation(rotation, self.position);
    }

    /// Square outline around the light plus a unit line toward the target,
    /// in world space.
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let s = self.size;
        let corners = [
            Vec3::new(-s, s, 0.0),
            Vec3::new(s, s, 0.0),
            Vec3::new(s, -s, 0.0),
            Vec3::new(-s, -s, 0.0),
        ];
        let mut verts = Vec::with_capacity(10);
        for i in 0..corners.len() {
            let a = self.matrix_world.transform_point3(corners[i]);
            let b = self.matrix_world.transform_point3(corners[(i + 1) % corners.len()]);
            verts.push(LineVertex::new(a.to_array(), self.color));
            verts.push(LineVertex::new(b.to_array(), self.color));
        }
        let tip = self.matrix_world.transform_point3(Vec3::Z);
        verts.push(LineVertex::new(self.position.to_array(), self.color));
        verts.push(LineVertex::new(tip.to_array(), self.color));
        verts
    }
}

/// Uniform light added to every lit surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self { color, intensity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_light_aims_at_origin() {
        let light = DirectionalLight::new(Color::WHITE, 0.2, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(light.target(), Vec3::ZERO);
        let expected = (-Vec3::new(5.0, 5.0, 5.0)).normalize();
        assert!((light.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn helper_follows_after_update() {
        let id = NodeId::new();
        let mut light = DirectionalLight::new(Color::WHITE, 0.2, Vec3::new(5.0, 5.0, 5.0));
        let mut helper = DirectionalLightHelper::new(id, &light, 1.0, Color::RED);
        light.set_position(Vec3::new(-2.0, 4.0, 1.0));
        // Stale until told otherwise
        assert_eq!(helper.position(), Vec3::new(5.0, 5.0, 5.0));
        light.update_target_matrix();
        helper.update(&light);
        assert_eq!(helper.position(), light.position());
        assert!((helper.direction() - light.direction()).length() < 1e-6);
    }

    #[test]
    fn helper_plane_faces_target() {
        let light = DirectionalLight::new(Color::WHITE, 1.0, Vec3::new(0.0, 0.0, 4.0));
        let helper = DirectionalLightHelper::new(NodeId::new(), &light, 1.0, Color::RED);
        let verts = helper.line_vertices();
        assert_eq!(verts.len(), 10);
        // Aim line ends one unit closer to the origin
        let tip = Vec3::from_array(verts[9].position);
        assert!((tip - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn helper_at_target_has_no_direction() {
        let light = DirectionalLight::new(Color::WHITE, 1.0, Vec3::ZERO);
        let helper = DirectionalLightHelper::new(NodeId::new(), &light, 1.0, Color::RED);
        assert_eq!(helper.direction(), Vec3::ZERO);
        assert_eq!(helper.matrix_world(), Mat4::IDENTITY);
    }
}
