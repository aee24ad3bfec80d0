//! Orbit navigation around a focus point.
//!
//! Input only accumulates deltas; [`OrbitControls::update`] applies them to
//! the camera. With damping enabled, each update applies a fraction of the
//! remaining delta and decays the rest, so the camera keeps gliding for a
//! few frames after input stops.

use crate::camera::PerspectiveCamera;
use cubestage_input::OrbitAction;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Point the camera orbits around.
    pub target: Vec3,
    pub enabled: bool,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub enable_damping: bool,
    /// Share of the pending delta applied per update when damping.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angle limits in radians, measured from +Y.
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
    last_position: Vec3,
    last_target: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            last_position: Vec3::splat(f32::NAN),
            last_target: Vec3::splat(f32::NAN),
        }
    }
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Whether any rotation, pan or dolly is still waiting to be applied.
    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < EPS
            && self.delta_phi.abs() < EPS
            && self.pan_offset.length_squared() < EPS
            && (self.scale - 1.0).abs() < EPS
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Scale the orbit radius by `factor` on the next update. Below 1 moves closer.
    pub fn dolly(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Queue a pan of `delta` in world units.
    pub fn pan(&mut self, delta: Vec3) {
        self.pan_offset += delta;
    }

    /// Feed one pointer action. `viewport_height` is the surface height in
    /// logical pixels, used to turn pixel deltas into angles and distances.
    pub fn apply(&mut self, action: OrbitAction, camera: &PerspectiveCamera, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let h = viewport_height.max(1.0);
        match action {
            OrbitAction::Rotate { dx, dy } if self.enable_rotate => {
                self.rotate_left(TAU * dx / h * self.rotate_speed);
                self.rotate_up(TAU * dy / h * self.rotate_speed);
            }
            OrbitAction::Pan { dx, dy } if self.enable_pan => {
                // World units covered by the full viewport height at the focus distance
                let distance = (camera.position - self.target).length()
                    * (camera.fov_degrees.to_radians() / 2.0).tan();
                let left = 2.0 * dx * distance / h * self.pan_speed;
                let up = 2.0 * dy * distance / h * self.pan_speed;
                self.pan(camera.right() * -left + camera.screen_up() * up);
            }
            OrbitAction::Dolly(steps) if self.enable_zoom => {
                self.dolly(self.zoom_scale().powf(steps));
            }
            _ => {}
        }
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > EPS {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }

        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        let moved = !(self.last_position.distance_squared(camera.position) <= EPS
            && self.last_target.distance_squared(self.target) <= EPS);
        self.last_position = camera.position;
        self.last_target = self.target;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front_camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(45.0, 1.0, 0.1, 10000.0);
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam
    }

    #[test]
    fn first_update_keeps_default_pose() {
        let mut cam = front_camera();
        let mut controls = OrbitControls::default();
        assert!(controls.update(&mut cam));
        assert!((cam.position - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
        assert_eq!(cam.target, Vec3::ZERO);
        // Nothing pending, nothing moves
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn rotate_preserves_distance() {
        let mut cam = front_camera();
        let mut controls = OrbitControls::default();
        controls.update(&mut cam);
        controls.apply(OrbitAction::Rotate { dx: 120.0, dy: 40.0 }, &cam, 600.0);
        assert!(controls.update(&mut cam));
        assert!(((cam.position - controls.target).length() - 10.0).abs() < 1e-3);
        assert!(cam.position.x.abs() > 1.0);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = front_camera();
        let mut controls = OrbitControls::default();
        controls.rotate_up(10.0);
        controls.update(&mut cam);
        let dir = (cam.position - controls.target).normalize();
        assert!(dir.y <= 1.0 && dir.y > 0.99);
        assert!(cam.position.is_finite());
    }

    #[test]
    fn damping_keeps_moving_without_input() {
        let mut cam = front_camera();
        let mut controls = OrbitControls {
            enable_damping: true,
            ..OrbitControls::default()
        };
        controls.update(&mut cam);
        controls.rotate_left(1.0);
        controls.update(&mut cam);
        let after_input = cam.position;
        assert!(controls.update(&mut cam));
        assert_ne!(cam.position, after_input);
        assert!(!controls.is_settled());
    }

    #[test]
    fn wheel_dolly_moves_closer() {
        let mut cam = front_camera();
        let mut controls = OrbitControls::default();
        controls.apply(OrbitAction::Dolly(1.0), &cam, 600.0);
        controls.update(&mut cam);
        assert!((cam.position.z - 9.5).abs() < 1e-4);
        controls.apply(OrbitAction::Dolly(-1.0), &cam, 600.0);
        controls.update(&mut cam);
        assert!((cam.position.z - 10.0).abs() < 1e-3);
    }

    #[test]
    fn pan_moves_target_and_camera_together() {
        let mut cam = front_camera();
        let mut controls = OrbitControls::default();
        controls.update(&mut cam);
        controls.apply(OrbitAction::Pan { dx: 100.0, dy: 0.0 }, &cam, 600.0);
        controls.update(&mut cam);
        // Dragging right slides the scene right, so the focus moves left
        assert!(controls.target.x < 0.0);
        assert!((cam.position.x - controls.target.x).abs() < 1e-4);
    }

    #[test]
    fn disabled_controls_ignore_actions() {
        let cam = front_camera();
        let mut controls = OrbitControls {
            enabled: false,
            ..OrbitControls::default()
        };
        controls.apply(OrbitAction::Rotate { dx: 50.0, dy: 0.0 }, &cam, 600.0);
        assert!(controls.is_settled());
    }
}
