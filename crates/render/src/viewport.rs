use crate::camera::PerspectiveCamera;

/// The host element the renderer draws into.
///
/// Sizes are in logical (CSS-like) pixels; the device pixel ratio maps them
/// to physical pixels.
pub trait Container {
    fn client_width(&self) -> u32;
    fn client_height(&self) -> u32;
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

/// A container with fixed dimensions, for headless runs and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedContainer {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl FixedContainer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }
}

impl Container for FixedContainer {
    fn client_width(&self) -> u32 {
        self.width
    }

    fn client_height(&self) -> u32 {
        self.height
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }
}

/// Renderer-side surface state: logical size and pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
    }

    /// Physical size of the drawing buffer, never below 1x1.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((f64::from(v) * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}

/// Fit `camera` and `viewport` to the container's current size.
///
/// Returns whether the drawing buffer size changed, so hosts can skip
/// reconfiguring their surface on no-op resizes.
pub fn set_size(
    container: &impl Container,
    camera: &mut PerspectiveCamera,
    viewport: &mut Viewport,
) -> bool {
    let width = container.client_width();
    let height = container.client_height();
    camera.aspect = width as f32 / height.max(1) as f32;
    camera.update_projection_matrix();

    let before = viewport.drawing_buffer_size();
    viewport.set_size(width, height);
    viewport.set_pixel_ratio(container.device_pixel_ratio());
    let after = viewport.drawing_buffer_size();

    tracing::debug!(
        "resize: {width}x{height} @{:.2} -> buffer {}x{}, aspect {:.3}",
        viewport.pixel_ratio(),
        after.0,
        after.1,
        camera.aspect
    );
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_for_800_by_600() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 10000.0);
        let mut viewport = Viewport::new(1, 1);
        set_size(&FixedContainer::new(800, 600), &mut camera, &mut viewport);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!((viewport.width(), viewport.height()), (800, 600));
    }

    #[test]
    fn resize_is_idempotent() {
        let container = FixedContainer {
            width: 1024,
            height: 768,
            pixel_ratio: 2.0,
        };
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(1, 1);

        assert!(set_size(&container, &mut camera, &mut viewport));
        let first = (camera.clone(), viewport);
        assert!(!set_size(&container, &mut camera, &mut viewport));
        assert_eq!(first, (camera, viewport));
        assert_eq!(viewport.drawing_buffer_size(), (2048, 1536));
    }

    #[test]
    fn zero_height_stays_finite() {
        let mut camera = PerspectiveCamera::default();
        let mut viewport = Viewport::new(1, 1);
        set_size(&FixedContainer::new(300, 0), &mut camera, &mut viewport);
        assert!(camera.aspect.is_finite());
        assert_eq!(viewport.drawing_buffer_size(), (300, 1));
    }

    #[test]
    fn bad_pixel_ratio_is_ignored() {
        let mut viewport = Viewport::new(10, 10);
        viewport.set_pixel_ratio(0.0);
        viewport.set_pixel_ratio(f64::NAN);
        assert_eq!(viewport.pixel_ratio(), 1.0);
    }
}
