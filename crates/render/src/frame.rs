use crate::camera::PerspectiveCamera;
use crate::orbit::OrbitControls;

/// Lifecycle of a [`RenderLoop`]. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Per-frame driver: advance the orbit controls, draw, ask for the next frame.
///
/// Hosts call [`RenderLoop::tick`] from their redraw callback and only
/// schedule another frame when it returns `true`.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
    resize_listener: bool,
}

impl RenderLoop {
    /// A running loop with its resize listener registered.
    pub fn start() -> Self {
        tracing::info!("render loop started");
        Self {
            state: LoopState::Running,
            frames: 0,
            resize_listener: true,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether resize events should still be handled.
    pub fn accepts_resize(&self) -> bool {
        self.resize_listener
    }

    /// Run one frame if running. Returns whether the next frame should be
    /// scheduled.
    pub fn tick<F>(
        &mut self,
        controls: &mut OrbitControls,
        camera: &mut PerspectiveCamera,
        draw: F,
    ) -> bool
    where
        F: FnOnce(&PerspectiveCamera),
    {
        if !self.is_running() {
            return false;
        }
        controls.update(camera);
        draw(camera);
        self.frames += 1;
        true
    }

    /// Stop scheduling frames and drop the resize listener. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.resize_listener = false;
        tracing::info!("render loop disposed after {} frames", self.frames);
    }
}
