use crate::factory::{
    self, DirectionalLightIds, create_ambient_light, create_axes, create_camera, create_cube,
    create_direction_light, create_grid, create_scene,
};
use cubestage_common::{Color, NodeId};
use cubestage_input::OrbitAction;
use cubestage_panel::{Panel, PanelError};
use cubestage_render::{
    Container, OrbitControls, PerspectiveCamera, RenderLoop, Viewport, set_size,
};
use cubestage_scene::{Node, Scene};

/// Runtime choices for [`Demo::new`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoOptions {
    /// Keep the camera gliding after orbit input stops.
    pub damping: bool,
}

/// Everything the demo owns: scene, panel, camera rig, viewport and loop.
pub struct Demo {
    pub scene: Scene,
    pub panel: Panel,
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub cubes: Vec<NodeId>,
    pub directional: DirectionalLightIds,
    pub ambient: NodeId,
    render_loop: RenderLoop,
}

impl Demo {
    /// Build the full scene for `container` and start the render loop.
    pub fn new(container: &impl Container, options: DemoOptions) -> Result<Self, PanelError> {
        let mut panel = Panel::new();
        let (viewport, mut scene) = create_scene(&mut panel, container)?;
        let directional = create_direction_light(&mut panel, &mut scene)?;
        let ambient = create_ambient_light(&mut panel, &mut scene)?;

        let mut cubes = Vec::new();
        for (name, color, x) in [
            ("cube1", Color::RED, -3.0),
            ("cube2", Color::GREEN, 0.0),
            ("cube3", Color::BLUE, 3.0),
        ] {
            cubes.push(create_cube(&mut panel, &mut scene, name, color, x)?);
        }

        scene.add(Node::Grid(create_grid()));
        scene.add(Node::Axes(create_axes()));

        let factory::CameraRig {
            mut camera,
            mut controls,
        } = create_camera(container);
        controls.enable_damping = options.damping;

        let mut viewport = viewport;
        set_size(container, &mut camera, &mut viewport);

        tracing::info!(
            "demo ready: {} nodes, {}x{} @{:.2}",
            scene.len(),
            viewport.width(),
            viewport.height(),
            viewport.pixel_ratio()
        );

        Ok(Self {
            scene,
            panel,
            viewport,
            camera,
            controls,
            cubes,
            directional,
            ambient,
            render_loop: RenderLoop::start(),
        })
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Resize handler. Returns whether the drawing buffer changed; always
    /// `false` once disposed.
    pub fn resize(&mut self, container: &impl Container) -> bool {
        if !self.render_loop.accepts_resize() {
            return false;
        }
        set_size(container, &mut self.camera, &mut self.viewport)
    }

    /// Feed a pointer action to the orbit controls.
    pub fn orbit(&mut self, action: OrbitAction) {
        self.controls
            .apply(action, &self.camera, self.viewport.height() as f32);
    }

    /// Run one frame: update the controls, then `draw`. Returns whether the
    /// host should schedule another frame.
    pub fn frame<F>(&mut self, draw: F) -> bool
    where
        F: FnOnce(&mut Scene, &PerspectiveCamera),
    {
        let scene = &mut self.scene;
        self.render_loop
            .tick(&mut self.controls, &mut self.camera, |camera| draw(scene, camera))
    }

    /// Stop the render loop and stop handling resizes.
    pub fn dispose(&mut self) {
        self.render_loop.dispose();
    }
}
