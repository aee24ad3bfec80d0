//! One constructor per scene component. Each takes the panel explicitly and
//! registers the controls for what it builds.

use cubestage_common::{Axis, Color, NodeId};
use cubestage_panel::{Binding, Panel, PanelError};
use cubestage_render::{Container, OrbitControls, PerspectiveCamera, Viewport};
use cubestage_scene::{
    AmbientLight, AxesHelper, Cube, DirectionalLight, GridHelper, Node, Scene,
};
use glam::Vec3;

pub const BACKGROUND: Color = Color::WHITE;

pub const CAMERA_FOV: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 10000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 10.0);

pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const DIRECTIONAL_INTENSITY: f32 = 0.2;
pub const DIRECTIONAL_HELPER_SIZE: f32 = 1.0;
pub const DIRECTIONAL_HELPER_COLOR: Color = Color::from_hex(0xff0000);
/// Range of each light position slider.
pub const POSITION_RANGE: f32 = 5.0;

pub const AMBIENT_INTENSITY: f32 = 0.5;
/// Upper bound of every intensity slider.
pub const MAX_INTENSITY: f32 = 10.0;

pub const GRID_SIZE: f32 = 1000.0;
pub const GRID_DIVISIONS: u32 = 1000;
pub const AXES_SIZE: f32 = 3.0;

/// Renderer-side viewport sized to `container`, plus a scene with a
/// background color control in folder `Scene`.
pub fn create_scene(
    panel: &mut Panel,
    container: &impl Container,
) -> Result<(Viewport, Scene), PanelError> {
    let mut viewport = Viewport::new(container.client_width(), container.client_height());
    viewport.set_pixel_ratio(container.device_pixel_ratio());
    let scene = Scene::new(BACKGROUND);

    let folder = panel.add_folder("Scene");
    panel.add_color(folder, "background color", Binding::Background, &scene)?;
    Ok((viewport, scene))
}

/// Perspective camera plus the orbit controls driving it.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
}

pub fn create_camera(container: &impl Container) -> CameraRig {
    let aspect = container.client_width() as f32 / container.client_height().max(1) as f32;
    let mut camera = PerspectiveCamera::new(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR);
    camera.position = CAMERA_POSITION;
    let mut controls = OrbitControls::new(Vec3::ZERO);
    controls.update(&mut camera);
    CameraRig { camera, controls }
}

/// Unit cube at `(x, 0.5, 0)` with a `name` folder holding its color and
/// "affected by light" controls.
pub fn create_cube(
    panel: &mut Panel,
    scene: &mut Scene,
    name: &str,
    color: Color,
    x: f32,
) -> Result<NodeId, PanelError> {
    let id = scene.add(Node::Mesh(Cube::new(name, color, x)));
    let folder = panel.add_folder(name);
    panel.add_color(folder, "color", Binding::CubeColor(id), scene)?;
    panel.add_toggle(folder, "affected by light", Binding::CubeLit(id), scene)?;
    Ok(id)
}

/// Node ids of the directional light and its helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionalLightIds {
    pub light: NodeId,
    pub helper: NodeId,
}

/// White directional light at (5, 5, 5) with its helper, and folders
/// `DirectionLight` and `DirectionLight/Position`.
pub fn create_direction_light(
    panel: &mut Panel,
    scene: &mut Scene,
) -> Result<DirectionalLightIds, PanelError> {
    let light = scene.add(Node::DirectionalLight(DirectionalLight::new(
        Color::WHITE,
        DIRECTIONAL_INTENSITY,
        DIRECTIONAL_POSITION,
    )));
    let helper =
        scene.add_directional_helper(light, DIRECTIONAL_HELPER_SIZE, DIRECTIONAL_HELPER_COLOR)?;

    let folder = panel.add_folder("DirectionLight");
    panel.add_color(folder, "color", Binding::DirectionalColor(light), scene)?;
    panel.add_slider(
        folder,
        "intensity",
        Binding::DirectionalIntensity(light),
        0.0,
        MAX_INTENSITY,
        scene,
    )?;
    let position = panel.add_subfolder(folder, "Position")?;
    for axis in Axis::ALL {
        panel.add_slider(
            position,
            axis.label(),
            Binding::DirectionalPosition(light, axis),
            -POSITION_RANGE,
            POSITION_RANGE,
            scene,
        )?;
    }
    Ok(DirectionalLightIds { light, helper })
}

/// White ambient light with folder `AmbientLight`.
pub fn create_ambient_light(panel: &mut Panel, scene: &mut Scene) -> Result<NodeId, PanelError> {
    let light = scene.add(Node::AmbientLight(AmbientLight::new(
        Color::WHITE,
        AMBIENT_INTENSITY,
    )));
    let folder = panel.add_folder("AmbientLight");
    panel.add_color(folder, "color", Binding::AmbientColor(light), scene)?;
    panel.add_slider(
        folder,
        "intensity",
        Binding::AmbientIntensity(light),
        0.0,
        MAX_INTENSITY,
        scene,
    )?;
    Ok(light)
}

pub fn create_grid() -> GridHelper {
    GridHelper::new(GRID_SIZE, GRID_DIVISIONS)
}

pub fn create_axes() -> AxesHelper {
    AxesHelper::new(AXES_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubestage_panel::ControlValue;
    use cubestage_render::FixedContainer;
    use cubestage_scene::MaterialKind;

    #[test]
    fn camera_aspect_for_800_by_600() {
        let rig = create_camera(&FixedContainer::new(800, 600));
        assert!((rig.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((rig.camera.position - CAMERA_POSITION).length() < 1e-4);
        assert_eq!(rig.camera.target, Vec3::ZERO);
        assert_eq!(rig.camera.fov_degrees, 45.0);
    }

    #[test]
    fn background_control_sets_scene_background() {
        let mut panel = Panel::new();
        let (_, mut scene) = create_scene(&mut panel, &FixedContainer::new(800, 600)).unwrap();
        let id = panel.find("Scene", "background color").unwrap();
        for hex in [0x000000, 0x123456, 0xffffff] {
            panel
                .set(id, ControlValue::Color(Color::from_hex(hex)), &mut scene)
                .unwrap();
            assert_eq!(scene.background(), Color::from_hex(hex));
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn cube_controls_round_trip() {
        let mut panel = Panel::new();
        let mut scene = Scene::default();
        let id = create_cube(&mut panel, &mut scene, "cube1", Color::RED, -3.0).unwrap();
        let color = panel.find("cube1", "color").unwrap();
        let lit = panel.find("cube1", "affected by light").unwrap();

        panel
            .set(color, ControlValue::Color(Color::from_hex(0xabcdef)), &mut scene)
            .unwrap();
        assert_eq!(
            scene.cube(id).unwrap().material().color(),
            Color::from_hex(0xabcdef)
        );
        assert!(scene.cube(id).unwrap().material().needs_update());

        panel.set(lit, ControlValue::Bool(false), &mut scene).unwrap();
        let m = scene.cube(id).unwrap().material();
        assert_eq!(m.kind(), MaterialKind::Unlit);
        assert_eq!(m.color(), Color::from_hex(0xabcdef));

        panel.set(lit, ControlValue::Bool(true), &mut scene).unwrap();
        let m = scene.cube(id).unwrap().material();
        assert_eq!(m.kind(), MaterialKind::Lit);
        assert_eq!(m.color(), Color::from_hex(0xabcdef));
    }

    #[test]
    fn direction_light_x_to_upper_bound() {
        let mut panel = Panel::new();
        let mut scene = Scene::default();
        let ids = create_direction_light(&mut panel, &mut scene).unwrap();
        let x = panel.find("DirectionLight/Position", "x").unwrap();

        panel.set(x, ControlValue::Number(5.0), &mut scene).unwrap();
        let light = scene.directional(ids.light).unwrap();
        assert_eq!(light.position().x, 5.0);
        assert_eq!(light.target_matrix_world(), glam::Mat4::from_translation(light.target()));
        let helper = scene.directional_helper(ids.helper).unwrap();
        assert_eq!(helper.position(), light.position());

        // Dragging past the bound stops at the bound
        panel.set(x, ControlValue::Number(9.0), &mut scene).unwrap();
        assert_eq!(scene.directional(ids.light).unwrap().position().x, 5.0);

        let y = panel.find("DirectionLight/Position", "y").unwrap();
        panel.set(y, ControlValue::Number(-4.0), &mut scene).unwrap();
        assert_eq!(
            scene.directional_helper(ids.helper).unwrap().position(),
            Vec3::new(5.0, -4.0, 5.0)
        );
    }

    #[test]
    fn direction_light_defaults() {
        let mut panel = Panel::new();
        let mut scene = Scene::default();
        let ids = create_direction_light(&mut panel, &mut scene).unwrap();
        let light = scene.directional(ids.light).unwrap();
        assert_eq!(light.position(), DIRECTIONAL_POSITION);
        assert_eq!(light.intensity, 0.2);
        assert_eq!(light.color, Color::WHITE);
        let intensity = panel.find("DirectionLight", "intensity").unwrap();
        assert_eq!(
            panel.control(intensity).unwrap().kind,
            cubestage_panel::ControlKind::Slider {
                min: 0.0,
                max: 10.0
            }
        );
    }

    #[test]
    fn ambient_intensity_seven() {
        let mut panel = Panel::new();
        let mut scene = Scene::default();
        let id = create_ambient_light(&mut panel, &mut scene).unwrap();
        assert_eq!(scene.ambient(id).unwrap().intensity, 0.5);
        let intensity = panel.find("AmbientLight", "intensity").unwrap();
        panel.set(intensity, ControlValue::Number(7.0), &mut scene).unwrap();
        assert_eq!(scene.ambient(id).unwrap().intensity, 7.0);
    }

    #[test]
    fn static_helpers() {
        let grid = create_grid();
        assert_eq!((grid.size, grid.divisions), (1000.0, 1000));
        assert_eq!(create_axes().size, 3.0);
    }
}
