use crate::binding::Binding;
use crate::value::{ControlKind, ControlValue};
use cubestage_scene::{Scene, SceneError};

/// Handle to a folder in a [`Panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(usize);

/// Handle to a control in a [`Panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

/// Errors from panel operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("control {0:?} does not exist")]
    UnknownControl(ControlId),
    #[error("folder {0:?} does not exist")]
    UnknownFolder(String),
    #[error("no control at {0:?}")]
    UnknownPath(String),
    #[error("{label}: expected a {expected} value, got a {found}")]
    ValueMismatch {
        label: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{label}: value is not a finite number")]
    NotFinite { label: String },
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: String },
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// A named group of controls, possibly nested.
#[derive(Debug, Clone)]
pub struct Folder {
    pub name: String,
    parent: Option<FolderId>,
    children: Vec<FolderId>,
    controls: Vec<ControlId>,
}

impl Folder {
    pub fn parent(&self) -> Option<FolderId> {
        self.parent
    }
}

/// One widget bound to one scene attribute.
#[derive(Debug, Clone)]
pub struct Control {
    pub label: String,
    pub kind: ControlKind,
    pub binding: Binding,
    value: ControlValue,
}

impl Control {
    pub fn value(&self) -> ControlValue {
        self.value
    }
}

/// Tree of folders and controls.
#[derive(Debug, Default)]
pub struct Panel {
    folders: Vec<Folder>,
    controls: Vec<Control>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level folder.
    pub fn add_folder(&mut self, name: impl Into<String>) -> FolderId {
        self.push_folder(name.into(), None)
    }

    /// Add a folder nested under `parent`.
    pub fn add_subfolder(
        &mut self,
        parent: FolderId,
        name: impl Into<String>,
    ) -> Result<FolderId, PanelError> {
        self.folder(parent)?;
        let id = self.push_folder(name.into(), Some(parent));
        self.folders[parent.0].children.push(id);
        Ok(id)
    }

    fn push_folder(&mut self, name: String, parent: Option<FolderId>) -> FolderId {
        let id = FolderId(self.folders.len());
        self.folders.push(Folder {
            name,
            parent,
            children: Vec::new(),
            controls: Vec::new(),
        });
        id
    }

    pub fn folder(&self, id: FolderId) -> Result<&Folder, PanelError> {
        self.folders
            .get(id.0)
            .ok_or_else(|| PanelError::UnknownFolder(format!("{id:?}")))
    }

    pub fn control(&self, id: ControlId) -> Result<&Control, PanelError> {
        self.controls.get(id.0).ok_or(PanelError::UnknownControl(id))
    }

    /// Register a control. Its initial value is read from the bound attribute.
    pub fn add(
        &mut self,
        folder: FolderId,
        label: impl Into<String>,
        kind: ControlKind,
        binding: Binding,
        scene: &Scene,
    ) -> Result<ControlId, PanelError> {
        self.folder(folder)?;
        let label = label.into();
        let value = binding.read(scene)?;
        if value.kind_name() != kind.name() {
            return Err(PanelError::ValueMismatch {
                label,
                expected: kind.name(),
                found: value.kind_name(),
            });
        }
        let id = ControlId(self.controls.len());
        self.controls.push(Control {
            label,
            kind,
            binding,
            value,
        });
        self.folders[folder.0].controls.push(id);
        Ok(id)
    }

    pub fn add_color(
        &mut self,
        folder: FolderId,
        label: impl Into<String>,
        binding: Binding,
        scene: &Scene,
    ) -> Result<ControlId, PanelError> {
        self.add(folder, label, ControlKind::Color, binding, scene)
    }

    pub fn add_slider(
        &mut self,
        folder: FolderId,
        label: impl Into<String>,
        binding: Binding,
        min: f32,
        max: f32,
        scene: &Scene,
    ) -> Result<ControlId, PanelError> {
        self.add(folder, label, ControlKind::Slider { min, max }, binding, scene)
    }

    pub fn add_toggle(
        &mut self,
        folder: FolderId,
        label: impl Into<String>,
        binding: Binding,
        scene: &Scene,
    ) -> Result<ControlId, PanelError> {
        self.add(folder, label, ControlKind::Toggle, binding, scene)
    }

    /// Change a control and push the value into the scene.
    ///
    /// Slider values are clamped to the slider range. Returns the value that
    /// was applied.
    pub fn set(
        &mut self,
        id: ControlId,
        value: ControlValue,
        scene: &mut Scene,
    ) -> Result<ControlValue, PanelError> {
        let control = self.control(id)?;
        let value = match (control.kind, value) {
            (ControlKind::Slider { min, max }, ControlValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(PanelError::NotFinite {
                        label: control.label.clone(),
                    });
                }
                ControlValue::Number(n.clamp(min, max))
            }
            (ControlKind::Color, ControlValue::Color(_))
            | (ControlKind::Toggle, ControlValue::Bool(_)) => value,
            (kind, value) => {
                return Err(PanelError::ValueMismatch {
                    label: control.label.clone(),
                    expected: kind.name(),
                    found: value.kind_name(),
                });
            }
        };

        control.binding.apply(value, scene)?;
        tracing::debug!(
            "panel: {} = {value}",
            self.control_path(id).unwrap_or_default()
        );
        self.controls[id.0].value = value;
        Ok(value)
    }

    /// Parse `text` for the control at `path` (`"Folder/Sub/label"`) and set it.
    pub fn set_by_path(
        &mut self,
        path: &str,
        text: &str,
        scene: &mut Scene,
    ) -> Result<ControlValue, PanelError> {
        let (folder, label) = path
            .rsplit_once('/')
            .ok_or_else(|| PanelError::UnknownPath(path.to_string()))?;
        let id = self
            .find(folder, label)
            .ok_or_else(|| PanelError::UnknownPath(path.to_string()))?;
        let value = ControlValue::parse(self.control(id)?.kind, text)?;
        self.set(id, value, scene)
    }

    /// Every folder, parents before their children.
    pub fn folders(&self) -> impl Iterator<Item = (FolderId, &Folder)> {
        self.folders
            .iter()
            .enumerate()
            .map(|(i, f)| (FolderId(i), f))
    }

    pub fn root_folders(&self) -> impl Iterator<Item = FolderId> + '_ {
        self.folders
            .iter()
            .enumerate()
            .filter(|(_, f)| f.parent.is_none())
            .map(|(i, _)| FolderId(i))
    }

    pub fn subfolders(&self, id: FolderId) -> &[FolderId] {
        self.folders
            .get(id.0)
            .map(|f| f.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn controls_in(&self, id: FolderId) -> &[ControlId] {
        self.folders
            .get(id.0)
            .map(|f| f.controls.as_slice())
            .unwrap_or(&[])
    }

    pub fn controls(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, c)| (ControlId(i), c))
    }

    /// Slash-separated path from the root, e.g. `DirectionLight/Position`.
    pub fn folder_path(&self, id: FolderId) -> Result<String, PanelError> {
        let mut parts = Vec::new();
        let mut cursor = Some(id);
        while let Some(fid) = cursor {
            let folder = self.folder(fid)?;
            parts.push(folder.name.as_str());
            cursor = folder.parent;
        }
        parts.reverse();
        Ok(parts.join("/"))
    }

    fn control_path(&self, id: ControlId) -> Result<String, PanelError> {
        let folder = self
            .folders
            .iter()
            .position(|f| f.controls.contains(&id))
            .ok_or(PanelError::UnknownControl(id))?;
        Ok(format!(
            "{}/{}",
            self.folder_path(FolderId(folder))?,
            self.control(id)?.label
        ))
    }

    pub fn find_folder(&self, path: &str) -> Option<FolderId> {
        (0..self.folders.len())
            .map(FolderId)
            .find(|id| self.folder_path(*id).is_ok_and(|p| p == path))
    }

    /// Control labeled `label` directly inside the folder at `path`.
    pub fn find(&self, path: &str, label: &str) -> Option<ControlId> {
        let folder = self.find_folder(path)?;
        self.controls_in(folder)
            .iter()
            .copied()
            .find(|id| self.controls[id.0].label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubestage_common::{Axis, Color};
    use cubestage_scene::{AmbientLight, DirectionalLight, Node};
    use glam::Vec3;

    fn setup() -> (Panel, Scene, ControlId, ControlId) {
        let mut scene = Scene::default();
        let amb = scene.add(Node::AmbientLight(AmbientLight::new(Color::WHITE, 0.5)));
        let mut panel = Panel::new();
        let folder = panel.add_folder("AmbientLight");
        let color = panel
            .add_color(folder, "color", Binding::AmbientColor(amb), &scene)
            .unwrap();
        let intensity = panel
            .add_slider(folder, "intensity", Binding::AmbientIntensity(amb), 0.0, 10.0, &scene)
            .unwrap();
        (panel, scene, color, intensity)
    }

    #[test]
    fn initial_values_come_from_scene() {
        let (panel, _, color, intensity) = setup();
        assert_eq!(
            panel.control(color).unwrap().value(),
            ControlValue::Color(Color::WHITE)
        );
        assert_eq!(
            panel.control(intensity).unwrap().value(),
            ControlValue::Number(0.5)
        );
    }

    #[test]
    fn slider_set_exact_and_clamped() {
        let (mut panel, mut scene, _, intensity) = setup();
        let amb = scene.ambient_lights().next().unwrap().0;

        panel.set(intensity, ControlValue::Number(7.0), &mut scene).unwrap();
        assert_eq!(scene.ambient(amb).unwrap().intensity, 7.0);

        let applied = panel
            .set(intensity, ControlValue::Number(42.0), &mut scene)
            .unwrap();
        assert_eq!(applied, ControlValue::Number(10.0));
        assert_eq!(scene.ambient(amb).unwrap().intensity, 10.0);

        panel.set(intensity, ControlValue::Number(-1.0), &mut scene).unwrap();
        assert_eq!(scene.ambient(amb).unwrap().intensity, 0.0);
        assert_eq!(
            panel.control(intensity).unwrap().value(),
            ControlValue::Number(0.0)
        );
    }

    #[test]
    fn wrong_kind_and_nan_are_rejected() {
        let (mut panel, mut scene, color, intensity) = setup();
        assert!(matches!(
            panel.set(color, ControlValue::Bool(true), &mut scene),
            Err(PanelError::ValueMismatch { .. })
        ));
        assert!(matches!(
            panel.set(intensity, ControlValue::Number(f32::NAN), &mut scene),
            Err(PanelError::NotFinite { .. })
        ));
        assert_eq!(
            panel.control(color).unwrap().value(),
            ControlValue::Color(Color::WHITE)
        );
    }

    #[test]
    fn nested_paths_and_lookup() {
        let mut scene = Scene::default();
        let light = scene.add(Node::DirectionalLight(DirectionalLight::new(
            Color::WHITE,
            0.2,
            Vec3::splat(5.0),
        )));
        let mut panel = Panel::new();
        let folder = panel.add_folder("DirectionLight");
        let pos = panel.add_subfolder(folder, "Position").unwrap();
        let x = panel
            .add_slider(
                pos,
                "x",
                Binding::DirectionalPosition(light, Axis::X),
                -5.0,
                5.0,
                &scene,
            )
            .unwrap();

        assert_eq!(panel.folder_path(pos).unwrap(), "DirectionLight/Position");
        assert_eq!(panel.find("DirectionLight/Position", "x"), Some(x));
        assert_eq!(panel.find("DirectionLight", "x"), None);
        assert_eq!(panel.root_folders().collect::<Vec<_>>(), vec![folder]);
        assert_eq!(panel.subfolders(folder), &[pos]);
        let names: Vec<_> = panel.folders().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["DirectionLight", "Position"]);
        assert_eq!(panel.folder(pos).unwrap().parent(), Some(folder));

        panel
            .set_by_path("DirectionLight/Position/x", "-2", &mut scene)
            .unwrap();
        assert_eq!(scene.directional(light).unwrap().position().x, -2.0);
        assert!(matches!(
            panel.set_by_path("Nope/x", "1", &mut scene),
            Err(PanelError::UnknownPath(_))
        ));
    }

    #[test]
    fn add_rejects_kind_not_matching_binding() {
        let mut scene = Scene::default();
        let amb = scene.add(Node::AmbientLight(AmbientLight::new(Color::WHITE, 0.5)));
        let mut panel = Panel::new();
        let folder = panel.add_folder("AmbientLight");
        let err = panel
            .add_toggle(folder, "intensity", Binding::AmbientIntensity(amb), &scene)
            .unwrap_err();
        assert!(matches!(err, PanelError::ValueMismatch { .. }));
    }
}
