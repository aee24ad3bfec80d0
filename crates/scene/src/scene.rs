use crate::cube::Cube;
use crate::helpers::{AxesHelper, GridHelper, LineVertex};
use crate::light::{AmbientLight, DirectionalLight, DirectionalLightHelper};
use cubestage_common::{Axis, Color, NodeId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Anything that can live in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Mesh(Cube),
    DirectionalLight(DirectionalLight),
    DirectionalLightHelper(DirectionalLightHelper),
    AmbientLight(AmbientLight),
    Grid(GridHelper),
    Axes(AxesHelper),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Mesh(_) => "mesh",
            Node::DirectionalLight(_) => "directional light",
            Node::DirectionalLightHelper(_) => "directional light helper",
            Node::AmbientLight(_) => "ambient light",
            Node::Grid(_) => "grid",
            Node::Axes(_) => "axes",
        }
    }
}

/// Errors from scene lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("node {id:?} is a {found}, expected a {expected}")]
    WrongNodeKind {
        id: NodeId,
        expected: &'static str,
        found: &'static str,
    },
}

/// Ordered collection of nodes plus a background color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    background: Color,
    nodes: Vec<(NodeId, Node)>,
}

macro_rules! node_accessors {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty, $expected:literal) => {
        pub fn $get(&self, id: NodeId) -> Result<&$ty, SceneError> {
            match self.node(id)? {
                Node::$variant(inner) => Ok(inner),
                other => Err(SceneError::WrongNodeKind {
                    id,
                    expected: $expected,
                    found: other.kind(),
                }),
            }
        }

        pub fn $get_mut(&mut self, id: NodeId) -> Result<&mut $ty, SceneError> {
            match self.node_mut(id)? {
                Node::$variant(inner) => Ok(inner),
                other => Err(SceneError::WrongNodeKind {
                    id,
                    expected: $expected,
                    found: other.kind(),
                }),
            }
        }
    };
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node. Returns its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId::new();
        tracing::debug!("scene: added {} [{}]", node.kind(), id.short());
        self.nodes.push((id, node));
        id
    }

    /// Add a helper paired with the directional light `light`.
    pub fn add_directional_helper(
        &mut self,
        light: NodeId,
        size: f32,
        color: Color,
    ) -> Result<NodeId, SceneError> {
        let helper = DirectionalLightHelper::new(light, self.directional(light)?, size, color);
        Ok(self.add(Node::DirectionalLightHelper(helper)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|(nid, _)| *nid == id).map(|(_, n)| n)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    fn node(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| *nid == id)
            .map(|(_, n)| n)
            .ok_or(SceneError::NodeNotFound(id))
    }

    node_accessors!(cube, cube_mut, Mesh, Cube, "mesh");
    node_accessors!(
        directional,
        directional_mut,
        DirectionalLight,
        DirectionalLight,
        "directional light"
    );
    node_accessors!(ambient, ambient_mut, AmbientLight, AmbientLight, "ambient light");

    pub fn directional_helper(&self, id: NodeId) -> Result<&DirectionalLightHelper, SceneError> {
        match self.node(id)? {
            Node::DirectionalLightHelper(h) => Ok(h),
            other => Err(SceneError::WrongNodeKind {
                id,
                expected: "directional light helper",
                found: other.kind(),
            }),
        }
    }

    pub fn cubes(&self) -> impl Iterator<Item = (NodeId, &Cube)> {
        self.nodes.iter().filter_map(|(id, n)| match n {
            Node::Mesh(c) => Some((*id, c)),
            _ => None,
        })
    }

    pub fn cubes_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Cube)> {
        self.nodes.iter_mut().filter_map(|(id, n)| match n {
            Node::Mesh(c) => Some((*id, c)),
            _ => None,
        })
    }

    pub fn directional_lights(&self) -> impl Iterator<Item = (NodeId, &DirectionalLight)> {
        self.nodes.iter().filter_map(|(id, n)| match n {
            Node::DirectionalLight(l) => Some((*id, l)),
            _ => None,
        })
    }

    pub fn ambient_lights(&self) -> impl Iterator<Item = (NodeId, &AmbientLight)> {
        self.nodes.iter().filter_map(|(id, n)| match n {
            Node::AmbientLight(l) => Some((*id, l)),
            _ => None,
        })
    }

    /// Move one axis of a directional light, then refresh its derived state.
    pub fn set_directional_position(
        &mut self,
        id: NodeId,
        axis: Axis,
        value: f32,
    ) -> Result<Vec3, SceneError> {
        let light = self.directional_mut(id)?;
        let mut position = light.position();
        axis.set(&mut position, value);
        light.set_position(position);
        self.refresh_directional(id)?;
        Ok(position)
    }

    /// Recompute the light's target matrix and update every helper paired
    /// with it.
    pub fn refresh_directional(&mut self, id: NodeId) -> Result<(), SceneError> {
        let light = self.directional_mut(id)?;
        light.update_target_matrix();
        let light = light.clone();

        let mut refreshed = 0;
        for (_, node) in &mut self.nodes {
            if let Node::DirectionalLightHelper(helper) = node {
                if helper.light() == id {
                    helper.update(&light);
                    refreshed += 1;
                }
            }
        }
        tracing::debug!(
            "scene: light [{}] at {:?}, {refreshed} helper(s) refreshed",
            id.short(),
            light.position()
        );
        Ok(())
    }

    /// Line geometry of every helper node, in insertion order.
    pub fn helper_lines(&self) -> Vec<LineVertex> {
        let mut verts = Vec::new();
        for (_, node) in &self.nodes {
            match node {
                Node::Grid(g) => verts.extend(g.line_vertices()),
                Node::Axes(a) => verts.extend(a.line_vertices()),
                Node::DirectionalLightHelper(h) => verts.extend(h.line_vertices()),
                _ => {}
            }
        }
        verts
    }

    /// Line geometry of the grid and axes only. These never change after
    /// being added.
    pub fn static_lines(&self) -> Vec<LineVertex> {
        let mut verts = Vec::new();
        for (_, node) in &self.nodes {
            match node {
                Node::Grid(g) => verts.extend(g.line_vertices()),
                Node::Axes(a) => verts.extend(a.line_vertices()),
                _ => {}
            }
        }
        verts
    }

    /// Line geometry of the light helpers, which move with their lights.
    pub fn dynamic_lines(&self) -> Vec<LineVertex> {
        self.nodes
            .iter()
            .filter_map(|(_, n)| match n {
                Node::DirectionalLightHelper(h) => Some(h.line_vertices()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_with_light() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::default();
        let light = scene.add(Node::DirectionalLight(DirectionalLight::new(
            Color::WHITE,
            0.2,
            Vec3::new(5.0, 5.0, 5.0),
        )));
        let helper = scene
            .add_directional_helper(light, 1.0, Color::RED)
            .unwrap();
        (scene, light, helper)
    }

    #[test]
    fn background_change_touches_nothing_else() {
        let (mut scene, _, _) = scene_with_light();
        let before: Vec<_> = scene.nodes().map(|(id, n)| (id, n.clone())).collect();
        scene.set_background(Color::from_hex(0x102030));
        assert_eq!(scene.background(), Color::from_hex(0x102030));
        let after: Vec<_> = scene.nodes().map(|(id, n)| (id, n.clone())).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut scene = Scene::default();
        let a = scene.add(Node::Mesh(Cube::new("a", Color::RED, -3.0)));
        let b = scene.add(Node::Grid(GridHelper::default()));
        let c = scene.add(Node::Mesh(Cube::new("c", Color::BLUE, 3.0)));
        let ids: Vec<_> = scene.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b, c]);
        assert_eq!(scene.cubes().count(), 2);
    }

    #[test]
    fn wrong_kind_is_reported() {
        let mut scene = Scene::default();
        let grid = scene.add(Node::Grid(GridHelper::default()));
        let err = scene.cube_mut(grid).unwrap_err();
        assert_eq!(
            err,
            SceneError::WrongNodeKind {
                id: grid,
                expected: "mesh",
                found: "grid"
            }
        );
        let missing = NodeId::new();
        assert_eq!(
            scene.ambient(missing).unwrap_err(),
            SceneError::NodeNotFound(missing)
        );
    }

    #[test]
    fn position_change_refreshes_helper_on_every_axis() {
        let (mut scene, light, helper) = scene_with_light();
        for (axis, value) in [(Axis::X, 5.0), (Axis::Y, -2.5), (Axis::Z, 0.75)] {
            let pos = scene.set_directional_position(light, axis, value).unwrap();
            assert_eq!(axis.get(pos), value);

            let l = scene.directional(light).unwrap().clone();
            let h = scene.directional_helper(helper).unwrap();
            assert_eq!(h.position(), l.position());
            assert!((h.direction() - l.direction()).length() < 1e-6);
            assert_eq!(l.target_matrix_world(), glam::Mat4::from_translation(l.target()));
        }
        assert_eq!(
            scene.directional(light).unwrap().position(),
            Vec3::new(5.0, -2.5, 0.75)
        );
    }

    #[test]
    fn helper_for_other_light_untouched() {
        let (mut scene, light, _) = scene_with_light();
        let other = scene.add(Node::DirectionalLight(DirectionalLight::new(
            Color::WHITE,
            1.0,
            Vec3::new(0.0, 3.0, 0.0),
        )));
        let other_helper = scene.add_directional_helper(other, 1.0, Color::RED).unwrap();
        scene.set_directional_position(light, Axis::X, -1.0).unwrap();
        assert_eq!(
            scene.directional_helper(other_helper).unwrap().position(),
            Vec3::new(0.0, 3.0, 0.0)
        );
    }

    #[test]
    fn static_and_dynamic_lines_partition_helpers() {
        let (mut scene, _, _) = scene_with_light();
        scene.add(Node::Grid(GridHelper::new(2.0, 2)));
        scene.add(Node::Axes(AxesHelper::new(3.0)));
        assert_eq!(scene.static_lines().len(), 3 * 4 + 6);
        assert_eq!(scene.dynamic_lines().len(), 10);
        assert_eq!(
            scene.helper_lines().len(),
            scene.static_lines().len() + scene.dynamic_lines().len()
        );
    }
}
