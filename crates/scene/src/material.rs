use cubestage_common::Color;
use serde::{Deserialize, Serialize};

/// Shading mode of a mesh surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    /// Responds to scene lights.
    Lit,
    /// Flat color, ignores lighting.
    Unlit,
}

impl MaterialKind {
    /// `true` maps to [`MaterialKind::Lit`], matching the "affected by light" toggle.
    pub fn from_lit(lit: bool) -> Self {
        if lit { Self::Lit } else { Self::Unlit }
    }

    pub fn is_lit(self) -> bool {
        self == Self::Lit
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Lit => Self::Unlit,
            Self::Unlit => Self::Lit,
        }
    }
}

/// Surface description of a mesh.
///
/// `needs_update` is raised by every change and cleared by the renderer once
/// the new values are on the GPU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    kind: MaterialKind,
    color: Color,
    #[serde(skip)]
    needs_update: bool,
}

impl Material {
    /// Describe a fresh material of `kind` with `color`. Always dirty.
    pub fn describe(color: Color, kind: MaterialKind) -> Self {
        Self {
            kind,
            color,
            needs_update: true,
        }
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Change the color in place.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.needs_update = true;
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    pub fn mark_uploaded(&mut self) {
        self.needs_update = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_is_dirty() {
        let m = Material::describe(Color::RED, MaterialKind::Unlit);
        assert!(m.needs_update());
        assert_eq!(m.kind(), MaterialKind::Unlit);
        assert_eq!(m.color(), Color::RED);
    }

    #[test]
    fn set_color_marks_dirty() {
        let mut m = Material::describe(Color::RED, MaterialKind::Lit);
        m.mark_uploaded();
        assert!(!m.needs_update());
        m.set_color(Color::BLUE);
        assert!(m.needs_update());
        assert_eq!(m.color(), Color::BLUE);
    }

    #[test]
    fn kind_toggle() {
        assert_eq!(MaterialKind::Lit.toggled(), MaterialKind::Unlit);
        assert_eq!(MaterialKind::Lit.toggled().toggled(), MaterialKind::Lit);
        assert_eq!(MaterialKind::from_lit(false), MaterialKind::Unlit);
        assert!(MaterialKind::from_lit(true).is_lit());
    }
}
