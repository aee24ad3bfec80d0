//! Debug UI panel: a tree of named folders, each holding controls bound to
//! one scene attribute.
//!
//! The panel is a plain object owned by whoever composes the scene; UI
//! frontends read it and push edits back through [`Panel::set`].
//!
//! # Invariants
//! - A control's stored value equals the bound attribute after every
//!   [`Panel::set`]; edits only flow from the panel to the scene.
//! - Slider values are clamped into their range before they reach the scene.

mod binding;
mod panel;
mod value;

pub use binding::Binding;
pub use panel::{Control, ControlId, Folder, FolderId, Panel, PanelError};
pub use value::{ControlKind, ControlValue};

pub fn crate_info() -> &'static str {
    "cubestage-panel v0.1.0"
}
