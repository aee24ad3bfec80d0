use cubestage_common::Color;
use cubestage_panel::{ControlId, ControlKind, ControlValue, FolderId, Panel};

/// Draw every folder of `panel` as nested collapsing sections.
///
/// Returns the edits made this frame; the caller pushes them through
/// [`Panel::set`] once the panel is no longer borrowed.
pub fn draw_panel(ui: &mut egui::Ui, panel: &Panel) -> Vec<(ControlId, ControlValue)> {
    let mut edits = Vec::new();
    for folder in panel.root_folders() {
        draw_folder(ui, panel, folder, &mut edits);
    }
    edits
}

fn draw_folder(
    ui: &mut egui::Ui,
    panel: &Panel,
    folder: FolderId,
    edits: &mut Vec<(ControlId, ControlValue)>,
) {
    let Ok(info) = panel.folder(folder) else {
        return;
    };
    let salt = panel.folder_path(folder).unwrap_or_else(|_| info.name.clone());
    egui::CollapsingHeader::new(info.name.as_str())
        .id_salt(salt)
        .default_open(true)
        .show(ui, |ui| {
            for &id in panel.controls_in(folder) {
                if let Some(value) = draw_control(ui, panel, id) {
                    edits.push((id, value));
                }
            }
            for &child in panel.subfolders(folder) {
                draw_folder(ui, panel, child, edits);
            }
        });
}

fn draw_control(ui: &mut egui::Ui, panel: &Panel, id: ControlId) -> Option<ControlValue> {
    let control = panel.control(id).ok()?;
    match (control.kind, control.value()) {
        (ControlKind::Color, ControlValue::Color(color)) => {
            let mut rgb = color.to_array();
            let changed = ui
                .horizontal(|ui| {
                    let changed = ui.color_edit_button_srgb(&mut rgb).changed();
                    ui.label(control.label.as_str());
                    changed
                })
                .inner;
            changed.then(|| ControlValue::Color(Color::from_array(rgb)))
        }
        (ControlKind::Slider { min, max }, ControlValue::Number(mut n)) => ui
            .add(egui::Slider::new(&mut n, min..=max).text(control.label.as_str()))
            .changed()
            .then_some(ControlValue::Number(n)),
        (ControlKind::Toggle, ControlValue::Bool(mut on)) => ui
            .checkbox(&mut on, control.label.as_str())
            .changed()
            .then_some(ControlValue::Bool(on)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubestage_author::{Demo, DemoOptions};
    use cubestage_render::FixedContainer;

    #[test]
    fn idle_frame_produces_no_edits() {
        let demo = Demo::new(&FixedContainer::new(800, 600), DemoOptions::default()).unwrap();
        let ctx = egui::Context::default();
        let mut edits = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::SidePanel::left("controls").show(ctx, |ui| {
                edits = draw_panel(ui, &demo.panel);
            });
        });
        assert!(edits.is_empty());
    }
}
