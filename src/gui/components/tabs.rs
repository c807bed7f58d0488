// src/gui/components/tabs.rs
//
// Top tab strip. Switching only changes the index; pages read the shared
// dashboard data every frame so there is nothing to rebuild.

use eframe::egui::{self, RichText};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.current;
        let mut clicked = None;
        for (idx, page) in app.pages.iter().enumerate() {
            let selected = idx == cur;
            let mut text = RichText::new(page.title());
            if let Some(c) = page.color().filter(|_| selected) {
                text = text.color(c).strong();
            }
            if ui.selectable_label(selected, text).clicked() && !selected {
                clicked = Some(idx);
            }
        }

        if let Some(idx) = clicked {
            logf!("UI: Tab switch {} → {}", app.pages[cur].title(), app.pages[idx].title());
            app.current = idx;
        }
    });
}
