// src/gui/components/status_bar.rs
use eframe::egui::{self, widgets::Spinner};

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let rebuild = ui
            .add_enabled(!app.running, egui::Button::new("Rebuild analytics"))
            .on_hover_text(format!("Recompute from {}", app.options.analytics.input.display()));
        if rebuild.clicked() {
            actions::rebuild_analytics(app);
        }
        if ui.add_enabled(!app.running, egui::Button::new("Reload")).clicked() {
            actions::reload(app);
        }

        ui.separator();
        if app.running {
            ui.add(Spinner::new());
        }
        ui.label(app.status_text());
    });
}
