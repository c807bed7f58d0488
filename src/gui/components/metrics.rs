// src/gui/components/metrics.rs
use eframe::egui::{self, Color32, RichText};

use crate::data::Metric;

const UP: Color32 = Color32::from_rgb(0x2E, 0x9E, 0x4F);
const DOWN: Color32 = Color32::from_rgb(0xD0, 0x45, 0x45);

/// Latest score per event with the change since the previous meet.
pub fn draw(ui: &mut egui::Ui, metrics: &[Metric]) {
    if metrics.is_empty() {
        return;
    }
    ui.columns(metrics.len(), |cols| {
        for (ui, m) in cols.iter_mut().zip(metrics) {
            ui.label(RichText::new(m.event.name()).small().weak());
            match m.latest {
                Some(v) => ui.label(RichText::new(format!("{v:.3}")).size(22.0)),
                None => ui.label(RichText::new("-").size(22.0).weak()),
            };
            if let Some(d) = m.delta {
                let (color, arrow) = if d >= 0.0 { (UP, "▲") } else { (DOWN, "▼") };
                ui.label(RichText::new(format!("{arrow} {d:+.3}")).color(color).small());
            }
        }
    });
}
