// src/gui/components/flip_card.rs
//
// Per-event card. Front: the score. Back: where that score sat in its session.

use eframe::egui::{self, Align2, Color32, FontId, Rect, RichText, Sense, Stroke, pos2, vec2};

use crate::config::consts::{BULLET_AXIS_MAX, BULLET_AXIS_MIN, STAR_GOLD};
use crate::data::ContextRow;
use crate::gui::pages::color32;

const RANGE_GREY: Color32 = Color32::from_rgb(0xE0, 0xE0, 0xE0);

/// Draw one card; clicking its button toggles `flipped`.
pub fn draw(ui: &mut egui::Ui, row: &ContextRow, level: &str, color: Color32, flipped: &mut bool) {
    let r = &row.record;
    egui::Frame::group(ui.style()).inner_margin(10.0).show(ui, |ui| {
        ui.set_min_height(150.0);
        if !*flipped {
            ui.horizontal(|ui| {
                ui.strong(r.event.name());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Context 🔍").clicked() {
                        *flipped = true;
                    }
                });
            });
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(format!("{:.3}", r.score)).size(34.0).color(color).strong());
            });
        } else {
            ui.strong(format!("{} Performance Analysis", r.event.name()));
            bullet(ui, row, color);
            ui.label(format!("Insight: Beating {:.0}% of the field.", r.percentile));
            ui.label(
                RichText::new(format!("Context: Session of {} Level {} athletes.", r.count, level))
                    .small()
                    .weak(),
            );
            if ui.small_button("Back to Score").clicked() {
                *flipped = false;
            }
        }
    });
}

/// Horizontal bullet chart on a fixed 7.0–10.0 axis: grey session range,
/// coloured division range, white median tick, gold star at the score.
pub fn bullet(ui: &mut egui::Ui, row: &ContextRow, color: Color32) {
    let r = &row.record;
    let (resp, painter) = ui.allocate_painter(vec2(ui.available_width(), 54.0), Sense::hover());
    let area = resp.rect.shrink2(vec2(10.0, 4.0));
    let cy = area.top() + 16.0;

    let x = |v: f64| {
        let t = (v.clamp(BULLET_AXIS_MIN, BULLET_AXIS_MAX) - BULLET_AXIS_MIN) / (BULLET_AXIS_MAX - BULLET_AXIS_MIN);
        area.left() + t as f32 * area.width()
    };

    let axis = ui.visuals().weak_text_color();
    let mut tick = BULLET_AXIS_MIN;
    while tick <= BULLET_AXIS_MAX + 1e-9 {
        let tx = x(tick);
        painter.line_segment([pos2(tx, cy + 14.0), pos2(tx, cy + 18.0)], Stroke::new(1.0, axis));
        painter.text(pos2(tx, cy + 20.0), Align2::CENTER_TOP, format!("{tick:.1}"), FontId::proportional(10.0), axis);
        tick += 0.5;
    }

    let band = |top: f32, bottom: f32, to: f64| Rect::from_min_max(pos2(x(BULLET_AXIS_MIN), top), pos2(x(to), bottom));
    painter.rect_filled(band(cy - 10.0, cy + 10.0, r.max), 2.0, RANGE_GREY);
    painter.rect_filled(band(cy - 4.0, cy + 4.0, row.division_max), 1.0, color);

    let mx = x(r.median);
    painter.line_segment([pos2(mx, cy - 12.0), pos2(mx, cy + 12.0)], Stroke::new(3.0, Color32::WHITE));

    painter.text(pos2(x(r.score), cy), Align2::CENTER_CENTER, "★", FontId::proportional(22.0), color32(STAR_GOLD));

    resp.on_hover_text(format!(
        "Score {:.3}\nSession median {:.3}\nSession max {:.3}",
        r.score, r.median, r.max
    ));
}
