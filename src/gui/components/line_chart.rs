// src/gui/components/line_chart.rs
//
// All-around trend across meets, painted directly. Hovering shows the meet
// nearest the pointer.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, pos2, vec2};

const HEIGHT: f32 = 170.0;
const PAD: f32 = 28.0;

pub fn draw(ui: &mut egui::Ui, points: &[(String, f64)], color: Color32) {
    if points.is_empty() {
        ui.weak("No all-around scores yet.");
        return;
    }

    let (resp, painter) = ui.allocate_painter(vec2(ui.available_width(), HEIGHT), Sense::hover());
    let rect = resp.rect.shrink(PAD);
    let axis = ui.visuals().weak_text_color();

    let lo = points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min).floor();
    let hi = points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max).ceil();
    let span = (hi - lo).max(1.0);

    let at = |i: usize, v: f64| -> Pos2 {
        let t = if points.len() == 1 { 0.5 } else { i as f32 / (points.len() - 1) as f32 };
        let y = ((v - lo) / span) as f32;
        pos2(rect.left() + t * rect.width(), rect.bottom() - y * rect.height())
    };

    for v in [lo, hi] {
        let y = at(0, v).y;
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], Stroke::new(0.5, axis));
        painter.text(pos2(rect.left() - 4.0, y), Align2::RIGHT_CENTER, format!("{v:.0}"), FontId::proportional(11.0), axis);
    }

    let line: Vec<Pos2> = points.iter().enumerate().map(|(i, (_, v))| at(i, *v)).collect();
    if line.len() > 1 {
        painter.add(Shape::line(line.clone(), Stroke::new(2.0, color)));
    }
    for (p, (_, v)) in line.iter().zip(points) {
        painter.circle_filled(*p, 4.0, color);
        painter.text(*p - vec2(0.0, 8.0), Align2::CENTER_BOTTOM, format!("{v:.2}"), FontId::proportional(10.0), axis);
    }

    if let Some(hover) = resp.hover_pos() {
        let nearest = line
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1.x - hover.x).abs().total_cmp(&(b.1.x - hover.x).abs()))
            .map(|(i, _)| i);
        if let Some(i) = nearest {
            let (meet, v) = &points[i];
            resp.on_hover_text_at_pointer(format!("{meet}\nAA {v:.3}"));
        }
    }
}
