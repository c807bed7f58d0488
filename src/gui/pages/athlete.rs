// src/gui/pages/athlete.rs
use eframe::egui::{self, RichText};

use super::{Page, color32};
use crate::config::options::TrackedAthlete;
use crate::data::ContextRow;
use crate::gui::{app::App, components};
use crate::model::Discipline;

pub struct AthletePage {
    athlete: TrackedAthlete,
}

impl AthletePage {
    pub fn new(athlete: TrackedAthlete) -> Self {
        Self { athlete }
    }

    fn heading(&self, level: &str) -> String {
        let a = &self.athlete;
        let mut text = if level.is_empty() { a.nick.clone() } else { format!("{} - Level {level}", a.nick) };
        if a.discipline == Discipline::Mens {
            text.push_str(" (Mens)");
        }
        text
    }
}

impl Page for AthletePage {
    fn title(&self) -> String {
        self.athlete.nick.clone()
    }

    fn color(&self) -> Option<egui::Color32> {
        Some(color32(self.athlete.color))
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        let a = &self.athlete;
        let color = color32(a.color);
        let rows = app.dashboard.rows_for(a);
        let level = rows.last().map(|r| r.level.clone()).unwrap_or_default();

        ui.heading(RichText::new(self.heading(&level)).color(color).strong());
        ui.add_space(6.0);
        components::metrics::draw(ui, &app.dashboard.metrics(a));

        ui.separator();
        ui.strong("All-Around by meet");
        components::line_chart::draw(ui, &app.dashboard.aa_series(a), color);

        ui.separator();
        ui.heading("Session Context");
        let meets = app.dashboard.meets_for(a);
        if meets.is_empty() {
            ui.weak(format!("No session analytics for {} yet.", a.nick));
        } else {
            let mut meet = app.meet_for(a).unwrap_or_else(|| meets[meets.len() - 1].clone());
            egui::ComboBox::from_id_salt(("meet", &a.nick))
                .selected_text(meet.as_str())
                .width(320.0)
                .show_ui(ui, |ui| {
                    for m in &meets {
                        ui.selectable_value(&mut meet, m.clone(), m.as_str());
                    }
                });
            if app.selected_meet.get(&a.nick) != Some(&meet) {
                logd!("UI: {} meet → {}", a.nick, meet);
                app.selected_meet.insert(a.nick.clone(), meet.clone());
            }

            if let Some((mood, jsi)) = app.dashboard.mood(a, &meet) {
                ui.label(RichText::new(format!("{} (JSI: {jsi:.2})", mood.headline())).strong());
            }

            let session_level = app.dashboard.level_at(a, &meet).unwrap_or_else(|| level.clone());
            let context = app.dashboard.context_for(a, &meet);
            let cards: Vec<&ContextRow> = a
                .discipline
                .events()
                .iter()
                .filter_map(|ev| context.iter().find(|c| c.record.event == *ev).copied())
                .collect();

            for chunk in cards.chunks(3) {
                ui.columns(3, |cols| {
                    for (col, row) in cols.iter_mut().zip(chunk) {
                        let ev = row.record.event;
                        let mut flipped = app.flipped.is_flipped(&a.nick, &meet, ev);
                        components::flip_card::draw(col, row, &session_level, color, &mut flipped);
                        app.flipped.set(&a.nick, &meet, ev, flipped);
                    }
                });
                ui.add_space(6.0);
            }
        }

        ui.separator();
        ui.strong("Meet history");
        components::history_table::draw(ui, &a.nick, &rows, a.discipline.events());
    }
}
