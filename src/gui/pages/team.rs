// src/gui/pages/team.rs
use eframe::egui::{self, RichText};

use super::{Page, color32};
use crate::gui::{app::App, components::line_chart};

pub struct TeamPage;

fn aa(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_else(|| s!("-"))
}

impl Page for TeamPage {
    fn title(&self) -> String {
        s!("Team Overview")
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        ui.heading("Team Overview");
        ui.add_space(6.0);

        egui::Grid::new("team_overview")
            .striped(true)
            .num_columns(5)
            .spacing([24.0, 6.0])
            .show(ui, |ui| {
                for h in ["Athlete", "Program", "Meets", "Latest AA", "Best AA"] {
                    ui.strong(h);
                }
                ui.end_row();

                for a in &app.athletes {
                    let line = app.dashboard.team_line(a);
                    ui.label(RichText::new(&line.athlete).color(color32(a.color)).strong());
                    ui.label(a.discipline.label());
                    ui.label(line.meets.to_string());
                    ui.label(aa(line.latest_aa));
                    ui.label(aa(line.best_aa));
                    ui.end_row();
                }
            });

        ui.separator();
        for a in &app.athletes {
            ui.label(RichText::new(&a.nick).color(color32(a.color)));
            line_chart::draw(ui, &app.dashboard.aa_series(a), color32(a.color));
        }
    }
}
