// src/gui/components/history_table.rs
//
// The athlete's canonical rows, newest first.

use eframe::egui::{self, Align, Layout};
use egui_extras::{Column, TableBuilder};

use crate::model::{Event, MeetScoreRow};
use crate::score::fmt_score;

pub fn draw(ui: &mut egui::Ui, id: &str, rows: &[&MeetScoreRow], events: &[Event]) {
    if rows.is_empty() {
        ui.weak("No meets recorded.");
        return;
    }

    let mut headers = strings!["Date", "Meet", "Session", "Level", "Division"];
    headers.extend(events.iter().map(|e| s!(e.code())));
    headers.extend(strings!["AA", "Place"]);
    let numeric_from = 5;

    let table = TableBuilder::new(ui)
        .id_salt(("history", id))
        .striped(true)
        .vscroll(false)
        .column(Column::initial(90.0).resizable(true))
        .column(Column::initial(220.0).resizable(true).clip(true))
        .columns(Column::auto().at_least(52.0), headers.len() - 2);

    table
        .header(22.0, |mut header| {
            for h in &headers {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, rows.len(), |mut row| {
                let r = rows[rows.len() - 1 - row.index()];
                let mut cells = vec![
                    r.date.clone(),
                    r.meet.clone(),
                    r.session.clone(),
                    r.level.clone(),
                    r.division.clone(),
                ];
                for &ev in events.iter().chain([Event::AA].iter()) {
                    let e = r.event(ev);
                    cells.push(if e.competed() { fmt_score(e.score) } else { s!() });
                }
                cells.push(match (r.meet_rank, r.meet_rank_total) {
                    (Some(p), Some(t)) => format!("{p}/{t}"),
                    (Some(p), None) => p.to_string(),
                    _ => s!(),
                });

                for (ci, text) in cells.iter().enumerate() {
                    row.col(|ui| {
                        if ci >= numeric_from {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| ui.label(text));
                        } else {
                            ui.label(text);
                        }
                    });
                }
            });
        });
}
