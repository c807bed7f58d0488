// src/gui/actions.rs
//
// Buttons that touch the files on disk. They run on the UI thread and report
// through the status line.

use crate::gui::{app::App, progress::GuiProgress};
use crate::runner;

/// Rerun analytics on the session file, then reload what the pages show.
pub fn rebuild_analytics(app: &mut App) {
    app.running = true;
    logf!("UI: Rebuild analytics from {}", app.options.analytics.input.display());

    let mut prog = GuiProgress::new(app.status.clone());
    match runner::analyze(&app.options.analytics, &mut prog) {
        Ok(report) => {
            app.reload();
            app.status(format!(
                "Analytics rebuilt: {} records from {} sessions",
                report.records, report.sessions
            ));
        }
        Err(e) => {
            loge!("UI: Rebuild failed: {}", e);
            app.status(format!("Error: {e}"));
        }
    }
    app.running = false;
}

pub fn reload(app: &mut App) {
    app.reload();
    let d = &app.dashboard;
    let msg = format!("Reloaded: {} history rows, {} context rows", d.history.len(), d.context.len());
    app.status(msg);
}
