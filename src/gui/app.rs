// src/gui/app.rs
use std::{
    collections::{HashMap, HashSet},
    error::Error,
    sync::{Arc, Mutex},
};

use eframe::egui;

use super::{components, pages::Page, router};
use crate::config::options::{AppOptions, TrackedAthlete, default_athletes};
use crate::data::Dashboard;
use crate::model::Event;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Sheehy All-Around",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppOptions::default())))),
    )?;
    Ok(())
}

/// Cards turned to their back side, per athlete, meet and event.
#[derive(Default)]
pub struct FlippedCards(HashSet<(String, String, Event)>);

impl FlippedCards {
    pub fn is_flipped(&self, nick: &str, meet: &str, event: Event) -> bool {
        self.0.contains(&(s!(nick), s!(meet), event))
    }

    pub fn set(&mut self, nick: &str, meet: &str, event: Event, flipped: bool) {
        let key = (s!(nick), s!(meet), event);
        if flipped {
            self.0.insert(key);
        } else {
            self.0.remove(&key);
        }
    }
}

pub struct App {
    pub options: AppOptions,
    pub athletes: Vec<TrackedAthlete>,
    pub pages: Vec<Arc<dyn Page>>,
    pub current: usize,

    pub dashboard: Dashboard,

    // nick → meet shown in the context section
    pub selected_meet: HashMap<String, String>,
    pub flipped: FlippedCards,

    pub status: Arc<Mutex<String>>,
    pub running: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let athletes = default_athletes();
        let pages = router::pages_for(&athletes);
        let dashboard = Dashboard::load(&options.dashboard);

        let status = if dashboard.messages.is_empty() {
            s!("Loaded local data")
        } else {
            s!("Some data is missing")
        };
        logf!("Init: athletes={}, pages={}", athletes.len(), pages.len());

        Self {
            options,
            athletes,
            pages,
            current: 0,
            dashboard,
            selected_meet: HashMap::new(),
            flipped: FlippedCards::default(),
            status: Arc::new(Mutex::new(status)),
            running: false,
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn reload(&mut self) {
        self.dashboard = Dashboard::load(&self.options.dashboard);
        // Meets may have disappeared; fall back to the default pick.
        let dashboard = &self.dashboard;
        let athletes = &self.athletes;
        self.selected_meet.retain(|nick, meet| {
            athletes
                .iter()
                .find(|a| &a.nick == nick)
                .is_some_and(|a| dashboard.meets_for(a).contains(meet))
        });
    }

    /// The meet picked for an athlete, else their last meet with analytics.
    pub fn meet_for(&self, athlete: &TrackedAthlete) -> Option<String> {
        self.selected_meet
            .get(&athlete.nick)
            .cloned()
            .or_else(|| self.dashboard.meets_for(athlete).pop())
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            components::status_bar::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::tabs::draw(ui, self);
            ui.separator();

            let warn = ui.visuals().warn_fg_color;
            for msg in &self.dashboard.messages {
                ui.colored_label(warn, msg);
            }

            let page = self.pages[self.current.min(self.pages.len() - 1)].clone();
            egui::ScrollArea::vertical()
                .id_salt("page_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| page.draw(ui, self));
        });
    }
}
