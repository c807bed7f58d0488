// src/gui/pages/mod.rs
use eframe::egui;

use crate::gui::app::App;

pub mod athlete;
pub mod team;

pub trait Page: Send + Sync + 'static {
    fn title(&self) -> String;

    /// Accent colour for the tab label.
    fn color(&self) -> Option<egui::Color32> {
        None
    }

    /// Draw the page body. Runs on the UI thread every frame.
    fn draw(&self, ui: &mut egui::Ui, app: &mut App);
}

pub fn color32(rgb: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}
