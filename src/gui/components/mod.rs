// src/gui/components/mod.rs
pub mod flip_card;
pub mod history_table;
pub mod line_chart;
pub mod metrics;
pub mod status_bar;
pub mod tabs;
