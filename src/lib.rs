// src/lib.rs
// #![allow(dead_code)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod analytics;
pub mod csv;
pub mod data;
pub mod file;
pub mod gui;
pub mod harvest;
pub mod model;
pub mod progress;
pub mod runner;
pub mod schema;
pub mod score;
pub mod store;
