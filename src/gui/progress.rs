// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Mirrors pipeline progress into the status line.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, failed: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(msg);
    }
    fn item_done(&mut self, unit: &str) {
        self.done += 1;
        self.set_status(format!("{unit} ({}/{})", self.done, self.total));
    }
    fn item_failed(&mut self, unit: &str, reason: &str) {
        self.failed += 1;
        self.set_status(format!("Failed {unit}: {reason}"));
    }
    fn finish(&mut self) {
        match (self.total, self.failed) {
            (0, _) => self.set_status("Done"),
            (_, 0) => self.set_status(format!("Done ({}/{})", self.done, self.total)),
            _ => self.set_status(format!("Done ({}/{}, {} failed)", self.done, self.total, self.failed)),
        }
    }
}
