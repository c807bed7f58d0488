// src/progress.rs
/// Progress reporting for long-running batches (harvest, normalize, analytics).
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of units (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit (an athlete profile, a result page, a session) completed.
    fn item_done(&mut self, _unit: &str) {}

    /// One unit failed and was left out of the output.
    fn item_failed(&mut self, _unit: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Per-batch outcome: which units made it, which failed, which were defaulted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, String)>,
    pub defaulted: Vec<String>,
}

impl BatchReport {
    pub fn ok(&mut self, unit: &str, progress: &mut dyn Progress) {
        self.succeeded.push(s!(unit));
        progress.item_done(unit);
    }

    pub fn fail(&mut self, unit: &str, reason: &str, progress: &mut dyn Progress) {
        loge!("{unit}: {reason}");
        self.failed.push((s!(unit), s!(reason)));
        progress.item_failed(unit, reason);
    }

    /// Unit produced output, but parts of it fell back to defaults.
    pub fn defaulted(&mut self, unit: &str, progress: &mut dyn Progress) {
        logd!("{unit}: defaulted");
        self.defaulted.push(s!(unit));
        progress.item_done(unit);
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ok, {} failed, {} defaulted",
            self.succeeded.len(),
            self.failed.len(),
            self.defaulted.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Tally {
        done: Vec<String>,
        failed: usize,
    }

    impl Progress for Tally {
        fn item_done(&mut self, unit: &str) {
            self.done.push(s!(unit));
        }
        fn item_failed(&mut self, _unit: &str, _reason: &str) {
            self.failed += 1;
        }
    }

    #[test]
    fn report_forwards_to_progress() {
        let mut tally = Tally::default();
        let mut report = BatchReport::default();
        report.ok("Ansel", &mut tally);
        report.defaulted("Azalea", &mut tally);
        report.fail("Annabelle", "timeout", &mut tally);

        assert_eq!(tally.done, strings!["Ansel", "Azalea"]);
        assert_eq!(tally.failed, 1);
        assert_eq!(report.summary(), "1 ok, 1 failed, 1 defaulted");
    }
}
