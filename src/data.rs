// src/data.rs
//! What the dashboard reads: the canonical history and the analytics records,
//! plus the per-athlete views the pages draw from.

use crate::analytics::ContextRecord;
use crate::config::consts::JSI_MOOD_THRESHOLD;
use crate::config::options::{DashboardOptions, TrackedAthlete};
use crate::csv::read_table;
use crate::model::{Event, MeetScoreRow};
use crate::score::parse_score_rank;
use crate::store::{CsvRepository, DataSet, ScoreRepository};

/// One analytics line as the dashboard sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextRow {
    pub record: ContextRecord,
    /// Top of the athlete's age-division range; the session max when the file has none.
    pub division_max: f64,
}

// Older analytics files used the longer names.
const COLUMN_FALLBACKS: &[(&str, &str)] = &[
    ("Median", "Session_Median"),
    ("Max", "Session_Max"),
    ("Count", "Session_Count"),
    ("Percentile", "Percentile_Rank"),
];

fn column(data: &DataSet, name: &str) -> Option<usize> {
    data.column(name).or_else(|| {
        COLUMN_FALLBACKS
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, old)| data.column(old))
    })
}

fn number(text: &str) -> f64 {
    let t = text.trim();
    t.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or_else(|| parse_score_rank(Some(t)).0)
}

/// Analytics rows by header name. Rows without a known event code are skipped.
pub fn context_rows(data: &DataSet) -> Vec<ContextRow> {
    let col = |name: &str| column(data, name);
    let (meet, gymnast, event, score) = (col("Meet"), col("Gymnast"), col("Event"), col("Score"));
    let (median, max, count) = (col("Median"), col("Max"), col("Count"));
    let (percentile, jsi, div_max) = (col("Percentile"), col("JSI"), col("Division_Max"));

    let text = |row: &[String], ix: Option<usize>| -> String {
        ix.and_then(|i| row.get(i)).map(|s| s!(s.trim())).unwrap_or_default()
    };
    let num = |row: &[String], ix: Option<usize>| number(&text(row, ix));

    data.rows
        .iter()
        .filter_map(|row| {
            let ev = Event::from_code(&text(row, event))?;
            let record = ContextRecord {
                meet: text(row, meet),
                gymnast: text(row, gymnast),
                event: ev,
                score: num(row, score),
                median: num(row, median),
                max: num(row, max),
                count: num(row, count) as usize,
                percentile: num(row, percentile),
                jsi: num(row, jsi),
            };
            let division_max = match num(row, div_max) {
                v if v > 0.0 => v,
                _ => record.max,
            };
            Some(ContextRow { record, division_max })
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JudgeMood {
    Stricter,
    Typical,
    Looser,
}

impl JudgeMood {
    pub fn from_jsi(mean_jsi: f64) -> Self {
        if mean_jsi <= -JSI_MOOD_THRESHOLD {
            JudgeMood::Stricter
        } else if mean_jsi >= JSI_MOOD_THRESHOLD {
            JudgeMood::Looser
        } else {
            JudgeMood::Typical
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            JudgeMood::Stricter => "🌬 Judge Mood: Significantly Stricter than Average",
            JudgeMood::Typical => "☁ Judge Mood: Typical Scoring Environment",
            JudgeMood::Looser => "☀ Judge Mood: Significantly Looser than Average",
        }
    }
}

/// Latest competed score for an event and its change from the meet before.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metric {
    pub event: Event,
    pub latest: Option<f64>,
    pub delta: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TeamLine {
    pub athlete: String,
    pub meets: usize,
    pub latest_aa: Option<f64>,
    pub best_aa: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    pub history: Vec<MeetScoreRow>,
    pub context: Vec<ContextRow>,
    /// Shown in place of data when a file could not be read.
    pub messages: Vec<String>,
}

impl Dashboard {
    pub fn load(opts: &DashboardOptions) -> Self {
        let mut out = Dashboard::default();

        if opts.cleaned.exists() {
            match CsvRepository::new(&opts.cleaned).load() {
                Ok(rows) => out.history = rows,
                Err(e) => out.messages.push(format!("Could not read {}: {e}", opts.cleaned.display())),
            }
        } else {
            out.messages.push(format!("Missing '{}'. Run the harvest and normalize steps.", opts.cleaned.display()));
        }

        if opts.analytics.exists() {
            match read_table(&opts.analytics) {
                Ok(data) => out.context = context_rows(&data),
                Err(e) => out.messages.push(format!("Could not read {}: {e}", opts.analytics.display())),
            }
        } else {
            out.messages.push(format!("Missing '{}'. Run analytics first.", opts.analytics.display()));
        }

        logf!(
            "Dashboard: {} history rows, {} context rows",
            out.history.len(),
            out.context.len()
        );
        out
    }

    /// The athlete's history rows in date order (ISO dates sort as text).
    pub fn rows_for(&self, athlete: &TrackedAthlete) -> Vec<&MeetScoreRow> {
        let mut rows: Vec<&MeetScoreRow> = self.history.iter().filter(|r| athlete.matches(&r.gymnast)).collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        rows
    }

    /// Meets with analytics for the athlete, in first-seen order.
    pub fn meets_for(&self, athlete: &TrackedAthlete) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for c in self.context.iter().filter(|c| athlete.matches(&c.record.gymnast)) {
            if !out.contains(&c.record.meet) {
                out.push(c.record.meet.clone());
            }
        }
        out
    }

    pub fn context_for(&self, athlete: &TrackedAthlete, meet: &str) -> Vec<&ContextRow> {
        self.context
            .iter()
            .filter(|c| c.record.meet == meet && athlete.matches(&c.record.gymnast))
            .collect()
    }

    pub fn mood(&self, athlete: &TrackedAthlete, meet: &str) -> Option<(JudgeMood, f64)> {
        let jsis: Vec<f64> = self.context_for(athlete, meet).iter().map(|c| c.record.jsi).collect();
        crate::analytics::stats::mean(&jsis).map(|m| (JudgeMood::from_jsi(m), m))
    }

    /// Level the athlete competed at in a meet, from the history.
    pub fn level_at(&self, athlete: &TrackedAthlete, meet: &str) -> Option<String> {
        self.rows_for(athlete)
            .into_iter()
            .rev()
            .find(|r| r.meet == meet && !r.level.is_empty())
            .map(|r| r.level.clone())
    }

    pub fn metrics(&self, athlete: &TrackedAthlete) -> Vec<Metric> {
        let rows = self.rows_for(athlete);
        athlete
            .discipline
            .events()
            .iter()
            .map(|&ev| {
                let scored: Vec<f64> = rows
                    .iter()
                    .map(|r| r.event(ev))
                    .filter(|e| e.competed())
                    .map(|e| e.score)
                    .collect();
                let latest = scored.last().copied();
                let delta = match scored.len() {
                    n if n >= 2 => Some(scored[n - 1] - scored[n - 2]),
                    _ => None,
                };
                Metric { event: ev, latest, delta }
            })
            .collect()
    }

    /// (meet, AA) points for the line chart, in date order.
    pub fn aa_series(&self, athlete: &TrackedAthlete) -> Vec<(String, f64)> {
        self.rows_for(athlete)
            .into_iter()
            .filter(|r| r.event(Event::AA).competed())
            .map(|r| (r.meet.clone(), r.score(Event::AA)))
            .collect()
    }

    pub fn team_line(&self, athlete: &TrackedAthlete) -> TeamLine {
        let series = self.aa_series(athlete);
        let rows = self.rows_for(athlete);
        let mut meets: Vec<&str> = rows.iter().map(|r| r.meet.as_str()).collect();
        meets.sort_unstable();
        meets.dedup();
        TeamLine {
            athlete: athlete.full_name.clone(),
            meets: meets.len(),
            latest_aa: series.last().map(|(_, v)| *v),
            best_aa: series.iter().map(|(_, v)| *v).reduce(f64::max),
        }
    }
}
