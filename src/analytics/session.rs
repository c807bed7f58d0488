// src/analytics/session.rs
//! Field statistics per (meet, session, level, event), season baselines per
//! (level, event), and each tracked athlete's context against the field.

use std::collections::BTreeMap;

use super::stats::{mean, median, percentile_below, sorted};
use crate::config::options::TrackedAthlete;
use crate::model::{Event, MeetScoreRow};
use crate::score::fmt_score;
use crate::store::DataSet;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey {
    pub meet: String,
    pub session: String,
    pub level: String,
}

impl SessionKey {
    pub fn of(row: &MeetScoreRow) -> Self {
        Self {
            meet: s!(row.meet.trim()),
            session: s!(row.session.trim()),
            level: s!(row.level.trim()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionStat {
    pub median: f64,
    pub max: f64,
    pub count: usize,
}

struct SessionField {
    scores: Vec<f64>,
    stat: SessionStat,
}

/// Valid (non-zero) scores of the whole field, grouped by session and event.
pub struct FieldStats {
    fields: BTreeMap<(SessionKey, Event), SessionField>,
}

impl FieldStats {
    pub fn from_rows(rows: &[MeetScoreRow]) -> Self {
        let mut raw: BTreeMap<(SessionKey, Event), Vec<f64>> = BTreeMap::new();
        for row in rows {
            let key = SessionKey::of(row);
            for ev in Event::ALL {
                let e = row.event(ev);
                if e.competed() {
                    raw.entry((key.clone(), ev)).or_default().push(e.score);
                }
            }
        }

        let fields = raw
            .into_iter()
            .filter_map(|(k, v)| {
                let scores = sorted(v);
                let median = median(&scores)?;
                let max = *scores.last()?;
                let stat = SessionStat { median, max, count: scores.len() };
                Some((k, SessionField { scores, stat }))
            })
            .collect();
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn stat(&self, key: &SessionKey, ev: Event) -> Option<&SessionStat> {
        self.fields.get(&(key.clone(), ev)).map(|f| &f.stat)
    }

    pub fn percentile(&self, key: &SessionKey, ev: Event, score: f64) -> Option<f64> {
        self.fields
            .get(&(key.clone(), ev))
            .map(|f| percentile_below(&f.scores, score))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SessionKey, Event, &SessionStat)> {
        self.fields.iter().map(|((k, ev), f)| (k, *ev, &f.stat))
    }
}

/// Mean of session medians per (level, event).
pub struct SeasonBaselines {
    by_level: BTreeMap<(String, Event), f64>,
}

impl SeasonBaselines {
    pub fn from_stats(stats: &FieldStats) -> Self {
        let mut medians: BTreeMap<(String, Event), Vec<f64>> = BTreeMap::new();
        for (key, ev, stat) in stats.iter() {
            medians.entry((key.level.clone(), ev)).or_default().push(stat.median);
        }
        let by_level = medians
            .into_iter()
            .filter_map(|(k, v)| mean(&v).map(|m| (k, m)))
            .collect();
        Self { by_level }
    }

    pub fn get(&self, level: &str, ev: Event) -> Option<f64> {
        self.by_level.get(&(s!(level.trim()), ev)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_level.is_empty()
    }
}

/// Session median minus season baseline; 0 without a baseline.
pub fn judge_strictness(median: f64, baseline: Option<f64>) -> f64 {
    match baseline {
        Some(b) if b != 0.0 => median - b,
        _ => 0.0,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContextRecord {
    pub meet: String,
    pub gymnast: String,
    pub event: Event,
    pub score: f64,
    pub median: f64,
    pub max: f64,
    pub count: usize,
    pub percentile: f64,
    pub jsi: f64,
}

/// Context for every competed event of every tracked athlete's row.
/// Athletes are walked in roster order, rows in input order, events in canonical
/// order. An empty roster means every athlete, under their own name.
/// Returns the records and how many competed events had no session statistic.
pub fn context_records(
    rows: &[MeetScoreRow],
    stats: &FieldStats,
    baselines: &SeasonBaselines,
    athletes: &[TrackedAthlete],
) -> (Vec<ContextRecord>, usize) {
    let mut out = Vec::new();
    let mut skipped = 0;

    let mut emit = |row: &MeetScoreRow, name: &str| {
        let key = SessionKey::of(row);
        for ev in Event::ALL {
            let e = row.event(ev);
            if !e.competed() {
                continue;
            }
            let (Some(stat), Some(percentile)) = (stats.stat(&key, ev), stats.percentile(&key, ev, e.score)) else {
                skipped += 1;
                continue;
            };
            out.push(ContextRecord {
                meet: key.meet.clone(),
                gymnast: s!(name),
                event: ev,
                score: e.score,
                median: stat.median,
                max: stat.max,
                count: stat.count,
                percentile,
                jsi: judge_strictness(stat.median, baselines.get(&key.level, ev)),
            });
        }
    };

    if athletes.is_empty() {
        for row in rows {
            emit(row, &row.gymnast);
        }
    } else {
        for athlete in athletes {
            for row in rows.iter().filter(|r| athlete.matches(&r.gymnast)) {
                emit(row, &athlete.full_name);
            }
        }
    }
    (out, skipped)
}

pub const CONTEXT_HEADERS: [&str; 9] = [
    "Meet", "Gymnast", "Event", "Score", "Median", "Max", "Count", "Percentile", "JSI",
];

pub fn context_table(records: &[ContextRecord]) -> DataSet {
    DataSet {
        headers: CONTEXT_HEADERS.iter().map(|h| s!(*h)).collect(),
        rows: records
            .iter()
            .map(|r| {
                vec![
                    r.meet.clone(),
                    r.gymnast.clone(),
                    s!(r.event.code()),
                    fmt_score(r.score),
                    fmt_score(r.median),
                    fmt_score(r.max),
                    r.count.to_string(),
                    fmt_score(r.percentile),
                    fmt_score(r.jsi),
                ]
            })
            .collect(),
    }
}
