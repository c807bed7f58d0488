// src/analytics/mod.rs
//! Session context analytics: how each tracked athlete's scores sit against the
//! rest of their session, and how generous that session's judges were.

pub mod session;
pub mod stats;

use crate::config::options::{AnalyticsOptions, TrackedAthlete};
use crate::csv::{read_table, write_table};
use crate::model::{Event, MeetScoreRow};
use crate::schema::{Field, HeaderMap, NormalizeReport, normalize_row, normalize_table};
use crate::score::parse_score_rank;
use crate::store::DataSet;

pub use session::{
    CONTEXT_HEADERS, ContextRecord, FieldStats, SeasonBaselines, SessionKey, SessionStat, context_records,
    context_table, judge_strictness,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub sessions: usize,
    pub baselines: usize,
    pub records: usize,
    /// Competed events without a session statistic.
    pub skipped: usize,
    pub normalize: NormalizeReport,
}

/// Long-format input (`Event` + `Score` columns) becomes one single-event row per line.
fn rows_from_long(data: &DataSet, report: &mut NormalizeReport) -> Vec<MeetScoreRow> {
    let ev_col = data.column("Event");
    let score_col = data.column("Score");
    let (Some(ev_col), Some(score_col)) = (ev_col, score_col) else {
        return Vec::new();
    };

    // Everything except the event/score pair goes through the normal header map.
    let mut headers = data.headers.clone();
    headers[ev_col] = s!();
    headers[score_col] = s!();
    let map = HeaderMap::resolve(&headers);

    let mut out = Vec::new();
    report.rows_in = data.rows.len();
    for row in &data.rows {
        let Some(mut base) = normalize_row(&map, row, report) else { continue };
        let ev_text = row.get(ev_col).map(|s| s.as_str()).unwrap_or("");
        let ev = Event::from_code(ev_text).or_else(|| match crate::schema::resolve_header(ev_text) {
            Some(Field::Score(ev)) => Some(ev),
            _ => None,
        });
        let Some(ev) = ev else {
            report.dropped_rows += 1;
            continue;
        };
        let (score, rank) = parse_score_rank(row.get(score_col).map(|s| s.as_str()));
        base.events = Default::default();
        base.set(ev, score, &rank);
        out.push(base);
    }
    report.rows_out = out.len();
    out
}

/// Read analytics input in either wide (one column per event) or long shape.
pub fn load_input(data: &DataSet) -> (Vec<MeetScoreRow>, NormalizeReport) {
    let long = data.column("Event").is_some() && data.column("Score").is_some();
    if long {
        let mut report = NormalizeReport::default();
        let rows = rows_from_long(data, &mut report);
        (rows, report)
    } else {
        normalize_table(data)
    }
}

pub fn in_season(row: &MeetScoreRow, season: Option<&str>) -> bool {
    match season {
        Some(s) if !s.is_empty() => row.date.contains(s),
        _ => true,
    }
}

/// Whole computation on rows already in memory.
pub fn compute(
    rows: &[MeetScoreRow],
    season: Option<&str>,
    athletes: &[TrackedAthlete],
) -> (Vec<ContextRecord>, AnalyticsReport) {
    let used: Vec<MeetScoreRow> = rows.iter().filter(|r| in_season(r, season)).cloned().collect();
    let stats = FieldStats::from_rows(&used);
    let baselines = SeasonBaselines::from_stats(&stats);
    let (records, skipped) = context_records(&used, &stats, &baselines, athletes);

    let report = AnalyticsReport {
        rows_read: rows.len(),
        rows_used: used.len(),
        sessions: stats.len(),
        baselines: baselines.len(),
        records: records.len(),
        skipped,
        normalize: NormalizeReport::default(),
    };
    (records, report)
}

/// Read the session file, compute context, write the analytics file.
pub fn run(opts: &AnalyticsOptions) -> Result<AnalyticsReport, Box<dyn std::error::Error>> {
    if !opts.input.exists() {
        return Err(format!("{} not found; harvest sessions first", opts.input.display()).into());
    }
    let data = read_table(&opts.input)?;
    let (rows, normalize) = load_input(&data);

    let (records, mut report) = compute(&rows, opts.season.as_deref(), &opts.athletes);
    report.normalize = normalize;

    write_table(&opts.out, &context_table(&records))?;
    logf!(
        "Analytics: {} rows → {} session stats, {} records ({} skipped) → {}",
        report.rows_used,
        report.sessions,
        report.records,
        report.skipped,
        opts.out.display()
    );
    Ok(report)
}
