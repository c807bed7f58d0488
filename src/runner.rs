// src/runner.rs
//! Pipeline stages as the front-ends call them: harvest → normalize → analyze.
//! Stages only talk through the files named in [`AppOptions`].

use std::error::Error;

use crate::analytics::{self, AnalyticsReport};
use crate::config::options::{AnalyticsOptions, AppOptions, HarvestOptions, NormalizeOptions};
use crate::core::net::{Fetch, HttpFetcher};
use crate::csv::read_table;
use crate::harvest::{self, HarvestSummary};
use crate::progress::Progress;
use crate::schema::{NormalizeReport, normalize_table};
use crate::store::{CsvRepository, MergeSummary, ScoreRepository};

/// Harvest with a live HTTP client when `opts.network` is set.
pub fn harvest(opts: &HarvestOptions, progress: &mut dyn Progress) -> Result<HarvestSummary, Box<dyn Error>> {
    if opts.network {
        let mut fetcher = HttpFetcher::new(opts.pause)?;
        harvest_with(opts, Some(&mut fetcher), progress)
    } else {
        harvest_with(opts, None, progress)
    }
}

pub fn harvest_with(
    opts: &HarvestOptions,
    fetcher: Option<&mut dyn Fetch>,
    progress: &mut dyn Progress,
) -> Result<HarvestSummary, Box<dyn Error>> {
    progress.log("Harvesting…");
    let summary = harvest::run(opts, fetcher, progress)?;
    progress.log(&format!(
        "Harvest: {} history rows, {} session rows ({})",
        summary.history.rows.len(),
        summary.sessions.rows.len(),
        summary.report.summary()
    ));
    Ok(summary)
}

/// Normalize a raw file and merge it into the canonical history.
pub fn normalize(opts: &NormalizeOptions, progress: &mut dyn Progress) -> Result<(MergeSummary, NormalizeReport), Box<dyn Error>> {
    if !opts.input.exists() {
        return Err(format!("{} not found; nothing to normalize", opts.input.display()).into());
    }
    let raw = read_table(&opts.input)?;
    let (rows, report) = normalize_table(&raw);
    if !report.dropped_columns.is_empty() {
        logd!("normalize: ignored columns {:?}", report.dropped_columns);
    }

    let mut repo = CsvRepository::new(&opts.into);
    let merge = repo.merge(rows)?;
    logf!(
        "Normalized {} → {} rows; {} kept, {} duplicates removed → {}",
        report.rows_in,
        report.rows_out,
        merge.kept,
        merge.duplicates_removed,
        repo.path().display()
    );
    progress.log(&format!(
        "Normalize: {} rows kept, {} duplicates removed",
        merge.kept, merge.duplicates_removed
    ));
    Ok((merge, report))
}

pub fn analyze(opts: &AnalyticsOptions, progress: &mut dyn Progress) -> Result<AnalyticsReport, Box<dyn Error>> {
    let report = analytics::run(opts)?;
    progress.log(&format!(
        "Analytics: {} records from {} session stats",
        report.records, report.sessions
    ));
    Ok(report)
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub harvest: HarvestSummary,
    pub merge: MergeSummary,
    pub analytics: AnalyticsReport,
}

/// All stages in order. Sessions are gathered after the history is normalized,
/// so meets found in this run get their sessions looked up too.
pub fn run_all(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunSummary, Box<dyn Error>> {
    let mut http = if opts.harvest.network { Some(HttpFetcher::new(opts.harvest.pause)?) } else { None };
    run_all_with(opts, http.as_mut().map(|f| f as &mut dyn Fetch), progress)
}

pub fn run_all_with(
    opts: &AppOptions,
    mut fetcher: Option<&mut dyn Fetch>,
    progress: &mut dyn Progress,
) -> Result<RunSummary, Box<dyn Error>> {
    let history_fetch = fetcher.as_mut().map(|f| &mut **f as &mut dyn Fetch);
    let mut summary = RunSummary {
        harvest: harvest::harvest_history(&opts.harvest, history_fetch, progress)?,
        ..RunSummary::default()
    };

    let norm = NormalizeOptions {
        input: opts.harvest.raw_out.clone(),
        into: opts.normalize.into.clone(),
    };
    summary.merge = normalize(&norm, progress)?.0;

    if opts.harvest.sessions {
        let mut sessions = opts.harvest.clone();
        sessions.history = norm.into;
        harvest::harvest_sessions(&sessions, fetcher, &mut summary.harvest, progress)?;
    }

    summary.analytics = analyze(&opts.analytics, progress)?;
    progress.finish();
    Ok(summary)
}
