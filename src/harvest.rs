// src/harvest.rs
//! Collect raw score rows from the scoring sites and from a folder of saved pages.
//! Every unit (profile, result page, session page, file) stands alone: a failure
//! is logged, reported and left out, and the batch carries on.

use std::path::{Path, PathBuf};

use crate::config::consts::{MSO_HOST, SESSION_PAGE_SUFFIX};
use crate::config::options::{HarvestOptions, TrackedAthlete, mms_meet_id};
use crate::core::net::Fetch;
use crate::core::sanitize::title_from_stem;
use crate::csv::write_table;
use crate::file::{file_name, list_html_files, read_page};
use crate::model::{Discipline, Event, MeetScoreRow};
use crate::progress::{BatchReport, Progress};
use crate::schema::normalize_table;
use crate::specs::mms_session;
use crate::specs::mso_profile::result_links;
use crate::specs::mso_results::{MeetResult, parse_result_page};
use crate::specs::session::{SessionEntry, discipline_from_labels, parse_session_page};
use crate::store::{CsvRepository, DataSet, ScoreRepository, merge_rows};

/// Site-style event headers of the raw files; the normalizer maps them.
const RAW_EVENT_HEADERS: [&str; 9] = ["Vault", "Bars", "Beam", "Floor", "Pommel", "Rings", "PBars", "HiBar", "AA"];

pub fn history_headers() -> Vec<String> {
    let mut h = strings!["Date", "Gymnast", "Meet", "Session", "Level", "Division", "Meet Ranking", "Out Of"];
    h.extend(RAW_EVENT_HEADERS.iter().map(|s| s!(*s)));
    h
}

pub fn session_headers() -> Vec<String> {
    let mut h = strings!["Date", "Gymnast", "Meet", "Session", "Level", "Division", "Discipline"];
    h.extend(RAW_EVENT_HEADERS.iter().map(|s| s!(*s)));
    h
}

fn history_row(r: &MeetResult) -> Vec<String> {
    let mut row = vec![
        r.date.clone(),
        r.gymnast.clone(),
        r.meet.clone(),
        r.session.clone(),
        r.level.clone(),
        r.division.clone(),
        r.meet_rank.clone(),
        r.meet_total.clone(),
    ];
    row.extend(Event::ALL.iter().map(|&ev| {
        r.tokens
            .iter()
            .find(|(e, _)| *e == ev)
            .map(|(_, t)| t.clone())
            .unwrap_or_default()
    }));
    row
}

/// One session's entries plus the context they were found under.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionBatch {
    pub date: String,
    pub meet: String,
    pub session: String,
    pub level: String,
    pub discipline: Option<Discipline>,
    pub entries: Vec<SessionEntry>,
}

impl SessionBatch {
    pub fn rows(&self) -> Vec<Vec<String>> {
        let discipline = self.discipline.map(|d| s!(d.label())).unwrap_or_default();
        self.entries
            .iter()
            .map(|e| {
                let mut row = vec![
                    self.date.clone(),
                    e.athlete.clone(),
                    self.meet.clone(),
                    self.session.clone(),
                    self.level.clone(),
                    e.division.clone(),
                    discipline.clone(),
                ];
                row.extend(Event::ALL.iter().map(|&ev| {
                    e.tokens
                        .iter()
                        .find(|(x, _)| *x == ev)
                        .map(|(_, t)| t.clone())
                        .unwrap_or_default()
                }));
                row
            })
            .collect()
    }
}

fn result_unit(r: &MeetResult, unit: &str, report: &mut BatchReport, progress: &mut dyn Progress) {
    if r.missing.is_empty() {
        report.ok(unit, progress);
    } else {
        logd!("{unit}: missing {}", r.missing.join(", "));
        report.defaulted(unit, progress);
    }
}

/* ---------------- Network: athlete profiles ---------------- */

/// Walk each athlete's profile and every result page it links to.
pub fn collect_profiles(
    fetcher: &mut dyn Fetch,
    athletes: &[TrackedAthlete],
    progress: &mut dyn Progress,
    report: &mut BatchReport,
) -> DataSet {
    let mut out = DataSet::new(history_headers());

    for athlete in athletes {
        let Some(url) = athlete.profile_url() else {
            logd!("{}: no profile id, skipping", athlete.nick);
            continue;
        };
        progress.log(&format!("Profile: {}", athlete.full_name));
        let links = match fetcher.get(&url) {
            Ok(doc) => result_links(&doc, &athlete.mso_id),
            Err(e) => {
                report.fail(&athlete.full_name, &e.to_string(), progress);
                continue;
            }
        };
        if links.is_empty() {
            report.fail(&athlete.full_name, "profile lists no result pages", progress);
            continue;
        }
        report.ok(&athlete.full_name, progress);
        progress.begin(links.len());

        for link in links {
            match fetcher.get(&link).and_then(|doc| parse_result_page(&doc)) {
                Ok(r) => {
                    result_unit(&r, &link, report, progress);
                    out.rows.push(history_row(&r));
                }
                Err(e) => report.fail(&link, &e.to_string(), progress),
            }
        }
    }
    out
}

/* ---------------- Saved pages folder ---------------- */

pub fn is_session_page(path: &Path) -> bool {
    file_name(path).to_lowercase().ends_with(SESSION_PAGE_SUFFIX)
}

/// Meet name from a saved session file: "2026_rose_gold_classic_session.html" → "2026 Rose Gold Classic".
pub fn meet_from_session_file(path: &Path) -> String {
    let name = file_name(path);
    let stem = &name[..name.len().saturating_sub(SESSION_PAGE_SUFFIX.len())];
    title_from_stem(stem)
}

/// Discipline of a saved session page: its own column labels, else the tracked
/// athlete it mentions.
fn saved_page_discipline(doc: &str, athletes: &[TrackedAthlete]) -> Option<Discipline> {
    discipline_from_labels(doc).or_else(|| {
        let lc = doc.to_lowercase();
        athletes
            .iter()
            .find(|a| lc.contains(&a.full_name.to_lowercase()))
            .map(|a| a.discipline)
    })
}

#[derive(Debug, Default)]
pub struct SavedPages {
    pub history: DataSet,
    pub sessions: Vec<SessionBatch>,
}

pub fn collect_saved_pages(
    dir: &Path,
    athletes: &[TrackedAthlete],
    progress: &mut dyn Progress,
    report: &mut BatchReport,
) -> SavedPages {
    let mut out = SavedPages {
        history: DataSet::new(history_headers()),
        sessions: Vec::new(),
    };
    let files = match list_html_files(dir) {
        Ok(f) => f,
        Err(e) => {
            report.fail(&dir.display().to_string(), &e.to_string(), progress);
            return out;
        }
    };
    progress.begin(files.len());

    for path in files {
        let unit = file_name(&path);
        let doc = match read_page(&path) {
            Ok(d) => d,
            Err(e) => {
                report.fail(&unit, &e.to_string(), progress);
                continue;
            }
        };

        if is_session_page(&path) {
            let discipline = saved_page_discipline(&doc, athletes);
            match parse_session_page(&doc, discipline) {
                Ok(entries) => {
                    report.ok(&unit, progress);
                    out.sessions.push(SessionBatch {
                        meet: meet_from_session_file(&path),
                        discipline,
                        entries,
                        ..SessionBatch::default()
                    });
                }
                Err(e) => report.fail(&unit, &e.to_string(), progress),
            }
        } else {
            match parse_result_page(&doc) {
                Ok(r) => {
                    result_unit(&r, &unit, report, progress);
                    out.history.rows.push(history_row(&r));
                }
                Err(e) => report.fail(&unit, &e.to_string(), progress),
            }
        }
    }
    out
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

fn meets_match(a: &str, b: &str) -> bool {
    let (a, b) = (squash(a), squash(b));
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

/// Give a saved session its date, session and level from the history row of a
/// tracked athlete who appears in it. Returns false when nothing matched.
pub fn fill_session_context(batch: &mut SessionBatch, history: &[MeetScoreRow]) -> bool {
    let in_batch = |name: &str| {
        let n = name.to_lowercase();
        batch.entries.iter().any(|e| {
            let a = e.athlete.to_lowercase();
            a.contains(&n) || n.contains(&a)
        })
    };
    let hit = history
        .iter()
        .filter(|r| meets_match(&r.meet, &batch.meet))
        .find(|r| in_batch(&r.gymnast))
        .or_else(|| history.iter().find(|r| meets_match(&r.meet, &batch.meet)));
    let Some(row) = hit else { return false };

    batch.meet = row.meet.clone();
    batch.date = row.date.clone();
    batch.session = row.session.clone();
    batch.level = row.level.clone();
    if batch.discipline.is_none() {
        batch.discipline = row.discipline();
    }
    true
}

/* ---------------- Network: MyMeetScores sessions ---------------- */

/// One fetch per distinct (meet, session) in the season that MyMeetScores covers.
pub fn collect_mms_sessions(
    fetcher: &mut dyn Fetch,
    history: &[MeetScoreRow],
    season: &str,
    progress: &mut dyn Progress,
    report: &mut BatchReport,
) -> Vec<SessionBatch> {
    let mut seen: Vec<(String, String)> = Vec::new();
    let mut out = Vec::new();

    for row in history.iter().filter(|r| r.date.starts_with(season)) {
        let Some(meet_id) = mms_meet_id(&row.meet) else { continue };
        let key = (row.meet.clone(), row.session.clone());
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let unit = format!("{} session {}", row.meet, row.session);
        progress.log(&format!("Session: {unit}"));
        let url = mms_session::session_url(meet_id, &row.session);
        match fetcher.get(&url) {
            Ok(doc) => {
                let entries = mms_session::parse_session(&doc);
                if entries.is_empty() {
                    report.fail(&unit, "no score tables on page", progress);
                    continue;
                }
                report.ok(&unit, progress);
                out.push(SessionBatch {
                    date: row.date.clone(),
                    meet: row.meet.clone(),
                    session: row.session.clone(),
                    level: row.level.clone(),
                    discipline: row.discipline(),
                    entries,
                });
            }
            Err(e) => report.fail(&unit, &e.to_string(), progress),
        }
    }
    out
}

/* ---------------- Orchestration ---------------- */

#[derive(Debug, Default)]
pub struct HarvestSummary {
    pub history: DataSet,
    pub sessions: DataSet,
    /// Saved session pages waiting for history context.
    pub saved_sessions: Vec<SessionBatch>,
    pub report: BatchReport,
    pub written: Vec<PathBuf>,
}

/// Athlete result rows from the network (when `opts.network`) and the saved pages
/// folder, written to the raw history file.
pub fn harvest_history(
    opts: &HarvestOptions,
    fetcher: Option<&mut dyn Fetch>,
    progress: &mut dyn Progress,
) -> Result<HarvestSummary, Box<dyn std::error::Error>> {
    let mut summary = HarvestSummary {
        history: DataSet::new(history_headers()),
        sessions: DataSet::new(session_headers()),
        ..HarvestSummary::default()
    };

    if opts.network {
        let f = fetcher.ok_or("network harvest needs a fetcher")?;
        let rows = collect_profiles(f, &opts.athletes, progress, &mut summary.report);
        summary.history.append(rows);
    }

    let saved = collect_saved_pages(&opts.pages_dir, &opts.athletes, progress, &mut summary.report);
    summary.history.append(saved.history);
    summary.saved_sessions = saved.sessions;

    write_table(&opts.raw_out, &summary.history)?;
    summary.written.push(opts.raw_out.clone());
    logf!("Harvested {} history rows from {} and saved pages", summary.history.rows.len(), MSO_HOST);
    Ok(summary)
}

/// Session tables for every known (meet, session), written to the session file.
/// History comes from the canonical file plus this run's fresh rows.
pub fn harvest_sessions(
    opts: &HarvestOptions,
    fetcher: Option<&mut dyn Fetch>,
    summary: &mut HarvestSummary,
    progress: &mut dyn Progress,
) -> Result<(), Box<dyn std::error::Error>> {
    let existing = CsvRepository::new(&opts.history).load()?;
    let (fresh, _) = normalize_table(&summary.history);
    let (history, _) = merge_rows(existing, fresh);

    let mut batches = Vec::new();
    if opts.network {
        if let Some(f) = fetcher {
            batches.extend(collect_mms_sessions(f, &history, &opts.season, progress, &mut summary.report));
        }
    }
    for mut batch in std::mem::take(&mut summary.saved_sessions) {
        if !fill_session_context(&mut batch, &history) {
            summary.report.defaulted(&format!("{} (no matching history)", batch.meet), progress);
        }
        batches.push(batch);
    }

    summary.sessions = DataSet::new(session_headers());
    for batch in &batches {
        summary.sessions.rows.extend(batch.rows());
    }
    write_table(&opts.session_out, &summary.sessions)?;
    summary.written.push(opts.session_out.clone());
    logf!("Harvested {} session rows", summary.sessions.rows.len());
    Ok(())
}

/// Every enabled source in one go. `fetcher` is only used when `opts.network` is set.
pub fn run(
    opts: &HarvestOptions,
    mut fetcher: Option<&mut dyn Fetch>,
    progress: &mut dyn Progress,
) -> Result<HarvestSummary, Box<dyn std::error::Error>> {
    let mut summary = harvest_history(opts, fetcher.as_mut().map(|f| &mut **f as &mut dyn Fetch), progress)?;
    if opts.sessions {
        harvest_sessions(opts, fetcher, &mut summary, progress)?;
    }
    progress.finish();
    Ok(summary)
}
