// tests/pipeline.rs
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use allaround::config::options::{AppOptions, athletes_named};
use allaround::core::Fetch;
use allaround::csv::read_table;
use allaround::data::Dashboard;
use allaround::model::Event;
use allaround::progress::NullProgress;
use allaround::runner;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("allaround_pipeline_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const ANSEL_RESULT: &str = r#"<html><head>
<title>Ansel Sheehy - 2026 Mas Watanabe, CA 02/13/2026 - MeetScoresOnline.com</title>
</head><body>
<ul>
  <li><span class="title">Level: </span>4D1</li>
  <li><span class="title">Session: </span>4</li>
  <li class="text-center">Meet Ranking <span class="bold">36<sup>th</sup></span> <i>Out of 152 Level 4D1s</i></li>
</ul>
<table class="table table-condensed">
  <tr><th>Floor</th><td><span class="score">8.700</span> <span class="place">12</span></td></tr>
  <tr><th>Vault</th><td><span class="score">9.300</span> <span class="place">1T</span></td></tr>
  <tr><th>AA</th><td><span class="score">50.150</span> <span class="place">36</span></td></tr>
</table>
</body></html>"#;

const MAS_WATANABE_SESSION: &str = "<table>\
    <tr><th>Gymnast</th><th>Floor</th><th>Pommel</th><th>Rings</th><th>Vault</th><th>PBars</th><th>HiBar</th><th>AA</th></tr>\
    <tr><td>Ansel Sheehy</td><td>8.700 12</td><td>7.9</td><td>8.1</td><td>9.300 1T</td><td>8.55</td><td>7.6</td><td>50.150</td></tr>\
    <tr><td>Kid One</td><td>8.9</td><td>8.0</td><td>8.2</td><td>9.000</td><td>8.6</td><td>7.8</td><td>50.500</td></tr>\
    <tr><td>Kid Two</td><td>8.1</td><td>7.2</td><td>7.9</td><td>8.800</td><td>8.0</td><td>7.1</td><td>47.100</td></tr>\
    <tr><td>LIVE RESULTS</td><td></td><td></td><td></td><td></td><td></td><td></td><td></td></tr>\
    </table>";

fn offline_opts(root: &Path) -> AppOptions {
    let mut opts = AppOptions::default().rooted_at(root);
    opts.harvest.network = false;
    opts.harvest.athletes = athletes_named(&["Ansel".to_string()]);
    opts.analytics.athletes = opts.harvest.athletes.clone();
    opts
}

#[test]
fn saved_pages_flow_through_to_context() {
    let root = tmp_dir("saved");
    let pages = root.join("saved_pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("ansel_mas_watanabe.html"), ANSEL_RESULT).unwrap();
    fs::write(pages.join("2026_mas_watanabe_session.html"), MAS_WATANABE_SESSION).unwrap();

    let opts = offline_opts(&root);
    let summary = runner::run_all_with(&opts, None, &mut NullProgress).unwrap();
    assert_eq!(summary.merge.kept, 1);
    // The banner row is harvested as-is and dropped by the normalizer.
    assert_eq!(summary.harvest.sessions.rows.len(), 4);
    assert!(summary.harvest.report.failed.is_empty(), "{:?}", summary.harvest.report.failed);

    let dash = Dashboard::load(&opts.dashboard);
    assert!(dash.messages.is_empty(), "{:?}", dash.messages);
    let ansel = &opts.analytics.athletes[0];
    assert_eq!(dash.meets_for(ansel), ["2026 Mas Watanabe"]);

    let vt = dash
        .context_for(ansel, "2026 Mas Watanabe")
        .into_iter()
        .find(|c| c.record.event == Event::VT)
        .expect("vault context");
    assert_eq!(vt.record.gymnast, "Ansel Sheehy");
    assert_eq!(vt.record.count, 3);
    assert_eq!(vt.record.median, 9.0);
    assert!((vt.record.percentile - 200.0 / 3.0).abs() < 1e-9);
    // Only one session at this level, so its median is the baseline.
    assert_eq!(vt.record.jsi, 0.0);
    assert_eq!(dash.level_at(ansel, "2026 Mas Watanabe").as_deref(), Some("4D1"));
}

#[test]
fn second_run_changes_nothing() {
    let root = tmp_dir("rerun");
    let pages = root.join("saved_pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("ansel_mas_watanabe.html"), ANSEL_RESULT).unwrap();

    let opts = offline_opts(&root);
    runner::run_all_with(&opts, None, &mut NullProgress).unwrap();
    let first = fs::read(&opts.normalize.into).unwrap();

    let summary = runner::run_all_with(&opts, None, &mut NullProgress).unwrap();
    assert_eq!(summary.merge.duplicates_removed, 1);
    assert_eq!(summary.merge.kept, 1);
    assert_eq!(fs::read(&opts.normalize.into).unwrap(), first);
}

/// Serves canned pages by URL.
struct Canned(HashMap<String, String>);

impl Fetch for Canned {
    fn get(&mut self, url: &str) -> Result<String, Box<dyn Error>> {
        self.0.get(url).cloned().ok_or_else(|| format!("404 {url}").into())
    }
}

#[test]
fn network_harvest_with_canned_pages() {
    let root = tmp_dir("network");
    let mut opts = AppOptions::default().rooted_at(&root);
    opts.harvest.athletes = athletes_named(&["Azalea".to_string()]);
    opts.analytics.athletes = opts.harvest.athletes.clone();

    let profile = r#"<a href="/results/35001/1194621">Rose Gold</a><a href="/results/35002/1194621">Missing</a>"#;
    let result = r#"<title>Azalea Sheehy - 2026 Rose Gold Classic, CA 01/17/2026 - MeetScoresOnline.com</title>
        <li>Level: 3</li><li>Session: 2</li>
        <table class="table table-condensed">
          <tr><th>Vault</th><td><span class="score">9.100</span> <span class="place">4</span></td></tr>
          <tr><th>Bars</th><td><span class="score">8.900</span></td></tr>
          <tr><th>AA</th><td><span class="score">36.500</span></td></tr>
        </table>"#;
    let session = "<table><tr><th>Gymnast</th><th>Vault</th><th>Bars</th><th>Beam</th><th>Floor</th><th>AA</th></tr>\
        <tr><td>Azalea Sheehy</td><td>9.1</td><td>8.9</td><td>9.0</td><td>9.2</td><td>36.2</td></tr>\
        <tr><td>Other Kid</td><td>8.7</td><td>8.4</td><td>8.8</td><td>8.9</td><td>34.8</td></tr></table>";

    let mut fetcher = Canned(HashMap::from([
        (
            "https://www.meetscoresonline.com/Athlete.MyScores/1194621".to_string(),
            profile.to_string(),
        ),
        (
            "https://www.meetscoresonline.com/results/35001/1194621".to_string(),
            result.to_string(),
        ),
        (
            "https://www.mymeetscores.com/meet.pl?meetid=93352&session=2".to_string(),
            session.to_string(),
        ),
    ]));

    let summary = runner::run_all_with(&opts, Some(&mut fetcher as &mut dyn Fetch), &mut NullProgress).unwrap();
    // One result page 404s; the rest of the batch carries on.
    assert_eq!(summary.harvest.report.failed.len(), 1);
    assert_eq!(summary.merge.kept, 1);
    assert_eq!(summary.harvest.sessions.rows.len(), 2);

    let analytics = read_table(&opts.analytics.out).unwrap();
    let ev = analytics.column("Event").unwrap();
    let pct = analytics.column("Percentile").unwrap();
    let vt = analytics.rows.iter().find(|r| r[ev] == "VT").unwrap();
    assert_eq!(vt[pct].parse::<f64>().unwrap(), 50.0);
}
