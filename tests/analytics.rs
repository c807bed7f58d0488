// tests/analytics.rs
use std::fs;
use std::path::PathBuf;

use allaround::analytics;
use allaround::config::options::{AnalyticsOptions, DashboardOptions, default_athletes};
use allaround::csv::read_table;
use allaround::data::{Dashboard, JudgeMood};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("allaround_analytics_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

// Two level-3 sessions at different meets; the Rose Gold judges ran tight.
const SESSIONS: &str = "\
Date,Gymnast,Meet,Session,Level,Vault,Bars,Beam,Floor,AA
2026-01-17,Annabelle Sheehy,Rose Gold,2,3,8.800,8.600,8.700,8.900,35.000
2026-01-17,Kid A,Rose Gold,2,3,8.600,8.400,8.500,8.700,34.200
2026-01-17,Kid B,Rose Gold,2,3,8.400,8.200,8.300,8.500,33.400
2026-02-07,Annabelle Sheehy,Golden State,5,3,9.300,9.100,9.200,9.400,37.000
2026-02-07,Kid C,Golden State,5,3,9.100,8.900,9.000,9.200,36.200
2026-02-07,Kid D,Golden State,5,3,8.900,8.700,8.800,9.000,35.400
2025-11-01,Annabelle Sheehy,Old Meet,1,3,7.000,7.000,7.000,7.000,28.000
";

#[test]
fn judges_mood_follows_session_medians() {
    let dir = tmp_dir("mood");
    let input = dir.join("session_raw_data.csv");
    fs::write(&input, SESSIONS).unwrap();
    let opts = AnalyticsOptions {
        input,
        out: dir.join("session_context_analytics.csv"),
        ..AnalyticsOptions::default()
    };

    let report = analytics::run(&opts).unwrap();
    assert_eq!(report.rows_read, 7);
    assert_eq!(report.rows_used, 6);
    assert_eq!(report.records, 10);

    let out = read_table(&opts.out).unwrap();
    assert_eq!(out.headers, analytics::CONTEXT_HEADERS);

    let dash = Dashboard::load(&DashboardOptions { cleaned: dir.join("none.csv"), analytics: opts.out.clone() });
    assert_eq!(dash.messages.len(), 1);
    let annabelle = &default_athletes()[0];
    assert_eq!(dash.meets_for(annabelle), ["Rose Gold", "Golden State"]);

    // Baseline VT median is (8.6 + 9.1) / 2 = 8.85.
    let (mood, jsi) = dash.mood(annabelle, "Rose Gold").unwrap();
    assert_eq!(mood, JudgeMood::Stricter);
    assert!(jsi < -0.15);
    let (mood, _) = dash.mood(annabelle, "Golden State").unwrap();
    assert_eq!(mood, JudgeMood::Looser);

    // Top of each session: beats both others.
    assert!(dash.context_for(annabelle, "Golden State").iter().all(|c| (c.record.percentile - 200.0 / 3.0).abs() < 1e-9));
}

#[test]
fn missing_session_file_is_an_error() {
    let dir = tmp_dir("missing");
    let opts = AnalyticsOptions {
        input: dir.join("nope.csv"),
        out: dir.join("out.csv"),
        ..AnalyticsOptions::default()
    };
    assert!(analytics::run(&opts).is_err());
}
