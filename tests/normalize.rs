// tests/normalize.rs
use std::fs;
use std::path::PathBuf;

use allaround::config::options::NormalizeOptions;
use allaround::csv::read_table;
use allaround::model::Event;
use allaround::progress::NullProgress;
use allaround::runner;
use allaround::schema::canonical_headers;
use allaround::store::{CsvRepository, ScoreRepository};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("allaround_normalize_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const RAW: &str = "\
Athlete,Meet Name,Sess,Lvl,Vault,Uneven Bars,Beam,Floor,All Around,Coach
Meet Scores Online,,,,,,,,,
Annabelle Sheehy,2026 Rose Gold Classic,2,3,9.100 4,8.900,DNS,9.300 1T,36.550 3,Pat
Azalea Sheehy,2026 Rose Gold Classic,2,4,9.000,8.700 6,9.050,9.150,35.900,Pat
,2026 Rose Gold Classic,2,3,9.0,9.0,9.0,9.0,36.0,
";

#[test]
fn site_headers_land_in_canonical_columns() {
    let dir = tmp_dir("canonical");
    let input = dir.join("raw.csv");
    fs::write(&input, RAW).unwrap();
    let opts = NormalizeOptions { input, into: dir.join("cleaned.csv") };

    let (merge, report) = runner::normalize(&opts, &mut NullProgress).unwrap();
    assert_eq!(report.rows_in, 4);
    assert_eq!(report.rows_out, 2);
    assert_eq!(report.dropped_rows, 2);
    assert_eq!(report.defaulted_cells, 1);
    assert_eq!(report.dropped_columns, ["Coach"]);
    assert_eq!(merge.kept, 2);

    let cleaned = read_table(&opts.into).unwrap();
    assert_eq!(cleaned.headers, canonical_headers());

    let rows = CsvRepository::new(&opts.into).load().unwrap();
    let a = &rows[0];
    assert_eq!((a.gymnast.as_str(), a.session.as_str(), a.level.as_str()), ("Annabelle Sheehy", "2", "3"));
    assert_eq!(a.score(Event::VT), 9.1);
    assert_eq!(a.event(Event::VT).rank, "4");
    assert_eq!(a.event(Event::FX).rank, "1T");
    assert!(!a.event(Event::BB).competed());
    assert_eq!(a.score(Event::AA), 36.55);
}

#[test]
fn normalizing_cleaned_output_is_a_fixed_point() {
    let dir = tmp_dir("fixed_point");
    let input = dir.join("raw.csv");
    fs::write(&input, RAW).unwrap();
    let first = NormalizeOptions { input, into: dir.join("cleaned.csv") };
    runner::normalize(&first, &mut NullProgress).unwrap();

    let again = NormalizeOptions { input: first.into.clone(), into: dir.join("cleaned_again.csv") };
    runner::normalize(&again, &mut NullProgress).unwrap();

    assert_eq!(fs::read(&first.into).unwrap(), fs::read(&again.into).unwrap());
}

#[test]
fn rescored_meet_is_kept_alongside_the_original() {
    let dir = tmp_dir("rescored");
    let input = dir.join("raw.csv");
    fs::write(&input, RAW).unwrap();
    let opts = NormalizeOptions { input: input.clone(), into: dir.join("cleaned.csv") };
    runner::normalize(&opts, &mut NullProgress).unwrap();

    // Same file again: every row is a duplicate.
    let (merge, _) = runner::normalize(&opts, &mut NullProgress).unwrap();
    assert_eq!((merge.existing, merge.incoming, merge.kept, merge.duplicates_removed), (2, 2, 2, 2));

    // A corrected all-around is a different key.
    fs::write(&input, RAW.replace("36.550 3", "36.650 3")).unwrap();
    let (merge, _) = runner::normalize(&opts, &mut NullProgress).unwrap();
    assert_eq!(merge.kept, 3);
}

#[test]
fn missing_input_is_an_error() {
    let dir = tmp_dir("missing");
    let opts = NormalizeOptions { input: dir.join("nope.csv"), into: dir.join("cleaned.csv") };
    assert!(runner::normalize(&opts, &mut NullProgress).is_err());
    assert!(!opts.into.exists());
}
