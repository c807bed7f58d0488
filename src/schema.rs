// src/schema.rs
//! Header resolution and row normalization into the canonical score table.
//!
//! Source tables name their columns however the originating site felt like
//! ("Vault", "PBars", "Meet Ranking", "Total"...). Each table's headers are
//! resolved once into a [`HeaderMap`]; rows are then read by field, never by
//! position.

use std::collections::HashMap;

use crate::config::consts::BANNER_MARKER;
use crate::model::{Discipline, Event, MeetScoreRow, derive_division};
use crate::score::{fmt_score, is_unparseable, parse_place, parse_score_rank};
use crate::store::DataSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Gymnast,
    Meet,
    Session,
    Level,
    Division,
    MeetRank,
    MeetRankTotal,
    Score(Event),
    Rank(Event),
    Discipline,
}

impl Field {
    pub fn header(self) -> &'static str {
        match self {
            Field::Date => "Date",
            Field::Gymnast => "Gymnast",
            Field::Meet => "Meet",
            Field::Session => "Session",
            Field::Level => "Level",
            Field::Division => "Division",
            Field::MeetRank => "Meet_Rank",
            Field::MeetRankTotal => "Meet_Rank_Total",
            Field::Score(e) => e.code(),
            Field::Rank(e) => e.rank_column(),
            Field::Discipline => "Discipline",
        }
    }
}

/// Output column order.
pub fn canonical_fields() -> Vec<Field> {
    let mut out = vec![
        Field::Date,
        Field::Gymnast,
        Field::Meet,
        Field::Session,
        Field::Level,
        Field::Division,
        Field::MeetRank,
        Field::MeetRankTotal,
    ];
    for ev in Event::ALL {
        out.push(Field::Score(ev));
        out.push(Field::Rank(ev));
    }
    out
}

pub fn canonical_headers() -> Vec<String> {
    canonical_fields().into_iter().map(|f| s!(f.header())).collect()
}

#[derive(Clone, Copy)]
enum How {
    Exact,
    Contains,
}

// Order matters: the first pattern that fits a header decides its field.
const SYNONYMS: &[(&str, How, Field)] = &[
    ("athlete", How::Exact, Field::Gymnast),
    ("athlete name", How::Exact, Field::Gymnast),
    ("name", How::Exact, Field::Gymnast),
    ("gymnast", How::Contains, Field::Gymnast),
    ("meet ranking", How::Contains, Field::MeetRank),
    ("meet rank", How::Contains, Field::MeetRank),
    ("meet place", How::Contains, Field::MeetRank),
    ("out of", How::Contains, Field::MeetRankTotal),
    ("field size", How::Contains, Field::MeetRankTotal),
    ("meet name", How::Exact, Field::Meet),
    ("competition", How::Exact, Field::Meet),
    ("sess", How::Exact, Field::Session),
    ("lvl", How::Exact, Field::Level),
    ("div", How::Exact, Field::Division),
    ("age group", How::Exact, Field::Division),
    ("gender", How::Exact, Field::Discipline),
    ("parallel bars", How::Contains, Field::Score(Event::PB)),
    ("pbars", How::Contains, Field::Score(Event::PB)),
    ("p-bars", How::Contains, Field::Score(Event::PB)),
    ("p bars", How::Contains, Field::Score(Event::PB)),
    ("high bar", How::Contains, Field::Score(Event::HB)),
    ("hibar", How::Contains, Field::Score(Event::HB)),
    ("hi bar", How::Contains, Field::Score(Event::HB)),
    ("horizontal bar", How::Contains, Field::Score(Event::HB)),
    ("pommel", How::Contains, Field::Score(Event::PH)),
    ("rings", How::Contains, Field::Score(Event::SR)),
    ("uneven", How::Contains, Field::Score(Event::UB)),
    ("bars", How::Contains, Field::Score(Event::UB)),
    ("vault", How::Contains, Field::Score(Event::VT)),
    ("beam", How::Contains, Field::Score(Event::BB)),
    ("floor", How::Contains, Field::Score(Event::FX)),
    ("all around", How::Contains, Field::Score(Event::AA)),
    ("all-around", How::Contains, Field::Score(Event::AA)),
    ("allaround", How::Contains, Field::Score(Event::AA)),
    ("total", How::Exact, Field::Score(Event::AA)),
    ("score", How::Exact, Field::Score(Event::AA)),
];

fn norm_header(h: &str) -> String {
    h.replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// Canonical names match with `_` and space treated alike.
fn exact_field(h: &str) -> Option<Field> {
    let h = h.replace('_', " ");
    canonical_fields()
        .into_iter()
        .chain([Field::Discipline])
        .find(|f| f.header().to_lowercase().replace('_', " ") == h)
}

fn synonym_field(h: &str) -> Option<Field> {
    SYNONYMS
        .iter()
        .find(|(pat, how, _)| match how {
            How::Exact => h == *pat,
            How::Contains => h.contains(pat),
        })
        .map(|(_, _, f)| *f)
}

fn rank_field(h: &str) -> Option<Field> {
    let base = h.strip_suffix("_rank").or_else(|| h.strip_suffix(" rank"))?;
    match exact_field(base).or_else(|| synonym_field(base)) {
        Some(Field::Score(ev)) => Some(Field::Rank(ev)),
        _ => None,
    }
}

/// Resolve one source header to a canonical field.
pub fn resolve_header(header: &str) -> Option<Field> {
    let h = norm_header(header);
    if h.is_empty() {
        return None;
    }
    exact_field(&h)
        .or_else(|| rank_field(&h))
        .or_else(|| synonym_field(&h))
}

/// Canonical field → source column index, resolved once per table.
#[derive(Clone, Debug, Default)]
pub struct HeaderMap {
    cols: HashMap<Field, usize>,
    /// Source headers that were unrecognized or lost to an earlier column.
    pub dropped: Vec<String>,
}

impl HeaderMap {
    pub fn resolve(headers: &[String]) -> Self {
        let mut map = HeaderMap::default();
        for (i, h) in headers.iter().enumerate() {
            match resolve_header(h) {
                Some(f) if !map.cols.contains_key(&f) => {
                    map.cols.insert(f, i);
                }
                _ => map.dropped.push(h.clone()),
            }
        }
        map
    }

    pub fn has(&self, field: Field) -> bool {
        self.cols.contains_key(&field)
    }

    pub fn get<'a>(&self, field: Field, row: &'a [String]) -> Option<&'a str> {
        self.cols.get(&field).and_then(|&i| row.get(i)).map(|s| s.as_str())
    }

    fn text(&self, field: Field, row: &[String]) -> String {
        s!(self.get(field, row).unwrap_or("").trim())
    }

    pub fn has_any_event(&self) -> bool {
        Event::ALL.into_iter().any(|e| self.has(Field::Score(e)))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows without an athlete, or site banner rows.
    pub dropped_rows: usize,
    /// Non-empty score cells that held no score.
    pub defaulted_cells: usize,
    pub dropped_columns: Vec<String>,
}

pub fn is_banner(name: &str) -> bool {
    let upper = name.to_uppercase();
    upper.contains(BANNER_MARKER) || upper.contains("MEET SCORES")
}

/// Read one source row through a resolved header map. `None` for nameless and banner rows.
pub fn normalize_row(map: &HeaderMap, row: &[String], report: &mut NormalizeReport) -> Option<MeetScoreRow> {
    let gymnast = map.text(Field::Gymnast, row);
    if gymnast.is_empty() || is_banner(&gymnast) {
        report.dropped_rows += 1;
        return None;
    }

    let mut out = MeetScoreRow::new(&gymnast, &map.text(Field::Meet, row));
    out.date = map.text(Field::Date, row);
    out.session = map.text(Field::Session, row);
    out.level = map.text(Field::Level, row);
    out.division = derive_division(&map.text(Field::Division, row), &out.level);
    out.meet_rank = parse_place(&map.text(Field::MeetRank, row));
    out.meet_rank_total = parse_place(&map.text(Field::MeetRankTotal, row));

    for ev in Event::ALL {
        let cell = map.get(Field::Score(ev), row);
        if cell.is_some_and(is_unparseable) {
            report.defaulted_cells += 1;
        }
        let (score, token_rank) = parse_score_rank(cell);
        let explicit = map.text(Field::Rank(ev), row);
        let rank = if explicit.is_empty() { token_rank } else { explicit };
        out.set(ev, score, &rank);
    }

    out.discipline = Discipline::parse(&map.text(Field::Discipline, row))
        .or_else(|| Discipline::infer(&out.events));
    Some(out)
}

/// Normalize a whole table. Absent columns default; unrecognized columns are ignored.
pub fn normalize_table(data: &DataSet) -> (Vec<MeetScoreRow>, NormalizeReport) {
    let map = HeaderMap::resolve(&data.headers);
    let mut report = NormalizeReport {
        rows_in: data.rows.len(),
        dropped_columns: map.dropped.clone(),
        ..NormalizeReport::default()
    };
    let rows: Vec<MeetScoreRow> = data
        .rows
        .iter()
        .filter_map(|r| normalize_row(&map, r, &mut report))
        .collect();
    report.rows_out = rows.len();
    (rows, report)
}

pub fn to_record(row: &MeetScoreRow) -> Vec<String> {
    let opt = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
    let mut out = vec![
        row.date.clone(),
        row.gymnast.clone(),
        row.meet.clone(),
        row.session.clone(),
        row.level.clone(),
        row.division.clone(),
        opt(row.meet_rank),
        opt(row.meet_rank_total),
    ];
    for ev in Event::ALL {
        let e = row.event(ev);
        out.push(fmt_score(e.score));
        out.push(e.rank.clone());
    }
    out
}

pub fn to_table(rows: &[MeetScoreRow]) -> DataSet {
    DataSet {
        headers: canonical_headers(),
        rows: rows.iter().map(to_record).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_width() {
        assert_eq!(canonical_headers().len(), 26);
        assert_eq!(canonical_headers()[7], "Meet_Rank_Total");
        assert_eq!(canonical_headers()[25], "AA_Rank");
    }

    #[test]
    fn header_resolution() {
        assert_eq!(resolve_header("Vault"), Some(Field::Score(Event::VT)));
        assert_eq!(resolve_header("PBars"), Some(Field::Score(Event::PB)));
        assert_eq!(resolve_header("Parallel Bars"), Some(Field::Score(Event::PB)));
        assert_eq!(resolve_header("Bars"), Some(Field::Score(Event::UB)));
        assert_eq!(resolve_header("HiBar"), Some(Field::Score(Event::HB)));
        assert_eq!(resolve_header("All Around"), Some(Field::Score(Event::AA)));
        assert_eq!(resolve_header("Total"), Some(Field::Score(Event::AA)));
        assert_eq!(resolve_header("Meet Ranking"), Some(Field::MeetRank));
        assert_eq!(resolve_header("meet"), Some(Field::Meet));
        assert_eq!(resolve_header("Vault Rank"), Some(Field::Rank(Event::VT)));
        assert_eq!(resolve_header("fx_rank"), Some(Field::Rank(Event::FX)));
        assert_eq!(resolve_header("Athlete"), Some(Field::Gymnast));
        assert_eq!(resolve_header("Club"), None);
    }

    #[test]
    fn spaced_canonical_names_keep_their_field() {
        assert_eq!(resolve_header("Meet Rank Total"), Some(Field::MeetRankTotal));
        assert_eq!(resolve_header("Meet Rank"), Some(Field::MeetRank));
        let map = HeaderMap::resolve(&strings!["Gymnast", "Meet Rank", "Meet Rank Total"]);
        let row = strings!["Annabelle", "4", "31"];
        assert_eq!(map.get(Field::MeetRankTotal, &row), Some("31"));
        assert!(map.dropped.is_empty());
    }

    #[test]
    fn first_synonym_column_wins() {
        let map = HeaderMap::resolve(&strings!["Gymnast", "AA", "Total", "Team"]);
        let row = strings!["Azalea", "36.1", "99.9", "X"];
        assert_eq!(map.get(Field::Score(Event::AA), &row), Some("36.1"));
        assert_eq!(map.dropped, strings!["Total", "Team"]);
    }

    #[test]
    fn explicit_rank_overrides_token() {
        let data = DataSet {
            headers: strings!["Gymnast", "Vault", "Vault Rank", "Bars"],
            rows: vec![strings!["Azalea", "9.1 4", "2T", "8.9 6"]],
        };
        let (rows, _) = normalize_table(&data);
        assert_eq!(rows[0].event(Event::VT).rank, "2T");
        assert_eq!(rows[0].event(Event::UB).rank, "6");
    }

    #[test]
    fn nameless_and_banner_rows_drop() {
        let data = DataSet {
            headers: strings!["Gymnast", "AA"],
            rows: vec![
                strings!["", "36.0"],
                strings!["LIVE RESULTS - refresh", ""],
                strings!["Ansel Sheehy", "DNS"],
            ],
        };
        let (rows, report) = normalize_table(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.defaulted_cells, 1);
        assert_eq!(rows[0].score(Event::AA), 0.0);
    }

    #[test]
    fn division_derived_or_explicit() {
        let data = DataSet {
            headers: strings!["Gymnast", "Level", "Div"],
            rows: vec![strings!["A", "4D1", ""], strings!["B", "4D1", "Child"]],
        };
        let (rows, _) = normalize_table(&data);
        assert_eq!(rows[0].division, "D1");
        assert_eq!(rows[1].division, "Child");
        assert_eq!(rows[0].level, "4D1");
    }

    #[test]
    fn explicit_discipline_beats_inference() {
        let data = DataSet {
            headers: strings!["Gymnast", "Vault", "Discipline"],
            rows: vec![strings!["Ansel", "9.0", "Men"]],
        };
        let (rows, _) = normalize_table(&data);
        assert_eq!(rows[0].discipline(), Some(Discipline::Mens));
    }
}
