// src/store.rs
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::csv::{read_table, write_table};
use crate::model::MeetScoreRow;
use crate::schema::{normalize_table, to_table};

/// Headed string table: what pages are scraped into and CSV files are read as.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataSet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSet {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    /// Append rows of another table by header name; unknown columns are dropped.
    pub fn append(&mut self, other: DataSet) {
        let map: Vec<Option<usize>> = self.headers.iter().map(|h| other.column(h)).collect();
        for row in other.rows {
            let out = map
                .iter()
                .map(|ix| ix.and_then(|i| row.get(i)).cloned().unwrap_or_default())
                .collect();
            self.rows.push(out);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub existing: usize,
    pub incoming: usize,
    pub kept: usize,
    pub duplicates_removed: usize,
}

/// Keep the last row per (gymnast, meet, all-around total); survivors stay in input order.
/// Returns the kept rows and how many were removed.
pub fn dedup_keep_last(rows: Vec<MeetScoreRow>) -> (Vec<MeetScoreRow>, usize) {
    let before = rows.len();
    let mut seen = HashSet::new();
    let mut kept: Vec<MeetScoreRow> = rows
        .into_iter()
        .rev()
        .filter(|r| seen.insert(r.dedup_key()))
        .collect();
    kept.reverse();
    let removed = before - kept.len();
    (kept, removed)
}

/// Existing rows followed by incoming rows, deduplicated with later rows winning.
pub fn merge_rows(existing: Vec<MeetScoreRow>, incoming: Vec<MeetScoreRow>) -> (Vec<MeetScoreRow>, MergeSummary) {
    let mut summary = MergeSummary {
        existing: existing.len(),
        incoming: incoming.len(),
        ..MergeSummary::default()
    };
    let mut all = existing;
    all.extend(incoming);
    let (kept, removed) = dedup_keep_last(all);
    summary.kept = kept.len();
    summary.duplicates_removed = removed;
    (kept, summary)
}

pub trait ScoreRepository {
    fn load(&self) -> Result<Vec<MeetScoreRow>, Box<dyn std::error::Error>>;
    fn save(&mut self, rows: &[MeetScoreRow]) -> Result<(), Box<dyn std::error::Error>>;

    fn merge(&mut self, incoming: Vec<MeetScoreRow>) -> Result<MergeSummary, Box<dyn std::error::Error>> {
        let existing = self.load()?;
        let (rows, summary) = merge_rows(existing, incoming);
        self.save(&rows)?;
        Ok(summary)
    }
}

/// Canonical history as a CSV file. A missing file is an empty history.
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreRepository for CsvRepository {
    fn load(&self) -> Result<Vec<MeetScoreRow>, Box<dyn std::error::Error>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = read_table(&self.path)?;
        let (rows, report) = normalize_table(&data);
        if !report.dropped_columns.is_empty() {
            logd!("{}: ignoring columns {:?}", self.path.display(), report.dropped_columns);
        }
        Ok(rows)
    }

    fn save(&mut self, rows: &[MeetScoreRow]) -> Result<(), Box<dyn std::error::Error>> {
        write_table(&self.path, &to_table(rows))?;
        logf!("Saved {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    pub rows: Vec<MeetScoreRow>,
}

impl ScoreRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<MeetScoreRow>, Box<dyn std::error::Error>> {
        Ok(self.rows.clone())
    }

    fn save(&mut self, rows: &[MeetScoreRow]) -> Result<(), Box<dyn std::error::Error>> {
        self.rows = rows.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Event;

    fn row(name: &str, meet: &str, aa: f64, vt: f64) -> MeetScoreRow {
        MeetScoreRow::new(name, meet).with(Event::AA, aa, "").with(Event::VT, vt, "")
    }

    #[test]
    fn dedup_keeps_last_occurrence() {
        let rows = vec![
            row("Ansel", "Rose Gold", 50.1, 9.0),
            row("Azalea", "Rose Gold", 36.0, 9.1),
            row("Ansel", "Rose Gold", 50.1, 9.3),
        ];
        let (kept, removed) = dedup_keep_last(rows);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].gymnast, "Azalea");
        assert_eq!(kept[1].score(Event::VT), 9.3);
    }

    #[test]
    fn different_totals_are_different_rows() {
        let rows = vec![row("Ansel", "M", 50.1, 9.0), row("Ansel", "M", 50.2, 9.0)];
        let (kept, removed) = dedup_keep_last(rows);
        assert_eq!((kept.len(), removed), (2, 0));
    }

    #[test]
    fn merge_prefers_incoming() {
        let mut repo = MemoryRepository { rows: vec![row("Ansel", "M", 50.1, 9.0)] };
        let summary = repo.merge(vec![row("Ansel", "M", 50.1, 9.4), row("Ansel", "N", 49.0, 9.1)]).unwrap();
        assert_eq!(
            summary,
            MergeSummary { existing: 1, incoming: 2, kept: 2, duplicates_removed: 1 }
        );
        assert_eq!(repo.rows[0].score(Event::VT), 9.4);
    }

    #[test]
    fn append_maps_by_header() {
        let mut a = DataSet::new(strings!["Gymnast", "AA"]);
        let b = DataSet { headers: strings!["aa", "Other", "gymnast"], rows: vec![strings!["37.1", "x", "Azalea"]] };
        a.append(b);
        assert_eq!(a.rows, vec![strings!["Azalea", "37.1"]]);
    }
}
