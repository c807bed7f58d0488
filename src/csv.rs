// src/csv.rs
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ::csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::file::ensure_parent;
use crate::store::DataSet;

/* ---------------- Reading ---------------- */

/// Headed table from any reader. Ragged rows are padded or cut to the header width.
pub fn read_from<R: Read>(src: R) -> Result<DataSet, Box<dyn std::error::Error>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(src);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| s!(h.trim_start_matches('\u{feff}'))).collect();
    let width = headers.len();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let mut row: Vec<String> = record.iter().map(String::from).collect();
        row.resize(width, s!());
        rows.push(row);
    }

    Ok(DataSet { headers, rows })
}

pub fn parse_table(text: &str) -> Result<DataSet, Box<dyn std::error::Error>> {
    read_from(text.as_bytes())
}

pub fn read_table(path: &Path) -> Result<DataSet, Box<dyn std::error::Error>> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
    read_from(file)
}

/* ---------------- Writing ---------------- */

pub fn write_to<W: Write>(dst: W, data: &DataSet) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(dst);
    wtr.write_record(&data.headers)?;
    for row in &data.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn table_to_string(data: &DataSet) -> Result<String, Box<dyn std::error::Error>> {
    let mut buf: Vec<u8> = Vec::new();
    write_to(&mut buf, data)?;
    Ok(String::from_utf8(buf)?)
}

/// Replace the file at `path` with `data`, creating parent directories.
pub fn write_table(path: &Path, data: &DataSet) -> Result<(), Box<dyn std::error::Error>> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    write_to(file, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_rows_fit_header_width() {
        let data = parse_table("A,B,C\n1,2\n4,5,6,7\n").unwrap();
        assert_eq!(data.rows, vec![strings!["1", "2", ""], strings!["4", "5", "6"]]);
    }

    #[test]
    fn blank_lines_are_skipped_and_quotes_survive() {
        let data = DataSet {
            headers: strings!["Meet", "Gymnast"],
            rows: vec![strings!["Rose Gold, Classic", "Ansel \"A\" Sheehy"]],
        };
        let text = table_to_string(&data).unwrap();
        let back = parse_table(&format!("{text}\n,\n")).unwrap();
        assert_eq!(back, data);
    }
}
