// src/specs/session.rs
//! Whole-session score tables, shared by both sites' session pages.
//!
//! Tables with a usable header row are read by header name. Headerless tables
//! (saved MeetScoresOnline session pages) are read positionally, with the
//! column layout chosen by an explicit [`Discipline`].

use crate::core::html::{self, HtmlTable, Cell, attr, blocks, inner_after_open_tag, row_cells};
use crate::model::{Discipline, Event};
use crate::schema::{Field, HeaderMap};

/// One competitor's row in a session table, scores still as printed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionEntry {
    pub athlete: String,
    pub division: String,
    pub tokens: Vec<(Event, String)>,
}

/// True for tables that carry per-event scores (an AA column plus Floor or Vault).
pub fn is_score_table(headers: &[String]) -> bool {
    let lc: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    lc.iter().any(|h| h == "aa" || h.contains("all around"))
        && lc.iter().any(|h| h.contains("floor") || h.contains("vault"))
}

/// Rows of a headed table, read through the header map. The first column stands
/// in for the athlete when no header names one.
pub fn entries_from_table(table: &HtmlTable) -> Vec<SessionEntry> {
    let map = HeaderMap::resolve(&table.headers);
    if !map.has_any_event() {
        return Vec::new();
    }
    let name_col = !map.has(Field::Gymnast);
    let mut out = Vec::new();
    for row in &table.rows {
        let athlete = if name_col {
            row.first().map(|s| s.trim()).unwrap_or("")
        } else {
            map.get(Field::Gymnast, row).unwrap_or("").trim()
        };
        if athlete.is_empty() {
            continue;
        }
        let tokens = Event::ALL
            .into_iter()
            .filter_map(|ev| map.get(Field::Score(ev), row).map(|t| (ev, s!(t.trim()))))
            .collect();
        out.push(SessionEntry {
            athlete: s!(athlete),
            division: s!(map.get(Field::Division, row).unwrap_or("").trim()),
            tokens,
        });
    }
    out
}

/// Cell index of each apparatus in a headerless session row. AA is always the last cell.
pub fn positional_layout(discipline: Discipline) -> &'static [(Event, usize)] {
    match discipline {
        Discipline::Mens => &[
            (Event::FX, 2),
            (Event::PH, 3),
            (Event::SR, 4),
            (Event::VT, 5),
            (Event::PB, 6),
            (Event::HB, 7),
        ],
        Discipline::Womens => &[(Event::VT, 5), (Event::UB, 6), (Event::BB, 7), (Event::FX, 8)],
    }
}

const MIN_POSITIONAL_CELLS: usize = 6;

/// Headerless rows: `<tr data-gymnastid>` when the page marks them, else every row
/// with enough `<td>` cells.
pub fn entries_positional(doc: &str, discipline: Discipline) -> Vec<SessionEntry> {
    let rows = blocks(doc, "tr");
    let marked: Vec<&str> = rows
        .iter()
        .copied()
        .filter(|tr| attr(tr, "data-gymnastid").is_some())
        .collect();
    let rows = if marked.is_empty() { rows } else { marked };

    let layout = positional_layout(discipline);
    let mut out = Vec::new();
    for tr in rows {
        let cells: Vec<String> = row_cells(tr)
            .iter()
            .filter(|c| !c.header)
            .map(Cell::text)
            .collect();
        if cells.len() < MIN_POSITIONAL_CELLS {
            continue;
        }
        let athlete = cells[0].trim();
        if athlete.is_empty() {
            continue;
        }
        let mut tokens: Vec<(Event, String)> = layout
            .iter()
            .filter_map(|&(ev, i)| cells.get(i).map(|t| (ev, s!(t.trim()))))
            .collect();
        if let Some(last) = cells.last() {
            tokens.push((Event::AA, s!(last.trim())));
        }
        out.push(SessionEntry { athlete: s!(athlete), division: s!(), tokens });
    }
    out
}

/// Read a session page: headed score tables first, positional rows as the fallback.
pub fn parse_session_page(doc: &str, discipline: Option<Discipline>) -> Result<Vec<SessionEntry>, Box<dyn std::error::Error>> {
    let headed: Vec<SessionEntry> = html::tables(doc)
        .iter()
        .filter(|t| is_score_table(&t.headers))
        .flat_map(entries_from_table)
        .collect();
    if !headed.is_empty() {
        return Ok(headed);
    }

    let discipline = discipline.ok_or("no score header row and no discipline for positional columns")?;
    let rows = entries_positional(doc, discipline);
    if rows.is_empty() {
        return Err("no session rows found".into());
    }
    Ok(rows)
}

/// Discipline named by a page's own column labels, if any.
pub fn discipline_from_labels(doc: &str) -> Option<Discipline> {
    let headers: Vec<String> = blocks(doc, "th").iter().map(|b| html::text(inner_after_open_tag(b))).collect();
    let fields: Vec<Field> = headers.iter().filter_map(|h| crate::schema::resolve_header(h)).collect();
    let has = |ev: Event| fields.contains(&Field::Score(ev));
    if [Event::PH, Event::SR, Event::PB, Event::HB].into_iter().any(has) {
        Some(Discipline::Mens)
    } else if [Event::UB, Event::BB].into_iter().any(has) {
        Some(Discipline::Womens)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADED: &str = "<table><tr><th>Name</th><th>Gym</th><th>Vault</th><th>Bars</th>\
        <th>Beam</th><th>Floor</th><th>AA</th></tr>\
        <tr><td>Azalea Sheehy</td><td>X</td><td>9.100 4</td><td>8.900 7</td><td>9.250 2</td>\
        <td>9.300 1T</td><td>36.550 3</td></tr>\
        <tr><td></td><td></td><td></td><td></td><td></td><td></td><td></td></tr></table>";

    #[test]
    fn headed_table_by_name() {
        let rows = parse_session_page(HEADED, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].athlete, "Azalea Sheehy");
        assert!(rows[0].tokens.contains(&(Event::UB, s!("8.900 7"))));
        assert!(rows[0].tokens.contains(&(Event::AA, s!("36.550 3"))));
    }

    #[test]
    fn positional_mens_layout() {
        let doc = "<table>\
            <tr data-gymnastid=\"1\"><td>Ansel Sheehy</td><td>Gym</td><td>8.7 12</td><td>7.9 40</td>\
            <td>8.1 20</td><td>9.3 1T</td><td>8.55 9</td><td>8.0 15</td><td>50.55 36</td></tr>\
            <tr><td>ad</td><td>row</td></tr></table>";
        let rows = parse_session_page(doc, Some(Discipline::Mens)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tokens[3], (Event::VT, s!("9.3 1T")));
        assert_eq!(rows[0].tokens.last(), Some(&(Event::AA, s!("50.55 36"))));
    }

    #[test]
    fn headerless_needs_discipline() {
        let doc = "<table><tr><td>A</td><td>b</td><td>1.0</td><td>1.0</td><td>1.0</td><td>1.0</td></tr></table>";
        assert!(parse_session_page(doc, None).is_err());
    }

    #[test]
    fn labels_name_the_discipline() {
        assert_eq!(discipline_from_labels("<th>Pommel</th><th>AA</th>"), Some(Discipline::Mens));
        assert_eq!(discipline_from_labels("<th>Beam</th>"), Some(Discipline::Womens));
        assert_eq!(discipline_from_labels("<th>Vault</th>"), None);
    }
}
