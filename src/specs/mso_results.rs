// src/specs/mso_results.rs
//! One athlete's result page for one meet on MeetScoresOnline.
//!
//! Ground truth lives in three places:
//! - `<title>`: `"Ansel Sheehy - 2026 Mas Watanabe, CA 02/13/2026 - ..."` (name, meet, date)
//! - the info card `<li>` items: `Level:`, `Session:`, `Division:`/`Div:`, and
//!   `Meet Ranking <span class="bold">36<sup>th</sup></span> <i>Out of 152 ...</i>`
//! - `table.table-condensed`: one row per event, `<th>` event name, and a `<td>`
//!   holding `<span class="score">` and `<span class="place">`.

use std::error::Error;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::html::{self, blocks, find_by_class, inner_after_open_tag, row_cells, text};
use crate::model::Event;
use crate::schema::{Field, resolve_header};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeetResult {
    pub date: String,
    pub gymnast: String,
    pub meet: String,
    pub session: String,
    pub level: String,
    pub division: String,
    pub meet_rank: String,
    pub meet_total: String,
    /// Raw "score place" tokens per event, as the site printed them.
    pub tokens: Vec<(Event, String)>,
    /// Page parts that were missing and left blank.
    pub missing: Vec<&'static str>,
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("date pattern"))
}

fn out_of_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)out\s+of\s+(\d+)").expect("out-of pattern"))
}

/// "MM/DD/YYYY" anywhere in the text → "YYYY-MM-DD".
pub fn iso_date(text: &str) -> Option<String> {
    let c = date_re().captures(text)?;
    let m: u32 = c[1].parse().ok()?;
    let d: u32 = c[2].parse().ok()?;
    Some(format!("{}-{m:02}-{d:02}", &c[3]))
}

/// Name, meet and date from the page title.
pub fn parse_title(title: &str) -> Option<(String, String, Option<String>)> {
    let parts: Vec<&str> = title.split(" - ").collect();
    if parts.len() < 2 {
        return None;
    }
    let name = s!(parts[0].trim());
    let meet = s!(parts[1].split(',').next().unwrap_or("").trim());
    if name.is_empty() || meet.is_empty() {
        return None;
    }
    Some((name, meet, iso_date(parts[1]).or_else(|| iso_date(title))))
}

fn labelled(li_text: &str, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        li_text
            .find(label)
            .map(|i| s!(li_text[i + label.len()..].trim()))
    })
}

/// Digits of `<span class="bold">` and N of "Out of N" from the Meet Ranking item.
pub fn parse_meet_ranking(li: &str) -> (String, String) {
    let rank = find_by_class(li, "span", "bold")
        .and_then(|b| crate::score::parse_place(&text(b)))
        .map(|n| n.to_string())
        .unwrap_or_default();
    let total = blocks(li, "i")
        .first()
        .map(|b| text(b))
        .or_else(|| Some(text(li)))
        .and_then(|t| out_of_re().captures(&t).map(|c| s!(&c[1])))
        .unwrap_or_default();
    (rank, total)
}

/// `(event, "score place")` for each scored row of the event table.
pub fn parse_event_table(table: &str) -> Vec<(Event, String)> {
    let mut out = Vec::new();
    for tr in blocks(inner_after_open_tag(table), "tr") {
        let cells = row_cells(tr);
        let Some(th) = cells.iter().find(|c| c.header) else { continue };
        let Some(td) = cells.iter().find(|c| !c.header) else { continue };
        let Some(Field::Score(ev)) = resolve_header(&th.text()) else { continue };
        let Some(score) = find_by_class(td.html, "span", "score").map(text) else { continue };
        if score.is_empty() {
            continue;
        }
        let place = find_by_class(td.html, "span", "place").map(text).unwrap_or_default();
        let token = if place.is_empty() { score } else { format!("{score} {place}") };
        out.push((ev, token));
    }
    out
}

pub fn parse_result_page(doc: &str) -> Result<MeetResult, Box<dyn Error>> {
    let table = find_by_class(doc, "table", "table-condensed").ok_or("score table not found")?;
    let tokens = parse_event_table(table);
    if tokens.is_empty() {
        return Err("score table has no scored events".into());
    }

    let mut out = MeetResult { tokens, ..MeetResult::default() };

    match html::title(doc).as_deref().and_then(parse_title) {
        Some((name, meet, date)) => {
            out.gymnast = name;
            out.meet = meet;
            match date {
                Some(d) => out.date = d,
                None => out.missing.push("date"),
            }
        }
        None => return Err("page title has no athlete/meet".into()),
    }

    let mut ranking_seen = false;
    for li in blocks(doc, "li") {
        let t = text(li);
        if let Some(v) = labelled(&t, &["Level:"]) {
            out.level = v;
        }
        if let Some(v) = labelled(&t, &["Session:"]) {
            out.session = v;
        }
        if let Some(v) = labelled(&t, &["Division:", "Div:"]) {
            if !v.is_empty() {
                out.division = v;
            }
        }
        if !ranking_seen && t.contains("Meet Ranking") {
            (out.meet_rank, out.meet_total) = parse_meet_ranking(li);
            ranking_seen = true;
        }
    }

    if out.level.is_empty() {
        out.missing.push("level");
    }
    if out.session.is_empty() {
        out.missing.push("session");
    }
    Ok(out)
}

#[cfg(test)]
pub(crate) const SAMPLE_PAGE: &str = r#"<html><head>
<title>Ansel Sheehy - 2026 Mas Watanabe, CA 02/13/2026 - MeetScoresOnline.com</title>
</head><body>
<ul class="list-unstyled">
  <li><span class="title">Level: </span>4D1</li>
  <li><span class="title">Session: </span>4</li>
  <li class="text-center">Meet Ranking <span class="bold fs-2">36<sup>th</sup></span>
      <i>Out of 152 Level 4D1s</i></li>
</ul>
<table class="table table-condensed">
  <tr><th>Floor</th><td><span class="score">8.700</span> <span class="place">12</span></td></tr>
  <tr><th>Pommel</th><td><span class="score">7.900</span> <span class="place">40T</span></td></tr>
  <tr><th>Vault</th><td><span class="score">9.300</span> <span class="place">1T</span></td></tr>
  <tr><th>PBars</th><td><span class="score">8.550</span></td></tr>
  <tr><th>AA</th><td><span class="score">50.150</span> <span class="place">36</span></td></tr>
</table>
</body></html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_gives_name_meet_date() {
        let (name, meet, date) =
            parse_title("Ansel Sheehy - 2026 Mas Watanabe, CA 02/13/2026 - MeetScoresOnline.com").unwrap();
        assert_eq!(name, "Ansel Sheehy");
        assert_eq!(meet, "2026 Mas Watanabe");
        assert_eq!(date.as_deref(), Some("2026-02-13"));
        assert!(parse_title("MeetScoresOnline").is_none());
    }

    #[test]
    fn full_page() {
        let r = parse_result_page(SAMPLE_PAGE).unwrap();
        assert_eq!(r.gymnast, "Ansel Sheehy");
        assert_eq!(r.date, "2026-02-13");
        assert_eq!(r.level, "4D1");
        assert_eq!(r.session, "4");
        assert_eq!((r.meet_rank.as_str(), r.meet_total.as_str()), ("36", "152"));
        assert_eq!(r.tokens[2], (Event::VT, s!("9.300 1T")));
        assert_eq!(r.tokens[3], (Event::PB, s!("8.550")));
        assert_eq!(r.tokens.len(), 5);
        assert!(r.missing.is_empty());
    }

    #[test]
    fn page_without_table_fails() {
        assert!(parse_result_page("<title>A - B, CA 01/01/2026 - x</title>").is_err());
    }
}
