// src/specs/mms_session.rs
//! MyMeetScores session results (`meet.pl?meetid=<id>&session=<s>`).
//! The page holds several tables; score tables name a Gymnast or Vault column.

use crate::config::consts::{MMS_HOST, MMS_SESSION_PATH};
use crate::core::html::tables;

use super::session::{SessionEntry, entries_from_table};

pub fn session_url(meet_id: &str, session: &str) -> String {
    format!("{MMS_HOST}{MMS_SESSION_PATH}?meetid={meet_id}&session={}", session.trim())
}

pub fn parse_session(doc: &str) -> Vec<SessionEntry> {
    tables(doc)
        .iter()
        .filter(|t| {
            t.headers.iter().any(|h| {
                let h = h.to_lowercase();
                h.contains("gymnast") || h.contains("vault")
            })
        })
        .flat_map(entries_from_table)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Event;

    #[test]
    fn url_shape() {
        assert_eq!(
            session_url("93352", " 3 "),
            "https://www.mymeetscores.com/meet.pl?meetid=93352&session=3"
        );
    }

    #[test]
    fn skips_navigation_tables() {
        let doc = "<table><tr><th>Menu</th></tr><tr><td>Home</td></tr></table>\
            <table><tr><th>Gymnast</th><th>Vault</th><th>Bars</th><th>Beam</th><th>Floor</th><th>AA</th></tr>\
            <tr><td>Annabelle Sheehy</td><td>9.0</td><td>8.8</td><td>9.1</td><td>9.2</td><td>36.1</td></tr>\
            <tr><td>Other Kid</td><td>8.5</td><td>8.6</td><td>8.7</td><td>8.8</td><td>34.6</td></tr></table>";
        let rows = parse_session(doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].athlete, "Other Kid");
        assert!(rows[0].tokens.contains(&(Event::FX, s!("9.2"))));
    }
}
