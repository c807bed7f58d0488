// src/specs/mso_profile.rs
//! Athlete profile (`/Athlete.MyScores/<id>`): the list of meets the athlete has
//! scores for. Only links of the form `/results/<meet>/<athlete id>` count.

use crate::config::consts::{MSO_HOST, MSO_RESULTS_MARKER};
use crate::core::html::{attr, blocks};
use crate::core::net::absolute_url;

/// Absolute result-page URLs for `athlete_id`, in page order, without repeats.
pub fn result_links(doc: &str, athlete_id: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for a in blocks(doc, "a") {
        let Some(href) = attr(a, "href") else { continue };
        if !href.contains(MSO_RESULTS_MARKER) || !href.contains(athlete_id) {
            continue;
        }
        let url = absolute_url(MSO_HOST, href.trim());
        if !out.contains(&url) {
            out.push(url);
        }
    }
    out
}
