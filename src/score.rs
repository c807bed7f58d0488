// src/score.rs
//! Score-token grammar. Sites publish one cell per event such as
//! `"9.425 1T"`: a decimal score, optionally followed by placement text.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::EventScore;

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.\d+").expect("score pattern"))
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("digits pattern"))
}

/// First decimal number in the text is the score; whatever follows it is the rank.
/// Missing or unparseable input yields `(0.0, "")`.
pub fn parse_score_rank(text: Option<&str>) -> (f64, String) {
    let Some(text) = text else {
        return (0.0, s!());
    };
    let Some(m) = score_re().find(text) else {
        return (0.0, s!());
    };
    match m.as_str().parse::<f64>() {
        Ok(score) => (score, s!(text[m.end()..].trim())),
        Err(_) => (0.0, s!()),
    }
}

pub fn parse_token(text: &str) -> EventScore {
    let (score, rank) = parse_score_rank(Some(text));
    EventScore::new(score, &rank)
}

/// True when the cell holds something other than a blank or an explicit "no score".
pub fn is_unparseable(text: &str) -> bool {
    let t = text.trim();
    if t.is_empty() || score_re().is_match(t) {
        return false;
    }
    !matches!(t.to_lowercase().as_str(), "0" | "-" | "--" | "nan" | "none" | "n/a")
}

/// "36th" → 36, "Out of 152" → 152, "" → None.
pub fn parse_place(text: &str) -> Option<u32> {
    digits_re().find(text).and_then(|m| m.as_str().parse().ok())
}

/// Shortest round-tripping decimal, always with a fractional part: 9.3 → "9.3", 10 → "10.0".
pub fn fmt_score(v: f64) -> String {
    if !v.is_finite() {
        return s!("0.0");
    }
    if v.fract() == 0.0 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}
