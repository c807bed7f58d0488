// src/model.rs
//! Typed score records shared by the normalizer, analytics and dashboard.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Event {
    VT,
    UB,
    BB,
    FX,
    PH,
    SR,
    PB,
    HB,
    AA,
}

impl Event {
    /// Canonical column order.
    pub const ALL: [Event; 9] = [
        Event::VT,
        Event::UB,
        Event::BB,
        Event::FX,
        Event::PH,
        Event::SR,
        Event::PB,
        Event::HB,
        Event::AA,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn code(self) -> &'static str {
        match self {
            Event::VT => "VT",
            Event::UB => "UB",
            Event::BB => "BB",
            Event::FX => "FX",
            Event::PH => "PH",
            Event::SR => "SR",
            Event::PB => "PB",
            Event::HB => "HB",
            Event::AA => "AA",
        }
    }

    pub fn rank_column(self) -> &'static str {
        match self {
            Event::VT => "VT_Rank",
            Event::UB => "UB_Rank",
            Event::BB => "BB_Rank",
            Event::FX => "FX_Rank",
            Event::PH => "PH_Rank",
            Event::SR => "SR_Rank",
            Event::PB => "PB_Rank",
            Event::HB => "HB_Rank",
            Event::AA => "AA_Rank",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Event::VT => "Vault",
            Event::UB => "Bars",
            Event::BB => "Beam",
            Event::FX => "Floor",
            Event::PH => "Pommel Horse",
            Event::SR => "Rings",
            Event::PB => "Parallel Bars",
            Event::HB => "High Bar",
            Event::AA => "All-Around",
        }
    }

    pub fn from_code(code: &str) -> Option<Event> {
        let code = code.trim();
        Event::ALL.into_iter().find(|e| e.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discipline {
    Womens,
    Mens,
}

impl Discipline {
    /// Apparatus in competition order.
    pub fn events(self) -> &'static [Event] {
        match self {
            Discipline::Womens => &[Event::VT, Event::UB, Event::BB, Event::FX],
            Discipline::Mens => &[Event::FX, Event::PH, Event::SR, Event::VT, Event::PB, Event::HB],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Discipline::Womens => "Women",
            Discipline::Mens => "Men",
        }
    }

    pub fn parse(text: &str) -> Option<Discipline> {
        match text.trim().to_lowercase().as_str() {
            "w" | "f" | "women" | "womens" | "women's" | "girls" | "wag" => Some(Discipline::Womens),
            "m" | "men" | "mens" | "men's" | "boys" | "mag" => Some(Discipline::Mens),
            _ => None,
        }
    }

    /// Men's-only apparatus decide it; otherwise women's-only ones do.
    pub fn infer(events: &[EventScore; 9]) -> Option<Discipline> {
        let competed = |e: Event| events[e.index()].competed();
        if [Event::PH, Event::SR, Event::PB, Event::HB].into_iter().any(competed) {
            Some(Discipline::Mens)
        } else if [Event::UB, Event::BB].into_iter().any(competed) {
            Some(Discipline::Womens)
        } else {
            None
        }
    }
}

/// Score with its placement text. A zero score never carries a rank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventScore {
    pub score: f64,
    pub rank: String,
}

impl EventScore {
    pub fn new(score: f64, rank: &str) -> Self {
        let score = if score.is_finite() { score } else { 0.0 };
        let rank = if score == 0.0 { s!() } else { s!(rank.trim()) };
        Self { score, rank }
    }

    pub fn competed(&self) -> bool {
        self.score != 0.0 && self.score.is_finite()
    }
}

/// One canonical row: one athlete at one meet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeetScoreRow {
    pub date: String,
    pub gymnast: String,
    pub meet: String,
    pub session: String,
    pub level: String,
    pub division: String,
    pub meet_rank: Option<u32>,
    pub meet_rank_total: Option<u32>,
    pub events: [EventScore; 9],
    /// Explicit from the source, or inferred from which apparatus were scored.
    pub discipline: Option<Discipline>,
}

impl MeetScoreRow {
    pub fn new(gymnast: &str, meet: &str) -> Self {
        Self {
            gymnast: s!(gymnast),
            meet: s!(meet),
            ..Self::default()
        }
    }

    pub fn event(&self, ev: Event) -> &EventScore {
        &self.events[ev.index()]
    }

    pub fn score(&self, ev: Event) -> f64 {
        self.events[ev.index()].score
    }

    pub fn set(&mut self, ev: Event, score: f64, rank: &str) {
        self.events[ev.index()] = EventScore::new(score, rank);
    }

    pub fn with(mut self, ev: Event, score: f64, rank: &str) -> Self {
        self.set(ev, score, rank);
        self
    }

    pub fn discipline(&self) -> Option<Discipline> {
        self.discipline.or_else(|| Discipline::infer(&self.events))
    }

    /// Dedup identity: same athlete, same meet, same all-around total.
    pub fn dedup_key(&self) -> (String, String, String) {
        (
            self.gymnast.clone(),
            self.meet.clone(),
            crate::score::fmt_score(self.score(Event::AA)),
        )
    }
}

/// Split "4D1" into ("4", Some("D1")). Levels without a digits+D shape pass through.
pub fn split_level(level: &str) -> (String, Option<String>) {
    let level = level.trim();
    let digits = level.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &level[digits..];
        if rest.len() > 1 && rest.starts_with(['D', 'd']) {
            return (s!(&level[..digits]), Some(rest.to_uppercase()));
        }
    }
    (s!(level), None)
}

/// An explicit division wins; otherwise derive one from the level string.
pub fn derive_division(explicit: &str, level: &str) -> String {
    let explicit = explicit.trim();
    if !explicit.is_empty() {
        return s!(explicit);
    }
    split_level(level).1.unwrap_or_default()
}
