// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::model::Discipline;

/// One child the pipeline follows. `nick` is matched case-insensitively as a
/// substring of the source's athlete name; `full_name` is what gets written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedAthlete {
    pub nick: String,
    pub full_name: String,
    pub mso_id: String,
    pub discipline: Discipline,
    pub color: [u8; 3],
}

impl TrackedAthlete {
    pub fn matches(&self, name: &str) -> bool {
        !self.nick.is_empty() && name.to_lowercase().contains(&self.nick.to_lowercase())
    }

    pub fn profile_url(&self) -> Option<String> {
        if self.mso_id.is_empty() {
            None
        } else {
            Some(format!("{MSO_HOST}{MSO_PROFILE_PREFIX}{}", self.mso_id))
        }
    }
}

impl From<&Athlete> for TrackedAthlete {
    fn from(a: &Athlete) -> Self {
        Self {
            nick: s!(a.nick),
            full_name: s!(a.full_name),
            mso_id: s!(a.mso_id),
            discipline: a.discipline,
            color: a.color,
        }
    }
}

pub fn default_athletes() -> Vec<TrackedAthlete> {
    ATHLETES.iter().map(TrackedAthlete::from).collect()
}

/// Narrow the default roster to the given nicknames (case-insensitive).
/// Unknown nicknames become bare trackers without a profile id.
pub fn athletes_named(nicks: &[String]) -> Vec<TrackedAthlete> {
    let known = default_athletes();
    nicks
        .iter()
        .map(|n| {
            known
                .iter()
                .find(|a| a.nick.eq_ignore_ascii_case(n.trim()))
                .cloned()
                .unwrap_or_else(|| TrackedAthlete {
                    nick: s!(n.trim()),
                    full_name: s!(n.trim()),
                    mso_id: s!(),
                    discipline: Discipline::Womens,
                    color: [0x80, 0x80, 0x80],
                })
        })
        .collect()
}

/// MyMeetScores meet id for a meet name, if the meet is covered.
pub fn mms_meet_id(meet: &str) -> Option<&'static str> {
    MMS_MEET_IDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(meet.trim()))
        .map(|(_, id)| *id)
        .filter(|id| !id.is_empty())
}

#[derive(Clone, Debug, PartialEq)]
pub struct HarvestOptions {
    pub athletes: Vec<TrackedAthlete>,
    /// Fetch athlete profiles over the network.
    pub network: bool,
    /// Also collect full-session score tables.
    pub sessions: bool,
    pub pages_dir: PathBuf,
    pub raw_out: PathBuf,
    pub session_out: PathBuf,
    /// Canonical history used to find (meet, session) pairs for session lookups.
    pub history: PathBuf,
    pub season: String,
    pub pause: Duration,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            athletes: default_athletes(),
            network: true,
            sessions: true,
            pages_dir: PathBuf::from(SAVED_PAGES_DIR),
            raw_out: PathBuf::from(RAW_HISTORY_FILE),
            session_out: PathBuf::from(SESSION_RAW_FILE),
            history: PathBuf::from(CLEANED_FILE),
            season: s!(SEASON),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub input: PathBuf,
    /// Canonical repository the normalized rows are merged into.
    pub into: PathBuf,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(RAW_HISTORY_FILE),
            into: PathBuf::from(CLEANED_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsOptions {
    pub input: PathBuf,
    pub out: PathBuf,
    /// Keep rows whose Date contains this text. `None` keeps everything.
    pub season: Option<String>,
    /// Empty list means every athlete in the input.
    pub athletes: Vec<TrackedAthlete>,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(SESSION_RAW_FILE),
            out: PathBuf::from(ANALYTICS_FILE),
            season: Some(s!(SEASON)),
            athletes: default_athletes(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardOptions {
    pub cleaned: PathBuf,
    pub analytics: PathBuf,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            cleaned: PathBuf::from(CLEANED_FILE),
            analytics: PathBuf::from(ANALYTICS_FILE),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub harvest: HarvestOptions,
    pub normalize: NormalizeOptions,
    pub analytics: AnalyticsOptions,
    pub dashboard: DashboardOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            harvest: HarvestOptions::default(),
            normalize: NormalizeOptions::default(),
            analytics: AnalyticsOptions::default(),
            dashboard: DashboardOptions::default(),
        }
    }
}

impl AppOptions {
    /// Re-root every relative file path under `dir`.
    pub fn rooted_at(mut self, dir: &Path) -> Self {
        let root = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        root(&mut self.harvest.pages_dir);
        root(&mut self.harvest.raw_out);
        root(&mut self.harvest.session_out);
        root(&mut self.harvest.history);
        root(&mut self.normalize.input);
        root(&mut self.normalize.into);
        root(&mut self.analytics.input);
        root(&mut self.analytics.out);
        root(&mut self.dashboard.cleaned);
        root(&mut self.dashboard.analytics);
        self
    }
}
