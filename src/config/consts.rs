// src/config/consts.rs
use crate::model::Discipline;

// Net config
pub const MSO_HOST: &str = "https://www.meetscoresonline.com";
pub const MSO_PROFILE_PREFIX: &str = "/Athlete.MyScores/";
pub const MSO_RESULTS_MARKER: &str = "/results/";
pub const MMS_HOST: &str = "https://www.mymeetscores.com";
pub const MMS_SESSION_PATH: &str = "/meet.pl";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 20;
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Local cache
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Data files
pub const RAW_HISTORY_FILE: &str = "gymnastics_history.csv";
pub const SESSION_RAW_FILE: &str = "session_raw_data.csv";
pub const CLEANED_FILE: &str = "cleaned_gymnastics.csv";
pub const ANALYTICS_FILE: &str = "session_context_analytics.csv";
pub const SAVED_PAGES_DIR: &str = "saved_pages";
pub const SESSION_PAGE_SUFFIX: &str = "_session.html";

// Season
pub const SEASON: &str = "2026";
pub const BANNER_MARKER: &str = "LIVE RESULTS";

// Dashboard
pub const JSI_MOOD_THRESHOLD: f64 = 0.15;
pub const BULLET_AXIS_MIN: f64 = 7.0;
pub const BULLET_AXIS_MAX: f64 = 10.0;
pub const STAR_GOLD: [u8; 3] = [0xFF, 0xD7, 0x00];

pub struct Athlete {
    pub nick: &'static str,
    pub full_name: &'static str,
    pub mso_id: &'static str,
    pub discipline: Discipline,
    pub color: [u8; 3],
}

pub const ATHLETES: &[Athlete] = &[
    Athlete {
        nick: "Annabelle",
        full_name: "Annabelle Sheehy",
        mso_id: "1314119",
        discipline: Discipline::Womens,
        color: [0xFF, 0x69, 0xB4],
    },
    Athlete {
        nick: "Azalea",
        full_name: "Azalea Sheehy",
        mso_id: "1194621",
        discipline: Discipline::Womens,
        color: [0x93, 0x70, 0xDB],
    },
    Athlete {
        nick: "Ansel",
        full_name: "Ansel Sheehy",
        mso_id: "1306508",
        discipline: Discipline::Mens,
        color: [0x00, 0x80, 0x80],
    },
];

// Meet name → MyMeetScores meet id. Empty id means the meet is not covered.
pub const MMS_MEET_IDS: &[(&str, &str)] = &[
    ("2026 Rose Gold Classic", "93352"),
    ("2026 Golden State Classic", "93657"),
    ("2026 Mardi Gras Invitational", ""),
];
