// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::consts::*;
use crate::config::options::{
    AnalyticsOptions, AppOptions, HarvestOptions, NormalizeOptions, athletes_named, default_athletes,
};
use crate::progress::Progress;
use crate::runner;

#[derive(Parser, Debug)]
#[command(
    name = "allaround-cli",
    version,
    about = "Harvest, normalize and analyze family gymnastics scores"
)]
pub struct Cli {
    /// Directory the data files live in.
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect raw score rows from the sites and the saved pages folder.
    Harvest(HarvestArgs),
    /// Normalize a raw file and merge it into the cleaned history.
    Normalize(NormalizeArgs),
    /// Compute session context for the tracked athletes.
    Analyze(AnalyzeArgs),
    /// Harvest, normalize and analyze in sequence.
    Run(RunArgs),
    /// List the meet name → MyMeetScores id map.
    Meets,
}

#[derive(Args, Debug, Clone)]
pub struct HarvestArgs {
    /// Limit to these athletes (nickname). Repeatable.
    #[arg(long = "athlete")]
    pub athletes: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub no_network: bool,

    #[arg(long, default_value = SAVED_PAGES_DIR)]
    pub pages: PathBuf,

    #[arg(long, default_value = RAW_HISTORY_FILE)]
    pub out: PathBuf,

    /// Also collect full-session tables.
    #[arg(long, default_value_t = false)]
    pub sessions: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(long, default_value = RAW_HISTORY_FILE)]
    pub input: PathBuf,

    #[arg(long, default_value = CLEANED_FILE)]
    pub into: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(long, default_value = SESSION_RAW_FILE)]
    pub input: PathBuf,

    #[arg(long, default_value = ANALYTICS_FILE)]
    pub out: PathBuf,

    #[arg(long, default_value = SEASON)]
    pub season: String,

    /// Context for every athlete in the file, not just the tracked ones.
    #[arg(long, default_value_t = false)]
    pub all_athletes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Fetch profiles and sessions over the network (default: saved pages only).
    #[arg(long, default_value_t = false)]
    pub network: bool,

    #[arg(long = "athlete")]
    pub athletes: Vec<String>,
}

/// Prints progress lines to stderr.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_failed(&mut self, unit: &str, reason: &str) {
        eprintln!("  ✗ {unit}: {reason}");
    }
}

fn roster(nicks: &[String]) -> Vec<crate::config::options::TrackedAthlete> {
    if nicks.is_empty() { default_athletes() } else { athletes_named(nicks) }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    execute(cli)
}

pub fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let at = |p: PathBuf| if p.is_relative() { cli.dir.join(p) } else { p };
    let mut progress = ConsoleProgress;

    match cli.command {
        Commands::Harvest(a) => {
            let defaults = AppOptions::default().rooted_at(&cli.dir).harvest;
            let opts = HarvestOptions {
                athletes: roster(&a.athletes),
                network: !a.no_network,
                sessions: a.sessions,
                pages_dir: at(a.pages),
                raw_out: at(a.out),
                ..defaults
            };
            let summary = runner::harvest(&opts, &mut progress)?;
            for path in &summary.written {
                println!("wrote {}", path.display());
            }
            println!("{}", summary.report.summary());
        }
        Commands::Normalize(a) => {
            let opts = NormalizeOptions { input: at(a.input), into: at(a.into) };
            let (merge, report) = runner::normalize(&opts, &mut progress)?;
            println!(
                "read {} rows ({} dropped, {} cells defaulted); existing {}, incoming {}, kept {}, duplicates removed {}",
                report.rows_in,
                report.dropped_rows,
                report.defaulted_cells,
                merge.existing,
                merge.incoming,
                merge.kept,
                merge.duplicates_removed
            );
        }
        Commands::Analyze(a) => {
            let opts = AnalyticsOptions {
                input: at(a.input),
                out: at(a.out.clone()),
                season: if a.season.is_empty() { None } else { Some(a.season) },
                athletes: if a.all_athletes { Vec::new() } else { default_athletes() },
            };
            let report = runner::analyze(&opts, &mut progress)?;
            println!(
                "{} rows used, {} session stats, {} baselines, {} records ({} skipped) → {}",
                report.rows_used,
                report.sessions,
                report.baselines,
                report.records,
                report.skipped,
                opts.out.display()
            );
        }
        Commands::Run(a) => {
            let mut opts = AppOptions::default().rooted_at(&cli.dir);
            opts.harvest.network = a.network;
            opts.harvest.athletes = roster(&a.athletes);
            opts.analytics.athletes = opts.harvest.athletes.clone();
            let summary = runner::run_all(&opts, &mut progress)?;
            println!(
                "harvest: {}; history kept {}; analytics records {}",
                summary.harvest.report.summary(),
                summary.merge.kept,
                summary.analytics.records
            );
        }
        Commands::Meets => {
            for &(name, id) in MMS_MEET_IDS {
                let id = if id.is_empty() { "-" } else { id };
                println!("{name},{id}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from(["allaround-cli", "analyze", "--season", "2025", "--all-athletes"]).unwrap();
        match cli.command {
            Commands::Analyze(a) => {
                assert_eq!(a.season, "2025");
                assert!(a.all_athletes);
                assert_eq!(a.out, PathBuf::from(ANALYTICS_FILE));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn repeatable_athletes() {
        let cli = Cli::try_parse_from(["allaround-cli", "harvest", "--athlete", "Ansel", "--athlete", "Azalea", "--no-network"])
            .unwrap();
        match cli.command {
            Commands::Harvest(a) => {
                assert_eq!(roster(&a.athletes).len(), 2);
                assert!(a.no_network);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
