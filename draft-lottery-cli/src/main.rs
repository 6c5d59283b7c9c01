mod common;
mod logic;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use draft_lottery::{DraftLottery, DrawLimits, LeagueLoader, SecureChoice, os_entropy};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use common::{drawn_at, split_csv};
use logic::{LeagueOrigin, LeagueSource, reports};

#[derive(Debug, Parser)]
#[command(name = "draft-lottery", version = "0.1.0")]
#[command(
    about = "Weighted fantasy draft lottery drawn from operating-system entropy"
)]
struct Args {
    /// League definition file (JSON); the built-in sample league is used when omitted
    #[arg(long, conflicts_with = "teams")]
    league: Option<PathBuf>,

    /// Inline teams as NAME=PERCENT pairs (comma-separated)
    #[arg(long)]
    teams: Option<String>,

    /// League name for inline teams
    #[arg(long, default_value = "League", requires = "teams")]
    name: String,

    /// Ticket total the percentages are scaled onto (default 1,000,000)
    #[arg(long)]
    total_tickets: Option<u64>,

    /// Run this many lotteries and report aggregate odds instead of a single draw
    #[arg(long, default_value_t = 0)]
    trials: u64,

    /// Abort a lottery that needs more than this many draws
    #[arg(long)]
    max_draws: Option<u64>,

    /// List each team's single-draw odds and exit
    #[arg(long)]
    list_odds: bool,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output (prints every draw)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.output.is_some() {
        colored::control::set_override(false);
    }

    // Render fully before touching --output so a failed run leaves it intact.
    let mut report = Vec::new();
    let source = league_source(&args);
    if !maybe_list_odds(&args, &source, &mut report)? {
        if args.report == "console" {
            announce_banner(&mut report)?;
        }
        let lottery = DraftLottery::new(source, draw_limits(&args));
        run_lottery(&args, &lottery, &mut os_entropy(), &mut report)?;
    }

    let mut output_target = OutputTarget::new(args.output.clone())?;
    output_target.write_all(&report)?;
    output_target.flush_inner()?;
    Ok(())
}

fn league_source(args: &Args) -> LeagueSource {
    let origin = if let Some(path) = &args.league {
        LeagueOrigin::File(path.clone())
    } else if let Some(teams) = &args.teams {
        LeagueOrigin::Inline {
            name: args.name.clone(),
            specs: split_csv(teams),
        }
    } else {
        LeagueOrigin::Sample
    };
    LeagueSource::new(origin, args.total_tickets)
}

const fn draw_limits(args: &Args) -> DrawLimits {
    DrawLimits {
        max_draws: args.max_draws,
    }
}

fn maybe_list_odds(args: &Args, source: &LeagueSource, out: &mut dyn Write) -> Result<bool> {
    if !args.list_odds {
        return Ok(false);
    }
    let league = source.load_league()?;
    let table = league
        .weight_table()
        .with_context(|| format!("league {:?} is invalid", league.name))?;
    let odds = table.odds();
    match args.report.as_str() {
        "json" => reports::generate_json_odds_report(out, &league.name, &odds)?,
        "markdown" => reports::generate_markdown_odds_report(out, &league.name, &odds)?,
        "csv" => reports::generate_csv_odds_report(out, &odds)?,
        _ => reports::generate_console_odds_report(out, &league.name, &odds)?,
    }
    Ok(true)
}

fn announce_banner(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", "🎟️  Fantasy Draft Lottery".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;
    Ok(())
}

fn run_lottery<S>(
    args: &Args,
    lottery: &DraftLottery<LeagueSource>,
    source: &mut S,
    out: &mut dyn Write,
) -> Result<()>
where
    S: SecureChoice + ?Sized,
{
    if args.trials > 0 {
        let trials = lottery
            .simulate(args.trials, source)
            .context("lottery simulation failed")?;
        log::info!("simulated {} lotteries for {}", args.trials, trials.league);
        match args.report.as_str() {
            "json" => reports::generate_json_trials_report(out, &trials)?,
            "markdown" => reports::generate_markdown_trials_report(out, &trials)?,
            "csv" => reports::generate_csv_trials_report(out, &trials)?,
            _ => reports::generate_console_trials_report(out, &trials)?,
        }
    } else {
        let draw = lottery.draw(source).context("lottery draw failed")?;
        let stamp = drawn_at();
        log::info!(
            "{} draft order set after {} draws",
            draw.league,
            draw.outcome.draw_count
        );
        match args.report.as_str() {
            "json" => reports::generate_json_draw_report(out, &draw, &stamp)?,
            "markdown" => reports::generate_markdown_draw_report(out, &draw, &stamp)?,
            "csv" => reports::generate_csv_draw_report(out, &draw)?,
            _ => reports::generate_console_draw_report(out, &draw, &stamp, args.verbose)?,
        }
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn base_args() -> Args {
        Args {
            league: None,
            teams: None,
            name: "League".to_string(),
            total_tickets: None,
            trials: 0,
            max_draws: None,
            list_odds: false,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    fn run_to_string(args: &Args) -> Result<String> {
        let lottery = DraftLottery::new(league_source(args), draw_limits(args));
        let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
        let mut buf = Vec::new();
        run_lottery(args, &lottery, &mut rng, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    #[test]
    fn args_parse_inline_teams_and_flags() {
        let args = Args::try_parse_from([
            "draft-lottery",
            "--teams",
            "Aces=90,Bats=10",
            "--trials",
            "25",
            "--max-draws",
            "500",
            "--report",
            "csv",
        ])
        .unwrap();
        assert_eq!(args.trials, 25);
        assert_eq!(draw_limits(&args), DrawLimits::capped(500));
        assert_eq!(
            league_source(&args).origin,
            LeagueOrigin::Inline {
                name: "League".to_string(),
                specs: vec!["Aces=90".to_string(), "Bats=10".to_string()],
            }
        );
    }

    #[test]
    fn args_reject_league_file_with_inline_teams() {
        let parsed = Args::try_parse_from([
            "draft-lottery",
            "--league",
            "league.json",
            "--teams",
            "Aces=100",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn args_reject_unknown_report_format() {
        assert!(Args::try_parse_from(["draft-lottery", "--report", "xml"]).is_err());
    }

    #[test]
    fn league_source_defaults_to_sample() {
        let source = league_source(&base_args());
        assert_eq!(source.origin, LeagueOrigin::Sample);
        assert_eq!(source.total_tickets, None);
    }

    #[test]
    fn maybe_list_odds_writes_output() {
        let args = Args {
            list_odds: true,
            report: "console".to_string(),
            ..base_args()
        };
        let mut buf = Vec::new();
        assert!(maybe_list_odds(&args, &league_source(&args), &mut buf).unwrap());
        let content = String::from_utf8(buf).unwrap();
        assert!(content.contains("Lottery odds for Sample League"));
        assert!(content.contains("25.00%"));
    }

    #[test]
    fn maybe_list_odds_follows_report_format() {
        let args = Args {
            list_odds: true,
            ..base_args()
        };
        let mut buf = Vec::new();
        assert!(maybe_list_odds(&args, &league_source(&args), &mut buf).unwrap());
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["league"], "Sample League");
        assert_eq!(value["odds"].as_array().map(Vec::len), Some(10));

        let csv_args = Args {
            report: "csv".to_string(),
            ..args
        };
        let mut buf = Vec::new();
        assert!(maybe_list_odds(&csv_args, &league_source(&csv_args), &mut buf).unwrap());
        let content = String::from_utf8(buf).unwrap();
        assert!(content.starts_with("team,tickets,odds"));
        assert_eq!(content.lines().count(), 11);
    }

    #[test]
    fn args_reject_name_without_inline_teams() {
        let parsed = Args::try_parse_from(["draft-lottery", "--name", "Keepers"]);
        assert!(parsed.is_err());
        let parsed =
            Args::try_parse_from(["draft-lottery", "--teams", "Aces=100", "--name", "Keepers"]);
        assert_eq!(parsed.unwrap().name, "Keepers");
    }

    #[test]
    fn maybe_list_odds_returns_false_when_disabled() {
        let args = base_args();
        let mut buf = Vec::new();
        assert!(!maybe_list_odds(&args, &league_source(&args), &mut buf).unwrap());
        assert!(buf.is_empty());
    }

    #[test]
    fn run_lottery_emits_json_draw() {
        let args = Args {
            teams: Some("Aces=90,Bats=10".to_string()),
            ..base_args()
        };
        let content = run_to_string(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["outcome"]["order"].as_array().map(Vec::len), Some(2));
        assert!(value["outcome"]["draw_count"].as_u64().unwrap() >= 2);
        assert!(value["drawn_at"].is_string());
    }

    #[test]
    fn run_lottery_emits_trial_summary() {
        let args = Args {
            trials: 50,
            report: "markdown".to_string(),
            ..base_args()
        };
        let content = run_to_string(&args).unwrap();
        assert!(content.contains("# Sample League Lottery Simulation"));
        assert!(content.contains("**Trials**: 50"));
    }

    #[test]
    fn run_lottery_reports_invalid_input() {
        let args = Args {
            teams: Some("Aces=100,Bats=0".to_string()),
            ..base_args()
        };
        let err = run_to_string(&args).unwrap_err();
        assert!(format!("{err:#}").contains("non-positive weight"));
    }

    #[test]
    fn run_lottery_reports_draw_cap() {
        let args = Args {
            max_draws: Some(1),
            ..base_args()
        };
        let err = run_to_string(&args).unwrap_err();
        assert!(format!("{err:#}").contains("draw limit of 1 reached"));
    }

    #[test]
    fn output_target_writes_file() {
        let temp = std::env::temp_dir().join("draft-lottery-output-target.txt");
        let mut target = OutputTarget::new(Some(temp.clone())).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
        assert_eq!(std::fs::read_to_string(temp).unwrap(), "ok");
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }
}
