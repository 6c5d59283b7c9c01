use anyhow::Result;
use colored::Colorize;
use draft_lottery::{LeagueDraw, LeagueTrials, TeamOdds};
use serde::Serialize;
use std::io::Write;

use crate::common::csv_field;

#[derive(Serialize)]
struct DrawReport<'a> {
    drawn_at: &'a str,
    #[serde(flatten)]
    draw: &'a LeagueDraw,
}

#[derive(Serialize)]
struct OddsReport<'a> {
    league: &'a str,
    total_tickets: u64,
    odds: &'a [TeamOdds],
}

fn percent(share: f64) -> f64 {
    share * 100.0
}

pub fn generate_console_odds_report(
    out: &mut dyn Write,
    league: &str,
    odds: &[TeamOdds],
) -> Result<()> {
    writeln!(out, "Lottery odds for {league}:")?;
    for entry in odds {
        writeln!(
            out,
            "  {:25} {:>10} tickets  {:>6.2}%",
            entry.team,
            entry.tickets,
            percent(entry.probability)
        )?;
    }
    Ok(())
}

pub fn generate_json_odds_report(out: &mut dyn Write, league: &str, odds: &[TeamOdds]) -> Result<()> {
    let report = OddsReport {
        league,
        total_tickets: odds.iter().map(|entry| entry.tickets).sum(),
        odds,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_odds_report(
    out: &mut dyn Write,
    league: &str,
    odds: &[TeamOdds],
) -> Result<()> {
    writeln!(out, "# {league} Lottery Odds
")?;
    writeln!(out, "| Team | Tickets | Odds |")?;
    writeln!(out, "| --- | ---: | ---: |")?;
    for entry in odds {
        writeln!(
            out,
            "| {} | {} | {:.2}% |",
            entry.team,
            entry.tickets,
            percent(entry.probability)
        )?;
    }
    Ok(())
}

pub fn generate_csv_odds_report(out: &mut dyn Write, odds: &[TeamOdds]) -> Result<()> {
    writeln!(out, "team,tickets,odds")?;
    for entry in odds {
        writeln!(
            out,
            "{},{},{:.6}",
            csv_field(&entry.team),
            entry.tickets,
            entry.probability
        )?;
    }
    Ok(())
}

pub fn generate_console_draw_report(
    out: &mut dyn Write,
    draw: &LeagueDraw,
    drawn_at: &str,
    verbose: bool,
) -> Result<()> {
    let outcome = &draw.outcome;
    writeln!(out)?;
    writeln!(out, "{}", "🏈 Draft Order".bright_cyan().bold())?;
    writeln!(out, "{}", "==============".cyan())?;
    writeln!(out, "League: {}", draw.league.bold())?;
    writeln!(out, "Drawn at: {drawn_at}")?;
    writeln!(out)?;

    for (pick, team) in outcome.order.iter().enumerate() {
        let odds = draw
            .odds
            .iter()
            .find(|entry| &entry.team == team)
            .map_or(0.0, |entry| percent(entry.probability));
        writeln!(
            out,
            "  {:>2}. {:25} ({odds:.2}% odds)",
            pick + 1,
            team.green()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Draws: {} ({} repeats discarded)",
        outcome.draw_count.to_string().bright_yellow(),
        outcome.repeat_draws()
    )?;

    if verbose {
        writeln!(out)?;
        writeln!(out, "{}", "🎟️  Draw Trace".bright_yellow().bold())?;
        for (number, record) in outcome.trace.iter().enumerate() {
            match record.slot {
                Some(slot) => writeln!(
                    out,
                    "  #{:<4} {} -> pick {}",
                    number + 1,
                    record.team,
                    slot + 1
                )?,
                None => writeln!(
                    out,
                    "  #{:<4} {} (already placed)",
                    number + 1,
                    record.team.dimmed()
                )?,
            }
        }
    }
    Ok(())
}

pub fn generate_json_draw_report(out: &mut dyn Write, draw: &LeagueDraw, drawn_at: &str) -> Result<()> {
    let report = DrawReport { drawn_at, draw };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_draw_report(
    out: &mut dyn Write,
    draw: &LeagueDraw,
    drawn_at: &str,
) -> Result<()> {
    writeln!(out, "# {} Draft Lottery\n", draw.league)?;
    writeln!(out, "- **Drawn at**: {drawn_at}")?;
    writeln!(out, "- **Tickets in pool**: {}", draw.total_tickets)?;
    writeln!(out, "- **Draws**: {}", draw.outcome.draw_count)?;
    writeln!(out, "- **Repeats discarded**: {}\n", draw.outcome.repeat_draws())?;
    writeln!(out, "## Draft Order\n")?;
    writeln!(out, "| Pick | Team | Odds |")?;
    writeln!(out, "| ---: | --- | ---: |")?;
    for (pick, team) in draw.outcome.order.iter().enumerate() {
        let odds = draw
            .odds
            .iter()
            .find(|entry| &entry.team == team)
            .map_or(0.0, |entry| percent(entry.probability));
        writeln!(out, "| {} | {} | {odds:.2}% |", pick + 1, team)?;
    }
    Ok(())
}

pub fn generate_csv_draw_report(out: &mut dyn Write, draw: &LeagueDraw) -> Result<()> {
    writeln!(out, "pick,team,tickets,odds")?;
    for (pick, team) in draw.outcome.order.iter().enumerate() {
        let (tickets, odds) = draw
            .odds
            .iter()
            .find(|entry| &entry.team == team)
            .map_or((0, 0.0), |entry| (entry.tickets, entry.probability));
        writeln!(
            out,
            "{},{},{tickets},{odds:.6}",
            pick + 1,
            csv_field(team)
        )?;
    }
    Ok(())
}

pub fn generate_console_trials_report(out: &mut dyn Write, trials: &LeagueTrials) -> Result<()> {
    let summary = &trials.summary;
    writeln!(out)?;
    writeln!(out, "{}", "📊 Lottery Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=============================".cyan())?;
    writeln!(out, "League: {}", trials.league.bold())?;
    writeln!(out, "Trials: {}", summary.trials)?;
    writeln!(
        out,
        "Draws per lottery: mean {:.2}, std {:.2}, min {}, max {}",
        summary.mean_draws, summary.std_draws, summary.min_draws, summary.max_draws
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "  {:25} {:>9} {:>9} {:>9}",
        "Team", "Expected", "1st pick", "Avg slot"
    )?;
    for team in &summary.teams {
        writeln!(
            out,
            "  {:25} {:>8.2}% {:>8.2}% {:>9.2}",
            team.team,
            percent(team.expected_first_pick),
            percent(team.first_pick_rate),
            team.mean_slot
        )?;
    }
    writeln!(out)?;
    let deviation = percent(summary.max_first_pick_deviation());
    let label = format!("{deviation:.2}%");
    let label = if deviation <= 1.0 {
        label.green()
    } else {
        label.yellow()
    };
    writeln!(out, "Largest first-pick deviation: {label}")?;
    Ok(())
}

pub fn generate_json_trials_report(out: &mut dyn Write, trials: &LeagueTrials) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, trials)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_trials_report(out: &mut dyn Write, trials: &LeagueTrials) -> Result<()> {
    let summary = &trials.summary;
    writeln!(out, "# {} Lottery Simulation\n", trials.league)?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Trials**: {}", summary.trials)?;
    writeln!(out, "- **Mean draws**: {:.2}", summary.mean_draws)?;
    writeln!(out, "- **Max draws**: {}\n", summary.max_draws)?;
    writeln!(out, "## Teams\n")?;
    writeln!(out, "| Team | Tickets | Expected 1st | Observed 1st | Avg slot |")?;
    writeln!(out, "| --- | ---: | ---: | ---: | ---: |")?;
    for team in &summary.teams {
        writeln!(
            out,
            "| {} | {} | {:.2}% | {:.2}% | {:.2} |",
            team.team,
            team.tickets,
            percent(team.expected_first_pick),
            percent(team.first_pick_rate),
            team.mean_slot
        )?;
    }
    Ok(())
}

pub fn generate_csv_trials_report(out: &mut dyn Write, trials: &LeagueTrials) -> Result<()> {
    let teams = trials.summary.teams.len();
    let slot_headers: Vec<String> = (1..=teams).map(|slot| format!("slot_{slot}")).collect();
    writeln!(
        out,
        "team,tickets,expected_first_pick,first_picks,first_pick_rate,mean_slot,{}",
        slot_headers.join(",")
    )?;
    for team in &trials.summary.teams {
        let slots: Vec<String> = team.slot_counts.iter().map(u64::to_string).collect();
        writeln!(
            out,
            "{},{},{:.6},{},{:.6},{:.4},{}",
            csv_field(&team.team),
            team.tickets,
            team.expected_first_pick,
            team.first_picks,
            team.first_pick_rate,
            team.mean_slot,
            slots.join(",")
        )?;
    }
    Ok(())
}
