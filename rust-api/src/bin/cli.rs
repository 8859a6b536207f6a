//! Sweddy CLI - poll live stats and inspect bet progress from the terminal

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use sweddy::cache::PlayerCache;
use sweddy::core::{
    block_size_of, format_stat_label, leg_state, progress_pct, stats_for_league, to_views,
    BetStatus, LegState, SortMode, SortType, SweatAlert,
};
use sweddy::enrich::enrich_bets;
use sweddy::error::validate_bet_request;
use sweddy::feed::{EspnClient, FeedConfig};
use sweddy::models::{Bet, BetLeg, BetRequest, BetView, Direction, League};
use sweddy::store::{is_valid_room_id, BetStore};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_SNAPSHOT: &str = "data/players.json";

#[derive(Parser)]
#[command(name = "sweddy")]
#[command(author, version, about = "Live parlay tracker CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Build a bet interactively and save it to a room
    #[arg(short, long)]
    interactive: bool,

    /// Path to the data directory (rooms live under it)
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Player snapshot written by `poll`
    #[arg(long, default_value = DEFAULT_SNAPSHOT)]
    snapshot: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one league's boxscores once into the snapshot
    Poll {
        /// League: nba or nfl
        #[arg(short, long, default_value = "nba")]
        league: League,

        /// Game date (YYYYMMDD); today's scoreboard when omitted
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Rank bets against the snapshot
    Rank {
        /// Room to read bets from
        #[arg(short, long)]
        room: Option<String>,

        /// JSON file with an array of bets, instead of a room
        #[arg(short, long)]
        bets: Option<PathBuf>,

        /// completion, bet, payout or none
        #[arg(short, long, default_value = "completion")]
        sort: SortMode,
    },

    /// List tracked stats and their block sizes
    Stats {
        /// League: nba or nfl
        #[arg(short, long, default_value = "nba")]
        league: League,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!(
        "{}",
        format!("Sweddy CLI v{}", env!("CARGO_PKG_VERSION")).cyan().bold()
    );
    println!();

    if cli.interactive {
        run_interactive(&cli.data_dir, &cli.snapshot)?;
    } else if let Some(command) = cli.command {
        match command {
            Commands::Poll { league, date } => {
                run_poll(&cli.snapshot, league, date)?;
            }
            Commands::Rank { room, bets, sort } => {
                let bets = match (room, bets) {
                    (Some(room), None) => load_room(&cli.data_dir, &room)?,
                    (None, Some(path)) => load_bets_file(&path)?,
                    _ => bail!("Pass exactly one of --room or --bets"),
                };
                run_rank(&cli.snapshot, bets, sort)?;
            }
            Commands::Stats { league } => {
                list_stats(league);
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<PlayerCache> {
    if !path.exists() {
        println!(
            "{}: no snapshot at {:?}, all values read as 0",
            "Warning".yellow(),
            path
        );
        return Ok(PlayerCache::new());
    }
    PlayerCache::load(path).with_context(|| format!("Failed to load snapshot from {:?}", path))
}

fn load_room(data_dir: &Path, room: &str) -> Result<Vec<Bet>> {
    let store = BetStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {:?}", data_dir))?;
    store
        .bets(room)
        .with_context(|| format!("Failed to load room {}", room))
}

fn load_bets_file(path: &Path) -> Result<Vec<Bet>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bets from {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid bets JSON in {:?}", path))
}

fn run_poll(snapshot: &Path, league: League, date: Option<String>) -> Result<()> {
    if let Some(d) = &date {
        if d.len() != 8 || !d.chars().all(|c| c.is_ascii_digit()) {
            bail!("Date must be YYYYMMDD, got {}", d);
        }
    }

    println!(
        "{}: {} {}",
        "Polling".green(),
        league,
        date.as_deref().unwrap_or("(today)")
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    let client = EspnClient::new(FeedConfig::default()).context("Failed to build HTTP client")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Fetching {} boxscores...", league));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = rt.block_on(client.poll_league(league, date.as_deref()));
    pb.finish_and_clear();

    let players = result.with_context(|| format!("Failed to poll {}", league))?;
    let count = players.len();

    let cache = if snapshot.exists() {
        load_snapshot(snapshot)?
    } else {
        PlayerCache::new()
    };
    cache.upsert_many(players);

    if let Some(parent) = snapshot.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }
    cache
        .save(snapshot)
        .with_context(|| format!("Failed to write snapshot to {:?}", snapshot))?;

    println!("{}: {:?}", "Saved".green(), snapshot);
    println!("Players updated: {} (snapshot size: {})", count, cache.len());
    Ok(())
}

fn status_label(status: BetStatus) -> ColoredString {
    match status {
        BetStatus::Won => "WON".green().bold(),
        BetStatus::Lost => "LOST".red().bold(),
        BetStatus::Active => "ACTIVE".yellow(),
    }
}

fn format_distance(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "-".to_string()
    }
}

fn print_view(view: &BetView) {
    let bet = &view.bet;
    let driver = match view.sweat.sort_type {
        SortType::Over => "over",
        SortType::Under => "under",
        SortType::None => "-",
    };
    let alert = match view.alert {
        Some(SweatAlert::Hot) => " HOT".red().bold().to_string(),
        Some(SweatAlert::Danger) => " DANGER".magenta().bold().to_string(),
        None => String::new(),
    };

    println!(
        "{:<18} {:<8} {:>8} {:>8} {:>8} {:>6}{}",
        bet.id,
        status_label(view.status),
        format_distance(view.sweat.over_distance),
        format_distance(view.sweat.under_distance),
        format_distance(view.sweat.sort_distance),
        driver,
        alert
    );
    if let (Some(stake), Some(payout)) = (bet.bet_amount, bet.payout_amount) {
        println!("    ${:.2} to win ${:.2}", stake, payout);
    }

    for leg in &bet.legs {
        let direction = match leg.leg.over_or_under {
            Direction::Over => "o",
            Direction::Under => "u",
        };
        let line = format!(
            "    {:<24} {:<16} {}{:<6} {:>6} ({:>3.0}%)",
            leg.leg.player,
            format_stat_label(&leg.leg.stat),
            direction,
            leg.leg.goal,
            leg.current,
            progress_pct(leg)
        );
        match leg_state(leg) {
            LegState::Hit => println!("{}", line.green()),
            LegState::Busted => println!("{}", line.red()),
            LegState::Pending => println!("{}", line),
        }
    }
}

fn run_rank(snapshot: &Path, bets: Vec<Bet>, sort: SortMode) -> Result<()> {
    let cache = load_snapshot(snapshot)?;
    let views = to_views(sort.apply(enrich_bets(&bets, &cache)));

    if views.is_empty() {
        println!("{}", "No bets found.".yellow());
        return Ok(());
    }

    println!("{}", "Bets:".yellow().bold());
    println!(
        "{:<18} {:<8} {:>8} {:>8} {:>8} {:>6}",
        "ID", "STATUS", "OVER", "UNDER", "SORT", "DRIVER"
    );
    println!("{}", "-".repeat(62));
    for view in &views {
        print_view(view);
    }

    let count = |s: BetStatus| views.iter().filter(|v| v.status == s).count();
    println!();
    println!(
        "Total: {} active, {} won, {} lost",
        count(BetStatus::Active),
        count(BetStatus::Won),
        count(BetStatus::Lost)
    );
    Ok(())
}

fn list_stats(league: League) {
    println!("{} {}", "Stats for".green(), league.as_str().to_uppercase());
    println!("{:<24} {:<24} {:>6}", "KEY", "LABEL", "BLOCK");
    println!("{}", "-".repeat(56));
    for stat in stats_for_league(league) {
        println!(
            "{:<24} {:<24} {:>6}",
            stat,
            format_stat_label(stat),
            block_size_of(stat)
        );
    }
}

fn parse_amount(raw: &str) -> Result<Option<f64>> {
    let raw = raw.trim().trim_start_matches('$');
    if raw.is_empty() {
        return Ok(None);
    }
    let value = raw
        .parse::<f64>()
        .with_context(|| format!("Not a number: {}", raw))?;
    Ok(Some(value))
}

fn prompt_leg(theme: &ColorfulTheme) -> Result<BetLeg> {
    let leagues = League::ALL;
    let league_names: Vec<&str> = leagues.iter().map(|l| l.as_str()).collect();
    let league = leagues[Select::with_theme(theme)
        .with_prompt("League")
        .items(&league_names)
        .default(0)
        .interact()?];

    let player: String = Input::with_theme(theme)
        .with_prompt("Player")
        .interact_text()?;

    let stats = stats_for_league(league);
    let labels: Vec<String> = stats.iter().map(|s| format_stat_label(s)).collect();
    let stat = stats[Select::with_theme(theme)
        .with_prompt("Stat")
        .items(&labels)
        .default(0)
        .interact()?];

    let over_or_under = if Select::with_theme(theme)
        .with_prompt("Over or under?")
        .items(&["Over", "Under"])
        .default(0)
        .interact()?
        == 0
    {
        Direction::Over
    } else {
        Direction::Under
    };

    let goal: f64 = Input::with_theme(theme)
        .with_prompt("Line")
        .interact_text()?;

    Ok(BetLeg {
        player: player.trim().to_string(),
        stat: stat.to_string(),
        goal,
        over_or_under,
        league,
    })
}

fn run_interactive(data_dir: &Path, snapshot: &Path) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let theme = ColorfulTheme::default();

    let room: String = Input::with_theme(&theme)
        .with_prompt("Room")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if is_valid_room_id(input.trim()) {
                Ok(())
            } else {
                Err("Use 1-64 letters, digits, '-' or '_'")
            }
        })
        .interact_text()?;
    let room = room.trim().to_string();

    let mut legs = Vec::new();
    loop {
        legs.push(prompt_leg(&theme)?);

        let next = Select::with_theme(&theme)
            .with_prompt(format!("{} leg(s) so far", legs.len()))
            .items(&["Add another leg", "Done"])
            .default(0)
            .interact()?;
        if next == 1 {
            break;
        }
    }

    let stake: String = Input::with_theme(&theme)
        .with_prompt("Bet amount (blank to skip)")
        .allow_empty(true)
        .interact_text()?;
    let payout: String = Input::with_theme(&theme)
        .with_prompt("Payout amount (blank to skip)")
        .allow_empty(true)
        .interact_text()?;

    let req = BetRequest {
        legs,
        bet_amount: parse_amount(&stake)?,
        payout_amount: parse_amount(&payout)?,
    };
    validate_bet_request(&req.legs, req.bet_amount, req.payout_amount)?;

    let store = BetStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {:?}", data_dir))?;
    let bet = store
        .create_bet(&room, req, chrono::Utc::now().timestamp_millis())
        .with_context(|| format!("Failed to save bet to room {}", room))?;

    println!();
    println!("{}: {} in room {}", "Saved".green(), bet.id, room);
    println!();

    run_rank(snapshot, vec![bet], SortMode::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("").unwrap(), None);
        assert_eq!(parse_amount("  ").unwrap(), None);
        assert_eq!(parse_amount("$12.5").unwrap(), Some(12.5));
        assert_eq!(parse_amount("40").unwrap(), Some(40.0));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(1.5), "1.50");
        assert_eq!(format_distance(f64::INFINITY), "-");
    }

    #[test]
    fn test_cli_parses_rank() {
        let cli = Cli::try_parse_from(["sweddy", "rank", "--room", "r1", "--sort", "payout"])
            .unwrap();
        match cli.command {
            Some(Commands::Rank { room, bets, sort }) => {
                assert_eq!(room.as_deref(), Some("r1"));
                assert!(bets.is_none());
                assert_eq!(sort, SortMode::Payout);
            }
            _ => panic!("expected rank"),
        }
    }
}
