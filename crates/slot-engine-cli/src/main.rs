//! `slots` CLI: find open meeting slots from a calendar export.
//!
//! ## Usage
//!
//! ```sh
//! # Find slots with install defaults, events piped from a provider export
//! cat events.json | slots find --start 2024-06-03
//!
//! # Use a settings file and override the slot count
//! slots find -s settings.toml -e events.json --slots 5 --spread 3
//!
//! # Machine-readable output, Japanese labels
//! slots find -s settings.toml -e events.json --format json --lang ja
//!
//! # Event-creation payloads for the found slots
//! slots book -s settings.toml -e events.json --name "Project sync"
//!
//! # Inspect the quantized busy blocks
//! slots busy -e events.json --timezone Asia/Tokyo
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` for more detail.

mod settings;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::clock::minutes_to_hhmm;
use slot_engine::{CalendarEvent, Language, TimeBlock};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "slots", version, about = "Find open meeting slots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Find available slots
    Find {
        #[command(flatten)]
        search: SearchArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Language for weekday names (en, ja); defaults to the settings file
        #[arg(long)]
        lang: Option<String>,
    },
    /// Find available slots and print event-creation payloads as JSON
    Book {
        #[command(flatten)]
        search: SearchArgs,
        /// Base meeting name; each request is numbered "<name> (i/n)"
        #[arg(long)]
        name: String,
    },
    /// Print the quantized busy blocks that fall inside the search horizon
    Busy {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        events: Option<PathBuf>,
        /// Settings TOML file (timezone, start date and day count are used)
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// IANA timezone, e.g. "Asia/Tokyo"
        #[arg(long)]
        timezone: Option<String>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Settings TOML file (install defaults if omitted)
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Events JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    events: Option<PathBuf>,
    /// First date to search, YYYY-MM-DD (defaults to today in the timezone)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Number of days to search
    #[arg(long)]
    days: Option<u32>,
    /// Minimum slot duration in minutes
    #[arg(long)]
    min: Option<u32>,
    /// Maximum slot duration in minutes
    #[arg(long)]
    max: Option<u32>,
    /// Number of slots to return
    #[arg(long)]
    slots: Option<usize>,
    /// Number of distinct days to spread slots over
    #[arg(long)]
    spread: Option<usize>,
    /// IANA timezone, e.g. "Asia/Tokyo"
    #[arg(long)]
    timezone: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// A found slot as printed by `find --format json`.
#[derive(Serialize)]
struct SlotOutput {
    #[serde(flatten)]
    slot: TimeBlock,
    start_time: String,
    end_time: String,
    label: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find {
            search,
            format,
            lang,
        } => {
            let (settings, slots) = run_search(&search)?;
            let lang = lang
                .as_deref()
                .map(Language::from_code)
                .unwrap_or(settings.language);
            match format {
                OutputFormat::Text => print_text(&slots, lang),
                OutputFormat::Json => print_json(&slots, lang)?,
            }
        }
        Commands::Book { search, name } => {
            let (settings, slots) = run_search(&search)?;
            let requests = slot_engine::booking::event_requests(&slots, &name, settings.timezone)
                .context("Failed to build booking requests")?;
            println!("{}", serde_json::to_string_pretty(&requests)?);
        }
        Commands::Busy {
            events,
            settings,
            timezone,
        } => {
            let mut settings = Settings::load(settings.as_deref())?;
            if let Some(tz) = timezone.as_deref() {
                settings.timezone = parse_timezone(tz)?;
            }
            let today = Utc::now().with_timezone(&settings.timezone).date_naive();
            let horizon = settings.to_policy(today)?.horizon();
            let events = read_events(events.as_deref())?;
            let busy = slot_engine::busy::busy_blocks_within(&events, settings.timezone, &horizon);
            println!("{}", serde_json::to_string_pretty(&busy)?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Load settings, apply flags, read events, and run the slot search.
fn run_search(args: &SearchArgs) -> Result<(Settings, Vec<TimeBlock>)> {
    let mut settings = Settings::load(args.settings.as_deref())?;
    let timezone = args.timezone.as_deref().map(parse_timezone).transpose()?;
    settings.apply(&Overrides {
        start_date: args.start,
        num_days: args.days,
        min_duration: args.min,
        max_duration: args.max,
        num_slots: args.slots,
        spread_days: args.spread,
        timezone,
    });

    let today = Utc::now().with_timezone(&settings.timezone).date_naive();
    let policy = settings.to_policy(today)?;
    let events = read_events(args.events.as_deref())?;

    let slots = slot_engine::find_available_slots(&policy, &events);
    info!(
        start = %policy.search_start_date,
        days = policy.num_days_to_search,
        events = events.len(),
        found = slots.len(),
        "slot search finished"
    );
    Ok((settings, slots))
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))
}

fn read_events(path: Option<&std::path::Path>) -> Result<Vec<CalendarEvent>> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events file: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read events from stdin")?;
            buf
        }
    };
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    slot_engine::parse_events_json(&json).context("Failed to parse events JSON")
}

fn print_text(slots: &[TimeBlock], lang: Language) {
    if slots.is_empty() {
        println!("No available slots found. Try adjusting your settings.");
        return;
    }
    println!("{}", slot_engine::format_slots(slots, lang));
}

fn print_json(slots: &[TimeBlock], lang: Language) -> Result<()> {
    let out: Vec<SlotOutput> = slots
        .iter()
        .map(|slot| SlotOutput {
            slot: *slot,
            start_time: minutes_to_hhmm(slot.start()),
            end_time: minutes_to_hhmm(slot.end()),
            label: slot_engine::format_slot(slot, lang),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
