//! `slots` CLI — compute bookable free slots from a busy-interval snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for the next 7 days, busy list from a file
//! slots find --busy busy.json --timezone America/Chicago --duration 30
//!
//! # Absolute window, busy list via stdin
//! cat busy.json | slots find --from 2026-03-16T05:00:00Z --to 2026-03-17T05:00:00Z --duration 60
//!
//! # Reproducible runs with a pinned clock, JSON output
//! slots find --busy busy.json --duration 30 --now 2026-03-16T11:00:00Z --format json
//! ```
//!
//! The busy file is a JSON array of `{"start": ..., "end": ...}` intervals
//! (ISO-8601, as returned by the calendar provider's freeBusy query).

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::{NaiveTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use slot_agent::SlotResponse;
use slot_engine::{
    find_slots, parse_timestamp, parse_timezone, sort_busy, BusinessHours, Interval, SlotRequest,
    WindowSpec,
};

#[derive(Parser)]
#[command(name = "slots", version, about = "Business-hours free-slot finder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free slots from a busy-interval snapshot
    Find {
        /// Busy intervals JSON file (reads stdin if omitted)
        #[arg(short, long)]
        busy: Option<PathBuf>,

        /// IANA time zone for business hours
        #[arg(short, long, default_value = "UTC")]
        timezone: String,

        /// Window start, ISO-8601 or epoch milliseconds
        #[arg(long, requires = "to", conflicts_with = "range")]
        from: Option<String>,

        /// Window end, ISO-8601 or epoch milliseconds
        #[arg(long, requires = "from", conflicts_with = "range")]
        to: Option<String>,

        /// Relative range: "next 7 days", "next 14 days", "this month"
        #[arg(short, long)]
        range: Option<String>,

        /// Slot length in minutes
        #[arg(short, long)]
        duration: i64,

        /// Maximum number of slots to return
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Business day opens (HH:MM, local)
        #[arg(long, default_value = "09:00")]
        day_start: String,

        /// Business day closes (HH:MM, local)
        #[arg(long, default_value = "17:00")]
        day_end: String,

        /// Pin "now" for reproducible runs, ISO-8601 or epoch milliseconds
        #[arg(long)]
        now: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() {
    let cli = Cli::parse();
    slot_agent::logging::init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Find {
            busy,
            timezone,
            from,
            to,
            range,
            duration,
            limit,
            day_start,
            day_end,
            now,
            format,
        } => find(
            busy, timezone, from, to, range, duration, limit, day_start, day_end, now, format,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn find(
    busy_path: Option<PathBuf>,
    timezone: String,
    from: Option<String>,
    to: Option<String>,
    range: Option<String>,
    duration: i64,
    limit: usize,
    day_start: String,
    day_end: String,
    now: Option<String>,
    format: Format,
) -> Result<()> {
    let tz = parse_timezone(&timezone)?;

    let now = match now {
        Some(raw) => parse_timestamp(&raw).context("parsing --now")?,
        None => Utc::now(),
    };

    let spec = match (range, from, to) {
        (Some(token), _, _) => WindowSpec::parse_token(&token)?,
        (None, Some(from), Some(to)) => WindowSpec::Absolute {
            from: parse_timestamp(&from).context("parsing --from")?,
            to: parse_timestamp(&to).context("parsing --to")?,
        },
        // Neither given: search the coming week.
        _ => WindowSpec::NextDays(7),
    };

    let request = SlotRequest {
        window: spec.resolve(now, tz)?,
        timezone: tz,
        hours: BusinessHours::new(
            parse_local_time(&day_start).context("parsing --day-start")?,
            parse_local_time(&day_end).context("parsing --day-end")?,
        ),
        duration_minutes: duration,
        max_slots: limit,
    };
    request.validate()?;

    let mut busy = load_busy(busy_path)?;
    sort_busy(&mut busy);

    let slots = find_slots(&request, &busy, now);

    let response = SlotResponse {
        slots,
        window: request.window,
        timezone: tz.name().to_string(),
        duration_minutes: duration,
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        Format::Table => print_table(&response, tz),
    }
    Ok(())
}

fn parse_local_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").with_context(|| format!("expected HH:MM, got {raw}"))
}

fn load_busy(path: Option<PathBuf>) -> Result<Vec<Interval>> {
    let text = match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading busy file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading busy intervals from stdin")?;
            buffer
        }
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("parsing busy intervals JSON")
}

fn print_table(response: &SlotResponse, tz: chrono_tz::Tz) {
    for slot in &response.slots {
        let start = slot.start.with_timezone(&tz);
        let end = slot.end.with_timezone(&tz);
        println!(
            "{}  {} - {}",
            start.format("%Y-%m-%d"),
            start.format("%H:%M"),
            end.format("%H:%M")
        );
    }
    println!(
        "{} free slot(s), {} min each, {} ({} to {})",
        response.slots.len(),
        response.duration_minutes,
        response.timezone,
        response.window.from,
        response.window.to
    );
}
