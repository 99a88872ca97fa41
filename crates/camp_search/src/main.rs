//! Command line entry point for the campsite stay finder.
//!
//! Looks up a campground on one reservation back-end and prints every stay of the
//! requested length that starts on the requested weekday, grouped by dates.
//!
//! ```bash
//! # Two nights from a Friday at Upper Pines, next six months
//! camp-search --campground 232447
//!
//! # Three nights from a Saturday at a California state park, next two months
//! camp-search --api reserve_ca -c 674 -d sat -n 3 -m 2
//! ```

mod report;

use std::time::Duration;

use anyhow::Context;
use campground_scan::{HttpConfig, ReservationApi, SearchRequest, search};
use chrono::{Local, Weekday};
use clap::{Parser, ValueEnum};
use rec_gov::RecGovClient;
use reserve_ca::ReserveCaClient;

#[derive(Parser)]
#[command(
    name = "camp-search",
    about = "Find campsites available for a given start day and stay length"
)]
struct Cli {
    /// Which reservation API to search
    #[arg(long, value_enum, default_value_t = Api::RecreationGov, env = "CAMP_SEARCH_API")]
    api: Api,

    /// Campground's identifier
    #[arg(short, long)]
    campground: String,

    /// Day of week to start on
    #[arg(short, long, value_enum, default_value_t = StartDay::Fri)]
    day: StartDay,

    /// Number of nights to stay
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    nights: u32,

    /// Number of months to check
    #[arg(short, long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
    months: u32,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30, env = "CAMP_SEARCH_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Api {
    /// recreation.gov (federal campgrounds)
    #[value(name = "recreation_gov")]
    RecreationGov,
    /// ReserveCalifornia (California state parks)
    #[value(name = "reserve_ca")]
    ReserveCa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StartDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl From<StartDay> for Weekday {
    fn from(day: StartDay) -> Self {
        match day {
            StartDay::Mon => Weekday::Mon,
            StartDay::Tue => Weekday::Tue,
            StartDay::Wed => Weekday::Wed,
            StartDay::Thu => Weekday::Thu,
            StartDay::Fri => Weekday::Fri,
            StartDay::Sat => Weekday::Sat,
            StartDay::Sun => Weekday::Sun,
        }
    }
}

/// Pick the back-end once, everything after this works through the trait
fn pick_api(api: Api, config: &HttpConfig) -> anyhow::Result<Box<dyn ReservationApi>> {
    Ok(match api {
        Api::RecreationGov => Box::new(RecGovClient::new(config)?),
        Api::ReserveCa => Box::new(ReserveCaClient::new(config)?),
    })
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = HttpConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..HttpConfig::default()
    };
    let api = pick_api(cli.api, &config)?;

    let request = SearchRequest {
        campground_id: cli.campground,
        start_weekday: cli.day.into(),
        nights: cli.nights,
        months: cli.months,
    };

    log::info!("Using {} for campground {}", api.provider_name(), request.campground_id);

    let report = search(api.as_ref(), &request).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", report::render_report(&report, Local::now().date_naive()));
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
