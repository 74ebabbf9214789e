//! Command-line front end: manage the watchlist and run a sweep.
//!
//! Scheduling is left to cron or a systemd timer, e.g.
//! `0 0 * * * bikewatch report --send` for a daily 09:00 KST report.

use std::process::ExitCode;

use bikewatch::store::{format_listing, Watchlist, WatchlistStore};
use bikewatch::{BikeWatch, Config, Result, YearRange};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bikewatch")]
#[command(about = "Used-motorcycle price watch for the Reitwagen marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a brand/model over a model-year range (e.g. 혼다 PCX125 2021-2024)
    Add {
        brand: String,
        model: String,
        years: String,
    },

    /// Stop tracking the profile stored under KEY
    Remove { key: String },

    /// Show the watchlist
    List,

    /// Sweep the watchlist and print the report
    Report {
        /// Deliver the report to the configured chat instead of printing it
        #[arg(long)]
        send: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands) -> Result<()> {
    let config = Config::from_env()?;
    let store = WatchlistStore::new(&config.data_file, config.brands.clone());

    match command {
        Commands::Add {
            brand,
            model,
            years,
        } => {
            let years = YearRange::parse(&years)?;
            let profile = store.add(&brand, &model, years)?;
            println!(
                "추가 완료: {} ({}) [key: {}]",
                profile.display_name(),
                years,
                profile.key
            );
        }
        Commands::Remove { key } => {
            if store.remove(&key)? {
                println!("{key} 삭제 완료");
            } else {
                println!("그런 기종 없음");
            }
        }
        Commands::List => {
            println!("{}", format_listing(&store.list_profiles()?));
        }
        Commands::Report { send } => {
            let watch = BikeWatch::builder().config(config).watchlist(store).build()?;
            if send {
                match watch.run()? {
                    Some(_) => println!("report sent"),
                    None => println!("watchlist is empty; nothing sent"),
                }
            } else {
                println!("{}", watch.report()?);
            }
        }
    }

    Ok(())
}
