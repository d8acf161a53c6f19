//! CLI entry point for the bike-share feature builder.
//!
//! Provides subcommands for building the denormalized feature set from raw
//! CSV inputs and for inspecting the level set of a categorical column.

use std::path::Path;

use anyhow::Result;
use bikeshare_features::pipeline::build_feature_table;
use bikeshare_features::pipeline::schema::FeatureTable;
use bikeshare_features::{geo, ingest, output};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_features")]
#[command(about = "Builds an analytical feature set from bike-share trip data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature table from raw CSV inputs
    Build {
        /// Trips CSV file
        #[arg(short, long)]
        trips: String,

        /// Stations CSV file
        #[arg(short, long)]
        stations: String,

        /// Daily weather CSV file
        #[arg(short, long)]
        weather: String,

        /// Optional CSV overriding the built-in zip-code geocoding table
        #[arg(long)]
        zip_geo: Option<String>,

        /// CSV file to write the feature table to
        #[arg(short, long, default_value = "feature_set.csv")]
        output: String,
    },
    /// Build the feature table and print the levels of one categorical column
    Levels {
        /// Trips CSV file
        #[arg(short, long)]
        trips: String,

        /// Stations CSV file
        #[arg(short, long)]
        stations: String,

        /// Daily weather CSV file
        #[arg(short, long)]
        weather: String,

        /// Optional CSV overriding the built-in zip-code geocoding table
        #[arg(long)]
        zip_geo: Option<String>,

        /// Categorical column name, e.g. "subsc_type"
        #[arg(value_name = "COLUMN")]
        column: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_features.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_features.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            trips,
            stations,
            weather,
            zip_geo,
            output,
        } => {
            let table = run_pipeline(&trips, &stations, &weather, zip_geo.as_deref())?;
            output::write_table(&output, &table)?;
        }
        Commands::Levels {
            trips,
            stations,
            weather,
            zip_geo,
            column,
        } => {
            let table = run_pipeline(&trips, &stations, &weather, zip_geo.as_deref())?;
            let levels = table.category_levels(&column)?;

            info!(column = %column, count = levels.len(), "Categorical levels");
            for level in &levels {
                info!(column = %column, level = %level, "Level");
            }
        }
    }

    Ok(())
}

/// Loads the input tables and runs the full pipeline.
#[tracing::instrument(skip(zip_geo), fields(trips, stations, weather))]
fn run_pipeline(
    trips: &str,
    stations: &str,
    weather: &str,
    zip_geo: Option<&str>,
) -> Result<FeatureTable> {
    let trips = ingest::load_trips(Path::new(trips))?;
    let stations = ingest::load_stations(Path::new(stations))?;
    let weather = ingest::load_weather(Path::new(weather))?;
    let zip_geo = match zip_geo {
        Some(path) => ingest::load_zip_geo(Path::new(path))?,
        None => geo::frequent_zip_codes(),
    };

    Ok(build_feature_table(trips, stations, weather, zip_geo)?)
}
