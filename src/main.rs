use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use local_weather::{
    AirPollution, CurrentWeather, LocalWeatherConfig, PollutantReadings, Species, UnitsSystem,
    WeatherError, WindObservation, compose_summary, compute_air_quality, describe_wind,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Weather summaries and air quality index from provider measurements
#[derive(Parser, Debug)]
#[command(name = "local-weather", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Units system overriding the configured one (standard, metric, imperial)
    #[arg(long, global = true)]
    units: Option<String>,

    /// Show configuration details and debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a weather summary from provider JSON files
    Summary {
        /// Current weather response
        #[arg(long)]
        weather: PathBuf,
        /// Air pollution response
        #[arg(long)]
        air: Option<PathBuf>,
    },
    /// Compute the air quality index from concentrations in µg/m³
    Aqi {
        #[arg(long, allow_hyphen_values = true)]
        no2: f64,
        #[arg(long, allow_hyphen_values = true)]
        pm10: f64,
        #[arg(long, allow_hyphen_values = true)]
        o3: f64,
        #[arg(long, allow_hyphen_values = true)]
        pm25: f64,
    },
    /// Describe a wind observation
    Wind {
        #[arg(long, allow_hyphen_values = true)]
        speed: f64,
        #[arg(long, allow_hyphen_values = true)]
        gust: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        deg: f64,
    },
}

fn init_tracing(config: &LocalWeatherConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("local_weather={level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<WeatherError>() {
                Some(weather_err) => eprintln!("Error: {}", weather_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {

    let config = LocalWeatherConfig::load_from_path(cli.config.clone())?;
    init_tracing(&config, cli.verbose);

    let units = match &cli.units {
        Some(tag) => tag.parse::<UnitsSystem>()?,
        None => config.units()?,
    };

    if cli.verbose {
        info!(
            country = %config.location.country,
            zipcode = %config.location.zipcode,
            %units,
            "Using configuration"
        );
        if config.uses_sample_api_key() {
            info!("No personal API key configured");
        }
    }

    match cli.command {
        Command::Summary { weather, air } => {
            debug!("Reading weather from: {}", weather.display());
            let weather = CurrentWeather::from_json_str(&read_file(&weather)?)?;
            let air = match air {
                Some(path) => {
                    debug!("Reading air pollution from: {}", path.display());
                    Some(AirPollution::from_json_str(&read_file(&path)?)?)
                }
                None => None,
            };
            let summary = match compose_summary(&weather, air.as_ref(), units) {
                Err(WeatherError::IncompleteReading { missing }) => {
                    warn!(?missing, "Air quality unavailable, summarising weather only");
                    compose_summary(&weather, None, units)?
                }
                result => result?,
            };
            print_json(&summary)?;
        }
        Command::Aqi { no2, pm10, o3, pm25 } => {
            let readings = PollutantReadings::from([
                (Species::No2, no2),
                (Species::Pm10, pm10),
                (Species::O3, o3),
                (Species::Pm25, pm25),
            ]);
            let summary = compute_air_quality(&readings)?;
            info!("{}", summary.headline());
            print_json(&summary)?;
        }
        Command::Wind { speed, gust, deg } => {
            let description = describe_wind(&WindObservation {
                speed,
                gust,
                deg,
                units,
            })?;
            info!("{}", description);
            print_json(&description)?;
        }
    }

    Ok(())
}
