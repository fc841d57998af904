//! ParkCheck CLI - Command-line interface
//!
//! Runs the HTTP API, performs one-off checks and map renders, and manages
//! the tile cache and configuration file.

mod commands;
mod error;
mod runner;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use parkcheck::config::ConfigFile;
use parkcheck::server::{DEFAULT_IMAGE_SIZE, DEFAULT_ZOOM};

use commands::cache::CacheAction;
use commands::config::ConfigCommands;
use commands::map::MapArgs;
use commands::serve::ServeArgs;
use error::CliError;
use runner::{resolve_config_path, CliRunner};

#[derive(Debug, Parser)]
#[command(name = "parkcheck")]
#[command(version, about = "Parking violation checks from OpenStreetMap data")]
struct Cli {
    /// Path to config.ini (defaults to the per-user config file)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<SocketAddr>,

        /// Fetch every tile from upstream
        #[arg(long)]
        no_cache: bool,
    },

    /// Check whether stopping at a location breaks a parking rule
    Check {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Render a map of a location to a PNG file
    Map {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Zoom level (0-19)
        #[arg(long, default_value_t = DEFAULT_ZOOM)]
        zoom: i64,

        /// Image width and height in pixels (128-2048)
        #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
        size: i64,

        /// Output file (defaults to map_z{zoom}_{lat}_{lon}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fetch every tile from upstream
        #[arg(long)]
        no_cache: bool,
    },

    /// Manage the disk tile cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { bind, no_cache } => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::serve::run(&runner, ServeArgs { bind, no_cache })
        }
        Commands::Check { lat, lon } => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::check::run(&runner, lat, lon)
        }
        Commands::Map {
            lat,
            lon,
            zoom,
            size,
            output,
            no_cache,
        } => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::map::run(
                &runner,
                MapArgs {
                    lat,
                    lon,
                    zoom,
                    size,
                    output,
                    no_cache,
                },
            )
        }
        Commands::Cache { action } => {
            let config = ConfigFile::load_from(&resolve_config_path(config_path))?;
            commands::cache::run(&config, action)
        }
        Commands::Config { command } => {
            commands::config::run(&resolve_config_path(config_path), command)
        }
    }
}
