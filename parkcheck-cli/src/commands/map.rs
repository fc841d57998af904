//! Map command - render a location map to a PNG file.

use std::path::PathBuf;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the map command.
pub struct MapArgs {
    pub lat: f64,
    pub lon: f64,
    pub zoom: i64,
    pub size: i64,
    /// Defaults to the rendered map's suggested file name.
    pub output: Option<PathBuf>,
    pub no_cache: bool,
}

/// Run the map command.
pub fn run(runner: &CliRunner, args: MapArgs) -> Result<(), CliError> {
    runner.log_startup("map");

    let mut config = runner.config().clone();
    if args.no_cache {
        config.cache.enabled = false;
    }

    let app = runner.build_app(&config)?;
    let runtime = runner.runtime()?;
    let map = runtime
        .block_on(app.maps().render(args.lat, args.lon, args.zoom, args.size))
        .map_err(|e| CliError::Map(e.to_string()))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&map.file_name));
    std::fs::write(&output, &map.data)
        .map_err(|e| CliError::Map(format!("Failed to write {}: {}", output.display(), e)))?;

    println!("Wrote {} ({} bytes)", output.display(), map.data.len());
    Ok(())
}
