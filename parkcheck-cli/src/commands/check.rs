//! Check command - analyze one location and print the verdict as JSON.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the check command.
pub fn run(runner: &CliRunner, lat: f64, lon: f64) -> Result<(), CliError> {
    runner.log_startup("check");

    let app = runner.build_app(runner.config())?;
    let runtime = runner.runtime()?;
    let result = runtime
        .block_on(app.analysis().analyze(lat, lon))
        .map_err(|e| CliError::Check(e.to_string()))?;

    let json = serde_json::to_string_pretty(&result).map_err(|e| CliError::Check(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
