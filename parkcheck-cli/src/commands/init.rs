//! Init command - write a config file with every setting filled in.

use std::path::Path;

use parkcheck::config::ConfigFile;

use crate::error::CliError;

/// Run the init command.
///
/// Existing values are kept; missing ones are written with their defaults.
pub fn run(path: &Path) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;
    config.save_to(path)?;

    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize ParkCheck settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
