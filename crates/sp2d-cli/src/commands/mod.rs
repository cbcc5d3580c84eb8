pub mod config;
pub mod extract;
pub mod scan;

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use sp2d_core::models::config::Sp2dConfig;

/// Load configuration from an explicit path, the user config file, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<Sp2dConfig> {
    if let Some(path) = config_path {
        return Ok(Sp2dConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(Sp2dConfig::from_file(&default_path)?)
    } else {
        Ok(Sp2dConfig::default())
    }
}

/// Read a text file, or stdin when the path is `-`.
pub fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    Ok(fs::read_to_string(input)?)
}
