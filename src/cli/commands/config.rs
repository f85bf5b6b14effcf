//! Config file inspection.

use crate::config::{self, Config};

/// Print the config location and effective settings, optionally writing defaults
pub fn cmd_config(config: &Config, init: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    match path {
        Some(ref p) => println!("Config file: {}", p.display()),
        None => println!("Config file: (no config directory on this platform)"),
    }

    if init {
        match path {
            Some(ref p) if p.exists() => {
                println!("Config file already exists, leaving it unchanged");
            }
            _ => {
                let written = config::save(&Config::default())?;
                println!("Wrote default config to {}", written.display());
            }
        }
    }

    // Never echo the token
    let mut shown = config.clone();
    if shown.credentials.token.is_some() {
        shown.credentials.token = Some("********".to_string());
    }
    println!();
    println!("{}", toml::to_string_pretty(&shown)?);
    println!("Image cache: {}", config.image_cache_dir().display());
    Ok(())
}
