use anyhow::{Context, Result};
use cantoria_etl::{config, Config};

#[derive(Debug, clap::Subcommand)]
pub enum ConfigAction {
    /// Show the current effective configuration
    Show,
    /// Create a commented example config file if none exists
    Init,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(),
        ConfigAction::Init => init_config(),
    }
}

/// Show the current effective configuration.
fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!(
        "  asset_url: {}",
        config.asset_url.as_deref().unwrap_or("<not set>")
    );
    println!("  database_path: {}", config.database_path.display());

    println!("\nPriority: CLI args > ENV vars (CANTORIA_*) > Config file > Defaults");

    Ok(())
}

/// Create the config file with commented defaults.
fn init_config() -> Result<()> {
    let created = config::ensure_config_file().context("Failed to create config file")?;
    let path = config::config_file_path();

    if created {
        println!("\u{2713} Created {}", path.display());
    } else {
        println!("Config file already exists: {}", path.display());
    }

    Ok(())
}
