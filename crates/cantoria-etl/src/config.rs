use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for cantoria.
///
/// Values are resolved CLI-flags-first: a `--db` flag beats a
/// `CANTORIA_*` environment variable, which beats the config file, which
/// beats the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the seed asset lives: the JSON export used to populate an
    /// empty database. Optional, since an already-populated database
    /// never needs it (`CANTORIA_ASSET_URL` / `asset_url`).
    pub asset_url: Option<String>,

    /// Path to the SQLite database
    /// (`--db`, `CANTORIA_DATABASE_PATH`, `database_path`).
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_url: None,
            database_path: default_db_path(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (if any) and the
    /// environment.
    ///
    /// A missing config file is fine; a present but unparsable one is an
    /// error.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        builder
            .add_env(env::Options::with_top_level("cantoria"))
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration, letting a `--db` flag override the database
    /// path.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }

    /// Path of the on-disk seed asset cache, beside the database.
    #[must_use]
    pub fn asset_cache_path(&self) -> PathBuf {
        self.database_path.with_file_name("seed-cache.json")
    }
}

/// Default database location under the platform data directory, e.g.
/// `~/.local/share/cantoria/cantoria.db` on Linux.
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantoria")
        .join("cantoria.db")
}

/// Config file location under the platform config directory, e.g.
/// `~/.config/cantoria/config.toml` on Linux.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cantoria")
        .join("config.toml")
}

/// The commented example config written by `cantoria config init`.
pub fn example_config() -> &'static str {
    r#"# Cantoria configuration
#
# Resolution order: CLI flags, then CANTORIA_* environment variables,
# then this file, then built-in defaults.

# The seed asset: a JSON export of the lyrics collection, fetched once
# to populate an empty database. May be an http(s) URL or a file path.
#asset_url = "https://example.com/scripts/db.json"

# The SQLite database. Defaults to the platform data directory.
#database_path = "/path/to/custom/cantoria.db"
"#
}

/// Create the config file with the example content if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
