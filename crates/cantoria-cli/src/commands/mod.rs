use anyhow::Result;
use cantoria_etl::{Config, FileFetcher, HttpFetcher, Seeder};

pub mod add;
pub mod config;
pub mod search;
pub mod seed;
pub mod show;
pub mod status;

pub use add::run_add;
pub use search::run_search;
pub use seed::run_seed;
pub use show::show_record;
pub use status::show_status;

/// Build a seeder for the configured (or overridden) asset source.
///
/// URLs get the HTTP fetcher with an on-disk cache beside the database;
/// anything else is treated as a local file path. With no source at all,
/// the seeder points at the cache path, so a previously fetched asset
/// still works offline and a truly absent one fails softly at seed time.
pub fn seeder_for(config: &Config, asset: Option<String>) -> Result<Seeder> {
    let source = asset.or_else(|| config.asset_url.clone());

    let seeder = match source {
        Some(s) if s.starts_with("http://") || s.starts_with("https://") => {
            Seeder::new(HttpFetcher::new(s)?.with_cache(config.asset_cache_path()))
        }
        Some(s) => Seeder::new(FileFetcher::new(s)),
        None => Seeder::new(FileFetcher::new(config.asset_cache_path())),
    };

    Ok(seeder)
}
