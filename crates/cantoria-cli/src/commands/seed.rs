use anyhow::Result;
use cantoria_core::Database;
use cantoria_etl::{Config, SeedOutcome};

pub async fn run_seed(config: &Config, asset: Option<String>) -> Result<()> {
    let db = Database::open(&config.database_path)?;
    let seeder = super::seeder_for(config, asset)?;

    match seeder.seed_if_empty(&db).await? {
        SeedOutcome::Seeded(inserted) => {
            println!("\u{2713} Seeded {inserted} records");
        }
        SeedOutcome::AlreadyPopulated(count) => {
            println!("Database already populated with {count} records; nothing to do");
        }
    }

    Ok(())
}
