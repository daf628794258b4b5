pub mod db;
pub mod migrations;

pub use db::Database;
pub use migrations::{Migration, MIGRATIONS, SCHEMA_VERSION};
