//! SQLite persistence: connection pool, migrations and per-table queries

pub mod curators;
pub mod db;
pub mod migrations;
pub mod profit_checks;
pub mod requisites;
pub mod settings;
pub mod stop_list;
pub mod users;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool};
pub use users::User;
