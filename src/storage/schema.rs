//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the export database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Describes the export currently held by the database (at most one row)
CREATE TABLE IF NOT EXISTS export_info (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    exported_at TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    pages_requested INTEGER NOT NULL
);

-- Providers, in first-seen order
CREATE TABLE IF NOT EXISTS providers (
    position INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    website TEXT NOT NULL,
    hour_rate TEXT NOT NULL,
    min_project_size TEXT NOT NULL,
    rating_for_cost TEXT NOT NULL,
    number_of_reviews TEXT NOT NULL
);

-- Office cities of a provider, in profile order
CREATE TABLE IF NOT EXISTS provider_cities (
    provider_position INTEGER NOT NULL REFERENCES providers(position),
    position INTEGER NOT NULL,
    city TEXT NOT NULL,
    PRIMARY KEY(provider_position, position)
);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
