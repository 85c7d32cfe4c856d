//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::state::ProviderRecord;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::ScoutError;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(ScoutError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, ScoutError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, ScoutError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Reads the stored provider table back (for testing)
    #[cfg(test)]
    pub fn load_providers(&self) -> StorageResult<Vec<ProviderRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT position, name, website, hour_rate, min_project_size, rating_for_cost,
                    number_of_reviews
             FROM providers ORDER BY position",
        )?;
        let mut city_stmt = self.conn.prepare(
            "SELECT city FROM provider_cities WHERE provider_position = ?1 ORDER BY position",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                ProviderRecord {
                    name: row.get(1)?,
                    website: row.get(2)?,
                    cities: Vec::new(),
                    hour_rate: row.get(3)?,
                    min_project_size: row.get(4)?,
                    rating_for_cost: row.get(5)?,
                    number_of_reviews: row.get(6)?,
                },
            ))
        })?;

        let mut providers = Vec::new();
        for row in rows {
            let (position, mut record) = row?;
            record.cities = city_stmt
                .query_map(params![position], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            providers.push(record);
        }

        Ok(providers)
    }
}

impl Storage for SqliteStorage {
    fn write_export(
        &mut self,
        config_hash: &str,
        pages_requested: u32,
        records: &[ProviderRecord],
    ) -> StorageResult<()> {
        // Dropping the transaction before commit rolls everything back
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            "
            DELETE FROM provider_cities;
            DELETE FROM providers;
            DELETE FROM export_info;
        ",
        )?;

        tx.execute(
            "INSERT INTO export_info (id, exported_at, config_hash, pages_requested)
             VALUES (1, ?1, ?2, ?3)",
            params![Utc::now().to_rfc3339(), config_hash, pages_requested],
        )?;

        {
            let mut provider_stmt = tx.prepare(
                "INSERT INTO providers (position, name, website, hour_rate,
                     min_project_size, rating_for_cost, number_of_reviews)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            let mut city_stmt = tx.prepare(
                "INSERT INTO provider_cities (provider_position, position, city)
                 VALUES (?1, ?2, ?3)",
            )?;

            for (position, record) in records.iter().enumerate() {
                provider_stmt.execute(params![
                    position as i64,
                    record.name,
                    record.website,
                    record.hour_rate,
                    record.min_project_size,
                    record.rating_for_cost,
                    record.number_of_reviews,
                ])?;

                for (city_position, city) in record.cities.iter().enumerate() {
                    city_stmt.execute(params![position as i64, city_position as i64, city])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}
