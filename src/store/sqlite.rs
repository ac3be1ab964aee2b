// ABOUTME: SQLite-backed key-value engine via sqlx with ordered prefix scans
// ABOUTME: Stores pairs in a single kv_state table keyed by TEXT primary key
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Durable storage engine.

use async_trait::async_trait;
use futures_util::StreamExt;
use sqlx::{Row, SqlitePool};

use super::{KeyValueStore, KvStream};
use crate::errors::{AppError, AppResult};

/// `SQLite` engine storing pairs in a single `kv_state` table.
///
/// The TEXT primary key gives the ascending scan order the record store
/// relies on. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    /// Open the database at `database_url` and run table setup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on connection or setup failure.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !database_url.contains('?') {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;
        let kv = Self { pool };
        kv.migrate().await?;
        Ok(kv)
    }

    async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS kv_state (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteKv {
    async fn put(&self, key: &str, value: &[u8]) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO kv_state (key, value)
            VALUES ($1, $2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>> {
        let row = sqlx::query("SELECT value FROM kv_state WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Ok(r.try_get("value")?)).transpose()
    }

    async fn scan_prefix<'a>(&'a self, prefix: &str) -> AppResult<KvStream<'a>> {
        // '~' sorts above every character the key alphabet uses, so the
        // half-open range [prefix, prefix~) covers exactly the prefix
        let stream = sqlx::query(
            r"
            SELECT key, value FROM kv_state
            WHERE key >= $1 AND key < $1 || '~'
            ORDER BY key ASC
            ",
        )
        .bind(prefix.to_owned())
        .fetch(&self.pool)
        .map(|row| -> AppResult<(String, Vec<u8>)> {
            let row = row.map_err(AppError::from)?;
            Ok((row.try_get("key")?, row.try_get("value")?))
        });

        Ok(stream.boxed())
    }
}
