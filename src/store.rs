// ABOUTME: Date-keyed persistence for daily nutrition records over a key-value engine
// ABOUTME: Defines the KeyValueStore trait, the state key scheme, and the StateStore facade
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Record Storage
//!
//! [`StateStore`] speaks in [`DailyRecord`]s and delegates bytes to a
//! [`KeyValueStore`] engine. Records live under `state:YYYY-MM-DD` keys,
//! which sort lexicographically in date order, so range scans ride the
//! engine's key ordering and stop at the first key past the end bound
//! instead of filtering after the fact.
//!
//! Two engines ship: [`SqliteKv`] for durable state and [`MemoryKv`] for
//! tests and ephemeral runs. Both stream scans in ascending key order.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKv;
pub use sqlite::SqliteKv;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;

use crate::errors::{AppError, AppResult};
use crate::models::DailyRecord;

/// Prefix under which daily state records are stored
pub const STATE_KEY_PREFIX: &str = "state:";

/// Ordered stream of raw `(key, value)` pairs from a [`KeyValueStore`]
pub type KvStream<'a> = BoxStream<'a, AppResult<(String, Vec<u8>)>>;

/// Minimal contract the storage engines fulfil.
///
/// Engines return `scan_prefix` entries in ascending lexicographic key
/// order, lazily enough that a consumer can stop early without paying for
/// the rest of the range.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Insert or replace `key`
    async fn put(&self, key: &str, value: &[u8]) -> AppResult<()>;

    /// Fetch `key`, or `None` when absent
    async fn get(&self, key: &str) -> AppResult<Option<Vec<u8>>>;

    /// Stream every entry whose key starts with `prefix`, ascending
    async fn scan_prefix<'a>(&'a self, prefix: &str) -> AppResult<KvStream<'a>>;
}

/// Storage key for a date: `state:YYYY-MM-DD`
#[must_use]
pub fn state_key(date: NaiveDate) -> String {
    format!("{STATE_KEY_PREFIX}{}", date.format("%Y-%m-%d"))
}

/// Date-keyed record store over any [`KeyValueStore`] engine
#[derive(Debug, Clone)]
pub struct StateStore<K> {
    kv: K,
}

impl<K: KeyValueStore> StateStore<K> {
    /// Wrap an engine
    pub const fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Upsert the record under its date key. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Serialization`] if the envelope cannot be
    /// encoded, or [`AppError::Storage`] on engine failure.
    pub async fn put(&self, record: &DailyRecord) -> AppResult<()> {
        let value = serde_json::to_vec(record)?;
        self.kv.put(&state_key(record.date), &value).await
    }

    /// Fetch the record for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RecordNotFound`] when nothing is stored for the
    /// date.
    pub async fn get(&self, date: NaiveDate) -> AppResult<DailyRecord> {
        let bytes = self
            .kv
            .get(&state_key(date))
            .await?
            .ok_or(AppError::RecordNotFound { date })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Records between `start` and `end`, both inclusive, in ascending
    /// date order.
    ///
    /// Dates with no record are simply absent from the result; the store
    /// never fabricates zero days. The loop breaks as soon as a key passes
    /// the end bound, so entries past the range are neither decoded nor
    /// pulled from the engine.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] or [`AppError::Serialization`] from
    /// the engine or a record inside the range.
    pub async fn scan(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<DailyRecord>> {
        let start_key = state_key(start);
        let end_key = state_key(end);

        let mut entries = self.kv.scan_prefix(STATE_KEY_PREFIX).await?;
        let mut records = Vec::new();
        while let Some(entry) = entries.next().await {
            let (key, bytes) = entry?;
            if key < start_key {
                continue;
            }
            if key > end_key {
                break;
            }
            records.push(serde_json::from_slice(&bytes)?);
        }
        Ok(records)
    }
}
