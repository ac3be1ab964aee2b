// ABOUTME: Pulls daily totals from a nutrition source into the record store
// ABOUTME: Defines the NutritionSource trait, the date-range sync loop, and the export file source
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Sync Pipeline
//!
//! [`sync_range`] walks an inclusive date range, asks a
//! [`NutritionSource`] for each day's totals, and upserts the result into
//! the record store stamped with the current time. The loop aborts on the
//! first failure and reports the date it died on; days written before that
//! stay stored, so rerunning the same range resumes cleanly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{DailyRecord, NutrientProfile};
use crate::store::{KeyValueStore, StateStore};

/// External service that can report what was eaten on a given day.
///
/// `login` and `logout` bracket a session; `fetch_daily_totals` may assume
/// a successful login. Implementations return [`AppError::Auth`] and
/// [`AppError::Fetch`] for their failures and leave attaching the failing
/// date to [`sync_range`].
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use chrono::NaiveDate;
/// use macrofix::errors::AppResult;
/// use macrofix::models::NutrientProfile;
/// use macrofix::sync::NutritionSource;
///
/// struct FixedSource;
///
/// #[async_trait]
/// impl NutritionSource for FixedSource {
///     async fn login(&mut self) -> AppResult<()> {
///         Ok(())
///     }
///
///     async fn fetch_daily_totals(&mut self, _date: NaiveDate) -> AppResult<NutrientProfile> {
///         Ok(NutrientProfile::new(150.0, 60.0, 200.0))
///     }
///
///     async fn logout(&mut self) -> AppResult<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// Open a session with the source
    async fn login(&mut self) -> AppResult<()>;

    /// Total macros consumed on `date`
    async fn fetch_daily_totals(&mut self, date: NaiveDate) -> AppResult<NutrientProfile>;

    /// Close the session. Best-effort; callers log failures and move on.
    async fn logout(&mut self) -> AppResult<()>;
}

/// Fetch every day in `[start, end]` from `source` and upsert it into
/// `store`. Returns the number of days written.
///
/// A reversed range syncs nothing and succeeds. Logout runs whether the
/// per-day loop succeeded or not, and a logout failure only warns; a
/// login failure skips logout entirely.
///
/// # Errors
///
/// Returns [`AppError::Auth`] when login fails, or
/// [`AppError::SyncStopped`] carrying the first date whose fetch or store
/// failed. Days written before the failure remain stored.
pub async fn sync_range<K, S>(
    store: &StateStore<K>,
    source: &mut S,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<u32>
where
    K: KeyValueStore,
    S: NutritionSource,
{
    source.login().await?;

    let result = sync_days(store, source, start, end).await;

    if let Err(err) = source.logout().await {
        warn!(error = %err, "logout after sync failed");
    }

    result
}

async fn sync_days<K, S>(
    store: &StateStore<K>,
    source: &mut S,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<u32>
where
    K: KeyValueStore,
    S: NutritionSource,
{
    let mut synced = 0_u32;
    let mut date = start;
    while date <= end {
        let consumed = source
            .fetch_daily_totals(date)
            .await
            .map_err(|err| AppError::sync_stopped(date, err))?;

        let record = DailyRecord {
            date,
            consumed,
            synced_at: Utc::now(),
        };
        store
            .put(&record)
            .await
            .map_err(|err| AppError::sync_stopped(date, err))?;

        debug!(date = %date, protein = consumed.protein, "stored daily totals");
        synced += 1;

        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    info!(days = synced, from = %start, to = %end, "sync complete");
    Ok(synced)
}

/// Wire shape of a tracker export file
#[derive(Debug, Deserialize)]
struct ExportFile {
    /// Account the export was generated for, when the tracker includes it
    #[serde(default)]
    account: Option<String>,
    /// Daily totals keyed by date
    days: BTreeMap<NaiveDate, NutrientProfile>,
}

/// [`NutritionSource`] backed by a JSON export downloaded from the
/// tracker, for syncing without network access.
///
/// The file carries an optional `account` field and a `days` map:
///
/// ```json
/// {
///   "account": "user@example.com",
///   "days": {
///     "2025-06-01": { "protein": 150.0, "fat": 60.0, "carbs": 200.0 }
///   }
/// }
/// ```
///
/// A date missing from the export fails the fetch for that date rather
/// than inventing a zero day.
#[derive(Debug)]
pub struct ExportFileSource {
    account: Option<String>,
    days: BTreeMap<NaiveDate, NutrientProfile>,
    expected_account: Option<String>,
}

impl ExportFileSource {
    /// Load an export from disk.
    ///
    /// When `expected_account` is given,
    /// [`login`](NutritionSource::login) verifies the export was generated
    /// for that account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] when the file cannot be read, or
    /// [`AppError::Serialization`] when it is not a valid export.
    pub fn open(path: &Path, expected_account: Option<&str>) -> AppResult<Self> {
        let raw = fs::read_to_string(path)?;
        let export: ExportFile = serde_json::from_str(&raw)?;

        Ok(Self {
            account: export.account,
            days: export.days,
            expected_account: expected_account.map(str::to_owned),
        })
    }
}

#[async_trait]
impl NutritionSource for ExportFileSource {
    async fn login(&mut self) -> AppResult<()> {
        match (&self.expected_account, &self.account) {
            (Some(expected), Some(account)) if expected != account => Err(AppError::auth(
                format!("export belongs to {account}, not {expected}"),
            )),
            _ => Ok(()),
        }
    }

    async fn fetch_daily_totals(&mut self, date: NaiveDate) -> AppResult<NutrientProfile> {
        self.days
            .get(&date)
            .copied()
            .ok_or_else(|| AppError::fetch(format!("export has no entry for {date}")))
    }

    async fn logout(&mut self) -> AppResult<()> {
        Ok(())
    }
}
