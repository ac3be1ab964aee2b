// ABOUTME: Crate-wide error taxonomy covering storage, configuration, and sync boundaries
// ABOUTME: Defines the AppError enum and the AppResult alias used across all modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Error Handling
//!
//! Computation inside the engine is total: averaging, deviation, and scoring
//! never fail and instead degrade to zero or empty values. Every fallible
//! path is I/O-adjacent (the key-value engine, record serialization, the
//! external nutrition source) and surfaces through [`AppError`].

use chrono::NaiveDate;
use thiserror::Error;

/// Convenience alias for results carrying [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

/// Errors produced at the storage, configuration, and sync boundaries
#[derive(Debug, Error)]
pub enum AppError {
    /// No record stored for the requested date
    #[error("no nutrition record stored for {date}")]
    RecordNotFound {
        /// Date that had no record
        date: NaiveDate,
    },

    /// Underlying key-value engine failure
    #[error("storage engine error")]
    Storage {
        /// Underlying database error
        #[from]
        source: sqlx::Error,
    },

    /// A record envelope or catalog file could not be encoded or decoded
    #[error("serialization failed")]
    Serialization {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Reading an export or catalog file from disk failed
    #[error("i/o error")]
    Io {
        /// Underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Goals failed validation before the pipeline ran
    #[error("invalid goals: {reason}")]
    InvalidGoals {
        /// Which target is unusable and why
        reason: String,
    },

    /// Sync configuration is incomplete
    #[error("invalid sync configuration: {reason}")]
    InvalidSyncConfig {
        /// Which setting is missing
        reason: String,
    },

    /// Authentication against the nutrition source failed
    #[error("nutrition source authentication failed: {reason}")]
    Auth {
        /// What the source rejected
        reason: String,
    },

    /// The nutrition source could not produce daily totals
    #[error("nutrition source fetch failed: {reason}")]
    Fetch {
        /// What the source reported
        reason: String,
    },

    /// A date-range sync stopped partway; earlier dates remain stored
    #[error("sync stopped at {date}")]
    SyncStopped {
        /// First date that failed to sync
        date: NaiveDate,
        /// Failure that stopped the sync
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Invalid goals error with a reason naming the offending target
    pub fn invalid_goals(reason: impl Into<String>) -> Self {
        Self::InvalidGoals {
            reason: reason.into(),
        }
    }

    /// Invalid sync configuration error naming the missing setting
    pub fn invalid_sync_config(reason: impl Into<String>) -> Self {
        Self::InvalidSyncConfig {
            reason: reason.into(),
        }
    }

    /// Authentication error from the nutrition source
    pub fn auth(reason: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    /// Fetch error from the nutrition source
    pub fn fetch(reason: impl Into<String>) -> Self {
        Self::Fetch {
            reason: reason.into(),
        }
    }

    /// Wrap a per-day failure with the date the sync stopped at
    #[must_use]
    pub fn sync_stopped(date: NaiveDate, source: Self) -> Self {
        Self::SyncStopped {
            date,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn sync_stopped_carries_date_and_source() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 29).unwrap();
        let err = AppError::sync_stopped(date, AppError::fetch("rate limited"));

        assert!(err.to_string().contains("2024-11-29"));
        match err {
            AppError::SyncStopped { date: d, source } => {
                assert_eq!(d, date);
                assert!(matches!(*source, AppError::Fetch { .. }));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn helper_constructors_keep_reasons() {
        assert!(AppError::invalid_goals("daily protein must be greater than zero")
            .to_string()
            .contains("daily protein"));
        assert!(AppError::auth("bad credentials")
            .to_string()
            .contains("bad credentials"));
    }
}
