// ABOUTME: Environment-driven configuration for the database and tracker credentials
// ABOUTME: Defines TrackerConfig and AppConfig with validation before any source work
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Configuration
//!
//! Everything comes from the environment. `MACROFIX_DATABASE_URL` names
//! the record store (defaulting to a local `SQLite` file), and the
//! `MACROFIX_TRACKER_*` pair carries the nutrition tracker credentials.
//! Credential validation runs before any source work so a missing
//! variable fails fast instead of midway through a sync.

use std::env;

use crate::errors::{AppError, AppResult};

/// Environment variable naming the database location
pub const ENV_DATABASE_URL: &str = "MACROFIX_DATABASE_URL";
/// Environment variable carrying the tracker account name
pub const ENV_TRACKER_USERNAME: &str = "MACROFIX_TRACKER_USERNAME";
/// Environment variable carrying the tracker password
pub const ENV_TRACKER_PASSWORD: &str = "MACROFIX_TRACKER_PASSWORD";

/// Database location used when the environment does not name one
pub const DEFAULT_DATABASE_URL: &str = "sqlite:macrofix.db";

/// Credentials for the external nutrition tracker account.
///
/// Network-backed [`NutritionSource`](crate::sync::NutritionSource)
/// implementations authenticate with the full pair; the bundled export
/// file source checks the username against the export's account field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackerConfig {
    /// Account name, usually an email address
    pub username: String,
    /// Account password
    pub password: String,
}

impl TrackerConfig {
    /// Read credentials from `MACROFIX_TRACKER_USERNAME` and
    /// `MACROFIX_TRACKER_PASSWORD`.
    ///
    /// Missing variables come back empty and fail
    /// [`validate`](Self::validate).
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            username: env::var(ENV_TRACKER_USERNAME).unwrap_or_default(),
            password: env::var(ENV_TRACKER_PASSWORD).unwrap_or_default(),
        }
    }

    /// Ensure both credentials are present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSyncConfig`] naming the missing
    /// variable.
    pub fn validate(&self) -> AppResult<()> {
        if self.username.is_empty() {
            return Err(AppError::invalid_sync_config(format!(
                "{ENV_TRACKER_USERNAME} is not set"
            )));
        }
        if self.password.is_empty() {
            return Err(AppError::invalid_sync_config(format!(
                "{ENV_TRACKER_PASSWORD} is not set"
            )));
        }
        Ok(())
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the record store lives
    pub database_url: String,
    /// Tracker credentials for sync
    pub tracker: TrackerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Assemble configuration from the environment, falling back to
    /// [`DEFAULT_DATABASE_URL`] when no database is named.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env::var(ENV_DATABASE_URL)
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            tracker: TrackerConfig::from_env(),
        }
    }
}
