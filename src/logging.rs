// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Configures log levels, formatters, and output destinations from the environment
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Structured logging configuration.

use std::env;
use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format for production logging
    Json,
    /// Human-readable format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables.
    ///
    /// `RUST_LOG` sets the level and `LOG_FORMAT` picks `json`, `pretty`,
    /// or `compact`.
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        Self { level, format }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracing subscriber fails to initialize.
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::new(&self.level)
            .add_directive("sqlx=warn".parse().unwrap_or_else(|_| tracing::Level::WARN.into()))
            .add_directive(
                format!("macrofix={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            );

        let registry = tracing_subscriber::registry().with(env_filter);

        match self.format {
            LogFormat::Json => {
                registry
                    .with(fmt::layer().with_target(true).with_writer(io::stdout).json())
                    .init();
            }
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().with_target(true).with_writer(io::stdout))
                    .init();
            }
            LogFormat::Compact => {
                registry
                    .with(fmt::layer().compact().with_target(false).with_writer(io::stdout))
                    .init();
            }
        }

        info!(level = %self.level, format = ?self.format, "logging initialized");
        Ok(())
    }
}

/// Initialize logging from environment variables.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
