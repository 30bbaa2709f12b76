// ABOUTME: Structured logging setup built on tracing-subscriber
// ABOUTME: Env-driven level and output format, configured once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Logging configuration.
//!
//! - `RUST_LOG` controls the filter (default `info,vitalplan=debug`)
//! - `VITALPLAN_LOG_FORMAT` selects `json`, `pretty`, or `compact`
//!   (default `pretty`)

use std::env;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::errors::{AppError, AppResult};

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON lines for production log shipping
    Json,
    /// Human-readable multi-line output for development
    Pretty,
    /// Single-line output for space-constrained environments
    Compact,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var("VITALPLAN_LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            Ok("compact") => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns a config error when a subscriber is already installed.
pub fn init() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitalplan=debug"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match LogFormat::from_env() {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };

    result.map_err(|e| AppError::config("failed to install tracing subscriber").with_source(e))
}
