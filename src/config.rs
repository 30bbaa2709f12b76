// ABOUTME: Environment-first server configuration
// ABOUTME: Every knob has a documented env var and a sensible default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Server configuration.
//!
//! Configuration is environment-only; there is no config file layer.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `VITALPLAN_HOST` | `127.0.0.1` | bind address |
//! | `VITALPLAN_PORT` | `8087` | bind port |
//! | `VITALPLAN_ANCHOR_PROFILE` | `prof_anchit` | undeletable profile id |
//! | `VITALPLAN_SYNTHESIS_PROVIDER` | `catalog` | `catalog` or `llm` |
//! | `VITALPLAN_SAMPLE_FALLBACK` | `true` | serve the sample plan on outages |
//!
//! The LLM provider reads its own `VITALPLAN_LLM_*` variables, documented in
//! [`crate::synthesis::SynthesisConfig`].

use std::env;
use std::fmt;

use crate::errors::{AppError, AppResult};
use crate::storage::memory::DEFAULT_ANCHOR_PROFILE_ID;

/// Which synthesis collaborator to wire into the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisProviderType {
    /// Deterministic built-in catalog, no network
    #[default]
    Catalog,
    /// `OpenAI`-compatible chat completions endpoint
    Llm,
}

impl SynthesisProviderType {
    /// Environment variable selecting the provider
    pub const ENV_VAR: &'static str = "VITALPLAN_SYNTHESIS_PROVIDER";

    /// Read the provider selection from the environment.
    ///
    /// # Errors
    ///
    /// Returns a config error for unrecognized values; unlike domain enums,
    /// silently defaulting a deployment knob would hide an operator typo.
    pub fn from_env() -> AppResult<Self> {
        match env::var(Self::ENV_VAR) {
            Ok(value) => match value.to_lowercase().as_str() {
                "catalog" => Ok(Self::Catalog),
                "llm" | "openai" | "ollama" => Ok(Self::Llm),
                other => Err(AppError::config(format!(
                    "{}={other} is not a known synthesis provider (expected catalog or llm)",
                    Self::ENV_VAR
                ))),
            },
            Err(_) => Ok(Self::default()),
        }
    }
}

impl fmt::Display for SynthesisProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Llm => write!(f, "llm"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub anchor_profile_id: String,
    pub synthesis_provider: SynthesisProviderType,
    pub sample_fallback: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8087,
            anchor_profile_id: DEFAULT_ANCHOR_PROFILE_ID.to_owned(),
            synthesis_provider: SynthesisProviderType::Catalog,
            sample_fallback: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a config error for unparseable values.
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let port = match env::var("VITALPLAN_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| AppError::config("VITALPLAN_PORT must be a port number").with_source(e))?,
            Err(_) => defaults.port,
        };

        let sample_fallback = match env::var("VITALPLAN_SAMPLE_FALLBACK") {
            Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => defaults.sample_fallback,
        };

        Ok(Self {
            host: env::var("VITALPLAN_HOST").unwrap_or(defaults.host),
            port,
            anchor_profile_id: env::var("VITALPLAN_ANCHOR_PROFILE")
                .unwrap_or(defaults.anchor_profile_id),
            synthesis_provider: SynthesisProviderType::from_env()?,
            sample_fallback,
        })
    }

    /// Socket address string for the listener
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:8087");
        assert_eq!(config.anchor_profile_id, DEFAULT_ANCHOR_PROFILE_ID);
        assert_eq!(config.synthesis_provider, SynthesisProviderType::Catalog);
        assert!(config.sample_fallback);
    }
}
