// ABOUTME: OpenAI-compatible chat-completion synthesis provider for plan content
// ABOUTME: Prompts for a JSON catalog document and maps it into RawPlanContent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # `OpenAI`-Compatible Synthesis Provider
//!
//! Works against any `OpenAI`-compatible chat completions endpoint (Ollama,
//! vLLM, cloud gateways). The model is asked for a single JSON document with
//! `activities` and `meals` pools; anything that fails to parse into that
//! shape is reported as malformed rather than partially used.
//!
//! ## Configuration
//!
//! - `VITALPLAN_LLM_BASE_URL`: endpoint base (default Ollama,
//!   <http://localhost:11434/v1>)
//! - `VITALPLAN_LLM_MODEL`: model name (default `qwen2.5:14b-instruct`)
//! - `VITALPLAN_LLM_API_KEY`: bearer token (optional, empty for local servers)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

use super::{RawPlanContent, SynthesisProvider};
use crate::errors::{AppError, AppResult};
use crate::models::{Intake, Profile};

/// Environment variable for the endpoint base URL
const BASE_URL_ENV: &str = "VITALPLAN_LLM_BASE_URL";

/// Environment variable for the model name
const MODEL_ENV: &str = "VITALPLAN_LLM_MODEL";

/// Environment variable for the API key (optional)
const API_KEY_ENV: &str = "VITALPLAN_LLM_API_KEY";

/// Default base URL (Ollama)
const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model for local inference
const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";

/// Connection timeout for the endpoint
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Request timeout (local inference can be slow)
const REQUEST_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponseMessage {
    content: Option<String>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible synthesis provider
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Sampling temperature; low by default so structure stays parseable
    pub temperature: f32,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            api_key: None,
            temperature: 0.3,
        }
    }
}

impl SynthesisConfig {
    /// Load from environment variables, falling back to local defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            model: env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_owned()),
            api_key: env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            temperature: 0.3,
        }
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Synthesis provider backed by an `OpenAI`-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleSynthesis {
    config: SynthesisConfig,
    client: Client,
}

impl OpenAiCompatibleSynthesis {
    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be constructed.
    pub fn new(config: SynthesisConfig) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config("failed to build synthesis HTTP client").with_source(e))?;

        Ok(Self { config, client })
    }

    /// Create a provider from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error when the HTTP client cannot be constructed.
    pub fn from_env() -> AppResult<Self> {
        Self::new(SynthesisConfig::from_env())
    }

    fn build_prompt(profile: &Profile, intake: &Intake) -> String {
        let goals: Vec<&str> = intake.goals.iter().map(|g| g.as_str()).collect();
        let flags: Vec<&str> = profile.health_flags.iter().map(String::as_str).collect();
        format!(
            "You are a wellness program content engine. Produce candidate content for a \
             weekly plan as a single JSON object and nothing else, shaped as:\n\
             {{\"activities\":[{{\"name\":str,\"tags\":[str],\"load\":number,\
             \"duration_minutes\":int}}],\"meals\":[{{\"name\":str,\"tags\":[str],\
             \"kcal\":number,\"protein_g\":number,\"carbs_g\":number,\"fat_g\":number}}]}}\n\
             Offer at least 8 activities and 8 meals. Tag every entry with descriptive \
             tags (impact level, movement patterns, macro character).\n\
             Member: age {}, activity level {}, experience {}. Health flags: [{}]. \
             Goals: [{}]. Session budget: {} minutes. Modules: [{}]. Notes: {}",
            profile.age,
            profile.activity_level.as_str(),
            profile.experience.as_str(),
            flags.join(", "),
            goals.join(", "),
            intake.session_minutes,
            intake.modules.join(", "),
            intake.notes
        )
    }

    /// Pull the JSON document out of a completion, tolerating code fences
    /// and surrounding prose.
    fn extract_json(content: &str) -> AppResult<RawPlanContent> {
        let trimmed = content.trim();
        let candidate = match (trimmed.find('{'), trimmed.rfind('}')) {
            (Some(start), Some(end)) if start < end => &trimmed[start..=end],
            _ => trimmed,
        };

        let parsed: RawPlanContent = serde_json::from_str(candidate).map_err(|e| {
            AppError::synthesis_malformed("completion did not contain a parseable plan document")
                .with_source(e)
        })?;

        if parsed.activities.is_empty() || parsed.meals.is_empty() {
            return Err(AppError::synthesis_malformed(
                "completion contained empty activity or meal pools",
            ));
        }
        Ok(parsed)
    }
}

#[async_trait]
impl SynthesisProvider for OpenAiCompatibleSynthesis {
    fn name(&self) -> &'static str {
        "openai_compatible"
    }

    async fn synthesize(&self, profile: &Profile, intake: &Intake) -> AppResult<RawPlanContent> {
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatCompletionMessage {
                role: "user",
                content: Self::build_prompt(profile, intake),
            }],
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!(model = %self.config.model, %url, "requesting plan content synthesis");

        let mut http_request = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|e| {
            warn!("synthesis endpoint unreachable: {e}");
            AppError::generation_unavailable("synthesis endpoint unreachable").with_source(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "synthesis endpoint returned an error");
            return Err(AppError::generation_unavailable(format!(
                "synthesis endpoint returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::synthesis_malformed("synthesis response was not valid JSON").with_source(e)
        })?;

        let content = completion
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or_else(|| AppError::synthesis_malformed("completion contained no content"))?;

        Self::extract_json(content)
    }
}
