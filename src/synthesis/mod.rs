// ABOUTME: Content synthesis collaborator SPI for plan generation
// ABOUTME: Defines the provider trait and the raw content contract the generator structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Content Synthesis Provider Interface
//!
//! The plan generator delegates *content selection* (which activities, which
//! meals) to an external collaborator and owns the *structuring contract*
//! itself. This module defines that seam: a provider returns
//! [`RawPlanContent`] pools, and the generator assembles them into a tagged
//! day sequence.
//!
//! Two providers ship with the crate:
//!
//! - [`CatalogSynthesis`]: deterministic, offline, backed by a built-in
//!   catalog. Used by tests and as the default when no LLM is configured.
//! - [`OpenAiCompatibleSynthesis`]: calls any `OpenAI`-compatible chat
//!   completion endpoint and parses a JSON document out of the response.
//!
//! The core performs no retries here: a failed or cancelled synthesis call
//! surfaces as `GenerationUnavailable` with no partial draft. Retry/backoff
//! policy belongs to the collaborator's own client.

mod catalog;
mod openai_compatible;

pub use catalog::CatalogSynthesis;
pub use openai_compatible::{OpenAiCompatibleSynthesis, SynthesisConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::AppResult;
use crate::models::{Intake, Profile};

/// A candidate activity offered by the synthesis collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivity {
    pub name: String,
    /// Descriptive tags; required for contraindication matching downstream
    pub tags: BTreeSet<String>,
    /// Relative training load of one session
    pub load: f64,
    pub duration_minutes: u32,
}

/// A candidate meal offered by the synthesis collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMeal {
    pub name: String,
    pub tags: BTreeSet<String>,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Unstructured plan content: pools of candidates the generator draws from.
///
/// The generator validates this shape; empty pools or untagged entries are
/// treated as malformed output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawPlanContent {
    pub activities: Vec<RawActivity>,
    pub meals: Vec<RawMeal>,
}

/// Contract for external content synthesis collaborators
#[async_trait]
pub trait SynthesisProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Produce candidate content for one profile and intake.
    ///
    /// # Errors
    ///
    /// Returns an error when the collaborator is unavailable or its output
    /// cannot be mapped into [`RawPlanContent`].
    async fn synthesize(&self, profile: &Profile, intake: &Intake) -> AppResult<RawPlanContent>;
}
