// ABOUTME: Planner service - the generate/verify/persist pipeline behind the API
// ABOUTME: Validates input, runs the pipeline, and owns the sample-plan fallback policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Planner Service
//!
//! Orchestrates one plan creation: intake validation, profile load and
//! demographic checks, draft generation, safety verification, persistence.
//! The pass is linear (draft → verifying → verified) with no retries and no
//! partial commit; nothing is persisted unless verification completes.
//!
//! Each call operates on its own draft, so any number of pipelines may run
//! concurrently without coordination.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::generator::PlanGenerator;
use crate::intelligence::{compute_nutrition_targets, verifier, NutritionTargets};
use crate::models::{Intake, PlanSummary, VerifiedPlan};
use crate::storage::{PlanStore, ProfileStore};
use serde::{Deserialize, Serialize};

/// Response returned to the caller after a successful plan creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan_id: String,
    pub plan: crate::models::DraftPlan,
    pub warnings: Vec<String>,
    pub confidence: f64,
    /// Formula-engine targets for the intake's primary goal
    pub nutrition: NutritionTargets,
}

/// The plan pipeline service
#[derive(Clone)]
pub struct PlannerService {
    generator: PlanGenerator,
    profiles: Arc<dyn ProfileStore>,
    plans: Arc<dyn PlanStore>,
    /// When generation is unavailable, substitute the static sample plan
    /// instead of failing the request
    fallback_to_sample: bool,
}

impl PlannerService {
    #[must_use]
    pub fn new(
        generator: PlanGenerator,
        profiles: Arc<dyn ProfileStore>,
        plans: Arc<dyn PlanStore>,
    ) -> Self {
        Self {
            generator,
            profiles,
            plans,
            fallback_to_sample: false,
        }
    }

    /// Enable the degraded sample-plan response for generation outages
    #[must_use]
    pub const fn with_sample_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_sample = enabled;
        self
    }

    /// Run the full pipeline for one profile and intake.
    ///
    /// # Errors
    ///
    /// - `ValidationError` family for malformed intake or unusable profile
    ///   demographics (never retried)
    /// - `ResourceNotFound` when the profile does not exist
    /// - `GenerationUnavailable` when synthesis fails and fallback is off
    /// - `PersistenceError` from the plan store, propagated as-is
    #[instrument(skip_all, fields(profile_id = %profile_id))]
    pub async fn create_plan(&self, profile_id: &str, intake: Intake) -> AppResult<PlanResponse> {
        intake.validate()?;

        let profile = self
            .profiles
            .get(profile_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("profile {profile_id}")))?;
        profile.validate_demographics()?;

        let (draft, mut warnings) = match self.generator.generate(&profile, &intake).await {
            Ok(draft) => (draft, Vec::new()),
            Err(e) if e.code == ErrorCode::GenerationUnavailable && self.fallback_to_sample => {
                info!(profile_id = %profile.id, "generation unavailable, serving sample plan");
                (
                    PlanGenerator::sample_plan(&intake),
                    vec!["plan generation was unavailable; this is a standard sample plan"
                        .to_owned()],
                )
            }
            Err(e) => return Err(e),
        };

        let constraints = intake.dietary_override.as_ref();
        let report = verifier::verify(draft, &profile, constraints);
        warnings.extend(report.warnings);

        let verified = VerifiedPlan {
            id: format!("plan_{}", Uuid::new_v4().simple()),
            profile_id: profile.id.clone(),
            plan: report.plan,
            warnings,
            confidence: report.confidence,
            created_at: Utc::now(),
        };
        self.plans.put(verified.clone()).await?;

        info!(
            plan_id = %verified.id,
            profile_id = %profile.id,
            confidence = verified.confidence,
            warnings = verified.warnings.len(),
            "plan created"
        );

        Ok(PlanResponse {
            plan_id: verified.id.clone(),
            plan: verified.plan,
            warnings: verified.warnings,
            confidence: verified.confidence,
            nutrition: compute_nutrition_targets(&profile, intake.primary_goal()),
        })
    }

    /// Fetch a persisted plan by id.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no such plan exists.
    pub async fn get_plan(&self, plan_id: &str) -> AppResult<VerifiedPlan> {
        self.plans
            .get(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("plan {plan_id}")))
    }

    /// List plan summaries, optionally for one profile.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list_plans(&self, profile_id: Option<&str>) -> AppResult<Vec<PlanSummary>> {
        self.plans.list(profile_id).await
    }

    /// Delete a plan by id.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no such plan exists.
    pub async fn delete_plan(&self, plan_id: &str) -> AppResult<()> {
        self.plans.delete(plan_id).await
    }
}
