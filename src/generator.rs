// ABOUTME: Plan generator - structures synthesized content into a tagged draft plan
// ABOUTME: Owns the structuring contract; content selection belongs to the collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Plan Generator
//!
//! Given a profile and an intake, produces a [`DraftPlan`] with exactly the
//! requested number of days, each carrying at least one activity and one
//! meal. Content comes from a [`SynthesisProvider`]; structure is owned
//! here, so the plan shape is deterministic even when the content is not.
//!
//! If the collaborator fails or returns content that cannot fill the
//! structure, the whole generation fails with `GenerationUnavailable` - no
//! partially-structured plan is ever returned. Callers may substitute the
//! [`PlanGenerator::sample_plan`] as a degraded response.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{ActivityEntry, DraftPlan, Intake, MealEntry, PlanDay, Profile};
use crate::synthesis::{CatalogSynthesis, RawActivity, RawMeal, RawPlanContent, SynthesisProvider};

/// Meals assembled per plan day
const MEALS_PER_DAY: usize = 3;

/// Structures synthesized content into draft plans
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn SynthesisProvider>,
}

impl PlanGenerator {
    #[must_use]
    pub fn new(provider: Arc<dyn SynthesisProvider>) -> Self {
        Self { provider }
    }

    /// Generate a draft plan for one profile and intake.
    ///
    /// # Errors
    ///
    /// Returns `GenerationUnavailable` when the synthesis collaborator fails,
    /// is cancelled, or returns content that cannot populate every day.
    /// Malformed collaborator output is folded into the same code (the
    /// original error stays attached as the source) so callers have a single
    /// outage signal to key their fallback on.
    #[instrument(skip_all, fields(profile_id = %profile.id, provider = self.provider.name()))]
    pub async fn generate(&self, profile: &Profile, intake: &Intake) -> AppResult<DraftPlan> {
        let content = self.provider.synthesize(profile, intake).await.map_err(|e| {
            warn!("synthesis collaborator failed: {e}");
            AppError::generation_unavailable("content synthesis failed").with_source(e)
        })?;

        let plan = Self::structure(&content, intake)?;
        debug!(days = plan.days.len(), "draft plan structured");
        Ok(plan)
    }

    /// The static sample plan used as a degraded response when generation
    /// is unavailable. Built from the safest catalog subset; always succeeds.
    #[must_use]
    pub fn sample_plan(intake: &Intake) -> DraftPlan {
        let content = CatalogSynthesis::sample_content();
        // The sample content is a non-empty, fully-tagged static pool.
        Self::structure(&content, intake).unwrap_or_default()
    }

    /// Assemble the day sequence from content pools.
    ///
    /// Activities are packed round-robin per day, taking only sessions that
    /// fit the remaining time budget; when nothing in the pool fits, the
    /// shortest session is scheduled so no day is empty. Meals rotate
    /// through the pool, `MEALS_PER_DAY` per day.
    fn structure(content: &RawPlanContent, intake: &Intake) -> AppResult<DraftPlan> {
        validate_content(content)?;

        let day_count = intake.effective_duration_days();
        let mut days = Vec::with_capacity(day_count as usize);
        let mut activity_cursor = 0usize;
        let mut meal_cursor = 0usize;

        for index in 0..day_count {
            let activities =
                pick_activities(&content.activities, intake.session_minutes, &mut activity_cursor);
            let meals = pick_meals(&content.meals, &mut meal_cursor);
            days.push(PlanDay {
                index,
                activities,
                meals,
            });
        }

        Ok(DraftPlan {
            days,
            week_notes: Vec::new(),
        })
    }
}

fn validate_content(content: &RawPlanContent) -> AppResult<()> {
    if content.activities.is_empty() || content.meals.is_empty() {
        return Err(AppError::generation_unavailable(
            "synthesis returned empty content pools",
        ));
    }
    // Every entry must carry tags: the verifier matches contraindications on
    // them, so untagged content is unusable rather than merely sparse.
    if content.activities.iter().any(|a| a.tags.is_empty())
        || content.meals.iter().any(|m| m.tags.is_empty())
    {
        return Err(AppError::generation_unavailable(
            "synthesis returned untagged entries",
        ));
    }
    Ok(())
}

fn pick_activities(
    pool: &[RawActivity],
    session_minutes: u32,
    cursor: &mut usize,
) -> Vec<ActivityEntry> {
    let min_duration = pool.iter().map(|a| a.duration_minutes).min().unwrap_or(0);
    let mut picked = Vec::new();
    let mut budget = session_minutes;

    for _ in 0..pool.len() {
        if budget < min_duration {
            break;
        }
        let candidate = &pool[*cursor % pool.len()];
        *cursor += 1;

        if candidate.duration_minutes <= budget {
            budget -= candidate.duration_minutes;
            picked.push(to_entry(candidate));
        }
    }

    // Nothing in the pool fits the budget; schedule the shortest session so
    // the day is never left empty.
    if picked.is_empty() {
        if let Some(shortest) = pool.iter().min_by_key(|a| a.duration_minutes) {
            picked.push(to_entry(shortest));
        }
    }
    picked
}

fn to_entry(candidate: &RawActivity) -> ActivityEntry {
    ActivityEntry::new(
        candidate.name.clone(),
        candidate.tags.clone(),
        candidate.load,
        candidate.duration_minutes,
    )
}

fn pick_meals(pool: &[RawMeal], cursor: &mut usize) -> Vec<MealEntry> {
    (0..MEALS_PER_DAY.min(pool.len()))
        .map(|_| {
            let candidate = &pool[*cursor % pool.len()];
            *cursor += 1;
            MealEntry {
                name: candidate.name.clone(),
                tags: candidate.tags.clone(),
                kcal: candidate.kcal,
                protein_g: candidate.protein_g,
                carbs_g: candidate.carbs_g,
                fat_g: candidate.fat_g,
                flagged: None,
            }
        })
        .collect()
}
