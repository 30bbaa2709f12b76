// ABOUTME: Draft and verified plan structures shared by generator, verifier, and stores
// ABOUTME: Violations are annotated in place so verification stays idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One activity session inside a plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub name: String,
    /// Descriptive tags used for contraindication matching
    pub tags: BTreeSet<String>,
    /// Relative training load contributed by this session
    pub load: f64,
    pub duration_minutes: u32,
    /// Set by the verifier when the entry is contraindicated; flagged
    /// entries stay in the plan so the UI can disclose what was removed
    /// from the member's rotation and why
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<String>,
}

impl ActivityEntry {
    pub fn new(name: impl Into<String>, tags: BTreeSet<String>, load: f64, minutes: u32) -> Self {
        Self {
            name: name.into(),
            tags,
            load,
            duration_minutes: minutes,
            flagged: None,
        }
    }
}

/// One meal inside a plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEntry {
    pub name: String,
    /// Descriptive tags used for contraindication and allergy matching
    pub tags: BTreeSet<String>,
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    /// Set by the verifier when the meal conflicts with a health flag or allergy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flagged: Option<String>,
}

/// A single day of the program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanDay {
    /// Zero-based day index within the program
    pub index: u32,
    pub activities: Vec<ActivityEntry>,
    pub meals: Vec<MealEntry>,
}

/// Week-level adjustment recorded by the verifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeekAdjustment {
    /// Weekly load exceeded the experience-tier cap and was scaled down
    LoadCapped { original: f64, capped: f64 },
    /// Scheduled reduced-intensity week in longer programs
    Deload,
}

/// Annotation attached to a week by the verifier.
///
/// Notes persist in the plan; re-verification recognizes them and does not
/// re-adjust or re-warn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekNote {
    pub week_index: usize,
    #[serde(flatten)]
    pub adjustment: WeekAdjustment,
}

/// The generator's output: an ordered day sequence, unverified.
///
/// Owned exclusively by one generation call until handed to the verifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DraftPlan {
    pub days: Vec<PlanDay>,
    #[serde(default)]
    pub week_notes: Vec<WeekNote>,
}

impl DraftPlan {
    /// Total countable entries (activities + meals) across all days
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.activities.len() + d.meals.len())
            .sum()
    }

    /// Number of 7-day weeks, counting a trailing partial week
    #[must_use]
    pub fn week_count(&self) -> usize {
        self.days.len().div_ceil(7)
    }

    /// Whether a week already carries the given kind of note
    #[must_use]
    pub fn has_note(&self, week_index: usize, deload: bool) -> bool {
        self.week_notes.iter().any(|n| {
            n.week_index == week_index
                && matches!(n.adjustment, WeekAdjustment::Deload) == deload
        })
    }
}

/// A verified plan as persisted by the plan store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedPlan {
    pub id: String,
    /// Back-reference to the owning profile (relation, not ownership)
    pub profile_id: String,
    pub plan: DraftPlan,
    /// Ordered, one per violation; duplicates allowed
    pub warnings: Vec<String>,
    /// Fraction of entries that passed unmodified, 0.0-1.0
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

/// Listing projection returned by the plan store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub profile_id: String,
    pub day_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&VerifiedPlan> for PlanSummary {
    fn from(plan: &VerifiedPlan) -> Self {
        Self {
            id: plan.id.clone(),
            profile_id: plan.profile_id.clone(),
            day_count: plan.plan.days.len(),
            created_at: plan.created_at,
        }
    }
}
