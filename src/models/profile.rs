// ABOUTME: Member profile model with demographics, health flags, and dietary preferences
// ABOUTME: Enum string conversions default on unknown input where the product tolerates it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::AppResult;

/// Biological sex for BMR calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male (Mifflin-St Jeor +5 constant)
    Male,
    /// Female (Mifflin-St Jeor -161 constant)
    Female,
    /// Other/unspecified (mean of the male and female formulas)
    Other,
}

impl Sex {
    /// Wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse from a string; anything unrecognized maps to `Other`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" => Self::Male,
            "female" | "f" => Self::Female,
            _ => Self::Other,
        }
    }
}

/// Weekly activity level driving the TDEE multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// 1-3 sessions/week
    Light,
    /// 3-5 sessions/week
    Moderate,
    /// 6-7 sessions/week
    Active,
    /// Hard daily training
    VeryActive,
}

impl ActivityLevel {
    /// Wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Parse from a string. Unknown values fall back to `Sedentary`, the
    /// conservative TDEE multiplier; this is intentional product behavior,
    /// not an error path.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" | "lightly_active" => Self::Light,
            "moderate" | "moderately_active" => Self::Moderate,
            "active" => Self::Active,
            "very_active" | "extra_active" => Self::VeryActive,
            _ => Self::Sedentary,
        }
    }
}

/// Training experience tier, bounding safe weekly load progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// New to structured training (5% weekly load cap)
    #[default]
    Beginner,
    /// 6+ months of consistent training (8% cap)
    Intermediate,
    /// Multi-year training history (10% cap)
    Advanced,
}

impl ExperienceLevel {
    /// Wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from a string; unknown values fall back to `Beginner`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// Dietary preferences, on the profile or overridden per plan request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DietaryPreferences {
    /// Diet style, free-form (e.g. "vegetarian", "omnivore")
    #[serde(default)]
    pub diet_type: String,
    /// Food tags the member must never be served
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    /// Preferred cuisine, free-form
    #[serde(default)]
    pub cuisine: String,
}

/// A wellness-program member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    /// Health flags drive contraindication lookups (set semantics: no
    /// duplicates, order-irrelevant)
    #[serde(default)]
    pub health_flags: BTreeSet<String>,
    #[serde(default)]
    pub dietary: DietaryPreferences,
    #[serde(default)]
    pub experience: ExperienceLevel,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Demographic fields must be present and positive before any
    /// calorie/BMR calculation runs for this profile.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` when age, height, or weight is unusable.
    pub fn validate_demographics(&self) -> AppResult<()> {
        use crate::errors::AppError;

        if self.age == 0 {
            return Err(AppError::out_of_range("profile age must be positive"));
        }
        if self.height_cm <= 0.0 {
            return Err(AppError::out_of_range("profile height_cm must be positive"));
        }
        if self.weight_kg <= 0.0 {
            return Err(AppError::out_of_range("profile weight_kg must be positive"));
        }
        Ok(())
    }
}
