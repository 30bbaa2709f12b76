// ABOUTME: Plan-request intake model and goal enumeration
// ABOUTME: Ephemeral input validated at the service boundary before generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::DietaryPreferences;

/// Maximum free-text notes length accepted on an intake
pub const MAX_NOTES_CHARS: usize = 2000;

/// Session time budget bounds (minutes)
pub const MIN_SESSION_MINUTES: u32 = 5;
pub const MAX_SESSION_MINUTES: u32 = 240;

/// Longest supported program: 16 weeks
pub const MAX_DURATION_DAYS: u32 = 112;

/// Default program length when the intake does not specify one
pub const DEFAULT_DURATION_DAYS: u32 = 7;

/// Program goal selecting the macro split and calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Caloric deficit, higher protein share
    FatLoss,
    /// Modest surplus for muscle gain
    LeanGain,
    /// Caloric balance
    #[default]
    Maintenance,
    /// Low-glycemic split for PCOD management
    PcodRemission,
    /// Balanced split with recovery emphasis
    StressBalance,
}

impl Goal {
    /// Wire/database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat_loss",
            Self::LeanGain => "lean_gain",
            Self::Maintenance => "maintenance",
            Self::PcodRemission => "pcod_remission",
            Self::StressBalance => "stress_balance",
        }
    }

    /// Parse from a string. Unknown goals fall back to `Maintenance`;
    /// callers rely on this graceful degradation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fat_loss" | "weight_loss" => Self::FatLoss,
            "lean_gain" | "muscle_gain" => Self::LeanGain,
            "pcod_remission" | "pcos_remission" => Self::PcodRemission,
            "stress_balance" => Self::StressBalance,
            _ => Self::Maintenance,
        }
    }
}

/// A single plan-generation request.
///
/// Exists only for the duration of one `generate` call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    /// Ordered goals, primary first
    pub goals: Vec<Goal>,
    /// Selected program modules (e.g. "yoga", "strength", "meals")
    #[serde(default)]
    pub modules: Vec<String>,
    /// Per-request dietary override; takes precedence over profile prefs
    #[serde(default)]
    pub dietary_override: Option<DietaryPreferences>,
    /// Time budget per session, minutes
    pub session_minutes: u32,
    /// Program length in days (default 7)
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Free-form notes forwarded to the synthesis collaborator
    #[serde(default)]
    pub notes: String,
}

impl Intake {
    /// Primary goal, or the maintenance default when none was given
    #[must_use]
    pub fn primary_goal(&self) -> Goal {
        self.goals.first().copied().unwrap_or_default()
    }

    /// Effective program length in days
    #[must_use]
    pub fn effective_duration_days(&self) -> u32 {
        self.duration_days.unwrap_or(DEFAULT_DURATION_DAYS).max(1)
    }

    /// Boundary validation before the intake reaches the generator.
    ///
    /// # Errors
    ///
    /// Returns a validation error when goals are missing, the session budget
    /// or duration is out of bounds, or the notes exceed the length cap.
    pub fn validate(&self) -> AppResult<()> {
        if self.goals.is_empty() {
            return Err(AppError::missing_field("goals"));
        }
        if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&self.session_minutes) {
            return Err(AppError::out_of_range(format!(
                "session_minutes must be between {MIN_SESSION_MINUTES} and {MAX_SESSION_MINUTES}"
            )));
        }
        if let Some(days) = self.duration_days {
            if days == 0 || days > MAX_DURATION_DAYS {
                return Err(AppError::out_of_range(format!(
                    "duration_days must be between 1 and {MAX_DURATION_DAYS}"
                )));
            }
        }
        if self.notes.chars().count() > MAX_NOTES_CHARS {
            return Err(AppError::out_of_range(format!(
                "notes must not exceed {MAX_NOTES_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> Intake {
        Intake {
            goals: vec![Goal::FatLoss],
            modules: vec!["strength".to_owned()],
            dietary_override: None,
            session_minutes: 45,
            duration_days: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_unknown_goal_defaults_to_maintenance() {
        assert_eq!(Goal::parse("get_swole"), Goal::Maintenance);
        assert_eq!(Goal::parse("PCOD_REMISSION"), Goal::PcodRemission);
    }

    #[test]
    fn test_validate_accepts_reasonable_intake() {
        assert!(intake().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_goals() {
        let mut i = intake();
        i.goals.clear();
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_session_budget_out_of_bounds() {
        let mut i = intake();
        i.session_minutes = 3;
        assert!(i.validate().is_err());
        i.session_minutes = 300;
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_notes() {
        let mut i = intake();
        i.notes = "x".repeat(MAX_NOTES_CHARS + 1);
        assert!(i.validate().is_err());
    }

    #[test]
    fn test_effective_duration_defaults_to_a_week() {
        assert_eq!(intake().effective_duration_days(), 7);
    }
}
