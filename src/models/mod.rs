// ABOUTME: Domain model types for profiles, plan requests, and generated plans
// ABOUTME: Owns the enum string conventions shared by storage, routes, and intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Core domain models.
//!
//! String-facing enums follow a shared convention: `as_str` yields the
//! snake_case wire form and `parse` accepts any casing. Where the original
//! product tolerated unknown values, `parse` falls back to a documented
//! default instead of erroring (activity level → sedentary, goal →
//! maintenance). Callers rely on this graceful degradation.

mod intake;
mod plan;
mod profile;

pub use intake::{
    Goal, Intake, DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MAX_NOTES_CHARS, MAX_SESSION_MINUTES,
    MIN_SESSION_MINUTES,
};
pub use plan::{
    ActivityEntry, DraftPlan, MealEntry, PlanDay, PlanSummary, VerifiedPlan, WeekAdjustment,
    WeekNote,
};
pub use profile::{ActivityLevel, DietaryPreferences, ExperienceLevel, Profile, Sex};
