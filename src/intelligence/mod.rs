// ABOUTME: Domain intelligence - formula engine, safety rule tables, and plan verifier
// ABOUTME: Pure computation with no I/O; shared read-only by concurrent pipelines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Domain intelligence for the plan pipeline.
//!
//! Everything in this module is synchronous and side-effect-free. The
//! safety rule tables are process-wide statics, safely shared by any number
//! of concurrent verification calls.

pub mod constants;
pub mod formulas;
pub mod safety_rules;
pub mod verifier;

pub use formulas::{
    calculate_bmr, calculate_tdee, compute_hydration_target_ml, compute_nutrition_targets,
    derive_calorie_target, NutritionTargets,
};
pub use safety_rules::{
    contraindicated_activity_tags, contraindicated_food_tags, is_progression_safe,
    max_weekly_increase,
};
pub use verifier::{verify, VerificationReport};
