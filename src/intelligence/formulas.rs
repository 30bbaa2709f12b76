// ABOUTME: Formula engine - BMR, TDEE, calorie/macro targets, and hydration
// ABOUTME: Pure deterministic functions; range validation is a caller responsibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Formula Engine
//!
//! Evidence-based energy and nutrition calculations. All functions here are
//! pure and total: any numeric input is accepted, including values outside
//! healthy ranges, because the service boundary owns validation
//! ([`crate::models::Profile::validate_demographics`]).
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting
//!   energy expenditure. *American Journal of Clinical Nutrition*, 51(2).
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - McArdle, W.D., et al. (2010). *Exercise Physiology* (activity factors).

use serde::{Deserialize, Serialize};

use super::constants::{activity_factors, bmr, energy, goal_adjustments, hydration, macro_splits};
use crate::models::{ActivityLevel, Goal, Profile, Sex};

/// Daily nutrition targets derived for one profile and goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Basal Metabolic Rate, kcal/day
    pub bmr: f64,
    /// Total Daily Energy Expenditure, kcal/day
    pub tdee: f64,
    /// Goal-adjusted calorie target, kcal/day
    pub kcal_target: f64,
    /// Daily protein target, grams (one decimal)
    pub protein_g: f64,
    /// Daily carbohydrate target, grams (one decimal)
    pub carbs_g: f64,
    /// Daily fat target, grams (one decimal)
    pub fat_g: f64,
    /// Daily hydration target, millilitres
    pub hydration_ml: f64,
    /// Goal the split was selected for
    pub goal: Goal,
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation.
///
/// Males: `10w + 6.25h - 5a + 5`; females: `10w + 6.25h - 5a - 161`.
/// For [`Sex::Other`] the result is the arithmetic mean of the male and
/// female formulas, which collapses to the same expression with the mean of
/// the two constant terms.
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    let base = bmr::WEIGHT_COEF * weight_kg + bmr::HEIGHT_COEF * height_cm
        - bmr::AGE_COEF * age_years;

    match sex {
        Sex::Male => base + bmr::MALE_CONSTANT,
        Sex::Female => base + bmr::FEMALE_CONSTANT,
        Sex::Other => base + (bmr::MALE_CONSTANT + bmr::FEMALE_CONSTANT) / 2.0,
    }
}

/// Calculate Total Daily Energy Expenditure: `BMR x activity factor`.
///
/// [`ActivityLevel::parse`] already maps unknown input to `Sedentary`, so an
/// unrecognized level degrades to the 1.2 multiplier rather than erroring.
#[must_use]
pub fn calculate_tdee(bmr_kcal: f64, activity_level: ActivityLevel) -> f64 {
    let factor = match activity_level {
        ActivityLevel::Sedentary => activity_factors::SEDENTARY,
        ActivityLevel::Light => activity_factors::LIGHT,
        ActivityLevel::Moderate => activity_factors::MODERATE,
        ActivityLevel::Active => activity_factors::ACTIVE,
        ActivityLevel::VeryActive => activity_factors::VERY_ACTIVE,
    };
    bmr_kcal * factor
}

/// Goal-adjusted daily calorie target, floored at 1200 kcal
#[must_use]
pub fn derive_calorie_target(profile: &Profile, goal: Goal) -> f64 {
    let bmr_kcal = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        f64::from(profile.age),
        profile.sex,
    );
    let tdee = calculate_tdee(bmr_kcal, profile.activity_level);

    let adjustment = match goal {
        Goal::FatLoss => goal_adjustments::FAT_LOSS,
        Goal::LeanGain => goal_adjustments::LEAN_GAIN,
        Goal::Maintenance => goal_adjustments::MAINTENANCE,
        Goal::PcodRemission => goal_adjustments::PCOD_REMISSION,
        Goal::StressBalance => goal_adjustments::STRESS_BALANCE,
    };

    (tdee + adjustment).max(energy::MIN_DAILY_KCAL)
}

/// Daily hydration target in millilitres: 35 ml/kg plus an activity bump
#[must_use]
pub fn compute_hydration_target_ml(profile: &Profile) -> f64 {
    let bonus = hydration::ACTIVITY_BONUS_ML[profile.activity_level as usize];
    profile.weight_kg * hydration::ML_PER_KG + bonus
}

/// Complete nutrition targets for one profile and goal.
///
/// Macro grams are `kcal_target * split_pct / kcal_per_gram`, rounded to one
/// decimal place.
#[must_use]
pub fn compute_nutrition_targets(profile: &Profile, goal: Goal) -> NutritionTargets {
    let bmr_kcal = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        f64::from(profile.age),
        profile.sex,
    );
    let tdee = calculate_tdee(bmr_kcal, profile.activity_level);
    let kcal_target = derive_calorie_target(profile, goal);

    let (protein_pct, carbs_pct, fat_pct) = match goal {
        Goal::FatLoss => macro_splits::FAT_LOSS,
        Goal::LeanGain => macro_splits::LEAN_GAIN,
        Goal::Maintenance => macro_splits::MAINTENANCE,
        Goal::PcodRemission => macro_splits::PCOD_REMISSION,
        Goal::StressBalance => macro_splits::STRESS_BALANCE,
    };

    NutritionTargets {
        bmr: bmr_kcal,
        tdee,
        kcal_target,
        protein_g: round1(kcal_target * protein_pct / energy::KCAL_PER_G_PROTEIN),
        carbs_g: round1(kcal_target * carbs_pct / energy::KCAL_PER_G_CARBS),
        fat_g: round1(kcal_target * fat_pct / energy::KCAL_PER_G_FAT),
        hydration_ml: compute_hydration_target_ml(profile),
        goal,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
