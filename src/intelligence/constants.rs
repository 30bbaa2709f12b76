// ABOUTME: Physiological and program-safety constants used by the formula engine and verifier
// ABOUTME: Grouped in nested const modules with the research they derive from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Domain constants for wellness planning.
//!
//! These values come from established sports-science and nutrition
//! references; the progression and deload bounds follow common strength
//! and conditioning programming guidance.

/// Mifflin-St Jeor BMR equation coefficients
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for
/// resting energy expenditure. *American Journal of Clinical Nutrition*,
/// 51(2), 241-247. <https://doi.org/10.1093/ajcn/51.2.241>
pub mod bmr {
    /// Weight coefficient (kcal per kg)
    pub const WEIGHT_COEF: f64 = 10.0;
    /// Height coefficient (kcal per cm)
    pub const HEIGHT_COEF: f64 = 6.25;
    /// Age coefficient (kcal per year, subtracted)
    pub const AGE_COEF: f64 = 5.0;
    /// Male constant term
    pub const MALE_CONSTANT: f64 = 5.0;
    /// Female constant term
    pub const FEMALE_CONSTANT: f64 = -161.0;
}

/// TDEE activity multipliers
///
/// Reference: McArdle, W.D., et al. (2010). *Exercise Physiology*.
pub mod activity_factors {
    pub const SEDENTARY: f64 = 1.2;
    pub const LIGHT: f64 = 1.375;
    pub const MODERATE: f64 = 1.55;
    pub const ACTIVE: f64 = 1.725;
    pub const VERY_ACTIVE: f64 = 1.9;
}

/// Macronutrient energy density (Atwater factors)
pub mod energy {
    /// kcal per gram of protein
    pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
    /// kcal per gram of carbohydrate
    pub const KCAL_PER_G_CARBS: f64 = 4.0;
    /// kcal per gram of fat
    pub const KCAL_PER_G_FAT: f64 = 9.0;
    /// Floor applied to every calorie target (kcal/day)
    pub const MIN_DAILY_KCAL: f64 = 1200.0;
}

/// Goal-specific daily calorie adjustments applied to TDEE (kcal)
pub mod goal_adjustments {
    pub const FAT_LOSS: f64 = -500.0;
    pub const LEAN_GAIN: f64 = 300.0;
    pub const MAINTENANCE: f64 = 0.0;
    pub const PCOD_REMISSION: f64 = -250.0;
    pub const STRESS_BALANCE: f64 = 0.0;
}

/// Macro splits by goal as (protein, carbs, fat) calorie fractions.
///
/// Each triple sums to 1.0.
pub mod macro_splits {
    pub const FAT_LOSS: (f64, f64, f64) = (0.35, 0.35, 0.30);
    pub const LEAN_GAIN: (f64, f64, f64) = (0.30, 0.45, 0.25);
    pub const MAINTENANCE: (f64, f64, f64) = (0.25, 0.45, 0.30);
    pub const PCOD_REMISSION: (f64, f64, f64) = (0.30, 0.35, 0.35);
    pub const STRESS_BALANCE: (f64, f64, f64) = (0.25, 0.50, 0.25);
}

/// Hydration targets
pub mod hydration {
    /// Baseline daily intake per kg of body weight (ml)
    pub const ML_PER_KG: f64 = 35.0;
    /// Additional intake per activity level above sedentary (ml)
    pub const ACTIVITY_BONUS_ML: [f64; 5] = [0.0, 150.0, 300.0, 450.0, 600.0];
}

/// Weekly load progression bounds by experience tier
pub mod progression {
    /// Beginner: at most +5% week over week
    pub const BEGINNER_MAX_INCREASE: f64 = 0.05;
    /// Intermediate: at most +8%
    pub const INTERMEDIATE_MAX_INCREASE: f64 = 0.08;
    /// Advanced: at most +10%
    pub const ADVANCED_MAX_INCREASE: f64 = 0.10;
    /// Tolerance for floating-point load comparisons
    pub const LOAD_EPSILON: f64 = 1e-9;
}

/// Deload scheduling for longer programs
pub mod deload {
    /// Programs at or above this many weeks get scheduled deloads
    pub const MIN_PROGRAM_WEEKS: usize = 8;
    /// Every Nth week (index > 0, index % N == 0) is a deload week
    pub const CADENCE_WEEKS: usize = 5;
    /// Load multiplier applied to a deload week
    pub const LOAD_FACTOR: f64 = 0.6;
}
