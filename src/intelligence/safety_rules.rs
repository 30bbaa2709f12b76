// ABOUTME: Static safety rule tables - contraindications and progression bounds
// ABOUTME: Loaded once at process start, shared read-only by all verification calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Safety Rule Tables
//!
//! Two static mappings (health flag → contraindicated activity tags, health
//! flag → contraindicated food tags) plus the experience-tier progression
//! caps. Unknown health flags contribute no entries; they are silently
//! ignored rather than treated as errors, because profiles may carry flags
//! this table has no opinion about.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use super::constants::progression;
use crate::models::ExperienceLevel;

type TagTable = HashMap<&'static str, &'static [&'static str]>;

/// Health flag → contraindicated activity tags
static ACTIVITY_CONTRAINDICATIONS: LazyLock<TagTable> = LazyLock::new(|| {
    let mut table: TagTable = HashMap::new();
    table.insert(
        "pregnant",
        &["deep_twists", "inversions", "high_impact", "supine_core", "hot_environment"],
    );
    table.insert(
        "hypertension",
        &["heavy_lifting", "inversions", "max_effort", "breath_retention"],
    );
    table.insert("heart_condition", &["max_effort", "high_impact", "heavy_lifting"]);
    table.insert("knee_injury", &["jumping", "deep_squats", "running", "high_impact"]);
    table.insert("back_pain", &["heavy_lifting", "deep_twists", "high_impact"]);
    table.insert("asthma", &["max_effort", "cold_exposure"]);
    table.insert("osteoporosis", &["high_impact", "deep_twists", "jumping"]);
    table
});

/// Health flag → contraindicated food tags
static FOOD_CONTRAINDICATIONS: LazyLock<TagTable> = LazyLock::new(|| {
    let mut table: TagTable = HashMap::new();
    table.insert(
        "pregnant",
        &["raw_fish", "unpasteurized", "high_mercury", "alcohol", "high_caffeine"],
    );
    table.insert("hypertension", &["high_sodium", "high_caffeine", "processed_meat"]);
    table.insert("diabetes", &["high_sugar", "refined_carbs", "sugary_drinks"]);
    table.insert("pcod", &["high_sugar", "refined_carbs", "fried"]);
    table.insert("kidney_disease", &["high_protein", "high_sodium", "high_potassium"]);
    table.insert("gout", &["organ_meat", "shellfish", "alcohol"]);
    table
});

fn union_tags(table: &TagTable, flags: &BTreeSet<String>) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    for flag in flags {
        if let Some(tags) = table.get(flag.to_lowercase().as_str()) {
            out.extend(tags.iter().map(|t| (*t).to_owned()));
        }
    }
    out
}

/// Union of contraindicated activity tags for every flag on the profile
#[must_use]
pub fn contraindicated_activity_tags(flags: &BTreeSet<String>) -> BTreeSet<String> {
    union_tags(&ACTIVITY_CONTRAINDICATIONS, flags)
}

/// Union of contraindicated food tags for every flag on the profile
#[must_use]
pub fn contraindicated_food_tags(flags: &BTreeSet<String>) -> BTreeSet<String> {
    union_tags(&FOOD_CONTRAINDICATIONS, flags)
}

/// The health flags responsible for contraindicating a given tag.
///
/// Used by the verifier to name the flag/tag pair in warnings.
#[must_use]
pub fn flags_contraindicating(
    flags: &BTreeSet<String>,
    tag: &str,
    food: bool,
) -> Vec<String> {
    let table = if food {
        &*FOOD_CONTRAINDICATIONS
    } else {
        &*ACTIVITY_CONTRAINDICATIONS
    };
    flags
        .iter()
        .filter(|flag| {
            table
                .get(flag.to_lowercase().as_str())
                .is_some_and(|tags| tags.contains(&tag))
        })
        .cloned()
        .collect()
}

/// Maximum allowed week-over-week load increase for an experience tier
#[must_use]
pub const fn max_weekly_increase(experience: ExperienceLevel) -> f64 {
    match experience {
        ExperienceLevel::Beginner => progression::BEGINNER_MAX_INCREASE,
        ExperienceLevel::Intermediate => progression::INTERMEDIATE_MAX_INCREASE,
        ExperienceLevel::Advanced => progression::ADVANCED_MAX_INCREASE,
    }
}

/// Whether moving from `prev_load` to `curr_load` stays within the tier cap.
///
/// A non-positive previous load is always safe: there is no baseline to
/// progress from.
#[must_use]
pub fn is_progression_safe(prev_load: f64, curr_load: f64, experience: ExperienceLevel) -> bool {
    if prev_load <= 0.0 {
        return true;
    }
    curr_load <= prev_load * (1.0 + max_weekly_increase(experience)) + progression::LOAD_EPSILON
}
