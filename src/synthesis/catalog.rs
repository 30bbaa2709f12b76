// ABOUTME: Deterministic catalog-backed synthesis provider for offline and test use
// ABOUTME: Also supplies the static sample plan content used as a degraded fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Built-in activity and meal catalog.
//!
//! Content is selected by goal and module, then rotated with a seed derived
//! from the profile id so different members get stable but varied plans.
//! Structure stays deterministic either way; only the rotation varies.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use super::{RawActivity, RawMeal, RawPlanContent, SynthesisProvider};
use crate::errors::AppResult;
use crate::models::{Goal, Intake, Profile};

/// Catalog entry: name, tags, load, minutes
type ActivityRow = (&'static str, &'static [&'static str], f64, u32);
/// Catalog entry: name, tags, kcal, protein, carbs, fat
type MealRow = (&'static str, &'static [&'static str], f64, f64, f64, f64);

const ACTIVITY_CATALOG: &[ActivityRow] = &[
    ("brisk walk", &["low_impact", "cardio"], 4.0, 30),
    ("zone 2 cycling", &["low_impact", "cardio", "steady"], 6.0, 45),
    ("bodyweight circuit", &["strength", "moderate_impact"], 7.0, 30),
    ("goblet squat session", &["strength", "deep_squats"], 8.0, 40),
    ("barbell strength block", &["strength", "heavy_lifting"], 10.0, 50),
    ("interval run", &["running", "high_impact", "cardio"], 9.0, 35),
    ("hiit sprints", &["high_impact", "max_effort", "cardio"], 11.0, 25),
    ("jump rope intervals", &["jumping", "high_impact", "cardio"], 8.0, 20),
    ("vinyasa flow", &["yoga", "low_impact"], 4.0, 40),
    ("twist-focused yoga", &["yoga", "deep_twists"], 4.0, 35),
    ("inversion practice", &["yoga", "inversions"], 5.0, 30),
    ("restorative stretch", &["mobility", "low_impact", "recovery"], 2.0, 25),
    ("breathwork session", &["recovery", "breath_retention"], 1.0, 15),
    ("swimming laps", &["low_impact", "cardio", "full_body"], 7.0, 40),
    ("core stability work", &["strength", "supine_core"], 5.0, 25),
];

const MEAL_CATALOG: &[MealRow] = &[
    ("overnight oats with berries", &["grain", "high_fiber"], 380.0, 14.0, 58.0, 10.0),
    ("paneer and spinach bowl", &["vegetarian", "high_protein"], 450.0, 28.0, 30.0, 22.0),
    ("grilled chicken salad", &["high_protein", "low_carb"], 420.0, 38.0, 18.0, 20.0),
    ("lentil dal with rice", &["vegetarian", "grain", "high_fiber"], 520.0, 22.0, 78.0, 12.0),
    ("salmon with quinoa", &["fish", "high_protein", "omega3"], 540.0, 36.0, 42.0, 24.0),
    ("tuna poke bowl", &["fish", "raw_fish", "high_mercury"], 480.0, 32.0, 48.0, 16.0),
    ("greek yogurt parfait", &["dairy", "high_protein"], 320.0, 22.0, 38.0, 9.0),
    ("peanut butter smoothie", &["peanuts", "high_protein"], 410.0, 24.0, 40.0, 18.0),
    ("vegetable stir fry with tofu", &["vegetarian", "soy", "low_carb"], 390.0, 24.0, 32.0, 18.0),
    ("instant noodle bowl", &["high_sodium", "refined_carbs", "processed"], 460.0, 12.0, 62.0, 18.0),
    ("frosted pastry", &["high_sugar", "refined_carbs"], 430.0, 5.0, 64.0, 17.0),
    ("masala chickpea wrap", &["vegetarian", "grain", "high_fiber"], 470.0, 20.0, 60.0, 16.0),
    ("egg and avocado toast", &["eggs", "grain"], 400.0, 18.0, 34.0, 22.0),
    ("chia pudding", &["high_fiber", "omega3"], 310.0, 12.0, 32.0, 16.0),
];

/// Tags favored per goal when ordering the activity pool
fn goal_activity_bias(goal: Goal) -> &'static [&'static str] {
    match goal {
        Goal::FatLoss => &["cardio", "high_impact"],
        Goal::LeanGain => &["strength", "heavy_lifting"],
        Goal::Maintenance => &["cardio", "strength"],
        Goal::PcodRemission => &["low_impact", "strength"],
        Goal::StressBalance => &["yoga", "recovery", "mobility"],
    }
}

/// Deterministic catalog-backed synthesis provider
#[derive(Debug, Clone, Default)]
pub struct CatalogSynthesis;

impl CatalogSynthesis {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn seed_for(profile: &Profile) -> u64 {
        let mut hasher = DefaultHasher::new();
        profile.id.hash(&mut hasher);
        hasher.finish()
    }

    /// Content for the static sample plan: the safest catalog subset,
    /// usable when the live collaborator is down.
    #[must_use]
    pub fn sample_content() -> RawPlanContent {
        let activities = ACTIVITY_CATALOG
            .iter()
            .filter(|(_, tags, _, _)| tags.contains(&"low_impact") || tags.contains(&"recovery"))
            .map(to_activity)
            .collect();
        let meals = MEAL_CATALOG
            .iter()
            .filter(|(_, tags, _, _, _, _)| {
                !tags.contains(&"high_sugar")
                    && !tags.contains(&"high_sodium")
                    && !tags.contains(&"raw_fish")
            })
            .map(to_meal)
            .collect();
        RawPlanContent { activities, meals }
    }
}

fn to_activity(row: &ActivityRow) -> RawActivity {
    let (name, tags, load, minutes) = *row;
    RawActivity {
        name: name.to_owned(),
        tags: to_tag_set(tags),
        load,
        duration_minutes: minutes,
    }
}

fn to_meal(row: &MealRow) -> RawMeal {
    let (name, tags, kcal, protein, carbs, fat) = *row;
    RawMeal {
        name: name.to_owned(),
        tags: to_tag_set(tags),
        kcal,
        protein_g: protein,
        carbs_g: carbs,
        fat_g: fat,
    }
}

fn to_tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| (*t).to_owned()).collect()
}

#[async_trait]
impl SynthesisProvider for CatalogSynthesis {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn synthesize(&self, profile: &Profile, intake: &Intake) -> AppResult<RawPlanContent> {
        let bias = goal_activity_bias(intake.primary_goal());
        let mut rng = StdRng::seed_from_u64(Self::seed_for(profile));

        let mut activities: Vec<RawActivity> = ACTIVITY_CATALOG.iter().map(to_activity).collect();
        // Favored tags first, stable within each group, then a seeded
        // rotation so members do not all start on the same session.
        activities.sort_by_key(|a| {
            usize::from(!bias.iter().any(|b| a.tags.contains(*b)))
        });
        let activity_count = activities.len().max(1);
        let rotation = rng.gen_range(0..activity_count);
        activities.rotate_right(rotation % activity_count);

        let mut meals: Vec<RawMeal> = MEAL_CATALOG.iter().map(to_meal).collect();
        let diet_type = intake
            .dietary_override
            .as_ref()
            .map_or(profile.dietary.diet_type.as_str(), |d| d.diet_type.as_str());
        if diet_type.eq_ignore_ascii_case("vegetarian") {
            meals.retain(|m| !m.tags.contains("fish") && !m.tags.contains("processed_meat"));
        }
        let meal_count = meals.len().max(1);
        let meal_rotation = rng.gen_range(0..meal_count);
        meals.rotate_right(meal_rotation % meal_count);

        Ok(RawPlanContent { activities, meals })
    }
}
