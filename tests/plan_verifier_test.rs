// ABOUTME: Integration tests for the plan verifier
// ABOUTME: Contraindications, allergies, progression caps, deload weeks, idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan
#![allow(clippy::unwrap_used, clippy::float_cmp)]

mod common;

use std::collections::BTreeSet;

use common::{base_profile, flagged_profile};
use vitalplan::intelligence::verify;
use vitalplan::models::{
    ActivityEntry, DietaryPreferences, DraftPlan, ExperienceLevel, MealEntry, PlanDay,
    WeekAdjustment,
};

fn tags(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

fn meal(name: &str, meal_tags: &[&str]) -> MealEntry {
    MealEntry {
        name: name.to_owned(),
        tags: tags(meal_tags),
        kcal: 500.0,
        protein_g: 30.0,
        carbs_g: 50.0,
        fat_g: 15.0,
        flagged: None,
    }
}

/// One activity per day at the given weekly loads, seven days per week
fn draft_with_weekly_loads(weekly_loads: &[f64]) -> DraftPlan {
    let mut days = Vec::new();
    for (week, &load) in weekly_loads.iter().enumerate() {
        for d in 0..7u32 {
            #[allow(clippy::cast_possible_truncation)]
            let index = (week as u32) * 7 + d;
            days.push(PlanDay {
                index,
                activities: vec![ActivityEntry::new(
                    "strength circuit",
                    tags(&["strength"]),
                    load / 7.0,
                    40,
                )],
                meals: vec![],
            });
        }
    }
    DraftPlan {
        days,
        week_notes: vec![],
    }
}

#[test]
fn test_clean_plan_passes_with_full_confidence() {
    let draft = DraftPlan {
        days: vec![PlanDay {
            index: 0,
            activities: vec![ActivityEntry::new("brisk walk", tags(&["low_impact"]), 8.0, 30)],
            meals: vec![meal("lentil bowl", &["high_fiber"])],
        }],
        week_notes: vec![],
    };

    let report = verify(draft, &base_profile("prof_ok"), None);
    assert!(report.warnings.is_empty());
    assert_eq!(report.confidence, 1.0);
}

#[test]
fn test_pregnant_profile_flags_contraindicated_activity() {
    let draft = DraftPlan {
        days: vec![PlanDay {
            index: 0,
            activities: vec![ActivityEntry::new(
                "twist-focused yoga",
                tags(&["deep_twists", "flexibility"]),
                6.0,
                30,
            )],
            meals: vec![],
        }],
        week_notes: vec![],
    };

    let report = verify(draft, &flagged_profile("prof_p", &["pregnant"]), None);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("pregnant"));
    assert!(report.plan.days[0].activities[0].flagged.is_some());
    // One entry, one violation.
    assert_eq!(report.confidence, 0.0);
}

#[test]
fn test_hypertension_flags_high_sodium_meal() {
    let draft = DraftPlan {
        days: vec![PlanDay {
            index: 0,
            activities: vec![ActivityEntry::new("brisk walk", tags(&["low_impact"]), 8.0, 30)],
            meals: vec![meal("instant noodle bowl", &["high_sodium"])],
        }],
        week_notes: vec![],
    };

    let report = verify(draft, &flagged_profile("prof_h", &["hypertension"]), None);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.plan.days[0].meals[0].flagged.is_some());
    assert!(report.plan.days[0].activities[0].flagged.is_none());
    assert_eq!(report.confidence, 0.5);
}

#[test]
fn test_dietary_override_allergies_take_precedence() {
    let draft = DraftPlan {
        days: vec![PlanDay {
            index: 0,
            activities: vec![],
            meals: vec![
                meal("peanut butter smoothie", &["peanuts"]),
                meal("oat porridge", &["high_fiber"]),
            ],
        }],
        week_notes: vec![],
    };

    // Profile has no allergies; the request overrides with a peanut allergy.
    let override_prefs = DietaryPreferences {
        diet_type: String::new(),
        allergies: tags(&["peanuts"]),
        cuisine: String::new(),
    };

    let report = verify(draft, &base_profile("prof_a"), Some(&override_prefs));
    assert_eq!(report.warnings.len(), 1);
    assert!(report.plan.days[0].meals[0].flagged.is_some());
    assert!(report.plan.days[0].meals[1].flagged.is_none());
    assert_eq!(report.confidence, 0.5);
}

#[test]
fn test_beginner_progression_capped_at_five_percent() {
    // Week 0 at 100, week 1 jumps 10% - beyond the 5% beginner cap.
    let draft = draft_with_weekly_loads(&[100.0, 110.0]);
    let profile = base_profile("prof_b");
    assert_eq!(profile.experience, ExperienceLevel::Beginner);

    let report = verify(draft, &profile, None);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("progression"));

    let note = &report.plan.week_notes[0];
    assert_eq!(note.week_index, 1);
    match note.adjustment {
        WeekAdjustment::LoadCapped { original, capped } => {
            assert!((original - 110.0).abs() < 1e-6);
            assert!((capped - 105.0).abs() < 1e-6);
        }
        WeekAdjustment::Deload => panic!("expected a load cap note"),
    }

    // The scaled week's daily loads now sum to the capped total.
    let week1_load: f64 = report.plan.days[7..14]
        .iter()
        .flat_map(|d| d.activities.iter())
        .map(|a| a.load)
        .sum();
    assert!((week1_load - 105.0).abs() < 1e-6);
}

#[test]
fn test_advanced_tier_allows_larger_jumps() {
    let draft = draft_with_weekly_loads(&[100.0, 109.0]);
    let mut profile = base_profile("prof_adv");
    profile.experience = ExperienceLevel::Advanced;

    let report = verify(draft, &profile, None);
    assert!(report.warnings.is_empty());
    assert!(report.plan.week_notes.is_empty());
}

#[test]
fn test_deload_scheduled_for_long_programs() {
    // Eight flat weeks; week 5 gets the deload.
    let draft = draft_with_weekly_loads(&[70.0; 8]);
    let report = verify(draft, &base_profile("prof_long"), None);

    assert!(report
        .plan
        .week_notes
        .iter()
        .any(|n| n.week_index == 5 && matches!(n.adjustment, WeekAdjustment::Deload)));

    let week5_load: f64 = report.plan.days[35..42]
        .iter()
        .flat_map(|d| d.activities.iter())
        .map(|a| a.load)
        .sum();
    assert!((week5_load - 42.0).abs() < 1e-6);
}

#[test]
fn test_short_programs_get_no_deload() {
    let draft = draft_with_weekly_loads(&[70.0; 4]);
    let report = verify(draft, &base_profile("prof_short"), None);
    assert!(!report
        .plan
        .week_notes
        .iter()
        .any(|n| matches!(n.adjustment, WeekAdjustment::Deload)));
}

#[test]
fn test_reverification_is_idempotent() {
    let draft = draft_with_weekly_loads(&[100.0, 110.0, 115.0]);
    let mut profile = flagged_profile("prof_i", &["pregnant"]);
    profile.experience = ExperienceLevel::Beginner;

    let first = verify(draft, &profile, None);
    let second = verify(first.plan.clone(), &profile, None);

    assert!(second.warnings.is_empty());
    assert_eq!(second.confidence, first.confidence);
    assert_eq!(second.plan, first.plan);
}
