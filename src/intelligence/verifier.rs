// ABOUTME: Plan verifier - contraindication checks, progression capping, deload scheduling
// ABOUTME: Verify-and-degrade: violations become annotations plus warnings, never errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # Plan Verifier
//!
//! A single synchronous pass over a draft plan: every activity and meal is
//! checked against the safety rule tables, weekly load progression is bounded
//! by the member's experience tier, and longer programs get scheduled deload
//! weeks.
//!
//! The verifier never rejects a plan. Violations are annotated in place
//! (entry `flagged` fields and week notes) and disclosed through warnings,
//! because the caller always needs something to show. Annotations persist in
//! the plan, which makes verification idempotent: a second pass over an
//! already-verified plan emits zero new warnings and recomputes the identical
//! confidence score.

use std::collections::BTreeSet;

use tracing::debug;

use super::constants::deload;
use super::safety_rules::{
    contraindicated_activity_tags, contraindicated_food_tags, flags_contraindicating,
    is_progression_safe, max_weekly_increase,
};
use crate::models::{DietaryPreferences, DraftPlan, Profile, WeekAdjustment, WeekNote};

/// Outcome of one verification pass
#[derive(Debug, Clone)]
pub struct VerificationReport {
    /// The plan, with violating entries annotated and weekly loads adjusted
    pub plan: DraftPlan,
    /// One human-readable warning per violation, in check order
    pub warnings: Vec<String>,
    /// `1 - violations/total_entries`, floored at 0.0; empty plan is 1.0
    pub confidence: f64,
}

/// Verify a draft plan against a profile's health flags and dietary
/// constraints.
///
/// `constraints` is the per-request dietary override; when absent, the
/// profile's own dietary preferences apply.
#[must_use]
pub fn verify(
    draft: DraftPlan,
    profile: &Profile,
    constraints: Option<&DietaryPreferences>,
) -> VerificationReport {
    let mut plan = draft;
    let mut warnings = Vec::new();

    let bad_activity_tags = contraindicated_activity_tags(&profile.health_flags);
    let bad_food_tags = contraindicated_food_tags(&profile.health_flags);
    let allergies = constraints
        .map_or(&profile.dietary.allergies, |c| &c.allergies);

    let total_entries = plan.entry_count();
    let mut violations = 0usize;

    check_activities(&mut plan, profile, &bad_activity_tags, &mut warnings, &mut violations);
    check_meals(&mut plan, profile, &bad_food_tags, allergies, &mut warnings, &mut violations);
    check_progression(&mut plan, profile, &mut warnings, &mut violations);
    apply_deload_weeks(&mut plan, &mut warnings, &mut violations);

    let confidence = if total_entries == 0 {
        1.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let ratio = violations as f64 / total_entries as f64;
        (1.0 - ratio).max(0.0)
    };

    debug!(
        profile_id = %profile.id,
        violations,
        total_entries,
        confidence,
        "plan verification complete"
    );

    VerificationReport {
        plan,
        warnings,
        confidence,
    }
}

fn check_activities(
    plan: &mut DraftPlan,
    profile: &Profile,
    bad_tags: &BTreeSet<String>,
    warnings: &mut Vec<String>,
    violations: &mut usize,
) {
    for day in &mut plan.days {
        for activity in &mut day.activities {
            if activity.flagged.is_some() {
                // Annotated by an earlier pass; counts against confidence
                // but produces no new warning.
                *violations += 1;
                continue;
            }
            if let Some(tag) = activity.tags.intersection(bad_tags).next() {
                let flags = flags_contraindicating(&profile.health_flags, tag, false);
                let flag = flags.first().cloned().unwrap_or_default();
                warnings.push(format!(
                    "day {}: activity '{}' is contraindicated for '{flag}' (tag '{tag}')",
                    day.index, activity.name
                ));
                activity.flagged = Some(format!("contraindicated for {flag}: {tag}"));
                *violations += 1;
            }
        }
    }
}

fn check_meals(
    plan: &mut DraftPlan,
    profile: &Profile,
    bad_tags: &BTreeSet<String>,
    allergies: &BTreeSet<String>,
    warnings: &mut Vec<String>,
    violations: &mut usize,
) {
    for day in &mut plan.days {
        for meal in &mut day.meals {
            if meal.flagged.is_some() {
                *violations += 1;
                continue;
            }
            if let Some(tag) = meal.tags.intersection(bad_tags).next() {
                let flags = flags_contraindicating(&profile.health_flags, tag, true);
                let flag = flags.first().cloned().unwrap_or_default();
                warnings.push(format!(
                    "day {}: meal '{}' is contraindicated for '{flag}' (tag '{tag}')",
                    day.index, meal.name
                ));
                meal.flagged = Some(format!("contraindicated for {flag}: {tag}"));
                *violations += 1;
            } else if let Some(allergen) = meal.tags.intersection(allergies).next() {
                warnings.push(format!(
                    "day {}: meal '{}' contains allergen '{allergen}'",
                    day.index, meal.name
                ));
                meal.flagged = Some(format!("allergen: {allergen}"));
                *violations += 1;
            }
        }
    }
}

/// Sum of unflagged activity loads in a 7-day week
fn week_load(plan: &DraftPlan, week_index: usize) -> f64 {
    let start = week_index * 7;
    let end = (start + 7).min(plan.days.len());
    plan.days[start..end]
        .iter()
        .flat_map(|d| &d.activities)
        .filter(|a| a.flagged.is_none())
        .map(|a| a.load)
        .sum()
}

fn scale_week(plan: &mut DraftPlan, week_index: usize, factor: f64) {
    let start = week_index * 7;
    let end = (start + 7).min(plan.days.len());
    for day in &mut plan.days[start..end] {
        for activity in &mut day.activities {
            activity.load *= factor;
        }
    }
}

/// Whether a week is on the deload cadence for this program length
fn is_deload_week(week_index: usize, week_count: usize) -> bool {
    week_count >= deload::MIN_PROGRAM_WEEKS
        && week_index > 0
        && week_index % deload::CADENCE_WEEKS == 0
}

fn check_progression(
    plan: &mut DraftPlan,
    profile: &Profile,
    warnings: &mut Vec<String>,
    violations: &mut usize,
) {
    let week_count = plan.week_count();
    let cap = max_weekly_increase(profile.experience);

    for week in 1..week_count {
        if plan.has_note(week, false) {
            // Capped on an earlier pass; still a violation, no new warning.
            *violations += 1;
            continue;
        }
        // Ramping back up after a scheduled deload is expected, so the
        // deloaded week is not a progression baseline.
        if is_deload_week(week - 1, week_count) {
            continue;
        }

        let prev = week_load(plan, week - 1);
        let curr = week_load(plan, week);
        if is_progression_safe(prev, curr, profile.experience) {
            continue;
        }

        let capped = prev * (1.0 + cap);
        scale_week(plan, week, capped / curr);
        plan.week_notes.push(WeekNote {
            week_index: week,
            adjustment: WeekAdjustment::LoadCapped {
                original: curr,
                capped,
            },
        });
        warnings.push(format!(
            "week {week}: load {curr:.1} exceeds the {:.0}% weekly progression allowed for {} members; scaled to {capped:.1}",
            cap * 100.0,
            profile.experience.as_str()
        ));
        *violations += 1;
    }
}

fn apply_deload_weeks(plan: &mut DraftPlan, warnings: &mut Vec<String>, violations: &mut usize) {
    let week_count = plan.week_count();
    for week in 1..week_count {
        if !is_deload_week(week, week_count) {
            continue;
        }
        if plan.has_note(week, true) {
            *violations += 1;
            continue;
        }
        scale_week(plan, week, deload::LOAD_FACTOR);
        plan.week_notes.push(WeekNote {
            week_index: week,
            adjustment: WeekAdjustment::Deload,
        });
        warnings.push(format!(
            "week {week}: scheduled deload week, target load reduced to {:.0}%",
            deload::LOAD_FACTOR * 100.0
        ));
        *violations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityEntry, ActivityLevel, DietaryPreferences, ExperienceLevel, MealEntry, PlanDay, Sex,
    };
    use chrono::Utc;

    fn profile_with_flags(flags: &[&str]) -> Profile {
        Profile {
            id: "prof_test".to_owned(),
            name: "Test".to_owned(),
            age: 31,
            sex: Sex::Female,
            height_cm: 165.0,
            weight_kg: 62.0,
            activity_level: ActivityLevel::Moderate,
            health_flags: flags.iter().map(|s| (*s).to_owned()).collect(),
            dietary: DietaryPreferences::default(),
            experience: ExperienceLevel::Beginner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn tags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn activity(name: &str, tag_list: &[&str], load: f64) -> ActivityEntry {
        ActivityEntry::new(name, tags(tag_list), load, 30)
    }

    fn meal(name: &str, tag_list: &[&str]) -> MealEntry {
        MealEntry {
            name: name.to_owned(),
            tags: tags(tag_list),
            kcal: 400.0,
            protein_g: 20.0,
            carbs_g: 40.0,
            fat_g: 15.0,
            flagged: None,
        }
    }

    #[test]
    fn test_empty_plan_confidence_is_one() {
        let report = verify(DraftPlan::default(), &profile_with_flags(&[]), None);
        assert!(report.warnings.is_empty());
        assert!((report.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pregnant_deep_twists_single_entry() {
        let draft = DraftPlan {
            days: vec![PlanDay {
                index: 0,
                activities: vec![activity("twisted flow", &["deep_twists"], 10.0)],
                meals: vec![],
            }],
            week_notes: vec![],
        };
        let report = verify(draft, &profile_with_flags(&["pregnant"]), None);

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("pregnant"));
        assert!(report.warnings[0].contains("deep_twists"));
        assert!(report.plan.days[0].activities[0].flagged.is_some());
        assert!(report.confidence.abs() < f64::EPSILON);
    }

    #[test]
    fn test_allergy_flagging_uses_override_constraints() {
        let draft = DraftPlan {
            days: vec![PlanDay {
                index: 0,
                activities: vec![],
                meals: vec![meal("peanut bowl", &["peanuts"]), meal("rice", &["grain"])],
            }],
            week_notes: vec![],
        };
        let constraints = DietaryPreferences {
            allergies: tags(&["peanuts"]),
            ..DietaryPreferences::default()
        };
        let report = verify(draft, &profile_with_flags(&[]), Some(&constraints));

        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("peanuts"));
        assert!((report.confidence - 0.5).abs() < 1e-9);
    }

    fn two_week_draft(week1_load: f64, week2_load: f64) -> DraftPlan {
        let days = (0..14)
            .map(|i| PlanDay {
                index: i,
                activities: vec![activity(
                    "session",
                    &["steady"],
                    if i < 7 { week1_load / 7.0 } else { week2_load / 7.0 },
                )],
                meals: vec![],
            })
            .collect();
        DraftPlan {
            days,
            week_notes: vec![],
        }
    }

    #[test]
    fn test_beginner_progression_capped_at_five_percent() {
        let report = verify(two_week_draft(100.0, 110.0), &profile_with_flags(&[]), None);

        assert_eq!(report.plan.week_notes.len(), 1);
        let WeekAdjustment::LoadCapped { original, capped } = report.plan.week_notes[0].adjustment
        else {
            panic!("expected a load cap note");
        };
        assert!((original - 110.0).abs() < 1e-6);
        assert!((capped - 105.0).abs() < 1e-6);

        let scaled: f64 = report.plan.days[7..]
            .iter()
            .flat_map(|d| &d.activities)
            .map(|a| a.load)
            .sum();
        assert!((scaled - 105.0).abs() < 1e-6);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_progression_within_cap_passes() {
        let report = verify(two_week_draft(100.0, 104.0), &profile_with_flags(&[]), None);
        assert!(report.warnings.is_empty());
        assert!((report.confidence - 1.0).abs() < f64::EPSILON);
    }

    fn eight_week_draft() -> DraftPlan {
        let days = (0..56)
            .map(|i| PlanDay {
                index: i,
                activities: vec![activity("session", &["steady"], 10.0)],
                meals: vec![meal("bowl", &["grain"])],
            })
            .collect();
        DraftPlan {
            days,
            week_notes: vec![],
        }
    }

    #[test]
    fn test_week_five_is_deloaded_in_eight_week_plan() {
        let report = verify(eight_week_draft(), &profile_with_flags(&[]), None);

        assert!(report
            .plan
            .week_notes
            .iter()
            .any(|n| n.week_index == 5 && matches!(n.adjustment, WeekAdjustment::Deload)));

        let week5: f64 = report.plan.days[35..42]
            .iter()
            .flat_map(|d| &d.activities)
            .map(|a| a.load)
            .sum();
        // 7 days * 10.0 * 0.6
        assert!((week5 - 42.0).abs() < 1e-6);
    }

    #[test]
    fn test_short_plans_have_no_deload() {
        let report = verify(two_week_draft(100.0, 100.0), &profile_with_flags(&[]), None);
        assert!(report.plan.week_notes.is_empty());
    }

    #[test]
    fn test_reverification_is_idempotent() {
        let draft = DraftPlan {
            days: vec![PlanDay {
                index: 0,
                activities: vec![
                    activity("twisted flow", &["deep_twists"], 10.0),
                    activity("walk", &["low_impact"], 5.0),
                ],
                meals: vec![meal("salty ramen", &["high_sodium"])],
            }],
            week_notes: vec![],
        };
        let profile = profile_with_flags(&["pregnant", "hypertension"]);

        let first = verify(draft, &profile, None);
        let second = verify(first.plan.clone(), &profile, None);

        assert!(second.warnings.is_empty());
        assert!((second.confidence - first.confidence).abs() < f64::EPSILON);
        assert_eq!(second.plan, first.plan);
    }

    #[test]
    fn test_reverification_idempotent_with_week_adjustments() {
        let profile = profile_with_flags(&[]);
        let mut draft = eight_week_draft();
        // Make week 1 exceed the beginner cap as well.
        for day in &mut draft.days[7..14] {
            day.activities[0].load = 12.0;
        }

        let first = verify(draft, &profile, None);
        assert!(!first.warnings.is_empty());

        let second = verify(first.plan.clone(), &profile, None);
        assert!(second.warnings.is_empty());
        assert!((second.confidence - first.confidence).abs() < f64::EPSILON);
        assert_eq!(second.plan, first.plan);
    }
}
