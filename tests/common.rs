// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Profile, intake, and service builders used across suites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use vitalplan::generator::PlanGenerator;
use vitalplan::models::{
    ActivityLevel, DietaryPreferences, ExperienceLevel, Goal, Intake, Profile, Sex,
};
use vitalplan::services::PlannerService;
use vitalplan::storage::{MemoryPlanStore, MemoryProfileStore, ProfileStore};
use vitalplan::synthesis::{CatalogSynthesis, SynthesisProvider};

/// A healthy adult profile with no flags
pub fn base_profile(id: &str) -> Profile {
    Profile {
        id: id.to_owned(),
        name: "Test Member".to_owned(),
        age: 30,
        sex: Sex::Male,
        height_cm: 175.0,
        weight_kg: 70.0,
        activity_level: ActivityLevel::Moderate,
        health_flags: BTreeSet::new(),
        dietary: DietaryPreferences::default(),
        experience: ExperienceLevel::Beginner,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn flagged_profile(id: &str, flags: &[&str]) -> Profile {
    let mut profile = base_profile(id);
    profile.health_flags = flags.iter().map(|s| (*s).to_owned()).collect();
    profile
}

pub fn basic_intake(goal: Goal) -> Intake {
    Intake {
        goals: vec![goal],
        modules: vec!["fitness".to_owned(), "nutrition".to_owned()],
        dietary_override: None,
        session_minutes: 45,
        duration_days: Some(7),
        notes: String::new(),
    }
}

/// Planner service over in-memory stores with the given provider and seed
/// profiles
pub async fn planner_with(
    provider: Arc<dyn SynthesisProvider>,
    seeds: Vec<Profile>,
) -> PlannerService {
    let profiles = Arc::new(MemoryProfileStore::default());
    for profile in seeds {
        profiles.put(profile).await.unwrap();
    }
    PlannerService::new(
        PlanGenerator::new(provider),
        profiles,
        Arc::new(MemoryPlanStore::new()),
    )
}

pub async fn catalog_planner(seeds: Vec<Profile>) -> PlannerService {
    planner_with(Arc::new(CatalogSynthesis::new()), seeds).await
}
