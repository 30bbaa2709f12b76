// ABOUTME: In-memory reference stores backed by DashMap
// ABOUTME: Enforces the anchor-profile delete guard at the storage boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! In-memory store backends.
//!
//! Suitable for tests and single-process deployments. Callers share a store
//! by wrapping it in an `Arc`; the maps themselves are safely concurrent.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{PlanStore, ProfileStore};
use crate::errors::{AppError, AppResult};
use crate::models::{PlanSummary, Profile, VerifiedPlan};

/// Default anchor profile id; the seeded owner profile the product must
/// never allow deleting
pub const DEFAULT_ANCHOR_PROFILE_ID: &str = "prof_anchit";

/// In-memory profile store with an anchor delete guard
pub struct MemoryProfileStore {
    profiles: DashMap<String, Profile>,
    anchor_id: String,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new(anchor_id: impl Into<String>) -> Self {
        Self {
            profiles: DashMap::new(),
            anchor_id: anchor_id.into(),
        }
    }

    /// The protected anchor profile id
    #[must_use]
    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_PROFILE_ID)
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, id: &str) -> AppResult<Option<Profile>> {
        Ok(self.profiles.get(id).map(|p| p.clone()))
    }

    async fn put(&self, profile: Profile) -> AppResult<()> {
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> =
            self.profiles.iter().map(|e| e.value().clone()).collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(profiles)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        if id == self.anchor_id {
            return Err(AppError::delete_rejected(format!("profile {id}")));
        }
        self.profiles
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("profile {id}")))
    }
}

/// In-memory verified-plan store
#[derive(Default)]
pub struct MemoryPlanStore {
    plans: DashMap<String, VerifiedPlan>,
}

impl MemoryPlanStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn put(&self, plan: VerifiedPlan) -> AppResult<()> {
        self.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<VerifiedPlan>> {
        Ok(self.plans.get(id).map(|p| p.clone()))
    }

    async fn list(&self, profile_id: Option<&str>) -> AppResult<Vec<PlanSummary>> {
        let mut summaries: Vec<PlanSummary> = self
            .plans
            .iter()
            .filter(|e| profile_id.map_or(true, |pid| e.value().profile_id == pid))
            .map(|e| PlanSummary::from(e.value()))
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.plans
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("plan {id}")))
    }
}
