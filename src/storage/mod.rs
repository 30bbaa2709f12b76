// ABOUTME: Storage abstraction for profiles and verified plans
// ABOUTME: Async traits so backends can be swapped without touching the pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! Storage abstraction layer.
//!
//! Persistence is an external collaborator from the pipeline's point of
//! view: the core only needs get/put/list/delete by id. Backends implement
//! these traits and are injected explicitly at startup - never reached
//! through module-level globals.

pub mod memory;

pub use memory::{MemoryPlanStore, MemoryProfileStore, DEFAULT_ANCHOR_PROFILE_ID};

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{PlanSummary, Profile, VerifiedPlan};

/// Profile persistence contract
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Get a profile by id
    async fn get(&self, id: &str) -> AppResult<Option<Profile>>;

    /// Create or replace a profile
    async fn put(&self, profile: Profile) -> AppResult<()>;

    /// List all profiles
    async fn list(&self) -> AppResult<Vec<Profile>>;

    /// Delete a profile by id.
    ///
    /// # Errors
    ///
    /// Returns `DeleteRejected` for the designated anchor profile, which
    /// must never be deletable.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Verified-plan persistence contract
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Persist a verified plan
    async fn put(&self, plan: VerifiedPlan) -> AppResult<()>;

    /// Get a plan by id
    async fn get(&self, id: &str) -> AppResult<Option<VerifiedPlan>>;

    /// List plan summaries, optionally restricted to one profile
    async fn list(&self, profile_id: Option<&str>) -> AppResult<Vec<PlanSummary>>;

    /// Delete a plan by id
    async fn delete(&self, id: &str) -> AppResult<()>;
}
