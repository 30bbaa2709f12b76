// ABOUTME: HTTP surface - axum router for plans, profiles, and health endpoints
// ABOUTME: Boundary payloads map free-form enum strings into the domain with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # HTTP routes
//!
//! A thin layer over [`PlannerService`] and the stores. Request payloads
//! carry enum fields as plain strings and are mapped into the domain through
//! the tolerant `parse` constructors, preserving the product's
//! default-on-unknown behavior (an unrecognized activity level degrades to
//! sedentary instead of rejecting the request). Structural problems - wrong
//! types, missing required fields - are still rejected by serde with a 400
//! before they reach the core.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::{AppError, ErrorResponse};
use crate::models::{
    ActivityLevel, DietaryPreferences, ExperienceLevel, Goal, Intake, Profile, Sex,
};
use crate::services::PlannerService;
use crate::storage::ProfileStore;

/// Shared state handed to every handler
pub struct AppState {
    pub planner: PlannerService,
    pub profiles: Arc<dyn ProfileStore>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api/plans", post(create_plan).get(list_plans))
        .route("/api/plans/:id", get(get_plan).delete(delete_plan))
        .route("/api/profiles", post(put_profile).get(list_profiles))
        .route(
            "/api/profiles/:id",
            get(get_profile).put(update_profile).delete(delete_profile),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// Boundary payloads
// ============================================================================

/// Profile fields as submitted by clients; enum fields are free-form strings
#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub age: u32,
    pub sex: String,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: String,
    #[serde(default)]
    pub health_flags: Vec<String>,
    #[serde(default)]
    pub dietary: DietaryPreferences,
    #[serde(default)]
    pub experience: String,
}

impl ProfilePayload {
    fn into_profile(self, id: String) -> Profile {
        let now = Utc::now();
        Profile {
            id,
            name: self.name,
            age: self.age,
            sex: Sex::parse(&self.sex),
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            activity_level: ActivityLevel::parse(&self.activity_level),
            health_flags: self.health_flags.into_iter().collect(),
            dietary: self.dietary,
            experience: ExperienceLevel::parse(&self.experience),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Intake fields as submitted by clients
#[derive(Debug, Deserialize)]
pub struct IntakePayload {
    pub goals: Vec<String>,
    #[serde(default)]
    pub modules: Vec<String>,
    #[serde(default)]
    pub dietary_override: Option<DietaryPreferences>,
    pub session_minutes: u32,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl From<IntakePayload> for Intake {
    fn from(payload: IntakePayload) -> Self {
        Self {
            goals: payload.goals.iter().map(|g| Goal::parse(g)).collect(),
            modules: payload.modules,
            dietary_override: payload.dietary_override,
            session_minutes: payload.session_minutes,
            duration_days: payload.duration_days,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub profile_id: String,
    pub intake: IntakePayload,
}

#[derive(Debug, Deserialize)]
pub struct ListPlansQuery {
    pub profile_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProfileIdResponse {
    id: String,
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn ready() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ready",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<Response, AppError> {
    let response = state
        .planner
        .create_plan(&request.profile_id, request.intake.into())
        .await?;
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

async fn get_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let plan = state.planner.get_plan(&id).await?;
    Ok((StatusCode::OK, Json(plan)).into_response())
}

async fn list_plans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListPlansQuery>,
) -> Result<Response, AppError> {
    let summaries = state.planner.list_plans(query.profile_id.as_deref()).await?;
    Ok((StatusCode::OK, Json(summaries)).into_response())
}

async fn delete_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state.planner.delete_plan(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn put_profile(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .clone()
        .unwrap_or_else(|| format!("prof_{}", uuid::Uuid::new_v4().simple()));
    let profile = payload.into_profile(id.clone());
    profile.validate_demographics()?;
    state.profiles.put(profile).await?;
    Ok((StatusCode::CREATED, Json(ProfileIdResponse { id })).into_response())
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Response, AppError> {
    let existing = state
        .profiles
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("profile {id}")))?;

    let mut profile = payload.into_profile(id.clone());
    profile.created_at = existing.created_at;
    profile.validate_demographics()?;
    state.profiles.put(profile).await?;
    Ok((StatusCode::OK, Json(ProfileIdResponse { id })).into_response())
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let profile = state
        .profiles
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("profile {id}")))?;
    Ok((StatusCode::OK, Json(profile)).into_response())
}

async fn list_profiles(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let profiles = state.profiles.list().await?;
    Ok((StatusCode::OK, Json(profiles)).into_response())
}

async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    state.profiles.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
