// ABOUTME: VitalPlan - wellness plan generation and safety verification service
// ABOUTME: Crate root wiring the formula engine, generator, verifier, stores, and HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

//! # VitalPlan
//!
//! A wellness-planning service. A member profile plus an intake request goes
//! through a linear pipeline: draft generation (an external synthesis
//! collaborator proposes activities and meals), then safety verification
//! against the profile's health flags, progression caps, and deload cadence.
//! Unsafe content is annotated and downgraded to warnings rather than failing
//! the request; every persisted plan carries its warnings and a confidence
//! score.
//!
//! Module map:
//! - [`models`] - profiles, intake, plan structures
//! - [`intelligence`] - pure formula engine, safety rule tables, verifier
//! - [`synthesis`] - content collaborators (deterministic catalog, LLM)
//! - [`generator`] - structures raw content into day-by-day drafts
//! - [`storage`] - profile and plan stores with the anchor delete guard
//! - [`services`] - the planner pipeline behind the API
//! - [`routes`] - axum HTTP surface

pub mod config;
pub mod errors;
pub mod generator;
pub mod intelligence;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod synthesis;
