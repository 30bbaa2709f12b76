// ABOUTME: Application services layered over the domain pipeline and stores
// ABOUTME: Route handlers call services; services own orchestration and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

pub mod planner;

pub use planner::{PlanResponse, PlannerService};
