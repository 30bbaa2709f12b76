// ABOUTME: Server binary - wires config, logging, stores, and the planner pipeline
// ABOUTME: Serves the axum router with graceful shutdown on ctrl-c
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 VitalPlan

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use vitalplan::config::{ServerConfig, SynthesisProviderType};
use vitalplan::generator::PlanGenerator;
use vitalplan::routes::{router, AppState};
use vitalplan::services::PlannerService;
use vitalplan::storage::{MemoryPlanStore, MemoryProfileStore};
use vitalplan::synthesis::{CatalogSynthesis, OpenAiCompatibleSynthesis, SynthesisProvider};

#[tokio::main]
async fn main() -> Result<()> {
    vitalplan::logging::init().context("logging setup failed")?;

    let config = ServerConfig::from_env().context("configuration error")?;

    let provider: Arc<dyn SynthesisProvider> = match config.synthesis_provider {
        SynthesisProviderType::Catalog => Arc::new(CatalogSynthesis::new()),
        SynthesisProviderType::Llm => Arc::new(OpenAiCompatibleSynthesis::from_env()?),
    };
    info!(provider = provider.name(), "synthesis provider selected");

    let profiles = Arc::new(MemoryProfileStore::new(config.anchor_profile_id.clone()));
    let plans = Arc::new(MemoryPlanStore::new());

    let planner = PlannerService::new(
        PlanGenerator::new(provider),
        profiles.clone(),
        plans,
    )
    .with_sample_fallback(config.sample_fallback);

    let state = Arc::new(AppState {
        planner,
        profiles,
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "vitalplan server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    } else {
        info!("shutdown signal received");
    }
}
