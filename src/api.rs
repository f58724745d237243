//! REST API server for the business consultant orchestrator
//!
//! Maps inbound JSON requests to orchestrator calls and serializes the
//! results back as JSON. Consultation endpoints answer 200 even when the
//! response text embeds an error banner: the service always returns
//! something renderable.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::models::{ComprehensiveConsultation, Persona, RouteResult};
use crate::orchestrator::Orchestrator;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConsultRequest {
    pub request: String,
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// =============================
/// Info Endpoints
/// =============================

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Multi-Agent AI Business Consultant API"
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy"
    }))
}

/// =============================
/// Consultation Endpoints
/// =============================

async fn consult(state: &ApiState, persona: Persona, req: ConsultRequest) -> Json<RouteResult> {
    let consultation_id = Uuid::new_v4();
    info!(%consultation_id, persona = %persona, "Received consultation request");

    Json(
        state
            .orchestrator
            .process_request(persona.as_str(), &req.request)
            .await,
    )
}

async fn market_consultation(
    State(state): State<ApiState>,
    Json(req): Json<ConsultRequest>,
) -> Json<RouteResult> {
    consult(&state, Persona::Market, req).await
}

async fn financial_consultation(
    State(state): State<ApiState>,
    Json(req): Json<ConsultRequest>,
) -> Json<RouteResult> {
    consult(&state, Persona::Financial, req).await
}

async fn strategy_consultation(
    State(state): State<ApiState>,
    Json(req): Json<ConsultRequest>,
) -> Json<RouteResult> {
    consult(&state, Persona::Strategy, req).await
}

async fn comprehensive_consultation(
    State(state): State<ApiState>,
    Json(req): Json<ConsultRequest>,
) -> Json<ComprehensiveConsultation> {
    let consultation_id = Uuid::new_v4();
    info!(%consultation_id, "Received comprehensive consultation request");

    Json(state.orchestrator.process_comprehensive(&req.request).await)
}

/// =============================
/// Router
/// =============================

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = ApiState { orchestrator };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/consult/market", post(market_consultation))
        .route("/consult/financial", post(financial_consultation))
        .route("/consult/strategy", post(strategy_consultation))
        .route("/consult/comprehensive", post(comprehensive_consultation))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    orchestrator: Arc<Orchestrator>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
