//! API endpoints
//!
//! Este módulo contiene los endpoints de la API de inventario.

pub mod vehicles;

pub use vehicles::*;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(vehicles::create_vehicles_router())
        .route("/health", get(health_check))
}

/// GET /health - Health check del servicio
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "vehicles-api",
        "status": "healthy",
        "message": "Servicio de inventario funcionando correctamente"
    }))
}
