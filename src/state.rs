//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::services::VehicleService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<VehicleService>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(service: VehicleService, config: EnvironmentConfig) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}
