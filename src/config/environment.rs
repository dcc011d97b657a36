//! Configuración de variables de entorno
//!
//! Maneja la configuración del entorno para el servicio de inventario:
//! servidor HTTP, base de datos opcional y endpoints de los servicios
//! colaboradores (pricing, maps, registro de servicios).

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    /// Postgres opcional; sin DATABASE_URL se usan los stores en memoria
    pub database_url: Option<String>,
    /// Registro de servicios consultado cuando el discovery está activo
    pub discovery_url: String,
    pub pricing_use_discovery: bool,
    pub pricing_service_name: String,
    pub pricing_endpoint_local: String,
    pub maps_endpoint: String,
    /// Timeout compartido de los clientes HTTP salientes
    pub http_timeout_ms: u64,
    /// Enriquecer también las respuestas de update (apagado por defecto)
    pub enrich_on_update: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var("DATABASE_URL").ok(),
            discovery_url: env::var("DISCOVERY_URL")
                .unwrap_or_else(|_| "http://localhost:8500".to_string()),
            pricing_use_discovery: env::var("PRICING_USE_DISCOVERY")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .expect("PRICING_USE_DISCOVERY must be true or false"),
            pricing_service_name: env::var("PRICING_SERVICE_NAME")
                .unwrap_or_else(|_| "pricing-service".to_string()),
            pricing_endpoint_local: env::var("PRICING_ENDPOINT_LOCAL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            maps_endpoint: env::var("MAPS_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:9191".to_string()),
            http_timeout_ms: env::var("HTTP_TIMEOUT_MS")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("HTTP_TIMEOUT_MS must be a valid number"),
            enrich_on_update: env::var("ENRICH_ON_UPDATE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .expect("ENRICH_ON_UPDATE must be true or false"),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección de bind del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
