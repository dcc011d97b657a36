//! Resolución de endpoints
//!
//! Decide en cada llamada qué URL base usar para un servicio
//! colaborador: la primera instancia anunciada en el registro o el
//! endpoint local configurado. Nunca falla y no cachea resultados;
//! cada resolución refleja el estado actual del registro.

use std::sync::Arc;

use crate::discovery::client::DiscoveryClient;

/// Servicio colaborador a resolver
#[derive(Debug, Clone)]
pub struct EndpointTarget {
    pub service_name: String,
    pub use_discovery: bool,
    pub local_url: String,
}

impl EndpointTarget {
    pub fn new(service_name: &str, use_discovery: bool, local_url: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            use_discovery,
            local_url: local_url.to_string(),
        }
    }
}

/// Resolver de endpoints sobre el registro de servicios
#[derive(Clone)]
pub struct EndpointResolver {
    discovery: Arc<dyn DiscoveryClient>,
}

impl EndpointResolver {
    pub fn new(discovery: Arc<dyn DiscoveryClient>) -> Self {
        Self { discovery }
    }

    /// URL base a usar para el target en esta llamada
    pub async fn resolve(&self, target: &EndpointTarget) -> String {
        if !target.use_discovery {
            return target.local_url.clone();
        }

        match self.discovery.instances(&target.service_name).await {
            Ok(instances) => match instances.first() {
                Some(instance) => instance.base_url(),
                None => {
                    log::debug!(
                        "🌐 No instances advertised for '{}', using local endpoint",
                        target.service_name
                    );
                    target.local_url.clone()
                }
            },
            Err(e) => {
                log::warn!(
                    "⚠️ Service registry unavailable for '{}': {}, using local endpoint",
                    target.service_name,
                    e
                );
                target.local_url.clone()
            }
        }
    }
}
