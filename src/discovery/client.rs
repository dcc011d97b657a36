//! Cliente del registro de servicios
//!
//! Consulta el catálogo HTTP del registro para obtener las instancias
//! anunciadas de un servicio por nombre.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Instancia anunciada de un servicio en el catálogo
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInstance {
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "ServiceAddress", default)]
    pub service_address: String,
    #[serde(rename = "ServicePort")]
    pub service_port: u16,
}

impl ServiceInstance {
    /// URL base de la instancia; ServiceAddress tiene prioridad sobre
    /// la dirección del nodo
    pub fn base_url(&self) -> String {
        let host = if self.service_address.is_empty() {
            &self.address
        } else {
            &self.service_address
        };
        format!("http://{}:{}", host, self.service_port)
    }
}

/// Acceso al registro de servicios
#[async_trait]
pub trait DiscoveryClient: Send + Sync {
    /// Instancias actualmente anunciadas para un servicio
    async fn instances(&self, service_name: &str) -> Result<Vec<ServiceInstance>>;
}

/// Cliente HTTP del catálogo del registro
pub struct HttpDiscoveryClient {
    registry_url: String,
    client: reqwest::Client,
}

impl HttpDiscoveryClient {
    pub fn new(registry_url: String, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            registry_url,
            client,
        }
    }
}

#[async_trait]
impl DiscoveryClient for HttpDiscoveryClient {
    async fn instances(&self, service_name: &str) -> Result<Vec<ServiceInstance>> {
        let url = format!(
            "{}/v1/catalog/service/{}",
            self.registry_url.trim_end_matches('/'),
            service_name
        );

        log::debug!("🌐 Querying service registry: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("registry returned status {}", status));
        }

        let instances = response.json::<Vec<ServiceInstance>>().await?;
        Ok(instances)
    }
}
