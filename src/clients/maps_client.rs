//! Cliente del servicio de mapas
//!
//! Enriquece una ubicación con su dirección postal a partir de las
//! coordenadas. Cualquier fallo devuelve la ubicación original sin
//! modificar.

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::discovery::{EndpointResolver, EndpointTarget};
use crate::models::Location;

/// Dirección devuelta por el servicio de mapas
#[derive(Debug, Deserialize)]
struct AddressResponse {
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

/// Cliente HTTP del servicio de mapas
pub struct MapsClient {
    client: reqwest::Client,
    resolver: EndpointResolver,
    target: EndpointTarget,
}

impl MapsClient {
    pub fn new(resolver: EndpointResolver, target: EndpointTarget, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            resolver,
            target,
        }
    }

    /// Ubicación con su dirección postal; sin cambios si el servicio
    /// falla. Un solo intento por llamada.
    pub async fn get_address(&self, location: Location) -> Location {
        let base_url = self.resolver.resolve(&self.target).await;

        match self
            .fetch_address(&base_url, location.lat, location.lon)
            .await
        {
            Ok(found) => {
                let mut enriched = location;
                enriched.address = found.address;
                enriched.city = found.city;
                enriched.state = found.state;
                enriched.zip = found.zip;
                enriched
            }
            Err(e) => {
                log::warn!(
                    "🗺️ Maps service unavailable for ({}, {}): {}",
                    location.lat,
                    location.lon,
                    e
                );
                location
            }
        }
    }

    async fn fetch_address(&self, base_url: &str, lat: f64, lon: f64) -> Result<AddressResponse> {
        let url = format!(
            "{}/maps?lat={}&lon={}",
            base_url.trim_end_matches('/'),
            lat,
            lon
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("maps service returned status {}", status));
        }

        Ok(response.json::<AddressResponse>().await?)
    }
}
