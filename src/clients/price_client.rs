//! Cliente del servicio de precios
//!
//! Obtiene el precio listado de un vehículo resolviendo el endpoint
//! en cada llamada. Cualquier fallo degrada a un valor centinela;
//! el inventario nunca falla por el servicio de precios.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::discovery::{EndpointResolver, EndpointTarget};

/// Centinela devuelto cuando el precio no está disponible
pub const PRICE_UNAVAILABLE: &str = "(consult price)";

/// Cotización devuelta por el servicio de precios
#[derive(Debug, Deserialize)]
struct PriceQuote {
    currency: String,
    price: Decimal,
}

/// Cliente HTTP del servicio de precios
pub struct PriceClient {
    client: reqwest::Client,
    resolver: EndpointResolver,
    target: EndpointTarget,
}

impl PriceClient {
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

    /// Precio listado del vehículo, por ejemplo "USD 21549.00".
    /// Un solo intento por llamada; sin reintentos ni caché.
    pub async fn get_price(&self, vehicle_id: i64) -> String {
        let base_url = self.resolver.resolve(&self.target).await;

        match self.fetch_quote(&base_url, vehicle_id).await {
            Ok(quote) => format!("{} {}", quote.currency, quote.price),
            Err(e) => {
                log::warn!("💰 Price unavailable for vehicle {}: {}", vehicle_id, e);
                PRICE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn fetch_quote(&self, base_url: &str, vehicle_id: i64) -> Result<PriceQuote> {
        let url = format!(
            "{}/prices/search?vehicle_id={}",
            base_url.trim_end_matches('/'),
            vehicle_id
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("pricing service returned status {}", status));
        }

        Ok(response.json::<PriceQuote>().await?)
    }
}
