//! Store de precios en memoria
//!
//! Mantiene los precios por price_id con unicidad de vehicle_id y
//! siembra precios aleatorios al arranque del servicio.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use rand::Rng;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::pricing::error::PriceWriteError;
use crate::pricing::model::{Price, ValidPrice};

/// Store de precios compartible entre handlers
#[derive(Clone)]
pub struct PriceStore {
    records: Arc<RwLock<BTreeMap<i64, Price>>>,
    next_id: Arc<AtomicI64>,
}

impl PriceStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Inserta un precio nuevo; rechaza vehicle_id repetidos
    pub async fn create(&self, valid: ValidPrice) -> Result<Price, PriceWriteError> {
        let mut records = self.records.write().await;

        if records.values().any(|p| p.vehicle_id == valid.vehicle_id) {
            return Err(PriceWriteError::DuplicateVehicleId(valid.vehicle_id));
        }

        let price_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let price = Price {
            price_id,
            currency: valid.currency,
            price: valid.price,
            vehicle_id: valid.vehicle_id,
        };
        records.insert(price_id, price.clone());
        Ok(price)
    }

    pub async fn find(&self, price_id: i64) -> Option<Price> {
        let records = self.records.read().await;
        records.get(&price_id).cloned()
    }

    pub async fn find_by_vehicle_id(&self, vehicle_id: i64) -> Option<Price> {
        let records = self.records.read().await;
        records.values().find(|p| p.vehicle_id == vehicle_id).cloned()
    }

    /// Reemplaza un registro existente; Ok(None) si no existe. La
    /// unicidad de vehicle_id se verifica contra los demás registros.
    pub async fn update(
        &self,
        price_id: i64,
        valid: ValidPrice,
    ) -> Result<Option<Price>, PriceWriteError> {
        let mut records = self.records.write().await;

        if !records.contains_key(&price_id) {
            return Ok(None);
        }

        let duplicate = records
            .values()
            .any(|p| p.price_id != price_id && p.vehicle_id == valid.vehicle_id);
        if duplicate {
            return Err(PriceWriteError::DuplicateVehicleId(valid.vehicle_id));
        }

        let price = Price {
            price_id,
            currency: valid.currency,
            price: valid.price,
            vehicle_id: valid.vehicle_id,
        };
        records.insert(price_id, price.clone());
        Ok(Some(price))
    }

    pub async fn delete(&self, price_id: i64) -> bool {
        let mut records = self.records.write().await;
        records.remove(&price_id).is_some()
    }

    pub async fn count(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }

    /// Siembra un precio USD uniforme entre 5000.00 y 25000.00 para
    /// los vehículos 1..=count
    pub async fn seed(&self, count: i64) {
        let amounts: Vec<Decimal> = {
            let mut rng = rand::thread_rng();
            (0..count)
                .map(|_| Decimal::new(rng.gen_range(500_000..2_500_000), 2))
                .collect()
        };

        for (offset, amount) in amounts.into_iter().enumerate() {
            let valid = ValidPrice {
                currency: "USD".to_string(),
                price: amount,
                vehicle_id: offset as i64 + 1,
            };
            if let Err(e) = self.create(valid).await {
                log::warn!("⚠️ Skipping seed price for vehicle {}: {}", offset as i64 + 1, e);
            }
        }
    }
}

impl Default for PriceStore {
    fn default() -> Self {
        Self::new()
    }
}
