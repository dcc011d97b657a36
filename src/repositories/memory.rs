//! Stores en memoria
//!
//! Implementación en memoria de los stores, usada cuando no hay
//! DATABASE_URL configurada y en los tests de integración.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Manufacturer, Vehicle};
use crate::repositories::{ManufacturerStore, VehicleStore};
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};

/// Store de vehículos respaldado por un BTreeMap (iteración por id)
pub struct InMemoryVehicleStore {
    records: Arc<RwLock<BTreeMap<i64, Vehicle>>>,
    next_id: AtomicI64,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryVehicleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn insert(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        vehicle.id = Some(id);
        vehicle.created_at = Some(now);
        vehicle.modified_at = Some(now);
        vehicle.clear_transient();

        let mut records = self.records.write().await;
        records.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        let id = vehicle
            .id
            .ok_or_else(|| bad_request_error("vehicle id is required for updates"))?;

        let mut records = self.records.write().await;
        if !records.contains_key(&id) {
            return Err(not_found_error("Vehicle", id));
        }

        vehicle.modified_at = Some(Utc::now());
        vehicle.clear_transient();
        records.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(&id).is_some())
    }
}

/// Store de fabricantes respaldado por un BTreeMap (iteración por código)
pub struct InMemoryManufacturerStore {
    records: Arc<RwLock<BTreeMap<i32, Manufacturer>>>,
}

impl InMemoryManufacturerStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for InMemoryManufacturerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ManufacturerStore for InMemoryManufacturerStore {
    async fn find_all(&self) -> AppResult<Vec<Manufacturer>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>> {
        let records = self.records.read().await;
        Ok(records.get(&code).cloned())
    }

    async fn save(&self, manufacturer: Manufacturer) -> AppResult<()> {
        let mut records = self.records.write().await;
        records.insert(manufacturer.code, manufacturer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, Details, Location, Manufacturer};

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: None,
            created_at: None,
            modified_at: None,
            condition: Condition::Used,
            details: Details {
                body: "sedan".to_string(),
                model: "Impala".to_string(),
                manufacturer: Manufacturer::new(101, "Chevrolet"),
                number_of_doors: Some(4),
                fuel_type: Some("Gasoline".to_string()),
                engine: Some("3.6L V6".to_string()),
                mileage: Some(32280),
                model_year: Some(2018),
                production_year: Some(2018),
                external_color: Some("white".to_string()),
            },
            location: Location::new(40.73061, -73.935242),
            price: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = InMemoryVehicleStore::new();

        let first = store.insert(sample_vehicle()).await.unwrap();
        let second = store.insert(sample_vehicle()).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert!(first.created_at.is_some());
        assert_eq!(first.created_at, first.modified_at);
    }

    #[tokio::test]
    async fn test_insert_strips_transient_fields() {
        let store = InMemoryVehicleStore::new();

        let mut vehicle = sample_vehicle();
        vehicle.price = Some("USD 9999.00".to_string());
        vehicle.location.address = Some("should not persist".to_string());

        let stored = store.insert(vehicle).await.unwrap();
        let fetched = store.find_by_id(stored.id.unwrap()).await.unwrap().unwrap();

        assert!(fetched.price.is_none());
        assert!(fetched.location.address.is_none());
    }

    #[tokio::test]
    async fn test_find_all_orders_by_id() {
        let store = InMemoryVehicleStore::new();

        for _ in 0..3 {
            store.insert(sample_vehicle()).await.unwrap();
        }

        let all = store.find_all().await.unwrap();
        let ids: Vec<i64> = all.iter().map(|v| v.id.unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_bumps_modified_at() {
        let store = InMemoryVehicleStore::new();

        let mut stored = store.insert(sample_vehicle()).await.unwrap();
        let created_at = stored.created_at;
        let first_modified = stored.modified_at;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        stored.details.mileage = Some(40000);
        let updated = store.update(stored).await.unwrap();

        assert_eq!(updated.created_at, created_at);
        assert!(updated.modified_at > first_modified);
        assert_eq!(updated.details.mileage, Some(40000));
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let store = InMemoryVehicleStore::new();

        let mut vehicle = sample_vehicle();
        vehicle.id = Some(42);

        assert!(store.update(vehicle).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryVehicleStore::new();

        let stored = store.insert(sample_vehicle()).await.unwrap();
        let id = stored.id.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_manufacturer_store() {
        let store = InMemoryManufacturerStore::new();

        store.save(Manufacturer::new(101, "Chevrolet")).await.unwrap();
        store.save(Manufacturer::new(100, "Audi")).await.unwrap();

        let found = store.find_by_code(101).await.unwrap();
        assert_eq!(found, Some(Manufacturer::new(101, "Chevrolet")));
        assert!(store.find_by_code(999).await.unwrap().is_none());

        let all = store.find_all().await.unwrap();
        let codes: Vec<i32> = all.iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![100, 101]);
    }
}
