//! Capa de persistencia
//!
//! Traits de acceso a datos para vehículos y fabricantes, con una
//! implementación en memoria y una implementación PostgreSQL. La
//! ausencia de un registro se reporta como Ok(None) / Ok(false);
//! el servicio decide qué cuenta como error.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{Manufacturer, Vehicle};
use crate::utils::errors::AppResult;

/// Acceso a datos de vehículos
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Todos los vehículos en orden ascendente de id
    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    /// Inserta un vehículo nuevo asignando id y timestamps
    async fn insert(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Persiste un vehículo existente actualizando modified_at.
    /// Espera un id ya asignado.
    async fn update(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    /// Elimina por id; false si no existía
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Acceso a datos de fabricantes
#[async_trait]
pub trait ManufacturerStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Manufacturer>>;

    async fn find_by_code(&self, code: i32) -> AppResult<Option<Manufacturer>>;

    /// Inserta o reemplaza un fabricante (siembra al arranque)
    async fn save(&self, manufacturer: Manufacturer) -> AppResult<()>;
}

pub use memory::{InMemoryManufacturerStore, InMemoryVehicleStore};
pub use postgres::{init_schema, PostgresManufacturerStore, PostgresVehicleStore};
