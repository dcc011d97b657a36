//! Servicio de agregación de vehículos
//!
//! Orquesta el CRUD contra el almacén y completa los campos
//! transitorios (precio y dirección) llamando a los servicios
//! externos en cada lectura. Los fallos de esos servicios nunca
//! rompen la operación: el precio degrada al centinela y la
//! dirección se queda como vino.

use std::sync::Arc;

use crate::clients::{MapsClient, PriceClient};
use crate::models::Vehicle;
use crate::repositories::{ManufacturerStore, VehicleStore};
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};
use crate::utils::validation::validate_coordinates;

/// Registros enriquecidos en paralelo por lote
const ENRICH_BATCH_SIZE: usize = 10;

pub struct VehicleService {
    store: Arc<dyn VehicleStore>,
    manufacturers: Arc<dyn ManufacturerStore>,
    price_client: PriceClient,
    maps_client: MapsClient,
    enrich_on_update: bool,
}

impl VehicleService {
    pub fn new(
        store: Arc<dyn VehicleStore>,
        manufacturers: Arc<dyn ManufacturerStore>,
        price_client: PriceClient,
        maps_client: MapsClient,
        enrich_on_update: bool,
    ) -> Self {
        Self {
            store,
            manufacturers,
            price_client,
            maps_client,
            enrich_on_update,
        }
    }

    /// Lista todos los vehículos con precio y dirección en vivo
    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.store.find_all().await?;
        log::info!("🚗 Listing {} vehicles", vehicles.len());

        // Procesar en lotes para no sobrecargar los servicios externos
        let mut enriched = Vec::with_capacity(vehicles.len());
        for chunk in vehicles.chunks(ENRICH_BATCH_SIZE) {
            let mut futures = Vec::new();
            for vehicle in chunk {
                futures.push(self.enrich(vehicle.clone()));
            }
            enriched.extend(futures::future::join_all(futures).await);
        }

        Ok(enriched)
    }

    /// Busca un vehículo por id, enriquecido
    pub async fn find_by_id(&self, id: i64) -> AppResult<Vehicle> {
        let vehicle = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        Ok(self.enrich(vehicle).await)
    }

    /// Crea o actualiza según venga el id.
    ///
    /// Alta: se persiste y la copia devuelta ya viene enriquecida.
    /// Actualización: del payload solo se trasplantan `details` y
    /// `location` sobre el registro existente (condición, timestamps
    /// e id se conservan) y la respuesta NO se enriquece salvo que el
    /// servicio se haya configurado con `enrich_on_update`.
    pub async fn save(&self, mut vehicle: Vehicle) -> AppResult<Vehicle> {
        validate_coordinates(vehicle.location.lat, vehicle.location.lon)
            .map_err(|e| bad_request_error(&format!("Invalid coordinates: {}", e)))?;
        self.resolve_manufacturer(&mut vehicle).await?;

        match vehicle.id {
            Some(id) => self.update_existing(id, vehicle).await,
            None => self.create(vehicle).await,
        }
    }

    /// Elimina un vehículo; el id tiene que existir
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        self.store.delete(id).await?;
        log::info!("🗑️ Vehicle {} deleted", id);
        Ok(())
    }

    async fn create(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let saved = self.store.insert(vehicle).await?;
        if let Some(id) = saved.id {
            log::info!("💾 Vehicle {} created", id);
        }

        Ok(self.enrich(saved).await)
    }

    async fn update_existing(&self, id: i64, incoming: Vehicle) -> AppResult<Vehicle> {
        let mut existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        existing.details = incoming.details;
        existing.location = incoming.location;

        let updated = self.store.update(existing).await?;
        log::info!("💾 Vehicle {} updated", id);

        if self.enrich_on_update {
            return Ok(self.enrich(updated).await);
        }

        Ok(updated)
    }

    /// Sustituye la referencia de fabricante por el registro canónico
    async fn resolve_manufacturer(&self, vehicle: &mut Vehicle) -> AppResult<()> {
        let code = vehicle.details.manufacturer.code;
        match self.manufacturers.find_by_code(code).await? {
            Some(manufacturer) => {
                vehicle.details.manufacturer = manufacturer;
                Ok(())
            }
            None => Err(bad_request_error(&format!(
                "Unknown manufacturer code: {}",
                code
            ))),
        }
    }

    /// Completa los campos transitorios consultando precio y mapas en
    /// paralelo; ambas llamadas degradan sin fallar
    async fn enrich(&self, mut vehicle: Vehicle) -> Vehicle {
        let id = match vehicle.id {
            Some(id) => id,
            None => return vehicle,
        };

        let (price, location) = tokio::join!(
            self.price_client.get_price(id),
            self.maps_client.get_address(vehicle.location.clone())
        );

        vehicle.price = Some(price);
        vehicle.location = location;
        vehicle
    }
}
