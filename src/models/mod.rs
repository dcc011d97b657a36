//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio del inventario
//! de vehículos y los datos de referencia de fabricantes.

pub mod manufacturer;
pub mod vehicle;

pub use manufacturer::{seed_manufacturers, Manufacturer};
pub use vehicle::{Condition, Details, Location, Vehicle, VehiclePayload};
