//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. El
//! servicio de vehículos orquesta el almacén de registros y los
//! clientes de precios y mapas.

pub mod vehicle_service;

pub use vehicle_service::VehicleService;
