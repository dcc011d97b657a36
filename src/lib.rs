//! Inventario de vehículos con enriquecimiento en vivo
//!
//! La librería reúne los módulos compartidos por los dos binarios:
//! el API de inventario (vehicles-api) y el servicio de precios
//! (pricing-service).

pub mod api;
pub mod clients;
pub mod config;
pub mod discovery;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
