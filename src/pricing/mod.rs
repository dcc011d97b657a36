//! Servicio de precios
//!
//! Módulo autocontenido: modelo validado, almacén en memoria con
//! unicidad por vehículo, traducción de errores a códigos estables y
//! el router REST que expone todo. El binario pricing-service lo sirve
//! tal cual; los tests de integración lo montan en listeners locales.

pub mod api;
pub mod error;
pub mod model;
pub mod store;

pub use api::create_pricing_router;
pub use error::{translate, PriceWriteError, TranslatedError, UNKNOWN_ERROR, VEHICLE_ID_NOT_UNIQUE};
pub use model::{Price, PricePayload, PriceViolation, ValidPrice};
pub use store::PriceStore;
