//! Modelo de Manufacturer
//!
//! Datos de referencia de fabricantes. Se siembran al arranque y los
//! códigos se validan en cada escritura de vehículos.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Fabricante con código numérico asignado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Manufacturer {
    pub code: i32,
    pub name: String,
}

impl Manufacturer {
    pub fn new(code: i32, name: &str) -> Self {
        Self {
            code,
            name: name.to_string(),
        }
    }
}

/// Fabricantes conocidos por el inventario
pub fn seed_manufacturers() -> Vec<Manufacturer> {
    vec![
        Manufacturer::new(100, "Audi"),
        Manufacturer::new(101, "Chevrolet"),
        Manufacturer::new(102, "Ford"),
        Manufacturer::new(103, "BMW"),
        Manufacturer::new(104, "Dodge"),
    ]
}
