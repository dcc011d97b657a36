//! Modelo de Vehicle
//!
//! Struct Vehicle con sus componentes (Details, Location) y el payload
//! de escritura para las operaciones CRUD. Los campos price y address
//! son transitorios: los llena el enriquecimiento en cada lectura y
//! nunca se persisten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::manufacturer::Manufacturer;

/// Condición del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "NEW",
            Condition::Used => "USED",
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Condition::New),
            "USED" => Ok(Condition::Used),
            other => Err(format!("unknown condition '{}'", other)),
        }
    }
}

/// Ubicación del vehículo. Los campos de dirección solo se llenan
/// vía enriquecimiento; el caller no es autoridad sobre ellos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            address: None,
            city: None,
            state: None,
            zip: None,
        }
    }

    /// Descarta los campos de dirección enriquecidos
    pub fn clear_address(&mut self) {
        self.address = None;
        self.city = None;
        self.state = None;
        self.zip = None;
    }
}

/// Ficha técnica del vehículo
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Details {
    #[validate(length(min = 1, max = 100))]
    pub body: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub manufacturer: Manufacturer,

    #[validate(range(min = 1, max = 10))]
    pub number_of_doors: Option<i32>,

    pub fuel_type: Option<String>,

    pub engine: Option<String>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(range(min = 1886, max = 2100))]
    pub model_year: Option<i32>,

    #[validate(range(min = 1886, max = 2100))]
    pub production_year: Option<i32>,

    pub external_color: Option<String>,
}

/// Vehicle principal del inventario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub condition: Condition,
    pub details: Details,
    pub location: Location,
    /// Precio listado, presente solo tras enriquecimiento
    pub price: Option<String>,
}

impl Vehicle {
    /// Descarta los campos transitorios antes de persistir
    pub fn clear_transient(&mut self) {
        self.price = None;
        self.location.clear_address();
    }
}

/// Payload de escritura para POST/PUT de vehículos
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehiclePayload {
    pub condition: Condition,

    #[validate]
    pub details: Details,

    pub location: Location,
}

impl VehiclePayload {
    /// Construye el Vehicle a guardar; `id` viene del path en updates
    pub fn into_vehicle(self, id: Option<i64>) -> Vehicle {
        Vehicle {
            id,
            created_at: None,
            modified_at: None,
            condition: self.condition,
            details: self.details,
            location: self.location,
            price: None,
        }
    }
}
