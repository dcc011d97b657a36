//! Utilidades de validación
//!
//! Funciones helper para validación de datos de entrada.

use validator::ValidationError;

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lon) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lon);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}
