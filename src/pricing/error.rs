//! Errores de escritura de precios y su traducción
//!
//! Convierte fallos de validación e integridad en el conjunto de
//! códigos estables que expone el API de precios. La traducción
//! camina la cadena de causas del error, por lo que sigue funcionando
//! cuando el fallo llega envuelto en otro error.

use std::collections::BTreeSet;
use std::error::Error as StdError;

use http::StatusCode;
use thiserror::Error;

use crate::pricing::model::PriceViolation;

/// Código emitido cuando ninguna causa es reconocible
pub const UNKNOWN_ERROR: &str = "unknown_error";

/// Código emitido cuando el vehicle_id ya tiene precio
pub const VEHICLE_ID_NOT_UNIQUE: &str = "vehicle_id.not.unique";

/// Fallos al escribir un registro de precio
#[derive(Debug, Error)]
pub enum PriceWriteError {
    #[error("price record failed validation")]
    Invalid(Vec<PriceViolation>),

    #[error("a price for vehicle {0} already exists")]
    DuplicateVehicleId(i64),
}

/// Resultado de la traducción: clase HTTP y códigos estables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedError {
    pub status: StatusCode,
    pub codes: BTreeSet<&'static str>,
}

/// Traduce un fallo de escritura al conjunto de códigos del API.
/// El conjunto devuelto nunca queda vacío.
pub fn translate(err: &(dyn StdError + 'static)) -> TranslatedError {
    let mut cause: Option<&(dyn StdError + 'static)> = Some(err);

    while let Some(current) = cause {
        if let Some(write_error) = current.downcast_ref::<PriceWriteError>() {
            return match write_error {
                PriceWriteError::Invalid(violations) => {
                    let codes: BTreeSet<&'static str> =
                        violations.iter().map(|v| v.code()).collect();
                    if codes.is_empty() {
                        log::error!("❌ Price validation failure carried no violations");
                        return unknown();
                    }
                    TranslatedError {
                        status: StatusCode::BAD_REQUEST,
                        codes,
                    }
                }
                PriceWriteError::DuplicateVehicleId(_) => TranslatedError {
                    status: StatusCode::BAD_REQUEST,
                    codes: BTreeSet::from([VEHICLE_ID_NOT_UNIQUE]),
                },
            };
        }
        cause = current.source();
    }

    log::error!("❌ Unrecognized price write failure: {}", err);
    unknown()
}

fn unknown() -> TranslatedError {
    TranslatedError {
        status: StatusCode::BAD_REQUEST,
        codes: BTreeSet::from([UNKNOWN_ERROR]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Error de capa superior que envuelve la causa real
    #[derive(Debug, Error)]
    #[error("could not persist price record")]
    struct WrappedWriteFailure {
        #[source]
        source: PriceWriteError,
    }

    fn codes(translated: &TranslatedError) -> Vec<&'static str> {
        translated.codes.iter().copied().collect()
    }

    #[test]
    fn test_violations_translate_to_their_codes() {
        let err = PriceWriteError::Invalid(vec![
            PriceViolation::CurrencyCodeRequired,
            PriceViolation::PriceRequired,
            PriceViolation::VehicleIdRequired,
        ]);

        let translated = translate(&err);
        assert_eq!(translated.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            codes(&translated),
            vec!["currency.code.required", "price.required", "vehicle_id.required"]
        );
    }

    #[test]
    fn test_duplicate_violations_collapse() {
        let err = PriceWriteError::Invalid(vec![
            PriceViolation::CurrencyCodeInvalid,
            PriceViolation::CurrencyCodeInvalid,
        ]);

        let translated = translate(&err);
        assert_eq!(codes(&translated), vec!["currency.code.invalid"]);
    }

    #[test]
    fn test_duplicate_vehicle_id_translates_to_not_unique() {
        let err = PriceWriteError::DuplicateVehicleId(3);

        let translated = translate(&err);
        assert_eq!(translated.status, StatusCode::BAD_REQUEST);
        assert_eq!(codes(&translated), vec![VEHICLE_ID_NOT_UNIQUE]);
    }

    #[test]
    fn test_wrapped_cause_is_found_through_the_chain() {
        let err = WrappedWriteFailure {
            source: PriceWriteError::Invalid(vec![PriceViolation::CurrencyCodeInvalid]),
        };

        let translated = translate(&err);
        assert_eq!(codes(&translated), vec!["currency.code.invalid"]);
    }

    #[test]
    fn test_unrecognized_error_maps_to_unknown() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");

        let translated = translate(&err);
        assert_eq!(translated.status, StatusCode::BAD_REQUEST);
        assert_eq!(codes(&translated), vec![UNKNOWN_ERROR]);
    }

    #[test]
    fn test_code_set_is_never_empty() {
        let err = PriceWriteError::Invalid(vec![]);

        let translated = translate(&err);
        assert_eq!(codes(&translated), vec![UNKNOWN_ERROR]);
    }
}
