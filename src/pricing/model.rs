//! Modelo de Price
//!
//! Registro de precio por vehículo y su validación de escritura. La
//! validación devuelve identificadores de violación estables que el
//! traductor de errores convierte en códigos del API.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Códigos de moneda ISO 4217 aceptados
    static ref CURRENCY_CODE: Regex = Regex::new(
        "^(AED|AFN|ALL|AMD|ANG|AOA|ARS|AUD|AWG|AZN|BAM|BBD|BDT|BGN|BHD|BIF|BMD|BND|BOB|BOV|BRL|BSD|BTN|BWP|BYN|BZD|CAD|CDF|CHE|CHF|CHW|CLF|CLP|CNY|COP|COU|CRC|CUC|CUP|CVE|CZK|DJF|DKK|DOP|DZD|EGP|ERN|ETB|EUR|FJD|FKP|GBP|GEL|GHS|GIP|GMD|GNF|GTQ|GYD|HKD|HNL|HRK|HTG|HUF|IDR|ILS|INR|IQD|IRR|ISK|JMD|JOD|JPY|KES|KGS|KHR|KMF|KPW|KRW|KWD|KYD|KZT|LAK|LBP|LKR|LRD|LSL|LYD|MAD|MDL|MGA|MKD|MMK|MNT|MOP|MRU|MUR|MVR|MWK|MXN|MXV|MYR|MZN|NAD|NGN|NIO|NOK|NPR|NZD|OMR|PAB|PEN|PGK|PHP|PKR|PLN|PYG|QAR|RON|RSD|RUB|RWF|SAR|SBD|SCR|SDG|SEK|SGD|SHP|SLL|SOS|SRD|SSP|STN|SVC|SYP|SZL|THB|TJS|TMT|TND|TOP|TRY|TTD|TWD|TZS|UAH|UGX|USD|USN|UYI|UYU|UYW|UZS|VES|VND|VUV|WST|XAF|XAG|XAU)$"
    )
    .expect("currency code regex must compile");
}

/// Violación de validación de un registro de precio
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriceViolation {
    CurrencyCodeRequired,
    CurrencyCodeInvalid,
    PriceRequired,
    VehicleIdRequired,
}

impl PriceViolation {
    /// Código estable expuesto por el API
    pub const fn code(self) -> &'static str {
        match self {
            PriceViolation::CurrencyCodeRequired => "currency.code.required",
            PriceViolation::CurrencyCodeInvalid => "currency.code.invalid",
            PriceViolation::PriceRequired => "price.required",
            PriceViolation::VehicleIdRequired => "vehicle_id.required",
        }
    }
}

impl fmt::Display for PriceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Precio almacenado de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub price_id: i64,
    pub currency: String,
    pub price: Decimal,
    pub vehicle_id: i64,
}

/// Datos de precio que pasaron la validación
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPrice {
    pub currency: String,
    pub price: Decimal,
    pub vehicle_id: i64,
}

/// Payload de escritura. Los campos son opcionales para que la
/// validación de dominio reporte los faltantes con sus códigos en
/// lugar de rechazar el JSON en deserialización.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricePayload {
    pub currency: Option<String>,
    pub price: Option<Decimal>,
    pub vehicle_id: Option<i64>,
}

impl PricePayload {
    /// Valida el payload completo acumulando todas las violaciones
    pub fn validate(&self) -> Result<ValidPrice, Vec<PriceViolation>> {
        let mut violations = Vec::new();

        match self.currency.as_deref() {
            None => violations.push(PriceViolation::CurrencyCodeRequired),
            Some(code) if code.trim().is_empty() => {
                violations.push(PriceViolation::CurrencyCodeRequired)
            }
            Some(code) if !CURRENCY_CODE.is_match(code) => {
                violations.push(PriceViolation::CurrencyCodeInvalid)
            }
            Some(_) => {}
        }

        if self.price.is_none() {
            violations.push(PriceViolation::PriceRequired);
        }

        if self.vehicle_id.is_none() {
            violations.push(PriceViolation::VehicleIdRequired);
        }

        match (&self.currency, self.price, self.vehicle_id) {
            (Some(currency), Some(price), Some(vehicle_id)) if violations.is_empty() => {
                Ok(ValidPrice {
                    currency: currency.clone(),
                    price,
                    vehicle_id,
                })
            }
            _ => Err(violations),
        }
    }

    /// Payload con los campos faltantes completados desde un registro
    /// existente (semántica de PATCH)
    pub fn merged_with(&self, existing: &Price) -> PricePayload {
        PricePayload {
            currency: self
                .currency
                .clone()
                .or_else(|| Some(existing.currency.clone())),
            price: self.price.or(Some(existing.price)),
            vehicle_id: self.vehicle_id.or(Some(existing.vehicle_id)),
        }
    }
}
