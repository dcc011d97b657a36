//! Clients - HTTP Clients for External APIs
//!
//! This module contains the HTTP gateways the inventory calls to
//! enrich vehicle records: pricing and maps.

pub mod maps_client;
pub mod price_client;

// Re-export main types for convenience
pub use maps_client::MapsClient;
pub use price_client::{PriceClient, PRICE_UNAVAILABLE};
