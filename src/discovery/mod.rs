//! Descubrimiento de servicios
//!
//! Resolución de endpoints por llamada contra un registro de servicios,
//! con fallback silencioso al endpoint local configurado.

pub mod client;
pub mod resolver;

pub use client::{DiscoveryClient, HttpDiscoveryClient, ServiceInstance};
pub use resolver::{EndpointResolver, EndpointTarget};
