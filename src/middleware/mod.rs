//! Middleware del sistema
//!
//! Este módulo contiene el middleware compartido por los dos binarios.

pub mod cors;

pub use cors::*;
