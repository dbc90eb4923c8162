//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, JWT
//! y generación de CSV.

pub mod csv;
pub mod errors;
pub mod jwt;
