//! cocktails-hex: hexagonal cocktail bar API library (core + inbound HTTP)

pub mod config;
pub mod errors;
pub mod validation;

pub mod application;

pub use cocktails_types::{domain, ports};

pub mod inbound; // HTTP adapter (server + handlers)
