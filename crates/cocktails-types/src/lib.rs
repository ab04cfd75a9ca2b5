//! cocktails-types: domain model and persistence ports shared by every layer.

pub mod domain;
pub mod ports;
