//! Shipkey Core Library
//!
//! Release signing resolution for Flutter/Android application shells: parsing
//! `keystore.properties`, building the signing configuration, and wiring it
//! into the release build type.

pub mod error;
pub mod properties;
pub mod signing;
pub mod variant;

pub use error::{Result, ShipkeyError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
