//! Release signing resolution for Android.
//!
//! This module provides functionality for:
//! - The mandatory signing keys and their lookup order
//! - Building a `SigningConfig` from parsed properties
//! - Resolving the config from an injectable properties source
//! - Keystore type detection and key.properties generation

pub mod android;
pub mod config;
pub mod key;
pub mod resolver;

pub use android::*;
pub use config::*;
pub use key::*;
pub use resolver::*;
