//! Recolor - colorize grayscale images
//!
//! Command-line front end for the `color-transfer` crate: PNG decoding and
//! encoding, a YAML/JSON configuration file, and the two transfer modes.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
