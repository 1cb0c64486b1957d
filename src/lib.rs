//! Darkroom - image upload and transformation server.
//!
//! Accepts image uploads over HTTP, applies a registered transformation
//! (filter, enhancement, or quantization), and returns the processed image.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
