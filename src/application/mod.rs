//! Application services: configuration, rendering and view helpers.

pub mod configuration;
pub mod error;
pub mod helpers;
pub mod render;
