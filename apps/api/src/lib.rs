//! Promptdeck API Library
//!
//! This library provides the core functionality for the Promptdeck API:
//! the template catalog and renderer, placeholder suggestions and the HTTP
//! adapters serving them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod suggestions;
