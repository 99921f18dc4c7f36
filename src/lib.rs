//! Catastro - a property and owner registry HTTP service
//!
//! Catastro exposes a small JSON API over a relational store:
//! - Two resources: properties (`/inmuebles`) and owners (`/propietarios`)
//! - List-all and create-with-validation endpoints per resource
//! - Declarative per-field validation applied before any persistence attempt
//! - PostgreSQL backend via SQLx, plus an in-memory backend for development

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{Error, Result};
