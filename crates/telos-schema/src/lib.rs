//! # telos-schema
//!
//! JSON Schema registry and validation for Telos.
//!
//! Record types are defined in `telos-core` (and `telos-config` for the
//! pipeline configuration) with `#[derive(JsonSchema)]`. This crate collects
//! their schemas under stable names, validates arbitrary JSON against them,
//! and backs the `telos schema` command.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
