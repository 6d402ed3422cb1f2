//! Shared schema model types for the LSSTCam CI harness.
//!
//! Holds the felis DDL representation, the DDL-to-runtime datatype
//! mapping, and the typed error model used by the schema conformance
//! check. This crate stays dependency-light so both the engine and any
//! external tooling can consume it.

pub mod dtype;
pub mod error;
pub mod felis;

pub use error::SchemaError;
pub use felis::{FelisColumn, FelisSchema, FelisTable};
