//! Core library for the wxgate weather façade.
//!
//! This crate defines:
//! - The request error catalog (stable codes + fixed messages)
//! - Input validation (version, user, location, unit system)
//! - The icon classification table
//! - Source-mode selection and the upstream aggregation clients
//! - Shaping of upstream payloads into the unified weather document
//!
//! It is used by `wxgate-server`, but carries no HTTP-server code itself.

pub mod document;
pub mod error;
pub mod icons;
pub mod source;
pub mod upstream;
pub mod users;
pub mod validate;

pub use document::{ConditionsDocument, WeatherDocument};
pub use error::ApiError;
pub use icons::IconTable;
pub use source::{SourceFlags, SourceMode};
pub use upstream::UpstreamClient;
pub use users::UserDirectory;
pub use validate::{UnitCode, ValidRequest};
