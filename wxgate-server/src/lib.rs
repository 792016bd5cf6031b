//! HTTP server for the wxgate weather façade.

pub mod cache;
pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
