//! Complia API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! representations) so integration tests and the binaries can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod representation;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod telemetry;
