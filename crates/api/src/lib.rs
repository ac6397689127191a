//! The Code Times API server library.
//!
//! Exposes the building blocks (config, state, error handling, auth, the
//! host gate, routes) so integration tests and the binaries can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
