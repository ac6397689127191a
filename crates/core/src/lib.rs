//! Domain building blocks for the Code Times site backend.
//!
//! Everything in this crate is pure: no I/O, no async. The API server, the
//! repository layer and the newsletter sender all depend on it.

pub mod digest;
pub mod error;
pub mod gate;
pub mod hero;
pub mod html;
pub mod host;
pub mod interests;
pub mod roles;
pub mod types;
pub mod validation;
