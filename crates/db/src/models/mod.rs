//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Wire names are camelCase to match the admin dashboard client.

pub mod blog_post;
pub mod hero;
pub mod media;
pub mod subscriber;
pub mod teaching_post;
