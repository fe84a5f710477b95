//! Data Transfer Objects (DTOs).
//!
//! The wire types themselves live in `pixelroom_shared::protocol` so the
//! client can use them too; this module holds the domain ↔ DTO conversions.

pub mod conversion;

pub use pixelroom_shared::protocol::*;
