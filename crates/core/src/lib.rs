//! Domain rules for the Complia notice reference service.
//!
//! This crate has no I/O. It holds the shared error type, primitive type
//! aliases, and the validation and search-matching rules used by both the
//! repository layer and the HTTP handlers.

pub mod error;
pub mod feedback;
pub mod notice;
pub mod types;
