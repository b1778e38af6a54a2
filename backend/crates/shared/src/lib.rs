//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every DarkShield crate agrees on:
//! - The unified error type, its classification and result alias
//! - Typed sequential identifiers for persisted records
//!
//! Only things that mean the same thing in every bounded context live here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
