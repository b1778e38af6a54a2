//! Entity Module

pub mod actor;
pub mod user;
