//! Shared domain types for Health Buddy.
//!
//! This crate holds the data shapes exchanged between the core logic,
//! the infrastructure implementations, and the API layer. It has no
//! business logic of its own.

pub mod chat;
pub mod config;
pub mod error;
pub mod reply;
