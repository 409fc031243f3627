//! Infrastructure implementations for Health Buddy.
//!
//! Concrete implementations of the healthbuddy-core trait seams:
//! SQLite persistence, the HTTP remote reply delegate, and the
//! translation/config document loaders.

pub mod config;
pub mod remote;
pub mod sqlite;
pub mod translations;
