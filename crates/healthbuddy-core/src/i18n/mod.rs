//! Translation resolution layer.

pub mod catalog;

pub use catalog::{DEFAULT_LOCALE, REQUIRED_KEYS, TranslationCatalog};
