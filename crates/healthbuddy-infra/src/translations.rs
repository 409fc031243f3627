//! Translation document loader.
//!
//! Reads the translation JSON from disk and validates it into a
//! [`TranslationCatalog`]. Load failure is never fatal: callers that
//! use [`load_catalog_or_builtin`] get the built-in English catalog and
//! the chat stays usable.

use std::path::Path;

use healthbuddy_core::i18n::TranslationCatalog;
use healthbuddy_types::error::TranslationError;

/// Load and validate the translation document at `path`.
///
/// I/O failures map to `Unreachable`, shape/validation failures to
/// `Malformed`.
pub async fn load_catalog(path: &Path) -> Result<TranslationCatalog, TranslationError> {
    let document = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TranslationError::Unreachable(format!("{}: {e}", path.display())))?;

    TranslationCatalog::from_json(&document)
}

/// Load the translation document, substituting the built-in English
/// catalog on any failure.
pub async fn load_catalog_or_builtin(path: &Path) -> TranslationCatalog {
    match load_catalog(path).await {
        Ok(catalog) => {
            tracing::debug!(
                path = %path.display(),
                locales = catalog.locales().len(),
                "Loaded translation catalog"
            );
            catalog
        }
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                %err,
                "Falling back to built-in translation catalog"
            );
            TranslationCatalog::builtin()
        }
    }
}
