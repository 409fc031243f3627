//! Translation catalog with locale fallback.
//!
//! The catalog maps locale codes to key/string tables. Resolution
//! walks the fallback chain `locale -> "en" -> key verbatim` and never
//! fails. The document shape is validated once at load time; after
//! that, internal code never re-checks it.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use healthbuddy_types::error::TranslationError;

/// The default locale. Always present and complete in a valid catalog.
pub const DEFAULT_LOCALE: &str = "en";

/// Reply keys the chat unconditionally reads. The default locale must
/// cover all of them, and the built-in fallback catalog does.
pub const REQUIRED_KEYS: &[&str] = &[
    "bot_welcome",
    "rep_fever",
    "rep_cough",
    "rep_rash",
    "rep_diarr",
    "rep_vaccine",
    "rep_help",
    "bot_more_short",
];

/// Mapping from locale code to key/string table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCatalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl TranslationCatalog {
    /// Parse and validate a translation document.
    ///
    /// Returns `Malformed` if the JSON does not have the expected
    /// shape, if the default locale is absent, or if the default
    /// locale is missing a required reply key.
    pub fn from_json(document: &str) -> Result<Self, TranslationError> {
        let catalog: TranslationCatalog = serde_json::from_str(document)
            .map_err(|e| TranslationError::Malformed(e.to_string()))?;

        let Some(default_table) = catalog.locales.get(DEFAULT_LOCALE) else {
            return Err(TranslationError::Malformed(format!(
                "default locale '{DEFAULT_LOCALE}' missing from catalog"
            )));
        };

        for key in REQUIRED_KEYS {
            if !default_table.contains_key(*key) {
                return Err(TranslationError::Malformed(format!(
                    "default locale '{DEFAULT_LOCALE}' missing required key '{key}'"
                )));
            }
        }

        Ok(catalog)
    }

    /// Minimal built-in English catalog.
    ///
    /// Substituted wholesale when the translation document cannot be
    /// loaded, so the chat stays usable.
    pub fn builtin() -> Self {
        let en: HashMap<String, String> = [
            (
                "bot_welcome",
                "Hello! I am Health Buddy. Ask about fever, cough, vaccines or nearby help.",
            ),
            (
                "rep_fever",
                "For fever: give water, keep cool, and visit clinic if high or lasting long.",
            ),
            (
                "rep_cough",
                "Cough: cover mouth, give warm drinks, seek care if breathing is hard.",
            ),
            ("rep_rash", "For skin rashes: keep area clean, avoid scratching."),
            ("rep_diarr", "Give ORS and clean fluids."),
            (
                "rep_vaccine",
                "Tell me your village name and I will try to guide you to the nearest clinic.",
            ),
            ("rep_help", "Call your local clinic or tell me your town."),
            (
                "bot_more_short",
                "Can you tell me a bit more? For example: fever, cough, rash or vaccines.",
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            locales: HashMap::from([(DEFAULT_LOCALE.to_string(), en)]),
        }
    }

    /// Resolve a key for a locale through the fallback chain.
    ///
    /// Returns the locale's string, else the default locale's string,
    /// else the key itself verbatim. Never fails, never returns empty.
    pub fn resolve<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        if let Some(s) = self.locales.get(locale).and_then(|t| t.get(key)) {
            return s;
        }
        if let Some(s) = self.locales.get(DEFAULT_LOCALE).and_then(|t| t.get(key)) {
            return s;
        }
        key
    }

    /// Whether a locale has its own table in the catalog.
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Pin a requested locale to one the catalog can serve.
    ///
    /// Unknown locales silently pin to the default.
    pub fn pin_locale<'a>(&self, locale: &'a str) -> &'a str {
        if self.has_locale(locale) {
            locale
        } else {
            DEFAULT_LOCALE
        }
    }

    /// Locale codes present in the catalog, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Resolve every default-locale key for the given locale.
    ///
    /// Used for the full re-resolution of displayed strings after a
    /// locale change.
    pub fn resolved_strings(&self, locale: &str) -> BTreeMap<String, String> {
        self.locales
            .get(DEFAULT_LOCALE)
            .map(|table| {
                table
                    .keys()
                    .map(|key| (key.clone(), self.resolve(locale, key).to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
