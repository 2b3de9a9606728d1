//! Menu image extraction request model.

use serde::{Deserialize, Serialize};

/// Options as sent by the client. Every field is optional; absent fields
/// take the defaults of [`ExtractionOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawExtractionOptions {
    pub extract_prices: Option<bool>,
    pub extract_descriptions: Option<bool>,
    pub extract_ingredients: Option<bool>,
    pub language: Option<String>,
    pub use_cache: Option<bool>,
}

/// Fully resolved extraction options forwarded to the menu service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionOptions {
    pub extract_prices: bool,
    pub extract_descriptions: bool,
    pub extract_ingredients: bool,
    pub language: String,
    /// Forwarded as-is; the menu service owns any caching decision.
    pub use_cache: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self::from(RawExtractionOptions::default())
    }
}

impl From<RawExtractionOptions> for ExtractionOptions {
    /// Prices, descriptions and cache are on unless explicitly disabled;
    /// ingredients are off unless explicitly enabled; language is `en`.
    fn from(raw: RawExtractionOptions) -> Self {
        Self {
            extract_prices: raw.extract_prices != Some(false),
            extract_descriptions: raw.extract_descriptions != Some(false),
            extract_ingredients: raw.extract_ingredients == Some(true),
            language: raw
                .language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| "en".to_string()),
            use_cache: raw.use_cache != Some(false),
        }
    }
}

/// Image payload of an upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Returns true if the MIME type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .split_once('/')
            .is_some_and(|(top, sub)| top.trim().eq_ignore_ascii_case("image") && !sub.is_empty())
    }

    /// Image format derived from the MIME subtype (`image/png` -> `png`).
    /// Parameters such as `; charset=...` are dropped.
    pub fn format(&self) -> String {
        self.mime_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase()
    }
}
