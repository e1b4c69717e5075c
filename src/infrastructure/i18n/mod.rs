//! Localization
//!
//! A static resource table keyed by dotted message keys, in English and
//! Spanish. Lookups fall back to English, then to the key itself.

mod catalog;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Parse a language tag such as `es`, `es-MX` or `en_US`; unknown tags map to English
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match language.as_str() {
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

static TABLES: Lazy<HashMap<Locale, Table>> = Lazy::new(|| {
    let mut tables = HashMap::new();
    tables.insert(Locale::En, catalog::EN.iter().copied().collect());
    tables.insert(Locale::Es, catalog::ES.iter().copied().collect());
    tables
});

/// Look up a message in `locale`, falling back to English
pub fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    TABLES
        .get(&locale)
        .and_then(|table| table.get(key))
        .or_else(|| TABLES.get(&Locale::En).and_then(|table| table.get(key)))
        .copied()
}

/// Translate a message key; unknown keys come back unchanged
pub fn translate(locale: Locale, key: &str) -> String {
    lookup(locale, key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}
