//! Internationalization: localized strings for bot responses.
//!
//! Uses a simple `t(key, lang)` function for static strings and
//! `format_*()` helpers for rendered backend payloads.
//! Supported languages: Russian (default) and English.

mod format;
mod labels;


pub use format::*;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Ru,
    En,
}

/// Language used when the user's language is unknown or unsupported.
pub const DEFAULT_LANG: Lang = Lang::Ru;

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Ru, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    /// Match a language code; region subtags are ignored ("en-US" is English).
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ru") {
            Some(Self::Ru)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else {
            None
        }
    }

    /// Like `from_code`, but empty or unsupported codes become the default.
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or(DEFAULT_LANG)
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Ru => labels::RU,
            Self::En => labels::EN,
        }
    }
}

/// Look `key` up in exactly one language table.
pub fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    lang.table()
        .iter()
        .find_map(|(k, v)| (*k == key).then_some(*v))
}

/// Resolve `key` in `lang`, then in the default language.
/// Keys absent from both tables resolve to an empty string.
pub fn translate(lang: Lang, key: &str) -> &'static str {
    lookup(lang, key)
        .or_else(|| lookup(DEFAULT_LANG, key))
        .unwrap_or_default()
}

/// Return a localized static string for `key` in the language with code `lang`.
/// Falls back to Russian for unknown keys or unsupported languages.
pub fn t(key: &str, lang: &str) -> &'static str {
    translate(Lang::resolve(lang), key)
}

/// Keys present in a non-default table but missing from the default one.
pub fn verify_tables() -> Result<(), Vec<&'static str>> {
    let missing: Vec<&'static str> = Lang::ALL
        .iter()
        .filter(|lang| **lang != DEFAULT_LANG)
        .flat_map(|lang| lang.table().iter().map(|(k, _)| *k))
        .filter(|key| lookup(DEFAULT_LANG, key).is_none())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}
