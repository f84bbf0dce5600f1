//! Locale type: validated UI language selection.
//!
//! A `Locale` can only be constructed for registered, enabled locales. Codes
//! are accepted in the spellings seen in practice (`zh_CN`, `zh-CN`,
//! `zh_CN.UTF-8`, `zh-Hant-HK`) and the "Auto" setting resolves from the
//! environment.

use crate::locale::{LocaleConfig, LocaleRegistry};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Environment variables consulted for the "Auto" setting, in priority order.
const LOCALE_ENV_VARS: &[&str] = &["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),

    #[error("Locale '{0}' is not enabled")]
    Disabled(String),
}

/// A validated locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Registered code (e.g., "zh_CN")
    code: &'static str,
}

impl Locale {
    pub const ENGLISH: Locale = Locale { code: "en" };
    pub const CHINESE_SIMPLIFIED: Locale = Locale { code: "zh_CN" };
    pub const CHINESE_HONG_KONG: Locale = Locale { code: "zh_HK" };

    /// Create a Locale from a locale code string.
    ///
    /// Resolution order:
    /// 1. exact `lang_REGION` match (`zh-hk` -> zh_HK)
    /// 2. script subtag (`zh_Hant_TW` -> zh_HK, `zh_Hans` -> zh_CN)
    /// 3. bare language: `zh` -> zh_CN; a region we do not ship only
    ///    resolves when its language has a single locale (`en_GB` -> en)
    ///
    /// `zh_TW` is therefore unknown rather than silently Simplified Chinese.
    ///
    /// # Example
    /// ```ignore
    /// let hk = Locale::from_code("zh-HK")?;
    /// assert_eq!(hk.code(), "zh_HK");
    /// ```
    pub fn from_code(code: &str) -> Result<Locale, LocaleError> {
        let registry = LocaleRegistry::get();
        let parts = LocaleParts::parse(code);
        let language = parts.language.as_str();

        let config = parts
            .region
            .as_ref()
            .and_then(|region| registry.get_by_code(&format!("{}_{}", language, region)))
            .or_else(|| {
                parts
                    .script
                    .as_deref()
                    .and_then(|script| registry.get_by_script(language, script))
            })
            .or_else(|| {
                if parts.region.is_none() && parts.script.is_none() {
                    registry
                        .get_by_code(language)
                        .or_else(|| registry.get_by_language(language))
                } else {
                    registry.get_sole_for_language(language)
                }
            });

        match config {
            Some(config) if config.enabled => Ok(Locale { code: config.code }),
            Some(config) => Err(LocaleError::Disabled(config.code.to_string())),
            None => Err(LocaleError::Unknown(code.to_string())),
        }
    }

    /// Resolve a language setting: a locale code or "Auto".
    pub fn from_setting(setting: &str) -> Result<Locale, LocaleError> {
        if setting.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::detect_system())
        } else {
            Self::from_code(setting.trim())
        }
    }

    /// Detect the system locale from `LC_ALL`, `LC_MESSAGES` and `LANG`.
    ///
    /// Falls back to the source locale when nothing usable is set.
    pub fn detect_system() -> Locale {
        let value = LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty());

        Self::from_posix(value.as_deref())
    }

    /// Resolve a POSIX locale value such as `zh_HK.UTF-8`.
    pub fn from_posix(value: Option<&str>) -> Locale {
        match value {
            Some("C") | Some("POSIX") | None => Self::source(),
            Some(value) => Self::from_code(value).unwrap_or_else(|e| {
                debug!("Unsupported system locale ({}), using source locale", e);
                Self::source()
            }),
        }
    }

    /// Get the source locale (the language of all source texts).
    pub fn source() -> Locale {
        let config = LocaleRegistry::get().source();
        Locale { code: config.code }
    }

    /// Get the registered locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is not found in the registry. This cannot happen
    /// for locales built through `from_code` or the constants.
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    pub fn language(&self) -> &'static str {
        self.config().language
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the source locale (no translation needed).
    pub fn is_source(&self) -> bool {
        self.config().is_source
    }

    pub fn plural_forms(&self) -> usize {
        self.config().plural_forms
    }

    /// Index of the plural form to use for a count.
    ///
    /// Chinese has a single form; English distinguishes `n == 1`.
    pub fn plural_index(&self, n: i64) -> usize {
        match self.plural_forms() {
            1 => 0,
            _ => usize::from(n != 1),
        }
    }

    /// Codes to try when resolving a catalogue file, most specific first.
    pub fn fallback_chain(&self) -> Vec<&'static str> {
        let language = self.language();
        if language == self.code {
            vec![self.code]
        } else {
            vec![self.code, language]
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Subtags of a locale spelling such as `zh_Hant_HK.UTF-8`.
#[derive(Debug, PartialEq, Eq)]
struct LocaleParts {
    /// Lowercase language (`zh`)
    language: String,

    /// Title-case script (`Hant`)
    script: Option<String>,

    /// Uppercase region (`HK`)
    region: Option<String>,
}

impl LocaleParts {
    /// Split a POSIX, Qt or BCP 47 spelling into its subtags.
    ///
    /// Strips the encoding (`.UTF-8`) and modifier (`@euro`) parts. A
    /// four-letter subtag is a script; the first other subtag is the region.
    fn parse(code: &str) -> Self {
        let base = code
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();

        let mut subtags = base.split(['_', '-']).filter(|subtag| !subtag.is_empty());
        let mut parts = LocaleParts {
            language: subtags.next().unwrap_or_default().to_ascii_lowercase(),
            script: None,
            region: None,
        };

        for subtag in subtags {
            if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                if parts.script.is_none() {
                    let (first, rest) = subtag.split_at(1);
                    parts.script = Some(first.to_ascii_uppercase() + &rest.to_ascii_lowercase());
                }
            } else if parts.region.is_none() {
                parts.region = Some(subtag.to_ascii_uppercase());
            }
        }

        parts
    }
}
