//! Locale registry: Single source of truth for all supported UI languages.
//!
//! The registry uses a singleton pattern with `OnceLock` to ensure thread-safe
//! initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Qt-style locale code (e.g., "en", "zh_CN", "zh_HK")
    pub code: &'static str,

    /// ISO 639-1 language part of the code (e.g., "zh")
    pub language: &'static str,

    /// ISO 15924 script the catalogue is written in (e.g., "Hant")
    pub script: &'static str,

    /// English name of the locale
    pub name: &'static str,

    /// Native name of the locale (e.g., "简体中文")
    pub native_name: &'static str,

    /// Whether this is the language source strings are written in (only one should be true)
    pub is_source: bool,

    /// Whether this locale can be selected
    pub enabled: bool,

    /// Number of plural forms a numerus translation carries
    pub plural_forms: usize,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get the first enabled locale for a bare language (e.g. "zh" -> zh_CN).
    pub fn get_by_language(&self, language: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.enabled && locale.language == language)
    }

    /// Get the locale writing `language` in `script` (e.g. "zh" + "Hant" -> zh_HK).
    pub fn get_by_script(&self, language: &str, script: &str) -> Option<&LocaleConfig> {
        self.locales
            .iter()
            .find(|locale| locale.language == language && locale.script.eq_ignore_ascii_case(script))
    }

    /// Get the enabled locale of a language, if it is the only one.
    ///
    /// A regional variant we do not ship (en_GB) may borrow the sole locale of
    /// its language, but never guess between several (zh_TW).
    pub fn get_sole_for_language(&self, language: &str) -> Option<&LocaleConfig> {
        let mut candidates = self
            .locales
            .iter()
            .filter(|locale| locale.enabled && locale.language == language);

        match (candidates.next(), candidates.next()) {
            (Some(locale), None) => Some(locale),
            _ => None,
        }
    }

    /// Get all enabled locales.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get all locales (including disabled ones).
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Get the source locale configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one source locale
    /// (this indicates a configuration error).
    pub fn source(&self) -> &LocaleConfig {
        let sources: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_source)
            .collect();

        match sources.len() {
            0 => panic!("No source locale found in registry"),
            1 => sources[0],
            _ => panic!("Multiple source locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Default locale configurations.
///
/// English is the source language; catalogues ship for Simplified Chinese
/// and Hong Kong Chinese.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            language: "en",
            script: "Latn",
            name: "English",
            native_name: "English",
            is_source: true,
            enabled: true,
            plural_forms: 2,
        },
        LocaleConfig {
            code: "zh_CN",
            language: "zh",
            script: "Hans",
            name: "Chinese (Simplified)",
            native_name: "简体中文",
            is_source: false,
            enabled: true,
            plural_forms: 1,
        },
        LocaleConfig {
            code: "zh_HK",
            language: "zh",
            script: "Hant",
            name: "Chinese (Hong Kong)",
            native_name: "繁體中文",
            is_source: false,
            enabled: true,
            plural_forms: 1,
        },
    ]
}
