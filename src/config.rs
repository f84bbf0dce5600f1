use crate::locale::Locale;
use crate::translator::Translator;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Catalogue location
    pub catalogue_dir: PathBuf,
    pub domains: Vec<String>,

    // UI language setting: a locale code or "Auto"
    pub language: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalogue_dir: std::env::var("CATALOGUE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("resources/i18n")),
            domains: std::env::var("CATALOGUE_DOMAINS")
                .ok()
                .map(|v| parse_domains(&v))
                .filter(|domains| !domains.is_empty())
                .unwrap_or_else(|| vec!["settings".to_string(), "ultralytics_ui".to_string()]),

            language: std::env::var("APP_LANGUAGE").unwrap_or_else(|_| "Auto".to_string()),
        })
    }

    /// Resolve the configured language setting.
    pub fn locale(&self) -> Result<Locale> {
        Locale::from_setting(&self.language)
            .with_context(|| format!("Invalid APP_LANGUAGE '{}'", self.language))
    }

    /// Build the translator for the configured language and domains.
    pub fn translator(&self) -> Result<Translator> {
        let locale = self.locale()?;
        Ok(Translator::load(locale, &self.domains, &self.catalogue_dir))
    }
}

/// Split a comma-separated domain list, dropping blanks.
fn parse_domains(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|domain| !domain.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &["CATALOGUE_DIR", "CATALOGUE_DOMAINS", "APP_LANGUAGE"];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().expect("Should load");

        assert_eq!(config.catalogue_dir, PathBuf::from("resources/i18n"));
        assert_eq!(config.domains, vec!["settings", "ultralytics_ui"]);
        assert_eq!(config.language, "Auto");
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("CATALOGUE_DIR", "/opt/app/i18n");
        std::env::set_var("CATALOGUE_DOMAINS", "settings, ,main ");
        std::env::set_var("APP_LANGUAGE", "zh_HK");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.catalogue_dir, PathBuf::from("/opt/app/i18n"));
        assert_eq!(config.domains, vec!["settings", "main"]);
        assert_eq!(config.locale().unwrap(), Locale::CHINESE_HONG_KONG);
    }

    #[test]
    #[serial]
    fn test_blank_domains_use_default() {
        clear_env();
        std::env::set_var("CATALOGUE_DOMAINS", " , ");

        let config = Config::from_env().expect("Should load");
        clear_env();

        assert_eq!(config.domains, vec!["settings", "ultralytics_ui"]);
    }

    #[test]
    #[serial]
    fn test_auto_language_uses_system_locale() {
        clear_env();
        std::env::remove_var("LC_ALL");
        std::env::remove_var("LC_MESSAGES");
        std::env::set_var("LANG", "zh_CN.UTF-8");

        let config = Config::from_env().expect("Should load");
        let locale = config.locale();
        std::env::remove_var("LANG");

        assert_eq!(locale.unwrap(), Locale::CHINESE_SIMPLIFIED);
    }

    #[test]
    fn test_invalid_language() {
        let config = Config {
            catalogue_dir: PathBuf::from("resources/i18n"),
            domains: vec!["settings".to_string()],
            language: "klingon".to_string(),
        };

        let err = config.locale().unwrap_err();
        assert!(err.to_string().contains("Invalid APP_LANGUAGE 'klingon'"));
    }

    #[test]
    fn test_parse_domains() {
        assert_eq!(parse_domains("a,b"), vec!["a", "b"]);
        assert!(parse_domains("").is_empty());
    }
}
