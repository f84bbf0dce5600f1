//! Installed catalogue stack for one UI locale.
//!
//! Several catalogues can be installed at once (one per domain, e.g. the
//! settings panel and the main application). The most recently installed
//! catalogue is consulted first; when none answers, the source text is
//! returned unchanged.

use crate::catalogue::{substitute_count, Catalogue, Message};
use crate::locale::Locale;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File extension of Qt Linguist catalogues.
const CATALOGUE_SUFFIX: &str = "ts";

/// Read-only translator shared by UI code.
///
/// Build it once at startup and share it behind an `Arc`; every method takes
/// `&self` and performs no writes.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,

    /// Newest first
    catalogues: Vec<Catalogue>,
}

impl Translator {
    /// Create a translator with no catalogues installed.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            catalogues: Vec::new(),
        }
    }

    /// Build a translator for `locale` from the catalogues of `domains`
    /// found in `dir`.
    ///
    /// Domains are installed in the given order, so later domains take
    /// precedence. Missing or broken files are logged and skipped: the
    /// translator then falls back to source text for those strings.
    pub fn load<S: AsRef<str>>(locale: Locale, domains: &[S], dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut translator = Translator::new(locale);

        if locale.is_source() {
            info!("UI language is the source language ({}), no catalogues needed", locale);
            return translator;
        }

        for domain in domains {
            let domain = domain.as_ref();
            let Some(path) = resolve_catalogue(dir, domain, locale) else {
                warn!(
                    "No '{}' catalogue for {} in {}, using source text",
                    domain,
                    locale,
                    dir.display()
                );
                continue;
            };

            match Catalogue::load(&path) {
                Ok(catalogue) => translator.install(catalogue),
                Err(e) => warn!("Skipping catalogue {}: {}", path.display(), e),
            }
        }

        translator
    }

    /// Install a catalogue; it takes precedence over earlier ones.
    pub fn install(&mut self, catalogue: Catalogue) {
        if catalogue.language() != self.locale.code() {
            debug!(
                "Installing {} catalogue into {} translator",
                catalogue.language(),
                self.locale
            );
        }
        self.catalogues.insert(0, catalogue);
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Installed catalogues, newest first.
    pub fn catalogues(&self) -> &[Catalogue] {
        &self.catalogues
    }

    pub fn is_empty(&self) -> bool {
        self.catalogues.is_empty()
    }

    /// Translate `source` within `context`, falling back to `source`.
    pub fn translate<'a>(&'a self, context: &str, source: &'a str) -> &'a str {
        self.find(context, source, "")
            .map(|message| message.translation.primary())
            .unwrap_or(source)
    }

    /// Translate with a disambiguation comment.
    ///
    /// Each catalogue is asked for the exact comment first and then for the
    /// uncommented entry before moving on to the next catalogue.
    pub fn translate_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: &str,
    ) -> &'a str {
        self.find(context, source, comment)
            .map(|message| message.translation.primary())
            .unwrap_or(source)
    }

    /// Translate a message carrying a count, substituting `%n`.
    pub fn translate_plural<'a>(&'a self, context: &str, source: &'a str, n: i64) -> Cow<'a, str> {
        let text = match self.find(context, source, "") {
            Some(message) => message.translation.form(self.locale.plural_index(n)),
            None => source,
        };
        substitute_count(text, n)
    }

    fn find(&self, context: &str, source: &str, comment: &str) -> Option<&Message> {
        self.catalogues.iter().find_map(|catalogue| {
            catalogue
                .find_disambiguated(context, source, comment)
                .or_else(|| catalogue.find(context, source))
        })
    }
}

/// Resolve the catalogue file for a domain and locale.
///
/// Tries `{domain}.{code}.ts` along the locale fallback chain (`zh_HK`,
/// then `zh`) and finally the bare `{domain}.ts`.
pub fn resolve_catalogue(dir: &Path, domain: &str, locale: Locale) -> Option<PathBuf> {
    locale
        .fallback_chain()
        .into_iter()
        .map(|code| dir.join(format!("{}.{}.{}", domain, code, CATALOGUE_SUFFIX)))
        .chain(std::iter::once(
            dir.join(format!("{}.{}", domain, CATALOGUE_SUFFIX)),
        ))
        .find(|path| path.is_file())
}
