//! Catalogue quality validation.
//!
//! Checks that translations keep the runtime placeholders of their source
//! text (`{name}`, `%1`, `%n`) and that a context never maps the same source
//! to two different current translations.

use crate::catalogue::{Catalogue, Message, Translation};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that break lookup guarantees
    pub errors: Vec<String>,

    /// Problems a translator should look at
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalogue quality.
pub struct CatalogueValidator;

// Cached placeholder patterns
static BRACE_REGEX: OnceLock<Regex> = OnceLock::new();
static POSITIONAL_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogueValidator {
    /// Validate every live message of a catalogue.
    ///
    /// Vanished and untranslated messages are skipped for placeholder checks
    /// since they never reach the UI.
    pub fn validate(catalogue: &Catalogue) -> ValidationReport {
        let mut report = ValidationReport::new();
        let expected_forms = catalogue.locale().map(|locale| locale.plural_forms());

        for context in catalogue.contexts() {
            let mut seen: HashMap<(&str, Option<&str>), &Translation> = HashMap::new();

            for message in &context.messages {
                if !message.is_translated() {
                    continue;
                }

                let key = (message.source.as_str(), message.comment.as_deref());
                let translation = &message.translation;
                match seen.get(&key) {
                    Some(&previous) if previous != translation => {
                        report.errors.push(format!(
                            "[{}] Conflicting translations for {:?}: {} vs {}",
                            context.name,
                            message.source,
                            describe(previous),
                            describe(translation)
                        ));
                    }
                    Some(_) => {}
                    None => {
                        seen.insert(key, translation);
                    }
                }

                report.merge(Self::validate_entry(&context.name, message, expected_forms));
            }
        }

        report
    }

    /// Validate that a translation keeps the placeholders of its source.
    ///
    /// # Arguments
    /// * `source` - The source text
    /// * `translation` - The translated text
    ///
    /// # Returns
    /// A `ValidationReport` containing any warnings found.
    pub fn validate_message(source: &str, translation: &str) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut orig_named = Self::extract_named(source);
        let mut trans_named = Self::extract_named(translation);
        orig_named.sort();
        trans_named.sort();
        if orig_named != trans_named {
            report.warnings.push(format!(
                "Named placeholder mismatch: source has {:?}, translation has {:?}",
                orig_named, trans_named
            ));
        }

        let mut orig_positional = Self::extract_positional(source);
        let mut trans_positional = Self::extract_positional(translation);
        orig_positional.sort();
        trans_positional.sort();
        if orig_positional != trans_positional {
            report.warnings.push(format!(
                "Positional placeholder mismatch: source has {:?}, translation has {:?}",
                orig_positional, trans_positional
            ));
        }

        report
    }

    fn validate_entry(
        context: &str,
        message: &Message,
        expected_forms: Option<usize>,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        match &message.translation {
            Translation::Single(text) => {
                let found = Self::validate_message(&message.source, text);
                for warning in found.warnings {
                    report
                        .warnings
                        .push(format!("[{}] {:?}: {}", context, message.source, warning));
                }
            }
            Translation::Numerus(forms) => {
                if let Some(expected) = expected_forms {
                    if forms.len() != expected {
                        report.warnings.push(format!(
                            "[{}] {:?}: expected {} plural form(s), found {}",
                            context,
                            message.source,
                            expected,
                            forms.len()
                        ));
                    }
                }
                for form in forms {
                    let found = Self::validate_message(&message.source, form);
                    for warning in found.warnings {
                        report
                            .warnings
                            .push(format!("[{}] {:?}: {}", context, message.source, warning));
                    }
                }
            }
        }

        report
    }

    /// Extract all `{name}` placeholders from text
    fn extract_named(text: &str) -> Vec<String> {
        let regex = BRACE_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)?\}").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract all Qt `%1`..`%99` and `%n` placeholders from text
    fn extract_positional(text: &str) -> Vec<String> {
        let regex = POSITIONAL_REGEX.get_or_init(|| Regex::new(r"%(?:[1-9][0-9]?|n)").unwrap());

        regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Quote a translation for a report line.
fn describe(translation: &Translation) -> String {
    match translation {
        Translation::Single(text) => format!("{:?}", text),
        Translation::Numerus(forms) => format!("{:?}", forms),
    }
}
