//! Supported UI locales.
//!
//! - `registry`: Single source of truth for supported locales and their metadata
//! - `language`: Validated `Locale` type, "Auto" resolution and plural rules

mod language;
mod registry;

pub use language::{Locale, LocaleError};
pub use registry::{LocaleConfig, LocaleRegistry};
