//! Translation catalogues loaded from Qt Linguist `.ts` files.
//!
//! A catalogue maps (context, source text) pairs to localized strings. It is
//! loaded once and read-only afterwards; lookups never fail and fall back to
//! the source text whenever no current translation exists.
//!
//! # Architecture
//!
//! - `model`: Catalogue, Context and Message types plus the lookup index
//! - `parser`: Streaming `.ts` reader and the file loaders
//! - `validator`: Translator-facing quality checks (placeholders, duplicates)
//! - `stats`: Completion statistics per catalogue and per context
//!
//! # Example
//!
//! ```rust,ignore
//! use ts_catalogue::catalogue::Catalogue;
//!
//! let catalogue = Catalogue::load("resources/i18n/settings.zh_CN.ts")?;
//! assert_eq!(catalogue.lookup("SettingInterface", "Settings"), "设置");
//!
//! // Unknown entries fail open
//! assert_eq!(catalogue.lookup("SettingInterface", "Missing"), "Missing");
//! ```

mod error;
mod model;
mod parser;
mod stats;
mod validator;

pub use error::CatalogueError;
pub(crate) use model::substitute_count;
pub use model::{Catalogue, Context, Location, Message, Translation, TranslationStatus};
pub use parser::parse;
pub use stats::{CatalogueStats, ContextStats};
pub use validator::{CatalogueValidator, ValidationReport};
