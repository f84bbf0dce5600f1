//! Read-only translation catalogues for Qt Linguist `.ts` files.
//!
//! Catalogues map (context, source text) pairs to localized UI strings.
//! Lookups never fail: missing, unfinished and vanished entries fall back to
//! the source text.

pub mod catalogue;
pub mod config;
pub mod locale;
pub mod translator;
