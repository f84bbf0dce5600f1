use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a `.ts` catalogue.
///
/// Lookups never fail; these only surface from the loaders.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        source: quick_xml::Error,
    },

    #[error("expected <TS> root element, found <{found}>")]
    NotTsDocument { found: String },

    #[error("<{parent}> without <{element}> in context '{context}'")]
    MissingElement {
        element: &'static str,
        parent: &'static str,
        context: String,
    },

    #[error("catalogue ended inside <{element}>")]
    UnexpectedEof { element: &'static str },

    #[error("invalid location line '{value}'")]
    InvalidLine { value: String },
}
