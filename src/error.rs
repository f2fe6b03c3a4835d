//! Error types

use std::sync::Arc;

use thiserror::Error;

/// Why a document could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported url scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("http error: {0}")]
    Http(#[from] Box<ureq::Error>),
}

impl From<ureq::Error> for LoadError {
    fn from(err: ureq::Error) -> Self {
        Self::Http(Box::new(err))
    }
}

/// Extraction error
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The document handle carries a load error
    #[error("parse document error: {0}")]
    Document(#[source] Arc<LoadError>),

    /// The CSS engine rejected a base selector
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
