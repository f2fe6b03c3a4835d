//! html2data - extract data from HTML via CSS selectors
//!
//! Selectors are regular CSS selectors with optional directives:
//! - `a:attr(href)` - attribute value
//! - `div:html` - inner HTML
//! - `li:get(2)` - only the second match
//!
//! Results can be taken from the whole document or from inside each element
//! matched by an outer selector (nested extraction).

pub mod document;
pub mod error;
pub mod extractors;
pub mod fetch;

pub use document::Document;
pub use error::{Error, LoadError, Result};
pub use extractors::*;
pub use fetch::FetchConfig;
