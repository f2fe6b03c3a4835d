//! HTML document handle
//!
//! A [`Document`] holds either a parsed DOM or the error that prevented
//! loading it. Loading never fails eagerly: the error is kept and returned by
//! every extraction call on the handle.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use scraper::Html;

use crate::error::{Error, LoadError, Result};
use crate::extractors::{
    extract, extract_nested, first, first_nested, Extraction, ExtractOptions, FirstExtraction,
    Selectors,
};
use crate::fetch::{decode, fetch_blocking, FetchConfig};

/// Name used for the lone selector of [`Document::get_data_single`]
const SINGLE: &str = "single";

/// A loaded document, or the error that prevented loading it.
///
/// Extraction only reads the DOM, so repeated calls return equal results.
/// The handle is `Send` but not `Sync`: to use it from several threads, give
/// each thread its own clone.
#[derive(Debug, Clone)]
pub struct Document {
    dom: std::result::Result<Html, Arc<LoadError>>,
}

impl Document {
    /// Parse an HTML string
    pub fn parse(html: &str) -> Self {
        Self {
            dom: Ok(Html::parse_document(html)),
        }
    }

    /// A handle that fails every extraction with `err`
    pub fn from_error(err: LoadError) -> Self {
        Self {
            dom: Err(Arc::new(err)),
        }
    }

    /// Read and parse a whole stream, honouring a `<meta>` charset
    pub fn from_reader<R: Read>(mut reader: R) -> Self {
        let mut bytes = Vec::new();
        match reader.read_to_end(&mut bytes) {
            Ok(_) => Self::parse(&decode(&bytes, None, true)),
            Err(e) => Self::from_error(e.into()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading document from file");
        match fs::read(path) {
            Ok(bytes) => Self::parse(&decode(&bytes, None, true)),
            Err(e) => Self::from_error(e.into()),
        }
    }

    /// Fetch `url` over HTTP(S) and parse the response body
    pub fn from_url(url: &str, config: &FetchConfig) -> Self {
        match fetch_blocking(url, config) {
            Ok(html) => Self::parse(&html),
            Err(e) => Self::from_error(e),
        }
    }

    /// The load error, if the document could not be loaded
    pub fn error(&self) -> Option<&LoadError> {
        self.dom.as_ref().err().map(Arc::as_ref)
    }

    /// The parsed DOM
    pub fn html(&self) -> Result<&Html> {
        self.dom
            .as_ref()
            .map_err(|e| Error::Document(Arc::clone(e)))
    }

    /// Extract all matches for every named selector
    ///
    /// ```
    /// use html2data::{Document, ExtractOptions, Selectors};
    ///
    /// let doc = Document::parse("one<h1>head</h1>two<h1>head2</h1>");
    /// let selectors = Selectors::from([("h1".to_string(), "h1".to_string())]);
    /// let texts = doc.get_data(&selectors, ExtractOptions::default()).unwrap();
    /// assert_eq!(texts["h1"], vec!["head", "head2"]);
    /// ```
    pub fn get_data(&self, selectors: &Selectors, options: ExtractOptions) -> Result<Extraction> {
        extract(self.html()?, selectors, options)
    }

    /// Extract the first match (or an empty string) for every named selector
    pub fn get_data_first(
        &self,
        selectors: &Selectors,
        options: ExtractOptions,
    ) -> Result<FirstExtraction> {
        self.get_data(selectors, options).map(first)
    }

    /// Extract the first match of a single selector
    ///
    /// ```
    /// use html2data::{Document, ExtractOptions};
    ///
    /// let doc = Document::parse("one<h1>head</h1>two<h1>head2</h1>");
    /// let second = doc.get_data_single("h1:get(2)", ExtractOptions::default()).unwrap();
    /// assert_eq!(second, "head2");
    /// ```
    pub fn get_data_single(&self, selector: &str, options: ExtractOptions) -> Result<String> {
        let selectors = Selectors::from([(SINGLE.to_string(), selector.to_string())]);
        let mut texts = self.get_data_first(&selectors, options)?;
        Ok(texts.remove(SINGLE).unwrap_or_default())
    }

    /// Extract named selectors inside each element matched by `outer`
    pub fn get_data_nested(
        &self,
        outer: &str,
        selectors: &Selectors,
        options: ExtractOptions,
    ) -> Result<Vec<Extraction>> {
        extract_nested(self.html()?, outer, selectors, options)
    }

    /// Like [`Document::get_data_nested`], keeping only the first match per name
    pub fn get_data_nested_first(
        &self,
        outer: &str,
        selectors: &Selectors,
        options: ExtractOptions,
    ) -> Result<Vec<FirstExtraction>> {
        self.get_data_nested(outer, selectors, options)
            .map(first_nested)
    }
}

impl From<Html> for Document {
    fn from(html: Html) -> Self {
        Self { dom: Ok(html) }
    }
}
