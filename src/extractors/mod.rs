//! HTML extraction modules
//!
//! `selector` parses the directive syntax, `css_extractor` evaluates it
//! against a document or element.

mod css_extractor;
mod selector;

pub use css_extractor::*;
pub use selector::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result name -> raw selector (with optional directives)
pub type Selectors = BTreeMap<String, String>;

/// Result name -> every extracted value, in document order
pub type Extraction = BTreeMap<String, Vec<String>>;

/// Result name -> first extracted value, or an empty string
pub type FirstExtraction = BTreeMap<String, String>;

/// Options for a single extraction call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Keep leading and trailing whitespace of extracted values
    #[serde(default)]
    pub keep_whitespace: bool,
}

/// Reduce every value list to its first element
pub fn first(extraction: Extraction) -> FirstExtraction {
    extraction
        .into_iter()
        .map(|(name, values)| (name, values.into_iter().next().unwrap_or_default()))
        .collect()
}

/// [`first`] applied to each container of a nested extraction
pub fn first_nested(extractions: Vec<Extraction>) -> Vec<FirstExtraction> {
    extractions.into_iter().map(first).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first() {
        let extraction = Extraction::from([
            ("h1".to_string(), vec!["head".to_string(), "head2".to_string()]),
            ("h3".to_string(), vec![]),
        ]);

        assert_eq!(
            first(extraction),
            FirstExtraction::from([
                ("h1".to_string(), "head".to_string()),
                ("h3".to_string(), String::new()),
            ])
        );
    }

    #[test]
    fn test_first_nested_keeps_container_order() {
        let nested = vec![
            Extraction::from([("a".to_string(), vec!["1".to_string(), "2".to_string()])]),
            Extraction::from([("a".to_string(), vec![])]),
            Extraction::from([("a".to_string(), vec!["3".to_string()])]),
        ];

        let names: Vec<String> = first_nested(nested)
            .into_iter()
            .map(|m| m["a"].clone())
            .collect();
        assert_eq!(names, vec!["1", "", "3"]);
    }
}
