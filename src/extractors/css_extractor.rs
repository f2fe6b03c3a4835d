//! CSS selector-based extraction
//!
//! Uses the scraper crate to select elements by CSS selectors, then reads
//! text, inner HTML or an attribute from each match according to the
//! selector's directives.

use scraper::{ElementRef, Html, Selector};

use super::selector::{parse_selector, ExtractMode, SelectorDirective};
use super::{Extraction, ExtractOptions, Selectors};
use crate::error::{Error, Result};

/// Something CSS selectors can be evaluated against: a whole document or a
/// single element (for nested extraction).
pub trait Scope {
    /// Elements matching `selector` inside this scope, in document order
    fn select_all<'s>(&'s self, selector: &Selector) -> Vec<ElementRef<'s>>;
}

impl Scope for Html {
    fn select_all<'s>(&'s self, selector: &Selector) -> Vec<ElementRef<'s>> {
        self.select(selector).collect()
    }
}

impl Scope for ElementRef<'_> {
    fn select_all<'s>(&'s self, selector: &Selector) -> Vec<ElementRef<'s>> {
        self.select(selector).collect()
    }
}

/// Compile a base selector, turning a rejected selector into an error value
fn compile(base: &str) -> Result<Selector> {
    Selector::parse(base).map_err(|e| Error::Selector {
        selector: base.to_string(),
        message: e.to_string(),
    })
}

/// Matches of a parsed selector that survive its `:get(n)` filter
fn matches<'s, S: Scope + ?Sized>(
    scope: &'s S,
    directive: &SelectorDirective,
) -> Result<Vec<ElementRef<'s>>> {
    let selector = compile(&directive.base)?;

    Ok(scope
        .select_all(&selector)
        .into_iter()
        .enumerate()
        .filter_map(|(i, el)| {
            if directive.keeps(i + 1) {
                Some(el)
            } else {
                tracing::trace!(position = i + 1, nth = ?directive.nth, "skipping match");
                None
            }
        })
        .collect())
}

/// Read the value a directive asks for from one element
fn element_value(el: ElementRef<'_>, mode: &ExtractMode) -> String {
    match mode {
        ExtractMode::Text => el.text().collect::<String>(),
        ExtractMode::Html => el.inner_html(),
        ExtractMode::Attr(name) => el.value().attr(name).unwrap_or_default().to_string(),
    }
}

/// Extract every named selector from `scope`.
///
/// Names that match nothing map to an empty list. The first selector the CSS
/// engine rejects aborts the whole call.
pub fn extract<S: Scope + ?Sized>(
    scope: &S,
    selectors: &Selectors,
    options: ExtractOptions,
) -> Result<Extraction> {
    let mut result = Extraction::new();

    for (name, raw) in selectors {
        let directive = parse_selector(raw);
        let values = matches(scope, &directive)?
            .into_iter()
            .map(|el| {
                let value = element_value(el, &directive.mode);
                if options.keep_whitespace {
                    value
                } else {
                    value.trim().to_string()
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(name = %name, selector = %raw, matched = values.len(), "extracted");
        result.insert(name.clone(), values);
    }

    Ok(result)
}

/// Run [`extract`] inside every element matched by `outer`.
///
/// Only the outer selector's `:get(n)` filter is used; other directives on it
/// have no meaning here. Containers come back in document order and any
/// failure discards the results gathered so far.
pub fn extract_nested<S: Scope + ?Sized>(
    scope: &S,
    outer: &str,
    selectors: &Selectors,
    options: ExtractOptions,
) -> Result<Vec<Extraction>> {
    let directive = parse_selector(outer);

    matches(scope, &directive)?
        .iter()
        .map(|container| extract(container, selectors, options))
        .collect()
}
