//! Selector directives
//!
//! A raw selector is a CSS selector followed by zero or more `:name` or
//! `:name(arg)` tokens. Three names are directives understood here:
//! - `:attr(name)` - return the attribute value instead of the text
//! - `:html` - return the inner HTML instead of the text
//! - `:get(n)` - keep only the n-th match (1-based)
//!
//! Every other token is a regular CSS pseudo-class and is glued back onto
//! the base selector, so `div:nth-child(1):attr(href)` still selects
//! `div:nth-child(1)`.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\w+)\s*(?:\(\s*(\w+)\s*\))?\s*$").expect("directive pattern is valid")
});

/// What to read from each matched element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Concatenated text content
    #[default]
    Text,
    /// Serialized inner HTML
    Html,
    /// Attribute value, empty string when missing
    Attr(String),
}

/// Parsed selector: base CSS selector plus extraction directives
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorDirective {
    /// Selector handed to the CSS engine
    pub base: String,
    pub mode: ExtractMode,
    /// 1-based index of the only match to keep, `None` keeps all
    pub nth: Option<usize>,
}

impl SelectorDirective {
    /// Whether the match at 1-based `position` passes the `:get(n)` filter
    pub fn keeps(&self, position: usize) -> bool {
        self.nth.map_or(true, |nth| nth == position)
    }
}

/// Split a raw selector into its base CSS selector and directives.
///
/// Never fails: unknown or malformed tokens stay part of the base selector,
/// and an invalid base selector is only reported when it is evaluated.
/// Repeated directives overwrite each other, the last one wins.
pub fn parse_selector(raw: &str) -> SelectorDirective {
    let mut parts = raw.split(':');
    let mut directive = SelectorDirective {
        base: parts.next().unwrap_or_default().to_string(),
        ..Default::default()
    };

    for part in parts {
        let Some(caps) = DIRECTIVE_RE.captures(part) else {
            reattach(&mut directive.base, part);
            continue;
        };
        let arg = caps.get(2).map(|m| m.as_str());

        match &caps[1] {
            "attr" => {
                if let Some(name) = arg {
                    directive.mode = ExtractMode::Attr(name.to_string());
                }
            }
            "html" => directive.mode = ExtractMode::Html,
            "get" => {
                directive.nth = arg
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0);
            }
            _ => reattach(&mut directive.base, part),
        }
    }

    tracing::trace!(raw, ?directive, "parsed selector");
    directive
}

fn reattach(base: &mut String, part: &str) {
    base.push(':');
    base.push_str(part);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn directive(base: &str, mode: ExtractMode, nth: Option<usize>) -> SelectorDirective {
        SelectorDirective {
            base: base.to_string(),
            mode,
            nth,
        }
    }

    #[test]
    fn test_plain_selectors_pass_through() {
        for raw in ["div", "div#1", "ul > li.item", "a[href]", ""] {
            assert_eq!(parse_selector(raw), directive(raw, ExtractMode::Text, None));
        }
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            parse_selector("div:attr(href)"),
            directive("div", ExtractMode::Attr("href".into()), None)
        );
        assert_eq!(
            parse_selector("div: attr ( href ) "),
            directive("div", ExtractMode::Attr("href".into()), None)
        );
        assert_eq!(
            parse_selector("div#1: attr ( href ) "),
            directive("div#1", ExtractMode::Attr("href".into()), None)
        );
        assert_eq!(
            parse_selector("div#1:html"),
            directive("div#1", ExtractMode::Html, None)
        );
        assert_eq!(
            parse_selector("div:get(3)"),
            directive("div", ExtractMode::Text, Some(3))
        );
    }

    #[test]
    fn test_css_pseudo_classes_are_kept() {
        assert_eq!(
            parse_selector("div:nth-child(1):attr(href)"),
            directive("div:nth-child(1)", ExtractMode::Attr("href".into()), None)
        );
        assert_eq!(
            parse_selector("div:nth-child(1):get(3)"),
            directive("div:nth-child(1)", ExtractMode::Text, Some(3))
        );
        assert_eq!(
            parse_selector("input:checked:first-child"),
            directive("input:checked:first-child", ExtractMode::Text, None)
        );
        assert_eq!(
            parse_selector("p:not(.x):html"),
            directive("p:not(.x)", ExtractMode::Html, None)
        );
    }

    #[test]
    fn test_get_without_usable_index_keeps_all() {
        assert_eq!(parse_selector("li:get(0)").nth, None);
        assert_eq!(parse_selector("li:get(abc)").nth, None);
        assert_eq!(parse_selector("li:get").nth, None);
    }

    #[test]
    fn test_last_directive_wins() {
        assert_eq!(parse_selector("a:attr(href):html").mode, ExtractMode::Html);
        assert_eq!(
            parse_selector("a:html:attr(title)").mode,
            ExtractMode::Attr("title".into())
        );
        assert_eq!(
            parse_selector("a:attr(href):attr(title)").mode,
            ExtractMode::Attr("title".into())
        );
        assert_eq!(parse_selector("li:get(2):get(4)").nth, Some(4));
        assert_eq!(parse_selector("a:html:attr").mode, ExtractMode::Html);
        assert_eq!(
            parse_selector("a:attr(href):attr").mode,
            ExtractMode::Attr("href".into())
        );
    }

    #[test]
    fn test_keeps() {
        let all = parse_selector("li");
        assert!(all.keeps(1) && all.keeps(7));

        let second = parse_selector("li:get(2)");
        assert!(!second.keeps(1));
        assert!(second.keeps(2));
        assert!(!second.keeps(3));
    }
}
