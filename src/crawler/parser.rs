//! HTML parser for extracting links and forms
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (from `<a href>` tags), absolute and canonicalized
//! - Form descriptors (method, action, inputs)
//! - Page title

use crate::output::{FormDescriptor, FormInput};
use crate::url::canonicalize_parsed;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All followable links found on the page, canonical, in document order
    pub links: Vec<String>,

    /// All forms found on the page, in document order
    pub forms: Vec<FormDescriptor>,
}

struct Selectors {
    title: Selector,
    anchor: Selector,
    form: Selector,
    field: Selector,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| Selectors {
        title: parse_selector("title"),
        anchor: parse_selector("a[href]"),
        form: parse_selector("form"),
        field: parse_selector("input, textarea, select, button"),
    })
}

fn parse_selector(css: &str) -> Selector {
    // Selectors are compile-time constants; a failure here is a programming error
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}

/// Parses HTML content once and extracts title, links and forms
///
/// Produces exactly what [`extract_links`] and [`extract_forms`] would produce
/// separately, without parsing the document twice.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was fetched from, for resolving relative references
///
/// # Example
///
/// ```
/// use single_domain_crawler::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page/">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &page_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// assert!(parsed.forms.is_empty());
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: title_from(&document),
        links: links_from(&document, page_url),
        forms: forms_from(&document, page_url),
    }
}

/// Extracts all followable links from HTML
///
/// Each `href` is resolved against `page_url`, stripped of its fragment and
/// canonicalized. Empty, non-resolvable and non-HTTP(S) hrefs are skipped.
/// Results keep document order and are not deduplicated.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    links_from(&Html::parse_document(html), page_url)
}

/// Extracts all forms from HTML
///
/// # Defaults
///
/// | Field | When absent or empty |
/// |-------|----------------------|
/// | `action` | the page URL |
/// | `method` | `GET` (always upper-cased) |
/// | input `type` | `text` |
/// | input `value` | empty string |
///
/// The action is resolved against the page URL but not canonicalized, since it
/// is a submission target rather than a page to visit.
pub fn extract_forms(html: &str, page_url: &Url) -> Vec<FormDescriptor> {
    forms_from(&Html::parse_document(html), page_url)
}

fn title_from(document: &Html) -> Option<String> {
    document
        .select(&selectors().title)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn links_from(document: &Html, page_url: &Url) -> Vec<String> {
    document
        .select(&selectors().anchor)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect()
}

/// Resolves a link href to a canonical absolute URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute = match page_url.join(href) {
        Ok(url) => url,
        Err(e) => {
            tracing::trace!("Skipping unresolvable href {:?}: {}", href, e);
            return None;
        }
    };

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return None;
    }

    let canonical = String::from(canonicalize_parsed(&absolute));
    if canonical.is_empty() {
        None
    } else {
        Some(canonical)
    }
}

fn forms_from(document: &Html, page_url: &Url) -> Vec<FormDescriptor> {
    document
        .select(&selectors().form)
        .map(|form| describe_form(form, page_url))
        .collect()
}

fn describe_form(form: ElementRef<'_>, page_url: &Url) -> FormDescriptor {
    let element = form.value();

    let action = match element.attr("action").map(str::trim) {
        Some(action) if !action.is_empty() => match page_url.join(action) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => action.to_string(),
        },
        _ => page_url.to_string(),
    };

    let method = element
        .attr("method")
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("GET")
        .to_uppercase();

    let inputs = form
        .select(&selectors().field)
        .map(|field| {
            let field = field.value();
            FormInput {
                input_type: field.attr("type").unwrap_or("text").to_string(),
                name: field.attr("name").map(str::to_string),
                value: field.attr("value").unwrap_or_default().to_string(),
            }
        })
        .collect();

    FormDescriptor {
        method,
        action,
        inputs,
    }
}
