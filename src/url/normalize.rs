use url::form_urlencoded;
use url::Url;

/// Canonicalizes a URL string for deduplication and visited-tracking
///
/// # Canonicalization Steps
///
/// 1. Trim surrounding whitespace; empty input yields an empty string
/// 2. Parse the URL; unparsable or schemeless input yields an empty string
/// 3. Lowercase the scheme and host
/// 4. Remove fragment (everything after #)
/// 5. Normalize path:
///    - Empty path becomes /
///    - Remove trailing slashes (except for root /)
/// 6. Drop query pairs with an empty value
/// 7. Sort remaining query pairs by key, keeping duplicate keys in order
/// 8. Remove empty query string (trailing ?)
///
/// No further percent-encoding normalization is performed beyond what
/// re-encoding the query naturally does. The function is pure and idempotent.
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
///
/// # Returns
///
/// The canonical form, or an empty string when the input cannot be a page URL.
/// Callers must treat the empty string as "skip, never visit".
///
/// # Examples
///
/// ```
/// use single_domain_crawler::url::canonicalize;
///
/// assert_eq!(
///     canonicalize("HTTP://Example.com/a/?b=2&a=1#top"),
///     "http://example.com/a?a=1&b=2"
/// );
/// assert_eq!(canonicalize("   "), "");
/// ```
pub fn canonicalize(url_str: &str) -> String {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match Url::parse(trimmed) {
        Ok(url) => canonicalize_parsed(&url).into(),
        Err(e) => {
            tracing::trace!("Discarding unparsable URL {:?}: {}", trimmed, e);
            String::new()
        }
    }
}

/// Canonicalizes an already-parsed URL
///
/// Same rules as [`canonicalize`], for callers that already hold a [`Url`]
/// (the link extractor resolves hrefs into `Url` values first).
pub fn canonicalize_parsed(url: &Url) -> Url {
    let mut url = url.clone();

    // The url crate lowercases hosts of special schemes only
    if let Some(host) = url.host_str().map(str::to_owned) {
        if host.chars().any(|c| c.is_ascii_uppercase()) {
            let lowered = host.to_ascii_lowercase();
            if let Err(e) = url.set_host(Some(&lowered)) {
                tracing::trace!("Keeping host {} as-is: {}", host, e);
            }
        }
    }

    url.set_fragment(None);

    if !url.cannot_be_a_base() {
        let path = normalize_path(url.path());
        url.set_path(&path);
    }

    if url.query().is_some() {
        let params = sorted_query_pairs(&url);

        if params.is_empty() {
            url.set_query(None);
        } else {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params.iter())
                .finish();
            url.set_query(Some(&query));
        }
    }

    url
}

/// Defaults an empty path to root and strips trailing slashes
///
/// The whole run of trailing slashes goes, not just one, so that
/// `/a//` and `/a/` and `/a` all settle on `/a` in a single pass.
fn normalize_path(path: &str) -> String {
    let stripped = path.trim_end_matches('/');
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.to_string()
    }
}

/// Decodes query pairs, drops blank values, and stable-sorts by key
fn sorted_query_pairs(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(_, value)| !value.is_empty())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Vec::sort_by is stable, so duplicate keys keep their relative order
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}
