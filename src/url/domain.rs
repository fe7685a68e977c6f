use std::sync::OnceLock;
use tldextract::{TldExtractor, TldOption};
use url::{Host, Url};

/// Shared extractor over the bundled Public Suffix List snapshot
fn extractor() -> &'static TldExtractor {
    static EXTRACTOR: OnceLock<TldExtractor> = OnceLock::new();
    EXTRACTOR.get_or_init(|| TldExtractor::new(TldOption::default()))
}

/// Extracts the registered domain (eTLD+1) from a URL
///
/// The registered domain is the public suffix plus one label, so
/// `https://blog.example.co.uk/post` yields `example.co.uk`, never `co.uk`.
///
/// IP-literal hosts have no public suffix; for them the literal address is
/// returned so a crawl seeded at an address stays on that address.
///
/// # Arguments
///
/// * `url_str` - The URL to extract the registered domain from
///
/// # Returns
///
/// The lowercase registered domain, or an empty string when the URL is
/// malformed, schemeless, has no host, or its host has no registrable part
/// (such as `localhost` or a bare public suffix).
///
/// # Examples
///
/// ```
/// use single_domain_crawler::url::registered_domain;
///
/// assert_eq!(registered_domain("https://sub.example.com/a"), "example.com");
/// assert_eq!(registered_domain("https://www.example.co.uk/"), "example.co.uk");
/// assert_eq!(registered_domain("example.com/no-scheme"), "");
/// ```
pub fn registered_domain(url_str: &str) -> String {
    let url = match Url::parse(url_str.trim()) {
        Ok(url) => url,
        Err(_) => return String::new(),
    };

    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_ascii_lowercase(),
        Some(Host::Ipv4(addr)) => return addr.to_string(),
        Some(Host::Ipv6(addr)) => return addr.to_string(),
        None => return String::new(),
    };

    // Hand the extractor a plain http URL whatever the input scheme
    let result = match extractor().extract(&format!("http://{}/", host)) {
        Ok(result) => result,
        Err(e) => {
            tracing::trace!("No registered domain for host {}: {}", host, e);
            return String::new();
        }
    };

    match (result.domain, result.suffix) {
        (Some(domain), Some(suffix)) if !domain.is_empty() && !suffix.is_empty() => {
            format!("{}.{}", domain, suffix)
        }
        _ => String::new(),
    }
}

/// Checks whether two URLs belong to the same registered domain
///
/// Returns true iff both registered domains are non-empty and equal, so
/// subdomains of the same site match and malformed URLs never do.
///
/// # Examples
///
/// ```
/// use single_domain_crawler::url::same_domain;
///
/// assert!(same_domain("http://example.com", "http://sub.example.com/page"));
/// assert!(!same_domain("http://example.com", "http://example.org"));
/// ```
pub fn same_domain(base: &str, candidate: &str) -> bool {
    let base_domain = registered_domain(base);
    if base_domain.is_empty() {
        return false;
    }

    base_domain == registered_domain(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_domain() {
        assert_eq!(registered_domain("https://example.com/"), "example.com");
    }

    #[test]
    fn test_subdomain() {
        assert_eq!(registered_domain("https://blog.example.com/post"), "example.com");
    }

    #[test]
    fn test_nested_subdomain() {
        assert_eq!(
            registered_domain("https://api.v2.example.com/endpoint"),
            "example.com"
        );
    }

    #[test]
    fn test_multi_part_suffix() {
        assert_eq!(
            registered_domain("http://shop.example.co.uk/basket"),
            "example.co.uk"
        );
    }

    #[test]
    fn test_uppercase_converted_to_lowercase() {
        assert_eq!(registered_domain("https://WWW.Example.COM/"), "example.com");
    }

    #[test]
    fn test_with_port_query_and_fragment() {
        assert_eq!(
            registered_domain("https://example.com:8080/path?query=value#frag"),
            "example.com"
        );
    }

    #[test]
    fn test_ip_hosts_use_literal_address() {
        assert_eq!(registered_domain("http://127.0.0.1:8080/"), "127.0.0.1");
        assert_eq!(registered_domain("http://[::1]:8080/"), "::1");
    }

    #[test]
    fn test_malformed_and_schemeless() {
        assert_eq!(registered_domain(""), "");
        assert_eq!(registered_domain("not a url"), "");
        assert_eq!(registered_domain("example.com/path"), "");
        assert_eq!(registered_domain("mailto:someone@example.com"), "");
    }

    #[test]
    fn test_same_domain_subdomain() {
        assert!(same_domain("http://example.com", "http://sub.example.com"));
        assert!(same_domain("https://example.com/", "http://example.com/other"));
    }

    #[test]
    fn test_same_domain_different_site() {
        assert!(!same_domain("http://example.com", "http://example.org"));
        assert!(!same_domain("http://example.com", "http://notexample.com"));
    }

    #[test]
    fn test_same_domain_suffix_is_not_shared() {
        assert!(!same_domain("http://alpha.co.uk", "http://beta.co.uk"));
        assert!(same_domain("http://alpha.co.uk", "http://www.alpha.co.uk"));
    }

    #[test]
    fn test_same_domain_empty_never_matches() {
        assert!(!same_domain("", ""));
        assert!(!same_domain("not a url", "not a url"));
        assert!(!same_domain("http://example.com", "javascript:void(0)"));
    }

    #[test]
    fn test_same_domain_ip_hosts() {
        assert!(same_domain("http://127.0.0.1:3000/", "http://127.0.0.1:3000/a"));
        assert!(!same_domain("http://127.0.0.1:3000/", "http://127.0.0.2:3000/a"));
    }
}
