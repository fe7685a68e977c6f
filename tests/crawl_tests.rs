//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end with the real HTTP fetcher.

use single_domain_crawler::config::{Config, CrawlerConfig, UserAgentConfig};
use single_domain_crawler::crawler::{run_crawl, Crawler, FetchResult, Fetcher, HttpFetcher};
use single_domain_crawler::output::write_crawl_result;
use std::collections::BTreeMap;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
fn create_test_config(max_pages: usize) -> Config {
    let mut config = Config::default();
    config.crawler = CrawlerConfig {
        max_pages,
        delay_secs: 0.0,
        timeout_secs: 5,
    };
    config.user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    config
}

fn html_page(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="/page1">Page 1</a>
            <a href="{}/page2/">Page 2</a>
            <a href="/page1#details">Page 1 again</a>
            <a href="https://external.example.org/">Elsewhere</a>
            </body></html>"#,
            base_url
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html_page(
            r#"<html><body>
            <form action="/search" method="get"><input name="q"><button type="submit">Go</button></form>
            <a href="/">Home</a>
            </body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(html_page(
            r#"<html><body><a href="/missing">Missing</a></body></html>"#.to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = run_crawl(&format!("{}/", base_url), &create_test_config(10))
        .await
        .expect("Crawl failed");

    let expected_pages = vec![
        format!("{}/", base_url),
        format!("{}/page1", base_url),
        format!("{}/page2", base_url),
    ];
    assert_eq!(result.pages.keys().cloned().collect::<Vec<_>>(), expected_pages);

    // Only /page1 has a form
    assert_eq!(result.forms.len(), 1);
    let forms = &result.forms[&format!("{}/page1", base_url)];
    assert_eq!(forms[0].method, "GET");
    assert_eq!(forms[0].action, format!("{}/search", base_url));
    assert_eq!(forms[0].inputs.len(), 2);

    assert_eq!(result.stats.attempted, 4);
    assert_eq!(result.stats.fetched, 3);
    assert_eq!(result.stats.failed, 1);
}

#[tokio::test]
async fn test_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(html_page("<p>hello</p>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = run_crawl(&mock_server.uri(), &create_test_config(5))
        .await
        .expect("Crawl failed");

    assert_eq!(result.pages.len(), 1);
}

#[tokio::test]
async fn test_page_budget_respected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/one">1</a><a href="/two">2</a><a href="/three">3</a>"#.to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html_page("<p>one</p>".to_string()))
        .expect(1)
        .mount(&mock_server)
        .await;

    for unreachable in ["/two", "/three"] {
        Mock::given(method("GET"))
            .and(path(unreachable))
            .respond_with(html_page("<p>over budget</p>".to_string()))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let result = run_crawl(&mock_server.uri(), &create_test_config(2))
        .await
        .expect("Crawl failed");

    assert_eq!(result.pages.len(), 2);
    // Wiremock verifies the expect() counts when mock_server drops
}

#[tokio::test]
async fn test_timeout_is_a_skipped_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/slow">slow</a><a href="/fast">fast</a>"#.to_string()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_page("<p>late</p>".to_string()).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(html_page("<p>quick</p>".to_string()))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&UserAgentConfig::default(), Duration::from_millis(300))
        .expect("Failed to build client");

    let slow = fetcher.fetch(&format!("{}/slow", base_url)).await;
    assert!(matches!(slow, FetchResult::NetworkError { timed_out: true, .. }));

    let crawler = Crawler::new(&base_url, &create_test_config(10).crawler, fetcher)
        .expect("Failed to create crawler");
    let result = crawler.run().await;

    assert!(!result.pages.contains_key(&format!("{}/slow", base_url)));
    assert!(result.pages.contains_key(&format!("{}/fast", base_url)));
    assert_eq!(result.stats.failed, 1);
}

#[tokio::test]
async fn test_crawl_and_write_output() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/login">Login</a><p>home</p>"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(html_page(
            r#"<form method="post"><input type="password" name="pw"></form>"#.to_string(),
        ))
        .mount(&mock_server)
        .await;

    let result = run_crawl(&base_url, &create_test_config(10))
        .await
        .expect("Crawl failed");

    let out = TempDir::new().expect("Failed to create temp dir");
    let files = write_crawl_result(&result, out.path()).expect("Failed to write output");

    let pages: BTreeMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(&files.pages).unwrap()).unwrap();
    assert_eq!(pages.len(), 2);

    let forms: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files.forms).unwrap()).unwrap();
    let login = &forms[format!("{}/login", base_url)][0];
    assert_eq!(login["method"], "POST");
    assert_eq!(login["action"], format!("{}/login", base_url));
    assert_eq!(login["inputs"][0]["type"], "password");
    assert_eq!(login["inputs"][0]["name"], "pw");
    assert_eq!(login["inputs"][0]["value"], "");

    // Both files share the timestamp suffix
    let pages_name = files.pages.file_name().unwrap().to_string_lossy().to_string();
    let forms_name = files.forms.file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(
        pages_name.trim_start_matches("pages_"),
        forms_name.trim_start_matches("forms_")
    );
}
