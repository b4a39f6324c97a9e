//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordforge::config::{Config, RescanMode};
use wordforge::crawler::{run_crawl, run_crawl_until, RunStatus};
use wordforge::output::{save_results, CrawlReport};

/// Creates a test configuration with rendering off and no politeness delay
fn create_test_config(max_depth: u32, rescan: RescanMode, threads: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.threads = threads;
    config.crawler.politeness_delay = 0;
    config.crawler.rescan = rescan;
    config.fetcher.render = false;
    config
}

/// Mounts an HTML page that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// A small site: the index links to three pages which all link back home
async fn mount_small_site(server: &MockServer, times: u64) {
    mount_page(
        server,
        "/",
        r#"<html><head><title>Acme Home</title></head><body>
            <p>Acme rocket skates</p>
            <a href="/alpha">Alpha</a> <a href="/bravo">Bravo</a> <a href="/charlie">Charlie</a>
        </body></html>"#
            .to_string(),
        times,
    )
    .await;

    for (route, word) in [("/alpha", "anvil"), ("/bravo", "magnet"), ("/charlie", "catapult")] {
        mount_page(
            server,
            route,
            format!(
                r#"<html><body><p>Acme {} catalog</p><a href="/">Home</a></body></html>"#,
                word
            ),
            times,
        )
        .await;
    }
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
            Welcome to Gadget Warehouse. Contact sales@gadgets.test
            <a href="/page1">Page 1</a>
            <a href="/page2">Page 2</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;

    // page1 links back to pages already seen, in several spellings
    mount_page(
        &mock_server,
        "/page1",
        format!(
            r#"<html><body>Gadget reviews
                <a href="{}/">Home</a>
                <a href="/page2#top">Page 2</a>
                <a href="/page2?utm_source=nav">Page 2 again</a>
            </body></html>"#,
            base_url
        ),
        1,
    )
    .await;

    mount_page(
        &mock_server,
        "/page2",
        "<html><body>Gadget pricing, call (555) 123-4567</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/", base_url))
        .await
        .expect("crawl should start");

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.state.visited.len(), 3);
    assert_eq!(run.state.pages_analyzed(), 3);
    assert_eq!(run.state.words.get("gadget"), 3);
    assert_eq!(run.state.emails.sorted(), vec!["sales@gadgets.test"]);
    assert_eq!(run.state.phones.sorted(), vec!["(555) 123-4567"]);
}

#[tokio::test]
async fn test_max_depth_zero_analyzes_one_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>Lonely page <a href="/next">Next</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/next", "<html>never</html>".to_string(), 0).await;

    // re-scan stays on by default but has no room at depth zero
    let config = create_test_config(0, RescanMode::Reanalyze, 4);
    let run = run_crawl(config, &format!("{}/", mock_server.uri()))
        .await
        .expect("crawl should start");

    assert_eq!(run.state.visited.len(), 1);
    assert_eq!(run.state.pages_analyzed(), 1);
    assert_eq!(run.state.words.get("lonely"), 1);
}

#[tokio::test]
async fn test_links_outside_site_are_not_fetched() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>elsewhere</html>"))
        .expect(0)
        .mount(&other_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        format!(
            r##"<html><body>
                <a href="{}/partner">Partner</a>
                <a href="/files/brochure.pdf">Brochure</a>
                <a href="/static/site.css">Styles</a>
                <a href="mailto:info@example.com">Mail</a>
                <a href="javascript:void(0)">Menu</a>
                <a href="#main">Skip</a>
                <a href="/about">About</a>
            </body></html>"##,
            other_server.uri()
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/about", "<html>About us</html>".to_string(), 1).await;
    mount_page(&mock_server, "/files/brochure.pdf", String::new(), 0).await;
    mount_page(&mock_server, "/static/site.css", String::new(), 0).await;

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/", mock_server.uri()))
        .await
        .expect("crawl should start");

    assert_eq!(run.state.visited.len(), 2);
}

#[tokio::test]
async fn test_directory_page_links_resolve_inside_directory() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/",
        r#"<html><body><p>Handbook index</p><a href="intro">Intro</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/intro",
        "<html><body>Onboarding checklist</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/docs", String::new(), 0).await;
    mount_page(&mock_server, "/intro", String::new(), 0).await;

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/docs/", mock_server.uri()))
        .await
        .expect("crawl should start");

    assert_eq!(run.state.pages_analyzed(), 2);
    assert_eq!(run.state.words.get("onboarding"), 1);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>Welcome <a href="/guide">Guide</a></body></html>"#.to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/guide"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/guide/", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/guide/",
        r#"<html><body>Guide contents <a href="start">Start</a></body></html>"#.to_string(),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/guide/start",
        "<html><body>Quickstart walkthrough</body></html>".to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, "/start", String::new(), 0).await;

    let config = create_test_config(3, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/", base_url))
        .await
        .expect("crawl should start");

    assert_eq!(run.state.words.get("quickstart"), 1);
}

#[tokio::test]
async fn test_query_string_reaches_the_server() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>Archive <a href="/view?source=ledger">Ledger</a></body></html>"#.to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/view"))
        .and(query_param("source", "ledger"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Quarterly ledger</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/", mock_server.uri()))
        .await
        .expect("crawl should start");

    assert_eq!(run.state.words.get("quarterly"), 1);
}

#[tokio::test]
async fn test_interrupted_run_keeps_partial_results() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>Harbor charts <a href="/tides">Tides</a></body></html>"#.to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/tides"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Lighthouse tables</body></html>")
                .set_delay(std::time::Duration::from_secs(20)),
        )
        .mount(&mock_server)
        .await;

    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    let stopper = tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
        let _ = stop.send(());
    });

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl_until(config, &format!("{}/", mock_server.uri()), async {
        let _ = stopped.await;
    })
    .await
    .expect("crawl should start");
    stopper.await.unwrap();

    assert_eq!(run.status, RunStatus::Interrupted);
    assert_eq!(run.state.pages_analyzed(), 1);
    assert_eq!(run.state.words.get("harbor"), 1);

    let report = CrawlReport::from_run(&run);
    assert!(report.interrupted);
}

#[tokio::test]
async fn test_failed_fetch_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/broken">Broken</a><a href="/works">Works</a></body></html>"#
            .to_string(),
        1,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/works",
        "<html><body>Survivor content</body></html>".to_string(),
        1,
    )
    .await;

    let config = create_test_config(2, RescanMode::Off, 4);
    let run = run_crawl(config, &format!("{}/", mock_server.uri()))
        .await
        .expect("crawl should start");

    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.state.visited.len(), 3);
    assert_eq!(run.state.pages_analyzed(), 2);
    assert_eq!(run.state.words.get("survivor"), 1);
}

#[tokio::test]
async fn test_rescan_counts_match_across_pool_sizes() {
    let single = MockServer::start().await;
    mount_small_site(&single, 2).await;
    let baseline = run_crawl(
        create_test_config(2, RescanMode::Reanalyze, 1),
        &format!("{}/", single.uri()),
    )
    .await
    .expect("crawl should start");

    let pooled = MockServer::start().await;
    mount_small_site(&pooled, 2).await;
    let concurrent = run_crawl(
        create_test_config(2, RescanMode::Reanalyze, 64),
        &format!("{}/", pooled.uri()),
    )
    .await
    .expect("crawl should start");

    assert_eq!(baseline.state.visited.len(), 4);
    assert_eq!(concurrent.state.visited.len(), 4);
    assert_eq!(
        baseline.state.words.by_frequency(),
        concurrent.state.words.by_frequency()
    );

    // every page analyzed once by the crawl and once by the re-scan
    assert_eq!(concurrent.state.pages_analyzed(), 8);
    assert_eq!(concurrent.state.words.get("acme"), 8);
    assert_eq!(concurrent.state.words.get("anvil"), 2);
}

#[tokio::test]
async fn test_rescan_off_analyzes_each_page_once() {
    let mock_server = MockServer::start().await;
    mount_small_site(&mock_server, 1).await;

    let run = run_crawl(
        create_test_config(2, RescanMode::Off, 8),
        &format!("{}/", mock_server.uri()),
    )
    .await
    .expect("crawl should start");

    assert_eq!(run.state.pages_analyzed(), 4);
    assert_eq!(run.state.words.get("acme"), 4);
}

#[tokio::test]
async fn test_results_are_saved() {
    let mock_server = MockServer::start().await;
    mount_small_site(&mock_server, 1).await;

    let run = run_crawl(
        create_test_config(2, RescanMode::Off, 4),
        &format!("{}/", mock_server.uri()),
    )
    .await
    .expect("crawl should start");

    let dir = TempDir::new().unwrap();
    let basename = dir.path().join("acme").to_string_lossy().to_string();
    let report = CrawlReport::from_run(&run);
    let saved = save_results(&basename, &run.state, &report).unwrap();

    for suffix in [
        "basic.txt",
        "passwords.txt",
        "usernames.txt",
        "directories.txt",
        "endpoints.txt",
        "metadata.json",
        "report.json",
    ] {
        assert!(
            dir.path().join(format!("acme_{}", suffix)).exists(),
            "missing acme_{}",
            suffix
        );
    }
    assert_eq!(saved.written.len(), 7);

    let basic = std::fs::read_to_string(format!("{}_basic.txt", basename)).unwrap();
    assert_eq!(basic.lines().next(), Some("acme"));

    let passwords = std::fs::read_to_string(format!("{}_passwords.txt", basename)).unwrap();
    assert!(passwords.lines().any(|line| line == "catapult2024"));

    assert_eq!(report.urls_analyzed, 4);
    assert!(!report.interrupted);
}

#[tokio::test]
async fn test_invalid_target_is_rejected() {
    let config = create_test_config(2, RescanMode::Off, 4);
    assert!(run_crawl(config, "ftp://example.com/").await.is_err());
    let config = create_test_config(2, RescanMode::Off, 4);
    assert!(run_crawl(config, "not a url").await.is_err());
}
