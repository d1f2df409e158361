//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small comic archive over HTTP and drive
//! the full crawl cycle end-to-end, from config to files on disk.

use comic_harvest::config::{parse_config, HttpConfig};
use comic_harvest::crawler::{build_http_client, CrawlJob, Crawler, Downloader, HttpPageSource};
use comic_harvest::output::{report, MemorySink};
use comic_harvest::{CrawlState, RunSummary, Site};
use std::path::Path;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

fn image(bytes: &'static [u8]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(bytes, "image/png")
}

/// Mounts a cad-style strip at `/comic/<slug>/` with one image
async fn mount_cad_strip(server: &MockServer, slug: &str, title: &str, next: Option<&str>) {
    let next = next
        .map(|n| format!(r#"<a class="nav" href="/comic/{}/" rel="next">Next</a>"#, n))
        .unwrap_or_default();
    let body = format!(
        r#"<html><head><title>{} | CAD Comic</title></head><body>
           <div class="comicpage">
             <a href="/comic/{}/"><img src="/files/{}.png" alt="{}"></a>
             {}
           </div></body></html>"#,
        title, slug, slug, title, next
    );

    Mock::given(method("GET"))
        .and(path(format!("/comic/{}/", slug)))
        .respond_with(html(body))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/files/{}.png", slug)))
        .respond_with(image(b"\x89PNG"))
        .mount(server)
        .await;
}

async fn run(job: &CrawlJob, sink: &MemorySink) -> RunSummary {
    let client = build_http_client(&HttpConfig::default()).unwrap();
    let source = HttpPageSource::new(client.clone());
    let downloader = Downloader::new(client);
    let crawler = Crawler::new(&source, &downloader, sink);
    crawler.run(job).await
}

fn saved_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_cad_archive_from_config() {
    let server = MockServer::start().await;
    mount_cad_strip(&server, "nice-melon", "Nice Melon", Some("loss")).await;
    mount_cad_strip(&server, "loss", "Loss", Some("sunday-driver")).await;
    mount_cad_strip(&server, "sunday-driver", "Sunday Driver?", None).await;

    let dir = TempDir::new().unwrap();
    let toml = format!(
        r#"
        [output]
        root-directory = "{}"

        [[comic]]
        title = "Ctrl+Alt+Del"
        site = "cad"
        start-url = "{}/comic/nice-melon/"
        "#,
        dir.path().display(),
        server.uri()
    );
    let config = parse_config(&toml).unwrap();
    let entries = config.select_comics(&[]).unwrap();
    let job = CrawlJob::from_entry(entries[0], Path::new(&config.output.root_directory)).unwrap();
    assert_eq!(job.destination, dir.path().join("Ctrl+Alt+Del"));

    let sink = MemorySink::new();
    let summary = run(&job, &sink).await;

    assert_eq!(summary.state, CrawlState::Done);
    assert_eq!(summary.pages_visited, 3);
    assert_eq!(summary.images_found, 3);
    assert_eq!(summary.images_downloaded, 3);
    assert_eq!(
        saved_files(&job.destination),
        vec![
            "0001 Nice Melon - nice-melon.png",
            "0002 Loss - loss.png",
            "0003 Sunday Driver - sunday-driver.png",
        ]
    );
    assert_eq!(
        std::fs::read(job.destination.join("0002 Loss - loss.png")).unwrap(),
        b"\x89PNG"
    );

    report(&summary, &sink);
    let output = sink.contents();
    assert!(output.contains("================ [Ctrl+Alt+Del] ================"));
    assert!(output.contains("Visited 3 pages."));
    assert!(!output.contains("EXITED ABRUPTLY"));
}

#[tokio::test]
async fn test_interrobang_archive_stops_at_placeholder() {
    let server = MockServer::start().await;
    let strip = |id: u32, nav: String| {
        format!(
            r#"<html><head>
                 <title>Interrobang Studios</title>
                 <meta property="og:title" content="It Sucks to be Weegie: {id}">
                 <meta property="og:image" content="/comics/weegie/{id}.jpg">
               </head><body>
                 <div class="comic-rightnav">{nav}</div>
               </body></html>"#,
            id = id,
            nav = nav
        )
    };

    Mock::given(method("GET"))
        .and(path("/comics-display.php"))
        .and(query_param("strip_id", "941"))
        .respond_with(html(strip(
            941,
            r#"<a href="comics-display.php?strip_id=942">Next</a><a href="/latest">Latest</a>"#
                .to_string(),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comics-display.php"))
        .and(query_param("strip_id", "942"))
        .respond_with(html(strip(
            942,
            r#"<span class="disabled">Next</span>"#.to_string(),
        )))
        .mount(&server)
        .await;
    for id in ["941", "942"] {
        Mock::given(method("GET"))
            .and(path(format!("/comics/weegie/{}.jpg", id)))
            .respond_with(image(b"JPEG"))
            .mount(&server)
            .await;
    }

    let dir = TempDir::new().unwrap();
    let job = CrawlJob::new(
        "It Sucks to be Weegie",
        Site::Interrobang,
        Url::parse(&format!("{}/comics-display.php?strip_id=941", server.uri())).unwrap(),
        dir.path().join("It Sucks to be Weegie"),
    );

    let sink = MemorySink::new();
    let summary = run(&job, &sink).await;

    assert_eq!(summary.state, CrawlState::Done);
    assert_eq!(summary.pages_visited, 2);
    assert_eq!(summary.images_downloaded, 2);
    assert_eq!(
        saved_files(&job.destination),
        vec![
            "0001 It Sucks to be Weegie 941 - 941.jpg",
            "0002 It Sucks to be Weegie 942 - 942.jpg",
        ]
    );
}

#[tokio::test]
async fn test_server_error_mid_archive_aborts_run() {
    let server = MockServer::start().await;
    mount_cad_strip(&server, "one", "One", Some("two")).await;
    mount_cad_strip(&server, "two", "Two", Some("three")).await;
    Mock::given(method("GET"))
        .and(path("/comic/three/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let job = CrawlJob::new(
        "Sillies",
        Site::CtrlAltDel,
        Url::parse(&format!("{}/comic/one/", server.uri())).unwrap(),
        dir.path().join("Sillies"),
    );

    let sink = MemorySink::new();
    let summary = run(&job, &sink).await;

    assert_eq!(summary.state, CrawlState::Aborted);
    assert_eq!(summary.pages_visited, 2);
    assert_eq!(saved_files(&job.destination).len(), 2);

    report(&summary, &sink);
    let output = sink.contents();
    assert!(output.contains("EXITED ABRUPTLY!"));
    assert!(output.contains("500"));
    assert!(output.contains("Visited 2 pages."));
}

#[tokio::test]
async fn test_non_html_page_aborts_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/comic/feed/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let job = CrawlJob::new(
        "Feed",
        Site::CtrlAltDel,
        Url::parse(&format!("{}/comic/feed/", server.uri())).unwrap(),
        dir.path().join("Feed"),
    );

    let summary = run(&job, &MemorySink::new()).await;

    assert_eq!(summary.state, CrawlState::Aborted);
    assert_eq!(summary.pages_visited, 0);
    assert!(summary.abort_reason.unwrap().contains("application/json"));
}
