//! Fetching over real sockets against a throwaway local server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use predicates::prelude::*;
use sentiment_pro::{FetchError, TextFetcher};

const PAGE: &str = "<html><head><title>Review</title></head><body>\
    <p>I love this amazing app!</p><nav>menu</nav><p>Second paragraph.</p><p>😊</p>\
    </body></html>";

/// Serve `responses` canned HTTP responses, one per connection, then stop.
fn serve(content_type: &'static str, body: &'static str, responses: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().take(responses) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
    });
    format!("http://{addr}/review")
}

#[test]
fn fetches_paragraphs_over_http() {
    let url = serve("text/html; charset=utf-8", PAGE, 1);
    let fetcher = TextFetcher::http(Duration::from_secs(5)).unwrap();
    let out = fetcher.fetch(&url);
    assert!(out.is_ok(), "{:?}", out.error);
    assert_eq!(out.text, "I love this amazing app! Second paragraph. 😊");

    // the server only answers once, so this must come from the cache
    let again = fetcher.fetch(&url);
    assert!(again.from_cache);
    assert_eq!(again.text, out.text);
}

#[test]
fn non_html_response_is_rejected() {
    let url = serve("application/json", "{\"p\": \"no\"}", 1);
    let fetcher = TextFetcher::http(Duration::from_secs(5)).unwrap();
    let out = fetcher.fetch(&url);
    assert_eq!(out.text, "");
    assert!(matches!(out.error, Some(FetchError::NotHtml { .. })));
}

#[test]
fn unreachable_host_degrades_to_empty_text() {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let fetcher = TextFetcher::http(Duration::from_secs(2)).unwrap();
    let out = fetcher.fetch(&format!("http://127.0.0.1:{port}/"));
    assert_eq!(out.text, "");
    assert!(matches!(out.error, Some(FetchError::Transport { .. })));
    assert_eq!(fetcher.cache_len(), 0);
}

/// Accept connections and never answer.
fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().take(2) {
            held.push(stream);
        }
        thread::sleep(Duration::from_secs(10));
        drop(held);
    });
    format!("http://{addr}/slow")
}

#[test]
fn silent_server_times_out_to_empty_text() {
    let url = serve_silence();
    let fetcher = TextFetcher::http(Duration::from_millis(200)).unwrap();
    let out = fetcher.fetch(&url);
    assert_eq!(out.text, "");
    match out.error {
        Some(FetchError::Transport { message, .. }) => assert!(message.contains("timed out"), "{message}"),
        other => panic!("expected a transport timeout, got {other:?}"),
    }
    assert_eq!(fetcher.cache_len(), 0);
}

#[test]
fn cli_analyzes_fetched_page() {
    let url = serve("text/html", PAGE, 1);
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("sentiment_pro").unwrap();
    cmd.current_dir(dir.path())
        .args(["analyze", "--url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("😊 Positive Sentiment"))
        .stdout(predicate::str::contains("😊 - 1 times"));
}

#[test]
fn cli_failed_fetch_reports_blank_input() {
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}/");
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = assert_cmd::Command::cargo_bin("sentiment_pro").unwrap();
    cmd.current_dir(dir.path())
        .env("RUST_LOG", "error")
        .args(["analyze", "--url", &url, "--timeout", "2"])
        .assert()
        .code(2)
        .stderr(predicate::function(|err: &str| {
            err.matches("Error fetching URL").count() == 1
        }))
        .stderr(predicate::str::contains("Please enter some text to analyze"));
}
