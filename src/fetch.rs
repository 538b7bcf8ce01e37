//! URL to paragraph text.
//!
//! [`TextFetcher::fetch`] never fails outright: transport, status and
//! content-type problems are logged, reported in [`Fetched::error`], and
//! the text degrades to an empty string. Successful results are memoised
//! by the literal URL string for the lifetime of the fetcher.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error};
use once_cell::sync::Lazy;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use scraper::{Html, Selector};
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("sentiment_pro/", env!("CARGO_PKG_VERSION"));

static PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("`p` is a valid selector"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{url} is not an HTML page (content type {content_type})")]
    NotHtml { url: String, content_type: String },
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Raw response handed back by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Performs the GET. Swappable so callers can count or fake requests.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Page, FetchError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Page, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: if e.is_timeout() {
                "timed out".to_string()
            } else {
                e.to_string()
            },
        };
        let resp = self
            .client
            .get(url)
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .map_err(transport)?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp.text().map_err(transport)?;
        debug!("Fetched {} bytes from {url} (HTTP {status})", body.len());
        Ok(Page {
            status,
            content_type,
            body,
        })
    }
}

/// Result of [`TextFetcher::fetch`].
#[derive(Debug)]
pub struct Fetched {
    /// Paragraph text, empty on failure.
    pub text: String,
    pub error: Option<FetchError>,
    pub from_cache: bool,
}

impl Fetched {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct TextFetcher {
    transport: Box<dyn Transport>,
    cache: Mutex<HashMap<String, String>>,
}

impl std::fmt::Debug for TextFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFetcher")
            .field("cached", &self.cache_len())
            .finish()
    }
}

impl TextFetcher {
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        TextFetcher {
            transport: Box::new(transport),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetcher over a blocking HTTP client with the given timeout.
    pub fn http(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(HttpTransport::new(timeout)?))
    }

    /// Paragraph text of `url`, from the cache when this exact URL string
    /// was fetched successfully before.
    pub fn fetch(&self, url: &str) -> Fetched {
        if let Some(text) = self.lock_cache().get(url) {
            debug!("Cache hit for {url}");
            return Fetched {
                text: text.clone(),
                error: None,
                from_cache: true,
            };
        }

        match self.download(url) {
            Ok(text) => {
                self.lock_cache().insert(url.to_string(), text.clone());
                Fetched {
                    text,
                    error: None,
                    from_cache: false,
                }
            }
            Err(e) => {
                error!("Error fetching URL: {e}");
                Fetched {
                    text: String::new(),
                    error: Some(e),
                    from_cache: false,
                }
            }
        }
    }

    fn download(&self, url: &str) -> Result<String, FetchError> {
        let page = self.transport.get(url)?;
        if !(200..300).contains(&page.status) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: page.status,
            });
        }
        if let Some(ct) = &page.content_type {
            if !ct.to_ascii_lowercase().contains("html") {
                return Err(FetchError::NotHtml {
                    url: url.to_string(),
                    content_type: ct.clone(),
                });
            }
        }
        Ok(extract_paragraphs(&page.body))
    }

    pub fn cache_len(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // the map holds plain strings, a panicked writer cannot corrupt it
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Text of every `<p>` element in document order, joined by single spaces.
pub fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
        page: Result<Page, u16>,
    }

    impl Transport for Counting {
        fn get(&self, url: &str) -> Result<Page, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.page {
                Ok(page) => Ok(page.clone()),
                Err(_) => Err(FetchError::Transport {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    fn html_page(body: &str) -> Page {
        Page {
            status: 200,
            content_type: Some("text/html; charset=utf-8".to_string()),
            body: body.to_string(),
        }
    }

    fn fetcher(page: Result<Page, u16>) -> (TextFetcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let t = Counting {
            calls: Arc::clone(&calls),
            page,
        };
        (TextFetcher::new(t), calls)
    }

    const THREE_PARAGRAPHS: &str = "<html><body><h1>Title</h1>\
        <p>First one.</p><div><p>Second <b>bold</b> one.</p></div>\
        <span>skip me</span><p>Third.</p></body></html>";

    #[test]
    fn paragraphs_are_joined_in_document_order() {
        assert_eq!(
            extract_paragraphs(THREE_PARAGRAPHS),
            "First one. Second bold one. Third."
        );
    }

    #[test]
    fn malformed_markup_still_yields_text() {
        assert_eq!(extract_paragraphs("<p>open <p>again</div>"), "open  again");
        assert_eq!(extract_paragraphs("no markup at all"), "");
    }

    #[test]
    fn second_fetch_is_served_from_cache() {
        let (f, calls) = fetcher(Ok(html_page(THREE_PARAGRAPHS)));
        let first = f.fetch("http://example.test/page");
        let second = f.fetch("http://example.test/page");
        assert!(first.is_ok() && !first.from_cache);
        assert!(second.from_cache);
        assert_eq!(first.text, second.text);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cache_key_is_the_literal_url() {
        let (f, calls) = fetcher(Ok(html_page(THREE_PARAGRAPHS)));
        f.fetch("http://example.test/a");
        f.fetch("http://example.test/a/");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.cache_len(), 2);
        f.clear_cache();
        f.fetch("http://example.test/a");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn transport_failure_degrades_to_empty_text() {
        let (f, calls) = fetcher(Err(0));
        let out = f.fetch("http://unreachable.test/");
        assert_eq!(out.text, "");
        assert!(matches!(out.error, Some(FetchError::Transport { .. })));
        // failures are not memoised
        f.fetch("http://unreachable.test/");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(f.cache_len(), 0);
    }

    #[test]
    fn non_html_and_error_status_are_reported() {
        let json = Page {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: "{\"p\": 1}".to_string(),
        };
        let (f, _) = fetcher(Ok(json));
        let out = f.fetch("http://example.test/data.json");
        assert_eq!(out.text, "");
        assert!(matches!(out.error, Some(FetchError::NotHtml { .. })));

        let mut missing = html_page("<p>not found</p>");
        missing.status = 404;
        let (f, _) = fetcher(Ok(missing));
        let out = f.fetch("http://example.test/missing");
        assert_eq!(out.text, "");
        let err = out.error.expect("status error");
        assert_eq!(err.to_string(), "http://example.test/missing returned HTTP 404");
    }

    #[test]
    fn missing_content_type_is_parsed_as_html() {
        let mut page = html_page("<p>bare</p>");
        page.content_type = None;
        let (f, _) = fetcher(Ok(page));
        assert_eq!(f.fetch("http://example.test/").text, "bare");
    }
}
