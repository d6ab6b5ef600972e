//! Blocking HTTP helpers for site modules.
//!
//! Uses async reqwest internally on a shared runtime, but presents a sync
//! interface so requests can run on plain fetch worker threads.

use std::sync::LazyLock;
use std::time::Duration;

/// Per-request timeout when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error types for HTTP requests
#[derive(Debug)]
pub enum HttpError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Request did not complete within its timeout
    Timeout { url: String },
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Timeout { url } => write!(f, "request timed out: {url}"),
        }
    }
}

impl std::error::Error for HttpError {}

impl HttpError {
    /// Convert a reqwest error, keeping the status code when there is one
    pub fn from_reqwest(e: &reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
            };
        }
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Timeout { .. } => None,
        }
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .pool_max_idle_per_host(16)
        .build()
        .expect("failed to build HTTP client")
});

/// Get shared HTTP client.
pub fn http_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}

/// Shared tokio runtime driving the HTTP client.
pub static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// Headers, cookies and timeout applied to a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: Vec::new(),
            cookies: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((key.into(), value.into()));
        self
    }

    pub fn cookies<K, V>(mut self, cookies: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.cookies
            .extend(cookies.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// `Cookie` header value (`a=1; b=2`), if any cookies are set
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self.cookies.iter().map(|(k, v)| format!("{k}={v}")).collect();
        Some(pairs.join("; "))
    }

    fn apply(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (k, v) in &self.headers {
            req = req.header(k.as_str(), v.as_str());
        }
        if let Some(cookie) = self.cookie_header() {
            req = req.header(reqwest::header::COOKIE, cookie);
        }
        req.timeout(self.timeout)
    }
}

/// HTTP GET, returning the response body of a 2xx response.
pub fn get_text(url: &str, opts: &RequestOptions) -> Result<String, HttpError> {
    send_text(opts.apply(SHARED_CLIENT.get(url)), url)
}

/// HTTP POST with a string body, returning the response body of a 2xx response.
pub fn post_text(
    url: &str,
    body: impl Into<String>,
    opts: &RequestOptions,
) -> Result<String, HttpError> {
    let body: String = body.into();
    send_text(opts.apply(SHARED_CLIENT.post(url)).body(body), url)
}

fn send_text(req: reqwest::RequestBuilder, url: &str) -> Result<String, HttpError> {
    log::trace!("HTTP request: {url}");
    SHARED_RUNTIME.handle().block_on(async {
        let resp = req
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| HttpError::from_reqwest(&e, url))?;
        resp.text()
            .await
            .map_err(|e| HttpError::from_reqwest(&e, url))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = RequestOptions::default();
        assert_eq!(opts.timeout_duration(), DEFAULT_TIMEOUT);
        assert!(opts.cookie_header().is_none());
    }

    #[test]
    fn cookie_header_keeps_order() {
        let opts = RequestOptions::new()
            .cookie("session", "abc")
            .cookies([("lang", "en"), ("theme", "dark")]);
        assert_eq!(
            opts.cookie_header().as_deref(),
            Some("session=abc; lang=en; theme=dark")
        );
    }

    #[test]
    fn headers_accumulate() {
        let opts = RequestOptions::new()
            .header("User-Agent", "akito")
            .headers([("Accept", "text/html")]);
        assert_eq!(opts.headers.len(), 2);
        assert_eq!(opts.headers[1], ("Accept".to_string(), "text/html".to_string()));
    }

    #[test]
    fn timeout_override() {
        let opts = RequestOptions::new().timeout(Duration::from_secs(5));
        assert_eq!(opts.timeout_duration(), Duration::from_secs(5));
    }

    #[test]
    fn display_http_with_status() {
        let err = HttpError::Http {
            status: Some(404),
            message: "not found".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 404: not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn display_http_without_status() {
        let err = HttpError::Http {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = HttpError::Timeout {
            url: "https://example.com".to_string(),
        };
        assert_eq!(format!("{err}"), "request timed out: https://example.com");
        assert_eq!(err.status(), None);
    }
}
