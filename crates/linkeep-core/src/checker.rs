//! Link liveness checking
//!
//! Probes bookmark URLs and classifies the outcome. A probe is a HEAD
//! request (falling back to GET when the server rejects HEAD) followed by a
//! status-code check; the response body is never read. Transport failures
//! are folded into a small closed set of categories with stable labels, so
//! callers can display and test them without depending on error internals.
//!
//! The checker never mutates storage and never propagates probe errors: a
//! failed probe is a result, not an exception.

use std::fmt;
use std::time::Duration;

use futures_util::stream::{self, Stream, StreamExt};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::models::Bookmark;

/// Probe timeout per URL
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Browser-like client signature; some servers reject unknown or empty agents
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How many probes may be in flight at once during a batch check
///
/// Results are still delivered in input order; see [`LinkChecker::check_all`].
const BATCH_CONCURRENCY: usize = 4;

/// Outcome of probing one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckStatus {
    pub alive: bool,
    pub detail: String,
}

impl CheckStatus {
    fn ok() -> Self {
        Self {
            alive: true,
            detail: "OK".to_string(),
        }
    }

    fn dead(status: StatusCode) -> Self {
        Self {
            alive: false,
            detail: format!("Status {}", status.as_u16()),
        }
    }

    fn failed(kind: FailureKind) -> Self {
        Self {
            alive: false,
            detail: format!("Failed: {}", kind),
        }
    }
}

/// Closed set of transport-failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The probe did not complete within the timeout
    Timeout,
    /// TCP/TLS connection could not be established
    Connect,
    /// Name resolution failed
    Dns,
    /// The URL could not be parsed into a request
    InvalidUrl,
    /// Any other request failure
    Request,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connection",
            FailureKind::Dns => "dns",
            FailureKind::InvalidUrl => "invalid-url",
            FailureKind::Request => "request",
        };
        write!(f, "{}", label)
    }
}

/// Probes URLs for liveness
pub struct LinkChecker {
    client: Client,
    concurrency: usize,
}

impl LinkChecker {
    /// Create a checker with the standard 10-second probe timeout
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    /// Create a checker with a custom probe timeout
    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            concurrency: BATCH_CONCURRENCY,
        })
    }

    /// Probe one URL
    ///
    /// Redirects are followed transparently; the status of the final hop
    /// decides the outcome. Anything below 400 counts as alive.
    pub async fn check(&self, url: &str) -> CheckStatus {
        let response = match self.client.head(url).send().await {
            Ok(response) if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
                // Server refuses HEAD; retry as GET. The body is streamed
                // lazily, so dropping the response below aborts the transfer
                // once the status line is in.
                debug!(url, "HEAD not allowed, retrying as GET");
                match self.client.get(url).send().await {
                    Ok(response) => response,
                    Err(err) => return Self::failure(url, &err),
                }
            }
            Ok(response) => response,
            Err(err) => return Self::failure(url, &err),
        };

        let status = response.status();
        drop(response);

        if status.as_u16() < 400 {
            CheckStatus::ok()
        } else {
            CheckStatus::dead(status)
        }
    }

    /// Probe a batch of bookmarks, yielding `(bookmark, status)` pairs
    ///
    /// Results arrive in input order. Up to [`BATCH_CONCURRENCY`] probes run
    /// at once, each bounded by its own timeout, so one hung URL delays only
    /// itself. A failed probe never aborts the batch, and no retries are
    /// made; retry policy belongs to the caller.
    pub fn check_all(
        &self,
        bookmarks: Vec<Bookmark>,
    ) -> impl Stream<Item = (Bookmark, CheckStatus)> + '_ {
        stream::iter(bookmarks)
            .map(move |bookmark| async move {
                let status = self.check(&bookmark.url).await;
                (bookmark, status)
            })
            .buffered(self.concurrency)
    }

    fn failure(url: &str, err: &reqwest::Error) -> CheckStatus {
        let kind = classify_error(err);
        debug!(url, category = %kind, "probe failed");
        CheckStatus::failed(kind)
    }
}

/// Map a client error onto a failure category
fn classify_error(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_builder() {
        FailureKind::InvalidUrl
    } else if err.is_connect() {
        // DNS failures surface as connect errors; the resolver names itself
        // in the error chain.
        if chain_mentions(err, "dns") {
            FailureKind::Dns
        } else {
            FailureKind::Connect
        }
    } else {
        FailureKind::Request
    }
}

/// Whether any error in the source chain mentions `needle`
fn chain_mentions(err: &reqwest::Error, needle: &str) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(source) = current {
        if source.to_string().to_lowercase().contains(needle) {
            return true;
        }
        current = source.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned HTTP response per entry, reporting request methods
    ///
    /// Every response closes the connection, so each probe round-trip lands
    /// on its own accept.
    fn spawn_server(responses: Vec<String>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for response in responses {
                let Ok((mut socket, _)) = listener.accept() else {
                    return;
                };
                let mut buf = [0u8; 1024];
                let n = socket.read(&mut buf).unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]);
                let method = request.split_whitespace().next().unwrap_or("").to_string();
                let _ = tx.send(method);
                let _ = socket.write_all(response.as_bytes());
            }
        });

        (format!("http://{}", addr), rx)
    }

    fn response(status_line: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
            status_line
        )
    }

    /// An address nothing is listening on
    fn refused_addr() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn bookmark(id: i64, url: &str) -> Bookmark {
        Bookmark {
            id,
            url: url.to_string(),
            name: format!("bookmark-{}", id),
            tags: vec![],
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_check_ok_on_200() {
        let (url, _methods) = spawn_server(vec![response("200 OK")]);
        let checker = LinkChecker::new().unwrap();

        let status = checker.check(&url).await;
        assert_eq!(status, CheckStatus::ok());
    }

    #[tokio::test]
    async fn test_check_reports_status_on_404() {
        let (url, _methods) = spawn_server(vec![response("404 Not Found")]);
        let checker = LinkChecker::new().unwrap();

        let status = checker.check(&url).await;
        assert!(!status.alive);
        assert_eq!(status.detail, "Status 404");
    }

    #[tokio::test]
    async fn test_check_falls_back_to_get_on_405() {
        let (url, methods) = spawn_server(vec![
            response("405 Method Not Allowed"),
            response("200 OK"),
        ]);
        let checker = LinkChecker::new().unwrap();

        let status = checker.check(&url).await;
        assert_eq!(status, CheckStatus::ok());

        assert_eq!(methods.recv().unwrap(), "HEAD");
        assert_eq!(methods.recv().unwrap(), "GET");
    }

    #[tokio::test]
    async fn test_check_connection_refused() {
        let checker = LinkChecker::new().unwrap();

        let status = checker.check(&refused_addr()).await;
        assert!(!status.alive);
        assert_eq!(status.detail, "Failed: connection");
    }

    #[tokio::test]
    async fn test_check_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        thread::spawn(move || {
            // Accept and stall; never write a response
            if let Ok((socket, _)) = listener.accept() {
                thread::sleep(Duration::from_secs(2));
                drop(socket);
            }
        });

        let checker = LinkChecker::with_timeout(Duration::from_millis(250)).unwrap();
        let status = checker.check(&url).await;
        assert!(!status.alive);
        assert_eq!(status.detail, "Failed: timeout");
    }

    #[tokio::test]
    async fn test_check_invalid_url() {
        let checker = LinkChecker::new().unwrap();

        let status = checker.check("not a url").await;
        assert!(!status.alive);
        assert_eq!(status.detail, "Failed: invalid-url");
    }

    #[tokio::test]
    async fn test_check_all_preserves_order_and_count() {
        let (ok_url, _methods) = spawn_server(vec![response("200 OK")]);
        let bookmarks = vec![bookmark(1, &ok_url), bookmark(2, &refused_addr())];

        let checker = LinkChecker::new().unwrap();
        let results: Vec<_> = checker.check_all(bookmarks).collect().await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0.id, 1);
        assert!(results[0].1.alive);
        assert_eq!(results[1].0.id, 2);
        assert!(!results[1].1.alive);
    }

    #[test]
    fn test_failure_kind_labels() {
        assert_eq!(FailureKind::Timeout.to_string(), "timeout");
        assert_eq!(FailureKind::Connect.to_string(), "connection");
        assert_eq!(FailureKind::Dns.to_string(), "dns");
        assert_eq!(FailureKind::InvalidUrl.to_string(), "invalid-url");
        assert_eq!(FailureKind::Request.to_string(), "request");
    }
}
