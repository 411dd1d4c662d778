//! Canned-response HTTP server for exercising the provider gateway
//!
//! Serves one request per connection: reads the full request, records its
//! body for verification, and answers with the next configured response
//! (the last response repeats once the script is exhausted).
//!
//! # Example
//!
//! ```rust,no_run
//! use support::mock_provider::MockProviderServer;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let server = MockProviderServer::builder()
//!     .with_response(429, r#"{"message":"slow down"}"#)
//!     .with_response(200, r#"{"id":"email_123"}"#)
//!     .build()
//!     .await?;
//!
//! // Point a gateway at server.url() and send
//!
//! server.shutdown();
//! # Ok(())
//! # }
//! ```

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::RwLock,
    time::timeout,
};

/// One canned HTTP response.
#[derive(Debug, Clone)]
struct CannedResponse {
    status: u16,
    body: String,
}

/// Mock provider HTTP server for testing.
pub struct MockProviderServer {
    addr: SocketAddr,
    request_bodies: Arc<RwLock<Vec<String>>>,
    hits: Arc<AtomicUsize>,
    shutdown: Arc<AtomicBool>,
}

impl MockProviderServer {
    /// Create a new builder for configuring the mock server.
    #[must_use]
    pub fn builder() -> MockProviderServerBuilder {
        MockProviderServerBuilder::new()
    }

    /// Base URL the server is listening on.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Raw request bodies received, in order.
    pub async fn request_bodies(&self) -> Vec<String> {
        self.request_bodies.read().await.clone()
    }

    /// Number of requests served.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Shutdown the server.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Serve a single connection: one request, one canned response.
    async fn handle_client(
        mut stream: TcpStream,
        response: CannedResponse,
        bodies: Arc<RwLock<Vec<String>>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then as much body as content-length promises.
        let body = loop {
            let read = stream.read(&mut chunk).await?;
            if read == 0 {
                return Ok(()); // Client went away mid-request
            }
            raw.extend_from_slice(&chunk[..read]);

            if let Some(split) = find_header_end(&raw) {
                let headers = String::from_utf8_lossy(&raw[..split]).to_string();
                let expected = content_length(&headers).unwrap_or(0);
                let mut body = raw[split..].to_vec();

                while body.len() < expected {
                    let read = stream.read(&mut chunk).await?;
                    if read == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..read]);
                }

                break String::from_utf8_lossy(&body).to_string();
            }
        };

        bodies.write().await.push(body);

        let payload = format!(
            "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            response.status,
            reason_phrase(response.status),
            response.body.len(),
            response.body,
        );
        stream.write_all(payload.as_bytes()).await?;
        stream.flush().await?;

        Ok(())
    }
}

/// Builder for configuring a `MockProviderServer`.
pub struct MockProviderServerBuilder {
    responses: Vec<CannedResponse>,
}

impl MockProviderServerBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
        }
    }

    /// Append a response to the script.
    #[must_use]
    pub fn with_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.responses.push(CannedResponse {
            status,
            body: body.into(),
        });
        self
    }

    /// Build and start the mock server.
    ///
    /// Defaults to a single successful send response if no script was
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to a port.
    pub async fn build(mut self) -> Result<MockProviderServer, std::io::Error> {
        if self.responses.is_empty() {
            self.responses.push(CannedResponse {
                status: 200,
                body: r#"{"id":"email_mock"}"#.to_string(),
            });
        }

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let responses = Arc::new(self.responses);
        let request_bodies = Arc::new(RwLock::new(Vec::new()));
        let hits = Arc::new(AtomicUsize::new(0));
        let shutdown = Arc::new(AtomicBool::new(false));

        let responses_clone = Arc::clone(&responses);
        let bodies_clone = Arc::clone(&request_bodies);
        let hits_clone = Arc::clone(&hits);
        let shutdown_clone = Arc::clone(&shutdown);

        tokio::spawn(async move {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }

                // Accept with timeout to allow checking the shutdown flag
                let accept_result = timeout(Duration::from_millis(100), listener.accept()).await;

                if let Ok(Ok((stream, _peer))) = accept_result {
                    let hit = hits_clone.fetch_add(1, Ordering::Relaxed);
                    let response = responses_clone[hit.min(responses_clone.len() - 1)].clone();
                    let bodies = Arc::clone(&bodies_clone);

                    tokio::spawn(async move {
                        if let Err(e) =
                            MockProviderServer::handle_client(stream, response, bodies).await
                        {
                            eprintln!("Mock provider client error: {e}");
                        }
                    });
                }
            }
        });

        Ok(MockProviderServer {
            addr,
            request_bodies,
            hits,
            shutdown,
        })
    }
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|at| at + 4)
}

fn content_length(headers: &str) -> Option<usize> {
    headers.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
