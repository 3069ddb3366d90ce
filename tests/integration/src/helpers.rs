//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, making HTTP requests
//! with session cookies, and opening authenticated WebSocket
//! connections.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use relay_api::{create_app, create_app_state};
use relay_common::AppConfig;
use relay_gateway::{ClientEvent, ServerEvent};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        // Port 0 lets the OS pick a free port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with a session cookie
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Cookie", format!("session={token}"))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a session cookie
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Cookie", format!("session={token}"))
            .json(body)
            .send()
            .await?)
    }

    /// Open an authenticated WebSocket connection
    pub async fn connect_ws(&self, token: &str) -> Result<WsClient> {
        let url = format!("ws://{}/ws", self.addr);
        let mut request = url.into_client_request()?;
        request
            .headers_mut()
            .insert("Cookie", format!("session={token}").parse()?);

        let (stream, _) = connect_async(request).await?;
        let (sink, source) = stream.split();
        Ok(WsClient { sink, source })
    }
}

/// One WebSocket client speaking the relay's event protocol
pub struct WsClient {
    sink: SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>,
    source: SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl WsClient {
    /// Send one client event
    pub async fn send(&mut self, event: &ClientEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.sink.send(Message::Text(json)).await?;
        Ok(())
    }

    /// Send a raw text frame, bypassing event serialization
    pub async fn send_raw(&mut self, text: &str) -> Result<()> {
        self.sink.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Receive the next server event, with a timeout
    pub async fn recv(&mut self) -> Result<ServerEvent> {
        let deadline = Duration::from_secs(5);
        loop {
            let frame = tokio::time::timeout(deadline, self.source.next())
                .await?
                .ok_or_else(|| anyhow::anyhow!("WebSocket closed"))??;
            match frame {
                Message::Text(text) => return Ok(serde_json::from_str(&text)?),
                Message::Close(_) => anyhow::bail!("WebSocket closed"),
                // Control frames are not protocol events
                _ => {}
            }
        }
    }

    /// Close the connection
    pub async fn close(&mut self) -> Result<()> {
        self.sink.close().await?;
        Ok(())
    }
}

/// Create a test configuration
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    // The server binds an ephemeral port in tests; SERVER_PORT only has
    // to be present for config loading
    if std::env::var("SERVER_PORT").is_err() {
        std::env::set_var("SERVER_PORT", "0");
    }

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Extract the session token from a login response's Set-Cookie header
pub fn session_token(response: &Response) -> Result<String> {
    let header = response
        .headers()
        .get("set-cookie")
        .ok_or_else(|| anyhow::anyhow!("No Set-Cookie header in response"))?
        .to_str()?;

    header
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session="))
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("No session cookie in: {header}"))
}
