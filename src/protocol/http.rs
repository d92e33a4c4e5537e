// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP implementation of [`DeviceApi`] for the light server.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ParseError, ProtocolError};
use crate::protocol::DeviceApi;
use crate::state::{DeviceInfo, DeviceStatus};
use crate::types::{Brightness, ColorTone, DeviceId, RgbColor};

// ============================================================================
// HttpConfig
// ============================================================================

/// Where and how to reach the light server.
///
/// The port follows the scheme unless set explicitly, and every endpoint
/// lives below [`api_path`](Self::api_path).
///
/// # Examples
///
/// ```
/// use lightdeck::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("lights.local")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://lights.local:8080");
///
/// let secure = HttpConfig::new("lights.example.com").with_https();
/// assert_eq!(secure.port(), 443);
/// assert_eq!(secure.api_url(), "https://lights.example.com/api");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: Option<u16>,
    https: bool,
    api_path: String,
    timeout: Duration,
}

impl HttpConfig {
    /// Path prefix of the server's endpoints.
    pub const DEFAULT_API_PATH: &'static str = "/api";
    /// Transport-level timeout applied by the HTTP client itself.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for `host`, plain HTTP on port 80.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            https: false,
            api_path: Self::DEFAULT_API_PATH.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Uses an explicit port instead of the scheme's default.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Talks HTTPS; the default port becomes 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.https = true;
        self
    }

    /// Mounts the endpoints below another path, e.g. behind a reverse proxy.
    #[must_use]
    pub fn with_api_path(mut self, path: impl Into<String>) -> Self {
        self.api_path = path.into();
        self
    }

    /// Sets the transport-level timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the effective port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(self.port_for_scheme())
    }

    /// Returns whether HTTPS is used.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.https
    }

    /// Returns the endpoint path prefix.
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns the transport-level timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `scheme://host[:port]`, omitting the scheme's default port.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        match self.port {
            Some(port) if port != self.port_for_scheme() => {
                format!("{scheme}://{}:{port}", self.host)
            }
            _ => format!("{scheme}://{}", self.host),
        }
    }

    /// Returns the URL every endpoint path is appended to.
    #[must_use]
    pub fn api_url(&self) -> String {
        let path = self.api_path.trim_matches('/');
        if path.is_empty() {
            self.base_url()
        } else {
            format!("{}/{path}", self.base_url())
        }
    }

    fn port_for_scheme(&self) -> u16 {
        if self.https { 443 } else { 80 }
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the host is blank, or
    /// [`ProtocolError::Http`] if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        HttpClient::build(self.api_url(), self.timeout)
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the light server.
///
/// Every operation is a `GET` with query parameters. Responses are wrapped
/// in an envelope: `{"data": ...}` on success or `{"error": "..."}` when the
/// server could not complete the operation.
///
/// # Examples
///
/// ```no_run
/// use lightdeck::protocol::{DeviceApi, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new("192.168.1.20:8080")?;
/// for device in client.list_devices().await? {
///     println!("{} ({})", device.name, device.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    api_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    error: Option<String>,
}

impl HttpClient {
    /// Creates a client for `server` with the default API path and timeout.
    ///
    /// `server` is `host[:port]`, optionally prefixed with `http://` or
    /// `https://`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(server: impl Into<String>) -> Result<Self, ProtocolError> {
        let server = server.into();
        let server = server.trim_end_matches('/');
        let origin = if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("http://{server}")
        };
        Self::build(
            format!("{origin}{}", HttpConfig::DEFAULT_API_PATH),
            HttpConfig::DEFAULT_TIMEOUT,
        )
    }

    fn build(api_url: String, timeout: Duration) -> Result<Self, ProtocolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;
        Ok(Self { api_url, client })
    }

    /// Returns the URL endpoint paths are appended to.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect();
        if query.is_empty() {
            format!("{}/{path}", self.api_url)
        } else {
            format!("{}/{path}?{}", self.api_url, query.join("&"))
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(path, params);

        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(
                ProtocolError::ConnectionFailed(format!("HTTP {} - {reason}", status.as_u16()))
                    .into(),
            );
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        parse_envelope(&body)
    }

    async fn device_call(
        &self,
        path: &str,
        id: &DeviceId,
        mut params: Vec<(&str, String)>,
    ) -> Result<DeviceStatus, ApiError> {
        params.insert(0, ("id", id.as_str().to_string()));
        self.call(path, &params).await
    }
}

/// Unwraps a server envelope into its payload or the server's error message.
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(ParseError::Json)?;
    match envelope {
        Envelope {
            error: Some(message),
            ..
        } => Err(ApiError::new(message)),
        Envelope {
            data: Some(data), ..
        } => Ok(data),
        Envelope { .. } => Err(ParseError::UnexpectedFormat(
            "response carries neither data nor error".to_string(),
        )
        .into()),
    }
}

impl DeviceApi for HttpClient {
    async fn list_devices(&self) -> Result<Vec<DeviceInfo>, ApiError> {
        self.call("devices", &[]).await
    }

    async fn get_status(&self, id: &DeviceId) -> Result<DeviceStatus, ApiError> {
        self.device_call("device/status", id, Vec::new()).await
    }

    async fn set_on_off(&self, id: &DeviceId, on: bool) -> Result<DeviceStatus, ApiError> {
        self.device_call("device/set_on", id, vec![("on", on.to_string())])
            .await
    }

    async fn set_brightness(
        &self,
        id: &DeviceId,
        brightness: Brightness,
    ) -> Result<DeviceStatus, ApiError> {
        self.device_call(
            "device/set_brightness",
            id,
            vec![("brightness", brightness.value().to_string())],
        )
        .await
    }

    async fn set_rgb(&self, id: &DeviceId, rgb: RgbColor) -> Result<DeviceStatus, ApiError> {
        self.device_call(
            "device/set_rgb",
            id,
            vec![
                ("r", rgb.r.to_string()),
                ("g", rgb.g.to_string()),
                ("b", rgb.b.to_string()),
            ],
        )
        .await
    }

    async fn set_tone(&self, id: &DeviceId, tone: ColorTone) -> Result<DeviceStatus, ApiError> {
        self.device_call("device/set_tone", id, vec![("tone", tone.value().to_string())])
            .await
    }
}
