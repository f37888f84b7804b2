//! reqwest adapter for [`FeedbackTransport`].

use super::failure::failure_message;
use async_trait::async_trait;
use featurebase_application::{ApiConfig, FeedbackTransport, TransportError};
use featurebase_domain::util::preview;
use featurebase_domain::{ApiRequest, HttpMethod, Origin};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Header carrying the API key on authenticated calls (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Variable named in the error when a public-origin call has no org URL.
const ORG_URL_VARIABLE: &str = "FEATUREBASE_ORG_URL";

const USER_AGENT: &str = concat!("featurebase-mcp/", env!("CARGO_PKG_VERSION"));

/// Maximum bytes of a response body echoed into trace logs.
const TRACE_BODY_BYTES: usize = 2048;

/// Errors raised while building the transport, before any request is sent.
#[derive(Error, Debug)]
pub enum TransportSetupError {
    #[error("API key contains characters that cannot be sent in an HTTP header")]
    InvalidApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// HTTP transport to the feedback platform.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ApiConfig>,
    api_key: HeaderValue,
}

impl HttpTransport {
    pub fn new(config: Arc<ApiConfig>) -> Result<Self, TransportSetupError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Self::with_client(client, config)
    }

    /// Fails when the API key is not a valid header value.
    pub fn with_client(
        client: Client,
        config: Arc<ApiConfig>,
    ) -> Result<Self, TransportSetupError> {
        let mut api_key = HeaderValue::from_str(config.api_key())
            .map_err(|_| TransportSetupError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Absolute URL for `request`. Public-origin requests fail when no org
    /// URL was configured.
    pub fn resolve_url(&self, request: &ApiRequest) -> Result<String, TransportError> {
        let origin = match request.origin {
            Origin::Api => self.config.base_url(),
            Origin::Public => self.config.org_url().ok_or_else(|| {
                TransportError::ConfigurationMissing {
                    variable: ORG_URL_VARIABLE,
                    purpose: request
                        .operation
                        .clone()
                        .unwrap_or_else(|| request.path.clone()),
                }
            })?,
        };
        Ok(format!("{}{}", origin, request.path_and_query()))
    }

    fn headers(&self, request: &ApiRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();

        for (name, value) in &request.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %name, "Ignoring invalid request header"),
            }
        }

        // Inserted last so caller headers can never replace them.
        if request.origin == Origin::Api {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            headers.insert(HeaderName::from_static(API_KEY_HEADER), self.api_key.clone());
        }
        headers
    }
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl FeedbackTransport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Value, TransportError> {
        let url = self.resolve_url(request)?;
        trace!(url = %url, "Sending request");

        let mut builder = self
            .client
            .request(to_method(request.method), &url)
            .headers(self.headers(request));
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = text.len(),
            "Response received"
        );
        trace!(body = %preview(&text, TRACE_BODY_BYTES), "Response body");

        if !status.is_success() {
            return Err(TransportError::TransportFailure {
                status: status.as_u16(),
                message: failure_message(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| TransportError::InvalidResponseBody(e.to_string()))
    }
}
