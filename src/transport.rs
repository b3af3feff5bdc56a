//! The HTTP boundary of the client.
//!
//! The dispatcher only ever talks to a [`Transport`]. [`HttpTransport`] is the
//! `reqwest` implementation used by [`SellyClient::create`](crate::SellyClient::create).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use url::Url;

use crate::client::ClientOptions;
use crate::requests::{ApiRequest, ApiResponse, RequestToHttpString};
use crate::{Credentials, SellyError, SellyResult};

/// What went wrong in a [`TransportFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The server answered with a non-success status.
    Status,
    /// No response was received.
    Network,
    /// The server answered with a success status but the body was not JSON.
    InvalidBody,
}

/// A failed request, as reported by a transport.
///
/// The dispatcher turns this into a [`NormalizedError`](crate::NormalizedError)
/// before it reaches the caller, except for [`FailureKind::InvalidBody`], which
/// becomes [`SellyError::MalformedResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    /// What went wrong.
    pub kind: FailureKind,
    /// The status code of the response, `None` if no response was received.
    pub status: Option<u16>,
    /// The status text of the response, e.g. `Not Found`.
    pub status_text: Option<String>,
    /// A description of the failure.
    pub message: String,
}

impl TransportFailure {
    /// A failure for a response with a non-success status.
    pub fn status(status: u16, status_text: impl Into<String>) -> Self {
        let status_text = status_text.into();
        Self {
            kind: FailureKind::Status,
            status: Some(status),
            message: format!("HTTP {} {}", status, status_text),
            status_text: Some(status_text),
        }
    }

    /// A failure that happened before a response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Network,
            status: None,
            status_text: None,
            message: message.into(),
        }
    }

    /// A success response whose body could not be decoded.
    pub fn invalid_body(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::InvalidBody,
            status: Some(status),
            status_text: None,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportFailure {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_decode() {
            FailureKind::InvalidBody
        } else if error.status().is_some() {
            FailureKind::Status
        } else {
            FailureKind::Network
        };
        Self {
            kind,
            status: error.status().map(|status| status.as_u16()),
            status_text: error
                .status()
                .and_then(|status| status.canonical_reason())
                .map(str::to_string),
            message: error.to_string(),
        }
    }
}

/// Performs the network I/O for a single request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the decoded JSON response.
    ///
    /// Non-success statuses must be reported as `Err`.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportFailure>;
}

/// The default transport, backed by a `reqwest::Client`.
///
/// Authentication and the user agent are set once as default headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the transport for the given credentials.
    pub fn new(credentials: &Credentials, options: &ClientOptions) -> SellyResult<Self> {
        let mut authorization = HeaderValue::from_str(&credentials.authorization())?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(USER_AGENT, HeaderValue::from_str(&options.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut base_url = Url::parse(&options.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(options.allow_insecure)
            .timeout(options.timeout)
            .build()
            .map_err(SellyError::HttpClient)?;

        Ok(Self { base_url, client })
    }

    /// The API root all paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportFailure> {
        let url = self
            .url_for(&request.path)
            .map_err(|e| TransportFailure::network(e.to_string()))?;

        let mut builder = self.client.request(request.method.as_method(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let http_request = builder.build()?;

        if tracing::enabled!(tracing::Level::TRACE) {
            if let Ok(text) = http_request.to_http_string() {
                tracing::trace!(request = %text, "sending request");
            }
        }

        let response = self.client.execute(http_request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportFailure::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status"),
            ));
        }

        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| {
                TransportFailure::invalid_body(
                    status.as_u16(),
                    format!("invalid JSON in response: {}", e),
                )
            })?
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            data,
        })
    }
}
