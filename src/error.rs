use serde::{Deserialize, Serialize};

/// The uniform shape every failed request is reduced to.
///
/// `status` is the HTTP status code of the failed response, or `0` when the
/// request never produced a response (connection refused, timeout, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedError {
    /// The status text or error message.
    pub error: String,
    /// The HTTP status code, `0` if there was no response.
    pub status: u16,
}

impl NormalizedError {
    /// Creates a new `NormalizedError`.
    pub fn new(error: impl Into<String>, status: u16) -> Self {
        Self {
            error: error.into(),
            status,
        }
    }
}

impl std::fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.error, self.status)
    }
}

/// Error type for the selly-rs crate.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SellyError {
    /// A required credential was empty or missing.
    #[error("Missing credential: {0}.")]
    #[diagnostic(
        code(selly_rs::error::SellyError::MissingCredential),
        help("both the account email and the API key are required")
    )]
    MissingCredential(&'static str),

    /// The operation needs a path identifier but none was given.
    #[error("Operation `{operation}` requires an identifier.")]
    #[diagnostic(code(selly_rs::error::SellyError::MissingIdentifier))]
    MissingIdentifier {
        /// The wire name of the operation, e.g. `getCoupon`.
        operation: &'static str,
    },

    /// The identifier cannot be used as a path segment (empty, `.` or `..`).
    #[error("Operation `{operation}` got an invalid identifier `{id}`.")]
    #[diagnostic(code(selly_rs::error::SellyError::InvalidIdentifier))]
    InvalidIdentifier {
        /// The wire name of the operation, e.g. `getCoupon`.
        operation: &'static str,
        /// The rejected identifier.
        id: String,
    },

    /// The request payload could not be converted to JSON.
    #[error("Invalid request payload: {0}")]
    #[diagnostic(code(selly_rs::error::SellyError::InvalidPayload))]
    InvalidPayload(#[from] serde_json::Error),

    /// The response payload did not match the requested type.
    #[error("Unexpected response payload: {0}")]
    #[diagnostic(code(selly_rs::error::SellyError::InvalidResponse))]
    InvalidResponse(#[source] serde_json::Error),

    /// The request succeeded but its body was not valid JSON.
    #[error("Response with status {status} could not be decoded: {reason}")]
    #[diagnostic(code(selly_rs::error::SellyError::MalformedResponse))]
    MalformedResponse {
        /// The (successful) HTTP status code of the response.
        status: u16,
        /// Why decoding failed.
        reason: String,
    },

    /// The request failed. Raw transport errors are always reduced to this.
    #[error("Request failed: {0}")]
    #[diagnostic(code(selly_rs::error::SellyError::Api))]
    Api(NormalizedError),

    /// The HTTP client could not be built.
    #[error("Failed to build the HTTP client: {0}")]
    #[diagnostic(code(selly_rs::error::SellyError::HttpClient))]
    HttpClient(#[source] reqwest::Error),

    /// An invalid header value has been provided.
    #[error(transparent)]
    #[diagnostic(code(selly_rs::error::SellyError::InvalidHeaderValue))]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Url parsing error.
    #[error(transparent)]
    #[diagnostic(code(selly_rs::error::SellyError::UrlParseError))]
    UrlParseError(#[from] url::ParseError),
}

impl SellyError {
    /// Returns the normalized error if this is a failed request.
    pub fn as_normalized(&self) -> Option<&NormalizedError> {
        match self {
            SellyError::Api(normalized) => Some(normalized),
            _ => None,
        }
    }

    /// Returns whether the error was raised before the network was touched.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            SellyError::Api(_)
                | SellyError::MalformedResponse { .. }
                | SellyError::InvalidResponse(_)
        )
    }
}

impl From<NormalizedError> for SellyError {
    fn from(value: NormalizedError) -> Self {
        SellyError::Api(value)
    }
}
