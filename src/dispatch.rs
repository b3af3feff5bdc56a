//! Turns an [`Operation`] and its [`Args`] into a request, sends it and
//! normalizes the outcome.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::Instrument;

use crate::requests::ApiRequest;
use crate::transport::{FailureKind, Transport, TransportFailure};
use crate::{NormalizedError, Operation, SellyError, SellyResult};

/// The arguments of a single call.
///
/// Whether an identifier was given is stated explicitly rather than guessed
/// from the shape of the first argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Args {
    /// Neither an identifier nor a payload.
    #[default]
    None,
    /// Only a path identifier.
    Id(String),
    /// Only a payload, sent as the body without wrapping.
    Payload(Value),
    /// A path identifier and a payload, wrapped in the body key if there is one.
    IdAndPayload(String, Value),
}

impl Args {
    /// Arguments carrying only an identifier.
    pub fn id(id: impl Into<String>) -> Self {
        Args::Id(id.into())
    }

    /// Arguments carrying only a payload.
    pub fn payload<P: Serialize + ?Sized>(payload: &P) -> SellyResult<Self> {
        Ok(Args::Payload(serde_json::to_value(payload)?))
    }

    /// Arguments carrying an identifier and a payload.
    pub fn id_and_payload<P: Serialize + ?Sized>(
        id: impl Into<String>,
        payload: &P,
    ) -> SellyResult<Self> {
        Ok(Args::IdAndPayload(id.into(), serde_json::to_value(payload)?))
    }

    fn into_parts(self) -> (Option<String>, Option<Value>) {
        match self {
            Args::None => (None, None),
            Args::Id(id) => (Some(id), None),
            Args::Payload(payload) => (None, Some(payload)),
            Args::IdAndPayload(id, payload) => (Some(id), Some(payload)),
        }
    }
}

impl From<TransportFailure> for NormalizedError {
    fn from(failure: TransportFailure) -> Self {
        NormalizedError {
            error: failure.status_text.unwrap_or(failure.message),
            status: failure.status.unwrap_or(0),
        }
    }
}

/// Resolves the path and body for a call without sending anything.
///
/// Fails with [`SellyError::MissingIdentifier`] if the endpoint has a
/// placeholder and no identifier was given, and with
/// [`SellyError::InvalidIdentifier`] if the identifier is empty, `.` or `..`.
pub fn build_request(operation: Operation, args: Args) -> SellyResult<ApiRequest> {
    let descriptor = operation.descriptor();
    let (id, payload) = args.into_parts();

    let (path, body) = match id {
        Some(id) => {
            // Percent-encoding cannot neutralize these; URL parsers resolve
            // `%2E%2E` like `..`.
            if descriptor.requires_id() && matches!(id.as_str(), "" | "." | "..") {
                return Err(SellyError::InvalidIdentifier {
                    operation: operation.name(),
                    id,
                });
            }
            let body = match (descriptor.effective_body_key(), payload) {
                (Some(key), Some(payload)) => {
                    let mut wrapped = Map::with_capacity(1);
                    wrapped.insert(key.to_string(), payload);
                    Some(Value::Object(wrapped))
                }
                (None, payload) => payload,
                (Some(_), None) => None,
            };
            (descriptor.path_for(&id), body)
        }
        None if descriptor.requires_id() => {
            return Err(SellyError::MissingIdentifier {
                operation: operation.name(),
            });
        }
        None => (descriptor.url_template.to_string(), payload),
    };

    Ok(ApiRequest {
        method: descriptor.method,
        path,
        body,
    })
}

/// Sends a call through the transport and returns the JSON payload of the response.
pub async fn dispatch<T>(transport: &T, operation: Operation, args: Args) -> SellyResult<Value>
where
    T: Transport + ?Sized,
{
    let request = build_request(operation, args)?;
    let span = tracing::debug_span!(
        "selly_request",
        operation = %operation,
        method = %request.method,
        path = %request.path,
    );

    async move {
        tracing::debug!("sending request");
        match transport.execute(request).await {
            Ok(response) => {
                tracing::debug!(status = response.status, "request succeeded");
                Ok(response.data)
            }
            Err(failure) if failure.kind == FailureKind::InvalidBody => {
                tracing::warn!(error = %failure.message, "undecodable response");
                Err(SellyError::MalformedResponse {
                    status: failure.status.unwrap_or(0),
                    reason: failure.message,
                })
            }
            Err(failure) => {
                let normalized = NormalizedError::from(failure);
                tracing::warn!(
                    status = normalized.status,
                    error = %normalized.error,
                    "request failed"
                );
                Err(SellyError::Api(normalized))
            }
        }
    }
    .instrument(span)
    .await
}
