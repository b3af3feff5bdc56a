#![warn(missing_docs)]
#![crate_name = "selly_rs"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Selly Client
//!
//! `selly_rs` is an async client for the Selly e-commerce REST API (v2).
//!
//! Every endpoint is described by one row of the endpoint table
//! ([`Operation`] / [`EndpointDescriptor`]); a single dispatcher turns a row and
//! its [`Args`] into a request. Failed requests are always reported as a
//! [`NormalizedError`] carrying the status text and status code.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use selly_rs::{ClientOptions, SellyClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> selly_rs::SellyResult<()> {
//!     let client = SellyClient::create(
//!         "user@example.com",
//!         "my-api-key",
//!         ClientOptions::default(),
//!     )?;
//!
//!     let coupons = client.get_coupons().await?;
//!     println!("{:#?}", coupons);
//!
//!     client
//!         .update_coupon("abc123", &json!({ "discount": 10 }))
//!         .await?;
//!     Ok(())
//! }
//! ```

#[macro_use]
mod macros;

/// Module containing the client.
pub mod client;
/// Module containing the account credentials.
pub mod credentials;
pub mod dispatch;
pub mod endpoints;
/// Module containing the error type.
pub mod error;
pub mod models;
/// Module containing the request and response types of the transport.
pub mod requests;
pub mod transport;

pub use async_trait::async_trait;
pub use client::{BoundOperation, ClientOptions, SellyClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use credentials::Credentials;
pub use dispatch::Args;
pub use endpoints::{EndpointDescriptor, HttpMethod, Operation, UnknownOperation};
pub use error::{NormalizedError, SellyError};
pub use requests::{ApiRequest, ApiResponse};
pub use serde_json::Value;
pub use transport::{FailureKind, HttpTransport, Transport, TransportFailure};

/// Result type for the selly-rs crate.
pub type SellyResult<T> = std::result::Result<T, error::SellyError>;
