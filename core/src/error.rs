//! Error types for the car API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the server signals an absent
//! id with a 404 and the recovery policy's log line should say so plainly.
//! All other non-2xx responses land in `HttpError` with the raw status code
//! and body for debugging. None of these variants ever reach a
//! `CarService` caller; they exist for the transport seam and the recovery
//! wrapper's diagnostics.

use std::fmt;

/// Failures that can occur between building a request and decoding its
/// response.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404 — the requested car does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The request could not be executed at all (connection refused, DNS
    /// failure, timeout).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Transport(msg) => {
                write!(f, "transport error: {msg}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
