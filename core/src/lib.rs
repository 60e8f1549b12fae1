//! Resilient HTTP data-access layer for a remote car collection.
//!
//! # Overview
//! `CarService` translates domain operations (list, get, search, create,
//! update, delete) into HTTP requests and applies one uniform outcome
//! contract to all of them: a successful response is tapped for a
//! human-readable entry in the shared `MessageLog`, and any transport
//! failure is logged and replaced by a type-appropriate fallback. Callers
//! always get a resolved value, never an error.
//!
//! # Design
//! - The network seam is the `Transport` trait; the crate ships plain-data
//!   `HttpRequest`/`HttpResponse` types and no HTTP machinery of its own.
//! - `CarService` is stateless per call. Its only shared collaborator is
//!   the append-only `MessageLog`, ordered by completion arrival.
//! - Failure detail goes to `tracing` and the log, not to the return type;
//!   the caller-visible result is indistinguishable from "nothing found".

pub mod client;
pub mod error;
pub mod http;
pub mod messages;
pub mod transport;
pub mod types;

pub use client::CarService;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use messages::MessageLog;
pub use transport::Transport;
pub use types::{Car, CarRef, NewCar};
