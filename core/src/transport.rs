//! The seam between the client and the machinery that actually moves bytes.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations perform the network call described by `request` and
/// return the raw response, using `ApiError::Transport` for failures that
/// prevent a response from arriving at all. Status interpretation and body
/// decoding stay in `CarService`, so a transport never needs to know what a
/// car is. Tests substitute a scripted implementation to drive the client
/// without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
