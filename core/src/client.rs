//! The car resource client and its uniform outcome contract.
//!
//! # Design
//! Every operation is a single linear pipeline: build a request, execute it
//! through the injected `Transport`, tap the success for a log entry, and
//! funnel any failure through one recovery helper that logs it and
//! substitutes the operation's fallback value. Callers therefore never see
//! an error; they get data or a documented default, and the `MessageLog`
//! carries exactly one entry per call saying which.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::messages::MessageLog;
use crate::transport::Transport;
use crate::types::{Car, CarRef, NewCar};

/// Stateless client for the car collection.
///
/// Holds only the base URL and its two collaborators; no per-call state
/// survives an operation. Cloning is cheap and clones share the same
/// transport and message log.
#[derive(Clone)]
pub struct CarService {
    base_url: String,
    transport: Arc<dyn Transport>,
    messages: Arc<MessageLog>,
}

impl CarService {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, messages: Arc<MessageLog>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            messages,
        }
    }

    /// All cars on the server, or an empty list if the call fails.
    pub async fn get_cars(&self) -> Vec<Car> {
        let result = self
            .fetch_json::<Vec<Car>>(HttpRequest::get(self.cars_url()))
            .await
            .inspect(|_| self.log("fetched cars"));
        self.recover("getCars", Vec::new(), result)
    }

    /// The car with `id`, addressed by path segment. The server answers an
    /// absent id with a 404, which the recovery policy absorbs like any
    /// other failure, so both "not found" and "request failed" come back as
    /// `None`.
    pub async fn get_car(&self, id: u64) -> Option<Car> {
        let result = self
            .fetch_json::<Car>(HttpRequest::get(format!("{}/{id}", self.cars_url())))
            .await
            .inspect(|_| self.log(format!("fetched car id={id}")))
            .map(Some);
        self.recover(&format!("getCar id={id}"), None, result)
    }

    /// The car with `id`, addressed by query filter. A successful empty
    /// match is not a failure: it resolves to `None` through the success
    /// path and logs "did not find".
    pub async fn get_car_lenient(&self, id: u64) -> Option<Car> {
        let result = self
            .fetch_json::<Vec<Car>>(HttpRequest::get(format!("{}?id={id}", self.cars_url())))
            .await
            .map(|cars| cars.into_iter().next())
            .inspect(|found| {
                let outcome = if found.is_some() { "fetched" } else { "did not find" };
                self.log(format!("{outcome} car id={id}"));
            });
        self.recover(&format!("getCar id={id}"), None, result)
    }

    /// Cars whose name contains `term`. An empty or whitespace-only term
    /// short-circuits to an empty list with no request and no log entry.
    pub async fn search_cars(&self, term: &str) -> Vec<Car> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let result = self
            .fetch_json::<Vec<Car>>(HttpRequest::get(format!("{}?name={term}", self.cars_url())))
            .await
            .inspect(|_| self.log(format!("found cars matching \"{term}\"")));
        self.recover("searchCars", Vec::new(), result)
    }

    /// Create `car` on the server. Resolves to the created record, whose id
    /// the server assigned, or `None` if the create was not performed.
    pub async fn add_car(&self, car: &NewCar) -> Option<Car> {
        let result = async {
            let request = HttpRequest::json(HttpMethod::Post, self.cars_url(), car)?;
            self.fetch_json::<Car>(request).await
        }
        .await
        .inspect(|created| self.log(format!("added car w/ id={}", created.id)))
        .map(Some);
        self.recover("addCar", None, result)
    }

    /// Replace the server's record for `car.id` with `car`. The
    /// acknowledgement body is passed through untyped.
    pub async fn update_car(&self, car: &Car) -> Option<Value> {
        let result = async {
            let request = HttpRequest::json(HttpMethod::Put, self.cars_url(), car)?;
            self.fetch_json::<Value>(request).await
        }
        .await
        .inspect(|_| self.log(format!("updated car id={}", car.id)))
        .map(Some);
        self.recover("updateCar", None, result)
    }

    /// Delete a car given either its full record or a bare id. Resolves to
    /// the deleted record if the server echoes it back, or `None` for an
    /// empty-bodied acknowledgement.
    pub async fn delete_car(&self, car: impl Into<CarRef>) -> Option<Car> {
        let id = car.into().id();
        let result = self
            .fetch_json_optional::<Car>(HttpRequest::delete(format!("{}/{id}", self.cars_url())))
            .await
            .inspect(|_| self.log(format!("deleted car id={id}")));
        self.recover("deleteCar", None, result)
    }

    fn cars_url(&self) -> String {
        format!("{}/cars", self.base_url)
    }

    /// Execute `request` and decode its JSON body.
    async fn fetch_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.transport.execute(request).await?;
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Like `fetch_json`, but an empty body is a valid `None` (the server
    /// acknowledges deletes with 204 and no content).
    async fn fetch_json_optional<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<Option<T>, ApiError> {
        let response = self.transport.execute(request).await?;
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// The uniform recovery policy applied to every operation.
    ///
    /// A failure is written to the developer-facing diagnostic channel,
    /// recorded in the notification log as `"<operation> failed: <reason>"`,
    /// and replaced by `fallback` so the caller's value always resolves.
    fn recover<T>(&self, operation: &str, fallback: T, result: Result<T, ApiError>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                error!(operation, %err, "car API request failed");
                self.log(format!("{operation} failed: {err}"));
                fallback
            }
        }
    }

    fn log(&self, message: impl AsRef<str>) {
        self.messages.add(format!("CarService: {}", message.as_ref()));
    }
}

/// Treat any 2xx as success; map 404 to `NotFound` and everything else to
/// `HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
