//! Verify each operation against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the request the client is expected to
//! build, a simulated response (or transport failure), the value the
//! operation must resolve to, and the exact messages appended to the log.
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use car_core::{
    ApiError, Car, CarService, HttpMethod, HttpRequest, HttpResponse, MessageLog, NewCar,
    Transport,
};

const BASE_URL: &str = "http://localhost:3000";

/// Scripted transport: replays the case's simulated response and records
/// the request the client built.
struct FakeTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    fn replying(responses: Vec<Result<HttpResponse, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
    }
}

fn scripted(case: &Value) -> Arc<FakeTransport> {
    let sim = &case["simulated_response"];
    let responses = if sim.is_null() {
        Vec::new()
    } else if let Some(msg) = sim.get("transport_error").and_then(Value::as_str) {
        vec![Err(ApiError::Transport(msg.to_string()))]
    } else {
        vec![Ok(HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        })]
    };
    FakeTransport::replying(responses)
}

fn service(transport: Arc<FakeTransport>) -> (CarService, Arc<MessageLog>) {
    let messages = Arc::new(MessageLog::new());
    let service = CarService::new(BASE_URL, transport, messages.clone());
    (service, messages)
}

fn method_name(method: &HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
        HttpMethod::Put => "PUT",
        HttpMethod::Delete => "DELETE",
    }
}

fn assert_request(name: &str, case: &Value, transport: &FakeTransport) {
    let expected = &case["expected_request"];
    let requests = transport.requests();
    if expected.is_null() {
        assert!(requests.is_empty(), "{name}: expected no request");
        return;
    }

    assert_eq!(requests.len(), 1, "{name}: request count");
    let req = &requests[0];
    assert_eq!(
        method_name(&req.method),
        expected["method"].as_str().unwrap(),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    if let Some(headers) = expected.get("headers").and_then(Value::as_array) {
        let expected_headers: Vec<(String, String)> = headers
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        None | Some(Value::Null) => assert!(req.body.is_none(), "{name}: body should be None"),
        Some(expected_body) => {
            let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&body, expected_body, "{name}: body");
        }
    }
}

fn assert_messages(name: &str, case: &Value, messages: &MessageLog) {
    let expected: Vec<String> = case["expected_messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m.as_str().unwrap().to_string())
        .collect();
    assert_eq!(messages.messages(), expected, "{name}: messages");
}

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/list.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.get_cars().await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Get (strict)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/get.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.get_car(id).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Get (lenient)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_lenient_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/get_lenient.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.get_car_lenient(id).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/search.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let term = case["input"].as_str().unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.search_cars(term).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/create.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: NewCar = serde_json::from_value(case["input"].clone()).unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.add_car(&input).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/update.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: Car = serde_json::from_value(case["input"].clone()).unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        let result = service.update_car(&input).await;

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/delete.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let transport = scripted(case);
        let (service, messages) = service(transport.clone());

        // A case designates the car either as a full record or a bare id.
        let result = match case.get("input_record") {
            Some(record) => {
                let car: Car = serde_json::from_value(record.clone()).unwrap();
                service.delete_car(car).await
            }
            None => service.delete_car(case["input_id"].as_u64().unwrap()).await,
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            case["expected_result"],
            "{name}: result"
        );
        assert_request(name, case, &transport);
        assert_messages(name, case, &messages);
    }
}
