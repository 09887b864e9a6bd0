//! HTTP response assertions.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

/// Asserts the status and returns the error body, checking its shape.
pub fn assert_error(response: &TestResponse, expected: StatusCode) -> Value {
    response.assert_status(expected);

    let body: Value = response.json();
    assert_eq!(
        body["title"],
        expected.canonical_reason().unwrap_or("Error"),
        "Unexpected error title in {}",
        body
    );
    assert!(
        body["description"].is_string(),
        "Expected a description in {}",
        body
    );
    body
}

/// Returns the `elements` array of a listing response.
pub fn elements(response: &TestResponse) -> Vec<Value> {
    let body: Value = response.json();
    body["elements"]
        .as_array()
        .cloned()
        .unwrap_or_else(|| panic!("Expected an elements array in {}", body))
}
