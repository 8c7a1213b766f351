//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_core::{
    ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Check method, path, and (when present) the JSON body of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );
    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value =
                serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn assert_expected_error(name: &str, err: ApiError, expected: &serde_json::Value) {
    match expected.as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound { .. }), "{name}: expected NotFound"),
        "Validation" => {
            assert!(matches!(err, ApiError::Validation { .. }), "{name}: expected Validation")
        }
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn load(raw: &str) -> Vec<serde_json::Value> {
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_todo(&input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())],
            "{name}: headers"
        );

        let result = c.parse_create_todo(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_todos();
        assert_request(name, &req, &case["expected_request"]);

        let todos = c.parse_list_todos(simulated_response(&case)).unwrap();
        let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(todos, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_get_todo(id);
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_todo(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_todo(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_todo(simulated_response(&case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_expected_error(name, result.unwrap_err(), expected_error);
        } else {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();

        let req = c.build_delete_todo(id);
        assert_request(name, &req, &case["expected_request"]);

        let success = c.parse_delete_todo(simulated_response(&case)).unwrap();
        assert_eq!(
            success,
            case["expected_result"]["success"].as_bool().unwrap(),
            "{name}: parsed result"
        );
    }
}
