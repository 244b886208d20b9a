//! Mock API tests for the siren-rest crate.
//!
//! These tests use wiremock to simulate the dispatch API and test the
//! transport's behavior without requiring network access or a running
//! server.

use serde_json::json;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use siren_core::calls::{CallStatus, EmergencyCall, IncidentType};
use siren_core::error::Error;
use siren_core::traits::CallService;
use siren_core::{ApiUrl, Credentials};
use siren_rest::{RestClient, SessionStore};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

/// The page body the API returns for an empty collection.
fn empty_page() -> serde_json::Value {
    json!({ "content": [], "totalPages": 0, "number": 0 })
}

fn sample_call() -> EmergencyCall {
    EmergencyCall {
        id: None,
        caller_name: "Bob".to_string(),
        position: "Main St".to_string(),
        incident_type: IncidentType::Fire,
        status: CallStatus::Open,
    }
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_stores_credential() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("page", "0"))
        .and(query_param("size", "1"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    assert!(!session.is_authenticated());

    let ok = session.login(&Credentials::new("alice", "secret")).await;

    assert!(ok);
    assert!(session.is_authenticated());
    assert_eq!(
        session.auth_header().unwrap().as_str(),
        "Basic YWxpY2U6c2VjcmV0"
    );
}

#[tokio::test]
async fn test_login_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    let ok = session.login(&Credentials::new("alice", "wrongpass")).await;

    assert!(!ok);
    assert!(!session.is_authenticated());
    assert!(session.auth_header().is_none());
}

#[tokio::test]
async fn test_login_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    let ok = session.login(&Credentials::new("alice", "secret")).await;

    assert!(!ok);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_login_unreachable_server() {
    // Start a server just to reserve a port, then shut it down.
    let server = MockServer::start().await;
    let api = mock_api_url(&server);
    drop(server);

    let session = SessionStore::new(RestClient::new(api));
    let ok = session.login(&Credentials::new("alice", "secret")).await;

    assert!(!ok);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    assert!(session.login(&Credentials::new("alice", "secret")).await);

    session.logout();
    assert!(!session.is_authenticated());

    // Logging out twice is a no-op the second time.
    session.logout();
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_requests_after_logout_carry_no_credential() {
    let server = MockServer::start().await;

    // Any request still carrying an authorization header is a bug.
    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(2)
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    assert!(session.login(&Credentials::new("alice", "secret")).await);

    session.logout();
    let result = session.list_calls(0, 10, None).await;

    match result {
        Err(Error::Api(e)) => assert_eq!(e.status, 401),
        other => panic!("expected 401 api error, got {:?}", other),
    }
}

// ============================================================================
// Collection Operation Tests
// ============================================================================

async fn logged_in_session(server: &MockServer) -> SessionStore {
    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(server)));
    assert!(session.login(&Credentials::new("alice", "secret")).await);
    session
}

#[tokio::test]
async fn test_list_calls_maps_page_body() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("page", "3"))
        .and(query_param("size", "10"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                {
                    "id": 31,
                    "callerName": "Carol",
                    "position": "Pier 4",
                    "incidentType": "CRIME",
                    "status": "CLOSED"
                }
            ],
            "totalPages": 7,
            "totalElements": 61,
            "number": 3,
            "size": 10,
            "first": false,
            "last": false
        })))
        .mount(&server)
        .await;

    let page = session.list_calls(3, 10, None).await.unwrap();

    assert_eq!(page.number, 3);
    assert_eq!(page.total_pages, 7);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].id, Some(31));
    assert_eq!(page.content[0].incident_type, IncidentType::Crime);
}

#[tokio::test]
async fn test_list_calls_passes_incident_type_filter() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(query_param("incidentType", "FIRE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let page = session
        .list_calls(0, 10, Some(IncidentType::Fire))
        .await
        .unwrap();

    assert!(page.content.is_empty());
}

#[tokio::test]
async fn test_create_call_posts_draft_without_id() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    // Exact body match: the draft must serialize without an id key.
    Mock::given(method("POST"))
        .and(path("/api/emergency-calls"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .and(body_json(json!({
            "callerName": "Bob",
            "position": "Main St",
            "incidentType": "FIRE",
            "status": "OPEN"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9,
            "callerName": "Bob",
            "position": "Main St",
            "incidentType": "FIRE",
            "status": "OPEN"
        })))
        .mount(&server)
        .await;

    let created = session.create_call(&sample_call()).await.unwrap();

    assert_eq!(created.id, Some(9));
    assert_eq!(created.caller_name, "Bob");
}

#[tokio::test]
async fn test_update_call_puts_full_record() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/emergency-calls/7"))
        .and(body_json(json!({
            "id": 7,
            "callerName": "Bob",
            "position": "Harbor Rd",
            "incidentType": "ACCIDENT",
            "status": "CLOSED"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "callerName": "Bob",
            "position": "Harbor Rd",
            "incidentType": "ACCIDENT",
            "status": "CLOSED"
        })))
        .mount(&server)
        .await;

    let call = EmergencyCall {
        id: Some(7),
        caller_name: "Bob".to_string(),
        position: "Harbor Rd".to_string(),
        incident_type: IncidentType::Accident,
        status: CallStatus::Closed,
    };

    let updated = session.update_call(7, &call).await.unwrap();
    assert_eq!(updated.status, CallStatus::Closed);
}

#[tokio::test]
async fn test_delete_call_success() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/emergency-calls/5"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(session.delete_call(5).await.is_ok());
}

#[tokio::test]
async fn test_delete_call_failure_propagates_status() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/api/emergency-calls/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = session.delete_call(42).await;

    match result {
        Err(Error::Api(e)) => assert_eq!(e.status, 500),
        other => panic!("expected 500 api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_call_fetches_by_id() {
    let server = MockServer::start().await;
    let session = logged_in_session(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "callerName": "Dave",
            "position": "Oak Ln",
            "incidentType": "ACCIDENT",
            "status": "OPEN"
        })))
        .mount(&server)
        .await;

    let call = session.get_call(12).await.unwrap();

    assert_eq!(call.id, Some(12));
    assert_eq!(call.caller_name, "Dave");
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
async fn test_register_posts_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(json!({
            "username": "alice",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let client = RestClient::new(mock_api_url(&server));
    assert!(client.register("alice", "secret123").await.is_ok());
}

#[tokio::test]
async fn test_register_existing_user_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": "INTERNAL_SERVER_ERROR",
            "timestamp": "2026-08-06 10:00:00",
            "message": "User already exists",
            "errors": []
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(mock_api_url(&server));
    let result = client.register("alice", "secret123").await;

    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("User already exists"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_non_json_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let client = RestClient::new(mock_api_url(&server));
    let result = client.list_calls(0, 10, None, None).await;

    assert!(result.is_err());
    // Should handle non-JSON error gracefully
    let err = result.unwrap_err().to_string();
    assert!(err.contains("500"));
}

#[tokio::test]
async fn test_empty_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = RestClient::new(mock_api_url(&server));
    let result = client.list_calls(0, 10, None, None).await;

    assert!(result.is_err());
    let err = result.unwrap_err().to_string();
    assert!(err.contains("503"));
}

#[tokio::test]
async fn test_validation_error_body_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "BAD_REQUEST",
            "timestamp": "2026-08-06 10:00:00",
            "message": "Validation error",
            "errors": ["Password must be at least 6 characters long"]
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(mock_api_url(&server));
    let err = client.register("alice", "short").await.unwrap_err();

    match err {
        Error::Api(e) => {
            assert_eq!(e.status, 400);
            assert_eq!(e.message.as_deref(), Some("Validation error"));
            assert_eq!(e.errors.len(), 1);
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[tokio::test]
async fn test_login_then_fetch_dashboard_page() {
    let server = MockServer::start().await;

    // Login probe: page 0, size 1.
    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("size", "1"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    // Dashboard fetch: page 0, size 10.
    Mock::given(method("GET"))
        .and(path("/api/emergency-calls"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .and(header("authorization", "Basic YWxpY2U6c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "id": 1,
                "callerName": "Bob",
                "position": "Main St",
                "incidentType": "FIRE",
                "status": "OPEN"
            }],
            "totalPages": 1,
            "number": 0
        })))
        .mount(&server)
        .await;

    let session = SessionStore::new(RestClient::new(mock_api_url(&server)));
    assert!(session.login(&Credentials::new("alice", "secret")).await);

    let page = session.list_calls(0, 10, None).await.unwrap();

    assert_eq!(page.number, 0);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.content.len(), 1);

    let call = &page.content[0];
    assert_eq!(call.id, Some(1));
    assert_eq!(call.caller_name, "Bob");
    assert_eq!(call.position, "Main St");
    assert_eq!(call.incident_type, IncidentType::Fire);
    assert_eq!(call.status, CallStatus::Open);
}
