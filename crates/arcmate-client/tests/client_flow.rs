//! End-to-end tests of the client facade against the mock backend.

use arcmate_client::{ApiClient, ClientConfig, ClientError, LatencyConfig, LoginRequest};
use serde_json::json;

fn test_client() -> ApiClient {
    let config = ClientConfig {
        latency: LatencyConfig::none(),
        seed_documents: true,
    };
    ApiClient::new(&config)
}

fn credentials(user: &str) -> LoginRequest {
    LoginRequest {
        user_name: user.to_string(),
        password: "secret".to_string(),
        ip_address: "127.0.0.1".to_string(),
    }
}

async fn logged_in_client() -> ApiClient {
    let client = test_client();
    client.login(&credentials("demo")).await.unwrap();
    client
}

// ---------------------------------------------------------------------------
// Session lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_login_success_stores_token() {
    let client = test_client();
    assert_eq!(client.login_id(), None);

    let token = client.login(&credentials("demo")).await.unwrap();
    assert!(token.starts_with("LOGIN-"));
    assert_eq!(client.login_id(), Some(token));
}

#[tokio::test]
async fn test_login_token_missing_is_failure_without_session() {
    let client = test_client();
    client.backend().respond_next("LOGIN", json!({}));

    let err = client.login(&credentials("demo")).await.unwrap_err();
    assert!(matches!(err, ClientError::TokenMissing));
    assert_eq!(client.login_id(), None);
}

#[tokio::test]
async fn test_login_failure_leaves_prior_session_untouched() {
    let client = logged_in_client().await;
    let before = client.login_id().unwrap();

    // A blank token is as missing as no token at all.
    client
        .backend()
        .respond_next("LOGIN", json!({ "LoginId": "  " }));
    let err = client.login(&credentials("other")).await.unwrap_err();
    assert!(matches!(err, ClientError::TokenMissing));
    assert_eq!(client.login_id(), Some(before));
}

#[tokio::test]
async fn test_failed_connectivity_check_rolls_session_back() {
    let client = test_client();
    client
        .backend()
        .fail_next("TEST", json!({ "Message": "backend unavailable" }));

    let err = client.login(&credentials("demo")).await.unwrap_err();
    assert_eq!(err.to_string(), "backend unavailable");
    assert_eq!(client.login_id(), None);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let client = logged_in_client().await;
    client.logout().await.unwrap();
    assert_eq!(client.login_id(), None);
}

#[tokio::test]
async fn test_logout_clears_session_even_when_call_fails() {
    let client = logged_in_client().await;
    client
        .backend()
        .fail_next("LOGOUT", json!({ "Message": "server hiccup" }));

    // The failure is swallowed; local state still ends logged out.
    client.logout().await.unwrap();
    assert_eq!(client.login_id(), None);
}

#[tokio::test]
async fn test_logout_without_session_is_noop() {
    let client = test_client();
    client.logout().await.unwrap();
    assert_eq!(client.login_id(), None);
}

// ---------------------------------------------------------------------------
// Repository selection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_repo_listing_and_selection() {
    let client = logged_in_client().await;

    let repos = client.get_repos().await.unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "Repo A");

    client.open_repo(&repos[1].repository_id).await.unwrap();
    assert_eq!(client.repository_id(), Some("2".to_string()));
}

#[tokio::test]
async fn test_repo_operations_require_login() {
    let client = test_client();
    assert!(matches!(
        client.get_repos().await.unwrap_err(),
        ClientError::NotLoggedIn
    ));
    assert!(matches!(
        client.open_repo("1").await.unwrap_err(),
        ClientError::NotLoggedIn
    ));
}

#[tokio::test]
async fn test_selection_resets_on_logout() {
    let client = logged_in_client().await;
    client.open_repo("1").await.unwrap();
    assert_eq!(client.repository_id(), Some("1".to_string()));

    client.logout().await.unwrap();
    assert_eq!(client.repository_id(), None);
}

// ---------------------------------------------------------------------------
// Document types and search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_document_types_reference_set() {
    let client = test_client();
    let types = client.document_types().await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Invoice", "Contract", "Receipt"]);
}

#[tokio::test]
async fn test_empty_search_returns_entire_store() {
    let client = test_client();
    let results = client.search(json!({})).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].document_id, "1001");
    assert_eq!(results[1].document_id, "1002");
}

#[tokio::test]
async fn test_search_by_exact_amount() {
    let client = test_client();
    let results = client.search(json!({ "Amount": 500 })).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Invoice A");
}

#[tokio::test]
async fn test_search_text_casing_is_irrelevant() {
    let client = test_client();
    for term in ["CONTRACT", "Contract", "contract"] {
        let results = client.search(json!({ "Text": term })).await.unwrap();
        assert_eq!(results.len(), 1, "term {term:?}");
        assert_eq!(results[0].title, "Contract B");
    }
}

#[tokio::test]
async fn test_search_by_type_id_fallback() {
    let client = test_client();

    let results = client.search(json!({ "DocTypeId": "2" })).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].type_name, "Contract");

    // An unmapped id imposes no constraint.
    let results = client.search(json!({ "DocTypeId": "99" })).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_search_type_name_silently_ignores_type_id() {
    // Inherited behavior, kept on purpose: a supplied type name wins and a
    // conflicting type id is not consulted.
    let client = test_client();
    let results = client
        .search(json!({ "TypeName": "Invoice", "DocTypeId": "2" }))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].type_name, "Invoice");
}

#[tokio::test]
async fn test_search_filters_are_conjunctive() {
    let client = test_client();
    let results = client
        .search(json!({ "Text": "invoice", "Amount": 500, "TypeName": "Invoice" }))
        .await
        .unwrap();
    assert_eq!(results.len(), 1);

    // One disagreeing filter empties the result; that is a normal outcome.
    let results = client
        .search(json!({ "Text": "invoice", "Amount": 1200 }))
        .await
        .unwrap();
    assert!(results.is_empty());
}

// ---------------------------------------------------------------------------
// Adding documents
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_added_document_lands_first_with_fresh_id() {
    let client = test_client();
    let outcome = client
        .add_document(json!({ "Title": "Expense Report", "TypeName": "Receipt", "Amount": 42 }))
        .await
        .unwrap();
    assert!(outcome.ok);
    let created = outcome.created.unwrap();
    assert_ne!(created.document_id, "1001");
    assert_ne!(created.document_id, "1002");

    let results = client.search(json!({})).await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], created);
    assert_eq!(results[1].document_id, "1001");
}

#[tokio::test]
async fn test_added_document_is_searchable() {
    let client = test_client();
    client
        .add_document(json!({ "Title": "Yearly Audit", "TypeName": "Contract", "Amount": 9000 }))
        .await
        .unwrap();

    let results = client.search(json!({ "Text": "audit" })).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Yearly Audit");

    let results = client.search(json!({ "DocTypeId": "2" })).await.unwrap();
    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_add_document_defaults_and_validation() {
    let client = test_client();

    let outcome = client.add_document(json!({})).await.unwrap();
    let created = outcome.created.unwrap();
    assert_eq!(created.title, "Untitled Document");
    assert_eq!(created.type_name, "Invoice");
    assert_eq!(created.amount, 0.0);

    let err = client
        .add_document(json!({ "Required": true, "Value": "" }))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Error surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_transport_failure_message_chain() {
    let client = test_client();

    client
        .backend()
        .fail_next("DOCUMENTSEARCH", json!({ "Message": "index rebuilding" }));
    let err = client.search(json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "index rebuilding");

    client
        .backend()
        .fail_next("DOCUMENTSEARCH", json!({ "message": "lowercase fallback" }));
    let err = client.search(json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "lowercase fallback");

    client.backend().fail_next("DOCUMENTSEARCH", json!({}));
    let err = client.search(json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "Unexpected API error");
}

#[tokio::test]
async fn test_operations_complete_within_latency_band() {
    // A small real band; the call must resolve, bounded by the band.
    let config = ClientConfig {
        latency: LatencyConfig { min_ms: 1, max_ms: 5 },
        seed_documents: true,
    };
    let client = ApiClient::new(&config);

    let start = std::time::Instant::now();
    let results = client.search(json!({})).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(start.elapsed() >= std::time::Duration::from_millis(1));
}
