//! Simulated document-management backend.
//!
//! Stands in for the remote service behind the client: a named-operation
//! dispatch over loosely-shaped JSON payloads, backed by the in-memory
//! document store. Every call resolves exactly once after a bounded
//! simulated delay; there is no cancellation primitive. Tests can queue
//! one-shot canned responses or transport failures per endpoint.

use crate::config::LatencyConfig;
use crate::error::ClientError;
use crate::extract::{bool_field, number_field, string_field};
use crate::search::{self, SearchQuery};
use crate::store::{self, DocumentStore};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

// Accepted key spellings for ADDDOCUMENT payload fields. The add form
// submits (Field, Value, Required) tuples; richer callers send the
// canonical names directly.
const TITLE_KEYS: &[&str] = &["Title", "Value", "Field"];
const TYPE_NAME_KEYS: &[&str] = &["TypeName", "DocTypeName", "Type"];
const AMOUNT_KEYS: &[&str] = &["Amount"];
const DATE_KEYS: &[&str] = &["Date"];
const REQUIRED_KEYS: &[&str] = &["Required", "Mandatory"];

/// Placeholder title and fallback category for sparse ADDDOCUMENT payloads.
const DEFAULT_TITLE: &str = "Untitled Document";
const DEFAULT_TYPE_NAME: &str = "Invoice";

/// One-shot scripted outcome for an endpoint.
#[derive(Debug, Clone)]
enum Planned {
    /// Answer with this body instead of dispatching.
    Response(Value),
    /// Fail with this error payload (reduced to a message).
    Fault(Value),
}

/// In-process stand-in for the remote document-management service.
///
/// Owns the document store. Reads are safe concurrently; callers serialize
/// writes (one committing ADDDOCUMENT at a time) per the session contract.
pub struct MockBackend {
    store: RwLock<DocumentStore>,
    latency: LatencyConfig,
    planned: Mutex<HashMap<String, Planned>>,
}

impl MockBackend {
    /// Backend over a seeded store.
    pub fn new(latency: LatencyConfig) -> Self {
        Self::with_store(latency, DocumentStore::seeded())
    }

    pub fn with_store(latency: LatencyConfig, store: DocumentStore) -> Self {
        MockBackend {
            store: RwLock::new(store),
            latency,
            planned: Mutex::new(HashMap::new()),
        }
    }

    /// Queue a one-shot canned response for the next call to `endpoint`.
    pub fn respond_next(&self, endpoint: &str, body: Value) {
        self.planned
            .lock()
            .insert(endpoint.to_string(), Planned::Response(body));
    }

    /// Queue a one-shot transport failure for the next call to `endpoint`.
    ///
    /// The payload goes through the same message fallback chain a real
    /// server error would.
    pub fn fail_next(&self, endpoint: &str, payload: Value) {
        self.planned
            .lock()
            .insert(endpoint.to_string(), Planned::Fault(payload));
    }

    /// Number of documents currently held.
    pub fn document_count(&self) -> usize {
        self.store.read().len()
    }

    /// Issue a named operation against the backend.
    ///
    /// Resolves exactly once, after a delay drawn from the configured
    /// latency band. Unknown endpoints answer with an empty object.
    pub async fn post(&self, endpoint: &str, payload: Value) -> Result<Value, ClientError> {
        let delay = self.latency.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(planned) = self.planned.lock().remove(endpoint) {
            return match planned {
                Planned::Response(body) => {
                    debug!(endpoint, "answering with scripted response");
                    Ok(body)
                }
                Planned::Fault(fault) => {
                    debug!(endpoint, "simulating transport failure");
                    Err(ClientError::backend(&fault))
                }
            };
        }

        debug!(endpoint, "dispatching");
        match endpoint {
            "LOGIN" => self.login(&payload),
            "TEST" => Ok(json!({ "ok": true })),
            "LOGOUT" => Ok(json!({})),
            "GETREPOS" => Ok(json!(store::repositories())),
            "OPENREPO" => self.open_repo(&payload),
            "GETDOCUMENTTYPES" => Ok(json!(store::document_types())),
            "DOCUMENTSEARCH" => self.search(&payload),
            "ADDDOCUMENT" => self.add_document(&payload),
            other => {
                warn!(endpoint = other, "unknown endpoint, answering with empty object");
                Ok(json!({}))
            }
        }
    }

    fn login(&self, payload: &Value) -> Result<Value, ClientError> {
        let user = string_field(payload, &["UserName", "Username", "User"])
            .ok_or_else(|| ClientError::Validation("UserName is required".to_string()))?;
        debug!(user = %user, "issuing login token");
        Ok(json!({ "LoginId": generate_token() }))
    }

    fn open_repo(&self, payload: &Value) -> Result<Value, ClientError> {
        // Any repository id is accepted; only its presence is validated.
        string_field(payload, &["RepositoryId", "RepoId"])
            .ok_or_else(|| ClientError::Validation("RepositoryId is required".to_string()))?;
        Ok(json!({ "ok": true }))
    }

    fn search(&self, payload: &Value) -> Result<Value, ClientError> {
        let query = SearchQuery::from_payload(payload);
        let documents = self.store.read().list_all();
        let results = search::search(&query, &documents);
        debug!(total = documents.len(), matched = results.len(), "document search");
        Ok(json!(results))
    }

    fn add_document(&self, payload: &Value) -> Result<Value, ClientError> {
        let required = bool_field(payload, REQUIRED_KEYS);
        let title = string_field(payload, TITLE_KEYS);
        if required && title.is_none() {
            return Err(ClientError::Validation(
                "Field and Value are required".to_string(),
            ));
        }

        let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let type_name =
            string_field(payload, TYPE_NAME_KEYS).unwrap_or_else(|| DEFAULT_TYPE_NAME.to_string());
        let amount = number_field(payload, AMOUNT_KEYS).unwrap_or(0.0);
        let date = string_field(payload, DATE_KEYS).and_then(|s| s.parse::<NaiveDate>().ok());

        let created = self.store.write().insert(title, type_name, amount, date);
        debug!(document_id = %created.document_id, "document created");
        Ok(json!({ "ok": true, "created": created }))
    }
}

/// Generate a fresh login token.
fn generate_token() -> String {
    let token: u32 = rand::thread_rng().gen();
    format!("LOGIN-{token:08X}")
}
