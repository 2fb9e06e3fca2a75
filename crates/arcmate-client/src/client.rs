//! Client facade over the simulated backend.
//!
//! [`ApiClient`] is the call surface the UI layer drives: login, logout,
//! repository listing and selection, document type listing, search, and
//! document creation. It owns the session; all traffic routes through the
//! mock backend as named operations.

use crate::backend::MockBackend;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;
use crate::store::{Document, DocumentStore, DocumentType, Repository};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    #[serde(rename = "IPAddress")]
    pub ip_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LoginResponse {
    #[serde(default)]
    login_id: Option<String>,
}

/// Outcome of an ADDDOCUMENT call.
#[derive(Debug, Clone, Deserialize)]
pub struct AddDocumentOutcome {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub created: Option<Document>,
}

/// Asynchronous call surface for the document repository.
///
/// Each operation resolves exactly once; failures are reported per
/// operation and never tear the client down. Concurrent reads are safe;
/// callers serialize committing writes (login/logout/add) per the session
/// contract.
pub struct ApiClient {
    backend: Arc<MockBackend>,
    session: RwLock<Session>,
}

impl ApiClient {
    /// Client over a fresh backend built from `config`.
    pub fn new(config: &ClientConfig) -> Self {
        let store = if config.seed_documents {
            DocumentStore::seeded()
        } else {
            DocumentStore::new()
        };
        Self::with_backend(Arc::new(MockBackend::with_store(config.latency, store)))
    }

    /// Client over an existing backend. Lets tests share the backend to
    /// script responses and inspect the store.
    pub fn with_backend(backend: Arc<MockBackend>) -> Self {
        ApiClient {
            backend,
            session: RwLock::new(Session::new()),
        }
    }

    /// The backend this client talks to.
    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }

    /// The active login token, if any.
    pub fn login_id(&self) -> Option<String> {
        self.session.read().login_id().map(str::to_string)
    }

    /// The selected repository, if one was opened this session.
    pub fn repository_id(&self) -> Option<String> {
        self.session.read().repository_id().map(str::to_string)
    }

    /// Authenticate and establish a session.
    ///
    /// A response without a usable `LoginId` is a failure, not a success
    /// with a null token, and leaves any prior session untouched. After the
    /// token is stored a silent TEST call verifies the connection; if that
    /// follow-up fails the half-built session is rolled back to logged-out
    /// and the error surfaces.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ClientError> {
        let response = self.backend.post("LOGIN", json!(request)).await?;
        let parsed: LoginResponse = serde_json::from_value(response)
            .map_err(|_| ClientError::UnexpectedResponse("LOGIN"))?;

        let login_id = match parsed.login_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(ClientError::TokenMissing),
        };

        self.session.write().set_token(login_id.clone());
        info!("session established");

        if let Err(err) = self.backend.post("TEST", json!({})).await {
            self.session.write().clear();
            info!("session rolled back after failed connectivity check");
            return Err(err);
        }

        Ok(login_id)
    }

    /// End the session.
    ///
    /// With no active session this is a no-op success. Otherwise the LOGOUT
    /// call is best-effort: local state ends logged-out whether or not the
    /// backend call succeeds, and a failure is swallowed.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let Some(login_id) = self.login_id() else {
            return Ok(());
        };

        let result = self.backend.post("LOGOUT", json!({ "LoginId": login_id })).await;
        self.session.write().clear();
        match result {
            Ok(_) => info!("session cleared"),
            Err(err) => warn!(error = %err, "logout call failed, session cleared anyway"),
        }
        Ok(())
    }

    /// List the repositories available to the active session.
    pub async fn get_repos(&self) -> Result<Vec<Repository>, ClientError> {
        let login_id = self.require_login()?;
        let response = self.backend.post("GETREPOS", json!({ "LoginId": login_id })).await?;
        serde_json::from_value(response).map_err(|_| ClientError::UnexpectedResponse("GETREPOS"))
    }

    /// Open a repository and remember the selection for this session.
    pub async fn open_repo(&self, repository_id: &str) -> Result<(), ClientError> {
        let login_id = self.require_login()?;
        self.backend
            .post(
                "OPENREPO",
                json!({ "LoginId": login_id, "RepositoryId": repository_id }),
            )
            .await?;
        self.session.write().select_repository(repository_id.to_string());
        info!(repository_id, "repository opened");
        Ok(())
    }

    /// The static document type reference set.
    pub async fn document_types(&self) -> Result<Vec<DocumentType>, ClientError> {
        let response = self.backend.post("GETDOCUMENTTYPES", json!({})).await?;
        serde_json::from_value(response)
            .map_err(|_| ClientError::UnexpectedResponse("GETDOCUMENTTYPES"))
    }

    /// Run a document search. Zero matches is a normal empty result.
    ///
    /// The payload is loosely shaped; see the search engine for the
    /// accepted key spellings.
    pub async fn search(&self, payload: Value) -> Result<Vec<Document>, ClientError> {
        let response = self.backend.post("DOCUMENTSEARCH", payload).await?;
        serde_json::from_value(response)
            .map_err(|_| ClientError::UnexpectedResponse("DOCUMENTSEARCH"))
    }

    /// Create a document from a loosely-shaped payload.
    pub async fn add_document(&self, payload: Value) -> Result<AddDocumentOutcome, ClientError> {
        let response = self.backend.post("ADDDOCUMENT", payload).await?;
        serde_json::from_value(response)
            .map_err(|_| ClientError::UnexpectedResponse("ADDDOCUMENT"))
    }

    fn require_login(&self) -> Result<String, ClientError> {
        self.login_id().ok_or(ClientError::NotLoggedIn)
    }
}
