//! Client library for the Arcmate document repository.
//!
//! The remote document-management service is simulated by an in-memory
//! [`MockBackend`] that owns the document store and answers named
//! operations over loosely-shaped JSON payloads. [`ApiClient`] is the
//! asynchronous call surface a UI layer drives: login, repository
//! selection, document search, and document creation.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod search;
pub mod session;
pub mod store;

pub use backend::MockBackend;
pub use client::{AddDocumentOutcome, ApiClient, LoginRequest};
pub use config::{ClientConfig, LatencyConfig};
pub use error::ClientError;
pub use search::SearchQuery;
pub use store::{Document, DocumentStore, DocumentType, Repository};
