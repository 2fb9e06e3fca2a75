//! In-memory document store standing in for the remote repository.
//!
//! The store owns the authoritative, mutable sequence of document records.
//! Inserts prepend, so a plain listing is always newest-first. The
//! read-only reference sets (document types, repositories) live here as
//! well.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A stored document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    pub document_id: String,
    pub title: String,
    pub type_name: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A document type from the read-only reference set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentType {
    pub id: String,
    pub name: String,
}

/// A repository the user can open after logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Repository {
    pub repository_id: String,
    pub name: String,
}

static DOCUMENT_TYPES: Lazy<Vec<DocumentType>> = Lazy::new(|| {
    [("1", "Invoice"), ("2", "Contract"), ("3", "Receipt")]
        .into_iter()
        .map(|(id, name)| DocumentType {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
});

static REPOSITORIES: Lazy<Vec<Repository>> = Lazy::new(|| {
    [("1", "Repo A"), ("2", "Repo B")]
        .into_iter()
        .map(|(id, name)| Repository {
            repository_id: id.to_string(),
            name: name.to_string(),
        })
        .collect()
});

/// The static document type reference set. Never mutated.
pub fn document_types() -> &'static [DocumentType] {
    &DOCUMENT_TYPES
}

/// Repositories visible to every login. Never mutated.
pub fn repositories() -> &'static [Repository] {
    &REPOSITORIES
}

// Generated ids are drawn from 1000..=999999; with stores of at most a few
// thousand documents the retry loop is bounded in practice, and the attempt
// cap turns a broken generator into a panic instead of a hang.
const ID_MIN: u32 = 1000;
const ID_MAX: u32 = 999_999;
const MAX_ID_ATTEMPTS: usize = 1024;

/// Mutable, newest-first document collection.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the stock fixtures the mock backend serves.
    pub fn seeded() -> Self {
        let fixture = |id: &str, title: &str, type_name: &str, amount: f64, date: (i32, u32, u32)| {
            Document {
                document_id: id.to_string(),
                title: title.to_string(),
                type_name: type_name.to_string(),
                amount,
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                    .expect("valid fixture date"),
            }
        };
        DocumentStore {
            documents: vec![
                fixture("1001", "Invoice A", "Invoice", 500.0, (2026, 2, 11)),
                fixture("1002", "Contract B", "Contract", 1200.0, (2026, 2, 10)),
            ],
        }
    }

    /// Full current collection, newest-first. Always succeeds.
    pub fn list_all(&self) -> Vec<Document> {
        self.documents.clone()
    }

    /// Borrowed view of the collection, newest-first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether an id is currently in use.
    pub fn contains_id(&self, id: &str) -> bool {
        self.documents.iter().any(|doc| doc.document_id == id)
    }

    /// Insert a new document with a generated id, prepending it to the
    /// collection. `date` defaults to the current calendar date.
    pub fn insert(
        &mut self,
        title: String,
        type_name: String,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Document {
        let document = Document {
            document_id: self.generate_id(),
            title,
            type_name,
            amount,
            date: date.unwrap_or_else(|| Local::now().date_naive()),
        };
        self.documents.insert(0, document.clone());
        document
    }

    fn generate_id(&self) -> String {
        let mut rng = rand::thread_rng();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = rng.gen_range(ID_MIN..=ID_MAX).to_string();
            if !self.contains_id(&candidate) {
                return candidate;
            }
        }
        panic!("document id space exhausted after {MAX_ID_ATTEMPTS} attempts");
    }
}
