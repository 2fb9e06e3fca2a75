//! Search and filter engine over the document store.
//!
//! A query is a bundle of optional criteria derived from a raw request
//! payload. Every present criterion must hold for a document to survive
//! (implicit AND); a criterion absent from the query imposes no
//! constraint. The engine holds no state of its own.

use crate::extract::{number_field, string_field};
use crate::store::Document;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;

// Accepted key spellings per logical search field. Extraction takes the
// first usable candidate; new aliases are additive.
const TEXT_KEYS: &[&str] = &["Text", "SearchText", "Term"];
const AMOUNT_KEYS: &[&str] = &["Amount", "Amt"];
const TYPE_NAME_KEYS: &[&str] = &["TypeName", "DocTypeName", "Type"];
const TYPE_ID_KEYS: &[&str] = &["DocTypeId", "DocTypeID", "TypeId"];

/// Fixed mapping from document type id to canonical type name, used when a
/// query carries an id but no name.
static TYPE_NAME_BY_ID: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([("1", "Invoice"), ("2", "Contract"), ("3", "Receipt")])
});

/// Filter criteria for a single search call. Transient: built per call,
/// discarded after producing a result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Case-insensitive substring over title or document id.
    pub text: Option<String>,
    /// Exact amount, no tolerance.
    pub amount: Option<f64>,
    /// Case-insensitive exact type name.
    pub type_name: Option<String>,
    /// Type id, consulted only when no type name is present.
    pub type_id: Option<String>,
}

impl SearchQuery {
    /// Derive filter criteria from a raw request payload.
    pub fn from_payload(payload: &Value) -> Self {
        SearchQuery {
            text: string_field(payload, TEXT_KEYS),
            amount: number_field(payload, AMOUNT_KEYS),
            type_name: string_field(payload, TYPE_NAME_KEYS),
            type_id: string_field(payload, TYPE_ID_KEYS),
        }
    }

    /// True when no criterion is present.
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.amount.is_none()
            && self.type_name.is_none()
            && self.type_id.is_none()
    }
}

/// Canonical type name for a type id, if the id is known.
pub fn type_name_for_id(type_id: &str) -> Option<&'static str> {
    TYPE_NAME_BY_ID.get(type_id).copied()
}

/// Return the subset of `documents` satisfying every present criterion,
/// preserving the store's newest-first order. Zero matches is a normal
/// empty result.
pub fn search(query: &SearchQuery, documents: &[Document]) -> Vec<Document> {
    let mut results: Vec<Document> = documents.to_vec();

    if let Some(text) = &query.text {
        let needle = text.to_lowercase();
        results.retain(|doc| {
            doc.title.to_lowercase().contains(&needle)
                || doc.document_id.to_lowercase().contains(&needle)
        });
    }

    if let Some(amount) = query.amount {
        results.retain(|doc| doc.amount == amount);
    }

    if let Some(type_name) = &query.type_name {
        results.retain(|doc| doc.type_name.eq_ignore_ascii_case(type_name));
    } else if let Some(type_id) = &query.type_id {
        // A supplied type name always wins over the id. An id with no
        // mapping filters nothing.
        if let Some(name) = type_name_for_id(type_id) {
            results.retain(|doc| doc.type_name.eq_ignore_ascii_case(name));
        }
    }

    results
}
