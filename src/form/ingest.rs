//! Ingestion of loosely typed host documents.
//!
//! Host platforms hand over forms and entries as JSON-ish objects where ids
//! may be numbers or strings and field definitions may lack a type. This is
//! the single place where that is normalized; fields without a type are
//! dropped here instead of being re-checked downstream.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

use super::types::{Entry, EntryId, EntryStatus, FieldDescriptor, FieldKind, Form};

/// Errors for submission documents that cannot be read at all.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to parse submission document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("entry id is missing or not a string/number")]
    MissingEntryId,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(default)]
    id: Value,
    #[serde(rename = "type")]
    kind: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawForm {
    #[serde(default)]
    fields: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    status: Value,
    #[serde(default)]
    values: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawSubmission {
    form: RawForm,
    entry: RawEntry,
}

/// Scalar JSON values rendered as text; anything else is treated as missing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_from_value(value: Value) -> Option<FieldDescriptor> {
    let raw: RawField = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "Skipping malformed field definition");
            return None;
        }
    };

    let id = scalar_text(&raw.id).filter(|id| !id.is_empty())?;
    let Some(kind) = raw.kind.as_ref().and_then(scalar_text) else {
        debug!(field = %id, "Skipping field without a type");
        return None;
    };

    Some(FieldDescriptor::new(id, FieldKind::from_type(&kind)))
}

/// Keeps the first definition of each field id.
fn form_from_raw(raw: RawForm) -> Form {
    let mut seen = HashSet::new();
    let fields = raw
        .fields
        .into_iter()
        .filter_map(field_from_value)
        .filter(|field| {
            let first = seen.insert(field.id.clone());
            if !first {
                debug!(field = %field.id, "Skipping duplicate field definition");
            }
            first
        })
        .collect();

    Form::new(fields)
}

fn entry_from_raw(raw: RawEntry) -> Result<Entry, IngestError> {
    let id = scalar_text(&raw.id)
        .filter(|id| !id.is_empty())
        .ok_or(IngestError::MissingEntryId)?;

    let status = scalar_text(&raw.status)
        .map(|s| EntryStatus::parse(&s))
        .unwrap_or_default();

    let values = raw
        .values
        .into_iter()
        .filter_map(|(field_id, value)| scalar_text(&value).map(|text| (field_id, text)))
        .collect();

    Ok(Entry {
        id: EntryId::new(id),
        status,
        values,
    })
}

/// Parse a form definition document (`{"fields": [...]}`).
pub fn parse_form(json: &str) -> Result<Form, IngestError> {
    let raw: RawForm = serde_json::from_str(json)?;
    Ok(form_from_raw(raw))
}

/// Parse an entry document (`{"id": .., "status": .., "values": {..}}`).
pub fn parse_entry(json: &str) -> Result<Entry, IngestError> {
    let raw: RawEntry = serde_json::from_str(json)?;
    entry_from_raw(raw)
}

/// Parse a combined `{"form": .., "entry": ..}` document.
pub fn parse_submission(json: &str) -> Result<(Form, Entry), IngestError> {
    let raw: RawSubmission = serde_json::from_str(json)?;
    Ok((form_from_raw(raw.form), entry_from_raw(raw.entry)?))
}
