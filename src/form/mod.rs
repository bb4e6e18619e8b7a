//! Form and entry data model.
//!
//! - [`types`]: normalized `Form`, `Entry`, `FieldKind`, `EntryStatus`
//! - [`ingest`]: parsing of loosely typed host documents
//! - eligibility: which submitted values are analyzed at all

pub mod ingest;
pub mod types;

pub use ingest::{IngestError, parse_entry, parse_form, parse_submission};
pub use types::{Entry, EntryId, EntryStatus, FieldDescriptor, FieldKind, Form};

use std::collections::HashSet;

/// A field value selected for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleField<'a> {
    pub id: &'a str,
    pub kind: &'a FieldKind,
    /// Submitted value in its original case.
    pub value: &'a str,
}

/// Collect the analyzable fields of a submission, in form definition order.
///
/// A field qualifies when its kind is not a layout/secret kind and the entry
/// holds a non-empty value for it. Only the first definition of a field id
/// is considered.
pub fn eligible_fields<'a>(form: &'a Form, entry: &'a Entry) -> Vec<EligibleField<'a>> {
    let mut seen = HashSet::new();
    form.fields
        .iter()
        .filter(|field| seen.insert(field.id.as_str()))
        .filter(|field| !field.kind.is_excluded())
        .filter_map(|field| {
            entry.value(&field.id).map(|value| EligibleField {
                id: &field.id,
                kind: &field.kind,
                value,
            })
        })
        .collect()
}
