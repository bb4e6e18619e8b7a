//! Normalized form and entry types.
//!
//! Forms and entries arrive from the host platform in loosely typed shapes.
//! They are validated once during ingestion (see [`super::ingest`]) and from
//! then on every field carries a required [`FieldKind`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque, stable identifier of a submitted entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Moderation status of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryStatus {
    /// Regular, active entry.
    #[default]
    Normal,
    /// Entry flagged as spam.
    Spam,
    /// Any status the host platform uses that we do not interpret (trash, ...).
    Other(String),
}

impl EntryStatus {
    /// Parse a host status string. Empty and `active` map to [`EntryStatus::Normal`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "active" | "normal" => Self::Normal,
            "spam" => Self::Spam,
            other => Self::Other(other.to_string()),
        }
    }

    #[inline]
    pub fn is_spam(&self) -> bool {
        matches!(self, Self::Spam)
    }

    /// Status string written to the entry store.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "active",
            Self::Spam => "spam",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for EntryStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<EntryStatus> for String {
    fn from(status: EntryStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Classification of a form field, controlling which analyzers apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Textarea,
    Name,
    Hidden,
    Email,
    Phone,
    Html,
    Section,
    Page,
    Captcha,
    Password,
    /// The field declares a kind, but it is empty.
    Unspecified,
    /// A kind we do not know about (select, checkbox, ...).
    Other(String),
}

impl FieldKind {
    /// Normalize a host field type string.
    pub fn from_type(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Self::Unspecified,
            "text" => Self::Text,
            "textarea" => Self::Textarea,
            "name" => Self::Name,
            "hidden" => Self::Hidden,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "html" => Self::Html,
            "section" => Self::Section,
            "page" => Self::Page,
            "captcha" => Self::Captcha,
            "password" => Self::Password,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Name => "name",
            Self::Hidden => "hidden",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Html => "html",
            Self::Section => "section",
            Self::Page => "page",
            Self::Captcha => "captcha",
            Self::Password => "password",
            Self::Unspecified => "",
            Self::Other(s) => s,
        }
    }

    /// Layout and secret fields never carry analyzable user input.
    #[inline]
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            Self::Html | Self::Section | Self::Page | Self::Captcha | Self::Password
        )
    }

    /// Free-text-like kinds that the gibberish detector applies to.
    #[inline]
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::Textarea | Self::Name | Self::Hidden | Self::Unspecified
        )
    }
}

impl From<String> for FieldKind {
    fn from(raw: String) -> Self {
        Self::from_type(&raw)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A single field definition of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Form definition: the ordered list of its fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub fields: Vec<FieldDescriptor>,
}

impl Form {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }
}

/// One submitted form instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(default)]
    pub status: EntryStatus,
    /// Field id -> submitted raw text.
    #[serde(default)]
    pub values: HashMap<String, String>,
}

impl Entry {
    pub fn new(id: impl Into<EntryId>) -> Self {
        Self {
            id: id.into(),
            status: EntryStatus::Normal,
            values: HashMap::new(),
        }
    }

    /// Builder-style helper for setting a field value.
    pub fn with_value(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field_id.into(), value.into());
        self
    }

    /// Submitted value for a field, if present and non-empty.
    pub fn value(&self, field_id: &str) -> Option<&str> {
        self.values
            .get(field_id)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
