//! Associate records served by the collection endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(Number),
    Text(String),
    Other(Value),
}

/// Opaque associate identifier.
///
/// The backend usually sends identifiers as JSON numbers or strings, but any
/// JSON value is accepted. The original representation is kept so it
/// round-trips unchanged into navigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssociateId(IdRepr);

impl AssociateId {
    /// Numeric identifier.
    pub fn number(id: i64) -> Self {
        Self(IdRepr::Number(Number::from(id)))
    }

    /// Textual identifier.
    pub fn text(id: impl Into<String>) -> Self {
        Self(IdRepr::Text(id.into()))
    }

    /// Whether this identifier renders as `raw`.
    ///
    /// Used to match identifiers typed by an operator, where `42` and `"42"`
    /// refer to the same record.
    pub fn matches(&self, raw: &str) -> bool {
        self.to_string() == raw.trim()
    }
}

impl fmt::Display for AssociateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            IdRepr::Number(id) => write!(f, "{id}"),
            IdRepr::Text(id) => f.write_str(id),
            IdRepr::Other(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for AssociateId {
    fn from(value: i64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for AssociateId {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

/// A person that can be looked up and selected in the picker.
///
/// ## Invariants
/// - `id` and `name` are required; any other field is kept verbatim in
///   `extra` and never interpreted.
/// - Records are immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Associate {
    id: AssociateId,
    name: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Associate {
    /// Build an associate without extra fields.
    pub fn new(id: impl Into<AssociateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &AssociateId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields the backend sent beyond `id` and `name`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Records whose name contains `search`, ignoring case, in their original
/// order.
///
/// An empty search returns every record.
///
/// # Examples
/// ```
/// use console::domain::{Associate, filter_associates};
///
/// let all = vec![Associate::new(1, "Ada Lovelace"), Associate::new(2, "Alan Turing")];
/// let hits = filter_associates(&all, "LOVE");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name(), "Ada Lovelace");
/// ```
pub fn filter_associates<'a>(associates: &'a [Associate], search: &str) -> Vec<&'a Associate> {
    let needle = search.to_lowercase();
    associates
        .iter()
        .filter(|associate| associate.name.to_lowercase().contains(&needle))
        .collect()
}
