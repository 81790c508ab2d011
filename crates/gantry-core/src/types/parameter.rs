//! Parameter-store records and name normalization.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Parameter name normalized to always begin with `/`.
///
/// Normalization is idempotent: a name that already starts with `/` is kept
/// as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterName(String);

impl ParameterName {
    /// Normalizes a caller-supplied name into a lookup key.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        if raw.starts_with('/') {
            Self(raw.to_owned())
        } else {
            Self(format!("/{raw}"))
        }
    }

    /// Returns the normalized name.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the name and returns the inner string.
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ParameterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing entry for a parameter. Never carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSummary {
    /// Full parameter name.
    pub name: String,
    /// Parameter type (`String`, `StringList`, `SecureString`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Last modification time, serialized as ISO-8601.
    pub last_modified: Option<Timestamp>,
}

/// Response body of the parameter listing endpoint.
///
/// Built only from a summary sequence so `count` always equals `parameters.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterList {
    /// Number of parameters.
    pub count: usize,
    /// Every parameter across all pages, in page order.
    pub parameters: Vec<ParameterSummary>,
}

impl From<Vec<ParameterSummary>> for ParameterList {
    fn from(parameters: Vec<ParameterSummary>) -> Self {
        Self {
            count: parameters.len(),
            parameters,
        }
    }
}

/// Response body of the single-parameter fetch endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValue {
    /// Normalized parameter name.
    pub name: String,
    /// Plaintext value, `null` when the parameter does not exist.
    pub value: Option<String>,
}

impl ParameterValue {
    /// Creates a new parameter value.
    pub fn new(name: &ParameterName, value: Option<String>) -> Self {
        Self {
            name: name.as_str().to_owned(),
            value,
        }
    }
}
