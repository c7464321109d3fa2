use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a catalog entry.
///
/// Assigned when the catalog is authored and never recomputed; the viewer
/// only uses it for lookups, never for ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

/// Free-text grouping key for a document.
///
/// Two documents share a section iff their category strings are identical as
/// authored. Ordering is plain byte-wise string comparison, which is the
/// section order on the rendered page.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryName(pub String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
