//! Opaque element-type descriptors.
//!
//! The engine copies tags forward from stage to stage and never looks inside
//! them. Collaborators that build pipelines are responsible for tags making
//! sense together.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementTag(String);

impl ElementTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementTag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ElementTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}
