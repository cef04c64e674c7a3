use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque team identifier as issued by the regatta backend.
///
/// The backend hands out UUID strings, but nothing here relies on that
/// format; identifiers are only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for TeamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regatta_id: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            regatta_id: None,
        }
    }
}
