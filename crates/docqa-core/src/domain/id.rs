use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a chunk, derived from its source and position so that
/// re-processing the same document yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkId(String);

impl ChunkId {
    pub fn derive(source: &str, index: usize) -> Self {
        let hash = blake3::hash(source.as_bytes());
        let hex = hex::encode(&hash.as_bytes()[..3]);
        Self(format!("chk-{hex}-{index}"))
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ChunkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a request session, fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let hash = blake3::hash(uuid.as_bytes());
        let hex = hex::encode(&hash.as_bytes()[..3]);
        Self(format!("ses-{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
