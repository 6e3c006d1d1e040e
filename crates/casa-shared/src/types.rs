use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::constants::{SELF_SENDER, SYSTEM_SENDER};
use crate::error::SharedError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message. Two ids are reserved sentinels; anything else is an
/// opaque counter-party id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sender {
    System,
    Me,
    Party(String),
}

impl Sender {
    /// Build a counter-party sender, refusing the reserved sentinels.
    pub fn party(id: impl Into<String>) -> Result<Self, SharedError> {
        let id = id.into();
        if id.is_empty() || id == SYSTEM_SENDER || id == SELF_SENDER {
            return Err(SharedError::ReservedSender(id));
        }
        Ok(Self::Party(id))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::System => SYSTEM_SENDER,
            Self::Me => SELF_SENDER,
            Self::Party(id) => id,
        }
    }

    pub fn is_me(&self) -> bool {
        matches!(self, Self::Me)
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SYSTEM_SENDER => Ok(Self::System),
            SELF_SENDER => Ok(Self::Me),
            other => Self::party(other),
        }
    }
}

// Stored and exported as the raw id string.
impl Serialize for Sender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Sender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
