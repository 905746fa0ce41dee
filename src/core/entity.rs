use serde::{Deserialize, Serialize};
use std::fmt;

/// Counterparty identifier on a settlement instruction.
///
/// Rankings group instructions by this value, so two spellings of the
/// same counterparty ("foo" vs "FOO") are ranked separately.
///
/// # Examples
///
/// ```
/// use settlement_reports::core::entity::EntityId;
///
/// let foo = EntityId::new("foo");
/// let bar = EntityId::new("bar");
/// assert_ne!(foo, bar);
/// assert!(bar < foo);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create a new entity identifier. Empty names are accepted.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this entity ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward to str so width/alignment flags apply in report lines.
        f.pad(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
