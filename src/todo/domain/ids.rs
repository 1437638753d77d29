//! Identifier types for records held by the todo store.
//!
//! Identifiers are parameterized by the kind of record they address, so an
//! identifier minted for one collection cannot be passed where another
//! collection's identifier is expected.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use uuid::Uuid;

/// Marker trait for a kind of record stored in its own collection.
pub trait RecordKind: 'static {
    /// Collection name used in diagnostics.
    const COLLECTION: &'static str;
}

/// Record kind for to-do items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoRecord {}

impl RecordKind for TodoRecord {
    const COLLECTION: &'static str = "todos";
}

/// Opaque identifier for a record of kind `K`.
///
/// Identifiers are assigned once by the store when a record is created and
/// are never reused.
pub struct RecordId<K: RecordKind> {
    uuid: Uuid,
    kind: PhantomData<fn() -> K>,
}

/// Identifier of a todo record.
pub type TodoId = RecordId<TodoRecord>;

impl<K: RecordKind> RecordId<K> {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            kind: PhantomData,
        }
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.uuid
    }

    /// Returns the collection this identifier belongs to.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        K::COLLECTION
    }
}

impl<K: RecordKind> Default for RecordId<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RecordKind> Clone for RecordId<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: RecordKind> Copy for RecordId<K> {}

impl<K: RecordKind> PartialEq for RecordId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<K: RecordKind> Eq for RecordId<K> {}

impl<K: RecordKind> Hash for RecordId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<K: RecordKind> AsRef<Uuid> for RecordId<K> {
    fn as_ref(&self) -> &Uuid {
        &self.uuid
    }
}

impl<K: RecordKind> fmt::Debug for RecordId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({}:{})", K::COLLECTION, self.uuid)
    }
}

impl<K: RecordKind> fmt::Display for RecordId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<K: RecordKind> Serialize for RecordId<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, K: RecordKind> Deserialize<'de> for RecordId<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}
