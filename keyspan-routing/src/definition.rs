//! Partition key shape descriptors.

/// How a collection derives effective keys from its partition key paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartitionKind {
    /// A single hashed level.
    #[default]
    Hash,
    /// A hierarchical key: one hashed level per path.
    MultiHash,
}

/// The partition key paths of a collection and how they are hashed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionKeyDefinition {
    /// Ordered key paths, one per level (e.g. `/tenantId`, `/userId`).
    pub paths: Vec<String>,
    /// Hashing scheme.
    pub kind: PartitionKind,
}

impl PartitionKeyDefinition {
    /// Creates a single-level definition.
    #[must_use]
    pub fn hash(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            kind: PartitionKind::Hash,
        }
    }

    /// Creates a hierarchical definition with one level per path.
    #[must_use]
    pub fn multi_hash<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            kind: PartitionKind::MultiHash,
        }
    }

    /// Returns true for hierarchical partition keys.
    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        self.kind == PartitionKind::MultiHash
    }

    /// Returns the number of key levels.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.paths.len()
    }
}
