//! Hard failures, as opposed to validation findings.
//!
//! A `Violation` describes something wrong *inside* a well-formed schema or
//! record. A `SchemaError` means the operation could not proceed at all:
//! the input did not decode, a builder was asked to insert a duplicate, or a
//! schema with ERROR-level violations was handed to the resolver.

use crate::validate::Violation;

/// Which kind of named entity a builder refused to insert twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    NodeSet,
    EdgeSet,
    Feature,
    NodeId,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::NodeSet => write!(f, "node set"),
            EntityKind::EdgeSet => write!(f, "edge set"),
            EntityKind::Feature => write!(f, "feature"),
            EntityKind::NodeId => write!(f, "node id"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to decode wire message: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: EntityKind, name: String },

    #[error("edge source node '{0}' has not been added to the subgraph")]
    UnknownNode(String),

    #[error("schema has {} error(s); first: {}", .0.len(), first_message(.0))]
    Invalid(Vec<Violation>),
}

fn first_message(violations: &[Violation]) -> String {
    violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_default()
}

impl SchemaError {
    pub fn duplicate(kind: EntityKind, name: impl Into<String>) -> Self {
        SchemaError::Duplicate {
            kind,
            name: name.into(),
        }
    }

    /// The violations behind an `Invalid` error, empty for other variants.
    pub fn violations(&self) -> &[Violation] {
        match self {
            SchemaError::Invalid(v) => v,
            _ => &[],
        }
    }
}
