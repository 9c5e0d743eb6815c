//! Resolved graph tensor spec.
//!
//! What downstream tensor code needs to build parsers and generators: per
//! set, every feature (declared and implicit) with its full tensor shape.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::schema::serde_ext::WireEnum;
use crate::schema::{DataType, GraphType, SetType};

/// Number of items in a node or edge set, one value per graph.
pub const SIZE_NAME: &str = "#size";
/// Index of each edge's source node within the source node set.
pub const SOURCE_NAME: &str = "#source";
/// Index of each edge's target node within the target node set.
pub const TARGET_NAME: &str = "#target";

fn serialize_name<E: WireEnum, S: Serializer>(value: &E, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.name())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSpec {
    #[serde(serialize_with = "serialize_name")]
    pub dtype: DataType,
    /// Full tensor shape per graph; `None` marks a dimension whose size
    /// varies between graphs (item counts and ragged dimensions).
    pub shape: Vec<Option<u64>>,
    /// True if a dimension inside a single item is ragged.
    pub ragged: bool,
    /// Implicit features (`#size`, `#source`, `#target`) are not declared in
    /// the schema.
    pub implicit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetSpec {
    #[serde(serialize_with = "serialize_name")]
    pub set_type: SetType,
    pub features: BTreeMap<String, FeatureSpec>,
    /// Context features broadcast onto this set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjacency: Option<Adjacency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSpec {
    #[serde(serialize_with = "serialize_name")]
    pub graph_type: GraphType,
    pub root_set: Vec<String>,
    pub context: SetSpec,
    pub node_sets: BTreeMap<String, SetSpec>,
    pub edge_sets: BTreeMap<String, SetSpec>,
}

impl GraphSpec {
    pub fn set(&self, set_type: SetType, name: &str) -> Option<&SetSpec> {
        match set_type {
            SetType::Context => Some(&self.context),
            SetType::Nodes => self.node_sets.get(name),
            SetType::Edges => self.edge_sets.get(name),
            SetType::Unspecified => None,
        }
    }

    pub fn feature(&self, set_type: SetType, set: &str, feature: &str) -> Option<&FeatureSpec> {
        self.set(set_type, set)?.features.get(feature)
    }

    /// Flat record keys a parser reads, sorted.
    ///
    /// `context/<f>`, `nodes/<set>.<f>` and `edges/<set>.<f>`, including the
    /// implicit `#size`, `#source` and `#target` entries.
    pub fn example_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .context
            .features
            .keys()
            .map(|f| format!("context/{}", f))
            .collect();
        for (set, spec) in &self.node_sets {
            keys.extend(spec.features.keys().map(|f| format!("nodes/{}.{}", set, f)));
        }
        for (set, spec) in &self.edge_sets {
            keys.extend(spec.features.keys().map(|f| format!("edges/{}.{}", set, f)));
        }
        keys.sort();
        keys
    }
}
