//! Schema messages.
//!
//! Every type here is both a `prost` message (the binary wire form consumed by
//! external tooling, tags are fixed) and a serde type (the human-authored JSON
//! form). Collections are name-keyed ordered maps; cross references between
//! sets are by name only.
//!
//! The two decoders differ on repeated map keys: JSON rejects them, binary
//! decoding follows the protobuf rule and keeps the last value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::serde_ext::{WireEnum, deserialize_enum, serialize_enum, unique_keys};
use crate::values::{FeatureValues, ValueKind};

/// Prefix reserved for implicit features such as `#size` and `#source`.
pub const RESERVED_PREFIX: char = '#';

/// Dimension size marking a ragged (or otherwise unknown-length) dimension.
pub const RAGGED_DIM: i64 = -1;

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SetType {
    Unspecified = 0,
    Context = 1,
    Nodes = 2,
    Edges = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum GraphType {
    Undefined = 0,
    Full = 1,
    Subgraph = 2,
    RandomWalks = 3,
}

/// Element types, numbered as in the tensor framework's `DataType` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum DataType {
    Invalid = 0,
    Float = 1,
    Double = 2,
    Int32 = 3,
    Uint8 = 4,
    Int16 = 5,
    Int8 = 6,
    String = 7,
    Complex64 = 8,
    Int64 = 9,
    Bool = 10,
    Bfloat16 = 14,
    Uint16 = 17,
    Half = 19,
    Uint32 = 22,
    Uint64 = 23,
}

impl DataType {
    /// Whether features of this type can be declared in a schema.
    pub fn is_supported(self) -> bool {
        self.value_kind().is_some()
    }

    /// The record encoding used for values of this type.
    pub fn value_kind(self) -> Option<ValueKind> {
        match self {
            DataType::String => Some(ValueKind::Bytes),
            DataType::Float | DataType::Double | DataType::Half | DataType::Bfloat16 => {
                Some(ValueKind::Float)
            }
            DataType::Bool
            | DataType::Int32
            | DataType::Int64
            | DataType::Uint32
            | DataType::Uint64 => Some(ValueKind::Int64),
            DataType::Invalid
            | DataType::Uint8
            | DataType::Int16
            | DataType::Int8
            | DataType::Uint16
            | DataType::Complex64 => None,
        }
    }
}

impl WireEnum for SetType {
    fn name(self) -> &'static str {
        match self {
            SetType::Unspecified => "UNSPECIFIED",
            SetType::Context => "CONTEXT",
            SetType::Nodes => "NODES",
            SetType::Edges => "EDGES",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNSPECIFIED" => Some(SetType::Unspecified),
            "CONTEXT" => Some(SetType::Context),
            "NODES" => Some(SetType::Nodes),
            "EDGES" => Some(SetType::Edges),
            _ => None,
        }
    }
}

impl WireEnum for GraphType {
    fn name(self) -> &'static str {
        match self {
            GraphType::Undefined => "UNDEFINED",
            GraphType::Full => "FULL",
            GraphType::Subgraph => "SUBGRAPH",
            GraphType::RandomWalks => "RANDOM_WALKS",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "UNDEFINED" => Some(GraphType::Undefined),
            "FULL" => Some(GraphType::Full),
            "SUBGRAPH" => Some(GraphType::Subgraph),
            "RANDOM_WALKS" => Some(GraphType::RandomWalks),
            _ => None,
        }
    }
}

const DATA_TYPE_NAMES: &[(DataType, &str)] = &[
    (DataType::Invalid, "DT_INVALID"),
    (DataType::Float, "DT_FLOAT"),
    (DataType::Double, "DT_DOUBLE"),
    (DataType::Int32, "DT_INT32"),
    (DataType::Uint8, "DT_UINT8"),
    (DataType::Int16, "DT_INT16"),
    (DataType::Int8, "DT_INT8"),
    (DataType::String, "DT_STRING"),
    (DataType::Complex64, "DT_COMPLEX64"),
    (DataType::Int64, "DT_INT64"),
    (DataType::Bool, "DT_BOOL"),
    (DataType::Bfloat16, "DT_BFLOAT16"),
    (DataType::Uint16, "DT_UINT16"),
    (DataType::Half, "DT_HALF"),
    (DataType::Uint32, "DT_UINT32"),
    (DataType::Uint64, "DT_UINT64"),
];

impl WireEnum for DataType {
    fn name(self) -> &'static str {
        DATA_TYPE_NAMES
            .iter()
            .find(|(dt, _)| *dt == self)
            .map(|(_, name)| *name)
            .unwrap_or("DT_INVALID")
    }

    fn from_name(name: &str) -> Option<Self> {
        DATA_TYPE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(dt, _)| *dt)
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::fmt::Display for SetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// SHAPES
// =============================================================================

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Dim {
    /// Positive size, or `RAGGED_DIM`.
    #[prost(int64, tag = "1")]
    pub size: i64,
    #[prost(string, tag = "2")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Shape of a single item's feature value (no leading item dimension).
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorShape {
    #[prost(message, repeated, tag = "2")]
    pub dim: Vec<Dim>,
    #[prost(bool, tag = "3")]
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unknown_rank: bool,
}

impl TensorShape {
    pub fn from_dims(dims: &[i64]) -> Self {
        TensorShape {
            dim: dims
                .iter()
                .map(|&size| Dim {
                    size,
                    name: String::new(),
                })
                .collect(),
            unknown_rank: false,
        }
    }

    /// Number of dimensions, `None` when the rank itself is unknown.
    pub fn rank(&self) -> Option<usize> {
        (!self.unknown_rank).then_some(self.dim.len())
    }

    pub fn is_ragged(&self) -> bool {
        self.dim.iter().any(|d| d.size == RAGGED_DIM)
    }

    /// Static sizes, `None` for ragged dimensions.
    pub fn sizes(&self) -> Vec<Option<u64>> {
        self.dim
            .iter()
            .map(|d| u64::try_from(d.size).ok().filter(|&s| s > 0))
            .collect()
    }
}

// =============================================================================
// FEATURES AND COLLECTIONS
// =============================================================================

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(enumeration = "DataType", tag = "2")]
    #[serde(
        serialize_with = "serialize_enum::<DataType, _>",
        deserialize_with = "deserialize_enum::<DataType, _>"
    )]
    pub dtype: i32,
    /// Absent shape means a scalar per item.
    #[prost(message, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<TensorShape>,
    #[prost(string, tag = "4")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[prost(message, optional, tag = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_values: Option<FeatureValues>,
    /// Open attribute bag for forward-compatible extensions.
    #[prost(btree_map = "string, bytes", tag = "1000")]
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "unique_keys"
    )]
    pub attributes: BTreeMap<String, Vec<u8>>,
}

impl Feature {
    /// A scalar-per-item feature.
    pub fn scalar(dtype: DataType) -> Self {
        Feature {
            dtype: dtype.into(),
            ..Default::default()
        }
    }

    pub fn with_shape(dtype: DataType, dims: &[i64]) -> Self {
        Feature {
            dtype: dtype.into(),
            shape: Some(TensorShape::from_dims(dims)),
            ..Default::default()
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The declared element type, `None` if the tag is not a known `DataType`.
    pub fn data_type(&self) -> Option<DataType> {
        DataType::try_from(self.dtype).ok()
    }

    /// The declared shape; a missing shape is rank 0.
    pub fn item_shape(&self) -> TensorShape {
        self.shape.clone().unwrap_or_default()
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Free-form key/value pairs. Encodes identically to a repeated
    /// `{key = 1, value = 2}` message.
    #[prost(btree_map = "string, string", tag = "1")]
    #[serde(
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "unique_keys"
    )]
    pub extra: BTreeMap<String, String>,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Total population of the set in the full graph.
    #[prost(int64, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<i64>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    #[prost(btree_map = "string, message", tag = "1")]
    #[serde(deserialize_with = "unique_keys")]
    pub features: BTreeMap<String, Feature>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSet {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(btree_map = "string, message", tag = "2")]
    #[serde(deserialize_with = "unique_keys")]
    pub features: BTreeMap<String, Feature>,
    /// Names of context features broadcast onto this set.
    #[prost(string, repeated, tag = "3")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSet {
    #[prost(string, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[prost(btree_map = "string, message", tag = "2")]
    #[serde(deserialize_with = "unique_keys")]
    pub features: BTreeMap<String, Feature>,
    /// Name of the node set edges start at.
    #[prost(string, tag = "3")]
    pub source: String,
    /// Name of the node set edges point to.
    #[prost(string, tag = "4")]
    pub target: String,
    #[prost(string, repeated, tag = "5")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
    #[prost(message, optional, tag = "6")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl EdgeSet {
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        EdgeSet {
            source: source.into(),
            target: target.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct OriginInfo {
    #[prost(enumeration = "GraphType", tag = "1")]
    #[serde(
        serialize_with = "serialize_enum::<GraphType, _>",
        deserialize_with = "deserialize_enum::<GraphType, _>"
    )]
    pub graph_type: i32,
    #[prost(string, repeated, tag = "2")]
    pub root_set: Vec<String>,
}

// =============================================================================
// TOP-LEVEL SCHEMA
// =============================================================================

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[prost(message, optional, tag = "1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    #[prost(btree_map = "string, message", tag = "2")]
    #[serde(deserialize_with = "unique_keys")]
    pub node_sets: BTreeMap<String, NodeSet>,
    #[prost(btree_map = "string, message", tag = "3")]
    #[serde(deserialize_with = "unique_keys")]
    pub edge_sets: BTreeMap<String, EdgeSet>,
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<OriginInfo>,
}

impl Schema {
    /// Context features, empty when the schema declares no context.
    pub fn context_features(&self) -> Option<&BTreeMap<String, Feature>> {
        self.context.as_ref().map(|c| &c.features)
    }

    pub fn has_context_feature(&self, name: &str) -> bool {
        self.context_features()
            .is_some_and(|features| features.contains_key(name))
    }

    /// The origin graph type, `None` if unset or not a known tag.
    pub fn origin_graph_type(&self) -> Option<GraphType> {
        self.info
            .as_ref()
            .and_then(|info| GraphType::try_from(info.graph_type).ok())
    }

    pub fn root_set(&self) -> &[String] {
        self.info.as_ref().map(|i| i.root_set.as_slice()).unwrap_or(&[])
    }
}
