//! Feature value payloads.
//!
//! The record-level value containers shared by `Feature::example_values` and
//! the feature bags of subgraph records. Wire layout follows the usual
//! example-record convention: a oneof of bytes / float / int64 lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three physical value encodings a record can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bytes,
    Float,
    Int64,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Bytes => write!(f, "bytes_list"),
            ValueKind::Float => write!(f, "float_list"),
            ValueKind::Int64 => write!(f, "int64_list"),
        }
    }
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct BytesList {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub value: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatList {
    #[prost(float, repeated, tag = "1")]
    pub value: Vec<f32>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Int64List {
    #[prost(int64, repeated, tag = "1")]
    pub value: Vec<i64>,
}

#[derive(Clone, PartialEq, prost::Oneof, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    #[prost(message, tag = "1")]
    BytesList(BytesList),
    #[prost(message, tag = "2")]
    FloatList(FloatList),
    #[prost(message, tag = "3")]
    Int64List(Int64List),
}

/// One feature's values. An unset `kind` means "no values".
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureValues {
    #[prost(oneof = "Kind", tags = "1, 2, 3")]
    pub kind: Option<Kind>,
}

impl FeatureValues {
    pub fn bytes<I, B>(values: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        FeatureValues {
            kind: Some(Kind::BytesList(BytesList {
                value: values.into_iter().map(Into::into).collect(),
            })),
        }
    }

    pub fn floats(values: impl IntoIterator<Item = f32>) -> Self {
        FeatureValues {
            kind: Some(Kind::FloatList(FloatList {
                value: values.into_iter().collect(),
            })),
        }
    }

    pub fn int64s(values: impl IntoIterator<Item = i64>) -> Self {
        FeatureValues {
            kind: Some(Kind::Int64List(Int64List {
                value: values.into_iter().collect(),
            })),
        }
    }

    pub fn value_kind(&self) -> Option<ValueKind> {
        match &self.kind {
            Some(Kind::BytesList(_)) => Some(ValueKind::Bytes),
            Some(Kind::FloatList(_)) => Some(ValueKind::Float),
            Some(Kind::Int64List(_)) => Some(ValueKind::Int64),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            Some(Kind::BytesList(l)) => l.value.len(),
            Some(Kind::FloatList(l)) => l.value.len(),
            Some(Kind::Int64List(l)) => l.value.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named bag of feature values (context, node or edge features).
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    #[prost(btree_map = "string, message", tag = "1")]
    #[serde(deserialize_with = "crate::schema::serde_ext::unique_keys")]
    pub feature: BTreeMap<String, FeatureValues>,
}

impl Features {
    pub fn with(mut self, name: impl Into<String>, values: FeatureValues) -> Self {
        self.feature.insert(name.into(), values);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.feature.is_empty()
    }
}
