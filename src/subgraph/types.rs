//! Sampled subgraph records.
//!
//! Field tags are fixed by existing sampler producers and consumers.

use serde::{Deserialize, Serialize};

use crate::values::Features;

/// One sample: a seed node plus the nodes and outgoing edges collected
/// around it. Neighbours outside `nodes` are legal (truncated sampling).
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Subgraph {
    #[prost(bytes = "vec", tag = "1")]
    pub sample_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub seed_node_id: Vec<u8>,
    #[prost(message, repeated, tag = "3")]
    pub nodes: Vec<Node>,
    /// Context features of the sample.
    #[prost(message, optional, tag = "4")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[prost(bytes = "vec", tag = "1")]
    pub id: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[prost(message, repeated, tag = "3")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outgoing_edges: Vec<Edge>,
    #[prost(string, tag = "4")]
    pub node_set_name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Edge {
    #[prost(bytes = "vec", tag = "1")]
    pub neighbor_id: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
    #[prost(string, tag = "4")]
    pub edge_set_name: String,
}

/// Render a node id for messages.
pub fn display_id(id: &[u8]) -> String {
    String::from_utf8_lossy(id).into_owned()
}

impl Subgraph {
    pub fn node(&self, id: &[u8]) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn seed(&self) -> Option<&Node> {
        self.node(&self.seed_node_id)
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.outgoing_edges.len()).sum()
    }
}
