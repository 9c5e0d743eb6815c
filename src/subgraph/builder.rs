//! Incremental construction of `Subgraph` records.

use std::collections::HashMap;

use super::types::*;
use crate::error::{EntityKind, SchemaError};
use crate::values::{FeatureValues, Features};

/// Builds a `Subgraph`, rejecting duplicate node ids and edges from nodes
/// that have not been added yet.
#[derive(Debug, Default)]
pub struct SubgraphBuilder {
    subgraph: Subgraph,
    index: HashMap<Vec<u8>, usize>,
}

fn non_empty(features: Features) -> Option<Features> {
    (!features.is_empty()).then_some(features)
}

impl SubgraphBuilder {
    pub fn new(sample_id: impl Into<Vec<u8>>, seed_node_id: impl Into<Vec<u8>>) -> Self {
        SubgraphBuilder {
            subgraph: Subgraph {
                sample_id: sample_id.into(),
                seed_node_id: seed_node_id.into(),
                ..Default::default()
            },
            index: HashMap::new(),
        }
    }

    pub fn add_node(
        mut self,
        id: impl Into<Vec<u8>>,
        node_set_name: impl Into<String>,
        features: Features,
    ) -> Result<Self, SchemaError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(SchemaError::duplicate(EntityKind::NodeId, display_id(&id)));
        }
        self.index.insert(id.clone(), self.subgraph.nodes.len());
        self.subgraph.nodes.push(Node {
            id,
            features: non_empty(features),
            outgoing_edges: Vec::new(),
            node_set_name: node_set_name.into(),
        });
        Ok(self)
    }

    /// Add an edge leaving `from`. The neighbour does not need to be part of
    /// the sample.
    pub fn add_edge(
        mut self,
        from: impl AsRef<[u8]>,
        neighbor_id: impl Into<Vec<u8>>,
        edge_set_name: impl Into<String>,
        features: Features,
    ) -> Result<Self, SchemaError> {
        let from = from.as_ref();
        let &idx = self
            .index
            .get(from)
            .ok_or_else(|| SchemaError::UnknownNode(display_id(from)))?;
        self.subgraph.nodes[idx].outgoing_edges.push(Edge {
            neighbor_id: neighbor_id.into(),
            features: non_empty(features),
            edge_set_name: edge_set_name.into(),
        });
        Ok(self)
    }

    pub fn context_feature(mut self, name: impl Into<String>, values: FeatureValues) -> Self {
        self.subgraph
            .features
            .get_or_insert_with(Features::default)
            .feature
            .insert(name.into(), values);
        self
    }

    pub fn build(self) -> Subgraph {
        self.subgraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nodes_and_edges() {
        let subgraph = SubgraphBuilder::new("s0", "p1")
            .add_node("p1", "paper", Features::default())
            .unwrap()
            .add_node("p2", "paper", Features::default())
            .unwrap()
            .add_edge("p1", "p2", "cites", Features::default())
            .unwrap()
            .add_edge("p1", "p9", "cites", Features::default())
            .unwrap()
            .build();
        assert_eq!(subgraph.nodes.len(), 2);
        assert_eq!(subgraph.edge_count(), 2);
        assert_eq!(subgraph.seed().map(|n| n.node_set_name.as_str()), Some("paper"));
        assert!(subgraph.nodes[0].features.is_none());
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let err = SubgraphBuilder::new("s0", "A")
            .add_node("A", "paper", Features::default())
            .unwrap()
            .add_node("A", "paper", Features::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicate node id 'A'");
    }

    #[test]
    fn edge_from_missing_node_is_rejected() {
        let err = SubgraphBuilder::new("s0", "A")
            .add_edge("A", "B", "cites", Features::default())
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownNode(ref id) if id == "A"));
    }
}
