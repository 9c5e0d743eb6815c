//! petgraph view of a schema's topology: node sets are vertices, edge sets
//! are directed edges from `source` to `target`.

use std::collections::{BTreeSet, HashMap};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use super::types::Schema;

pub struct SchemaGraph {
    pub graph: DiGraph<String, String>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl SchemaGraph {
    /// Build the topology. Edge sets whose endpoints do not resolve are left
    /// out; reporting them is the validator's job.
    pub fn build(schema: &Schema) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for name in schema.node_sets.keys() {
            let idx = graph.add_node(name.clone());
            node_indices.insert(name.clone(), idx);
        }

        for (name, edge_set) in &schema.edge_sets {
            let source = node_indices.get(&edge_set.source);
            let target = node_indices.get(&edge_set.target);
            if let (Some(&s), Some(&t)) = (source, target) {
                graph.add_edge(s, t, name.clone());
            }
        }

        SchemaGraph {
            graph,
            node_indices,
        }
    }

    fn edge_sets_directed(&self, node_set: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_set) else {
            return vec![];
        };
        let mut names: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .map(|e| e.weight().as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Edge sets whose `source` is `node_set`, sorted by name.
    pub fn outgoing_edge_sets(&self, node_set: &str) -> Vec<&str> {
        self.edge_sets_directed(node_set, Direction::Outgoing)
    }

    /// Edge sets whose `target` is `node_set`, sorted by name.
    pub fn incoming_edge_sets(&self, node_set: &str) -> Vec<&str> {
        self.edge_sets_directed(node_set, Direction::Incoming)
    }

    /// Node sets reachable from `roots` by following edge sets forward.
    /// Roots themselves are included; unknown root names are ignored.
    pub fn reachable_from<'a>(&self, roots: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
        let mut reachable = BTreeSet::new();
        for root in roots {
            let Some(&start) = self.node_indices.get(root) else {
                continue;
            };
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(nx) = bfs.next(&self.graph) {
                reachable.insert(self.graph[nx].clone());
            }
        }
        reachable
    }
}
