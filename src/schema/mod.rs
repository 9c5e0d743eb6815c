//! Graph schema model: features, sets, origin info, and their codecs.

pub mod builder;
pub mod codec;
pub mod graph;
pub mod serde_ext;
pub mod types;

pub use builder::SchemaBuilder;
pub use codec::*;
pub use graph::SchemaGraph;
pub use types::*;

/// Every declared feature as `(set type, set name, feature name, feature)`.
///
/// Order is deterministic: context first, then node sets, then edge sets,
/// each by name. Context features use an empty set name.
pub fn iter_features(schema: &Schema) -> impl Iterator<Item = (SetType, &str, &str, &Feature)> {
    let context = schema
        .context
        .iter()
        .flat_map(|c| c.features.iter())
        .map(|(f, feature)| (SetType::Context, "", f.as_str(), feature));
    let nodes = schema.node_sets.iter().flat_map(|(set, node_set)| {
        node_set
            .features
            .iter()
            .map(move |(f, feature)| (SetType::Nodes, set.as_str(), f.as_str(), feature))
    });
    let edges = schema.edge_sets.iter().flat_map(|(set, edge_set)| {
        edge_set
            .features
            .iter()
            .map(move |(f, feature)| (SetType::Edges, set.as_str(), f.as_str(), feature))
    });
    context.chain(nodes).chain(edges)
}
