//! Checks a sampled `Subgraph` against the schema it was sampled from
//! (G001–G011).

use std::collections::{BTreeMap, HashMap};

use super::types::*;
use crate::schema::{Feature, Schema};
use crate::validate::{ValidationOptions, Violation, keyed, sort_violations};
use crate::values::Features;

pub fn check_subgraph(schema: &Schema, subgraph: &Subgraph) -> Vec<Violation> {
    check_subgraph_with(schema, subgraph, &ValidationOptions::default())
}

pub fn check_subgraph_with(
    schema: &Schema,
    subgraph: &Subgraph,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let mut errors = Vec::new();

    if subgraph.sample_id.is_empty() {
        errors.push(Violation::error("G010", "sample_id", "Sample id must not be empty"));
    }

    let index = g004_unique_node_ids(subgraph, &mut errors);
    g003_seed_among_nodes(subgraph, &index, &mut errors);
    if options.lint_root_first {
        g009_seed_first_of_its_set(subgraph, &index, &mut errors);
    }

    for (i, node) in subgraph.nodes.iter().enumerate() {
        check_node(schema, subgraph, &index, i, node, options, &mut errors);
    }

    if let Some(features) = &subgraph.features {
        check_features(features, schema.context_features(), "", options, &mut errors);
    }

    sort_violations(&mut errors);
    log::debug!(
        "checked subgraph '{}' ({} nodes, {} edges): {} violation(s)",
        display_id(&subgraph.sample_id),
        subgraph.nodes.len(),
        subgraph.edge_count(),
        errors.len()
    );
    errors
}

pub fn check_subgraphs(schema: &Schema, subgraphs: &[Subgraph]) -> Vec<Violation> {
    check_subgraphs_with(schema, subgraphs, &ValidationOptions::default())
}

/// Check a batch of records: every record on its own (paths prefixed with
/// `[i].`), plus sample id uniqueness across the batch.
pub fn check_subgraphs_with(
    schema: &Schema,
    subgraphs: &[Subgraph],
    options: &ValidationOptions,
) -> Vec<Violation> {
    let mut errors = Vec::new();
    let mut seen: HashMap<&[u8], usize> = HashMap::new();

    for (i, subgraph) in subgraphs.iter().enumerate() {
        for mut v in check_subgraph_with(schema, subgraph, options) {
            v.path = format!("[{}].{}", i, v.path);
            errors.push(v);
        }
        if subgraph.sample_id.is_empty() {
            continue;
        }
        if let Some(&first) = seen.get(subgraph.sample_id.as_slice()) {
            errors.push(Violation::error(
                "G011",
                format!("[{}].sample_id", i),
                format!(
                    "Sample id '{}' already used by record {}",
                    display_id(&subgraph.sample_id),
                    first
                ),
            ));
        } else {
            seen.insert(subgraph.sample_id.as_slice(), i);
        }
    }

    sort_violations(&mut errors);
    errors
}

/// Maps each node id to its first position, reporting repeats.
fn g004_unique_node_ids<'a>(
    subgraph: &'a Subgraph,
    errors: &mut Vec<Violation>,
) -> HashMap<&'a [u8], usize> {
    let mut index = HashMap::new();
    for (i, node) in subgraph.nodes.iter().enumerate() {
        if let Some(&first) = index.get(node.id.as_slice()) {
            errors.push(Violation::error(
                "G004",
                format!("nodes[{}].id", i),
                format!(
                    "Node id '{}' already used by nodes[{}]",
                    display_id(&node.id),
                    first
                ),
            ));
        } else {
            index.insert(node.id.as_slice(), i);
        }
    }
    index
}

fn g003_seed_among_nodes(
    subgraph: &Subgraph,
    index: &HashMap<&[u8], usize>,
    errors: &mut Vec<Violation>,
) {
    if !index.contains_key(subgraph.seed_node_id.as_slice()) {
        errors.push(Violation::error(
            "G003",
            "seed_node_id",
            format!(
                "Seed node '{}' is not among the sampled nodes",
                display_id(&subgraph.seed_node_id)
            ),
        ));
    }
}

fn g009_seed_first_of_its_set(
    subgraph: &Subgraph,
    index: &HashMap<&[u8], usize>,
    errors: &mut Vec<Violation>,
) {
    let Some(&seed_pos) = index.get(subgraph.seed_node_id.as_slice()) else {
        return;
    };
    let seed_set = &subgraph.nodes[seed_pos].node_set_name;
    let first_pos = subgraph
        .nodes
        .iter()
        .position(|n| &n.node_set_name == seed_set);
    if first_pos != Some(seed_pos) {
        errors.push(Violation::warning(
            "G009",
            "seed_node_id",
            format!(
                "Seed node '{}' is not the first node of node set '{}'",
                display_id(&subgraph.seed_node_id),
                seed_set
            ),
        ));
    }
}

fn check_node(
    schema: &Schema,
    subgraph: &Subgraph,
    index: &HashMap<&[u8], usize>,
    i: usize,
    node: &Node,
    options: &ValidationOptions,
    errors: &mut Vec<Violation>,
) {
    let path = format!("nodes[{}]", i);
    let set_declared = schema.node_sets.contains_key(&node.node_set_name);
    match schema.node_sets.get(&node.node_set_name) {
        Some(node_set) => {
            if let Some(features) = &node.features {
                check_features(features, Some(&node_set.features), &path, options, errors);
            }
        }
        None => errors.push(Violation::error(
            "G001",
            format!("{}.node_set_name", path),
            format!("Node set '{}' is not declared in the schema", node.node_set_name),
        )),
    }

    for (j, edge) in node.outgoing_edges.iter().enumerate() {
        let edge_path = format!("{}.outgoing_edges[{}]", path, j);
        let Some(edge_set) = schema.edge_sets.get(&edge.edge_set_name) else {
            errors.push(Violation::error(
                "G002",
                format!("{}.edge_set_name", edge_path),
                format!("Edge set '{}' is not declared in the schema", edge.edge_set_name),
            ));
            continue;
        };

        // An undeclared node set is already G001.
        if set_declared && edge_set.source != node.node_set_name {
            errors.push(Violation::error(
                "G005",
                format!("{}.edge_set_name", edge_path),
                format!(
                    "Edge set '{}' starts at node set '{}', not '{}'",
                    edge.edge_set_name, edge_set.source, node.node_set_name
                ),
            ));
        }

        // Neighbours missing from the sample are allowed.
        if let Some(&n) = index.get(edge.neighbor_id.as_slice()) {
            let neighbor = &subgraph.nodes[n];
            if neighbor.node_set_name != edge_set.target {
                errors.push(Violation::error(
                    "G006",
                    format!("{}.neighbor_id", edge_path),
                    format!(
                        "Edge set '{}' ends at node set '{}', but neighbor '{}' is in '{}'",
                        edge.edge_set_name,
                        edge_set.target,
                        display_id(&edge.neighbor_id),
                        neighbor.node_set_name
                    ),
                ));
            }
        }

        if let Some(features) = &edge.features {
            check_features(features, Some(&edge_set.features), &edge_path, options, errors);
        }
    }
}

/// `parent` is the path of the owning record, empty for the sample itself.
fn check_features(
    features: &Features,
    declared: Option<&BTreeMap<String, Feature>>,
    parent: &str,
    options: &ValidationOptions,
    errors: &mut Vec<Violation>,
) {
    let prefix = if parent.is_empty() {
        "features".to_string()
    } else {
        format!("{}.features", parent)
    };

    for (name, values) in &features.feature {
        let path = keyed(&prefix, name);
        let Some(feature) = declared.and_then(|d| d.get(name)) else {
            let message = format!("Feature '{}' is not declared in the schema", name);
            errors.push(if options.strict_features {
                Violation::error("G007", path, message)
            } else {
                Violation::warning("G007", path, message)
            });
            continue;
        };

        let expected = feature.data_type().and_then(|dt| dt.value_kind());
        if let (Some(expected), Some(actual)) = (expected, values.value_kind()) {
            if expected != actual {
                errors.push(Violation::error(
                    "G008",
                    path,
                    format!("Feature '{}' holds a {} but expects a {}", name, actual, expected),
                ));
            }
        }
    }
}
