//! Schema-level structural rules: set names (S001–S002) and origin info
//! (R001–R004).
//!
//! Self-referential edge sets and several edge sets between the same pair of
//! node sets are legal and are not checked here.

use super::{ValidationOptions, Violation, keyed};
use crate::schema::{GraphType, RESERVED_PREFIX, Schema, SchemaGraph};

pub fn validate_set_names(schema: &Schema) -> Vec<Violation> {
    let mut errors = Vec::new();
    let names = schema
        .node_sets
        .keys()
        .map(|n| ("node_sets", n))
        .chain(schema.edge_sets.keys().map(|n| ("edge_sets", n)));

    for (prefix, name) in names {
        if name.is_empty() {
            errors.push(Violation::error(
                "S001",
                keyed(prefix, name),
                "Set name must not be empty",
            ));
        } else if name.contains(RESERVED_PREFIX) {
            errors.push(Violation::error(
                "S002",
                keyed(prefix, name),
                format!(
                    "Set name '{}' contains the reserved character '{}'",
                    name, RESERVED_PREFIX
                ),
            ));
        }
    }
    errors
}

pub fn validate_origin_info(schema: &Schema, options: &ValidationOptions) -> Vec<Violation> {
    let mut errors = Vec::new();
    let Some(info) = &schema.info else {
        return errors;
    };

    r001_roots_resolve(schema, &mut errors);

    match GraphType::try_from(info.graph_type) {
        Ok(GraphType::Subgraph) => {
            r002_subgraph_has_root(schema, &mut errors);
            if options.lint_unreachable {
                r003_reachable_from_roots(schema, &mut errors);
            }
        }
        Ok(_) => {}
        Err(_) => errors.push(Violation::error(
            "R004",
            "info.graph_type",
            format!("Unknown graph type tag {}", info.graph_type),
        )),
    }
    errors
}

fn r001_roots_resolve(schema: &Schema, errors: &mut Vec<Violation>) {
    for (i, root) in schema.root_set().iter().enumerate() {
        if !schema.node_sets.contains_key(root) {
            errors.push(Violation::error(
                "R001",
                format!("info.root_set[{}]", i),
                format!("Root node set '{}' is not declared", root),
            ));
        }
    }
}

fn r002_subgraph_has_root(schema: &Schema, errors: &mut Vec<Violation>) {
    if schema.root_set().is_empty() {
        errors.push(Violation::warning(
            "R002",
            "info.root_set",
            "SUBGRAPH schema does not name a root node set",
        ));
    }
}

fn r003_reachable_from_roots(schema: &Schema, errors: &mut Vec<Violation>) {
    if schema.root_set().is_empty() {
        return;
    }
    let graph = SchemaGraph::build(schema);
    let reachable = graph.reachable_from(schema.root_set().iter().map(String::as_str));
    for name in schema.node_sets.keys() {
        if !reachable.contains(name) {
            errors.push(Violation::warning(
                "R003",
                keyed("node_sets", name),
                format!("Node set '{}' is not reachable from the root set", name),
            ));
        }
    }
}
