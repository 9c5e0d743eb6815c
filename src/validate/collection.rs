//! Per-set rules: feature names, context references, edge set endpoints.

use std::collections::BTreeMap;

use super::feature::validate_feature;
use super::{ValidationOptions, Violation, keyed};
use crate::schema::{Context, EdgeSet, Feature, NodeSet, RESERVED_PREFIX, Schema};

/// Feature names that edge sets carry implicitly as index tensors.
pub const IMPLICIT_EDGE_FEATURES: [&str; 2] = ["source", "target"];

pub fn validate_context(context: &Context, options: &ValidationOptions) -> Vec<Violation> {
    validate_features(&context.features, "context", options)
}

pub fn validate_node_set(
    name: &str,
    node_set: &NodeSet,
    schema: &Schema,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let path = keyed("node_sets", name);
    let mut errors = validate_features(&node_set.features, &path, options);
    c001_context_refs_resolve(&node_set.context, &path, schema, &mut errors);
    errors
}

pub fn validate_edge_set(
    name: &str,
    edge_set: &EdgeSet,
    schema: &Schema,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let path = keyed("edge_sets", name);
    let mut errors = validate_features(&edge_set.features, &path, options);
    e001_e002_endpoints_resolve(edge_set, &path, schema, &mut errors);
    e003_no_explicit_endpoint_features(edge_set, &path, &mut errors);
    c001_context_refs_resolve(&edge_set.context, &path, schema, &mut errors);
    errors
}

fn validate_features(
    features: &BTreeMap<String, Feature>,
    set_path: &str,
    options: &ValidationOptions,
) -> Vec<Violation> {
    let mut errors = Vec::new();
    for (name, feature) in features {
        let path = keyed(&format!("{}.features", set_path), name);
        if name.is_empty() {
            errors.push(Violation::error("F006", &path, "Feature name must not be empty"));
        } else if name.starts_with(RESERVED_PREFIX) {
            errors.push(Violation::error(
                "F005",
                &path,
                format!(
                    "Feature name '{}' uses the reserved prefix '{}'",
                    name, RESERVED_PREFIX
                ),
            ));
        }
        errors.extend(validate_feature(feature, &path, options));
    }
    errors
}

fn c001_context_refs_resolve(
    context: &[String],
    set_path: &str,
    schema: &Schema,
    errors: &mut Vec<Violation>,
) {
    for (i, feature_name) in context.iter().enumerate() {
        if !schema.has_context_feature(feature_name) {
            errors.push(Violation::error(
                "C001",
                format!("{}.context[{}]", set_path, i),
                format!("Context feature '{}' is not declared", feature_name),
            ));
        }
    }
}

fn e001_e002_endpoints_resolve(
    edge_set: &EdgeSet,
    path: &str,
    schema: &Schema,
    errors: &mut Vec<Violation>,
) {
    if !schema.node_sets.contains_key(&edge_set.source) {
        errors.push(Violation::error(
            "E001",
            format!("{}.source", path),
            format!("Source node set '{}' is not declared", edge_set.source),
        ));
    }
    if !schema.node_sets.contains_key(&edge_set.target) {
        errors.push(Violation::error(
            "E002",
            format!("{}.target", path),
            format!("Target node set '{}' is not declared", edge_set.target),
        ));
    }
}

fn e003_no_explicit_endpoint_features(edge_set: &EdgeSet, path: &str, errors: &mut Vec<Violation>) {
    for name in IMPLICIT_EDGE_FEATURES {
        if edge_set.features.contains_key(name) {
            errors.push(Violation::error(
                "E003",
                keyed(&format!("{}.features", path), name),
                format!("'{}' is implicit on edge sets and cannot be declared as a feature", name),
            ));
        }
    }
}
