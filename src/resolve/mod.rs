//! Resolution: Schema → GraphSpec.
//!
//! Refuses schemas with ERROR-level violations, then expands each set into
//! full tensor specs, adding the implicit size and adjacency features.

pub mod spec;

use std::collections::BTreeMap;

pub use spec::*;

use crate::error::SchemaError;
use crate::schema::{DataType, Feature, GraphType, Metadata, Schema, SetType};
use crate::validate::{self, ValidationOptions, has_errors};

pub fn resolve(schema: &Schema) -> Result<GraphSpec, SchemaError> {
    resolve_with(schema, &ValidationOptions::default())
}

pub fn resolve_with(
    schema: &Schema,
    options: &ValidationOptions,
) -> Result<GraphSpec, SchemaError> {
    let violations = validate::validate_with(schema, options);
    if has_errors(&violations) {
        return Err(SchemaError::Invalid(
            violations.into_iter().filter(|v| v.is_error()).collect(),
        ));
    }
    for warning in &violations {
        log::warn!("{}", warning);
    }

    let context = SetSpec {
        set_type: SetType::Context,
        features: schema
            .context_features()
            .map(|features| declared_specs(features, false))
            .unwrap_or_default(),
        context: Vec::new(),
        adjacency: None,
        cardinality: None,
    };

    let node_sets = schema
        .node_sets
        .iter()
        .map(|(name, node_set)| {
            let mut features = declared_specs(&node_set.features, true);
            features.insert(SIZE_NAME.to_string(), size_spec());
            let spec = SetSpec {
                set_type: SetType::Nodes,
                features,
                context: node_set.context.clone(),
                adjacency: None,
                cardinality: cardinality(node_set.metadata.as_ref()),
            };
            (name.clone(), spec)
        })
        .collect();

    let edge_sets = schema
        .edge_sets
        .iter()
        .map(|(name, edge_set)| {
            let mut features = declared_specs(&edge_set.features, true);
            features.insert(SIZE_NAME.to_string(), size_spec());
            features.insert(SOURCE_NAME.to_string(), index_spec());
            features.insert(TARGET_NAME.to_string(), index_spec());
            let spec = SetSpec {
                set_type: SetType::Edges,
                features,
                context: edge_set.context.clone(),
                adjacency: Some(Adjacency {
                    source: edge_set.source.clone(),
                    target: edge_set.target.clone(),
                }),
                cardinality: cardinality(edge_set.metadata.as_ref()),
            };
            (name.clone(), spec)
        })
        .collect();

    let spec = GraphSpec {
        graph_type: schema.origin_graph_type().unwrap_or(GraphType::Undefined),
        root_set: schema.root_set().to_vec(),
        context,
        node_sets,
        edge_sets,
    };
    log::debug!("resolved schema into {} record keys", spec.example_keys().len());
    Ok(spec)
}

/// Item features get a leading dimension of unknown size (one row per item).
fn declared_specs(
    features: &BTreeMap<String, Feature>,
    per_item: bool,
) -> BTreeMap<String, FeatureSpec> {
    features
        .iter()
        .map(|(name, feature)| {
            let item_shape = feature.item_shape();
            let mut shape = Vec::with_capacity(item_shape.dim.len() + 1);
            if per_item {
                shape.push(None);
            }
            shape.extend(item_shape.sizes());
            let spec = FeatureSpec {
                // Validation guarantees a known, supported dtype.
                dtype: feature.data_type().unwrap_or(DataType::Invalid),
                shape,
                ragged: item_shape.is_ragged(),
                implicit: false,
            };
            (name.clone(), spec)
        })
        .collect()
}

fn size_spec() -> FeatureSpec {
    FeatureSpec {
        dtype: DataType::Int64,
        shape: vec![],
        ragged: false,
        implicit: true,
    }
}

fn index_spec() -> FeatureSpec {
    FeatureSpec {
        dtype: DataType::Int64,
        shape: vec![None],
        ragged: false,
        implicit: true,
    }
}

fn cardinality(metadata: Option<&Metadata>) -> Option<i64> {
    metadata.and_then(|m| m.cardinality)
}
