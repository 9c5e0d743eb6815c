//! Construction helpers that refuse duplicate names at insertion time.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use super::types::*;
use crate::error::{EntityKind, SchemaError};

pub(crate) fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    kind: EntityKind,
    name: impl Into<String>,
    value: V,
) -> Result<(), SchemaError> {
    match map.entry(name.into()) {
        Entry::Occupied(e) => Err(SchemaError::duplicate(kind, e.key().clone())),
        Entry::Vacant(e) => {
            e.insert(value);
            Ok(())
        }
    }
}

impl Context {
    pub fn with_feature(
        mut self,
        name: impl Into<String>,
        feature: Feature,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.features, EntityKind::Feature, name, feature)?;
        Ok(self)
    }
}

impl NodeSet {
    pub fn with_feature(
        mut self,
        name: impl Into<String>,
        feature: Feature,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.features, EntityKind::Feature, name, feature)?;
        Ok(self)
    }

    pub fn with_context(mut self, context_feature: impl Into<String>) -> Self {
        self.context.push(context_feature.into());
        self
    }
}

impl EdgeSet {
    pub fn with_feature(
        mut self,
        name: impl Into<String>,
        feature: Feature,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.features, EntityKind::Feature, name, feature)?;
        Ok(self)
    }

    pub fn with_context(mut self, context_feature: impl Into<String>) -> Self {
        self.context.push(context_feature.into());
        self
    }
}

/// Assembles a `Schema` one named entity at a time.
///
/// ```
/// use graph_schema::schema::*;
///
/// let schema = SchemaBuilder::new()
///     .node_set("paper", NodeSet::default())?
///     .edge_set("cites", EdgeSet::between("paper", "paper"))?
///     .info(GraphType::Subgraph, ["paper"])
///     .build();
/// assert_eq!(schema.edge_sets["cites"].target, "paper");
/// # Ok::<(), graph_schema::error::SchemaError>(())
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context_feature(
        mut self,
        name: impl Into<String>,
        feature: Feature,
    ) -> Result<Self, SchemaError> {
        let context = self.schema.context.get_or_insert_with(Context::default);
        insert_unique(&mut context.features, EntityKind::Feature, name, feature)?;
        Ok(self)
    }

    pub fn node_set(
        mut self,
        name: impl Into<String>,
        node_set: NodeSet,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.schema.node_sets, EntityKind::NodeSet, name, node_set)?;
        Ok(self)
    }

    pub fn edge_set(
        mut self,
        name: impl Into<String>,
        edge_set: EdgeSet,
    ) -> Result<Self, SchemaError> {
        insert_unique(&mut self.schema.edge_sets, EntityKind::EdgeSet, name, edge_set)?;
        Ok(self)
    }

    pub fn info<I, S>(mut self, graph_type: GraphType, root_set: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.info = Some(OriginInfo {
            graph_type: graph_type.into(),
            root_set: root_set.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}
