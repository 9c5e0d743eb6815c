use graph_schema::schema::*;
use graph_schema::subgraph::*;
use graph_schema::validate::Violation;
use graph_schema::values::{FeatureValues, Features};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Schema builders
// =============================================================================

/// `paper` (with features) cites `paper`; `author` writes `paper`.
/// SUBGRAPH-typed, rooted at `paper`.
pub fn citation_schema() -> Schema {
    let paper = NodeSet::default()
        .with_feature("year", Feature::scalar(DataType::Int64))
        .unwrap()
        .with_feature("embedding", Feature::with_shape(DataType::Float, &[16]))
        .unwrap()
        .with_feature(
            "title_tokens",
            Feature::with_shape(DataType::String, &[RAGGED_DIM]),
        )
        .unwrap()
        .with_context("label");

    let cites = EdgeSet::between("paper", "paper")
        .with_feature("weight", Feature::scalar(DataType::Float))
        .unwrap();

    SchemaBuilder::new()
        .context_feature("label", Feature::scalar(DataType::Int64))
        .unwrap()
        .node_set("paper", paper)
        .unwrap()
        .node_set("author", NodeSet::default())
        .unwrap()
        .edge_set("cites", cites)
        .unwrap()
        .edge_set("writes", EdgeSet::between("author", "paper"))
        .unwrap()
        .edge_set("written", EdgeSet::between("paper", "author"))
        .unwrap()
        .info(GraphType::Subgraph, ["paper"])
        .build()
}

/// Only `paper` with a self-referential `cites`.
pub fn self_citing_schema() -> Schema {
    SchemaBuilder::new()
        .node_set("paper", NodeSet::default())
        .unwrap()
        .edge_set("cites", EdgeSet::between("paper", "paper"))
        .unwrap()
        .info(GraphType::Subgraph, ["paper"])
        .build()
}

// =============================================================================
// Subgraph builders
// =============================================================================

/// Seed `p1`, neighbour `p2` in the sample, neighbour `p3` truncated away,
/// and one author.
pub fn citation_subgraph() -> Subgraph {
    SubgraphBuilder::new("sample-0", "p1")
        .add_node(
            "p1",
            "paper",
            Features::default().with("year", FeatureValues::int64s([2019])),
        )
        .unwrap()
        .add_node("p2", "paper", Features::default())
        .unwrap()
        .add_node("a1", "author", Features::default())
        .unwrap()
        .add_edge(
            "p1",
            "p2",
            "cites",
            Features::default().with("weight", FeatureValues::floats([0.5])),
        )
        .unwrap()
        .add_edge("p1", "p3", "cites", Features::default())
        .unwrap()
        .add_edge("p2", "a1", "written", Features::default())
        .unwrap()
        .add_edge("a1", "p1", "writes", Features::default())
        .unwrap()
        .context_feature("label", FeatureValues::int64s([3]))
        .build()
}

pub fn node(id: &str, node_set: &str) -> Node {
    Node {
        id: id.as_bytes().to_vec(),
        node_set_name: node_set.into(),
        ..Default::default()
    }
}

pub fn edge(neighbor: &str, edge_set: &str) -> Edge {
    Edge {
        neighbor_id: neighbor.as_bytes().to_vec(),
        edge_set_name: edge_set.into(),
        ..Default::default()
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn errors_only(violations: &[Violation]) -> Vec<&Violation> {
    violations.iter().filter(|v| v.is_error()).collect()
}

pub fn assert_has_error(violations: &[Violation], code: &str) {
    assert!(
        violations.iter().any(|v| v.code == code && v.is_error()),
        "Expected error {}, got: {:?}",
        code,
        violations
    );
}

pub fn assert_no_errors(violations: &[Violation]) {
    assert!(
        errors_only(violations).is_empty(),
        "Expected no errors, got: {:?}",
        violations
    );
}

pub fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
