//! Integration tests for schema validation (S, F, C, E, R rules).

#[allow(dead_code)]
mod helpers;

use graph_schema::schema::*;
use graph_schema::validate::{self, Severity, ValidationOptions, has_errors};
use helpers::*;

#[test]
fn citation_schema_is_clean() {
    init_logging();
    let violations = validate::validate(&citation_schema());
    assert!(violations.is_empty(), "Expected no violations, got: {:?}", violations);
}

#[test]
fn self_referential_edge_set_is_legal() {
    let violations = validate::validate(&self_citing_schema());
    assert_no_errors(&violations);
    assert!(!has_errors(&violations));
}

#[test]
fn parallel_edge_sets_between_same_pair_are_legal() {
    let mut schema = self_citing_schema();
    schema
        .edge_sets
        .insert("cites_again".into(), EdgeSet::between("paper", "paper"));
    assert_no_errors(&validate::validate(&schema));
}

#[test]
fn dangling_target_is_exactly_one_error() {
    let schema = SchemaBuilder::new()
        .node_set("paper", NodeSet::default())
        .unwrap()
        .edge_set("cites", EdgeSet::between("paper", "author"))
        .unwrap()
        .build();
    let violations = validate::validate(&schema);
    let errors = errors_only(&violations);
    assert_eq!(errors.len(), 1, "{:?}", violations);
    assert_eq!(errors[0].code, "E002");
    assert_eq!(errors[0].path, r#"edge_sets["cites"].target"#);
}

#[test]
fn dangling_source_is_reported_at_its_path() {
    let mut schema = citation_schema();
    schema
        .edge_sets
        .insert("likes".into(), EdgeSet::between("user", "paper"));
    let violations = validate::validate(&schema);
    assert!(
        violations
            .iter()
            .any(|v| v.is_error() && v.path == r#"edge_sets["likes"].source"#),
        "{:?}",
        violations
    );
}

#[test]
fn unsupported_dtype_flags_only_that_feature() {
    let mut schema = citation_schema();
    let paper = schema.node_sets.get_mut("paper").unwrap();
    paper.features.get_mut("year").unwrap().dtype = 42;

    let violations = validate::validate(&schema);
    assert_eq!(violations.len(), 1, "{:?}", violations);
    assert_eq!(violations[0].code, "F001");
    assert_eq!(violations[0].path, r#"node_sets["paper"].features["year"].dtype"#);
}

#[test]
fn rank_one_size_one_shape_is_one_warning() {
    let mut schema = citation_schema();
    schema
        .node_sets
        .get_mut("author")
        .unwrap()
        .features
        .insert("h_index".into(), Feature::with_shape(DataType::Int64, &[1]));

    let violations = validate::validate(&schema);
    assert_eq!(violations.len(), 1, "{:?}", violations);
    assert_eq!(violations[0].severity, Severity::Warning);
    assert_eq!(violations[0].code, "F004");
}

#[test]
fn reserved_and_empty_set_names() {
    let mut schema = self_citing_schema();
    schema.node_sets.insert("".into(), NodeSet::default());
    schema.node_sets.insert("bad#name".into(), NodeSet::default());
    let violations = validate::validate(&schema);
    assert_has_error(&violations, "S001");
    assert_has_error(&violations, "S002");
}

#[test]
fn unresolved_context_reference_on_edge_set() {
    let mut schema = citation_schema();
    schema.edge_sets.get_mut("cites").unwrap().context.push("missing".into());
    let violations = validate::validate(&schema);
    assert_has_error(&violations, "C001");
    assert_eq!(violations[0].path, r#"edge_sets["cites"].context[0]"#);
}

#[test]
fn context_reference_without_context_is_an_error() {
    let schema = SchemaBuilder::new()
        .node_set("paper", NodeSet::default().with_context("label"))
        .unwrap()
        .build();
    assert_has_error(&validate::validate(&schema), "C001");
}

#[test]
fn undeclared_root_set() {
    let schema = SchemaBuilder::new()
        .node_set("paper", NodeSet::default())
        .unwrap()
        .info(GraphType::Full, ["author"])
        .build();
    let violations = validate::validate(&schema);
    assert_has_error(&violations, "R001");
    assert_eq!(violations[0].path, "info.root_set[0]");
}

#[test]
fn subgraph_without_root_is_only_a_warning() {
    let schema = SchemaBuilder::new()
        .node_set("paper", NodeSet::default())
        .unwrap()
        .info(GraphType::Subgraph, Vec::<String>::new())
        .build();
    let violations = validate::validate(&schema);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "R002");
    assert!(!has_errors(&violations));
}

#[test]
fn unknown_graph_type_tag() {
    let mut schema = self_citing_schema();
    schema.info.as_mut().unwrap().graph_type = 9;
    assert_has_error(&validate::validate(&schema), "R004");
}

#[test]
fn unreachable_node_set_warning() {
    let mut schema = self_citing_schema();
    schema.node_sets.insert("venue".into(), NodeSet::default());

    let violations = validate::validate(&schema);
    assert_eq!(violations.len(), 1, "{:?}", violations);
    assert_eq!(violations[0].code, "R003");
    assert_eq!(violations[0].path, r#"node_sets["venue"]"#);

    let options = ValidationOptions {
        lint_unreachable: false,
        ..Default::default()
    };
    assert!(validate::validate_with(&schema, &options).is_empty());
}

#[test]
fn validation_is_idempotent_and_sorted() {
    let mut schema = citation_schema();
    schema.edge_sets.insert("x".into(), EdgeSet::between("a", "b"));
    schema.node_sets.insert("#bad".into(), NodeSet::default());
    schema
        .node_sets
        .get_mut("paper")
        .unwrap()
        .features
        .insert("#size".into(), Feature::with_shape(DataType::Int8, &[1]));

    let first = validate::validate(&schema);
    let second = validate::validate(&schema);
    assert_eq!(first, second);

    let paths: Vec<&str> = first.iter().map(|v| v.path.as_str()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn parallel_and_sequential_agree() {
    let mut schema = citation_schema();
    schema.edge_sets.insert("x".into(), EdgeSet::between("a", "b"));
    schema.edge_sets.get_mut("cites").unwrap().context.push("nope".into());

    let sequential = ValidationOptions {
        parallel: false,
        ..Default::default()
    };
    assert_eq!(
        validate::validate(&schema),
        validate::validate_with(&schema, &sequential)
    );
}

#[test]
fn rendered_report() {
    let paper = NodeSet::default()
        .with_feature("year", Feature::with_shape(DataType::Float, &[1]))
        .unwrap();
    let schema = SchemaBuilder::new()
        .node_set("paper", paper)
        .unwrap()
        .edge_set("cites", EdgeSet::between("paper", "author"))
        .unwrap()
        .info(GraphType::Subgraph, Vec::<String>::new())
        .build();

    insta::assert_snapshot!(render(&validate::validate(&schema)), @r#"
    [ERROR E002] edge_sets["cites"].target: Target node set 'author' is not declared
    [WARNING R002] info.root_set: SUBGRAPH schema does not name a root node set
    [WARNING F004] node_sets["paper"].features["year"].shape: Shape [1] adds a redundant dimension; use an empty shape for one value per item
    "#);
}
