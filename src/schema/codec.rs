//! JSON and binary codecs for schemas and subgraph records.

use prost::Message;

use super::types::Schema;
use crate::error::SchemaError;
use crate::subgraph::Subgraph;

/// Deserialize a schema from its JSON form.
pub fn parse_schema(json: &str) -> Result<Schema, SchemaError> {
    Ok(serde_json::from_str::<Schema>(json)?)
}

pub fn schema_to_json(schema: &Schema) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(schema)?)
}

pub fn encode_schema(schema: &Schema) -> Vec<u8> {
    schema.encode_to_vec()
}

pub fn decode_schema(bytes: &[u8]) -> Result<Schema, SchemaError> {
    Ok(Schema::decode(bytes)?)
}

pub fn parse_subgraph(json: &str) -> Result<Subgraph, SchemaError> {
    Ok(serde_json::from_str::<Subgraph>(json)?)
}

pub fn subgraph_to_json(subgraph: &Subgraph) -> Result<String, SchemaError> {
    Ok(serde_json::to_string_pretty(subgraph)?)
}

pub fn encode_subgraph(subgraph: &Subgraph) -> Vec<u8> {
    subgraph.encode_to_vec()
}

pub fn decode_subgraph(bytes: &[u8]) -> Result<Subgraph, SchemaError> {
    Ok(Subgraph::decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_is_a_hard_failure() {
        assert!(matches!(parse_schema("not json"), Err(SchemaError::Json(_))));
    }

    #[test]
    fn truncated_bytes_are_a_hard_failure() {
        // Field 2 (node_sets), length-delimited, claims 10 bytes but has none.
        assert!(matches!(decode_schema(&[0x12, 0x0a]), Err(SchemaError::Decode(_))));
    }

    #[test]
    fn duplicate_json_keys_are_rejected() {
        let json = r#"{"node_sets": {"paper": {}, "paper": {}}}"#;
        let err = parse_schema(json).unwrap_err();
        assert!(err.to_string().contains("duplicate key 'paper'"), "{}", err);
    }

    #[test]
    fn unknown_dtype_tag_survives_json() {
        let json = r#"{"context": {"features": {"f": {"dtype": 42}}}}"#;
        let schema = parse_schema(json).unwrap();
        assert_eq!(schema.context.unwrap().features["f"].dtype, 42);
    }

    #[test]
    fn dtype_names_are_used_in_json() {
        let json = r#"{"node_sets": {"paper": {"features": {"year": {"dtype": "DT_INT64"}}}}}"#;
        let schema = parse_schema(json).unwrap();
        let out = schema_to_json(&schema).unwrap();
        assert!(out.contains("\"DT_INT64\""), "{}", out);
    }
}
