//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::SchemaError;
use crate::validate::Violation;

/// Validate a schema JSON.
/// Returns `{status: "report", violations: [...]}` or `{status: "failure", message}`.
#[wasm_bindgen]
pub fn validate_schema(json: &str) -> JsValue {
    let result = match crate::schema::parse_schema(json) {
        Ok(schema) => ReportDto::Report {
            violations: crate::validate::validate(&schema)
                .into_iter()
                .map(ViolationDto::from)
                .collect(),
        },
        Err(e) => ReportDto::from(e),
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Check a subgraph record JSON against a schema JSON.
#[wasm_bindgen]
pub fn check_subgraph(schema_json: &str, subgraph_json: &str) -> JsValue {
    let result = check_subgraph_inner(schema_json, subgraph_json).unwrap_or_else(ReportDto::from);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn check_subgraph_inner(schema_json: &str, subgraph_json: &str) -> Result<ReportDto, SchemaError> {
    let schema = crate::schema::parse_schema(schema_json)?;
    let subgraph = crate::schema::parse_subgraph(subgraph_json)?;
    let violations = crate::subgraph::check_subgraph(&schema, &subgraph);
    Ok(ReportDto::Report {
        violations: violations.into_iter().map(ViolationDto::from).collect(),
    })
}

/// Resolve a schema JSON into its graph tensor spec.
/// Returns `{status: "resolved", spec}` or a failure carrying the violations.
#[wasm_bindgen]
pub fn resolve_schema(json: &str) -> JsValue {
    let result = crate::schema::parse_schema(json)
        .and_then(|schema| crate::resolve::resolve(&schema))
        .map(|spec| ReportDto::Resolved { spec })
        .unwrap_or_else(ReportDto::from);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
struct ViolationDto {
    code: String,
    severity: String,
    path: String,
    message: String,
}

impl From<Violation> for ViolationDto {
    fn from(v: Violation) -> Self {
        ViolationDto {
            code: v.code.to_string(),
            severity: v.severity.to_string(),
            path: v.path,
            message: v.message,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "status")]
enum ReportDto {
    #[serde(rename = "report")]
    Report { violations: Vec<ViolationDto> },
    #[serde(rename = "resolved")]
    Resolved { spec: crate::resolve::GraphSpec },
    #[serde(rename = "failure")]
    Failure {
        message: String,
        violations: Vec<ViolationDto>,
    },
}

impl From<SchemaError> for ReportDto {
    fn from(e: SchemaError) -> Self {
        let message = e.to_string();
        let violations = match e {
            SchemaError::Invalid(v) => v.into_iter().map(ViolationDto::from).collect(),
            _ => vec![],
        };
        ReportDto::Failure { message, violations }
    }
}
