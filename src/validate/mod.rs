//! Schema validation.
//!
//! Checks a parsed `Schema` for internal consistency and returns every
//! finding as a `Violation`. Validation never mutates the schema and never
//! fails: malformed content always shows up as at least one ERROR entry.

pub mod collection;
pub mod feature;
pub mod options;
pub mod structural;

pub use options::ValidationOptions;

use rayon::prelude::*;
use serde::Serialize;

use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The schema or record cannot be used.
    Error,
    /// Probably unintended, never blocks use.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: &'static str,
    pub severity: Severity,
    /// Location inside the checked message, e.g. `edge_sets["cites"].target`.
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}] {}: {}",
            self.severity, self.code, self.path, self.message
        )
    }
}

impl Violation {
    pub fn error(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Violation {
            code,
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        code: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Violation {
            code,
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// `prefix["key"]`, with `"` and `\` in the key backslash-escaped.
pub(crate) fn keyed(prefix: &str, key: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + key.len() + 4);
    path.push_str(prefix);
    path.push_str("[\"");
    for c in key.chars() {
        if c == '"' || c == '\\' {
            path.push('\\');
        }
        path.push(c);
    }
    path.push_str("\"]");
    path
}

/// True if any entry makes the checked value unusable.
pub fn has_errors(violations: &[Violation]) -> bool {
    violations.iter().any(Violation::is_error)
}

/// Order by path, then code, so reports are reproducible and diffable.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then_with(|| a.code.cmp(b.code))
            .then_with(|| a.message.cmp(&b.message))
    });
}

/// Validate a schema with default options.
pub fn validate(schema: &Schema) -> Vec<Violation> {
    validate_with(schema, &ValidationOptions::default())
}

/// Validate a schema. Returns all findings, sorted by path.
pub fn validate_with(schema: &Schema, options: &ValidationOptions) -> Vec<Violation> {
    let mut violations = structural::validate_set_names(schema);

    if let Some(context) = &schema.context {
        violations.extend(collection::validate_context(context, options));
    }

    // Sets only read each other through name lookups into `schema`.
    if options.parallel {
        violations.par_extend(schema.node_sets.par_iter().flat_map_iter(|(name, node_set)| {
            collection::validate_node_set(name, node_set, schema, options)
        }));
        violations.par_extend(schema.edge_sets.par_iter().flat_map_iter(|(name, edge_set)| {
            collection::validate_edge_set(name, edge_set, schema, options)
        }));
    } else {
        for (name, node_set) in &schema.node_sets {
            violations.extend(collection::validate_node_set(name, node_set, schema, options));
        }
        for (name, edge_set) in &schema.edge_sets {
            violations.extend(collection::validate_edge_set(name, edge_set, schema, options));
        }
    }

    violations.extend(structural::validate_origin_info(schema, options));

    sort_violations(&mut violations);
    log::debug!(
        "validated schema ({} node sets, {} edge sets): {} violation(s)",
        schema.node_sets.len(),
        schema.edge_sets.len(),
        violations.len()
    );
    violations
}
