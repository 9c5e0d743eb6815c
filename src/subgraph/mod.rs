//! Sampled subgraph records: the wire model, a builder, and a checker that
//! verifies a record against a schema.

pub mod builder;
pub mod check;
pub mod types;

pub use builder::SubgraphBuilder;
pub use check::{check_subgraph, check_subgraph_with, check_subgraphs, check_subgraphs_with};
pub use types::*;
