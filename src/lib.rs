pub mod error;
pub mod resolve;
pub mod schema;
pub mod subgraph;
pub mod validate;
pub mod values;
pub mod wasm;
