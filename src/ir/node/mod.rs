// Syntax tree node model
//
// - node_types: payload structs, the Node enum and the per-kind field schema
// - node_array: NodeArray, the persistent child sequence
// - node_impl: convenience queries on Node
// - predicates: kind classification and named NodeTests

pub mod node_array;
pub mod node_impl;
pub mod node_types;
pub mod predicates;

pub use node_array::{NodeArray, NodeList, NodeVector};
pub use node_types::*;
pub use predicates::NodeTest;
