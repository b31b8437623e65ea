pub mod context;
pub mod factory;
pub mod node;
pub mod pipeline;
pub mod syntax_kind;
pub mod visitor;
pub mod walker;
