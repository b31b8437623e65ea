//! Rewrite errors

use thiserror::Error;

use crate::ir::syntax_kind::SyntaxKind;

pub type Result<T> = std::result::Result<T, RewriteError>;

/// Invariant violations raised while rewriting. Any of these aborts the whole
/// traversal; a failed rewrite leaves no partial tree behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("visitor produced {actual}, expected {expected}")]
    UnexpectedNode { expected: &'static str, actual: SyntaxKind },

    #[error("too many nodes written to output: {count} where at most one was expected")]
    TooManyNodes { count: usize },

    #[error("array results unsupported in in-place rewrite")]
    ArrayResultUnsupported,

    #[error("visitor removed {kind} root of an in-place rewrite")]
    RemovalUnsupported { kind: SyntaxKind },

    #[error("visitor removed required child `{field}` of {kind}")]
    MissingChild { kind: SyntaxKind, field: &'static str },

    #[error("lexical environment misuse: {0}")]
    LexicalEnvironment(String),

    #[error("cycle detected in transform pipeline at {id}")]
    PipelineCycle { id: String },

    #[error("transform {transform} removed the root node")]
    RootRemoved { transform: String },
}
