use std::sync::Arc;

use super::node_types::{Node, NodeData, NodeFlags, TextRange};
use crate::ir::syntax_kind::SyntaxKind;

impl Node {
    pub fn range(&self) -> TextRange {
        self.base().range
    }

    pub fn flags(&self) -> NodeFlags {
        self.base().flags
    }

    pub fn is_token(&self) -> bool {
        self.kind().is_token()
    }

    /// Downcasts to a payload struct.
    pub fn cast<T: NodeData>(&self) -> Option<&T> {
        T::from_node(self)
    }

    pub fn identifier_text(&self) -> Option<&str> {
        match self {
            Node::Identifier(identifier) => Some(&identifier.text),
            _ => None,
        }
    }

    /// Property access, element access, call or non-null assertion that sits
    /// inside an optional chain (`a?.b`, `a?.[0]`, `a?.()`, `a?.b!`).
    pub fn is_optional_chain(&self) -> bool {
        self.flags().contains(NodeFlags::OPTIONAL_CHAIN)
            && matches!(
                self,
                Node::PropertyAccessExpression(_)
                    | Node::ElementAccessExpression(_)
                    | Node::CallExpression(_)
                    | Node::NonNullExpression(_)
            )
    }

    /// `"use strict";` and friends: an expression statement whose expression is
    /// a bare string literal.
    pub fn is_prologue_directive(&self) -> bool {
        match self {
            Node::ExpressionStatement(statement) => matches!(
                &*statement.expression,
                Node::Literal(literal) if literal.kind == SyntaxKind::StringLiteral
            ),
            _ => false,
        }
    }

    pub fn is_use_strict_directive(&self) -> bool {
        match self {
            Node::ExpressionStatement(statement) => matches!(
                &*statement.expression,
                Node::Literal(literal)
                    if literal.kind == SyntaxKind::StringLiteral && literal.text == "use strict"
            ),
            _ => false,
        }
    }

    /// Counts this node and all of its descendants.
    pub fn subtree_size(&self) -> usize {
        let mut size = 1;
        self.for_each_child(|child| size += child.subtree_size());
        size
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> Vec<Arc<Node>> {
        let mut children = Vec::new();
        self.for_each_child(|child| children.push(Arc::clone(child)));
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::factory::NodeFactory;

    #[test]
    fn test_prologue_directive_detection() {
        let factory = NodeFactory::new();
        let directive = factory.create_use_strict_prologue();
        let other = factory.create_string_literal("use asm");
        let other = factory.create_expression_statement(other);
        let call_target = factory.create_identifier("f");
        let call = factory.create_call(call_target, vec![]);
        let call = factory.create_expression_statement(call);

        assert!(directive.is_prologue_directive());
        assert!(directive.is_use_strict_directive());
        assert!(other.is_prologue_directive());
        assert!(!other.is_use_strict_directive());
        assert!(!call.is_prologue_directive());
    }

    #[test]
    fn test_subtree_size_counts_every_node() {
        let factory = NodeFactory::new();
        let a = factory.create_identifier("a");
        let b = factory.create_identifier("b");
        let sum = factory.create_binary_op(a, SyntaxKind::PlusToken, b);
        // binary, left, operator token, right
        assert_eq!(sum.subtree_size(), 4);
        assert_eq!(sum.children().len(), 3);
    }
}
