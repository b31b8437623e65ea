//! Generic child walker
//!
//! Discovers children by field name instead of by kind. Every field named in
//! [`POSSIBLE_CHILD_PROPERTIES`] that a node has (and that currently holds
//! something) is treated as a child slot. A kind that grows a child field
//! missing from the table is silently skipped here, which is why
//! `visit_each_child` is the primary traversal; the test module checks the
//! table against `NODE_SCHEMA`.
//!
//! Neither flavor mutates shared nodes. Both return the input `Arc` when
//! nothing changed and a shallow copy otherwise.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::node::{FieldMut, FieldRef, Node, NodeArray, NodeList};
use super::syntax_kind::SyntaxKind;
use super::visitor::{visit_node, visit_nodes, NodeVisitor, VisitResult};
use crate::error::{Result, RewriteError};

/// Every field name that may hold a child, in visiting order.
pub const POSSIBLE_CHILD_PROPERTIES: &[&str] = &[
    "type_arguments", "left", "right", "expression", "name",
    "constraint", "default", "decorators", "modifiers",
    "dot_dot_dot_token", "question_token", "exclamation_token",
    "ty", "initializer", "type_parameters", "parameters",
    "declarations", "asterisk_token", "body", "asserts_modifier",
    "parameter_name", "type_name", "expr_name", "members",
    "heritage_clauses", "element_type", "elements", "literal",
    "declaration_list", "types", "check_type", "extends_type",
    "true_type", "false_type", "type_parameter", "argument",
    "qualifier", "object_type", "index_type", "readonly_token",
    "property_name", "properties", "question_dot_token",
    "argument_expression", "arguments", "tag", "template",
    "equals_greater_than_token", "operand", "operator_token",
    "condition", "when_true", "colon_token", "when_false",
    "head", "template_spans", "statements", "then_statement",
    "else_statement", "statement", "incrementor", "await_modifier",
    "label", "case_block", "try_block", "catch_clause", "finally_block",
    "clauses", "module_reference", "import_clause", "module_specifier",
    "named_bindings", "export_clause", "opening_element",
    "children", "closing_element", "tag_name", "attributes",
    "opening_fragment", "closing_fragment", "variable_declaration",
    "block", "object_assignment_initializer",
];

enum Replacement {
    Node(Option<Arc<Node>>),
    List(NodeList),
}

/// Runs `visit` over every discovered child slot and copies the node once,
/// on the first slot that comes back replaced.
fn rebuild_children(
    node: &Arc<Node>,
    mut visit: impl FnMut(&'static str, FieldRef<'_>) -> Result<Option<Replacement>>,
) -> Result<Arc<Node>> {
    let mut updated: Option<Node> = None;
    for &name in POSSIBLE_CHILD_PROPERTIES {
        let Some(field) = node.field(name) else {
            continue;
        };
        let Some(replacement) = visit(name, field)? else {
            continue;
        };
        let target = updated.get_or_insert_with(|| (**node).clone());
        write_field(target, name, replacement)?;
    }

    match updated {
        Some(updated) => {
            debug!("Walker rebuilt {} node", updated.kind());
            Ok(Arc::new(updated))
        }
        None => Ok(Arc::clone(node)),
    }
}

fn write_field(target: &mut Node, name: &'static str, replacement: Replacement) -> Result<()> {
    let kind = target.kind();
    match (target.field_mut(name), replacement) {
        (Some(FieldMut::Node(slot)), Replacement::Node(Some(child))) => *slot = child,
        (Some(FieldMut::Node(_)), Replacement::Node(None)) => {
            return Err(RewriteError::MissingChild { kind, field: name });
        }
        (Some(FieldMut::OptionalNode(slot)), Replacement::Node(child)) => *slot = child,
        (Some(FieldMut::List(slot)), Replacement::List(list)) => *slot = list,
        (Some(FieldMut::OptionalList(slot)), Replacement::List(list)) => *slot = Some(list),
        // Replacements mirror the shape of the field they were read from.
        _ => {}
    }
    Ok(())
}

/// Functional flavor: replaces every discovered child with what `visitor`
/// makes of it.
///
/// A single-child slot follows `visit_node` (a list result must hold at most
/// one node, `Nothing` clears an optional slot and is an error on a required
/// one). A list slot follows `visit_nodes`, so list results are spliced in.
/// The copy keeps the node's range and flags.
pub fn map_children(node: &Arc<Node>, visitor: &mut dyn NodeVisitor) -> Result<Arc<Node>> {
    rebuild_children(node, |_, field| match field {
        FieldRef::Node(child) => {
            let visited = visit_node(Some(child), Some(&mut *visitor), None, None)?;
            Ok(match visited {
                Some(visited) if Arc::ptr_eq(&visited, child) => None,
                visited => Some(Replacement::Node(visited)),
            })
        }
        FieldRef::List(list) => {
            let visited = visit_nodes(Some(list), Some(&mut *visitor), None, None, None)?;
            Ok(match visited {
                Some(visited) if !Arc::ptr_eq(&visited, list) => Some(Replacement::List(visited)),
                _ => None,
            })
        }
    })
}

/// Replaces `node` with the visitor's single-node result. The replacement
/// takes over the range and flags of `node`.
///
/// Callers must use the returned node; the original is never modified.
pub fn rewrite_node(node: &Arc<Node>, visitor: &mut dyn NodeVisitor) -> Result<Arc<Node>> {
    match visitor.visit(node)? {
        VisitResult::Node(replacement) if Arc::ptr_eq(&replacement, node) => Ok(replacement),
        VisitResult::Node(mut replacement) => {
            if replacement.base() != node.base() {
                *Arc::make_mut(&mut replacement).base_mut() = *node.base();
            }
            Ok(replacement)
        }
        VisitResult::Nodes(_) => Err(RewriteError::ArrayResultUnsupported),
        VisitResult::Nothing => Err(RewriteError::RemovalUnsupported { kind: node.kind() }),
    }
}

/// In-place flavor: runs [`rewrite_node`] on every discovered child,
/// element by element for lists.
pub fn rewrite_children(node: &Arc<Node>, visitor: &mut dyn NodeVisitor) -> Result<Arc<Node>> {
    rebuild_children(node, |_, field| match field {
        FieldRef::Node(child) => {
            let rewritten = rewrite_node(child, &mut *visitor)?;
            Ok((!Arc::ptr_eq(&rewritten, child)).then(|| Replacement::Node(Some(rewritten))))
        }
        FieldRef::List(list) => {
            let mut elements: Option<Vec<Arc<Node>>> = None;
            for (i, element) in list.iter().enumerate() {
                let rewritten = rewrite_node(element, &mut *visitor)?;
                if elements.is_some() || !Arc::ptr_eq(&rewritten, element) {
                    elements
                        .get_or_insert_with(|| list.iter().take(i).cloned().collect())
                        .push(rewritten);
                }
            }
            Ok(elements.map(|elements| {
                let mut array = NodeArray::from_nodes(elements);
                array.has_trailing_comma = list.has_trailing_comma;
                array.range = list.range;
                Replacement::List(Arc::new(array))
            }))
        }
    })
}

/// Counts the nodes of each kind under `root`, `root` included.
pub fn count_kinds(root: &Arc<Node>) -> Result<BTreeMap<SyntaxKind, usize>> {
    fn count(node: &Arc<Node>, counts: &mut BTreeMap<SyntaxKind, usize>) -> Result<()> {
        *counts.entry(node.kind()).or_default() += 1;
        let mut visitor = |child: &Arc<Node>| -> Result<VisitResult> {
            count(child, counts)?;
            Ok(VisitResult::unchanged(child))
        };
        map_children(node, &mut visitor)?;
        Ok(())
    }

    let mut counts = BTreeMap::new();
    count(root, &mut counts)?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::factory::NodeFactory;
    use crate::ir::node::{NODE_SCHEMA, TextRange};

    #[test]
    fn test_table_covers_every_schema_child_field() {
        for (kind, fields) in NODE_SCHEMA {
            for (name, is_child) in fields.iter() {
                if *is_child {
                    assert!(
                        POSSIBLE_CHILD_PROPERTIES.contains(name),
                        "{kind}.{name} is missing from POSSIBLE_CHILD_PROPERTIES"
                    );
                }
            }
        }
    }

    #[test]
    fn test_map_children_keeps_node_when_unchanged() {
        let factory = NodeFactory::new();
        let call = factory.create_call(
            factory.create_identifier("f"),
            vec![factory.create_identifier("a"), factory.create_identifier("b")],
        );
        let mut identity = |node: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::unchanged(node)) };
        let mapped = map_children(&call, &mut identity).unwrap();
        assert!(Arc::ptr_eq(&mapped, &call));
    }

    #[test]
    fn test_map_children_splices_lists() {
        let factory = NodeFactory::new();
        let a = factory.create_identifier("a");
        let call = factory.create_call(factory.create_identifier("f"), vec![Arc::clone(&a)]);
        let mut twice = |node: &Arc<Node>| -> Result<VisitResult> {
            Ok(match node.identifier_text() {
                Some("a") => VisitResult::Nodes(vec![Arc::clone(node), Arc::clone(node)]),
                _ => VisitResult::unchanged(node),
            })
        };
        let mapped = map_children(&call, &mut twice).unwrap();
        let Node::CallExpression(data) = &*mapped else { panic!("expected call") };
        assert_eq!(data.arguments.len(), 2);
        assert_eq!(mapped.range(), call.range());
        assert_eq!(mapped.flags(), call.flags());
    }

    #[test]
    fn test_rewrite_node_transfers_metadata() {
        let factory = NodeFactory::new();
        let original = factory.set_text_range(factory.create_identifier("x"), TextRange::new(3, 4));
        let mut replace = |_: &Arc<Node>| -> Result<VisitResult> {
            Ok(VisitResult::Node(NodeFactory::new().create_identifier("y")))
        };
        let rewritten = rewrite_node(&original, &mut replace).unwrap();
        assert_eq!(rewritten.identifier_text(), Some("y"));
        assert_eq!(rewritten.range(), TextRange::new(3, 4));
        assert_eq!(original.identifier_text(), Some("x"));
    }

    #[test]
    fn test_rewrite_node_rejects_lists() {
        let factory = NodeFactory::new();
        let x = factory.create_identifier("x");
        let mut split = |node: &Arc<Node>| -> Result<VisitResult> {
            Ok(VisitResult::Nodes(vec![Arc::clone(node), Arc::clone(node)]))
        };
        assert_eq!(rewrite_node(&x, &mut split).unwrap_err(), RewriteError::ArrayResultUnsupported);
    }

    #[test]
    fn test_count_kinds() {
        let factory = NodeFactory::new();
        let sum = factory.create_binary_op(
            factory.create_identifier("a"),
            SyntaxKind::PlusToken,
            factory.create_identifier("b"),
        );
        let statement = factory.create_expression_statement(sum);
        let counts = count_kinds(&statement).unwrap();
        assert_eq!(counts[&SyntaxKind::ExpressionStatement], 1);
        assert_eq!(counts[&SyntaxKind::BinaryExpression], 1);
        assert_eq!(counts[&SyntaxKind::Identifier], 2);
        assert_eq!(counts[&SyntaxKind::PlusToken], 1);
    }
}
