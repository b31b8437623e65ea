//! Visit primitives and the exhaustive child visitor
//!
//! # Architecture
//!
//! - `visit_node` / `visit_nodes`: apply a visitor to one optional child or to
//!   a child list, validating what comes back and keeping the original `Arc`
//!   whenever the visitor left it alone.
//! - `each_child`: `visit_each_child`, one match arm per node kind.
//! - `lexical`: parameter-list and function-body visiting inside a lexical
//!   environment, including parameter hoisting.
//!
//! # Pattern
//!
//! A visitor returns the node it was given to signal "unchanged". Every
//! primitive compares results with `Arc::ptr_eq()` and hands the original
//! back when nothing changed, so untouched subtrees are never rebuilt.

use std::sync::Arc;

use tracing::trace;

use super::context::TransformationContext;
use super::node::{Block, Node, NodeArray, NodeBase, NodeList, NodeTest, TextRange};
use crate::error::{Result, RewriteError};

mod each_child;
mod lexical;

pub use each_child::visit_each_child;
pub use lexical::{
    add_default_value_assignments_if_needed, visit_function_body, visit_lexical_environment,
    visit_parameter_list,
};

/// What a visitor made of one node.
#[derive(Debug, Clone)]
pub enum VisitResult {
    /// A single node; the input itself means "unchanged".
    Node(Arc<Node>),
    /// Zero or more nodes to splice in place of the input.
    Nodes(Vec<Arc<Node>>),
    /// Remove the input.
    Nothing,
}

impl VisitResult {
    pub fn unchanged(node: &Arc<Node>) -> Self {
        VisitResult::Node(Arc::clone(node))
    }

    pub fn is_unchanged(&self, original: &Arc<Node>) -> bool {
        matches!(self, VisitResult::Node(node) if Arc::ptr_eq(node, original))
    }
}

impl From<Arc<Node>> for VisitResult {
    fn from(node: Arc<Node>) -> Self {
        VisitResult::Node(node)
    }
}

impl From<Option<Arc<Node>>> for VisitResult {
    fn from(node: Option<Arc<Node>>) -> Self {
        node.map_or(VisitResult::Nothing, VisitResult::Node)
    }
}

impl From<Vec<Arc<Node>>> for VisitResult {
    fn from(nodes: Vec<Arc<Node>>) -> Self {
        VisitResult::Nodes(nodes)
    }
}

/// A visitor that needs nothing but the node.
pub trait NodeVisitor {
    fn visit(&mut self, node: &Arc<Node>) -> Result<VisitResult>;
}

impl<F> NodeVisitor for F
where
    F: FnMut(&Arc<Node>) -> Result<VisitResult>,
{
    fn visit(&mut self, node: &Arc<Node>) -> Result<VisitResult> {
        self(node)
    }
}

/// A visitor driven by `visit_each_child`, with access to the factory and
/// the lexical environment.
pub trait Visitor {
    fn visit(&mut self, node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult>;
}

impl<F> Visitor for F
where
    F: FnMut(&Arc<Node>, &mut TransformationContext) -> Result<VisitResult>,
{
    fn visit(&mut self, node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
        self(node, ctx)
    }
}

/// Binds a context-aware visitor to a context so it can be passed where a
/// plain `NodeVisitor` is expected.
pub struct WithContext<'a, V: ?Sized> {
    pub visitor: &'a mut V,
    pub ctx: &'a mut TransformationContext,
}

impl<'a, V: Visitor + ?Sized> WithContext<'a, V> {
    pub fn new(visitor: &'a mut V, ctx: &'a mut TransformationContext) -> Self {
        WithContext { visitor, ctx }
    }
}

impl<V: Visitor + ?Sized> NodeVisitor for WithContext<'_, V> {
    fn visit(&mut self, node: &Arc<Node>) -> Result<VisitResult> {
        self.visitor.visit(node, self.ctx)
    }
}

/// Collapses a node list returned for a single-node slot.
pub type Lift = fn(Vec<Arc<Node>>) -> Result<Option<Arc<Node>>>;

/// Visits an optional node.
///
/// Returns the input when either the node or the visitor is absent, or when
/// the visitor hands the node back. `Nothing` yields `None`. A list result is
/// collapsed with `lift` (default: [`extract_single_node`]). Anything new is
/// checked against `test`.
pub fn visit_node(
    node: Option<&Arc<Node>>,
    visitor: Option<&mut dyn NodeVisitor>,
    test: Option<NodeTest>,
    lift: Option<Lift>,
) -> Result<Option<Arc<Node>>> {
    let (Some(node), Some(visitor)) = (node, visitor) else {
        return Ok(node.cloned());
    };

    let visited = match visitor.visit(node)? {
        VisitResult::Node(visited) if Arc::ptr_eq(&visited, node) => return Ok(Some(visited)),
        VisitResult::Node(visited) => Some(visited),
        VisitResult::Nothing => return Ok(None),
        VisitResult::Nodes(nodes) => lift.unwrap_or(extract_single_node)(nodes)?,
    };

    if let Some(visited) = &visited {
        assert_node(visited, test)?;
    }
    Ok(visited)
}

/// Visits an optional node list, or the `start`/`count` window of it.
///
/// `start` below zero counts as zero, `count` is clamped to what remains.
/// As long as every element comes back unchanged the input list itself is
/// returned. Otherwise a new list is built: elements before the first change
/// are copied, single results are appended, list results are flattened and
/// `Nothing` is dropped. A window narrower than the input always produces a
/// new list with an unset range, keeping the trailing comma only if the
/// window reaches the last element.
pub fn visit_nodes(
    nodes: Option<&NodeList>,
    visitor: Option<&mut dyn NodeVisitor>,
    test: Option<NodeTest>,
    start: Option<isize>,
    count: Option<usize>,
) -> Result<Option<NodeList>> {
    let (Some(nodes), Some(visitor)) = (nodes, visitor) else {
        return Ok(nodes.cloned());
    };

    let length = nodes.len();
    let start = match start {
        Some(start) if start > 0 => (start as usize).min(length),
        _ => 0,
    };
    let count = count.map_or(length - start, |count| count.min(length - start));

    let mut updated: Option<Vec<Arc<Node>>> = None;
    let mut has_trailing_comma = false;
    let mut range = TextRange::UNSET;
    if start > 0 || count < length {
        updated = Some(Vec::with_capacity(count));
        has_trailing_comma = nodes.has_trailing_comma && start + count == length;
    }

    for (i, node) in nodes.iter().skip(start).take(count).enumerate() {
        let visited = visitor.visit(node)?;
        if updated.is_none() && visited.is_unchanged(node) {
            continue;
        }

        let output = updated.get_or_insert_with(|| {
            has_trailing_comma = nodes.has_trailing_comma;
            range = nodes.range;
            nodes.iter().take(i).cloned().collect()
        });
        match visited {
            VisitResult::Node(visited) => {
                assert_node(&visited, test)?;
                output.push(visited);
            }
            VisitResult::Nodes(visited) => {
                for node in visited {
                    assert_node(&node, test)?;
                    output.push(node);
                }
            }
            VisitResult::Nothing => {}
        }
    }

    let Some(elements) = updated else {
        return Ok(Some(Arc::clone(nodes)));
    };
    trace!("Rebuilt node list: {} -> {} element(s)", length, elements.len());
    let mut array = NodeArray::from_nodes(elements);
    array.has_trailing_comma = has_trailing_comma;
    array.range = range;
    Ok(Some(Arc::new(array)))
}

/// Default lift: at most one node is allowed.
pub fn extract_single_node(nodes: Vec<Arc<Node>>) -> Result<Option<Arc<Node>>> {
    if nodes.len() > 1 {
        return Err(RewriteError::TooManyNodes { count: nodes.len() });
    }
    Ok(nodes.into_iter().next())
}

/// Lift for statement slots: several statements are wrapped in a block.
pub fn lift_to_block(nodes: Vec<Arc<Node>>) -> Result<Option<Arc<Node>>> {
    for node in &nodes {
        assert_node(node, Some(NodeTest::STATEMENT))?;
    }
    if nodes.len() <= 1 {
        return Ok(nodes.into_iter().next());
    }
    Ok(Some(Arc::new(Node::Block(Block {
        base: NodeBase::synthesized(),
        statements: Arc::new(NodeArray::from_nodes(nodes)),
        multi_line: true,
    }))))
}

pub fn assert_node(node: &Arc<Node>, test: Option<NodeTest>) -> Result<()> {
    match test {
        Some(test) if !test.matches(node) => Err(RewriteError::UnexpectedNode {
            expected: test.name,
            actual: node.kind(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::factory::NodeFactory;
    use crate::ir::syntax_kind::SyntaxKind;

    fn identifiers(factory: &NodeFactory, names: &[&str]) -> NodeList {
        let nodes = names.iter().map(|name| factory.create_identifier(name)).collect();
        factory.create_node_array(nodes, true)
    }

    #[test]
    fn test_visit_node_without_visitor_is_noop() {
        let factory = NodeFactory::new();
        let x = factory.create_identifier("x");
        let visited = visit_node(Some(&x), None, Some(NodeTest::EXPRESSION), None).unwrap();
        assert!(Arc::ptr_eq(&visited.unwrap(), &x));
        assert!(visit_node(None, None, None, None).unwrap().is_none());
    }

    #[test]
    fn test_visit_node_rejects_wrong_category() {
        let factory = NodeFactory::new();
        let x = factory.create_identifier("x");
        let block = factory.create_block(vec![], false);
        let mut visitor = |_: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::Node(Arc::clone(&block))) };
        let err = visit_node(Some(&x), Some(&mut visitor), Some(NodeTest::EXPRESSION), None).unwrap_err();
        assert_eq!(
            err,
            RewriteError::UnexpectedNode { expected: "Expression", actual: SyntaxKind::Block }
        );
    }

    #[test]
    fn test_visit_node_nothing_removes() {
        let factory = NodeFactory::new();
        let x = factory.create_identifier("x");
        let mut visitor = |_: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::Nothing) };
        assert!(visit_node(Some(&x), Some(&mut visitor), None, None).unwrap().is_none());
    }

    #[test]
    fn test_lift_to_block_wraps_statements() {
        let factory = NodeFactory::new();
        let a = factory.create_return(None);
        let b = factory.create_return(None);
        let lifted = lift_to_block(vec![a, b]).unwrap().unwrap();
        assert_eq!(lifted.kind(), SyntaxKind::Block);
        assert_eq!(lifted.children().len(), 2);

        let x = factory.create_identifier("x");
        assert!(lift_to_block(vec![x]).is_err());
    }

    #[test]
    fn test_visit_nodes_clamps_window() {
        let factory = NodeFactory::new();
        let list = identifiers(&factory, &["a", "b", "c"]);
        let mut identity = |node: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::unchanged(node)) };

        let tail = visit_nodes(Some(&list), Some(&mut identity), None, Some(-4), Some(10))
            .unwrap()
            .unwrap();
        assert!(Arc::ptr_eq(&tail, &list));

        let past_end = visit_nodes(Some(&list), Some(&mut identity), None, Some(7), None)
            .unwrap()
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_visit_nodes_keeps_range_when_rebuilding_full_list() {
        let factory = NodeFactory::new();
        let list = factory.set_array_text_range(identifiers(&factory, &["a", "b"]), TextRange::new(0, 4));
        let mut drop_b = |node: &Arc<Node>| -> Result<VisitResult> {
            Ok(if node.identifier_text() == Some("b") {
                VisitResult::Nothing
            } else {
                VisitResult::unchanged(node)
            })
        };
        let visited = visit_nodes(Some(&list), Some(&mut drop_b), None, None, None)
            .unwrap()
            .unwrap();
        assert_eq!(visited.len(), 1);
        assert_eq!(visited.range, TextRange::new(0, 4));
        assert!(visited.has_trailing_comma);
    }
}
