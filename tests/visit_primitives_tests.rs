//! Tests for `visit_node` / `visit_nodes` and statement lifting

use std::sync::Arc;

use syntax_rewriter::error::{Result, RewriteError};
use syntax_rewriter::ir::context::TransformationContext;
use syntax_rewriter::ir::factory::NodeFactory;
use syntax_rewriter::ir::node::{Node, NodeList, NodeTest, TextRange};
use syntax_rewriter::ir::syntax_kind::SyntaxKind;
use syntax_rewriter::ir::visitor::{
    extract_single_node, lift_to_block, visit_each_child, visit_node, visit_nodes, VisitResult,
};

fn names(list: &NodeList) -> Vec<String> {
    list.iter()
        .map(|node| node.identifier_text().unwrap_or("?").to_string())
        .collect()
}

fn abc(factory: &NodeFactory) -> NodeList {
    let list = factory.create_node_array(
        vec![
            factory.create_identifier("a"),
            factory.create_identifier("b"),
            factory.create_identifier("c"),
        ],
        true,
    );
    factory.set_array_text_range(list, TextRange::new(10, 20))
}

#[test]
fn test_full_range_identity_returns_same_list() {
    let factory = NodeFactory::new();
    let list = abc(&factory);
    let mut identity = |node: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::unchanged(node)) };
    let visited = visit_nodes(Some(&list), Some(&mut identity), Some(NodeTest::EXPRESSION), None, None)
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&visited, &list));
}

#[test]
fn test_missing_list_or_visitor_passes_through() {
    let factory = NodeFactory::new();
    let list = abc(&factory);
    let visited = visit_nodes(Some(&list), None, None, None, None).unwrap().unwrap();
    assert!(Arc::ptr_eq(&visited, &list));

    let mut identity = |node: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::unchanged(node)) };
    assert!(visit_nodes(None, Some(&mut identity), None, None, None).unwrap().is_none());
}

#[test]
fn test_sub_range_builds_new_list() {
    let factory = NodeFactory::new();
    let list = abc(&factory);
    let mut identity = |node: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::unchanged(node)) };

    let middle = visit_nodes(Some(&list), Some(&mut identity), None, Some(1), Some(1))
        .unwrap()
        .unwrap();
    assert!(!Arc::ptr_eq(&middle, &list));
    assert_eq!(names(&middle), vec!["b"]);
    assert!(Arc::ptr_eq(middle.first().unwrap(), list.get(1).unwrap()));
    assert!(middle.range.is_unset());
    assert!(!middle.has_trailing_comma, "window stops before the end");

    let tail = visit_nodes(Some(&list), Some(&mut identity), None, Some(1), None)
        .unwrap()
        .unwrap();
    assert_eq!(names(&tail), vec!["b", "c"]);
    assert!(tail.has_trailing_comma, "window reaches the end");
}

#[test]
fn test_splice_and_remove() {
    let factory = NodeFactory::new();
    let list = abc(&factory);
    let mut visitor = |node: &Arc<Node>| -> Result<VisitResult> {
        Ok(match node.identifier_text() {
            Some("a") => VisitResult::Nothing,
            Some("b") => VisitResult::Nodes(vec![
                NodeFactory::new().create_identifier("b1"),
                NodeFactory::new().create_identifier("b2"),
            ]),
            _ => VisitResult::unchanged(node),
        })
    };
    let visited = visit_nodes(Some(&list), Some(&mut visitor), Some(NodeTest::EXPRESSION), None, None)
        .unwrap()
        .unwrap();
    assert_eq!(names(&visited), vec!["b1", "b2", "c"]);
    assert!(Arc::ptr_eq(visited.last().unwrap(), list.last().unwrap()));
    assert_eq!(visited.range, TextRange::new(10, 20));
    assert!(visited.has_trailing_comma);
}

#[test]
fn test_spliced_elements_are_tested() {
    let factory = NodeFactory::new();
    let list = abc(&factory);
    let mut visitor = |node: &Arc<Node>| -> Result<VisitResult> {
        Ok(match node.identifier_text() {
            Some("c") => VisitResult::Nodes(vec![NodeFactory::new().create_return(None)]),
            _ => VisitResult::unchanged(node),
        })
    };
    let err = visit_nodes(Some(&list), Some(&mut visitor), Some(NodeTest::EXPRESSION), None, None).unwrap_err();
    assert_eq!(
        err,
        RewriteError::UnexpectedNode { expected: "Expression", actual: SyntaxKind::ReturnStatement }
    );
}

#[test]
fn test_single_slot_list_results() {
    let factory = NodeFactory::new();
    let x = factory.create_identifier("x");

    let mut one = |_: &Arc<Node>| -> Result<VisitResult> {
        Ok(VisitResult::Nodes(vec![NodeFactory::new().create_identifier("y")]))
    };
    let visited = visit_node(Some(&x), Some(&mut one), Some(NodeTest::EXPRESSION), None).unwrap();
    assert_eq!(visited.unwrap().identifier_text(), Some("y"));

    let mut none = |_: &Arc<Node>| -> Result<VisitResult> { Ok(VisitResult::Nodes(vec![])) };
    assert!(visit_node(Some(&x), Some(&mut none), None, None).unwrap().is_none());

    let mut two = |node: &Arc<Node>| -> Result<VisitResult> {
        Ok(VisitResult::Nodes(vec![Arc::clone(node), Arc::clone(node)]))
    };
    let err = visit_node(Some(&x), Some(&mut two), None, Some(extract_single_node)).unwrap_err();
    assert_eq!(err, RewriteError::TooManyNodes { count: 2 });
}

#[test]
fn test_lift_to_block_in_statement_slot() {
    let factory = NodeFactory::new();
    let ret = factory.create_return(None);
    let empty_block = factory.create_block(vec![], false);
    let mut visitor = |node: &Arc<Node>| -> Result<VisitResult> {
        Ok(match node.kind() {
            SyntaxKind::ReturnStatement => VisitResult::Nodes(vec![Arc::clone(node), Arc::clone(&empty_block)]),
            _ => VisitResult::unchanged(node),
        })
    };
    let lifted = visit_node(Some(&ret), Some(&mut visitor), Some(NodeTest::STATEMENT), Some(lift_to_block))
        .unwrap()
        .unwrap();
    assert_eq!(lifted.kind(), SyntaxKind::Block);
    let children = lifted.children();
    assert_eq!(children.len(), 2);
    assert!(Arc::ptr_eq(&children[0], &ret));
}

#[test]
fn test_visitor_errors_propagate_through_each_child() {
    fn fail_on_y(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
        if node.identifier_text() == Some("y") {
            return Err(RewriteError::TooManyNodes { count: 99 });
        }
        visit_each_child(node, &mut fail_on_y, ctx).map(VisitResult::Node)
    }

    let factory = NodeFactory::new();
    let call = factory.create_call(
        factory.create_identifier("f"),
        vec![factory.create_identifier("x"), factory.create_identifier("y")],
    );
    let mut ctx = TransformationContext::default();
    let err = visit_each_child(&call, &mut fail_on_y, &mut ctx).unwrap_err();
    assert_eq!(err, RewriteError::TooManyNodes { count: 99 });
}
