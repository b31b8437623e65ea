//! End-to-end rewrite: arithmetic operators become helper calls.
//!
//! `a + b * c` turns into `op_plus(a, op_times(b, c))`. Leaves and untouched
//! statements must come out as the very same nodes that went in.

use std::sync::{Arc, Mutex};

use indoc::indoc;
use syntax_rewriter::error::Result;
use syntax_rewriter::ir::context::TransformationContext;
use syntax_rewriter::ir::node::{CallExpression, ExpressionStatement, Node, SourceFile};
use syntax_rewriter::ir::pipeline::{Pipeline, Transform};
use syntax_rewriter::ir::syntax_kind::SyntaxKind;
use syntax_rewriter::ir::visitor::{visit_each_child, VisitResult};
use syntax_rewriter::ir::walker::count_kinds;
use tracing::debug;

const SOURCE: &str = indoc! {r#"
    {"SourceFile": {"file_name": "ops.ts", "statements": [
        {"ExpressionStatement": {"expression": {"BinaryExpression": {
            "left": {"Identifier": {"text": "a"}},
            "operator_token": {"Token": {"kind": "PlusToken"}},
            "right": {"BinaryExpression": {
                "left": {"Identifier": {"text": "b"}},
                "operator_token": {"Token": {"kind": "AsteriskToken"}},
                "right": {"Identifier": {"text": "c"}}
            }}
        }}}},
        {"ExpressionStatement": {"expression": {"BinaryExpression": {
            "left": {"Identifier": {"text": "a"}},
            "operator_token": {"Token": {"kind": "LessThanToken"}},
            "right": {"Literal": {"kind": "NumericLiteral", "text": "10"}}
        }}}}
    ]}}
"#};

fn operator_to_call(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
    let visited = visit_each_child(node, &mut operator_to_call, ctx)?;
    let Node::BinaryExpression(data) = &*visited else {
        return Ok(VisitResult::Node(visited));
    };
    let helper = match data.operator_token.kind() {
        SyntaxKind::PlusToken => "op_plus",
        SyntaxKind::MinusToken => "op_minus",
        SyntaxKind::AsteriskToken => "op_times",
        _ => return Ok(VisitResult::Node(visited)),
    };
    debug!("Rewriting {} into {}()", data.operator_token.kind(), helper);
    let callee = ctx.factory.create_identifier(helper);
    let call = ctx
        .factory
        .create_call(callee, vec![Arc::clone(&data.left), Arc::clone(&data.right)]);
    Ok(VisitResult::Node(call))
}

fn parse(source: &str) -> Arc<Node> {
    Arc::new(serde_json::from_str::<Node>(source).expect("valid tree"))
}

fn statements(file: &Arc<Node>) -> Vec<Arc<Node>> {
    file.cast::<SourceFile>().expect("source file").statements.to_vec()
}

fn expression(statement: &Arc<Node>) -> Arc<Node> {
    Arc::clone(&statement.cast::<ExpressionStatement>().expect("expression statement").expression)
}

fn call_parts(node: &Arc<Node>) -> (String, Vec<Arc<Node>>) {
    let call = node.cast::<CallExpression>().expect("call expression");
    let callee = call.expression.identifier_text().unwrap_or_default().to_string();
    (callee, call.arguments.to_vec())
}

#[test]
fn test_operators_become_calls() {
    let tree = parse(SOURCE);
    let mut pipeline = Pipeline::default();
    pipeline.add_transform(Transform::rewrite("operator-to-call", &[], operator_to_call));
    let result = pipeline.apply(&tree).unwrap();
    assert!(!Arc::ptr_eq(&result, &tree));

    let before = statements(&tree);
    let after = statements(&result);

    let (outer, outer_args) = call_parts(&expression(&after[0]));
    assert_eq!(outer, "op_plus");
    let (inner, inner_args) = call_parts(&outer_args[1]);
    assert_eq!(inner, "op_times");

    // The leaves are the parsed identifiers themselves.
    let Node::BinaryExpression(sum) = &*expression(&before[0]) else { panic!("expected sum") };
    let Node::BinaryExpression(product) = &*sum.right else { panic!("expected product") };
    assert!(Arc::ptr_eq(&outer_args[0], &sum.left));
    assert!(Arc::ptr_eq(&inner_args[0], &product.left));
    assert!(Arc::ptr_eq(&inner_args[1], &product.right));

    // `a < 10` has no helper and is not rebuilt.
    assert!(Arc::ptr_eq(&after[1], &before[1]));
}

#[test]
fn test_rewritten_tree_keeps_file_metadata() {
    let tree = parse(SOURCE);
    let mut pipeline = Pipeline::default();
    pipeline.add_transform(Transform::rewrite("operator-to-call", &[], operator_to_call));
    let result = pipeline.apply(&tree).unwrap();

    let file = result.cast::<SourceFile>().unwrap();
    assert_eq!(file.file_name, "ops.ts");
    assert_eq!(result.range(), tree.range());
}

#[test]
fn test_second_run_is_a_no_op() {
    let tree = parse(SOURCE);
    let mut pipeline = Pipeline::default();
    pipeline.add_transform(Transform::rewrite("operator-to-call", &[], operator_to_call));
    let once = pipeline.apply(&tree).unwrap();
    let twice = pipeline.apply(&once).unwrap();
    assert!(Arc::ptr_eq(&once, &twice));
}

#[test]
fn test_observer_counts_after_rewrite() {
    let counts = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&counts);

    let mut pipeline = Pipeline::default();
    pipeline.add_transform(Transform::observe("count", &["operator-to-call"], move |root| {
        let kinds = count_kinds(root)?;
        let calls = kinds.get(&SyntaxKind::CallExpression).copied().unwrap_or(0);
        let binaries = kinds.get(&SyntaxKind::BinaryExpression).copied().unwrap_or(0);
        sink.lock().unwrap().push((calls, binaries));
        Ok(())
    }));
    pipeline.add_transform(Transform::rewrite("operator-to-call", &[], operator_to_call));
    assert_eq!(pipeline.order().unwrap(), vec!["operator-to-call", "count"]);

    pipeline.apply(&parse(SOURCE)).unwrap();
    assert_eq!(*counts.lock().unwrap(), vec![(2, 1)]);
}

#[test]
fn test_result_serializes_back_to_json() {
    let tree = parse(SOURCE);
    let mut pipeline = Pipeline::default();
    pipeline.add_transform(Transform::rewrite("operator-to-call", &[], operator_to_call));
    let result = pipeline.apply(&tree).unwrap();

    let json = serde_json::to_value(&*result).unwrap();
    let callee = &json["SourceFile"]["statements"][0]["ExpressionStatement"]["expression"]["CallExpression"]
        ["expression"]["Identifier"]["text"];
    assert_eq!(callee, "op_plus");

    let reparsed: Node = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed.subtree_size(), result.subtree_size());
}
