//! Benchmarks for tree rewriting
//!
//! Measures performance of:
//! - Identity traversal with `visit_each_child` (nothing rebuilt)
//! - Generic walker traversal with `map_children`
//! - Rewrites that rebuild a path to every changed leaf
//! - Parameter hoisting over many functions
//! - JSON deserialization of a syntax tree

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use std::time::Duration;

use syntax_rewriter::config::{ParameterHoisting, RewriteOptions};
use syntax_rewriter::error::Result;
use syntax_rewriter::ir::context::TransformationContext;
use syntax_rewriter::ir::factory::NodeFactory;
use syntax_rewriter::ir::node::Node;
use syntax_rewriter::ir::syntax_kind::SyntaxKind;
use syntax_rewriter::ir::visitor::{visit_each_child, VisitResult};
use syntax_rewriter::ir::walker::map_children;

// ============================================================================
// Sample trees
// ============================================================================

/// `a0 + a1 + ...` nested to the right, `depth` operators deep.
fn nested_sum(factory: &NodeFactory, depth: usize) -> Arc<Node> {
    let mut expression = factory.create_identifier(&format!("a{depth}"));
    for i in (0..depth).rev() {
        expression = factory.create_binary_op(
            factory.create_identifier(&format!("a{i}")),
            SyntaxKind::PlusToken,
            expression,
        );
    }
    expression
}

/// `count` statements of the form `f(x, y + 1);`
fn wide_file(factory: &NodeFactory, count: usize) -> Arc<Node> {
    let statements = (0..count)
        .map(|_| {
            let sum = factory.create_binary_op(
                factory.create_identifier("y"),
                SyntaxKind::PlusToken,
                factory.create_numeric_literal("1"),
            );
            let call = factory.create_call(factory.create_identifier("f"), vec![factory.create_identifier("x"), sum]);
            factory.create_expression_statement(call)
        })
        .collect();
    factory.create_source_file("wide.ts", statements)
}

/// `count` functions `function fN(x = 1, { a, b }) { return x; }`
fn functions_with_defaults(factory: &NodeFactory, count: usize) -> Arc<Node> {
    let statements = (0..count)
        .map(|i| {
            let pattern = factory.create_object_binding_pattern(vec![
                factory.create_binding_element(factory.create_identifier("a"), None),
                factory.create_binding_element(factory.create_identifier("b"), None),
            ]);
            factory.create_function_declaration(
                Some(factory.create_identifier(&format!("f{i}"))),
                vec![
                    factory.create_parameter(factory.create_identifier("x"), Some(factory.create_numeric_literal("1"))),
                    factory.create_parameter(pattern, None),
                ],
                Some(factory.create_block(vec![factory.create_return(Some(factory.create_identifier("x")))], true)),
            )
        })
        .collect();
    factory.create_source_file("functions.ts", statements)
}

// ============================================================================
// Visitors
// ============================================================================

fn identity(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
    visit_each_child(node, &mut identity, ctx).map(VisitResult::Node)
}

fn walker_identity(node: &Arc<Node>) -> Result<VisitResult> {
    map_children(node, &mut walker_identity).map(VisitResult::Node)
}

fn rename_x(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
    if node.identifier_text() == Some("x") {
        return Ok(VisitResult::Node(ctx.factory.create_identifier("renamed")));
    }
    visit_each_child(node, &mut rename_x, ctx).map(VisitResult::Node)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_identity_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_traversal");
    let factory = NodeFactory::new();

    for count in [10, 100, 1000].iter() {
        let tree = wide_file(&factory, *count);
        group.bench_with_input(BenchmarkId::new("visit_each_child", count), &tree, |b, tree| {
            b.iter(|| {
                let mut ctx = TransformationContext::default();
                black_box(visit_each_child(tree, &mut identity, &mut ctx))
            })
        });
        group.bench_with_input(BenchmarkId::new("map_children", count), &tree, |b, tree| {
            b.iter(|| black_box(map_children(tree, &mut walker_identity)))
        });
    }

    for depth in [10, 50, 200].iter() {
        let tree = factory.create_expression_statement(nested_sum(&factory, *depth));
        group.bench_with_input(BenchmarkId::new("nested_sum", depth), &tree, |b, tree| {
            b.iter(|| {
                let mut ctx = TransformationContext::default();
                black_box(visit_each_child(tree, &mut identity, &mut ctx))
            })
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");
    let factory = NodeFactory::new();

    for count in [10, 100, 1000].iter() {
        let tree = wide_file(&factory, *count);
        group.bench_with_input(BenchmarkId::new("rename_identifier", count), &tree, |b, tree| {
            b.iter(|| {
                let mut ctx = TransformationContext::default();
                black_box(visit_each_child(tree, &mut rename_x, &mut ctx))
            })
        });
    }

    let options = RewriteOptions { parameter_hoisting: ParameterHoisting::Always, ..RewriteOptions::default() };
    for count in [10, 100].iter() {
        let tree = functions_with_defaults(&factory, *count);
        group.bench_with_input(BenchmarkId::new("parameter_hoisting", count), &tree, |b, tree| {
            b.iter(|| {
                let mut ctx = TransformationContext::new(options.clone());
                black_box(visit_each_child(tree, &mut identity, &mut ctx))
            })
        });
    }

    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize");
    let factory = NodeFactory::new();

    for count in [10, 100].iter() {
        let json = serde_json::to_string(&*wide_file(&factory, *count)).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("wide_file", count), &json, |b, json| {
            b.iter(|| black_box(serde_json::from_str::<Node>(json)))
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(2));
    targets =
        bench_identity_traversal,
        bench_rewrite,
        bench_deserialize
}

criterion_main!(benches);
