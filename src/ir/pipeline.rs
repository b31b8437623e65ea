use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use tracing::{debug, warn};

use super::context::TransformationContext;
use super::node::Node;
use super::visitor::{visit_node, VisitResult, WithContext};
use crate::config::RewriteOptions;
use crate::error::{Result, RewriteError};

/// A rewriting visitor shared between pipelines.
pub type TransformFn =
    Arc<dyn Fn(&Arc<Node>, &mut TransformationContext) -> Result<VisitResult> + Send + Sync>;

/// A read-only pass over the tree.
pub type ObserverFn = Arc<Mutex<dyn FnMut(&Arc<Node>) -> Result<()> + Send>>;

pub enum TransformKind {
    /// Visitor applied to the root; it recurses with `visit_each_child` itself.
    Rewrite(TransformFn),
    /// Looks at the tree without changing it.
    Observe(ObserverFn),
}

impl Clone for TransformKind {
    fn clone(&self) -> Self {
        match self {
            TransformKind::Rewrite(f) => TransformKind::Rewrite(Arc::clone(f)),
            TransformKind::Observe(f) => TransformKind::Observe(Arc::clone(f)),
        }
    }
}

/// A single transformation in the pipeline, including its visitor and dependencies.
#[derive(Clone)]
pub struct Transform {
    /// Unique identifier for the transformation.
    pub id: String,
    /// IDs of transformations that must run before this one.
    pub dependencies: Vec<String>,
    pub kind: TransformKind,
}

impl Transform {
    pub fn rewrite<F>(id: &str, dependencies: &[&str], f: F) -> Self
    where
        F: Fn(&Arc<Node>, &mut TransformationContext) -> Result<VisitResult> + Send + Sync + 'static,
    {
        Transform {
            id: id.to_string(),
            dependencies: dependencies.iter().map(|dep| dep.to_string()).collect(),
            kind: TransformKind::Rewrite(Arc::new(f)),
        }
    }

    pub fn observe<F>(id: &str, dependencies: &[&str], f: F) -> Self
    where
        F: FnMut(&Arc<Node>) -> Result<()> + Send + 'static,
    {
        Transform {
            id: id.to_string(),
            dependencies: dependencies.iter().map(|dep| dep.to_string()).collect(),
            kind: TransformKind::Observe(Arc::new(Mutex::new(f))),
        }
    }
}

/// Chains transformations over one syntax tree.
///
/// Transformations are organized in a dependency graph and executed in
/// topological order, so a transform always sees the output of its
/// prerequisites. Each rewrite runs with a fresh [`TransformationContext`]
/// built from the pipeline's options, and must leave its lexical
/// environments balanced.
pub struct Pipeline {
    graph: StableGraph<Transform, ()>,
    node_indices: HashMap<String, NodeIndex>,
    options: RewriteOptions,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(RewriteOptions::default())
    }
}

impl Pipeline {
    pub fn new(options: RewriteOptions) -> Self {
        Pipeline {
            graph: StableGraph::new(),
            node_indices: HashMap::new(),
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Adds a transformation, linking it to registered dependencies and to
    /// registered transforms that depend on it. Registration order does not
    /// matter.
    pub fn add_transform(&mut self, transform: Transform) {
        let id = transform.id.clone();
        if let Some(previous) = self.node_indices.remove(&id) {
            warn!("Replacing transform {}", id);
            self.graph.remove_node(previous);
        }

        let dependencies = transform.dependencies.clone();
        let node = self.graph.add_node(transform);
        for dep_id in &dependencies {
            if let Some(dep_node) = self.node_indices.get(dep_id) {
                self.graph.add_edge(*dep_node, node, ());
            }
        }
        let dependents: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&other| other != node && self.graph[other].dependencies.contains(&id))
            .collect();
        for dependent in dependents {
            self.graph.add_edge(node, dependent, ());
        }
        self.node_indices.insert(id, node);
    }

    pub fn remove_transform(&mut self, id: &str) -> Option<Transform> {
        let node = self.node_indices.remove(id)?;
        self.graph.remove_node(node)
    }

    /// Transform IDs in the order `apply` would run them.
    pub fn order(&self) -> Result<Vec<String>> {
        Ok(self
            .sorted()?
            .into_iter()
            .map(|node| self.graph[node].id.clone())
            .collect())
    }

    fn sorted(&self) -> Result<Vec<NodeIndex>> {
        toposort(&self.graph, None).map_err(|cycle| RewriteError::PipelineCycle {
            id: self.graph[cycle.node_id()].id.clone(),
        })
    }

    /// Applies every transformation to `tree` in dependency order.
    ///
    /// Returns `tree` itself when no transform changed anything. The first
    /// failing transform aborts the run.
    pub fn apply(&self, tree: &Arc<Node>) -> Result<Arc<Node>> {
        let order = self.sorted()?;
        let mut current = Arc::clone(tree);
        for node in order {
            let transform = &self.graph[node];
            for dep_id in &transform.dependencies {
                if !self.node_indices.contains_key(dep_id) {
                    warn!("Transform {} depends on unknown transform {}", transform.id, dep_id);
                }
            }

            debug!("Applying transform {}", transform.id);
            match &transform.kind {
                TransformKind::Rewrite(f) => {
                    let mut ctx = TransformationContext::new(self.options.clone());
                    ctx.reserve_names(&current);
                    let mut visitor = |node: &Arc<Node>, ctx: &mut TransformationContext| f(node, ctx);
                    let visited = visit_node(
                        Some(&current),
                        Some(&mut WithContext::new(&mut visitor, &mut ctx)),
                        None,
                        None,
                    )?;
                    current = visited.ok_or_else(|| RewriteError::RootRemoved {
                        transform: transform.id.clone(),
                    })?;
                    ctx.finish()?;
                }
                TransformKind::Observe(f) => {
                    let mut observer = f.lock().unwrap_or_else(PoisonError::into_inner);
                    (&mut *observer)(&current)?;
                }
            }
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::factory::NodeFactory;
    use crate::ir::syntax_kind::SyntaxKind;
    use crate::ir::visitor::visit_each_child;

    fn sample_tree() -> Arc<Node> {
        let factory = NodeFactory::new();
        let sum = factory.create_binary_op(
            factory.create_identifier("a"),
            SyntaxKind::PlusToken,
            factory.create_identifier("b"),
        );
        let statement = factory.create_expression_statement(sum);
        factory.create_source_file("sample.ts", vec![statement])
    }

    #[test]
    fn test_identity_pipeline_keeps_tree() {
        let mut pipeline = Pipeline::default();
        pipeline.add_transform(Transform::rewrite("identity", &[], |node, _| Ok(VisitResult::unchanged(node))));
        let tree = sample_tree();
        let result = pipeline.apply(&tree).unwrap();
        assert!(Arc::ptr_eq(&tree, &result));
    }

    #[test]
    fn test_dependencies_order_transforms() {
        let mut pipeline = Pipeline::default();
        pipeline.add_transform(Transform::rewrite("late", &["early"], |node, _| Ok(VisitResult::unchanged(node))));
        pipeline.add_transform(Transform::rewrite("early", &[], |node, _| Ok(VisitResult::unchanged(node))));
        assert_eq!(pipeline.order().unwrap(), vec!["early".to_string(), "late".to_string()]);

        assert!(pipeline.remove_transform("early").is_some());
        assert_eq!(pipeline.order().unwrap(), vec!["late".to_string()]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut pipeline = Pipeline::default();
        pipeline.add_transform(Transform::rewrite("a", &["b"], |node, _| Ok(VisitResult::unchanged(node))));
        pipeline.add_transform(Transform::rewrite("b", &["a"], |node, _| Ok(VisitResult::unchanged(node))));
        let err = pipeline.apply(&sample_tree()).unwrap_err();
        assert!(matches!(err, RewriteError::PipelineCycle { .. }));
    }

    #[test]
    fn test_observer_sees_rewritten_tree() {
        fn rename(node: &Arc<Node>, ctx: &mut TransformationContext) -> Result<VisitResult> {
            if node.identifier_text() == Some("a") {
                return Ok(VisitResult::Node(ctx.factory.create_identifier("z")));
            }
            visit_each_child(node, &mut rename, ctx).map(VisitResult::Node)
        }

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut pipeline = Pipeline::default();
        pipeline.add_transform(Transform::rewrite("rename", &[], rename));
        pipeline.add_transform(Transform::observe("collect", &["rename"], move |root| {
            let counts = crate::ir::walker::count_kinds(root)?;
            sink.lock().unwrap().push(counts[&SyntaxKind::Identifier]);
            Ok(())
        }));

        let tree = sample_tree();
        let result = pipeline.apply(&tree).unwrap();
        assert!(!Arc::ptr_eq(&tree, &result));
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_removing_root_fails() {
        let mut pipeline = Pipeline::default();
        pipeline.add_transform(Transform::rewrite("drop", &[], |_, _| Ok(VisitResult::Nothing)));
        let err = pipeline.apply(&sample_tree()).unwrap_err();
        assert_eq!(err, RewriteError::RootRemoved { transform: "drop".to_string() });
    }
}
