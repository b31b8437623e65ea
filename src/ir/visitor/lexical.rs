use std::sync::Arc;

use tracing::debug;

use super::{visit_node, visit_nodes, Visitor, WithContext};
use crate::error::{Result, RewriteError};
use crate::ir::context::{LexicalEnvironmentFlags, TransformationContext};
use crate::ir::node::predicates::is_binding_pattern;
use crate::ir::node::{Node, NodeFlags, NodeList, NodeTest, Parameter};

/// Visits `statements` (from `start`) inside a fresh lexical environment and
/// merges whatever was hoisted into the result, after any prologue.
pub fn visit_lexical_environment<V: Visitor + ?Sized>(
    statements: &NodeList,
    visitor: &mut V,
    ctx: &mut TransformationContext,
    start: Option<isize>,
    ensure_use_strict: bool,
) -> Result<NodeList> {
    ctx.start_lexical_environment()?;
    let visited = visit_nodes(
        Some(statements),
        Some(&mut WithContext::new(visitor, ctx)),
        Some(NodeTest::STATEMENT),
        start,
        None,
    )?
    .unwrap_or_else(|| Arc::clone(statements));

    let visited = if ensure_use_strict { ctx.factory.ensure_use_strict(&visited) } else { visited };
    let declarations = ctx.end_lexical_environment()?;
    Ok(ctx.factory.merge_lexical_environment(&visited, declarations))
}

/// Starts the lexical environment of a function-like node and visits its
/// parameters with `IN_PARAMETERS` set. The environment is left suspended
/// for [`visit_function_body`] to pick up, even when there are no parameters.
pub fn visit_parameter_list<V: Visitor + ?Sized>(
    parameters: Option<&NodeList>,
    visitor: &mut V,
    ctx: &mut TransformationContext,
) -> Result<Option<NodeList>> {
    ctx.start_lexical_environment()?;
    let mut updated = None;
    if let Some(parameters) = parameters {
        ctx.set_lexical_environment_flags(LexicalEnvironmentFlags::IN_PARAMETERS, true)?;
        let mut visited = visit_nodes(
            Some(parameters),
            Some(&mut WithContext::new(visitor, ctx)),
            Some(NodeTest::PARAMETER),
            None,
            None,
        )?
        .unwrap_or_else(|| Arc::clone(parameters));

        let variables_hoisted = ctx
            .lexical_environment_flags()
            .contains(LexicalEnvironmentFlags::VARIABLES_HOISTED_IN_PARAMETERS);
        if ctx.options.hoists_parameters(variables_hoisted) {
            visited = add_default_value_assignments_if_needed(&visited, ctx)?;
        }
        ctx.set_lexical_environment_flags(LexicalEnvironmentFlags::IN_PARAMETERS, false)?;
        updated = Some(visited);
    }
    ctx.suspend_lexical_environment()?;
    Ok(updated)
}

/// Moves binding patterns and initializers out of `parameters` into
/// initialization statements of the current lexical environment.
///
/// * `({ a, b } = init)` becomes `(_a)` plus `var { a, b } = _a === void 0 ? init : _a;`
/// * `(x = init)` becomes `(x)` plus `if (x === void 0) { x = init; }`
///
/// Rest parameters are left alone.
pub fn add_default_value_assignments_if_needed(
    parameters: &NodeList,
    ctx: &mut TransformationContext,
) -> Result<NodeList> {
    if parameters.iter().any(|parameter| is_pattern_parameter(parameter)) {
        for parameter in parameters.iter() {
            ctx.reserve_names(parameter);
        }
    }

    let mut result: Option<Vec<Arc<Node>>> = None;
    for (i, parameter) in parameters.iter().enumerate() {
        let updated = add_default_value_assignment_if_needed(parameter, ctx)?;
        if result.is_some() || !Arc::ptr_eq(&updated, parameter) {
            result
                .get_or_insert_with(|| parameters.iter().take(i).cloned().collect())
                .push(updated);
        }
    }

    match result {
        Some(result) => {
            let array = ctx.factory.create_node_array(result, parameters.has_trailing_comma);
            Ok(ctx.factory.set_array_text_range(array, parameters.range))
        }
        None => Ok(Arc::clone(parameters)),
    }
}

/// A non-rest parameter whose name is a binding pattern.
pub(crate) fn is_pattern_parameter(parameter: &Node) -> bool {
    matches!(parameter, Node::Parameter(data) if data.dot_dot_dot_token.is_none() && is_binding_pattern(&data.name))
}

fn add_default_value_assignment_if_needed(
    parameter: &Arc<Node>,
    ctx: &mut TransformationContext,
) -> Result<Arc<Node>> {
    let Node::Parameter(data) = &**parameter else {
        return Ok(Arc::clone(parameter));
    };
    if data.dot_dot_dot_token.is_some() {
        return Ok(Arc::clone(parameter));
    }
    if is_binding_pattern(&data.name) {
        return add_default_value_assignment_for_binding_pattern(parameter, data, ctx);
    }
    match &data.initializer {
        Some(initializer) => add_default_value_assignment_for_initializer(parameter, data, initializer, ctx),
        None => Ok(Arc::clone(parameter)),
    }
}

fn add_default_value_assignment_for_binding_pattern(
    parameter: &Arc<Node>,
    data: &Parameter,
    ctx: &mut TransformationContext,
) -> Result<Arc<Node>> {
    let temp = ctx.factory.generated_name_for_node(parameter);
    let factory = &ctx.factory;

    let initializer = match &data.initializer {
        Some(initializer) => factory.create_conditional(
            factory.create_strict_equality(Arc::clone(&temp), factory.create_void_zero()),
            Arc::clone(initializer),
            Arc::clone(&temp),
        ),
        None => Arc::clone(&temp),
    };
    let declaration = factory.create_variable_declaration(Arc::clone(&data.name), data.ty.clone(), Some(initializer));
    let list = factory.create_variable_declaration_list(vec![declaration], NodeFlags::empty());
    let statement = factory.create_variable_statement(None, list);
    let updated = factory.update_parameter(parameter, data, Arc::clone(&temp), None);

    debug!(
        "Hoisted binding pattern parameter into {}",
        temp.identifier_text().unwrap_or_default()
    );
    ctx.add_initialization_statement(statement)?;
    Ok(updated)
}

fn add_default_value_assignment_for_initializer(
    parameter: &Arc<Node>,
    data: &Parameter,
    initializer: &Arc<Node>,
    ctx: &mut TransformationContext,
) -> Result<Arc<Node>> {
    let factory = &ctx.factory;
    let range = parameter.range();

    let check = factory.create_type_check(factory.clone_node(&data.name), "undefined");
    let assignment = factory.set_text_range(
        factory.create_assignment(factory.clone_node(&data.name), Arc::clone(initializer)),
        range,
    );
    let block = factory.set_text_range(
        factory.create_block(vec![factory.create_expression_statement(assignment)], false),
        range,
    );
    let statement = factory.create_if(check, block, None);
    let updated = factory.update_parameter(parameter, data, Arc::clone(&data.name), None);

    debug!(
        "Hoisted initializer of parameter {}",
        data.name.identifier_text().unwrap_or_default()
    );
    ctx.add_initialization_statement(statement)?;
    Ok(updated)
}

/// Resumes the environment suspended by [`visit_parameter_list`], visits the
/// body and ends the environment. Hoisted statements are merged into the
/// body, turning a concise body into a block; with no body at all they
/// become a new block.
pub fn visit_function_body<V: Visitor + ?Sized>(
    body: Option<&Arc<Node>>,
    visitor: &mut V,
    ctx: &mut TransformationContext,
) -> Result<Option<Arc<Node>>> {
    ctx.resume_lexical_environment()?;
    let updated = visit_node(
        body,
        Some(&mut WithContext::new(visitor, ctx)),
        Some(NodeTest::CONCISE_BODY),
        None,
    )?;
    let declarations = ctx.end_lexical_environment()?;
    if declarations.is_empty() {
        return Ok(updated);
    }

    let Some(updated) = updated else {
        return Ok(Some(ctx.factory.create_block(declarations, true)));
    };
    let block = ctx.factory.convert_to_function_block(&updated);
    let Node::Block(data) = &*block else {
        return Err(RewriteError::UnexpectedNode { expected: "Block", actual: block.kind() });
    };
    let statements = ctx.factory.merge_lexical_environment(&data.statements, declarations);
    Ok(Some(ctx.factory.update_block(&block, statements)))
}
