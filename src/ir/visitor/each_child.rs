use std::sync::Arc;

use tracing::trace;

use super::lexical::{is_pattern_parameter, visit_function_body, visit_lexical_environment, visit_parameter_list};
use super::{lift_to_block, visit_node, visit_nodes, Lift, Visitor, WithContext};
use crate::config::ParameterHoisting;
use crate::error::{Result, RewriteError};
use crate::ir::context::TransformationContext;
use crate::ir::node::*;
use crate::ir::syntax_kind::SyntaxKind;

/// Visits one child slot after another on behalf of `visit_each_child`.
struct Children<'a, V: ?Sized> {
    node: &'a Arc<Node>,
    visitor: &'a mut V,
    ctx: &'a mut TransformationContext,
    kind: SyntaxKind,
}

impl<V: Visitor + ?Sized> Children<'_, V> {
    fn visit(
        &mut self,
        node: Option<&Arc<Node>>,
        test: Option<NodeTest>,
        lift: Option<Lift>,
    ) -> Result<Option<Arc<Node>>> {
        visit_node(node, Some(&mut WithContext::new(&mut *self.visitor, &mut *self.ctx)), test, lift)
    }

    fn required(&self, field: &'static str, visited: Option<Arc<Node>>) -> Result<Arc<Node>> {
        visited.ok_or(RewriteError::MissingChild { kind: self.kind, field })
    }

    fn node(&mut self, field: &'static str, node: &Arc<Node>, test: NodeTest) -> Result<Arc<Node>> {
        let visited = self.visit(Some(node), Some(test), None)?;
        self.required(field, visited)
    }

    fn opt(&mut self, node: &Option<Arc<Node>>, test: NodeTest) -> Result<Option<Arc<Node>>> {
        self.visit(node.as_ref(), Some(test), None)
    }

    fn untested(&mut self, field: &'static str, node: &Arc<Node>) -> Result<Arc<Node>> {
        let visited = self.visit(Some(node), None, None)?;
        self.required(field, visited)
    }

    fn opt_untested(&mut self, node: &Option<Arc<Node>>) -> Result<Option<Arc<Node>>> {
        self.visit(node.as_ref(), None, None)
    }

    /// Statement slot whose list results are wrapped in a block.
    fn statement(&mut self, field: &'static str, node: &Arc<Node>) -> Result<Arc<Node>> {
        let visited = self.visit(Some(node), Some(NodeTest::STATEMENT), Some(lift_to_block))?;
        self.required(field, visited)
    }

    fn opt_statement(&mut self, node: &Option<Arc<Node>>) -> Result<Option<Arc<Node>>> {
        self.visit(node.as_ref(), Some(NodeTest::STATEMENT), Some(lift_to_block))
    }

    /// Token slots only reach the visitor when `visit_tokens` is set.
    fn token(&mut self, node: &Option<Arc<Node>>) -> Result<Option<Arc<Node>>> {
        if !self.ctx.options.visit_tokens {
            return Ok(node.clone());
        }
        self.visit(node.as_ref(), Some(NodeTest::TOKEN), None)
    }

    fn required_token(&mut self, field: &'static str, node: &Arc<Node>) -> Result<Arc<Node>> {
        if !self.ctx.options.visit_tokens {
            return Ok(Arc::clone(node));
        }
        self.node(field, node, NodeTest::TOKEN)
    }

    fn list(&mut self, list: &NodeList, test: NodeTest) -> Result<NodeList> {
        let visited = self.opt_list(&Some(Arc::clone(list)), test)?;
        Ok(visited.unwrap_or_else(|| Arc::clone(list)))
    }

    fn opt_list(&mut self, list: &Option<NodeList>, test: NodeTest) -> Result<Option<NodeList>> {
        visit_nodes(
            list.as_ref(),
            Some(&mut WithContext::new(&mut *self.visitor, &mut *self.ctx)),
            Some(test),
            None,
            None,
        )
    }

    fn parameters(&mut self, parameters: &NodeList) -> Result<NodeList> {
        // Hoisting a binding pattern mints a temporary name, which must not
        // shadow anything the function already mentions.
        if self.ctx.options.parameter_hoisting != ParameterHoisting::Never
            && parameters.iter().any(|parameter| is_pattern_parameter(parameter))
        {
            self.ctx.reserve_names(self.node);
        }
        let visited = visit_parameter_list(Some(parameters), &mut *self.visitor, &mut *self.ctx)?;
        Ok(visited.unwrap_or_else(|| Arc::clone(parameters)))
    }

    fn body(&mut self, body: &Option<Arc<Node>>) -> Result<Option<Arc<Node>>> {
        visit_function_body(body.as_ref(), &mut *self.visitor, &mut *self.ctx)
    }

    fn required_body(&mut self, body: &Arc<Node>) -> Result<Arc<Node>> {
        let visited = visit_function_body(Some(body), &mut *self.visitor, &mut *self.ctx)?;
        self.required("body", visited)
    }
}

/// Rebuilds a node through the factory once its fields have been visited.
macro_rules! update {
    ($c:ident, $node:ident, $payload:expr) => {{
        let updated = $payload;
        Ok($c.ctx.factory.update($node, updated))
    }};
}

/// Visits every child of `node` in source order and rebuilds it through the
/// factory. The original `Arc` comes back when no child changed.
///
/// Function-like kinds visit their parameters and body inside a lexical
/// environment, and a source file visits its statements inside one. Tokens
/// and childless kinds are returned as is.
pub fn visit_each_child<V: Visitor + ?Sized>(
    node: &Arc<Node>,
    visitor: &mut V,
    ctx: &mut TransformationContext,
) -> Result<Arc<Node>> {
    let kind = node.kind();
    if kind.is_token() {
        return Ok(Arc::clone(node));
    }
    trace!("Visiting children of {}", kind);

    let mut c = Children { node, visitor, ctx, kind };
    match &**node {
        Node::Token(_)
        | Node::Literal(_)
        | Node::ThisType(_)
        | Node::OmittedExpression(_)
        | Node::SemicolonClassElement(_)
        | Node::EmptyStatement(_)
        | Node::DebuggerStatement(_)
        | Node::JsxOpeningFragment(_)
        | Node::JsxClosingFragment(_)
        | Node::NotEmittedStatement(_) => Ok(Arc::clone(node)),

        // Names
        Node::Identifier(data) => update!(c, node, Identifier {
            base: data.base,
            text: data.text.clone(),
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE_OR_TYPE_PARAMETER)?,
        }),
        Node::QualifiedName(data) => update!(c, node, QualifiedName {
            base: data.base,
            left: c.node("left", &data.left, NodeTest::ENTITY_NAME)?,
            right: c.node("right", &data.right, NodeTest::IDENTIFIER)?,
        }),
        Node::ComputedPropertyName(data) => update!(c, node, ComputedPropertyName {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),

        // Signature elements
        Node::TypeParameter(data) => update!(c, node, TypeParameter {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            constraint: c.opt(&data.constraint, NodeTest::TYPE_NODE)?,
            default: c.opt(&data.default, NodeTest::TYPE_NODE)?,
        }),
        Node::Parameter(data) => update!(c, node, Parameter {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            dot_dot_dot_token: c.token(&data.dot_dot_dot_token)?,
            name: c.node("name", &data.name, NodeTest::BINDING_NAME)?,
            question_token: c.token(&data.question_token)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            initializer: c.opt(&data.initializer, NodeTest::EXPRESSION)?,
        }),
        Node::Decorator(data) => update!(c, node, Decorator {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),

        // Type members and class elements
        Node::PropertySignature(data) => update!(c, node, PropertySignature {
            base: data.base,
            modifiers: c.opt_list(&data.modifiers, NodeTest::TOKEN)?,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            question_token: c.token(&data.question_token)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::PropertyDeclaration(data) => {
            let decorators = c.opt_list(&data.decorators, NodeTest::DECORATOR)?;
            let modifiers = c.opt_list(&data.modifiers, NodeTest::MODIFIER)?;
            let name = c.node("name", &data.name, NodeTest::PROPERTY_NAME)?;
            let token = c.token(&data.question_token.clone().or_else(|| data.exclamation_token.clone()))?;
            let ty = c.opt(&data.ty, NodeTest::TYPE_NODE)?;
            let initializer = c.opt(&data.initializer, NodeTest::EXPRESSION)?;
            Ok(c.ctx.factory.update_property_declaration(
                node, data, decorators, modifiers, name, token, ty, initializer,
            ))
        }
        Node::MethodSignature(data) => update!(c, node, MethodSignature {
            base: data.base,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            question_token: c.token(&data.question_token)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::MethodDeclaration(data) => update!(c, node, MethodDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            asterisk_token: c.token(&data.asterisk_token)?,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            question_token: c.token(&data.question_token)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.parameters(&data.parameters)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            body: c.body(&data.body)?,
        }),
        Node::Constructor(data) => update!(c, node, Constructor {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            parameters: c.parameters(&data.parameters)?,
            body: c.body(&data.body)?,
        }),
        Node::GetAccessor(data) => update!(c, node, GetAccessor {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            parameters: c.parameters(&data.parameters)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            body: c.body(&data.body)?,
        }),
        Node::SetAccessor(data) => update!(c, node, SetAccessor {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            parameters: c.parameters(&data.parameters)?,
            body: c.body(&data.body)?,
        }),
        Node::CallSignature(data) => update!(c, node, CallSignature {
            base: data.base,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::ConstructSignature(data) => update!(c, node, ConstructSignature {
            base: data.base,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::IndexSignature(data) => update!(c, node, IndexSignature {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),

        // Types
        Node::TypePredicate(data) => update!(c, node, TypePredicate {
            base: data.base,
            asserts_modifier: c.opt_untested(&data.asserts_modifier)?,
            parameter_name: c.untested("parameter_name", &data.parameter_name)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::TypeReference(data) => update!(c, node, TypeReference {
            base: data.base,
            type_name: c.node("type_name", &data.type_name, NodeTest::ENTITY_NAME)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
        }),
        Node::FunctionType(data) => update!(c, node, FunctionType {
            base: data.base,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::ConstructorType(data) => update!(c, node, ConstructorType {
            base: data.base,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.list(&data.parameters, NodeTest::PARAMETER)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::TypeQuery(data) => update!(c, node, TypeQuery {
            base: data.base,
            expr_name: c.node("expr_name", &data.expr_name, NodeTest::ENTITY_NAME)?,
        }),
        Node::TypeLiteral(data) => update!(c, node, TypeLiteral {
            base: data.base,
            members: c.list(&data.members, NodeTest::TYPE_ELEMENT)?,
        }),
        Node::ArrayType(data) => update!(c, node, ArrayType {
            base: data.base,
            element_type: c.node("element_type", &data.element_type, NodeTest::TYPE_NODE)?,
        }),
        Node::TupleType(data) => update!(c, node, TupleType {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::TYPE_NODE)?,
        }),
        Node::OptionalType(data) => update!(c, node, OptionalType {
            base: data.base,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::RestType(data) => update!(c, node, RestType {
            base: data.base,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::UnionType(data) => update!(c, node, UnionType {
            base: data.base,
            types: c.list(&data.types, NodeTest::TYPE_NODE)?,
        }),
        Node::IntersectionType(data) => update!(c, node, IntersectionType {
            base: data.base,
            types: c.list(&data.types, NodeTest::TYPE_NODE)?,
        }),
        Node::ConditionalType(data) => update!(c, node, ConditionalType {
            base: data.base,
            check_type: c.node("check_type", &data.check_type, NodeTest::TYPE_NODE)?,
            extends_type: c.node("extends_type", &data.extends_type, NodeTest::TYPE_NODE)?,
            true_type: c.node("true_type", &data.true_type, NodeTest::TYPE_NODE)?,
            false_type: c.node("false_type", &data.false_type, NodeTest::TYPE_NODE)?,
        }),
        Node::InferType(data) => update!(c, node, InferType {
            base: data.base,
            type_parameter: c.node("type_parameter", &data.type_parameter, NodeTest::TYPE_PARAMETER)?,
        }),
        Node::ImportType(data) => update!(c, node, ImportType {
            base: data.base,
            argument: c.node("argument", &data.argument, NodeTest::TYPE_NODE)?,
            qualifier: c.opt(&data.qualifier, NodeTest::ENTITY_NAME)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
            is_type_of: data.is_type_of,
        }),
        // Tokens of a named tuple member always go through the main visitor.
        Node::NamedTupleMember(data) => update!(c, node, NamedTupleMember {
            base: data.base,
            dot_dot_dot_token: c.opt(&data.dot_dot_dot_token, NodeTest::TOKEN)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            question_token: c.opt(&data.question_token, NodeTest::TOKEN)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::ParenthesizedType(data) => update!(c, node, ParenthesizedType {
            base: data.base,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::TypeOperator(data) => update!(c, node, TypeOperator {
            base: data.base,
            operator: data.operator,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::IndexedAccessType(data) => update!(c, node, IndexedAccessType {
            base: data.base,
            object_type: c.node("object_type", &data.object_type, NodeTest::TYPE_NODE)?,
            index_type: c.node("index_type", &data.index_type, NodeTest::TYPE_NODE)?,
        }),
        Node::MappedType(data) => update!(c, node, MappedType {
            base: data.base,
            readonly_token: c.token(&data.readonly_token)?,
            type_parameter: c.node("type_parameter", &data.type_parameter, NodeTest::TYPE_PARAMETER)?,
            question_token: c.token(&data.question_token)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::LiteralType(data) => update!(c, node, LiteralType {
            base: data.base,
            literal: c.node("literal", &data.literal, NodeTest::EXPRESSION)?,
        }),

        // Binding patterns
        Node::ObjectBindingPattern(data) => update!(c, node, ObjectBindingPattern {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::BINDING_ELEMENT)?,
        }),
        Node::ArrayBindingPattern(data) => update!(c, node, ArrayBindingPattern {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::ARRAY_BINDING_ELEMENT)?,
        }),
        Node::BindingElement(data) => update!(c, node, BindingElement {
            base: data.base,
            dot_dot_dot_token: c.token(&data.dot_dot_dot_token)?,
            property_name: c.opt(&data.property_name, NodeTest::PROPERTY_NAME)?,
            name: c.node("name", &data.name, NodeTest::BINDING_NAME)?,
            initializer: c.opt(&data.initializer, NodeTest::EXPRESSION)?,
        }),

        // Expressions
        Node::ArrayLiteralExpression(data) => update!(c, node, ArrayLiteralExpression {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::EXPRESSION)?,
            multi_line: data.multi_line,
        }),
        Node::ObjectLiteralExpression(data) => update!(c, node, ObjectLiteralExpression {
            base: data.base,
            properties: c.list(&data.properties, NodeTest::OBJECT_LITERAL_ELEMENT)?,
            multi_line: data.multi_line,
        }),
        Node::PropertyAccessExpression(data) => {
            let expression = c.node("expression", &data.expression, NodeTest::EXPRESSION)?;
            if node.is_optional_chain() {
                let question_dot_token = c.token(&data.question_dot_token)?;
                let name = c.node("name", &data.name, NodeTest::IDENTIFIER)?;
                Ok(c.ctx.factory.update_property_access_chain(node, data, expression, question_dot_token, name))
            } else {
                let name = c.node("name", &data.name, NodeTest::IDENTIFIER)?;
                Ok(c.ctx.factory.update_property_access(node, data, expression, name))
            }
        }
        Node::ElementAccessExpression(data) => {
            let expression = c.node("expression", &data.expression, NodeTest::EXPRESSION)?;
            if node.is_optional_chain() {
                let question_dot_token = c.token(&data.question_dot_token)?;
                let argument = c.node("argument_expression", &data.argument_expression, NodeTest::EXPRESSION)?;
                Ok(c.ctx.factory.update_element_access_chain(node, data, expression, question_dot_token, argument))
            } else {
                let argument = c.node("argument_expression", &data.argument_expression, NodeTest::EXPRESSION)?;
                Ok(c.ctx.factory.update_element_access(node, data, expression, argument))
            }
        }
        Node::CallExpression(data) => {
            let expression = c.node("expression", &data.expression, NodeTest::EXPRESSION)?;
            if node.is_optional_chain() {
                let question_dot_token = c.token(&data.question_dot_token)?;
                let type_arguments = c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?;
                let arguments = c.list(&data.arguments, NodeTest::EXPRESSION)?;
                Ok(c.ctx.factory.update_call_chain(node, data, expression, question_dot_token, type_arguments, arguments))
            } else {
                let type_arguments = c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?;
                let arguments = c.list(&data.arguments, NodeTest::EXPRESSION)?;
                Ok(c.ctx.factory.update_call(node, data, expression, type_arguments, arguments))
            }
        }
        Node::NewExpression(data) => update!(c, node, NewExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
            arguments: c.opt_list(&data.arguments, NodeTest::EXPRESSION)?,
        }),
        Node::TaggedTemplateExpression(data) => update!(c, node, TaggedTemplateExpression {
            base: data.base,
            tag: c.node("tag", &data.tag, NodeTest::EXPRESSION)?,
            question_dot_token: data.question_dot_token.clone(),
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
            template: c.node("template", &data.template, NodeTest::TEMPLATE_LITERAL)?,
        }),
        Node::TypeAssertionExpression(data) => update!(c, node, TypeAssertionExpression {
            base: data.base,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::ParenthesizedExpression(data) => update!(c, node, ParenthesizedExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::FunctionExpression(data) => update!(c, node, FunctionExpression {
            base: data.base,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            asterisk_token: c.token(&data.asterisk_token)?,
            name: c.opt(&data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.parameters(&data.parameters)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            body: c.required_body(&data.body)?,
        }),
        Node::ArrowFunction(data) => update!(c, node, ArrowFunction {
            base: data.base,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.parameters(&data.parameters)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            equals_greater_than_token: c.required_token("equals_greater_than_token", &data.equals_greater_than_token)?,
            body: c.required_body(&data.body)?,
        }),
        Node::DeleteExpression(data) => update!(c, node, DeleteExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::TypeOfExpression(data) => update!(c, node, TypeOfExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::VoidExpression(data) => update!(c, node, VoidExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::AwaitExpression(data) => update!(c, node, AwaitExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::PrefixUnaryExpression(data) => update!(c, node, PrefixUnaryExpression {
            base: data.base,
            operator: data.operator,
            operand: c.node("operand", &data.operand, NodeTest::EXPRESSION)?,
        }),
        Node::PostfixUnaryExpression(data) => update!(c, node, PostfixUnaryExpression {
            base: data.base,
            operand: c.node("operand", &data.operand, NodeTest::EXPRESSION)?,
            operator: data.operator,
        }),
        Node::BinaryExpression(data) => update!(c, node, BinaryExpression {
            base: data.base,
            left: c.node("left", &data.left, NodeTest::EXPRESSION)?,
            operator_token: c.required_token("operator_token", &data.operator_token)?,
            right: c.node("right", &data.right, NodeTest::EXPRESSION)?,
        }),
        Node::ConditionalExpression(data) => update!(c, node, ConditionalExpression {
            base: data.base,
            condition: c.node("condition", &data.condition, NodeTest::EXPRESSION)?,
            question_token: c.required_token("question_token", &data.question_token)?,
            when_true: c.node("when_true", &data.when_true, NodeTest::EXPRESSION)?,
            colon_token: c.required_token("colon_token", &data.colon_token)?,
            when_false: c.node("when_false", &data.when_false, NodeTest::EXPRESSION)?,
        }),
        Node::TemplateExpression(data) => update!(c, node, TemplateExpression {
            base: data.base,
            head: c.node("head", &data.head, NodeTest::TEMPLATE_HEAD)?,
            template_spans: c.list(&data.template_spans, NodeTest::TEMPLATE_SPAN)?,
        }),
        Node::YieldExpression(data) => update!(c, node, YieldExpression {
            base: data.base,
            asterisk_token: c.token(&data.asterisk_token)?,
            expression: c.opt(&data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::SpreadElement(data) => update!(c, node, SpreadElement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::ClassExpression(data) => update!(c, node, ClassExpression {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.opt(&data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            heritage_clauses: c.opt_list(&data.heritage_clauses, NodeTest::HERITAGE_CLAUSE)?,
            members: c.list(&data.members, NodeTest::CLASS_ELEMENT)?,
        }),
        Node::ExpressionWithTypeArguments(data) => update!(c, node, ExpressionWithTypeArguments {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
        }),
        Node::AsExpression(data) => update!(c, node, AsExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::NonNullExpression(data) => {
            let expression = c.node("expression", &data.expression, NodeTest::EXPRESSION)?;
            if node.is_optional_chain() {
                Ok(c.ctx.factory.update_non_null_chain(node, data, expression))
            } else {
                Ok(c.ctx.factory.update_non_null(node, data, expression))
            }
        }
        Node::MetaProperty(data) => update!(c, node, MetaProperty {
            base: data.base,
            keyword_token: data.keyword_token,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),

        // Misc
        Node::TemplateSpan(data) => update!(c, node, TemplateSpan {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            literal: c.node("literal", &data.literal, NodeTest::TEMPLATE_MIDDLE_OR_TAIL)?,
        }),

        // Statements
        Node::Block(data) => update!(c, node, Block {
            base: data.base,
            statements: c.list(&data.statements, NodeTest::STATEMENT)?,
            multi_line: data.multi_line,
        }),
        Node::VariableStatement(data) => update!(c, node, VariableStatement {
            base: data.base,
            decorators: data.decorators.clone(),
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            declaration_list: c.node("declaration_list", &data.declaration_list, NodeTest::VARIABLE_DECLARATION_LIST)?,
        }),
        Node::ExpressionStatement(data) => update!(c, node, ExpressionStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::IfStatement(data) => update!(c, node, IfStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            then_statement: c.statement("then_statement", &data.then_statement)?,
            else_statement: c.opt_statement(&data.else_statement)?,
        }),
        Node::DoStatement(data) => update!(c, node, DoStatement {
            base: data.base,
            statement: c.statement("statement", &data.statement)?,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::WhileStatement(data) => update!(c, node, WhileStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::ForStatement(data) => update!(c, node, ForStatement {
            base: data.base,
            initializer: c.opt(&data.initializer, NodeTest::FOR_INITIALIZER)?,
            condition: c.opt(&data.condition, NodeTest::EXPRESSION)?,
            incrementor: c.opt(&data.incrementor, NodeTest::EXPRESSION)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::ForInStatement(data) => update!(c, node, ForInStatement {
            base: data.base,
            initializer: c.node("initializer", &data.initializer, NodeTest::FOR_INITIALIZER)?,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::ForOfStatement(data) => update!(c, node, ForOfStatement {
            base: data.base,
            await_modifier: c.token(&data.await_modifier)?,
            initializer: c.node("initializer", &data.initializer, NodeTest::FOR_INITIALIZER)?,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::ContinueStatement(data) => update!(c, node, ContinueStatement {
            base: data.base,
            label: c.opt(&data.label, NodeTest::IDENTIFIER)?,
        }),
        Node::BreakStatement(data) => update!(c, node, BreakStatement {
            base: data.base,
            label: c.opt(&data.label, NodeTest::IDENTIFIER)?,
        }),
        Node::ReturnStatement(data) => update!(c, node, ReturnStatement {
            base: data.base,
            expression: c.opt(&data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::WithStatement(data) => update!(c, node, WithStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::SwitchStatement(data) => update!(c, node, SwitchStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            case_block: c.node("case_block", &data.case_block, NodeTest::CASE_BLOCK)?,
        }),
        Node::LabeledStatement(data) => update!(c, node, LabeledStatement {
            base: data.base,
            label: c.node("label", &data.label, NodeTest::IDENTIFIER)?,
            statement: c.statement("statement", &data.statement)?,
        }),
        Node::ThrowStatement(data) => update!(c, node, ThrowStatement {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::TryStatement(data) => update!(c, node, TryStatement {
            base: data.base,
            try_block: c.node("try_block", &data.try_block, NodeTest::BLOCK)?,
            catch_clause: c.opt(&data.catch_clause, NodeTest::CATCH_CLAUSE)?,
            finally_block: c.opt(&data.finally_block, NodeTest::BLOCK)?,
        }),

        // Declarations
        Node::VariableDeclaration(data) => update!(c, node, VariableDeclaration {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::BINDING_NAME)?,
            exclamation_token: c.token(&data.exclamation_token)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            initializer: c.opt(&data.initializer, NodeTest::EXPRESSION)?,
        }),
        Node::VariableDeclarationList(data) => update!(c, node, VariableDeclarationList {
            base: data.base,
            declarations: c.list(&data.declarations, NodeTest::VARIABLE_DECLARATION)?,
        }),
        Node::FunctionDeclaration(data) => update!(c, node, FunctionDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            asterisk_token: c.token(&data.asterisk_token)?,
            name: c.opt(&data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            parameters: c.parameters(&data.parameters)?,
            ty: c.opt(&data.ty, NodeTest::TYPE_NODE)?,
            body: c.body(&data.body)?,
        }),
        Node::ClassDeclaration(data) => update!(c, node, ClassDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.opt(&data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            heritage_clauses: c.opt_list(&data.heritage_clauses, NodeTest::HERITAGE_CLAUSE)?,
            members: c.list(&data.members, NodeTest::CLASS_ELEMENT)?,
        }),
        Node::InterfaceDeclaration(data) => update!(c, node, InterfaceDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            heritage_clauses: c.opt_list(&data.heritage_clauses, NodeTest::HERITAGE_CLAUSE)?,
            members: c.list(&data.members, NodeTest::TYPE_ELEMENT)?,
        }),
        Node::TypeAliasDeclaration(data) => update!(c, node, TypeAliasDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            type_parameters: c.opt_list(&data.type_parameters, NodeTest::TYPE_PARAMETER)?,
            ty: c.node("ty", &data.ty, NodeTest::TYPE_NODE)?,
        }),
        Node::EnumDeclaration(data) => update!(c, node, EnumDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            members: c.list(&data.members, NodeTest::ENUM_MEMBER)?,
        }),
        Node::ModuleDeclaration(data) => update!(c, node, ModuleDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            body: c.opt(&data.body, NodeTest::MODULE_BODY)?,
        }),
        Node::ModuleBlock(data) => update!(c, node, ModuleBlock {
            base: data.base,
            statements: c.list(&data.statements, NodeTest::STATEMENT)?,
        }),
        Node::CaseBlock(data) => update!(c, node, CaseBlock {
            base: data.base,
            clauses: c.list(&data.clauses, NodeTest::CASE_OR_DEFAULT_CLAUSE)?,
        }),
        Node::NamespaceExportDeclaration(data) => update!(c, node, NamespaceExportDeclaration {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),
        Node::ImportEqualsDeclaration(data) => update!(c, node, ImportEqualsDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            is_type_only: data.is_type_only,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            module_reference: c.node("module_reference", &data.module_reference, NodeTest::MODULE_REFERENCE)?,
        }),
        Node::ImportDeclaration(data) => update!(c, node, ImportDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            import_clause: c.opt(&data.import_clause, NodeTest::IMPORT_CLAUSE)?,
            module_specifier: c.node("module_specifier", &data.module_specifier, NodeTest::EXPRESSION)?,
        }),
        Node::ImportClause(data) => update!(c, node, ImportClause {
            base: data.base,
            is_type_only: data.is_type_only,
            name: c.opt(&data.name, NodeTest::IDENTIFIER)?,
            named_bindings: c.opt(&data.named_bindings, NodeTest::NAMED_IMPORT_BINDINGS)?,
        }),
        Node::NamespaceImport(data) => update!(c, node, NamespaceImport {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),
        Node::NamespaceExport(data) => update!(c, node, NamespaceExport {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),
        Node::NamedImports(data) => update!(c, node, NamedImports {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::IMPORT_SPECIFIER)?,
        }),
        Node::ImportSpecifier(data) => update!(c, node, ImportSpecifier {
            base: data.base,
            property_name: c.opt(&data.property_name, NodeTest::IDENTIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),
        Node::ExportAssignment(data) => update!(c, node, ExportAssignment {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            is_export_equals: data.is_export_equals,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::ExportDeclaration(data) => update!(c, node, ExportDeclaration {
            base: data.base,
            decorators: c.opt_list(&data.decorators, NodeTest::DECORATOR)?,
            modifiers: c.opt_list(&data.modifiers, NodeTest::MODIFIER)?,
            is_type_only: data.is_type_only,
            export_clause: c.opt(&data.export_clause, NodeTest::NAMED_EXPORT_BINDINGS)?,
            module_specifier: c.opt(&data.module_specifier, NodeTest::EXPRESSION)?,
        }),
        Node::NamedExports(data) => update!(c, node, NamedExports {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::EXPORT_SPECIFIER)?,
        }),
        Node::ExportSpecifier(data) => update!(c, node, ExportSpecifier {
            base: data.base,
            property_name: c.opt(&data.property_name, NodeTest::IDENTIFIER)?,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
        }),
        Node::ExternalModuleReference(data) => update!(c, node, ExternalModuleReference {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),

        // JSX
        Node::JsxElement(data) => update!(c, node, JsxElement {
            base: data.base,
            opening_element: c.node("opening_element", &data.opening_element, NodeTest::JSX_OPENING_ELEMENT)?,
            children: c.list(&data.children, NodeTest::JSX_CHILD)?,
            closing_element: c.node("closing_element", &data.closing_element, NodeTest::JSX_CLOSING_ELEMENT)?,
        }),
        Node::JsxSelfClosingElement(data) => update!(c, node, JsxSelfClosingElement {
            base: data.base,
            tag_name: c.node("tag_name", &data.tag_name, NodeTest::JSX_TAG_NAME)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
            attributes: c.node("attributes", &data.attributes, NodeTest::JSX_ATTRIBUTES)?,
        }),
        Node::JsxOpeningElement(data) => update!(c, node, JsxOpeningElement {
            base: data.base,
            tag_name: c.node("tag_name", &data.tag_name, NodeTest::JSX_TAG_NAME)?,
            type_arguments: c.opt_list(&data.type_arguments, NodeTest::TYPE_NODE)?,
            attributes: c.node("attributes", &data.attributes, NodeTest::JSX_ATTRIBUTES)?,
        }),
        Node::JsxClosingElement(data) => update!(c, node, JsxClosingElement {
            base: data.base,
            tag_name: c.node("tag_name", &data.tag_name, NodeTest::JSX_TAG_NAME)?,
        }),
        Node::JsxFragment(data) => update!(c, node, JsxFragment {
            base: data.base,
            opening_fragment: c.node("opening_fragment", &data.opening_fragment, NodeTest::JSX_OPENING_FRAGMENT)?,
            children: c.list(&data.children, NodeTest::JSX_CHILD)?,
            closing_fragment: c.node("closing_fragment", &data.closing_fragment, NodeTest::JSX_CLOSING_FRAGMENT)?,
        }),
        Node::JsxAttribute(data) => update!(c, node, JsxAttribute {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            initializer: c.opt(&data.initializer, NodeTest::STRING_LITERAL_OR_JSX_EXPRESSION)?,
        }),
        Node::JsxAttributes(data) => update!(c, node, JsxAttributes {
            base: data.base,
            properties: c.list(&data.properties, NodeTest::JSX_ATTRIBUTE_LIKE)?,
        }),
        Node::JsxSpreadAttribute(data) => update!(c, node, JsxSpreadAttribute {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::JsxExpression(data) => update!(c, node, JsxExpression {
            base: data.base,
            dot_dot_dot_token: data.dot_dot_dot_token.clone(),
            expression: c.opt(&data.expression, NodeTest::EXPRESSION)?,
        }),

        // Clauses
        Node::CaseClause(data) => update!(c, node, CaseClause {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
            statements: c.list(&data.statements, NodeTest::STATEMENT)?,
        }),
        Node::DefaultClause(data) => update!(c, node, DefaultClause {
            base: data.base,
            statements: c.list(&data.statements, NodeTest::STATEMENT)?,
        }),
        Node::HeritageClause(data) => update!(c, node, HeritageClause {
            base: data.base,
            token: data.token,
            types: c.list(&data.types, NodeTest::EXPRESSION_WITH_TYPE_ARGUMENTS)?,
        }),
        Node::CatchClause(data) => update!(c, node, CatchClause {
            base: data.base,
            variable_declaration: c.opt(&data.variable_declaration, NodeTest::VARIABLE_DECLARATION)?,
            block: c.node("block", &data.block, NodeTest::BLOCK)?,
        }),

        // Object literal members
        Node::PropertyAssignment(data) => update!(c, node, PropertyAssignment {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            initializer: c.node("initializer", &data.initializer, NodeTest::EXPRESSION)?,
        }),
        Node::ShorthandPropertyAssignment(data) => update!(c, node, ShorthandPropertyAssignment {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::IDENTIFIER)?,
            object_assignment_initializer: c.opt(&data.object_assignment_initializer, NodeTest::EXPRESSION)?,
        }),
        Node::SpreadAssignment(data) => update!(c, node, SpreadAssignment {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),

        Node::EnumMember(data) => update!(c, node, EnumMember {
            base: data.base,
            name: c.node("name", &data.name, NodeTest::PROPERTY_NAME)?,
            initializer: c.opt(&data.initializer, NodeTest::EXPRESSION)?,
        }),

        Node::SourceFile(data) => {
            c.ctx.reserve_names(node);
            let ensure_use_strict = c.ctx.options.ensure_use_strict;
            let statements = visit_lexical_environment(&data.statements, &mut *c.visitor, &mut *c.ctx, None, ensure_use_strict)?;
            update!(c, node, SourceFile {
                base: data.base,
                file_name: data.file_name.clone(),
                statements,
            })
        }

        // Transformation nodes
        Node::PartiallyEmittedExpression(data) => update!(c, node, PartiallyEmittedExpression {
            base: data.base,
            expression: c.node("expression", &data.expression, NodeTest::EXPRESSION)?,
        }),
        Node::CommaListExpression(data) => update!(c, node, CommaListExpression {
            base: data.base,
            elements: c.list(&data.elements, NodeTest::EXPRESSION)?,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::visitor::VisitResult;

    fn identity(node: &Arc<Node>, _: &mut TransformationContext) -> Result<VisitResult> {
        Ok(VisitResult::unchanged(node))
    }

    #[test]
    fn test_tokens_short_circuit() {
        let mut ctx = TransformationContext::default();
        let token = ctx.factory.create_token(SyntaxKind::PlusToken);
        let mut calls = 0;
        let mut counting = |node: &Arc<Node>, _: &mut TransformationContext| -> Result<VisitResult> {
            calls += 1;
            Ok(VisitResult::unchanged(node))
        };
        let visited = visit_each_child(&token, &mut counting, &mut ctx).unwrap();
        assert!(Arc::ptr_eq(&visited, &token));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_binary_operator_token_skipped_unless_enabled() {
        let mut ctx = TransformationContext::default();
        let a = ctx.factory.create_identifier("a");
        let b = ctx.factory.create_identifier("b");
        let sum = ctx.factory.create_binary_op(a, SyntaxKind::PlusToken, b);

        let mut seen = Vec::new();
        let mut recording = |node: &Arc<Node>, _: &mut TransformationContext| -> Result<VisitResult> {
            seen.push(node.kind());
            Ok(VisitResult::unchanged(node))
        };
        visit_each_child(&sum, &mut recording, &mut ctx).unwrap();
        assert_eq!(seen, vec![SyntaxKind::Identifier, SyntaxKind::Identifier]);

        ctx.options.visit_tokens = true;
        seen.clear();
        let mut recording = |node: &Arc<Node>, _: &mut TransformationContext| -> Result<VisitResult> {
            seen.push(node.kind());
            Ok(VisitResult::unchanged(node))
        };
        visit_each_child(&sum, &mut recording, &mut ctx).unwrap();
        assert_eq!(seen, vec![SyntaxKind::Identifier, SyntaxKind::PlusToken, SyntaxKind::Identifier]);
    }

    #[test]
    fn test_removing_required_child_is_reported() {
        let mut ctx = TransformationContext::default();
        let operand = ctx.factory.create_identifier("x");
        let statement = ctx.factory.create_expression_statement(operand);
        let mut remove = |_: &Arc<Node>, _: &mut TransformationContext| -> Result<VisitResult> {
            Ok(VisitResult::Nothing)
        };
        let err = visit_each_child(&statement, &mut remove, &mut ctx).unwrap_err();
        assert_eq!(
            err,
            RewriteError::MissingChild { kind: SyntaxKind::ExpressionStatement, field: "expression" }
        );
    }

    #[test]
    fn test_if_statement_lifts_statement_lists_to_block() {
        let mut ctx = TransformationContext::default();
        let condition = ctx.factory.create_identifier("ok");
        let then_statement = ctx.factory.create_return(None);
        let statement = ctx.factory.create_if(condition, Arc::clone(&then_statement), None);

        let mut split = |node: &Arc<Node>, ctx: &mut TransformationContext| -> Result<VisitResult> {
            if node.kind() == SyntaxKind::ReturnStatement {
                let first = ctx.factory.create_expression_statement(ctx.factory.create_identifier("log"));
                return Ok(VisitResult::Nodes(vec![first, Arc::clone(node)]));
            }
            Ok(VisitResult::unchanged(node))
        };
        let visited = visit_each_child(&statement, &mut split, &mut ctx).unwrap();
        let Node::IfStatement(data) = &*visited else { panic!("expected if statement") };
        assert_eq!(data.then_statement.kind(), SyntaxKind::Block);
        assert_eq!(data.then_statement.children().len(), 2);
    }

    #[test]
    fn test_identity_visit_of_function_keeps_node() {
        let mut ctx = TransformationContext::default();
        let name = ctx.factory.create_identifier("x");
        let parameter = ctx.factory.create_parameter(name, None);
        let body = ctx.factory.create_block(vec![ctx.factory.create_return(None)], true);
        let function = ctx.factory.create_function_declaration(None, vec![parameter], Some(body));

        let visited = visit_each_child(&function, &mut identity, &mut ctx).unwrap();
        assert!(Arc::ptr_eq(&visited, &function));
        assert!(ctx.finish().is_ok());
    }
}
