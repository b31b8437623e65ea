use std::sync::{Arc, Weak};

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::node::*;
use super::syntax_kind::SyntaxKind;

/// Creates and updates nodes.
///
/// Updates are identity-preserving: when every supplied field is the same as
/// the node's current field (children by reference, attributes by value) the
/// original `Arc` comes back untouched. Otherwise a fresh node is built that
/// inherits the original's range and flags and is marked `SYNTHESIZED`.
#[derive(Debug, Default)]
pub struct NodeFactory {
    /// Generated names keyed by the address of the node they were made for.
    /// The weak handle tells a live entry from a reused address.
    generated_names: FxHashMap<usize, (Weak<Node>, Arc<Node>)>,
    /// Identifier texts temporary names must not collide with.
    reserved_names: FxHashSet<String>,
    temp_count: u32,
}

// Letters skipped when minting temporary names.
const TEMP_I: u32 = 8;
const TEMP_N: u32 = 13;

impl NodeFactory {
    pub fn new() -> Self {
        NodeFactory::default()
    }

    pub fn update<T: NodeData>(&self, original: &Arc<Node>, mut updated: T) -> Arc<Node> {
        if let Some(current) = T::from_node(original) {
            if current.same_fields(&updated) {
                return Arc::clone(original);
            }
        }
        *updated.base_mut() = NodeBase::new(
            original.range(),
            original.flags() | NodeFlags::SYNTHESIZED,
        );
        let node: Node = updated.into();
        debug!("Rebuilt {} node", node.kind());
        Arc::new(node)
    }

    // Optional-chain aware updates. The plain forms keep the node's `?.` token
    // as is; the chain forms take the (possibly visited) token explicitly.

    pub fn update_property_access(
        &self,
        original: &Arc<Node>,
        data: &PropertyAccessExpression,
        expression: Arc<Node>,
        name: Arc<Node>,
    ) -> Arc<Node> {
        self.update(
            original,
            PropertyAccessExpression {
                base: data.base,
                expression,
                question_dot_token: data.question_dot_token.clone(),
                name,
            },
        )
    }

    pub fn update_property_access_chain(
        &self,
        original: &Arc<Node>,
        data: &PropertyAccessExpression,
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        name: Arc<Node>,
    ) -> Arc<Node> {
        self.update(original, PropertyAccessExpression { base: data.base, expression, question_dot_token, name })
    }

    pub fn update_element_access(
        &self,
        original: &Arc<Node>,
        data: &ElementAccessExpression,
        expression: Arc<Node>,
        argument_expression: Arc<Node>,
    ) -> Arc<Node> {
        self.update(
            original,
            ElementAccessExpression {
                base: data.base,
                expression,
                question_dot_token: data.question_dot_token.clone(),
                argument_expression,
            },
        )
    }

    pub fn update_element_access_chain(
        &self,
        original: &Arc<Node>,
        data: &ElementAccessExpression,
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        argument_expression: Arc<Node>,
    ) -> Arc<Node> {
        self.update(
            original,
            ElementAccessExpression { base: data.base, expression, question_dot_token, argument_expression },
        )
    }

    pub fn update_call(
        &self,
        original: &Arc<Node>,
        data: &CallExpression,
        expression: Arc<Node>,
        type_arguments: Option<NodeList>,
        arguments: NodeList,
    ) -> Arc<Node> {
        self.update(
            original,
            CallExpression {
                base: data.base,
                expression,
                question_dot_token: data.question_dot_token.clone(),
                type_arguments,
                arguments,
            },
        )
    }

    pub fn update_call_chain(
        &self,
        original: &Arc<Node>,
        data: &CallExpression,
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        type_arguments: Option<NodeList>,
        arguments: NodeList,
    ) -> Arc<Node> {
        self.update(
            original,
            CallExpression { base: data.base, expression, question_dot_token, type_arguments, arguments },
        )
    }

    pub fn update_non_null(&self, original: &Arc<Node>, data: &NonNullExpression, expression: Arc<Node>) -> Arc<Node> {
        self.update(original, NonNullExpression { base: data.base, expression })
    }

    pub fn update_non_null_chain(
        &self,
        original: &Arc<Node>,
        data: &NonNullExpression,
        expression: Arc<Node>,
    ) -> Arc<Node> {
        debug_assert!(original.flags().contains(NodeFlags::OPTIONAL_CHAIN));
        self.update(original, NonNullExpression { base: data.base, expression })
    }

    /// Property declarations carry at most one of `?` and `!`. The token is
    /// written back to whichever slot matches its kind.
    #[allow(clippy::too_many_arguments)]
    pub fn update_property_declaration(
        &self,
        original: &Arc<Node>,
        data: &PropertyDeclaration,
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        question_or_exclamation_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
        initializer: Option<Arc<Node>>,
    ) -> Arc<Node> {
        let (question_token, exclamation_token) = match question_or_exclamation_token {
            Some(token) if token.kind() == SyntaxKind::ExclamationToken => (None, Some(token)),
            Some(token) => (Some(token), None),
            None => (None, None),
        };
        self.update(
            original,
            PropertyDeclaration {
                base: data.base,
                decorators,
                modifiers,
                name,
                question_token,
                exclamation_token,
                ty,
                initializer,
            },
        )
    }

    pub fn update_block(&self, original: &Arc<Node>, statements: NodeList) -> Arc<Node> {
        let multi_line = match &**original {
            Node::Block(block) => block.multi_line,
            _ => true,
        };
        self.update(original, Block { base: NodeBase::default(), statements, multi_line })
    }

    pub fn update_parameter(
        &self,
        original: &Arc<Node>,
        data: &Parameter,
        name: Arc<Node>,
        initializer: Option<Arc<Node>>,
    ) -> Arc<Node> {
        self.update(
            original,
            Parameter {
                base: data.base,
                decorators: data.decorators.clone(),
                modifiers: data.modifiers.clone(),
                dot_dot_dot_token: data.dot_dot_dot_token.clone(),
                name,
                question_token: data.question_token.clone(),
                ty: data.ty.clone(),
                initializer,
            },
        )
    }

    // Arrays and ranges

    pub fn create_node_array(&self, elements: Vec<Arc<Node>>, has_trailing_comma: bool) -> NodeList {
        let mut array = NodeArray::from_nodes(elements);
        array.has_trailing_comma = has_trailing_comma;
        Arc::new(array)
    }

    pub fn set_text_range(&self, mut node: Arc<Node>, range: TextRange) -> Arc<Node> {
        Arc::make_mut(&mut node).base_mut().range = range;
        node
    }

    pub fn set_array_text_range(&self, mut array: NodeList, range: TextRange) -> NodeList {
        Arc::make_mut(&mut array).range = range;
        array
    }

    /// Shallow copy with a new identity.
    pub fn clone_node(&self, node: &Arc<Node>) -> Arc<Node> {
        let mut copy = (**node).clone();
        copy.base_mut().flags |= NodeFlags::SYNTHESIZED;
        Arc::new(copy)
    }

    // Leaves

    pub fn create_token(&self, kind: SyntaxKind) -> Arc<Node> {
        Arc::new(Node::Token(Token { base: NodeBase::synthesized(), kind }))
    }

    pub fn create_literal(&self, kind: SyntaxKind, text: &str) -> Arc<Node> {
        Arc::new(Node::Literal(Literal { base: NodeBase::synthesized(), kind, text: text.to_string() }))
    }

    pub fn create_numeric_literal(&self, text: &str) -> Arc<Node> {
        self.create_literal(SyntaxKind::NumericLiteral, text)
    }

    pub fn create_string_literal(&self, text: &str) -> Arc<Node> {
        self.create_literal(SyntaxKind::StringLiteral, text)
    }

    pub fn create_identifier(&self, text: &str) -> Arc<Node> {
        Arc::new(Node::Identifier(Identifier {
            base: NodeBase::synthesized(),
            text: text.to_string(),
            type_arguments: None,
        }))
    }

    /// Returns the temporary identifier standing for `node`, minting it on
    /// first request. Names run `_a` … `_z` (without `_i` and `_n`), then `_0`, `_1`, …,
    /// skipping any name passed to [`reserve_names`](Self::reserve_names).
    pub fn generated_name_for_node(&mut self, node: &Arc<Node>) -> Arc<Node> {
        let key = Arc::as_ptr(node) as usize;
        if let Some((owner, name)) = self.generated_names.get(&key) {
            if owner.upgrade().is_some_and(|owner| Arc::ptr_eq(&owner, node)) {
                return Arc::clone(name);
            }
        }
        let name = self.create_temp_name();
        self.generated_names.insert(key, (Arc::downgrade(node), Arc::clone(&name)));
        name
    }

    /// Forgets the per-node names handed out so far. Names already minted
    /// stay reserved.
    pub fn release_generated_names(&mut self) {
        self.generated_names.clear();
    }

    /// Reserves every identifier text found in `node` and its descendants.
    pub fn reserve_names(&mut self, node: &Arc<Node>) {
        if let Some(text) = node.identifier_text() {
            if !self.reserved_names.contains(text) {
                self.reserved_names.insert(text.to_string());
            }
        }
        node.for_each_child(|child| self.reserve_names(child));
    }

    pub fn is_reserved_name(&self, text: &str) -> bool {
        self.reserved_names.contains(text)
    }

    /// A fresh temporary identifier that stands for no particular node.
    pub fn create_temp_name(&mut self) -> Arc<Node> {
        let text = self.next_temp_name();
        self.reserved_names.insert(text.clone());
        Arc::new(Node::Identifier(Identifier {
            base: NodeBase::new(TextRange::UNSET, NodeFlags::SYNTHESIZED | NodeFlags::GENERATED_NAME),
            text,
            type_arguments: None,
        }))
    }

    fn next_temp_name(&mut self) -> String {
        loop {
            let count = self.temp_count;
            self.temp_count += 1;
            if count == TEMP_I || count == TEMP_N {
                continue;
            }
            let name = if count < 26 {
                format!("_{}", char::from(b'a' + count as u8))
            } else {
                format!("_{}", count - 26)
            };
            if !self.reserved_names.contains(&name) {
                return name;
            }
        }
    }

    // Expressions

    pub fn create_binary(&self, left: Arc<Node>, operator_token: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::BinaryExpression(BinaryExpression {
            base: NodeBase::synthesized(),
            left,
            operator_token,
            right,
        }))
    }

    pub fn create_binary_op(&self, left: Arc<Node>, operator: SyntaxKind, right: Arc<Node>) -> Arc<Node> {
        let operator_token = self.create_token(operator);
        self.create_binary(left, operator_token, right)
    }

    pub fn create_assignment(&self, left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        self.create_binary_op(left, SyntaxKind::EqualsToken, right)
    }

    pub fn create_strict_equality(&self, left: Arc<Node>, right: Arc<Node>) -> Arc<Node> {
        self.create_binary_op(left, SyntaxKind::EqualsEqualsEqualsToken, right)
    }

    pub fn create_void_zero(&self) -> Arc<Node> {
        Arc::new(Node::VoidExpression(VoidExpression {
            base: NodeBase::synthesized(),
            expression: self.create_numeric_literal("0"),
        }))
    }

    pub fn create_type_of(&self, expression: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::TypeOfExpression(TypeOfExpression { base: NodeBase::synthesized(), expression }))
    }

    /// `value === void 0` for `"undefined"`, otherwise `typeof value === "tag"`.
    pub fn create_type_check(&self, value: Arc<Node>, tag: &str) -> Arc<Node> {
        if tag == "undefined" {
            self.create_strict_equality(value, self.create_void_zero())
        } else {
            let type_of = self.create_type_of(value);
            self.create_strict_equality(type_of, self.create_string_literal(tag))
        }
    }

    pub fn create_conditional(&self, condition: Arc<Node>, when_true: Arc<Node>, when_false: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::ConditionalExpression(ConditionalExpression {
            base: NodeBase::synthesized(),
            condition,
            question_token: self.create_token(SyntaxKind::QuestionToken),
            when_true,
            colon_token: self.create_token(SyntaxKind::ColonToken),
            when_false,
        }))
    }

    pub fn create_call(&self, expression: Arc<Node>, arguments: Vec<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::CallExpression(CallExpression {
            base: NodeBase::synthesized(),
            expression,
            question_dot_token: None,
            type_arguments: None,
            arguments: self.create_node_array(arguments, false),
        }))
    }

    pub fn create_arrow_function(&self, parameters: Vec<Arc<Node>>, body: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::ArrowFunction(ArrowFunction {
            base: NodeBase::synthesized(),
            modifiers: None,
            type_parameters: None,
            parameters: self.create_node_array(parameters, false),
            ty: None,
            equals_greater_than_token: self.create_token(SyntaxKind::EqualsGreaterThanToken),
            body,
        }))
    }

    // Statements

    pub fn create_block(&self, statements: Vec<Arc<Node>>, multi_line: bool) -> Arc<Node> {
        Arc::new(Node::Block(Block {
            base: NodeBase::synthesized(),
            statements: self.create_node_array(statements, false),
            multi_line,
        }))
    }

    pub fn create_expression_statement(&self, expression: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::ExpressionStatement(ExpressionStatement { base: NodeBase::synthesized(), expression }))
    }

    pub fn create_return(&self, expression: Option<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::ReturnStatement(ReturnStatement { base: NodeBase::synthesized(), expression }))
    }

    pub fn create_if(
        &self,
        expression: Arc<Node>,
        then_statement: Arc<Node>,
        else_statement: Option<Arc<Node>>,
    ) -> Arc<Node> {
        Arc::new(Node::IfStatement(IfStatement {
            base: NodeBase::synthesized(),
            expression,
            then_statement,
            else_statement,
        }))
    }

    pub fn create_variable_declaration(
        &self,
        name: Arc<Node>,
        ty: Option<Arc<Node>>,
        initializer: Option<Arc<Node>>,
    ) -> Arc<Node> {
        Arc::new(Node::VariableDeclaration(VariableDeclaration {
            base: NodeBase::synthesized(),
            name,
            exclamation_token: None,
            ty,
            initializer,
        }))
    }

    /// `flags` selects `let`/`const`; empty means `var`.
    pub fn create_variable_declaration_list(&self, declarations: Vec<Arc<Node>>, flags: NodeFlags) -> Arc<Node> {
        Arc::new(Node::VariableDeclarationList(VariableDeclarationList {
            base: NodeBase::new(TextRange::UNSET, NodeFlags::SYNTHESIZED | (flags & NodeFlags::BLOCK_SCOPED)),
            declarations: self.create_node_array(declarations, false),
        }))
    }

    pub fn create_variable_statement(&self, modifiers: Option<NodeList>, declaration_list: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::VariableStatement(VariableStatement {
            base: NodeBase::synthesized(),
            decorators: None,
            modifiers,
            declaration_list,
        }))
    }

    pub fn create_use_strict_prologue(&self) -> Arc<Node> {
        self.create_expression_statement(self.create_string_literal("use strict"))
    }

    // Declarations

    pub fn create_parameter(&self, name: Arc<Node>, initializer: Option<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::Parameter(Parameter {
            base: NodeBase::synthesized(),
            decorators: None,
            modifiers: None,
            dot_dot_dot_token: None,
            name,
            question_token: None,
            ty: None,
            initializer,
        }))
    }

    pub fn create_rest_parameter(&self, name: Arc<Node>) -> Arc<Node> {
        Arc::new(Node::Parameter(Parameter {
            base: NodeBase::synthesized(),
            decorators: None,
            modifiers: None,
            dot_dot_dot_token: Some(self.create_token(SyntaxKind::DotDotDotToken)),
            name,
            question_token: None,
            ty: None,
            initializer: None,
        }))
    }

    pub fn create_binding_element(&self, name: Arc<Node>, initializer: Option<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::BindingElement(BindingElement {
            base: NodeBase::synthesized(),
            dot_dot_dot_token: None,
            property_name: None,
            name,
            initializer,
        }))
    }

    pub fn create_object_binding_pattern(&self, elements: Vec<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::ObjectBindingPattern(ObjectBindingPattern {
            base: NodeBase::synthesized(),
            elements: self.create_node_array(elements, false),
        }))
    }

    pub fn create_array_binding_pattern(&self, elements: Vec<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::ArrayBindingPattern(ArrayBindingPattern {
            base: NodeBase::synthesized(),
            elements: self.create_node_array(elements, false),
        }))
    }

    pub fn create_function_declaration(
        &self,
        name: Option<Arc<Node>>,
        parameters: Vec<Arc<Node>>,
        body: Option<Arc<Node>>,
    ) -> Arc<Node> {
        Arc::new(Node::FunctionDeclaration(FunctionDeclaration {
            base: NodeBase::synthesized(),
            decorators: None,
            modifiers: None,
            asterisk_token: None,
            name,
            type_parameters: None,
            parameters: self.create_node_array(parameters, false),
            ty: None,
            body,
        }))
    }

    pub fn create_source_file(&self, file_name: &str, statements: Vec<Arc<Node>>) -> Arc<Node> {
        Arc::new(Node::SourceFile(SourceFile {
            base: NodeBase::synthesized(),
            file_name: file_name.to_string(),
            statements: self.create_node_array(statements, false),
        }))
    }

    // Converters

    /// Turns a concise arrow body into `{ return body; }`. Blocks pass through.
    pub fn convert_to_function_block(&self, body: &Arc<Node>) -> Arc<Node> {
        if matches!(&**body, Node::Block(_)) {
            return Arc::clone(body);
        }
        let range = body.range();
        let statement = self.set_text_range(self.create_return(Some(Arc::clone(body))), range);
        self.set_text_range(self.create_block(vec![statement], true), range)
    }

    /// Inserts `declarations` after the leading prologue directives of
    /// `statements`. Returns `statements` itself when there is nothing to add.
    pub fn merge_lexical_environment(&self, statements: &NodeList, declarations: Vec<Arc<Node>>) -> NodeList {
        if declarations.is_empty() {
            return Arc::clone(statements);
        }
        let prologue_len = statements.iter().take_while(|s| s.is_prologue_directive()).count();
        let merged: Vec<Arc<Node>> = statements
            .iter()
            .take(prologue_len)
            .cloned()
            .chain(declarations)
            .chain(statements.iter().skip(prologue_len).cloned())
            .collect();
        let array = self.create_node_array(merged, statements.has_trailing_comma);
        self.set_array_text_range(array, statements.range)
    }

    /// Prepends `"use strict";` unless the prologue already has it.
    pub fn ensure_use_strict(&self, statements: &NodeList) -> NodeList {
        let has_directive = statements
            .iter()
            .take_while(|s| s.is_prologue_directive())
            .any(|s| s.is_use_strict_directive());
        if has_directive {
            return Arc::clone(statements);
        }
        let mut elements = Vec::with_capacity(statements.len() + 1);
        elements.push(self.create_use_strict_prologue());
        elements.extend(statements.iter().cloned());
        let array = self.create_node_array(elements, statements.has_trailing_comma);
        self.set_array_text_range(array, statements.range)
    }
}
