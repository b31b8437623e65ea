//! Kind classification predicates and the named [`NodeTest`]s built from them.
//!
//! These answer "may this node stand in this slot", which is what the visit
//! primitives check a visitor's output against.

use std::fmt;

use super::node_types::Node;
use crate::ir::syntax_kind::SyntaxKind;

/// A named node classification. The name is what gets reported when a
/// visitor produces a node that fails the test.
#[derive(Clone, Copy)]
pub struct NodeTest {
    pub name: &'static str,
    pub test: fn(&Node) -> bool,
}

impl NodeTest {
    pub const fn new(name: &'static str, test: fn(&Node) -> bool) -> Self {
        NodeTest { name, test }
    }

    pub fn matches(&self, node: &Node) -> bool {
        (self.test)(node)
    }

    pub const EXPRESSION: NodeTest = NodeTest::new("Expression", is_expression);
    pub const STATEMENT: NodeTest = NodeTest::new("Statement", is_statement);
    pub const TYPE_NODE: NodeTest = NodeTest::new("TypeNode", is_type_node);
    pub const TOKEN: NodeTest = NodeTest::new("Token", is_token);
    pub const MODIFIER: NodeTest = NodeTest::new("Modifier", is_modifier);
    pub const DECORATOR: NodeTest = NodeTest::new("Decorator", is_decorator);
    pub const IDENTIFIER: NodeTest = NodeTest::new("Identifier", is_identifier);
    pub const BINDING_NAME: NodeTest = NodeTest::new("BindingName", is_binding_name);
    pub const PROPERTY_NAME: NodeTest = NodeTest::new("PropertyName", is_property_name);
    pub const ENTITY_NAME: NodeTest = NodeTest::new("EntityName", is_entity_name);
    pub const PARAMETER: NodeTest = NodeTest::new("ParameterDeclaration", is_parameter);
    pub const TYPE_PARAMETER: NodeTest =
        NodeTest::new("TypeParameterDeclaration", is_type_parameter);
    pub const TYPE_NODE_OR_TYPE_PARAMETER: NodeTest =
        NodeTest::new("TypeNode | TypeParameterDeclaration", is_type_node_or_type_parameter);
    pub const TYPE_ELEMENT: NodeTest = NodeTest::new("TypeElement", is_type_element);
    pub const CLASS_ELEMENT: NodeTest = NodeTest::new("ClassElement", is_class_element);
    pub const HERITAGE_CLAUSE: NodeTest = NodeTest::new("HeritageClause", is_heritage_clause);
    pub const EXPRESSION_WITH_TYPE_ARGUMENTS: NodeTest =
        NodeTest::new("ExpressionWithTypeArguments", is_expression_with_type_arguments);
    pub const BLOCK: NodeTest = NodeTest::new("Block", is_block);
    pub const CONCISE_BODY: NodeTest = NodeTest::new("ConciseBody", is_concise_body);
    pub const FOR_INITIALIZER: NodeTest = NodeTest::new("ForInitializer", is_for_initializer);
    pub const VARIABLE_DECLARATION: NodeTest =
        NodeTest::new("VariableDeclaration", is_variable_declaration);
    pub const VARIABLE_DECLARATION_LIST: NodeTest =
        NodeTest::new("VariableDeclarationList", is_variable_declaration_list);
    pub const BINDING_ELEMENT: NodeTest = NodeTest::new("BindingElement", is_binding_element);
    pub const ARRAY_BINDING_ELEMENT: NodeTest =
        NodeTest::new("ArrayBindingElement", is_array_binding_element);
    pub const OBJECT_LITERAL_ELEMENT: NodeTest =
        NodeTest::new("ObjectLiteralElementLike", is_object_literal_element_like);
    pub const TEMPLATE_LITERAL: NodeTest = NodeTest::new("TemplateLiteral", is_template_literal);
    pub const TEMPLATE_HEAD: NodeTest = NodeTest::new("TemplateHead", is_template_head);
    pub const TEMPLATE_MIDDLE_OR_TAIL: NodeTest =
        NodeTest::new("TemplateMiddle | TemplateTail", is_template_middle_or_tail);
    pub const TEMPLATE_SPAN: NodeTest = NodeTest::new("TemplateSpan", is_template_span);
    pub const CASE_BLOCK: NodeTest = NodeTest::new("CaseBlock", is_case_block);
    pub const CASE_OR_DEFAULT_CLAUSE: NodeTest =
        NodeTest::new("CaseOrDefaultClause", is_case_or_default_clause);
    pub const CATCH_CLAUSE: NodeTest = NodeTest::new("CatchClause", is_catch_clause);
    pub const MODULE_BODY: NodeTest = NodeTest::new("ModuleBody", is_module_body);
    pub const MODULE_REFERENCE: NodeTest = NodeTest::new("ModuleReference", is_module_reference);
    pub const IMPORT_CLAUSE: NodeTest = NodeTest::new("ImportClause", is_import_clause);
    pub const NAMED_IMPORT_BINDINGS: NodeTest =
        NodeTest::new("NamedImportBindings", is_named_import_bindings);
    pub const IMPORT_SPECIFIER: NodeTest = NodeTest::new("ImportSpecifier", is_import_specifier);
    pub const NAMED_EXPORT_BINDINGS: NodeTest =
        NodeTest::new("NamedExportBindings", is_named_export_bindings);
    pub const EXPORT_SPECIFIER: NodeTest = NodeTest::new("ExportSpecifier", is_export_specifier);
    pub const ENUM_MEMBER: NodeTest = NodeTest::new("EnumMember", is_enum_member);
    pub const JSX_OPENING_ELEMENT: NodeTest =
        NodeTest::new("JsxOpeningElement", is_jsx_opening_element);
    pub const JSX_CLOSING_ELEMENT: NodeTest =
        NodeTest::new("JsxClosingElement", is_jsx_closing_element);
    pub const JSX_OPENING_FRAGMENT: NodeTest =
        NodeTest::new("JsxOpeningFragment", is_jsx_opening_fragment);
    pub const JSX_CLOSING_FRAGMENT: NodeTest =
        NodeTest::new("JsxClosingFragment", is_jsx_closing_fragment);
    pub const JSX_CHILD: NodeTest = NodeTest::new("JsxChild", is_jsx_child);
    pub const JSX_ATTRIBUTES: NodeTest = NodeTest::new("JsxAttributes", is_jsx_attributes);
    pub const JSX_ATTRIBUTE_LIKE: NodeTest =
        NodeTest::new("JsxAttributeLike", is_jsx_attribute_like);
    pub const JSX_TAG_NAME: NodeTest =
        NodeTest::new("JsxTagNameExpression", is_jsx_tag_name_expression);
    pub const STRING_LITERAL_OR_JSX_EXPRESSION: NodeTest =
        NodeTest::new("StringLiteral | JsxExpression", is_string_literal_or_jsx_expression);
}

impl fmt::Debug for NodeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeTest({})", self.name)
    }
}

pub fn is_token(node: &Node) -> bool {
    node.kind().is_token()
}

pub fn is_modifier(node: &Node) -> bool {
    matches!(node, Node::Token(token) if token.kind.is_modifier())
}

pub fn is_identifier(node: &Node) -> bool {
    matches!(node, Node::Identifier(_))
}

pub fn is_decorator(node: &Node) -> bool {
    matches!(node, Node::Decorator(_))
}

pub fn is_literal_kind(node: &Node, kind: SyntaxKind) -> bool {
    matches!(node, Node::Literal(literal) if literal.kind == kind)
}

pub fn is_expression(node: &Node) -> bool {
    use SyntaxKind::*;
    match node {
        Node::Token(token) => token.kind.is_keyword_expression(),
        Node::Literal(literal) => matches!(
            literal.kind,
            NumericLiteral
                | BigIntLiteral
                | StringLiteral
                | RegularExpressionLiteral
                | NoSubstitutionTemplateLiteral
        ),
        _ => matches!(
            node.kind(),
            Identifier
                | ArrayLiteralExpression
                | ObjectLiteralExpression
                | PropertyAccessExpression
                | ElementAccessExpression
                | CallExpression
                | NewExpression
                | TaggedTemplateExpression
                | TypeAssertionExpression
                | ParenthesizedExpression
                | FunctionExpression
                | ArrowFunction
                | DeleteExpression
                | TypeOfExpression
                | VoidExpression
                | AwaitExpression
                | PrefixUnaryExpression
                | PostfixUnaryExpression
                | BinaryExpression
                | ConditionalExpression
                | TemplateExpression
                | YieldExpression
                | SpreadElement
                | ClassExpression
                | OmittedExpression
                | ExpressionWithTypeArguments
                | AsExpression
                | NonNullExpression
                | MetaProperty
                | JsxElement
                | JsxSelfClosingElement
                | JsxFragment
                | PartiallyEmittedExpression
                | CommaListExpression
        ),
    }
}

pub fn is_statement(node: &Node) -> bool {
    use SyntaxKind::*;
    matches!(
        node.kind(),
        Block
            | VariableStatement
            | EmptyStatement
            | ExpressionStatement
            | IfStatement
            | DoStatement
            | WhileStatement
            | ForStatement
            | ForInStatement
            | ForOfStatement
            | ContinueStatement
            | BreakStatement
            | ReturnStatement
            | WithStatement
            | SwitchStatement
            | LabeledStatement
            | ThrowStatement
            | TryStatement
            | DebuggerStatement
            | FunctionDeclaration
            | ClassDeclaration
            | InterfaceDeclaration
            | TypeAliasDeclaration
            | EnumDeclaration
            | ModuleDeclaration
            | NamespaceExportDeclaration
            | ImportEqualsDeclaration
            | ImportDeclaration
            | ExportAssignment
            | ExportDeclaration
            | NotEmittedStatement
    )
}

pub fn is_type_node(node: &Node) -> bool {
    let kind = node.kind();
    if kind.is_token() {
        return kind.is_keyword_type() || kind == SyntaxKind::ThisKeyword;
    }
    (kind >= SyntaxKind::TypePredicate && kind <= SyntaxKind::ThisType)
        || kind == SyntaxKind::ExpressionWithTypeArguments
}

pub fn is_binding_pattern(node: &Node) -> bool {
    matches!(node, Node::ObjectBindingPattern(_) | Node::ArrayBindingPattern(_))
}

pub fn is_binding_name(node: &Node) -> bool {
    is_identifier(node) || is_binding_pattern(node)
}

pub fn is_property_name(node: &Node) -> bool {
    is_identifier(node)
        || is_literal_kind(node, SyntaxKind::StringLiteral)
        || is_literal_kind(node, SyntaxKind::NumericLiteral)
        || matches!(node, Node::ComputedPropertyName(_))
}

pub fn is_entity_name(node: &Node) -> bool {
    matches!(node, Node::Identifier(_) | Node::QualifiedName(_))
}

pub fn is_parameter(node: &Node) -> bool {
    matches!(node, Node::Parameter(_))
}

pub fn is_type_parameter(node: &Node) -> bool {
    matches!(node, Node::TypeParameter(_))
}

pub fn is_type_node_or_type_parameter(node: &Node) -> bool {
    is_type_node(node) || is_type_parameter(node)
}

pub fn is_type_element(node: &Node) -> bool {
    matches!(
        node,
        Node::PropertySignature(_)
            | Node::MethodSignature(_)
            | Node::CallSignature(_)
            | Node::ConstructSignature(_)
            | Node::IndexSignature(_)
    )
}

pub fn is_class_element(node: &Node) -> bool {
    matches!(
        node,
        Node::Constructor(_)
            | Node::PropertyDeclaration(_)
            | Node::MethodDeclaration(_)
            | Node::GetAccessor(_)
            | Node::SetAccessor(_)
            | Node::IndexSignature(_)
            | Node::SemicolonClassElement(_)
    )
}

pub fn is_heritage_clause(node: &Node) -> bool {
    matches!(node, Node::HeritageClause(_))
}

pub fn is_expression_with_type_arguments(node: &Node) -> bool {
    matches!(node, Node::ExpressionWithTypeArguments(_))
}

pub fn is_block(node: &Node) -> bool {
    matches!(node, Node::Block(_))
}

pub fn is_concise_body(node: &Node) -> bool {
    is_block(node) || is_expression(node)
}

pub fn is_for_initializer(node: &Node) -> bool {
    is_variable_declaration_list(node) || is_expression(node)
}

pub fn is_variable_declaration(node: &Node) -> bool {
    matches!(node, Node::VariableDeclaration(_))
}

pub fn is_variable_declaration_list(node: &Node) -> bool {
    matches!(node, Node::VariableDeclarationList(_))
}

pub fn is_binding_element(node: &Node) -> bool {
    matches!(node, Node::BindingElement(_))
}

pub fn is_array_binding_element(node: &Node) -> bool {
    matches!(node, Node::BindingElement(_) | Node::OmittedExpression(_))
}

pub fn is_object_literal_element_like(node: &Node) -> bool {
    matches!(
        node,
        Node::PropertyAssignment(_)
            | Node::ShorthandPropertyAssignment(_)
            | Node::SpreadAssignment(_)
            | Node::MethodDeclaration(_)
            | Node::GetAccessor(_)
            | Node::SetAccessor(_)
    )
}

pub fn is_template_literal(node: &Node) -> bool {
    matches!(node, Node::TemplateExpression(_))
        || is_literal_kind(node, SyntaxKind::NoSubstitutionTemplateLiteral)
}

pub fn is_template_head(node: &Node) -> bool {
    is_literal_kind(node, SyntaxKind::TemplateHead)
}

pub fn is_template_middle_or_tail(node: &Node) -> bool {
    is_literal_kind(node, SyntaxKind::TemplateMiddle) || is_literal_kind(node, SyntaxKind::TemplateTail)
}

pub fn is_template_span(node: &Node) -> bool {
    matches!(node, Node::TemplateSpan(_))
}

pub fn is_case_block(node: &Node) -> bool {
    matches!(node, Node::CaseBlock(_))
}

pub fn is_case_or_default_clause(node: &Node) -> bool {
    matches!(node, Node::CaseClause(_) | Node::DefaultClause(_))
}

pub fn is_catch_clause(node: &Node) -> bool {
    matches!(node, Node::CatchClause(_))
}

pub fn is_module_body(node: &Node) -> bool {
    matches!(node, Node::ModuleBlock(_) | Node::ModuleDeclaration(_) | Node::Identifier(_))
}

pub fn is_module_reference(node: &Node) -> bool {
    matches!(
        node,
        Node::Identifier(_) | Node::QualifiedName(_) | Node::ExternalModuleReference(_)
    )
}

pub fn is_import_clause(node: &Node) -> bool {
    matches!(node, Node::ImportClause(_))
}

pub fn is_named_import_bindings(node: &Node) -> bool {
    matches!(node, Node::NamespaceImport(_) | Node::NamedImports(_))
}

pub fn is_import_specifier(node: &Node) -> bool {
    matches!(node, Node::ImportSpecifier(_))
}

pub fn is_named_export_bindings(node: &Node) -> bool {
    matches!(node, Node::NamespaceExport(_) | Node::NamedExports(_))
}

pub fn is_export_specifier(node: &Node) -> bool {
    matches!(node, Node::ExportSpecifier(_))
}

pub fn is_enum_member(node: &Node) -> bool {
    matches!(node, Node::EnumMember(_))
}

pub fn is_jsx_opening_element(node: &Node) -> bool {
    matches!(node, Node::JsxOpeningElement(_))
}

pub fn is_jsx_closing_element(node: &Node) -> bool {
    matches!(node, Node::JsxClosingElement(_))
}

pub fn is_jsx_opening_fragment(node: &Node) -> bool {
    matches!(node, Node::JsxOpeningFragment(_))
}

pub fn is_jsx_closing_fragment(node: &Node) -> bool {
    matches!(node, Node::JsxClosingFragment(_))
}

pub fn is_jsx_child(node: &Node) -> bool {
    is_literal_kind(node, SyntaxKind::JsxText)
        || matches!(
            node,
            Node::JsxExpression(_)
                | Node::JsxElement(_)
                | Node::JsxSelfClosingElement(_)
                | Node::JsxFragment(_)
        )
}

pub fn is_jsx_attributes(node: &Node) -> bool {
    matches!(node, Node::JsxAttributes(_))
}

pub fn is_jsx_attribute_like(node: &Node) -> bool {
    matches!(node, Node::JsxAttribute(_) | Node::JsxSpreadAttribute(_))
}

pub fn is_jsx_tag_name_expression(node: &Node) -> bool {
    match node {
        Node::Identifier(_) | Node::PropertyAccessExpression(_) => true,
        Node::Token(token) => token.kind == SyntaxKind::ThisKeyword,
        _ => false,
    }
}

pub fn is_string_literal_or_jsx_expression(node: &Node) -> bool {
    is_literal_kind(node, SyntaxKind::StringLiteral) || matches!(node, Node::JsxExpression(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::factory::NodeFactory;

    #[test]
    fn test_expression_classification() {
        let factory = NodeFactory::new();
        let ident = factory.create_identifier("a");
        let num = factory.create_numeric_literal("1");
        let this = factory.create_token(SyntaxKind::ThisKeyword);
        let plus = factory.create_token(SyntaxKind::PlusToken);
        let binary = factory.create_binary(ident.clone(), plus.clone(), num.clone());

        assert!(is_expression(&ident));
        assert!(is_expression(&num));
        assert!(is_expression(&this));
        assert!(is_expression(&binary));
        assert!(!is_expression(&plus));
        assert!(!is_statement(&binary));
    }

    #[test]
    fn test_type_and_token_classification() {
        let factory = NodeFactory::new();
        let number = factory.create_token(SyntaxKind::NumberKeyword);
        let export = factory.create_token(SyntaxKind::ExportKeyword);

        assert!(is_type_node(&number));
        assert!(is_token(&number));
        assert!(is_modifier(&export));
        assert!(!is_modifier(&number));
        assert!(NodeTest::TYPE_NODE_OR_TYPE_PARAMETER.matches(&number));
        assert_eq!(format!("{:?}", NodeTest::STATEMENT), "NodeTest(Statement)");
    }
}
