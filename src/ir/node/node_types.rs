use std::sync::Arc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::node_array::NodeList;
use crate::ir::syntax_kind::SyntaxKind;

/// Source extent of a node or node list. `-1` in both positions marks a
/// synthesized node or a fragment that has no textual counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub pos: i32,
    pub end: i32,
}

impl TextRange {
    pub const UNSET: TextRange = TextRange { pos: -1, end: -1 };

    pub fn new(pos: i32, end: i32) -> Self {
        TextRange { pos, end }
    }

    pub fn is_unset(&self) -> bool {
        self.pos < 0 && self.end < 0
    }
}

impl Default for TextRange {
    fn default() -> Self {
        TextRange::UNSET
    }
}

bitflags! {
    /// Per-node flags carried across rebuilds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct NodeFlags: u32 {
        /// `let` binding list.
        const LET = 1 << 0;
        /// `const` binding list.
        const CONST = 1 << 1;
        /// Member access, element access, call or non-null assertion inside an optional chain.
        const OPTIONAL_CHAIN = 1 << 2;
        /// Created or rebuilt by a transformation rather than parsed.
        const SYNTHESIZED = 1 << 3;
        const MULTI_LINE = 1 << 4;
        /// Identifier minted by `NodeFactory::generated_name_for_node`.
        const GENERATED_NAME = 1 << 5;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

/// Metadata every node carries independently of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeBase {
    #[serde(default)]
    pub range: TextRange,
    #[serde(default)]
    pub flags: NodeFlags,
}

impl NodeBase {
    pub fn new(range: TextRange, flags: NodeFlags) -> Self {
        NodeBase { range, flags }
    }

    pub fn synthesized() -> Self {
        NodeBase { range: TextRange::UNSET, flags: NodeFlags::SYNTHESIZED }
    }
}

/// Borrowed view of a child slot that currently holds something.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Node(&'a Arc<Node>),
    List(&'a NodeList),
}

/// Mutable view of a child slot, present or not.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Node(&'a mut Arc<Node>),
    OptionalNode(&'a mut Option<Arc<Node>>),
    List(&'a mut NodeList),
    OptionalList(&'a mut Option<NodeList>),
}

/// A field of a node payload. Child slots compare by reference, plain
/// attributes by value.
pub trait Slot {
    /// Whether the slot holds children (as opposed to a plain attribute).
    const IS_CHILD: bool;

    fn same(&self, other: &Self) -> bool;

    fn as_field(&self) -> Option<FieldRef<'_>> {
        None
    }

    fn as_field_mut(&mut self) -> Option<FieldMut<'_>> {
        None
    }

    fn each_node(&self, _f: &mut dyn FnMut(&Arc<Node>)) {}
}

impl Slot for Arc<Node> {
    const IS_CHILD: bool = true;

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn as_field(&self) -> Option<FieldRef<'_>> {
        Some(FieldRef::Node(self))
    }

    fn as_field_mut(&mut self) -> Option<FieldMut<'_>> {
        Some(FieldMut::Node(self))
    }

    fn each_node(&self, f: &mut dyn FnMut(&Arc<Node>)) {
        f(self)
    }
}

impl Slot for Option<Arc<Node>> {
    const IS_CHILD: bool = true;

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn as_field(&self) -> Option<FieldRef<'_>> {
        self.as_ref().map(FieldRef::Node)
    }

    fn as_field_mut(&mut self) -> Option<FieldMut<'_>> {
        Some(FieldMut::OptionalNode(self))
    }

    fn each_node(&self, f: &mut dyn FnMut(&Arc<Node>)) {
        if let Some(node) = self {
            f(node)
        }
    }
}

impl Slot for NodeList {
    const IS_CHILD: bool = true;

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }

    fn as_field(&self) -> Option<FieldRef<'_>> {
        Some(FieldRef::List(self))
    }

    fn as_field_mut(&mut self) -> Option<FieldMut<'_>> {
        Some(FieldMut::List(self))
    }

    fn each_node(&self, f: &mut dyn FnMut(&Arc<Node>)) {
        self.iter().for_each(|node| f(node))
    }
}

impl Slot for Option<NodeList> {
    const IS_CHILD: bool = true;

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    fn as_field(&self) -> Option<FieldRef<'_>> {
        self.as_ref().map(FieldRef::List)
    }

    fn as_field_mut(&mut self) -> Option<FieldMut<'_>> {
        Some(FieldMut::OptionalList(self))
    }

    fn each_node(&self, f: &mut dyn FnMut(&Arc<Node>)) {
        if let Some(list) = self {
            list.iter().for_each(|node| f(node))
        }
    }
}

macro_rules! attribute_slot {
    ($($ty:ty),*) => {
        $(
            impl Slot for $ty {
                const IS_CHILD: bool = false;

                fn same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

attribute_slot!(String, bool, SyntaxKind);

/// Common surface of every node payload struct.
pub trait NodeData: Clone + Into<Node> {
    fn from_node(node: &Node) -> Option<&Self>;
    fn base(&self) -> &NodeBase;
    fn base_mut(&mut self) -> &mut NodeBase;
    /// True when every child slot is reference-equal and every attribute value-equal.
    fn same_fields(&self, other: &Self) -> bool;
}

/// Punctuation or keyword token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub base: NodeBase,
    pub kind: SyntaxKind,
}

/// Literal token: numeric, bigint, string, regex, template part or JSX text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub base: NodeBase,
    pub kind: SyntaxKind,
    pub text: String,
}

macro_rules! leaf_data {
    ($($name:ident => |$this:ident, $other:ident| $same:expr),* $(,)?) => {
        $(
            impl NodeData for $name {
                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$name(data) => Some(data),
                        _ => None,
                    }
                }

                fn base(&self) -> &NodeBase {
                    &self.base
                }

                fn base_mut(&mut self) -> &mut NodeBase {
                    &mut self.base
                }

                fn same_fields(&self, $other: &Self) -> bool {
                    let $this = self;
                    $same
                }
            }

            impl From<$name> for Node {
                fn from(data: $name) -> Node {
                    Node::$name(data)
                }
            }
        )*
    };
}

leaf_data! {
    Token => |a, b| a.kind == b.kind,
    Literal => |a, b| a.kind == b.kind && a.text == b.text,
}

/// Generates one payload struct per kind, the `Node` enum over them and the
/// per-kind field schema consulted by the generic walker.
macro_rules! define_nodes {
    (
        $(
            $(#[$meta:meta])*
            $name:ident {
                $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
            }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Serialize, Deserialize)]
            pub struct $name {
                #[serde(default)]
                pub base: NodeBase,
                $( $(#[$fmeta])* pub $field: $ty, )*
            }

            impl NodeData for $name {
                fn from_node(node: &Node) -> Option<&Self> {
                    match node {
                        Node::$name(data) => Some(data),
                        _ => None,
                    }
                }

                fn base(&self) -> &NodeBase {
                    &self.base
                }

                fn base_mut(&mut self) -> &mut NodeBase {
                    &mut self.base
                }

                #[allow(unused_variables)]
                fn same_fields(&self, other: &Self) -> bool {
                    true $( && Slot::same(&self.$field, &other.$field) )*
                }
            }

            impl From<$name> for Node {
                fn from(data: $name) -> Node {
                    Node::$name(data)
                }
            }
        )*

        /// A syntax tree node. Children are shared through `Arc`, and two
        /// nodes are "the same node" exactly when their `Arc`s are pointer-equal.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        pub enum Node {
            Token(Token),
            Literal(Literal),
            $( $name($name), )*
        }

        /// Field names of every non-leaf kind in declaration order, each paired
        /// with whether the field holds children.
        pub const NODE_SCHEMA: &[(SyntaxKind, &[(&str, bool)])] = &[
            $( (SyntaxKind::$name, &[ $( (stringify!($field), <$ty as Slot>::IS_CHILD), )* ]), )*
        ];

        impl Node {
            pub fn kind(&self) -> SyntaxKind {
                match self {
                    Node::Token(token) => token.kind,
                    Node::Literal(literal) => literal.kind,
                    $( Node::$name(_) => SyntaxKind::$name, )*
                }
            }

            pub fn base(&self) -> &NodeBase {
                match self {
                    Node::Token(token) => &token.base,
                    Node::Literal(literal) => &literal.base,
                    $( Node::$name(data) => &data.base, )*
                }
            }

            pub fn base_mut(&mut self) -> &mut NodeBase {
                match self {
                    Node::Token(token) => &mut token.base,
                    Node::Literal(literal) => &mut literal.base,
                    $( Node::$name(data) => &mut data.base, )*
                }
            }

            /// Looks up a child slot by field name. Returns `None` when the kind
            /// has no such child field or the slot is currently empty.
            #[allow(unused_variables)]
            pub fn field(&self, name: &str) -> Option<FieldRef<'_>> {
                match self {
                    Node::Token(_) | Node::Literal(_) => None,
                    $(
                        Node::$name(data) => match name {
                            $( stringify!($field) => Slot::as_field(&data.$field), )*
                            _ => None,
                        },
                    )*
                }
            }

            #[allow(unused_variables)]
            pub fn field_mut(&mut self, name: &str) -> Option<FieldMut<'_>> {
                match self {
                    Node::Token(_) | Node::Literal(_) => None,
                    $(
                        Node::$name(data) => match name {
                            $( stringify!($field) => Slot::as_field_mut(&mut data.$field), )*
                            _ => None,
                        },
                    )*
                }
            }

            /// Calls `f` on every direct child in declaration order.
            #[allow(unused_variables)]
            pub fn for_each_child(&self, mut f: impl FnMut(&Arc<Node>)) {
                match self {
                    Node::Token(_) | Node::Literal(_) => {}
                    $( Node::$name(data) => { $( Slot::each_node(&data.$field, &mut f); )* } )*
                }
            }
        }
    };
}

define_nodes! {
    // Names
    Identifier {
        text: String,
        type_arguments: Option<NodeList>,
    }
    QualifiedName {
        left: Arc<Node>,
        right: Arc<Node>,
    }
    ComputedPropertyName {
        expression: Arc<Node>,
    }

    // Signature elements
    TypeParameter {
        name: Arc<Node>,
        constraint: Option<Arc<Node>>,
        default: Option<Arc<Node>>,
    }
    Parameter {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        dot_dot_dot_token: Option<Arc<Node>>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
        initializer: Option<Arc<Node>>,
    }
    Decorator {
        expression: Arc<Node>,
    }

    // Type members and class elements
    PropertySignature {
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
    }
    /// Class property. Carries either a `?` or a `!` after the name, never both.
    PropertyDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        exclamation_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
        initializer: Option<Arc<Node>>,
    }
    MethodSignature {
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
    }
    MethodDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        asterisk_token: Option<Arc<Node>>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
        body: Option<Arc<Node>>,
    }
    Constructor {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        parameters: NodeList,
        body: Option<Arc<Node>>,
    }
    GetAccessor {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
        body: Option<Arc<Node>>,
    }
    SetAccessor {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        parameters: NodeList,
        body: Option<Arc<Node>>,
    }
    CallSignature {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
    }
    ConstructSignature {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
    }
    IndexSignature {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        parameters: NodeList,
        ty: Arc<Node>,
    }

    // Types
    TypePredicate {
        asserts_modifier: Option<Arc<Node>>,
        parameter_name: Arc<Node>,
        ty: Option<Arc<Node>>,
    }
    TypeReference {
        type_name: Arc<Node>,
        type_arguments: Option<NodeList>,
    }
    FunctionType {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Arc<Node>,
    }
    ConstructorType {
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Arc<Node>,
    }
    TypeQuery {
        expr_name: Arc<Node>,
    }
    TypeLiteral {
        members: NodeList,
    }
    ArrayType {
        element_type: Arc<Node>,
    }
    TupleType {
        elements: NodeList,
    }
    OptionalType {
        ty: Arc<Node>,
    }
    RestType {
        ty: Arc<Node>,
    }
    UnionType {
        types: NodeList,
    }
    IntersectionType {
        types: NodeList,
    }
    ConditionalType {
        check_type: Arc<Node>,
        extends_type: Arc<Node>,
        true_type: Arc<Node>,
        false_type: Arc<Node>,
    }
    InferType {
        type_parameter: Arc<Node>,
    }
    ImportType {
        argument: Arc<Node>,
        qualifier: Option<Arc<Node>>,
        type_arguments: Option<NodeList>,
        #[serde(default)]
        is_type_of: bool,
    }
    NamedTupleMember {
        dot_dot_dot_token: Option<Arc<Node>>,
        name: Arc<Node>,
        question_token: Option<Arc<Node>>,
        ty: Arc<Node>,
    }
    ParenthesizedType {
        ty: Arc<Node>,
    }
    TypeOperator {
        operator: SyntaxKind,
        ty: Arc<Node>,
    }
    IndexedAccessType {
        object_type: Arc<Node>,
        index_type: Arc<Node>,
    }
    MappedType {
        readonly_token: Option<Arc<Node>>,
        type_parameter: Arc<Node>,
        question_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
    }
    LiteralType {
        literal: Arc<Node>,
    }
    ThisType {}

    // Binding patterns
    ObjectBindingPattern {
        elements: NodeList,
    }
    ArrayBindingPattern {
        elements: NodeList,
    }
    BindingElement {
        dot_dot_dot_token: Option<Arc<Node>>,
        property_name: Option<Arc<Node>>,
        name: Arc<Node>,
        initializer: Option<Arc<Node>>,
    }

    // Expressions
    ArrayLiteralExpression {
        elements: NodeList,
        #[serde(default)]
        multi_line: bool,
    }
    ObjectLiteralExpression {
        properties: NodeList,
        #[serde(default)]
        multi_line: bool,
    }
    PropertyAccessExpression {
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        name: Arc<Node>,
    }
    ElementAccessExpression {
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        argument_expression: Arc<Node>,
    }
    CallExpression {
        expression: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        type_arguments: Option<NodeList>,
        arguments: NodeList,
    }
    NewExpression {
        expression: Arc<Node>,
        type_arguments: Option<NodeList>,
        arguments: Option<NodeList>,
    }
    TaggedTemplateExpression {
        tag: Arc<Node>,
        question_dot_token: Option<Arc<Node>>,
        type_arguments: Option<NodeList>,
        template: Arc<Node>,
    }
    TypeAssertionExpression {
        ty: Arc<Node>,
        expression: Arc<Node>,
    }
    ParenthesizedExpression {
        expression: Arc<Node>,
    }
    FunctionExpression {
        modifiers: Option<NodeList>,
        asterisk_token: Option<Arc<Node>>,
        name: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
        body: Arc<Node>,
    }
    /// `body` is either a `Block` or a concise expression body.
    ArrowFunction {
        modifiers: Option<NodeList>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
        equals_greater_than_token: Arc<Node>,
        body: Arc<Node>,
    }
    DeleteExpression {
        expression: Arc<Node>,
    }
    TypeOfExpression {
        expression: Arc<Node>,
    }
    VoidExpression {
        expression: Arc<Node>,
    }
    AwaitExpression {
        expression: Arc<Node>,
    }
    PrefixUnaryExpression {
        operator: SyntaxKind,
        operand: Arc<Node>,
    }
    PostfixUnaryExpression {
        operand: Arc<Node>,
        operator: SyntaxKind,
    }
    BinaryExpression {
        left: Arc<Node>,
        operator_token: Arc<Node>,
        right: Arc<Node>,
    }
    ConditionalExpression {
        condition: Arc<Node>,
        question_token: Arc<Node>,
        when_true: Arc<Node>,
        colon_token: Arc<Node>,
        when_false: Arc<Node>,
    }
    TemplateExpression {
        head: Arc<Node>,
        template_spans: NodeList,
    }
    YieldExpression {
        asterisk_token: Option<Arc<Node>>,
        expression: Option<Arc<Node>>,
    }
    SpreadElement {
        expression: Arc<Node>,
    }
    ClassExpression {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        heritage_clauses: Option<NodeList>,
        members: NodeList,
    }
    OmittedExpression {}
    ExpressionWithTypeArguments {
        expression: Arc<Node>,
        type_arguments: Option<NodeList>,
    }
    AsExpression {
        expression: Arc<Node>,
        ty: Arc<Node>,
    }
    NonNullExpression {
        expression: Arc<Node>,
    }
    MetaProperty {
        keyword_token: SyntaxKind,
        name: Arc<Node>,
    }

    // Misc
    TemplateSpan {
        expression: Arc<Node>,
        literal: Arc<Node>,
    }
    SemicolonClassElement {}

    // Statements
    Block {
        statements: NodeList,
        #[serde(default)]
        multi_line: bool,
    }
    VariableStatement {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        declaration_list: Arc<Node>,
    }
    EmptyStatement {}
    ExpressionStatement {
        expression: Arc<Node>,
    }
    IfStatement {
        expression: Arc<Node>,
        then_statement: Arc<Node>,
        else_statement: Option<Arc<Node>>,
    }
    DoStatement {
        statement: Arc<Node>,
        expression: Arc<Node>,
    }
    WhileStatement {
        expression: Arc<Node>,
        statement: Arc<Node>,
    }
    ForStatement {
        initializer: Option<Arc<Node>>,
        condition: Option<Arc<Node>>,
        incrementor: Option<Arc<Node>>,
        statement: Arc<Node>,
    }
    ForInStatement {
        initializer: Arc<Node>,
        expression: Arc<Node>,
        statement: Arc<Node>,
    }
    ForOfStatement {
        await_modifier: Option<Arc<Node>>,
        initializer: Arc<Node>,
        expression: Arc<Node>,
        statement: Arc<Node>,
    }
    ContinueStatement {
        label: Option<Arc<Node>>,
    }
    BreakStatement {
        label: Option<Arc<Node>>,
    }
    ReturnStatement {
        expression: Option<Arc<Node>>,
    }
    WithStatement {
        expression: Arc<Node>,
        statement: Arc<Node>,
    }
    SwitchStatement {
        expression: Arc<Node>,
        case_block: Arc<Node>,
    }
    LabeledStatement {
        label: Arc<Node>,
        statement: Arc<Node>,
    }
    ThrowStatement {
        expression: Arc<Node>,
    }
    TryStatement {
        try_block: Arc<Node>,
        catch_clause: Option<Arc<Node>>,
        finally_block: Option<Arc<Node>>,
    }
    DebuggerStatement {}

    // Declarations
    VariableDeclaration {
        name: Arc<Node>,
        exclamation_token: Option<Arc<Node>>,
        ty: Option<Arc<Node>>,
        initializer: Option<Arc<Node>>,
    }
    /// `var`, `let` or `const` list; the keyword lives in the base flags.
    VariableDeclarationList {
        declarations: NodeList,
    }
    FunctionDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        asterisk_token: Option<Arc<Node>>,
        name: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        parameters: NodeList,
        ty: Option<Arc<Node>>,
        body: Option<Arc<Node>>,
    }
    ClassDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Option<Arc<Node>>,
        type_parameters: Option<NodeList>,
        heritage_clauses: Option<NodeList>,
        members: NodeList,
    }
    InterfaceDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        type_parameters: Option<NodeList>,
        heritage_clauses: Option<NodeList>,
        members: NodeList,
    }
    TypeAliasDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        type_parameters: Option<NodeList>,
        ty: Arc<Node>,
    }
    EnumDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        members: NodeList,
    }
    ModuleDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        name: Arc<Node>,
        body: Option<Arc<Node>>,
    }
    ModuleBlock {
        statements: NodeList,
    }
    CaseBlock {
        clauses: NodeList,
    }
    NamespaceExportDeclaration {
        name: Arc<Node>,
    }
    ImportEqualsDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        #[serde(default)]
        is_type_only: bool,
        name: Arc<Node>,
        module_reference: Arc<Node>,
    }
    ImportDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        import_clause: Option<Arc<Node>>,
        module_specifier: Arc<Node>,
    }
    ImportClause {
        #[serde(default)]
        is_type_only: bool,
        name: Option<Arc<Node>>,
        named_bindings: Option<Arc<Node>>,
    }
    NamespaceImport {
        name: Arc<Node>,
    }
    NamespaceExport {
        name: Arc<Node>,
    }
    NamedImports {
        elements: NodeList,
    }
    ImportSpecifier {
        property_name: Option<Arc<Node>>,
        name: Arc<Node>,
    }
    ExportAssignment {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        #[serde(default)]
        is_export_equals: bool,
        expression: Arc<Node>,
    }
    ExportDeclaration {
        decorators: Option<NodeList>,
        modifiers: Option<NodeList>,
        #[serde(default)]
        is_type_only: bool,
        export_clause: Option<Arc<Node>>,
        module_specifier: Option<Arc<Node>>,
    }
    NamedExports {
        elements: NodeList,
    }
    ExportSpecifier {
        property_name: Option<Arc<Node>>,
        name: Arc<Node>,
    }
    ExternalModuleReference {
        expression: Arc<Node>,
    }

    // JSX
    JsxElement {
        opening_element: Arc<Node>,
        children: NodeList,
        closing_element: Arc<Node>,
    }
    JsxSelfClosingElement {
        tag_name: Arc<Node>,
        type_arguments: Option<NodeList>,
        attributes: Arc<Node>,
    }
    JsxOpeningElement {
        tag_name: Arc<Node>,
        type_arguments: Option<NodeList>,
        attributes: Arc<Node>,
    }
    JsxClosingElement {
        tag_name: Arc<Node>,
    }
    JsxFragment {
        opening_fragment: Arc<Node>,
        children: NodeList,
        closing_fragment: Arc<Node>,
    }
    JsxOpeningFragment {}
    JsxClosingFragment {}
    JsxAttribute {
        name: Arc<Node>,
        initializer: Option<Arc<Node>>,
    }
    JsxAttributes {
        properties: NodeList,
    }
    JsxSpreadAttribute {
        expression: Arc<Node>,
    }
    JsxExpression {
        dot_dot_dot_token: Option<Arc<Node>>,
        expression: Option<Arc<Node>>,
    }

    // Clauses
    CaseClause {
        expression: Arc<Node>,
        statements: NodeList,
    }
    DefaultClause {
        statements: NodeList,
    }
    HeritageClause {
        token: SyntaxKind,
        types: NodeList,
    }
    CatchClause {
        variable_declaration: Option<Arc<Node>>,
        block: Arc<Node>,
    }

    // Object literal members
    PropertyAssignment {
        name: Arc<Node>,
        initializer: Arc<Node>,
    }
    ShorthandPropertyAssignment {
        name: Arc<Node>,
        object_assignment_initializer: Option<Arc<Node>>,
    }
    SpreadAssignment {
        expression: Arc<Node>,
    }

    EnumMember {
        name: Arc<Node>,
        initializer: Option<Arc<Node>>,
    }

    SourceFile {
        #[serde(default)]
        file_name: String,
        statements: NodeList,
    }

    // Transformation nodes
    NotEmittedStatement {}
    PartiallyEmittedExpression {
        expression: Arc<Node>,
    }
    CommaListExpression {
        elements: NodeList,
    }
}

