//! Discriminants for every token and node kind in the tree.
//!
//! Token kinds come first so that `is_token()` is a single comparison against
//! [`SyntaxKind::LAST_TOKEN`]. Node kinds share their names with the payload
//! structs in [`node_types`](super::node::node_types).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Literal tokens
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    JsxText,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateHead,
    TemplateMiddle,
    TemplateTail,

    // Punctuation
    DotDotDotToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    QuestionQuestionToken,
    CommaToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,

    // Keywords
    FalseKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    SuperKeyword,
    ThisKeyword,
    TrueKeyword,
    AbstractKeyword,
    AssertsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    ConstKeyword,
    DeclareKeyword,
    DefaultKeyword,
    ExportKeyword,
    ExtendsKeyword,
    ImplementsKeyword,
    KeyOfKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    StaticKeyword,
    UniqueKeyword,

    // Keyword types
    AnyKeyword,
    BigIntKeyword,
    BooleanKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    StringKeyword,
    SymbolKeyword,
    UndefinedKeyword,
    UnknownKeyword,
    VoidKeyword,

    // Names
    Identifier,
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,
    Decorator,

    // Type members and class elements
    PropertySignature,
    PropertyDeclaration,
    MethodSignature,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    CallSignature,
    ConstructSignature,
    IndexSignature,

    // Types
    TypePredicate,
    TypeReference,
    FunctionType,
    ConstructorType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    OptionalType,
    RestType,
    UnionType,
    IntersectionType,
    ConditionalType,
    InferType,
    ImportType,
    NamedTupleMember,
    ParenthesizedType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,
    ThisType,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    TaggedTemplateExpression,
    TypeAssertionExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    DeleteExpression,
    TypeOfExpression,
    VoidExpression,
    AwaitExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TemplateExpression,
    YieldExpression,
    SpreadElement,
    ClassExpression,
    OmittedExpression,
    ExpressionWithTypeArguments,
    AsExpression,
    NonNullExpression,
    MetaProperty,

    // Misc
    TemplateSpan,
    SemicolonClassElement,

    // Statements
    Block,
    VariableStatement,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    DoStatement,
    WhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    ContinueStatement,
    BreakStatement,
    ReturnStatement,
    WithStatement,
    SwitchStatement,
    LabeledStatement,
    ThrowStatement,
    TryStatement,
    DebuggerStatement,

    // Declarations
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    ModuleDeclaration,
    ModuleBlock,
    CaseBlock,
    NamespaceExportDeclaration,
    ImportEqualsDeclaration,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamespaceExport,
    NamedImports,
    ImportSpecifier,
    ExportAssignment,
    ExportDeclaration,
    NamedExports,
    ExportSpecifier,
    ExternalModuleReference,

    // JSX
    JsxElement,
    JsxSelfClosingElement,
    JsxOpeningElement,
    JsxClosingElement,
    JsxFragment,
    JsxOpeningFragment,
    JsxClosingFragment,
    JsxAttribute,
    JsxAttributes,
    JsxSpreadAttribute,
    JsxExpression,

    // Clauses
    CaseClause,
    DefaultClause,
    HeritageClause,
    CatchClause,

    // Object literal members
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    EnumMember,
    SourceFile,

    // Transformation nodes
    NotEmittedStatement,
    PartiallyEmittedExpression,
    CommaListExpression,
}

impl SyntaxKind {
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::DotDotDotToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::PercentEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::FalseKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::VoidKeyword;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::LAST_KEYWORD;

    /// Terminal kinds: literals, punctuation and keywords. They never have children.
    pub fn is_token(self) -> bool {
        self <= Self::LAST_TOKEN
    }

    pub fn is_literal(self) -> bool {
        self <= SyntaxKind::TemplateTail
    }

    pub fn is_template_literal_part(self) -> bool {
        matches!(
            self,
            SyntaxKind::TemplateHead | SyntaxKind::TemplateMiddle | SyntaxKind::TemplateTail
        )
    }

    pub fn is_punctuation(self) -> bool {
        self >= Self::FIRST_PUNCTUATION && self <= Self::LAST_PUNCTUATION
    }

    pub fn is_keyword(self) -> bool {
        self >= Self::FIRST_KEYWORD && self <= Self::LAST_KEYWORD
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::AbstractKeyword
                | SyntaxKind::AsyncKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::StaticKeyword
        )
    }

    pub fn is_keyword_type(self) -> bool {
        (self >= SyntaxKind::AnyKeyword && self <= SyntaxKind::VoidKeyword)
            || self == SyntaxKind::NullKeyword
    }

    /// Keyword tokens usable as primary expressions (`this`, `true`, `import`, …).
    pub fn is_keyword_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ImportKeyword
        )
    }

    pub fn is_binary_operator(self) -> bool {
        (self >= SyntaxKind::LessThanToken
            && self <= SyntaxKind::PercentEqualsToken
            && !matches!(
                self,
                SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::ColonToken
            ))
            || matches!(self, SyntaxKind::InKeyword | SyntaxKind::InstanceOfKeyword)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ranges() {
        assert!(SyntaxKind::NumericLiteral.is_token());
        assert!(SyntaxKind::PlusToken.is_token());
        assert!(SyntaxKind::VoidKeyword.is_token());
        assert!(!SyntaxKind::Identifier.is_token());
        assert!(!SyntaxKind::ThisType.is_token());
        assert!(!SyntaxKind::SourceFile.is_token());
    }

    #[test]
    fn test_operator_classification() {
        assert!(SyntaxKind::PlusToken.is_binary_operator());
        assert!(SyntaxKind::EqualsToken.is_binary_operator());
        assert!(SyntaxKind::InstanceOfKeyword.is_binary_operator());
        assert!(!SyntaxKind::EqualsGreaterThanToken.is_binary_operator());
        assert!(!SyntaxKind::QuestionToken.is_binary_operator());
        assert!(SyntaxKind::ReadonlyKeyword.is_modifier());
        assert!(SyntaxKind::NullKeyword.is_keyword_type());
    }
}
