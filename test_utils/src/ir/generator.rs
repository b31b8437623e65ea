//! Random syntax trees for property-based testing.
//!
//! `ArbitraryTree` is a small source file made of statements and expressions
//! that exercise the interesting parts of the rewriter: nested functions,
//! arrow functions with concise bodies, parameters with default values,
//! binding patterns and rest parameters, and statement slots that can be
//! lifted into blocks.
//!
//! Trees are rendered two ways: `to_json` produces the serde encoding of the
//! rewriter's `Node` (externally tagged, one object per node), and `to_code`
//! produces readable source for failure messages.
//!
//! Generation is bounded by a depth parameter so shrinking and deep recursion
//! stay cheap.

use quickcheck::{Arbitrary, Gen};
use serde_json::{json, Map, Value};

const MAX_DEPTH: usize = 4;

const NAMES: &[&str] = &["a", "b", "c", "x", "y", "value", "item", "callback"];

#[derive(Clone, Copy, Debug)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    StrictEq,
    Lt,
    And,
    Or,
}

impl BinOp {
    fn token_kind(self) -> &'static str {
        match self {
            BinOp::Add => "PlusToken",
            BinOp::Sub => "MinusToken",
            BinOp::Mul => "AsteriskToken",
            BinOp::StrictEq => "EqualsEqualsEqualsToken",
            BinOp::Lt => "LessThanToken",
            BinOp::And => "AmpersandAmpersandToken",
            BinOp::Or => "BarBarToken",
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::StrictEq => "===",
            BinOp::Lt => "<",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// A function parameter.
#[derive(Clone, Debug)]
pub enum Param {
    Simple { name: String, default: Option<Expr> },
    Object { names: Vec<String>, default: Option<Expr> },
    Array { names: Vec<String> },
    Rest(String),
}

#[derive(Clone, Debug)]
pub enum Expr {
    Identifier(String),
    Number(u32),
    Str(String),
    Negate(Box<Expr>),
    Binary { op: BinOp, left: Box<Expr>, right: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Member { object: Box<Expr>, name: String },
    Conditional { condition: Box<Expr>, when_true: Box<Expr>, when_false: Box<Expr> },
    Arrow { params: Vec<Param>, body: Box<Expr> },
    Array(Vec<Expr>),
    Paren(Box<Expr>),
}

#[derive(Clone, Debug)]
pub enum Stmt {
    Expression(Expr),
    Var { name: String, init: Option<Expr> },
    If { condition: Expr, then_branch: Box<Stmt>, else_branch: Option<Box<Stmt>> },
    While { condition: Expr, body: Box<Stmt> },
    Return(Option<Expr>),
    Block(Vec<Stmt>),
    Function { name: String, params: Vec<Param>, body: Vec<Stmt> },
}

/// A generated source file.
#[derive(Clone, Debug)]
pub struct ArbitraryTree {
    pub statements: Vec<Stmt>,
}

impl Arbitrary for BinOp {
    fn arbitrary(g: &mut Gen) -> Self {
        const CHOICES: &[BinOp] = &[
            BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::StrictEq, BinOp::Lt, BinOp::And, BinOp::Or,
        ];
        *g.choose(CHOICES).unwrap()
    }
}

impl Arbitrary for ArbitraryTree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(MAX_DEPTH);
        let count = gen_range(g, 1, 4);
        ArbitraryTree { statements: (0..count).map(|_| gen_stmt(g, depth)).collect() }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let statements = self.statements.clone();
        let len = statements.len();
        Box::new((0..len).filter(move |_| len > 1).map(move |skip| {
            let mut fewer = statements.clone();
            fewer.remove(skip);
            ArbitraryTree { statements: fewer }
        }))
    }
}

fn gen_range(g: &mut Gen, min: u32, max: u32) -> u32 {
    min + (u32::arbitrary(g) % (max - min + 1))
}

fn gen_name(g: &mut Gen) -> String {
    g.choose(NAMES).unwrap().to_string()
}

fn gen_names(g: &mut Gen) -> Vec<String> {
    let count = gen_range(g, 1, 3);
    (0..count).map(|_| gen_name(g)).collect()
}

fn gen_leaf(g: &mut Gen) -> Expr {
    match gen_range(g, 0, 2) {
        0 => Expr::Identifier(gen_name(g)),
        1 => Expr::Number(gen_range(g, 0, 100)),
        _ => Expr::Str(gen_name(g)),
    }
}

fn gen_params(g: &mut Gen, depth: usize) -> Vec<Param> {
    let count = gen_range(g, 0, 3) as usize;
    let mut params: Vec<Param> = (0..count)
        .map(|_| match gen_range(g, 0, 3) {
            0 => Param::Simple { name: gen_name(g), default: None },
            1 => Param::Simple { name: gen_name(g), default: Some(gen_expr(g, depth.saturating_sub(1))) },
            2 => Param::Object {
                names: gen_names(g),
                default: bool::arbitrary(g).then(|| gen_expr(g, depth.saturating_sub(1))),
            },
            _ => Param::Array { names: gen_names(g) },
        })
        .collect();
    if gen_range(g, 0, 4) == 0 {
        params.push(Param::Rest(gen_name(g)));
    }
    params
}

fn gen_expr(g: &mut Gen, depth: usize) -> Expr {
    if depth == 0 {
        return gen_leaf(g);
    }
    let next = depth - 1;
    match gen_range(g, 0, 9) {
        0 => gen_leaf(g),
        1 => Expr::Negate(Box::new(gen_expr(g, next))),
        2 => Expr::Binary {
            op: BinOp::arbitrary(g),
            left: Box::new(gen_expr(g, next)),
            right: Box::new(gen_expr(g, next)),
        },
        3 => {
            let count = gen_range(g, 0, 3);
            Expr::Call {
                callee: Box::new(gen_expr(g, next)),
                args: (0..count).map(|_| gen_expr(g, next)).collect(),
            }
        }
        4 => Expr::Member { object: Box::new(gen_expr(g, next)), name: gen_name(g) },
        5 => Expr::Conditional {
            condition: Box::new(gen_expr(g, next)),
            when_true: Box::new(gen_expr(g, next)),
            when_false: Box::new(gen_expr(g, next)),
        },
        6 | 7 => Expr::Arrow { params: gen_params(g, next), body: Box::new(gen_expr(g, next)) },
        8 => {
            let count = gen_range(g, 0, 3);
            Expr::Array((0..count).map(|_| gen_expr(g, next)).collect())
        }
        _ => Expr::Paren(Box::new(gen_expr(g, next))),
    }
}

fn gen_stmt(g: &mut Gen, depth: usize) -> Stmt {
    if depth == 0 {
        return Stmt::Expression(gen_leaf(g));
    }
    let next = depth - 1;
    match gen_range(g, 0, 7) {
        0 => Stmt::Expression(gen_expr(g, next)),
        1 => Stmt::Var { name: gen_name(g), init: bool::arbitrary(g).then(|| gen_expr(g, next)) },
        2 => Stmt::If {
            condition: gen_expr(g, next),
            then_branch: Box::new(gen_stmt(g, next)),
            else_branch: bool::arbitrary(g).then(|| Box::new(gen_stmt(g, next))),
        },
        3 => Stmt::While { condition: gen_expr(g, next), body: Box::new(gen_stmt(g, next)) },
        4 => Stmt::Return(bool::arbitrary(g).then(|| gen_expr(g, next))),
        5 => {
            let count = gen_range(g, 0, 3);
            Stmt::Block((0..count).map(|_| gen_stmt(g, next)).collect())
        }
        _ => {
            let count = gen_range(g, 0, 3);
            Stmt::Function {
                name: gen_name(g),
                params: gen_params(g, next),
                body: (0..count).map(|_| gen_stmt(g, next)).collect(),
            }
        }
    }
}

// JSON rendering

fn node(kind: &str, fields: Value) -> Value {
    let mut map = Map::new();
    map.insert(kind.to_string(), fields);
    Value::Object(map)
}

fn token(kind: &str) -> Value {
    node("Token", json!({ "kind": kind }))
}

fn identifier(name: &str) -> Value {
    node("Identifier", json!({ "text": name }))
}

fn optional<T>(value: &Option<T>, render: impl Fn(&T) -> Value) -> Value {
    value.as_ref().map_or(Value::Null, render)
}

fn binding_elements(names: &[String]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| node("BindingElement", json!({ "name": identifier(name) })))
            .collect(),
    )
}

impl Param {
    pub fn to_json(&self) -> Value {
        match self {
            Param::Simple { name, default } => node(
                "Parameter",
                json!({ "name": identifier(name), "initializer": optional(default, Expr::to_json) }),
            ),
            Param::Object { names, default } => node(
                "Parameter",
                json!({
                    "name": node("ObjectBindingPattern", json!({ "elements": binding_elements(names) })),
                    "initializer": optional(default, Expr::to_json),
                }),
            ),
            Param::Array { names } => node(
                "Parameter",
                json!({ "name": node("ArrayBindingPattern", json!({ "elements": binding_elements(names) })) }),
            ),
            Param::Rest(name) => node(
                "Parameter",
                json!({ "dot_dot_dot_token": token("DotDotDotToken"), "name": identifier(name) }),
            ),
        }
    }

    pub fn to_code(&self) -> String {
        match self {
            Param::Simple { name, default: None } => name.clone(),
            Param::Simple { name, default: Some(default) } => format!("{} = {}", name, default.to_code()),
            Param::Object { names, default: None } => format!("{{ {} }}", names.join(", ")),
            Param::Object { names, default: Some(default) } => {
                format!("{{ {} }} = {}", names.join(", "), default.to_code())
            }
            Param::Array { names } => format!("[{}]", names.join(", ")),
            Param::Rest(name) => format!("...{}", name),
        }
    }

    /// Whether parameter hoisting rewrites this parameter.
    pub fn is_hoistable(&self) -> bool {
        match self {
            Param::Simple { default, .. } => default.is_some(),
            Param::Object { .. } | Param::Array { .. } => true,
            Param::Rest(_) => false,
        }
    }
}

fn params_json(params: &[Param]) -> Value {
    Value::Array(params.iter().map(Param::to_json).collect())
}

fn params_code(params: &[Param]) -> String {
    params.iter().map(Param::to_code).collect::<Vec<_>>().join(", ")
}

impl Expr {
    pub fn to_json(&self) -> Value {
        match self {
            Expr::Identifier(name) => identifier(name),
            Expr::Number(value) => node("Literal", json!({ "kind": "NumericLiteral", "text": value.to_string() })),
            Expr::Str(text) => node("Literal", json!({ "kind": "StringLiteral", "text": text })),
            Expr::Negate(operand) => node(
                "PrefixUnaryExpression",
                json!({ "operator": "MinusToken", "operand": operand.to_json() }),
            ),
            Expr::Binary { op, left, right } => node(
                "BinaryExpression",
                json!({
                    "left": left.to_json(),
                    "operator_token": token(op.token_kind()),
                    "right": right.to_json(),
                }),
            ),
            Expr::Call { callee, args } => node(
                "CallExpression",
                json!({
                    "expression": callee.to_json(),
                    "arguments": args.iter().map(Expr::to_json).collect::<Vec<_>>(),
                }),
            ),
            Expr::Member { object, name } => node(
                "PropertyAccessExpression",
                json!({ "expression": object.to_json(), "name": identifier(name) }),
            ),
            Expr::Conditional { condition, when_true, when_false } => node(
                "ConditionalExpression",
                json!({
                    "condition": condition.to_json(),
                    "question_token": token("QuestionToken"),
                    "when_true": when_true.to_json(),
                    "colon_token": token("ColonToken"),
                    "when_false": when_false.to_json(),
                }),
            ),
            Expr::Arrow { params, body } => node(
                "ArrowFunction",
                json!({
                    "parameters": params_json(params),
                    "equals_greater_than_token": token("EqualsGreaterThanToken"),
                    "body": body.to_json(),
                }),
            ),
            Expr::Array(elements) => node(
                "ArrayLiteralExpression",
                json!({ "elements": elements.iter().map(Expr::to_json).collect::<Vec<_>>() }),
            ),
            Expr::Paren(inner) => node("ParenthesizedExpression", json!({ "expression": inner.to_json() })),
        }
    }

    pub fn to_code(&self) -> String {
        match self {
            Expr::Identifier(name) => name.clone(),
            Expr::Number(value) => value.to_string(),
            Expr::Str(text) => format!("{:?}", text),
            Expr::Negate(operand) => format!("-{}", operand.to_code()),
            Expr::Binary { op, left, right } => format!("{} {} {}", left.to_code(), op.symbol(), right.to_code()),
            Expr::Call { callee, args } => format!(
                "{}({})",
                callee.to_code(),
                args.iter().map(Expr::to_code).collect::<Vec<_>>().join(", ")
            ),
            Expr::Member { object, name } => format!("{}.{}", object.to_code(), name),
            Expr::Conditional { condition, when_true, when_false } => format!(
                "{} ? {} : {}",
                condition.to_code(),
                when_true.to_code(),
                when_false.to_code()
            ),
            Expr::Arrow { params, body } => format!("({}) => {}", params_code(params), body.to_code()),
            Expr::Array(elements) => format!(
                "[{}]",
                elements.iter().map(Expr::to_code).collect::<Vec<_>>().join(", ")
            ),
            Expr::Paren(inner) => format!("({})", inner.to_code()),
        }
    }

    /// Number of parameters that hoisting would rewrite, nested functions included.
    pub fn hoistable_params(&self) -> usize {
        match self {
            Expr::Identifier(_) | Expr::Number(_) | Expr::Str(_) => 0,
            Expr::Negate(inner) | Expr::Paren(inner) => inner.hoistable_params(),
            Expr::Member { object, .. } => object.hoistable_params(),
            Expr::Binary { left, right, .. } => left.hoistable_params() + right.hoistable_params(),
            Expr::Call { callee, args } => {
                callee.hoistable_params() + args.iter().map(Expr::hoistable_params).sum::<usize>()
            }
            Expr::Conditional { condition, when_true, when_false } => {
                condition.hoistable_params() + when_true.hoistable_params() + when_false.hoistable_params()
            }
            Expr::Arrow { params, body } => params_hoistable(params) + body.hoistable_params(),
            Expr::Array(elements) => elements.iter().map(Expr::hoistable_params).sum(),
        }
    }
}

fn params_hoistable(params: &[Param]) -> usize {
    params
        .iter()
        .map(|param| {
            let nested = match param {
                Param::Simple { default: Some(default), .. } | Param::Object { default: Some(default), .. } => {
                    default.hoistable_params()
                }
                _ => 0,
            };
            usize::from(param.is_hoistable()) + nested
        })
        .sum()
}

fn block_json(statements: &[Stmt]) -> Value {
    node(
        "Block",
        json!({
            "statements": statements.iter().map(Stmt::to_json).collect::<Vec<_>>(),
            "multi_line": true,
        }),
    )
}

impl Stmt {
    pub fn to_json(&self) -> Value {
        match self {
            Stmt::Expression(expression) => node("ExpressionStatement", json!({ "expression": expression.to_json() })),
            Stmt::Var { name, init } => {
                let declaration = node(
                    "VariableDeclaration",
                    json!({ "name": identifier(name), "initializer": optional(init, Expr::to_json) }),
                );
                let list = node("VariableDeclarationList", json!({ "declarations": [declaration] }));
                node("VariableStatement", json!({ "declaration_list": list }))
            }
            Stmt::If { condition, then_branch, else_branch } => node(
                "IfStatement",
                json!({
                    "expression": condition.to_json(),
                    "then_statement": then_branch.to_json(),
                    "else_statement": optional(else_branch, |branch| branch.to_json()),
                }),
            ),
            Stmt::While { condition, body } => node(
                "WhileStatement",
                json!({ "expression": condition.to_json(), "statement": body.to_json() }),
            ),
            Stmt::Return(expression) => node(
                "ReturnStatement",
                json!({ "expression": optional(expression, Expr::to_json) }),
            ),
            Stmt::Block(statements) => block_json(statements),
            Stmt::Function { name, params, body } => node(
                "FunctionDeclaration",
                json!({
                    "name": identifier(name),
                    "parameters": params_json(params),
                    "body": block_json(body),
                }),
            ),
        }
    }

    pub fn to_code(&self) -> String {
        match self {
            Stmt::Expression(expression) => format!("{};", expression.to_code()),
            Stmt::Var { name, init: None } => format!("var {};", name),
            Stmt::Var { name, init: Some(init) } => format!("var {} = {};", name, init.to_code()),
            Stmt::If { condition, then_branch, else_branch } => {
                let mut code = format!("if ({}) {}", condition.to_code(), then_branch.to_code());
                if let Some(else_branch) = else_branch {
                    code.push_str(&format!(" else {}", else_branch.to_code()));
                }
                code
            }
            Stmt::While { condition, body } => format!("while ({}) {}", condition.to_code(), body.to_code()),
            Stmt::Return(None) => "return;".to_string(),
            Stmt::Return(Some(expression)) => format!("return {};", expression.to_code()),
            Stmt::Block(statements) => format!(
                "{{ {} }}",
                statements.iter().map(Stmt::to_code).collect::<Vec<_>>().join(" ")
            ),
            Stmt::Function { name, params, body } => format!(
                "function {}({}) {{ {} }}",
                name,
                params_code(params),
                body.iter().map(Stmt::to_code).collect::<Vec<_>>().join(" ")
            ),
        }
    }

    pub fn hoistable_params(&self) -> usize {
        match self {
            Stmt::Expression(expression) => expression.hoistable_params(),
            Stmt::Var { init, .. } | Stmt::Return(init) => init.as_ref().map_or(0, Expr::hoistable_params),
            Stmt::If { condition, then_branch, else_branch } => {
                condition.hoistable_params()
                    + then_branch.hoistable_params()
                    + else_branch.as_ref().map_or(0, |branch| branch.hoistable_params())
            }
            Stmt::While { condition, body } => condition.hoistable_params() + body.hoistable_params(),
            Stmt::Block(statements) => statements.iter().map(Stmt::hoistable_params).sum(),
            Stmt::Function { params, body, .. } => {
                params_hoistable(params) + body.iter().map(Stmt::hoistable_params).sum::<usize>()
            }
        }
    }
}

impl ArbitraryTree {
    /// The tree as a serialized `SourceFile` node.
    pub fn to_json(&self) -> Value {
        node(
            "SourceFile",
            json!({
                "file_name": "generated.ts",
                "statements": self.statements.iter().map(Stmt::to_json).collect::<Vec<_>>(),
            }),
        )
    }

    pub fn to_code(&self) -> String {
        self.statements.iter().map(Stmt::to_code).collect::<Vec<_>>().join("\n")
    }

    /// Number of parameters, at any depth, that carry a default value or a
    /// binding pattern.
    pub fn hoistable_params(&self) -> usize {
        self.statements.iter().map(Stmt::hoistable_params).sum()
    }
}
