//! Abstract syntax tree.
//!
//! Statements and expressions are `{kind, location}` pairs over closed
//! enums. The tree is immutable after parsing; user function definitions
//! are held in `Rc` so function values can point back at them without
//! copying bodies.

mod operators;

use std::rc::Rc;

use crate::Location;

pub use operators::{BinaryOp, UnaryOp};

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub location: Location,
}

impl Program {
    /// True when any top-level declaration carries `export`.
    pub fn has_exports(&self) -> bool {
        self.statements.iter().any(Stmt::is_exported)
    }
}

/// Declaration keyword of a variable binding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    /// Rebindable; assignment walks outward to the module or global boundary.
    Set,
    /// Block scoped.
    Let,
    /// Block scoped and immutable.
    Const,
    /// Always installed in the global scope.
    Global,
}

impl DeclKind {
    pub fn from_keyword(word: &str) -> Option<DeclKind> {
        match word {
            "set" => Some(DeclKind::Set),
            "let" => Some(DeclKind::Let),
            "const" => Some(DeclKind::Const),
            "global" => Some(DeclKind::Global),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeclKind::Set => "set",
            DeclKind::Let => "let",
            DeclKind::Const => "const",
            DeclKind::Global => "global",
        }
    }
}

/// Left-hand side of a variable declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingTarget {
    Name(String),
    Pattern(DestructurePattern),
}

/// `[a, b]` or `{a, b}` destructuring target.
#[derive(Clone, Debug, PartialEq)]
pub enum DestructurePattern {
    Array(Vec<String>),
    Object(Vec<String>),
}

impl DestructurePattern {
    /// Names bound by the pattern, in source order.
    pub fn names(&self) -> &[String] {
        match self {
            DestructurePattern::Array(names) | DestructurePattern::Object(names) => names,
        }
    }
}

/// A function parameter with an optional default expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

/// Shared shape of declared and anonymous functions.
#[derive(Debug, PartialEq)]
pub struct FunctionDef {
    /// `None` for anonymous functions.
    pub name: Option<String>,
    pub params: Vec<Param>,
    /// Trailing `...rest` parameter.
    pub rest: Option<String>,
    pub body: Vec<Stmt>,
    pub location: Location,
}

impl FunctionDef {
    /// Name shown in call frames and error messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }

    /// Count of parameters without a default value.
    pub fn required_params(&self) -> usize {
        self.params.iter().filter(|p| p.default.is_none()).count()
    }
}

/// `else` part of an `if` statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ElseBranch {
    Block(Vec<Stmt>),
    /// `else if ...`; the nested statement is always `StmtKind::If`.
    If(Box<Stmt>),
}

/// Pattern of a `case` clause.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchPattern {
    Literal(Literal),
    /// Always matches and binds the value.
    Identifier(String),
    /// Matches arrays of the same length element by element.
    Array(Vec<MatchPattern>),
}

/// One `case`/`default` arm.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseClause {
    /// `None` for `default:`.
    pub pattern: Option<MatchPattern>,
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
    pub location: Location,
}

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub location: Location,
}

impl Stmt {
    pub fn new(kind: StmtKind, location: Location) -> Self {
        Stmt { kind, location }
    }

    /// True for `export`-prefixed declarations.
    pub fn is_exported(&self) -> bool {
        match &self.kind {
            StmtKind::VariableDeclaration { is_exported, .. }
            | StmtKind::FunctionDeclaration { is_exported, .. } => *is_exported,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `set|let|const|global target value`
    VariableDeclaration {
        kind: DeclKind,
        target: BindingTarget,
        value: Expr,
        is_exported: bool,
    },
    /// `destructure pattern from value`
    DestructuringAssignment {
        pattern: DestructurePattern,
        value: Expr,
    },
    /// `set obj.prop value`
    PropertyAssignment {
        object: Expr,
        property: String,
        value: Expr,
    },
    /// `set obj[index] value`
    BracketAssignment {
        object: Expr,
        index: Expr,
        value: Expr,
    },
    FunctionDeclaration {
        function: Rc<FunctionDef>,
        is_exported: bool,
    },
    If {
        condition: Expr,
        consequent: Vec<Stmt>,
        alternate: Option<ElseBranch>,
    },
    /// `guard cond else ... end`
    Guard {
        condition: Expr,
        alternate: Vec<Stmt>,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
    },
    For {
        variable: String,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    Loop {
        body: Vec<Stmt>,
    },
    /// `label: <loop>`
    Labeled {
        label: String,
        body: Box<Stmt>,
    },
    Break {
        label: Option<String>,
    },
    Continue {
        label: Option<String>,
    },
    Try {
        body: Vec<Stmt>,
        catch_var: Option<String>,
        catch_body: Option<Vec<Stmt>>,
    },
    /// `call f(args) [-> dest]`
    Call {
        callee: Expr,
        arguments: Vec<Element>,
        destination: Option<String>,
    },
    Return {
        value: Option<Expr>,
    },
    Show {
        value: Expr,
    },
    Throw {
        value: Expr,
    },
    Match {
        discriminant: Expr,
        cases: Vec<CaseClause>,
    },
    /// `import "path" as alias`
    Import {
        path: String,
        alias: String,
    },
    Expression(Expr),
}

/// Literal values shared by expressions and match patterns.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

/// Array element or call argument, optionally spread.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Item(Expr),
    Spread(Expr),
}

/// Entry of an object literal.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectEntry {
    Property { key: String, value: Expr },
    Spread(Expr),
}

/// Piece of a template literal.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Expr(Expr),
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr { kind, location }
    }

    /// Name used for the callee in call frames and error messages.
    pub fn callee_name(&self) -> String {
        match &self.kind {
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::ModuleAccess { module, property } => format!("{module}.{property}"),
            ExprKind::PropertyAccess {
                object, property, ..
            } => format!("{}.{property}", object.callee_name()),
            ExprKind::Function(def) => def.display_name().to_string(),
            _ => "<expression>".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Literal(Literal),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Array(Vec<Element>),
    Object(Vec<ObjectEntry>),
    /// `obj.prop` / `obj?.prop`
    PropertyAccess {
        object: Box<Expr>,
        property: String,
        safe: bool,
    },
    /// `obj[index]` / `obj?.[index]`
    ArrayAccess {
        object: Box<Expr>,
        index: Box<Expr>,
        safe: bool,
    },
    /// `module.member` in `call` position.
    ModuleAccess {
        module: String,
        property: String,
    },
    /// `call f(args)` as an expression, or `f?.(args)`.
    Call {
        callee: Box<Expr>,
        arguments: Vec<Element>,
        safe: bool,
    },
    Template(Vec<TemplatePart>),
    Function(Rc<FunctionDef>),
    /// `if cond then a else b`
    InlineIf {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    /// `value |> callee(extra...)`
    Pipe {
        value: Box<Expr>,
        callee: Box<Expr>,
        arguments: Vec<Element>,
    },
}
