//! AST definitions for filter expressions
//!
//! This module contains the token and abstract syntax tree (AST) definitions
//! used for parsing and representing filter expressions.

use std::fmt;

/// Token types for expression parsing
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare or backtick-quoted name
    Identifier(String),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// Comparison operators
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// Boolean connectors (`and` / `or`)
    And,
    Or,
    /// Elementwise operators (`&` / `|`)
    Ampersand,
    Pipe,
    /// Arithmetic operators
    Plus,
    Minus,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
    /// Parentheses
    LeftParen,
    RightParen,
    /// End of input
    Eof,
}

/// A token together with the character offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

/// Expression AST node types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Bare identifier as written by the user
    Name(String),
    /// Explicit read of a column from the bound table
    Column(String),
    /// Literal values
    Literal(LiteralValue),
    /// Binary operations, all of them elementwise over columns
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    /// Unary operations
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `and` / `or` over two or more operands, in source order
    BoolChain { op: BoolOp, operands: Vec<Expr> },
}

/// Literal value types
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    // Elementwise logical / bitwise
    BitAnd,
    BitOr,
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    FloorDivide,
    Modulo,
    Power,
}

/// Short-circuit boolean connectors as written in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Plus,
}

impl BinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LessThan
                | BinaryOp::LessThanOrEqual
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterThanOrEqual
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::FloorDivide => "//",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
        }
    }
}

impl BoolOp {
    /// The elementwise operator that replaces this connector over vectors
    pub fn elementwise(self) -> BinaryOp {
        match self {
            BoolOp::And => BinaryOp::BitAnd,
            BoolOp::Or => BinaryOp::BitOr,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Integer(v) => write!(f, "{}", v),
            LiteralValue::Float(v) => write!(f, "{:?}", v),
            LiteralValue::String(v) => write!(f, "{:?}", v),
            LiteralValue::Boolean(true) => f.write_str("True"),
            LiteralValue::Boolean(false) => f.write_str("False"),
        }
    }
}

/// Fully parenthesised rendering, mainly for logs and tests
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Name(name) => f.write_str(name),
            Expr::Column(name) => write!(f, "col({})", name),
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Binary { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expr::Unary { op, operand } => match op {
                UnaryOp::Negate => write!(f, "(-{})", operand),
                UnaryOp::Plus => write!(f, "(+{})", operand),
            },
            Expr::BoolChain { op, operands } => {
                f.write_str("(")?;
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.keyword())?;
                    }
                    write!(f, "{}", operand)?;
                }
                f.write_str(")")
            }
        }
    }
}
