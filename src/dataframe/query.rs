//! Filter expressions for DataFrames
//!
//! Readable boolean expressions such as `"(c == 1 or c == 10) and kappa > 0"`
//! are compiled once into a [`Where`] and evaluated over whole columns:
//!
//! - ast: Token and AST definitions
//! - lexer_parser: Lexical analysis and parsing
//! - rewrite: Name resolution and `and`/`or` folding into elementwise operators
//! - evaluator: Column-at-a-time evaluation
//! - predicate: The compiled, reusable filter
//! - engine: DataFrame integration

mod ast;
mod engine;
mod evaluator;
mod lexer_parser;
mod predicate;
mod rewrite;

pub use ast::{BinaryOp, BoolOp, Expr, LiteralValue, SpannedToken, Token, UnaryOp};
pub use engine::QueryExt;
pub use evaluator::{Evaluator, Value};
pub use lexer_parser::{parse_expression, Lexer, Parser};
pub use predicate::Where;
pub use rewrite::{rewrite_elementwise, ElementwiseRewriter, ExprRewriter};
