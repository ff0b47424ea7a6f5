//! Lexical analysis and parsing for filter expressions
//!
//! This module provides lexical analysis (tokenization) and parsing functionality
//! to convert expression strings into abstract syntax trees (AST).
//!
//! Precedence, lowest first: `or`, `and`, comparisons, `|`, `&`, `+ -`,
//! `* / // %`, unary `- +`, `**`. Comparisons do not chain.
//!
//! Inputs nested past [`MAX_NESTING_DEPTH`] or producing a tree taller than
//! [`MAX_EXPR_DEPTH`] are rejected with a syntax error.

use std::iter::Peekable;
use std::str::CharIndices;

use super::ast::{BinaryOp, BoolOp, Expr, LiteralValue, SpannedToken, Token, UnaryOp};
use crate::core::error::{Error, Result};

/// Tokenize and parse `input` into an expression tree
pub fn parse_expression(input: &str) -> Result<Expr> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(tokens).parse()
}

/// Lexer for tokenizing filter expressions
pub struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            input,
        }
    }

    /// Consume the whole input, ending with an `Eof` token
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.token == Token::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<SpannedToken> {
        self.skip_whitespace();

        let (position, ch) = match self.chars.peek() {
            None => {
                return Ok(SpannedToken {
                    token: Token::Eof,
                    position: self.input.len(),
                })
            }
            Some(&next) => next,
        };

        let token = match ch {
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '%' => self.single(Token::Modulo),
            '&' => self.single(Token::Ampersand),
            '|' => self.single(Token::Pipe),
            '*' => self.one_or_two('*', Token::Multiply, Token::Power),
            '/' => self.one_or_two('/', Token::Divide, Token::FloorDivide),
            '<' => self.one_or_two('=', Token::LessThan, Token::LessThanOrEqual),
            '>' => self.one_or_two('=', Token::GreaterThan, Token::GreaterThanOrEqual),
            '=' => {
                self.chars.next();
                if self.eat('=') {
                    Token::Equal
                } else {
                    return Err(Error::syntax(
                        "expected '==' for equality comparison",
                        position,
                    ));
                }
            }
            '!' => {
                self.chars.next();
                if self.eat('=') {
                    Token::NotEqual
                } else {
                    return Err(Error::syntax("expected '!='", position));
                }
            }
            '\'' | '"' => self.read_string(position)?,
            '`' => self.read_quoted_identifier(position)?,
            '0'..='9' | '.' => self.read_number(position)?,
            c if c.is_alphabetic() || c == '_' => self.read_identifier(),
            _ => {
                return Err(Error::syntax(
                    format!("unexpected character {:?}", ch),
                    position,
                ))
            }
        };

        Ok(SpannedToken { token, position })
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn one_or_two(&mut self, second: char, one: Token, two: Token) -> Token {
        self.chars.next();
        if self.eat(second) {
            two
        } else {
            one
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.chars.peek(), Some(&(_, ch)) if ch == expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
            } else {
                break;
            }
        }
    }

    /// Read a string literal
    fn read_string(&mut self, start: usize) -> Result<Token> {
        let quote = match self.chars.next() {
            Some((_, quote)) => quote,
            None => return Err(Error::syntax("unexpected end of input", start)),
        };
        let mut value = String::new();

        while let Some((_, ch)) = self.chars.next() {
            if ch == quote {
                return Ok(Token::String(value));
            } else if ch == '\\' {
                if let Some((_, escaped)) = self.chars.next() {
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '\\' => value.push('\\'),
                        '\'' => value.push('\''),
                        '"' => value.push('"'),
                        _ => {
                            value.push('\\');
                            value.push(escaped);
                        }
                    }
                }
            } else {
                value.push(ch);
            }
        }

        Err(Error::syntax("unterminated string literal", start))
    }

    /// Read a backtick-quoted column name
    fn read_quoted_identifier(&mut self, start: usize) -> Result<Token> {
        self.chars.next(); // opening backtick
        let mut name = String::new();

        for (_, ch) in self.chars.by_ref() {
            if ch == '`' {
                if name.is_empty() {
                    return Err(Error::syntax("empty quoted identifier", start));
                }
                return Ok(Token::Identifier(name));
            }
            name.push(ch);
        }

        Err(Error::syntax("unterminated quoted identifier", start))
    }

    /// Read a number literal
    fn read_number(&mut self, start: usize) -> Result<Token> {
        let mut end = start;
        let mut is_float = false;
        let mut seen_exponent = false;

        while let Some(&(idx, ch)) = self.chars.peek() {
            let accept = match ch {
                '0'..='9' => true,
                '.' if !is_float && !seen_exponent => {
                    is_float = true;
                    true
                }
                'e' | 'E' if !seen_exponent => {
                    seen_exponent = true;
                    is_float = true;
                    true
                }
                '+' | '-' => matches!(self.input[..idx].chars().last(), Some('e' | 'E')),
                _ => false,
            };
            if !accept {
                break;
            }
            end = idx + ch.len_utf8();
            self.chars.next();
        }

        let text = &self.input[start..end];
        let parsed = if is_float {
            text.parse::<f64>().map(Token::Float).ok()
        } else {
            text.parse::<i64>().map(Token::Integer).ok()
        };
        parsed.ok_or_else(|| Error::syntax(format!("invalid number {:?}", text), start))
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.chars.next();
            } else {
                break;
            }
        }

        match identifier.as_str() {
            "True" | "true" => Token::Boolean(true),
            "False" | "false" => Token::Boolean(false),
            "and" => Token::And,
            "or" => Token::Or,
            _ => Token::Identifier(identifier),
        }
    }
}

/// Deepest run of parentheses, unary signs or exponents the parser descends into
pub const MAX_NESTING_DEPTH: usize = 100;

/// Deepest expression tree the parser hands to the evaluator
pub const MAX_EXPR_DEPTH: usize = 500;

/// A parsed subtree and the height it will have once `and` / `or` chains are folded
struct Node {
    expr: Expr,
    depth: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, depth: 1 }
    }
}

/// Parser for building expression AST
pub struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    nesting: usize,
}

impl Parser {
    /// Create a new parser with tokens
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            position: 0,
            nesting: 0,
        }
    }

    /// Parse the tokens into an expression AST, requiring all input be consumed
    pub fn parse(&mut self) -> Result<Expr> {
        let node = self.parse_or_expression()?;

        match self.current_token() {
            Token::Eof => Ok(node.expr),
            token => Err(Error::syntax(
                format!("unexpected token {:?}", token),
                self.current_position(),
            )),
        }
    }

    /// Parse OR expressions
    fn parse_or_expression(&mut self) -> Result<Node> {
        let first = self.parse_and_expression()?;
        self.parse_chain(BoolOp::Or, first, &Token::Or, Self::parse_and_expression)
    }

    /// Parse AND expressions
    fn parse_and_expression(&mut self) -> Result<Node> {
        let first = self.parse_comparison_expression()?;
        self.parse_chain(
            BoolOp::And,
            first,
            &Token::And,
            Self::parse_comparison_expression,
        )
    }

    /// Collect `first (connector operand)*` into one chain node
    fn parse_chain(
        &mut self,
        op: BoolOp,
        first: Node,
        connector: &Token,
        mut operand: impl FnMut(&mut Self) -> Result<Node>,
    ) -> Result<Node> {
        let mut depth = first.depth;
        let mut operands = vec![first.expr];
        while self.match_token(connector) {
            let next = operand(self)?;
            depth = depth.max(next.depth);
            operands.push(next.expr);
        }

        if operands.len() == 1 {
            return Ok(Node {
                expr: operands.remove(0),
                depth,
            });
        }

        // The chain is later folded into a balanced tree of binary nodes
        let folded_height = (usize::BITS - (operands.len() - 1).leading_zeros()) as usize;
        self.check_depth(depth + folded_height)?;
        Ok(Node {
            expr: Expr::BoolChain { op, operands },
            depth: depth + folded_height,
        })
    }

    /// Parse comparison expressions (==, !=, <, <=, >, >=)
    fn parse_comparison_expression(&mut self) -> Result<Node> {
        let left = self.parse_bitor_expression()?;

        let Some(op) = self.match_comparison_operator() else {
            return Ok(left);
        };
        let right = self.parse_bitor_expression()?;

        if self.peek_comparison_operator().is_some() {
            return Err(Error::syntax(
                "chained comparisons are not supported; combine them with 'and'",
                self.current_position(),
            ));
        }

        self.binary(left, op, right)
    }

    /// Parse `|` expressions
    fn parse_bitor_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_bitand_expression()?;

        while self.match_token(&Token::Pipe) {
            let right = self.parse_bitand_expression()?;
            left = self.binary(left, BinaryOp::BitOr, right)?;
        }

        Ok(left)
    }

    /// Parse `&` expressions
    fn parse_bitand_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_additive_expression()?;

        while self.match_token(&Token::Ampersand) {
            let right = self.parse_additive_expression()?;
            left = self.binary(left, BinaryOp::BitAnd, right)?;
        }

        Ok(left)
    }

    /// Parse additive expressions (+, -)
    fn parse_additive_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_multiplicative_expression()?;

        while let Some(op) = self.match_additive_operator() {
            let right = self.parse_multiplicative_expression()?;
            left = self.binary(left, op, right)?;
        }

        Ok(left)
    }

    /// Parse multiplicative expressions (*, /, //, %)
    fn parse_multiplicative_expression(&mut self) -> Result<Node> {
        let mut left = self.parse_unary_expression()?;

        while let Some(op) = self.match_multiplicative_operator() {
            let right = self.parse_unary_expression()?;
            left = self.binary(left, op, right)?;
        }

        Ok(left)
    }

    /// Parse unary expressions (-, +)
    fn parse_unary_expression(&mut self) -> Result<Node> {
        let op = if self.match_token(&Token::Minus) {
            UnaryOp::Negate
        } else if self.match_token(&Token::Plus) {
            UnaryOp::Plus
        } else {
            return self.parse_power_expression();
        };

        let operand = self.nested(Self::parse_unary_expression)?;
        let depth = operand.depth + 1;
        self.check_depth(depth)?;
        Ok(Node {
            expr: Expr::Unary {
                op,
                operand: Box::new(operand.expr),
            },
            depth,
        })
    }

    /// Parse power expressions (**), right associative
    fn parse_power_expression(&mut self) -> Result<Node> {
        let base = self.parse_primary_expression()?;

        if self.match_token(&Token::Power) {
            let exponent = self.nested(Self::parse_unary_expression)?;
            return self.binary(base, BinaryOp::Power, exponent);
        }

        Ok(base)
    }

    /// Parse primary expressions (literals, identifiers, parentheses)
    fn parse_primary_expression(&mut self) -> Result<Node> {
        let position = self.current_position();
        let token = self.current_token().clone();

        let expr = match token {
            Token::Integer(value) => Expr::Literal(LiteralValue::Integer(value)),
            Token::Float(value) => Expr::Literal(LiteralValue::Float(value)),
            Token::String(value) => Expr::Literal(LiteralValue::String(value)),
            Token::Boolean(value) => Expr::Literal(LiteralValue::Boolean(value)),
            Token::Identifier(name) => Expr::Name(name),
            Token::LeftParen => {
                self.advance();
                let node = self.nested(Self::parse_or_expression)?;
                if !self.match_token(&Token::RightParen) {
                    return Err(Error::syntax(
                        "expected ')' after expression",
                        self.current_position(),
                    ));
                }
                return Ok(node);
            }
            Token::Eof => return Err(Error::syntax("unexpected end of input", position)),
            other => {
                return Err(Error::syntax(
                    format!("unexpected token {:?}", other),
                    position,
                ))
            }
        };

        self.advance();
        Ok(Node::leaf(expr))
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`]
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<Node>) -> Result<Node> {
        if self.nesting >= MAX_NESTING_DEPTH {
            return Err(Error::syntax(
                "expression nested too deeply",
                self.current_position(),
            ));
        }

        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    fn binary(&self, left: Node, op: BinaryOp, right: Node) -> Result<Node> {
        let depth = left.depth.max(right.depth) + 1;
        self.check_depth(depth)?;
        Ok(Node {
            expr: Expr::Binary {
                left: Box::new(left.expr),
                op,
                right: Box::new(right.expr),
            },
            depth,
        })
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > MAX_EXPR_DEPTH {
            return Err(Error::syntax(
                "expression nested too deeply",
                self.current_position(),
            ));
        }
        Ok(())
    }

    fn current_token(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map(|spanned| &spanned.token)
            .unwrap_or(&Token::Eof)
    }

    fn current_position(&self) -> usize {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map(|spanned| spanned.position)
            .unwrap_or(0)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn match_token(&mut self, expected: &Token) -> bool {
        if self.current_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_comparison_operator(&self) -> Option<BinaryOp> {
        match self.current_token() {
            Token::Equal => Some(BinaryOp::Equal),
            Token::NotEqual => Some(BinaryOp::NotEqual),
            Token::LessThan => Some(BinaryOp::LessThan),
            Token::LessThanOrEqual => Some(BinaryOp::LessThanOrEqual),
            Token::GreaterThan => Some(BinaryOp::GreaterThan),
            Token::GreaterThanOrEqual => Some(BinaryOp::GreaterThanOrEqual),
            _ => None,
        }
    }

    fn match_comparison_operator(&mut self) -> Option<BinaryOp> {
        let op = self.peek_comparison_operator()?;
        self.advance();
        Some(op)
    }

    fn match_additive_operator(&mut self) -> Option<BinaryOp> {
        let op = match self.current_token() {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Subtract,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn match_multiplicative_operator(&mut self) -> Option<BinaryOp> {
        let op = match self.current_token() {
            Token::Multiply => BinaryOp::Multiply,
            Token::Divide => BinaryOp::Divide,
            Token::FloorDivide => BinaryOp::FloorDivide,
            Token::Modulo => BinaryOp::Modulo,
            _ => return None,
        };
        self.advance();
        Some(op)
    }
}
