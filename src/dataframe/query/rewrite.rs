//! Tree rewriting between parsing and evaluation
//!
//! Two rewrites turn a parsed filter into something that can be evaluated
//! column-at-a-time:
//!
//! - every bare [`Expr::Name`] becomes an explicit [`Expr::Column`] read from
//!   the bound table;
//! - every [`Expr::BoolChain`] becomes a balanced tree of elementwise
//!   `&` / `|` binary nodes, since short-circuit connectors only make sense
//!   for scalar truth values.
//!
//! For operands `[v0, v1, ..., vn]` the tree is built over the reversed list
//! `[vn, ..., v0]`, halving it at each level, so its height grows with the
//! logarithm of the chain length. Elementwise AND/OR are associative and
//! commutative, so the result equals any other grouping.

use super::ast::{BinaryOp, BoolOp, Expr, LiteralValue};

/// Walks an expression tree and rebuilds it, node by node.
///
/// Implementors override the hooks for the node kinds they care about; the
/// default [`rewrite`](ExprRewriter::rewrite) rebuilds children first, so hooks
/// always see already-rewritten operands.
pub trait ExprRewriter {
    /// Rewrites a bare identifier.
    fn rewrite_name(&mut self, name: String) -> Expr {
        Expr::Name(name)
    }

    /// Rewrites an `and` / `or` chain whose operands were already rewritten.
    fn rewrite_bool_chain(&mut self, op: BoolOp, operands: Vec<Expr>) -> Expr {
        Expr::BoolChain { op, operands }
    }

    /// Rebuilds `expr` bottom-up, calling the hooks above.
    fn rewrite(&mut self, expr: Expr) -> Expr {
        match expr {
            Expr::Name(name) => self.rewrite_name(name),
            Expr::Column(_) | Expr::Literal(_) => expr,
            Expr::Binary { left, op, right } => Expr::Binary {
                left: Box::new(self.rewrite(*left)),
                op,
                right: Box::new(self.rewrite(*right)),
            },
            Expr::Unary { op, operand } => Expr::Unary {
                op,
                operand: Box::new(self.rewrite(*operand)),
            },
            Expr::BoolChain { op, operands } => {
                let operands = operands.into_iter().map(|e| self.rewrite(e)).collect();
                self.rewrite_bool_chain(op, operands)
            }
        }
    }
}

/// Rewriter producing trees that evaluate over whole columns.
#[derive(Debug, Default)]
pub struct ElementwiseRewriter {
    names_resolved: usize,
    chains_folded: usize,
}

impl ElementwiseRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bare names turned into column reads so far
    pub fn names_resolved(&self) -> usize {
        self.names_resolved
    }

    /// Number of `and` / `or` chains folded so far
    pub fn chains_folded(&self) -> usize {
        self.chains_folded
    }
}

impl ExprRewriter for ElementwiseRewriter {
    fn rewrite_name(&mut self, name: String) -> Expr {
        self.names_resolved += 1;
        Expr::Column(name)
    }

    fn rewrite_bool_chain(&mut self, op: BoolOp, operands: Vec<Expr>) -> Expr {
        self.chains_folded += 1;
        fold_chain(op.elementwise(), operands)
    }
}

/// Folds `[v0, ..., vn]` into a balanced tree over `[vn, ..., v0]`.
fn fold_chain(op: BinaryOp, mut operands: Vec<Expr>) -> Expr {
    operands.reverse();
    fold_balanced(op, operands)
}

fn fold_balanced(op: BinaryOp, mut operands: Vec<Expr>) -> Expr {
    if operands.len() <= 1 {
        // The parser never produces empty chains
        return operands
            .pop()
            .unwrap_or(Expr::Literal(LiteralValue::Boolean(op == BinaryOp::BitAnd)));
    }

    let right = operands.split_off(operands.len() / 2);
    Expr::Binary {
        left: Box::new(fold_balanced(op, operands)),
        op,
        right: Box::new(fold_balanced(op, right)),
    }
}

/// Applies [`ElementwiseRewriter`] to a parsed expression.
pub fn rewrite_elementwise(expr: Expr) -> (Expr, ElementwiseRewriter) {
    let mut rewriter = ElementwiseRewriter::new();
    let rewritten = rewriter.rewrite(expr);
    (rewritten, rewriter)
}

#[cfg(test)]
mod tests {
    use super::super::lexer_parser::parse_expression;
    use super::*;

    fn rewritten(input: &str) -> Expr {
        rewrite_elementwise(parse_expression(input).unwrap()).0
    }

    #[test]
    fn test_names_become_column_reads() {
        assert_eq!(rewritten("kappa > 0").to_string(), "(col(kappa) > 0)");
    }

    #[test]
    fn test_single_comparison_builds_no_chain() {
        let (expr, rewriter) = rewrite_elementwise(parse_expression("a == 'x'").unwrap());
        assert_eq!(rewriter.chains_folded(), 0);
        assert_eq!(rewriter.names_resolved(), 1);
        assert_eq!(expr.to_string(), "(col(a) == \"x\")");
    }

    #[test]
    fn test_chain_starts_from_rightmost_operands() {
        assert_eq!(
            rewritten("a and b and c and d").to_string(),
            "((col(d) & col(c)) & (col(b) & col(a)))"
        );
        assert_eq!(
            rewritten("a or b or c").to_string(),
            "(col(c) | (col(b) | col(a)))"
        );
    }

    #[test]
    fn test_long_chain_folds_to_logarithmic_height() {
        fn height(expr: &Expr) -> usize {
            match expr {
                Expr::Binary { left, right, .. } => 1 + height(left).max(height(right)),
                Expr::Unary { operand, .. } => 1 + height(operand),
                _ => 1,
            }
        }

        let operands = (0..1000).map(|i| Expr::Name(format!("c{}", i))).collect();
        let (expr, _) = rewrite_elementwise(Expr::BoolChain {
            op: BoolOp::And,
            operands,
        });
        // ceil(log2(1000)) levels of `&` above the column reads
        assert_eq!(height(&expr), 11);
    }

    #[test]
    fn test_two_operand_chain() {
        assert_eq!(
            rewritten("x > 1 or y < 2").to_string(),
            "((col(y) < 2) | (col(x) > 1))"
        );
    }

    #[test]
    fn test_nested_chains_are_folded_independently() {
        let (expr, rewriter) =
            rewrite_elementwise(parse_expression("(c == 1 or c == 10) and kappa > 0").unwrap());
        assert_eq!(rewriter.chains_folded(), 2);
        assert_eq!(
            expr.to_string(),
            "((col(kappa) > 0) & ((col(c) == 10) | (col(c) == 1)))"
        );
    }

    #[test]
    fn test_explicit_bitwise_operators_untouched() {
        assert_eq!(
            rewritten("(a > 0) & (b > 0)").to_string(),
            "((col(a) > 0) & (col(b) > 0))"
        );
    }

    #[test]
    fn test_no_names_or_chains_remain() {
        fn check(expr: &Expr) {
            match expr {
                Expr::Name(_) | Expr::BoolChain { .. } => panic!("left over: {}", expr),
                Expr::Binary { left, right, .. } => {
                    check(left);
                    check(right);
                }
                Expr::Unary { operand, .. } => check(operand),
                Expr::Column(_) | Expr::Literal(_) => {}
            }
        }
        check(&rewritten(
            "-(a + b) * 2 >= c or (d != 'x' and (e or f)) or g",
        ));
    }
}
