//! Compiled row filters

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::ast::Expr;
use super::evaluator::Evaluator;
use super::lexer_parser::parse_expression;
use super::rewrite::rewrite_elementwise;
use crate::core::error::Result;
use crate::core::mask::BooleanMask;
use crate::dataframe::base::DataFrame;

/// A filter expression compiled once and applied to any number of frames.
///
/// ```
/// use panql::{Column, DataFrame, Where};
///
/// let df = DataFrame::from_columns(vec![
///     ("c", Column::from(vec![1i64, 10, 5])),
///     ("val", Column::from(vec![0.5, 1.5, 2.5])),
/// ])?;
/// let filtered = Where::new("(c == 1 or c == 10) and val > 1")?.apply(&df)?;
/// assert_eq!(filtered.row_count(), 1);
/// # Ok::<(), panql::Error>(())
/// ```
///
/// Bare names read columns of the frame the predicate is applied to, and
/// `and` / `or` combine whole boolean columns row by row. Column names are not
/// checked until application.
#[derive(Debug, Clone)]
pub struct Where {
    source: Arc<str>,
    expr: Arc<Expr>,
}

impl Where {
    /// Compile a filter expression
    pub fn new(source: &str) -> Result<Self> {
        let parsed = parse_expression(source)?;
        let (expr, rewriter) = rewrite_elementwise(parsed);

        log::debug!(
            "compiled filter {:?}: {} column reads, {} connector chains -> {}",
            source,
            rewriter.names_resolved(),
            rewriter.chains_folded(),
            expr
        );

        Ok(Self {
            source: source.into(),
            expr: Arc::new(expr),
        })
    }

    /// The expression text this predicate was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The rewritten expression tree that is evaluated
    pub fn expression(&self) -> &Expr {
        &self.expr
    }

    /// Evaluate the predicate, one boolean per row of `dataframe`
    pub fn evaluate(&self, dataframe: &DataFrame) -> Result<BooleanMask> {
        Evaluator::new(dataframe).evaluate_mask(&self.expr)
    }

    /// Keep the rows of `dataframe` for which the predicate holds
    pub fn apply(&self, dataframe: &DataFrame) -> Result<DataFrame> {
        let mask = self.evaluate(dataframe)?;
        let filtered = dataframe.filter_by_mask(&mask)?;

        log::trace!(
            "filter {:?} kept {} of {} rows",
            self.source,
            filtered.row_count(),
            dataframe.row_count()
        );

        Ok(filtered)
    }
}

impl FromStr for Where {
    type Err = crate::core::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
