//! DataFrame integration for filter and selection expressions
//!
//! This module provides the extension trait that exposes query functionality
//! directly on [`DataFrame`].

use super::evaluator::Evaluator;
use super::lexer_parser::parse_expression;
use super::predicate::Where;
use super::rewrite::rewrite_elementwise;
use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;
use crate::dataframe::select::Select;

/// Extension trait to add query functionality to DataFrame
pub trait QueryExt {
    /// Keep the rows matching a filter expression
    fn query(&self, expr: &str) -> Result<DataFrame>;

    /// Project (and rename) columns using a selection string
    fn select(&self, selection: &str) -> Result<DataFrame>;

    /// Evaluate an expression and return a new frame with the result appended
    /// as `result_column`
    fn eval(&self, expr: &str, result_column: &str) -> Result<DataFrame>;
}

impl QueryExt for DataFrame {
    fn query(&self, expr: &str) -> Result<DataFrame> {
        Where::new(expr)?.apply(self)
    }

    fn select(&self, selection: &str) -> Result<DataFrame> {
        Select::new(selection)?.apply(self)
    }

    fn eval(&self, expr: &str, result_column: &str) -> Result<DataFrame> {
        if self.contains_column(result_column) {
            return Err(Error::DuplicateColumnName(result_column.to_string()));
        }

        let (rewritten, _) = rewrite_elementwise(parse_expression(expr)?);
        let value = Evaluator::new(self).evaluate(&rewritten)?;

        let mut result = self.clone();
        result.add_column(result_column, value.into_column(self.row_count()))?;
        Ok(result)
    }
}
