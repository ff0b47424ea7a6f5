//! Column projection with optional row filtering
//!
//! A [`Select`] is built from a selection string such as
//! `"subscript, kappa as value"` and can carry filters attached with
//! [`Select::with_filter`]. Applying it filters first and projects second, so
//! a filter may use columns the projection drops.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{Error, Result};
use crate::dataframe::base::DataFrame;
use crate::dataframe::query::Where;

const ALIAS_SEPARATOR: &str = " as ";

fn is_dangling_alias(entry: &str) -> bool {
    entry.starts_with("as ") || entry.ends_with(" as")
}

/// One projected column: its source name and optional output alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    name: String,
    alias: Option<String>,
}

impl VarSpec {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    /// Parse a single `name` or `name as alias` entry.
    ///
    /// A lone `as` is a column name; `as` opening or closing a longer entry
    /// leaves the name or alias missing.
    pub fn parse(entry: &str) -> Result<Self> {
        let trimmed = entry.trim();
        let parts: Vec<&str> = trimmed.split(ALIAS_SEPARATOR).map(str::trim).collect();

        match parts.as_slice() {
            [name] if !name.is_empty() && !is_dangling_alias(name) => Ok(Self::new(*name, None)),
            [name, alias] if !name.is_empty() && !alias.is_empty() => {
                Ok(Self::new(*name, Some(alias.to_string())))
            }
            _ => Err(Error::MalformedSelectionEntry(trimmed.to_string())),
        }
    }

    /// Column read from the input frame
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Label of the column in the output frame
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{}{}{}", self.name, ALIAS_SEPARATOR, alias),
            None => f.write_str(&self.name),
        }
    }
}

/// Immutable filter-then-project pipeline
///
/// ```
/// use panql::{Column, DataFrame, Select};
///
/// let df = DataFrame::from_columns(vec![
///     ("subscript", Column::from(vec![1i64, 1, 2, 2])),
///     ("kappa", Column::from(vec![-1i64, 2, -3, 4])),
/// ])?;
/// let out = Select::new("subscript, kappa as value")?
///     .with_filter("kappa > 0")?
///     .apply(&df)?;
/// assert_eq!(out.column_names(), &["subscript", "value"]);
/// assert_eq!(out.row_count(), 2);
/// # Ok::<(), panql::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Select {
    vars: Arc<[VarSpec]>,
    filters: Arc<[Where]>,
}

impl Select {
    /// Parse a comma-separated selection string
    pub fn new(selection: &str) -> Result<Self> {
        if selection.trim().is_empty() {
            return Err(Error::syntax("empty selection", 0));
        }

        let vars = selection
            .split(',')
            .map(VarSpec::parse)
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(vars.len());
        for var in &vars {
            if !seen.insert(var.output_name()) {
                return Err(Error::DuplicateColumnName(var.output_name().to_string()));
            }
        }

        log::debug!("compiled selection {:?} into {} columns", selection, vars.len());

        Ok(Self {
            vars: vars.into(),
            filters: Arc::from(Vec::new()),
        })
    }

    /// The projected columns, in output order
    pub fn vars(&self) -> &[VarSpec] {
        &self.vars
    }

    /// Filters applied before projection, in attachment order
    pub fn filters(&self) -> &[Where] {
        &self.filters
    }

    /// Output column labels, in order
    pub fn output_names(&self) -> Vec<&str> {
        self.vars.iter().map(VarSpec::output_name).collect()
    }

    /// Compile `expr` and return a pipeline that filters with it before projecting.
    ///
    /// Filters already attached stay in place and run first.
    pub fn with_filter(&self, expr: &str) -> Result<Select> {
        Ok(self.with_predicate(Where::new(expr)?))
    }

    /// Same as [`with_filter`](Select::with_filter) for an already compiled predicate
    pub fn with_predicate(&self, predicate: Where) -> Select {
        let filters: Vec<Where> = self
            .filters
            .iter()
            .cloned()
            .chain(std::iter::once(predicate))
            .collect();

        Select {
            vars: Arc::clone(&self.vars),
            filters: filters.into(),
        }
    }

    /// Filter, then project and rename. The input frame is never modified.
    pub fn apply(&self, dataframe: &DataFrame) -> Result<DataFrame> {
        let selection: Vec<(&str, &str)> = self
            .vars
            .iter()
            .map(|var| (var.name(), var.output_name()))
            .collect();

        let Some((first, rest)) = self.filters.split_first() else {
            return dataframe.select_columns(&selection);
        };

        let mut filtered = first.apply(dataframe)?;
        for predicate in rest {
            filtered = predicate.apply(&filtered)?;
        }

        filtered.select_columns(&selection)
    }
}

impl FromStr for Select {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        for (i, var) in self.vars.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", var)?;
        }
        for (i, predicate) in self.filters.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            write!(f, " {} ({})", keyword, predicate)?;
        }
        Ok(())
    }
}
