//! Expression evaluation
//!
//! Rewritten expression trees are interpreted one node at a time over whole
//! columns. Every binary operator is elementwise: scalars are broadcast
//! against columns, two columns are combined row by row.

use std::borrow::Cow;

use super::ast::{BinaryOp, Expr, LiteralValue, UnaryOp};
use crate::column::{Column, ColumnType};
use crate::core::error::{Error, Result};
use crate::core::mask::BooleanMask;
use crate::dataframe::base::DataFrame;

/// Result of evaluating a (sub-)expression
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A single value not tied to any row
    Scalar(LiteralValue),
    /// A row-aligned column
    Column(Column),
}

impl Value {
    fn type_name(&self) -> String {
        match self {
            Value::Scalar(LiteralValue::Integer(_)) => "int64 scalar".into(),
            Value::Scalar(LiteralValue::Float(_)) => "float64 scalar".into(),
            Value::Scalar(LiteralValue::String(_)) => "string scalar".into(),
            Value::Scalar(LiteralValue::Boolean(_)) => "bool scalar".into(),
            Value::Column(column) => format!("{} column", column.column_type()),
        }
    }

    /// Materialise as a column of `len` rows, broadcasting scalars
    pub fn into_column(self, len: usize) -> Column {
        match self {
            Value::Column(column) => column,
            Value::Scalar(LiteralValue::Integer(v)) => Column::from(vec![v; len]),
            Value::Scalar(LiteralValue::Float(v)) => Column::from(vec![v; len]),
            Value::Scalar(LiteralValue::String(v)) => Column::from(vec![v; len]),
            Value::Scalar(LiteralValue::Boolean(v)) => Column::from(BooleanMask::all(len, v)),
        }
    }
}

/// Expression evaluator bound to one DataFrame
pub struct Evaluator<'a> {
    dataframe: &'a DataFrame,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator
    pub fn new(dataframe: &'a DataFrame) -> Self {
        Self { dataframe }
    }

    /// Evaluate an expression that must produce one boolean per row
    pub fn evaluate_mask(&self, expr: &Expr) -> Result<BooleanMask> {
        match self.evaluate(expr)? {
            Value::Column(Column::Boolean(column)) => Ok(column.mask().clone()),
            Value::Scalar(LiteralValue::Boolean(b)) => {
                Ok(BooleanMask::all(self.dataframe.row_count(), b))
            }
            other => Err(Error::Type(format!(
                "filter expression must evaluate to a boolean mask, got {}",
                other.type_name()
            ))),
        }
    }

    /// Evaluate an expression over the bound DataFrame
    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(value) => Ok(Value::Scalar(value.clone())),
            Expr::Column(name) => Ok(Value::Column(self.dataframe.column(name)?.clone())),
            Expr::Binary { left, op, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                apply_binary_operation(&left, *op, &right)
            }
            Expr::Unary { op, operand } => {
                let operand = self.evaluate(operand)?;
                apply_unary_operation(*op, operand)
            }
            Expr::Name(name) => Err(Error::InvalidValue(format!(
                "unresolved name {:?}; expressions must be rewritten before evaluation",
                name
            ))),
            Expr::BoolChain { op, .. } => Err(Error::InvalidValue(format!(
                "unfolded '{}' chain; expressions must be rewritten before evaluation",
                op.keyword()
            ))),
        }
    }
}

/// One operand of a binary operation: a broadcast scalar or a row vector
#[derive(Debug, Clone)]
enum Side<'v, T: Copy> {
    Scalar(T),
    Vector(Cow<'v, [T]>),
}

impl<'v, T: Copy> Side<'v, T> {
    #[inline]
    fn at(&self, row: usize) -> T {
        match self {
            Side::Scalar(v) => *v,
            Side::Vector(values) => values[row],
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Side::Scalar(_) => None,
            Side::Vector(values) => Some(values.len()),
        }
    }
}

/// Operand data grouped by kind
enum Data<'v> {
    Int(Side<'v, i64>),
    Float(Side<'v, f64>),
    Str(Side<'v, &'v str>),
    Bool(Side<'v, bool>),
}

impl<'v> Data<'v> {
    fn of(value: &'v Value) -> Self {
        match value {
            Value::Scalar(LiteralValue::Integer(v)) => Data::Int(Side::Scalar(*v)),
            Value::Scalar(LiteralValue::Float(v)) => Data::Float(Side::Scalar(*v)),
            Value::Scalar(LiteralValue::String(v)) => Data::Str(Side::Scalar(v.as_str())),
            Value::Scalar(LiteralValue::Boolean(v)) => Data::Bool(Side::Scalar(*v)),
            Value::Column(Column::Int64(col)) => {
                Data::Int(Side::Vector(Cow::Borrowed(col.values())))
            }
            Value::Column(Column::Float64(col)) => {
                Data::Float(Side::Vector(Cow::Borrowed(col.values())))
            }
            Value::Column(Column::String(col)) => {
                Data::Str(Side::Vector(Cow::Owned(col.iter().collect())))
            }
            Value::Column(Column::Boolean(col)) => {
                Data::Bool(Side::Vector(Cow::Owned(col.mask().to_vec())))
            }
        }
    }

    /// Numeric operands as floats; `None` for non-numeric data
    fn to_float(&self) -> Option<Side<'v, f64>> {
        match self {
            Data::Float(side) => Some(side.clone()),
            Data::Int(Side::Scalar(v)) => Some(Side::Scalar(*v as f64)),
            Data::Int(Side::Vector(values)) => Some(Side::Vector(Cow::Owned(
                values.iter().map(|&v| v as f64).collect(),
            ))),
            _ => None,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Data::Int(_) | Data::Float(_))
    }
}

/// Elementwise result before it is wrapped back into a [`Value`]
enum Out<R> {
    Scalar(R),
    Vector(Vec<R>),
}

trait IntoValue: Sized {
    fn scalar(self) -> LiteralValue;
    fn column(values: Vec<Self>) -> Column;
}

impl IntoValue for i64 {
    fn scalar(self) -> LiteralValue {
        LiteralValue::Integer(self)
    }
    fn column(values: Vec<Self>) -> Column {
        Column::from(values)
    }
}

impl IntoValue for f64 {
    fn scalar(self) -> LiteralValue {
        LiteralValue::Float(self)
    }
    fn column(values: Vec<Self>) -> Column {
        Column::from(values)
    }
}

impl IntoValue for bool {
    fn scalar(self) -> LiteralValue {
        LiteralValue::Boolean(self)
    }
    fn column(values: Vec<Self>) -> Column {
        Column::from(values)
    }
}

impl IntoValue for String {
    fn scalar(self) -> LiteralValue {
        LiteralValue::String(self)
    }
    fn column(values: Vec<Self>) -> Column {
        Column::from(values)
    }
}

impl<R: IntoValue> Out<R> {
    fn into_value(self) -> Value {
        match self {
            Out::Scalar(v) => Value::Scalar(v.scalar()),
            Out::Vector(values) => Value::Column(R::column(values)),
        }
    }
}

/// Combine two sides row by row, broadcasting scalars
fn zip_with<A, B, R, F>(left: &Side<'_, A>, right: &Side<'_, B>, f: F) -> Result<Value>
where
    A: Copy,
    B: Copy,
    R: IntoValue,
    F: Fn(A, B) -> Result<R>,
{
    let len = match (left.len(), right.len()) {
        (None, None) => return Ok(Out::Scalar(f(left.at(0), right.at(0))?).into_value()),
        (Some(l), Some(r)) if l != r => {
            return Err(Error::LengthMismatch {
                expected: l,
                actual: r,
            })
        }
        (Some(len), _) | (None, Some(len)) => len,
    };

    let values = (0..len)
        .map(|row| f(left.at(row), right.at(row)))
        .collect::<Result<Vec<R>>>()?;
    Ok(Out::Vector(values).into_value())
}

/// Apply binary operation
pub fn apply_binary_operation(left: &Value, op: BinaryOp, right: &Value) -> Result<Value> {
    // Boolean mask connectors combine packed bytes directly
    if let (Value::Column(Column::Boolean(l)), Value::Column(Column::Boolean(r))) = (left, right)
    {
        match op {
            BinaryOp::BitAnd => return Ok(Value::Column(Column::from(l.mask().and(r.mask())?))),
            BinaryOp::BitOr => return Ok(Value::Column(Column::from(l.mask().or(r.mask())?))),
            _ => {}
        }
    }

    let l = Data::of(left);
    let r = Data::of(right);

    match (&l, &r) {
        (Data::Int(a), Data::Int(b)) => integer_operation(a, op, b),
        (Data::Str(a), Data::Str(b)) => string_operation(a, op, b),
        (Data::Bool(a), Data::Bool(b)) => boolean_operation(a, op, b),
        _ if l.is_numeric() && r.is_numeric() => match (l.to_float(), r.to_float()) {
            (Some(a), Some(b)) => float_operation(&a, op, &b),
            _ => Err(unsupported(op, left, right)),
        },
        // Values of different kinds are never equal
        _ => match op {
            BinaryOp::Equal => zip_with(&unit(&l), &unit(&r), |_, _| Ok(false)),
            BinaryOp::NotEqual => zip_with(&unit(&l), &unit(&r), |_, _| Ok(true)),
            _ => Err(unsupported(op, left, right)),
        },
    }
}

/// Shape of a side without its data, for mixed-kind equality
fn unit<'v>(data: &Data<'v>) -> Side<'v, ()> {
    let len = match data {
        Data::Int(side) => side.len(),
        Data::Float(side) => side.len(),
        Data::Str(side) => side.len(),
        Data::Bool(side) => side.len(),
    };
    match len {
        None => Side::Scalar(()),
        Some(len) => Side::Vector(Cow::Owned(vec![(); len])),
    }
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> Error {
    Error::Type(format!(
        "unsupported operand types for '{}': {} and {}",
        op.symbol(),
        left.type_name(),
        right.type_name()
    ))
}

fn integer_operation(a: &Side<'_, i64>, op: BinaryOp, b: &Side<'_, i64>) -> Result<Value> {
    let overflow = || Error::Computation(format!("integer overflow in '{}'", op.symbol()));
    match op {
        BinaryOp::Add => zip_with(a, b, |x, y| x.checked_add(y).ok_or_else(overflow)),
        BinaryOp::Subtract => zip_with(a, b, |x, y| x.checked_sub(y).ok_or_else(overflow)),
        BinaryOp::Multiply => zip_with(a, b, |x, y| x.checked_mul(y).ok_or_else(overflow)),
        BinaryOp::Divide => zip_with(a, b, |x, y| Ok(x as f64 / y as f64)),
        BinaryOp::FloorDivide => zip_with(a, b, floor_div_i64),
        BinaryOp::Modulo => zip_with(a, b, floor_mod_i64),
        BinaryOp::Power => {
            // A negative exponent anywhere makes the whole result float
            let negative = match b {
                Side::Scalar(y) => *y < 0,
                Side::Vector(values) => values.iter().any(|&y| y < 0),
            };
            if negative {
                zip_with(a, b, |x, y| Ok((x as f64).powf(y as f64)))
            } else {
                zip_with(a, b, |x, y| {
                    u32::try_from(y)
                        .ok()
                        .and_then(|exp| x.checked_pow(exp))
                        .ok_or_else(overflow)
                })
            }
        }
        BinaryOp::BitAnd => zip_with(a, b, |x, y| Ok(x & y)),
        BinaryOp::BitOr => zip_with(a, b, |x, y| Ok(x | y)),
        _ => compare(a, op, b),
    }
}

fn floor_div_i64(x: i64, y: i64) -> Result<i64> {
    if y == 0 {
        return Err(Error::Computation("integer division by zero".into()));
    }
    let q = x
        .checked_div(y)
        .ok_or_else(|| Error::Computation("integer overflow in '//'".into()))?;
    if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

fn floor_mod_i64(x: i64, y: i64) -> Result<i64> {
    if y == 0 {
        return Err(Error::Computation("integer modulo by zero".into()));
    }
    let r = x.wrapping_rem(y);
    if r != 0 && ((r < 0) != (y < 0)) {
        Ok(r + y)
    } else {
        Ok(r)
    }
}

fn float_operation(a: &Side<'_, f64>, op: BinaryOp, b: &Side<'_, f64>) -> Result<Value> {
    match op {
        BinaryOp::Add => zip_with(a, b, |x, y| Ok(x + y)),
        BinaryOp::Subtract => zip_with(a, b, |x, y| Ok(x - y)),
        BinaryOp::Multiply => zip_with(a, b, |x, y| Ok(x * y)),
        BinaryOp::Divide => zip_with(a, b, |x, y| Ok(x / y)),
        BinaryOp::FloorDivide => zip_with(a, b, |x, y| Ok((x / y).floor())),
        BinaryOp::Modulo => zip_with(a, b, |x, y| {
            let r = x % y;
            Ok(if r != 0.0 && ((r < 0.0) != (y < 0.0)) {
                r + y
            } else {
                r
            })
        }),
        BinaryOp::Power => zip_with(a, b, |x, y| Ok(x.powf(y))),
        BinaryOp::BitAnd | BinaryOp::BitOr => Err(Error::Type(format!(
            "'{}' is not defined for float operands",
            op.symbol()
        ))),
        _ => compare(a, op, b),
    }
}

fn string_operation<'a>(
    a: &Side<'_, &'a str>,
    op: BinaryOp,
    b: &Side<'_, &'a str>,
) -> Result<Value> {
    match op {
        BinaryOp::Add => zip_with(a, b, |x, y| Ok(format!("{}{}", x, y))),
        op if op.is_comparison() => compare(a, op, b),
        _ => Err(Error::Type(format!(
            "'{}' is not defined for string operands",
            op.symbol()
        ))),
    }
}

fn boolean_operation(a: &Side<'_, bool>, op: BinaryOp, b: &Side<'_, bool>) -> Result<Value> {
    match op {
        BinaryOp::BitAnd => zip_with(a, b, |x, y| Ok(x & y)),
        BinaryOp::BitOr => zip_with(a, b, |x, y| Ok(x | y)),
        op if op.is_comparison() => compare(a, op, b),
        _ => Err(Error::Type(format!(
            "'{}' is not defined for boolean operands",
            op.symbol()
        ))),
    }
}

fn compare<T: Copy + PartialOrd>(a: &Side<'_, T>, op: BinaryOp, b: &Side<'_, T>) -> Result<Value> {
    match op {
        BinaryOp::Equal => zip_with(a, b, |x, y| Ok(x == y)),
        BinaryOp::NotEqual => zip_with(a, b, |x, y| Ok(x != y)),
        BinaryOp::LessThan => zip_with(a, b, |x, y| Ok(x < y)),
        BinaryOp::LessThanOrEqual => zip_with(a, b, |x, y| Ok(x <= y)),
        BinaryOp::GreaterThan => zip_with(a, b, |x, y| Ok(x > y)),
        BinaryOp::GreaterThanOrEqual => zip_with(a, b, |x, y| Ok(x >= y)),
        other => Err(Error::InvalidValue(format!(
            "'{}' is not a comparison",
            other.symbol()
        ))),
    }
}

/// Apply unary operation
pub fn apply_unary_operation(op: UnaryOp, operand: Value) -> Result<Value> {
    match (op, operand) {
        (UnaryOp::Plus, value @ Value::Scalar(LiteralValue::Integer(_) | LiteralValue::Float(_))) => {
            Ok(value)
        }
        (UnaryOp::Plus, Value::Column(column))
            if matches!(column.column_type(), ColumnType::Int64 | ColumnType::Float64) =>
        {
            Ok(Value::Column(column))
        }
        (UnaryOp::Negate, Value::Scalar(LiteralValue::Integer(v))) => v
            .checked_neg()
            .map(|v| Value::Scalar(LiteralValue::Integer(v)))
            .ok_or_else(|| Error::Computation("integer overflow in '-'".into())),
        (UnaryOp::Negate, Value::Scalar(LiteralValue::Float(v))) => {
            Ok(Value::Scalar(LiteralValue::Float(-v)))
        }
        (UnaryOp::Negate, Value::Column(Column::Int64(col))) => col
            .values()
            .iter()
            .map(|v| v.checked_neg())
            .collect::<Option<Vec<i64>>>()
            .map(|values| Value::Column(Column::from(values)))
            .ok_or_else(|| Error::Computation("integer overflow in '-'".into())),
        (UnaryOp::Negate, Value::Column(Column::Float64(col))) => Ok(Value::Column(Column::from(
            col.values().iter().map(|v| -v).collect::<Vec<f64>>(),
        ))),
        (op, operand) => Err(Error::Type(format!(
            "unary '{}' is not defined for {}",
            match op {
                UnaryOp::Negate => "-",
                UnaryOp::Plus => "+",
            },
            operand.type_name()
        ))),
    }
}
