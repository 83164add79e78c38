use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    evaluator::core::{Context, EvalResult},
    node::operator::BinaryOperator,
    value::core::{Number, Value},
};

/// Compares two values for equality.
///
/// Numbers compare by value across integers, reals and booleans. Strings
/// compare by content, and lists, tuples, arrays and mappings compare
/// element by element. Values of different kinds are never equal.
///
/// # Example
/// ```
/// use fframe::{evaluator::binary::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::Integer(1), &Value::Real(1.0)));
/// assert!(values_equal(&Value::Bool(true), &Value::Integer(1)));
/// assert!(!values_equal(&Value::list([1]), &Value::tuple([1])));
/// assert!(!values_equal(&Value::Real(f64::NAN), &Value::Real(f64::NAN)));
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| values_equal(x, y))
        },
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
            && a.iter()
                .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        },
        (Value::Str(a), Value::Str(b)) => a == b,
        #[cfg(feature = "vectorized")]
        (Value::Array(a), Value::Array(b)) => a.same_elements(b),
        _ => match (left.as_number(), right.as_number()) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => a == b,
            (Some(a), Some(b)) => a.as_f64() == b.as_f64(),
            _ => false,
        },
    }
}

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `Equal` and `NotEqual` use [`values_equal`] and accept any operands.
    /// Orderings are defined for numbers, for strings, and for two lists or
    /// two tuples, which compare lexicographically. A NaN operand makes
    /// every ordering false.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     evaluator::core::Context,
    ///     node::operator::BinaryOperator,
    ///     value::core::Value,
    /// };
    ///
    /// let result = Context::eval_comparison(BinaryOperator::LessEqual,
    ///                                       &Value::list([1, 2]),
    ///                                       &Value::list([1, 3])).unwrap();
    /// assert_eq!(result, Value::Bool(true));
    ///
    /// assert!(Context::eval_comparison(BinaryOperator::Less,
    ///                                  &Value::from("a"),
    ///                                  &Value::Integer(1)).is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value)
                           -> EvalResult<Value> {
        use BinaryOperator::{
            Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Power, Product, Quotient, Sum,
        };

        let result = match op {
            Equal => values_equal(left, right),
            NotEqual => !values_equal(left, right),
            _ => match Self::compare_values(op, left, right)? {
                None => false,
                Some(ordering) => match op {
                    Less => ordering.is_lt(),
                    LessEqual => ordering.is_le(),
                    Greater => ordering.is_gt(),
                    GreaterEqual => ordering.is_ge(),
                    Sum | Product | Quotient | Power | Equal | NotEqual => false,
                },
            },
        };

        Ok(Value::Bool(result))
    }

    /// Orders two values. `None` means the values are unordered (NaN).
    fn compare_values(op: BinaryOperator,
                      left: &Value,
                      right: &Value)
                      -> EvalResult<Option<Ordering>> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    if !values_equal(x, y) {
                        return Self::compare_values(op, x, y);
                    }
                }
                Ok(Some(a.len().cmp(&b.len())))
            },
            _ => match (left.as_number(), right.as_number()) {
                (Some(Number::Int(a)), Some(Number::Int(b))) => Ok(Some(a.cmp(&b))),
                (Some(a), Some(b)) => Ok(a.as_f64().partial_cmp(&b.as_f64())),
                _ => Err(RuntimeError::UnsupportedOperands { op:    op.symbol(),
                                                             left:  left.type_name(),
                                                             right: right.type_name(), }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_unordered() {
        let nan = Value::Real(f64::NAN);
        for op in [BinaryOperator::Less, BinaryOperator::GreaterEqual, BinaryOperator::Equal] {
            assert_eq!(Context::eval_comparison(op, &nan, &Value::Real(1.0)).unwrap(),
                       Value::Bool(false));
        }
        assert_eq!(Context::eval_comparison(BinaryOperator::NotEqual, &nan, &nan).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        let result = Context::eval_comparison(BinaryOperator::Less,
                                              &Value::tuple([1, 2]),
                                              &Value::tuple([1, 2, 0])).unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[test]
    fn mixed_kinds_are_never_equal() {
        let result = Context::eval_comparison(BinaryOperator::Equal,
                                              &Value::from("1"),
                                              &Value::Integer(1)).unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn maps_compare_by_content() {
        assert!(values_equal(&Value::map([(1, 2.0)]), &Value::map([(1, 2)])));
        assert!(!values_equal(&Value::map([(1, 2)]), &Value::map([(2, 2)])));
    }
}
