use std::sync::Arc;

use crate::{
    error::RuntimeError,
    evaluator::core::{Context, EvalResult},
    node::operator::BinaryOperator,
    util::num::i64_to_f64,
    value::core::{Number, Value},
};

fn unsupported(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnsupportedOperands { op:    op.symbol(),
                                        left:  left.type_name(),
                                        right: right.type_name(), }
}

/// Length of `len` items repeated `count` times. Non-positive counts give
/// zero. Fails with `Overflow` when the result cannot be addressed.
fn repeated_len(len: usize, count: i64) -> EvalResult<usize> {
    let count = usize::try_from(count).unwrap_or(0);
    len.checked_mul(count).ok_or(RuntimeError::Overflow)
}

/// Repeats a sequence `count` times.
fn repeat<T: Clone>(items: &[T], count: i64) -> EvalResult<Vec<T>> {
    let total = repeated_len(items.len(), count)?;
    let mut out = Vec::new();
    out.try_reserve_exact(total).map_err(|_| RuntimeError::Overflow)?;
    while out.len() < total {
        out.extend_from_slice(items);
    }
    Ok(out)
}

/// Repeats a string `count` times.
fn repeat_str(s: &str, count: i64) -> EvalResult<String> {
    let total = repeated_len(s.len(), count)?;
    let mut out = String::new();
    out.try_reserve_exact(total).map_err(|_| RuntimeError::Overflow)?;
    while out.len() < total {
        out.push_str(s);
    }
    Ok(out)
}

impl Context {
    /// Evaluates a scalar arithmetic operation.
    ///
    /// Numbers are promoted along bool, int, real. Integer results are checked
    /// for overflow; `/` is true division and always produces a real.
    /// Division by zero fails for every numeric combination.
    ///
    /// Strings, lists and tuples concatenate with `+` when both sides have the
    /// same type, and repeat with `*` when the other side is an integer.
    /// The operator must be one of `Sum`, `Product` or `Quotient`; every other
    /// operator is reported as unsupported for the operands.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed scalar.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     evaluator::core::Context,
    ///     node::operator::BinaryOperator,
    ///     value::core::Value,
    /// };
    ///
    /// let x = Value::Integer(7);
    /// let y = Value::Integer(2);
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Quotient, &x, &y).unwrap();
    /// assert_eq!(result, Value::Real(3.5));
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Product, &Value::from("ab"), &y);
    /// assert_eq!(result.unwrap(), Value::from("abab"));
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Product, Quotient, Sum};
        use Value::{Integer, List, Real, Str, Tuple};

        match (op, left, right) {
            (Sum, Str(a), Str(b)) => return Ok(Value::from(format!("{a}{b}"))),
            (Sum, List(a), List(b)) => {
                return Ok(List(Arc::new([a.as_slice(), b.as_slice()].concat())));
            },
            (Sum, Tuple(a), Tuple(b)) => {
                return Ok(Tuple(Arc::new([a.as_slice(), b.as_slice()].concat())));
            },
            (Product, Str(_) | List(_) | Tuple(_), Integer(_) | Value::Bool(_)) => {
                return Self::eval_repeat(left, right);
            },
            (Product, Integer(_) | Value::Bool(_), Str(_) | List(_) | Tuple(_)) => {
                return Self::eval_repeat(right, left);
            },
            _ => {},
        }

        let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
            return Err(unsupported(op, left, right));
        };

        match (a, b) {
            (Number::Int(a), Number::Int(b)) => match op {
                Sum => a.checked_add(b).map(Integer).ok_or(RuntimeError::Overflow),
                Product => a.checked_mul(b).map(Integer).ok_or(RuntimeError::Overflow),
                Quotient => {
                    if b == 0 {
                        Err(RuntimeError::DivisionByZero)
                    } else {
                        Ok(Real(i64_to_f64(a) / i64_to_f64(b)))
                    }
                },
                _ => Err(unsupported(op, left, right)),
            },
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                match op {
                    Sum => Ok(Real(a + b)),
                    Product => Ok(Real(a * b)),
                    Quotient => {
                        if b == 0.0 {
                            Err(RuntimeError::DivisionByZero)
                        } else {
                            Ok(Real(a / b))
                        }
                    },
                    _ => Err(unsupported(op, left, right)),
                }
            },
        }
    }

    /// Repeats a string, list or tuple.
    fn eval_repeat(sequence: &Value, count: &Value) -> EvalResult<Value> {
        let Some(Number::Int(times)) = count.as_number() else {
            return Err(unsupported(BinaryOperator::Product, sequence, count));
        };

        match sequence {
            Value::Str(s) => Ok(Value::from(repeat_str(s, times)?)),
            Value::List(items) => Ok(Value::List(Arc::new(repeat(items, times)?))),
            Value::Tuple(items) => Ok(Value::Tuple(Arc::new(repeat(items, times)?))),
            _ => Err(unsupported(BinaryOperator::Product, sequence, count)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_overflow_is_reported() {
        let result = Context::eval_scalar_op(BinaryOperator::Product,
                                             &Value::Integer(i64::MAX),
                                             &Value::Integer(2));
        assert_eq!(result, Err(RuntimeError::Overflow));
    }

    #[test]
    fn booleans_count_as_integers() {
        let result = Context::eval_scalar_op(BinaryOperator::Sum, &Value::Bool(true), &Value::Bool(true));
        assert_eq!(result.unwrap(), Value::Integer(2));
    }

    #[test]
    fn division_by_zero_fails_on_scalars() {
        for zero in [Value::Integer(0), Value::Real(0.0), Value::Bool(false)] {
            assert_eq!(Context::eval_scalar_op(BinaryOperator::Quotient, &Value::Real(1.0), &zero),
                       Err(RuntimeError::DivisionByZero));
        }
    }

    #[test]
    fn sequences_concatenate_and_repeat() {
        let list = Value::list([1, 2]);
        assert_eq!(Context::eval_scalar_op(BinaryOperator::Sum, &list, &Value::list([3])).unwrap(),
                   Value::list([1, 2, 3]));
        assert_eq!(Context::eval_scalar_op(BinaryOperator::Product, &Value::Integer(2), &list).unwrap(),
                   Value::list([1, 2, 1, 2]));
        assert_eq!(Context::eval_scalar_op(BinaryOperator::Sum, &list, &Value::tuple([3])),
                   Err(RuntimeError::UnsupportedOperands { op:    "+",
                                                           left:  "list",
                                                           right: "tuple", }));
    }

    #[test]
    fn huge_repetition_overflows() {
        let huge = Value::Integer(i64::MAX);
        for sequence in [Value::from("ab"), Value::list([1]), Value::tuple([1, 2])] {
            assert_eq!(Context::eval_scalar_op(BinaryOperator::Product, &sequence, &huge),
                       Err(RuntimeError::Overflow));
        }
        assert_eq!(Context::eval_scalar_op(BinaryOperator::Product, &Value::list(Vec::<Value>::new()), &huge)
                       .unwrap(),
                   Value::list(Vec::<Value>::new()));
        assert_eq!(Context::eval_scalar_op(BinaryOperator::Product, &Value::from("ab"), &Value::Integer(-3))
                       .unwrap(),
                   Value::from(""));
    }
}
