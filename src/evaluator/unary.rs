#[cfg(feature = "vectorized")]
use crate::value::array::{NdArray, try_map};
use crate::{
    error::RuntimeError,
    evaluator::core::{Context, EvalResult},
    node::operator::Conversion,
    value::core::Value,
};

impl Context {
    /// Negates a value.
    ///
    /// Integers are negated with overflow checking, booleans become `0` or
    /// `-1`, and arrays are negated element by element.
    ///
    /// # Example
    /// ```
    /// use fframe::{evaluator::core::Context, value::core::Value};
    ///
    /// assert_eq!(Context::eval_neg(&Value::Integer(5)).unwrap(), Value::Integer(-5));
    /// assert_eq!(Context::eval_neg(&Value::Bool(true)).unwrap(), Value::Integer(-1));
    /// assert!(Context::eval_neg(&Value::from("x")).is_err());
    /// ```
    pub fn eval_neg(value: &Value) -> EvalResult<Value> {
        match value {
            Value::Integer(n) => n.checked_neg().map(Value::Integer).ok_or(RuntimeError::Overflow),
            Value::Real(r) => Ok(Value::Real(-r)),
            Value::Bool(b) => Ok(Value::Integer(-i64::from(*b))),
            #[cfg(feature = "vectorized")]
            Value::Array(array) => {
                let negated = match array.as_ref() {
                    NdArray::Float(items) => NdArray::Float(items.mapv(|x| -x)),
                    other => NdArray::Int(try_map(&other.to_ints()?, |x| {
                                               x.checked_neg().ok_or(RuntimeError::Overflow)
                                           })?),
                };
                Ok(negated.into_value())
            },
            _ => Err(RuntimeError::BadOperand { op:        "-",
                                                type_name: value.type_name(), }),
        }
    }

    /// Converts a value with a native conversion.
    pub fn eval_conversion(conversion: Conversion, value: &Value) -> EvalResult<Value> {
        match conversion {
            Conversion::Int => value.to_int(),
            Conversion::Float => value.to_float(),
            Conversion::Bool => value.to_bool(),
        }
    }
}

#[cfg(all(test, feature = "vectorized"))]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn arrays_negate_element_wise() {
        assert_eq!(Context::eval_neg(&Value::from(array![1.5, -2.0])).unwrap(),
                   Value::from(array![-1.5, 2.0]));
        assert_eq!(Context::eval_neg(&Value::from(array![true, false])).unwrap(),
                   Value::from(array![-1_i64, 0]));
        assert_eq!(Context::eval_neg(&Value::from(array![i64::MIN])), Err(RuntimeError::Overflow));
    }
}
