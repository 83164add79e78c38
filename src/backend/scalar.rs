use crate::{
    backend::core::{Backend, BackendKind},
    error::RuntimeError,
    evaluator::core::{Context, EvalResult},
    node::operator::{BinaryOperator, Elementary, ElementaryParams, SumParams},
    value::{core::Value, dtype::DType},
};

/// Single-value backend.
///
/// The elementary functions take one number and report domain errors
/// instead of producing NaN or infinity. Clipping and the logical
/// operations use native comparison and truthiness. `sum` adds up the
/// top-level elements of any iterable and ignores its axis and dtype
/// parameters.
///
/// # Example
/// ```
/// use fframe::{
///     backend::{core::Backend, scalar::Scalar},
///     node::operator::{Elementary, ElementaryParams, SumParams},
///     value::core::Value,
/// };
///
/// let params = ElementaryParams::default();
/// assert!(Scalar.elementary(Elementary::Sqrt, &Value::Integer(-1), &params).is_err());
///
/// assert_eq!(Scalar.sum(&Value::list([1, 2, 3]), &SumParams::along(4)).unwrap(),
///            Value::Integer(6));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl Backend for Scalar {
    fn kind(&self) -> BackendKind {
        BackendKind::Scalar
    }

    fn elementary(&self,
                  func: Elementary,
                  x: &Value,
                  _params: &ElementaryParams)
                  -> EvalResult<Value> {
        let x = x.as_real()?;
        let out_of_domain = match func {
            Elementary::Sqrt => x < 0.0,
            Elementary::Sin | Elementary::Cos => x.is_infinite(),
            Elementary::Exp => false,
        };
        if out_of_domain {
            return Err(RuntimeError::MathDomain { function: func.name() });
        }

        let result = func.apply(x);
        if result.is_infinite() && x.is_finite() {
            return Err(RuntimeError::Overflow);
        }
        Ok(Value::Real(result))
    }

    fn logical_and(&self, a: &Value, b: &Value) -> EvalResult<Value> {
        let (a, b) = (a.truth()?, b.truth()?);
        Ok(Value::Bool(a && b))
    }

    fn logical_not(&self, x: &Value) -> EvalResult<Value> {
        Ok(Value::Bool(!x.truth()?))
    }

    fn clip(&self, value: &Value, low: &Value, high: &Value) -> EvalResult<Value> {
        if Context::eval_binary(BinaryOperator::Less, value, low)?.truth()? {
            Ok(low.clone())
        } else if Context::eval_binary(BinaryOperator::Less, value, high)?.truth()? {
            Ok(value.clone())
        } else {
            Ok(high.clone())
        }
    }

    fn sum(&self, x: &Value, _params: &SumParams) -> EvalResult<Value> {
        let items: Vec<Value> = match x {
            Value::List(items) | Value::Tuple(items) => items.to_vec(),
            #[cfg(feature = "vectorized")]
            Value::Array(array) => array.outer_values(),
            Value::Map(map) => map.keys().cloned().map(Value::from).collect(),
            Value::Str(s) => s.chars().map(|c| Value::from(c.to_string())).collect(),
            _ => return Err(RuntimeError::NotIterable { type_name: x.type_name() }),
        };

        items.iter().try_fold(Value::Integer(0), |acc, item| {
                        Context::eval_binary(BinaryOperator::Sum, &acc, item)
                    })
    }

    fn astype(&self, x: &Value, dtype: DType) -> EvalResult<Value> {
        match x {
            Value::Integer(_) | Value::Real(_) | Value::Bool(_) | Value::Str(_) => x.cast(dtype),
            _ => Err(RuntimeError::TypeError { details: format!("Cannot convert '{}' to {dtype} without the vectorized backend",
                                                                x.type_name()) }),
        }
    }
}
