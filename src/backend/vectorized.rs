use ndarray::{ArrayD, Axis, Zip};

use crate::{
    backend::core::{Backend, BackendKind},
    error::RuntimeError,
    evaluator::core::EvalResult,
    node::operator::{Elementary, ElementaryParams, SumParams},
    value::{
        array::{Element, NdArray, broadcast_shape, broadcast_to, collect_results, zip_with},
        core::Value,
        dtype::DType,
    },
};

/// Element-wise backend.
///
/// Every operation converts its operands to arrays, so lists, tuples and
/// scalars broadcast against arrays. Floating-point results follow IEEE
/// semantics: the square root of a negative number is NaN and an
/// overflowing exponential is infinite.
///
/// # Example
/// ```
/// use fframe::{
///     backend::{core::Backend, vectorized::Vectorized},
///     node::operator::SumParams,
///     value::core::Value,
/// };
/// use ndarray::array;
///
/// let matrix = Value::from(array![[1_i64, 2], [3, 4]]);
///
/// assert_eq!(Vectorized.sum(&matrix, &SumParams::default()).unwrap(), Value::Integer(10));
/// assert_eq!(Vectorized.sum(&matrix, &SumParams::along(1)).unwrap(), Value::from(array![3_i64, 7]));
/// assert_eq!(Vectorized.clip(&Value::list([-1, 5]), &Value::Integer(0), &Value::Integer(3))
///                      .unwrap(),
///            Value::from(array![0_i64, 3]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Vectorized;

/// Sum of integers, checked for overflow.
fn checked_total<'a>(mut items: impl Iterator<Item = &'a i64>) -> EvalResult<i64> {
    items.try_fold(0_i64, |acc, &x| acc.checked_add(x).ok_or(RuntimeError::Overflow))
}

/// Clips every element of `value` into the matching `[low, high]`, with all
/// three broadcast together. A bound that is crossed wins over the value, and
/// `high` wins over `low`.
fn clip_elements<A: Element>(value: &ArrayD<A>,
                             low: &ArrayD<A>,
                             high: &ArrayD<A>)
                             -> EvalResult<NdArray> {
    let shape = broadcast_shape(&broadcast_shape(value.shape(), low.shape())?, high.shape())?;
    let (value, low, high) =
        (broadcast_to(value, &shape)?, broadcast_to(low, &shape)?, broadcast_to(high, &shape)?);

    Ok(A::wrap(Zip::from(&value).and(&low).and(&high).map_collect(|&v, &l, &h| {
                                                                let raised = if v < l { l } else { v };
                                                                if h < raised { h } else { raised }
                                                            })))
}

fn with_dtype(value: Value, dtype: Option<DType>) -> EvalResult<Value> {
    match dtype {
        Some(dtype) => value.cast(dtype),
        None => Ok(value),
    }
}

impl Backend for Vectorized {
    fn kind(&self) -> BackendKind {
        BackendKind::Vectorized
    }

    fn elementary(&self,
                  func: Elementary,
                  x: &Value,
                  params: &ElementaryParams)
                  -> EvalResult<Value> {
        let result = NdArray::Float(NdArray::from_value(x)?.to_floats().mapv(|v| func.apply(v)));
        match params.dtype {
            Some(dtype) => Ok(result.cast(dtype)?.into_value()),
            None => Ok(result.into_value()),
        }
    }

    fn logical_and(&self, a: &Value, b: &Value) -> EvalResult<Value> {
        let (a, b) = (NdArray::from_value(a)?.to_bools(), NdArray::from_value(b)?.to_bools());
        Ok(NdArray::Bool(zip_with(&a, &b, |&l, &r| l && r)?).into_value())
    }

    fn logical_not(&self, x: &Value) -> EvalResult<Value> {
        Ok(NdArray::Bool(NdArray::from_value(x)?.to_bools().mapv(|v| !v)).into_value())
    }

    fn clip(&self, value: &Value, low: &Value, high: &Value) -> EvalResult<Value> {
        let (value, low, high) =
            (NdArray::from_value(value)?, NdArray::from_value(low)?, NdArray::from_value(high)?);

        let clipped = match value.dtype().promote(low.dtype()).promote(high.dtype()) {
            DType::Bool => clip_elements(&value.to_bools(), &low.to_bools(), &high.to_bools())?,
            DType::Int => clip_elements(&value.to_ints()?, &low.to_ints()?, &high.to_ints()?)?,
            DType::Float => clip_elements(&value.to_floats(), &low.to_floats(), &high.to_floats())?,
        };
        Ok(clipped.into_value())
    }

    fn sum(&self, x: &Value, params: &SumParams) -> EvalResult<Value> {
        let Value::Array(array) = x else {
            return Err(RuntimeError::UnknownAttribute { type_name: x.type_name(),
                                                        name:      "sum".to_string(), });
        };

        let total = match params.axis {
            None => match array.as_ref() {
                NdArray::Float(items) => Value::Real(items.sum()),
                other => Value::Integer(checked_total(other.to_ints()?.iter())?),
            },
            Some(axis) => {
                let ndim = array.ndim();
                if axis >= ndim {
                    return Err(RuntimeError::AxisOutOfBounds { axis, ndim });
                }

                let sums = match array.as_ref() {
                    NdArray::Float(items) => NdArray::Float(items.sum_axis(Axis(axis))),
                    other => {
                        let lanes = other.to_ints()?.map_axis(Axis(axis), |lane| checked_total(lane.iter()));
                        NdArray::Int(collect_results(&lanes)?)
                    },
                };
                sums.into_value()
            },
        };

        with_dtype(total, params.dtype)
    }

    fn astype(&self, x: &Value, dtype: DType) -> EvalResult<Value> {
        match x {
            Value::Array(_) | Value::Integer(_) | Value::Real(_) | Value::Bool(_) => x.cast(dtype),
            _ => Err(RuntimeError::UnknownAttribute { type_name: x.type_name(),
                                                      name:      "astype".to_string(), }),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn domain_errors_become_nan_and_infinity() {
        let sqrt = Vectorized.elementary(Elementary::Sqrt,
                                         &Value::Real(-1.0),
                                         &ElementaryParams::default())
                             .unwrap();
        assert!(sqrt.as_real().unwrap().is_nan());

        let exp = Vectorized.elementary(Elementary::Exp,
                                        &Value::Real(1000.0),
                                        &ElementaryParams::default())
                            .unwrap();
        assert_eq!(exp, Value::Real(f64::INFINITY));
    }

    #[test]
    fn logical_ops_broadcast() {
        let a = Value::from(array![true, false, true]);
        assert_eq!(Vectorized.logical_and(&a, &Value::Bool(true)).unwrap(), a);
        assert_eq!(Vectorized.logical_not(&Value::list([0, 2])).unwrap(),
                   Value::from(array![true, false]));
        assert_eq!(Vectorized.logical_not(&Value::Integer(0)).unwrap(), Value::Bool(true));
    }

    #[test]
    fn sum_checks_axis_and_input() {
        let vector = Value::from(array![1.5, 2.5]);
        assert_eq!(Vectorized.sum(&vector, &SumParams::along(1)),
                   Err(RuntimeError::AxisOutOfBounds { axis: 1, ndim: 1 }));
        assert_eq!(Vectorized.sum(&vector, &SumParams::along(0).with_dtype(DType::Int))
                             .unwrap(),
                   Value::Integer(4));
        assert!(matches!(Vectorized.sum(&Value::list([1]), &SumParams::default()),
                         Err(RuntimeError::UnknownAttribute { .. })));
    }

    #[test]
    fn sum_of_booleans_counts() {
        let flags = Value::from(array![true, true, false]);
        assert_eq!(Vectorized.sum(&flags, &SumParams::default()).unwrap(), Value::Integer(2));
    }

    #[test]
    fn integer_sums_are_checked() {
        let big = Value::from(array![[i64::MAX, 1], [0, 0]]);
        assert_eq!(Vectorized.sum(&big, &SumParams::default()), Err(RuntimeError::Overflow));
        assert_eq!(Vectorized.sum(&big, &SumParams::along(1)), Err(RuntimeError::Overflow));
        assert_eq!(Vectorized.sum(&big, &SumParams::along(0)).unwrap(),
                   Value::from(array![i64::MAX, 1]));
    }

    #[test]
    fn clip_broadcasts_bounds() {
        let value = Value::from(array![-2.0, 0.5, 9.0]);
        let low = Value::from(array![-1.0, 1.0, 0.0]);
        assert_eq!(Vectorized.clip(&value, &low, &Value::Real(5.0)).unwrap(),
                   Value::from(array![-1.0, 1.0, 5.0]));
    }

    #[test]
    fn clip_with_crossed_bounds_takes_high() {
        let value = Value::from(array![0_i64, 5, 10]);
        assert_eq!(Vectorized.clip(&value, &Value::Integer(6), &Value::Integer(3)).unwrap(),
                   Value::from(array![3_i64, 3, 3]));
    }
}
