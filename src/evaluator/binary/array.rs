use ndarray::ArrayD;

use crate::{
    error::RuntimeError,
    evaluator::{
        binary::power::checked_int_pow,
        core::{Context, EvalResult},
    },
    node::operator::BinaryOperator,
    value::{
        array::{NdArray, try_zip_with, zip_with},
        dtype::DType,
    },
};

/// Integer power on array elements. Unlike scalars, integer arrays cannot
/// hold the real result of a negative exponent.
fn int_power(base: i64, exponent: i64) -> EvalResult<i64> {
    if exponent < 0 {
        return Err(RuntimeError::TypeError { details: "Integers to negative integer powers are not allowed".to_string() });
    }
    checked_int_pow(base, exponent)
}

/// Compares two arrays element by element.
fn compare<A: PartialOrd>(op: BinaryOperator,
                          left: &ArrayD<A>,
                          right: &ArrayD<A>)
                          -> EvalResult<NdArray> {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual};

    let holds: fn(&A, &A) -> bool = match op {
        Less => A::lt,
        LessEqual => A::le,
        Greater => A::gt,
        GreaterEqual => A::ge,
        Equal => A::eq,
        _ => A::ne,
    };
    Ok(NdArray::Bool(zip_with(left, right, holds)?))
}

impl Context {
    /// Evaluates a binary operation element by element.
    ///
    /// The operands are broadcast against each other and booleans count as
    /// integers. When either operand holds reals, or the operator is `/`,
    /// the operation runs on reals with IEEE semantics: division by zero
    /// gives an infinity or NaN instead of failing. Otherwise integer
    /// results are checked for overflow. Comparisons produce booleans.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The array of element results.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the shapes cannot be broadcast together.
    /// - `Overflow` if an integer result is too large.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     evaluator::core::Context,
    ///     node::operator::BinaryOperator,
    ///     value::array::NdArray,
    /// };
    /// use ndarray::array;
    ///
    /// let matrix = NdArray::from(array![[1_i64, 2], [3, 4]]);
    /// let column = NdArray::from(array![[10_i64], [20]]);
    ///
    /// let r = Context::eval_array_binary(BinaryOperator::Product, &matrix, &column).unwrap();
    /// assert_eq!(r, NdArray::from(array![[10_i64, 20], [60, 80]]));
    ///
    /// let short = NdArray::from(array![1_i64, 2, 3]);
    /// assert!(Context::eval_array_binary(BinaryOperator::Sum, &matrix, &short).is_err());
    /// ```
    pub fn eval_array_binary(op: BinaryOperator,
                             left: &NdArray,
                             right: &NdArray)
                             -> EvalResult<NdArray> {
        use BinaryOperator::{
            Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Power, Product, Quotient, Sum,
        };

        let reals = left.dtype() == DType::Float || right.dtype() == DType::Float;

        match op {
            Sum | Product | Power if !reals => {
                let f: fn(i64, i64) -> EvalResult<i64> = match op {
                    Sum => |a, b| a.checked_add(b).ok_or(RuntimeError::Overflow),
                    Product => |a, b| a.checked_mul(b).ok_or(RuntimeError::Overflow),
                    _ => int_power,
                };
                let (l, r) = (left.to_ints()?, right.to_ints()?);
                Ok(NdArray::Int(try_zip_with(&l, &r, |&a, &b| f(a, b))?))
            },
            Sum | Product | Quotient | Power => {
                let f: fn(f64, f64) -> f64 = match op {
                    Sum => |a, b| a + b,
                    Product => |a, b| a * b,
                    Quotient => |a, b| a / b,
                    _ => f64::powf,
                };
                let (l, r) = (left.to_floats(), right.to_floats());
                Ok(NdArray::Float(zip_with(&l, &r, |&a, &b| f(a, b))?))
            },
            Less | LessEqual | Equal | NotEqual | Greater | GreaterEqual => {
                if reals {
                    compare(op, &left.to_floats(), &right.to_floats())
                } else {
                    compare(op, &left.to_ints()?, &right.to_ints()?)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::value::core::Value;

    #[test]
    fn shapes_must_broadcast() {
        let left = Value::from(array![[1_i64, 2]]);
        let right = Value::from(array![[1_i64, 2, 3]]);
        assert_eq!(Context::eval_binary(BinaryOperator::Sum, &left, &right),
                   Err(RuntimeError::ShapeMismatch { left: vec![1, 2], right: vec![1, 3] }));
    }

    #[test]
    fn element_wise_division_follows_ieee() {
        let result = Context::eval_binary(BinaryOperator::Quotient,
                                          &Value::from(array![1_i64, -1, 0]),
                                          &Value::Integer(0)).unwrap();
        let Value::Array(array) = result else { panic!("expected an array") };
        let NdArray::Float(items) = array.as_ref() else { panic!("expected reals") };
        assert_eq!(items[[0]], f64::INFINITY);
        assert_eq!(items[[1]], f64::NEG_INFINITY);
        assert!(items[[2]].is_nan());
    }

    #[test]
    fn tuples_broadcast_against_arrays() {
        let result = Context::eval_binary(BinaryOperator::Sum,
                                          &Value::tuple([1, 2]),
                                          &Value::from(array![10_i64, 20])).unwrap();
        assert_eq!(result, Value::from(array![11_i64, 22]));
    }

    #[test]
    fn integer_elements_are_checked() {
        let big = NdArray::from(array![i64::MAX]);
        assert_eq!(Context::eval_array_binary(BinaryOperator::Sum, &big, &big),
                   Err(RuntimeError::Overflow));

        let base = NdArray::from(array![2_i64, 3]);
        let squares = Context::eval_array_binary(BinaryOperator::Power, &base, &NdArray::from(array![2_i64]));
        assert_eq!(squares.unwrap(), NdArray::from(array![4_i64, 9]));
        assert!(Context::eval_array_binary(BinaryOperator::Power, &base, &NdArray::from(array![-1_i64])).is_err());
    }

    #[test]
    fn booleans_count_as_integers() {
        let flags = NdArray::from(array![true, false]);
        assert_eq!(Context::eval_array_binary(BinaryOperator::Sum, &flags, &flags).unwrap(),
                   NdArray::from(array![2_i64, 0]));
        assert_eq!(Context::eval_array_binary(BinaryOperator::Equal,
                                              &flags,
                                              &NdArray::from(array![1.0, 1.0])).unwrap(),
                   NdArray::from(array![true, false]));
    }
}
