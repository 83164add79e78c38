use crate::{
    error::RuntimeError,
    evaluator::core::{Context, EvalResult},
    util::num::i64_to_u32_checked,
    value::core::{Number, Value},
};

fn unsupported(base: &Value, exponent: &Value) -> RuntimeError {
    RuntimeError::UnsupportedOperands { op:    "**",
                                        left:  base.type_name(),
                                        right: exponent.type_name(), }
}

/// Integer power with a non-negative exponent, checked for overflow.
pub(crate) fn checked_int_pow(base: i64, exponent: i64) -> EvalResult<i64> {
    match i64_to_u32_checked(exponent) {
        Ok(e) => base.checked_pow(e).ok_or(RuntimeError::Overflow),
        Err(err) => match base {
            0 | 1 => Ok(base),
            -1 => Ok(if exponent % 2 == 0 { 1 } else { -1 }),
            _ => Err(err),
        },
    }
}

impl Context {
    /// Evaluates an exponentiation operation on scalars.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses
    /// checked arithmetic. Negative integer exponents and real operands are
    /// computed in floating-point form.
    ///
    /// # Parameters
    /// - `base`: The base value.
    /// - `exponent`: The exponent value.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result of `base ** exponent`.
    ///
    /// # Errors
    /// - `DivisionByZero` for zero raised to a negative power.
    /// - `Overflow` if the result is too large.
    /// - `MathDomain` for a negative base with a fractional exponent.
    ///
    /// # Example
    /// ```
    /// use fframe::{evaluator::core::Context, value::core::Value};
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(10)).unwrap();
    /// assert_eq!(result, Value::Integer(1024));
    ///
    /// let result = Context::eval_pow(&Value::Integer(2), &Value::Integer(-1)).unwrap();
    /// assert_eq!(result, Value::Real(0.5));
    ///
    /// assert!(Context::eval_pow(&Value::Integer(0), &Value::Integer(-1)).is_err());
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value) -> EvalResult<Value> {
        match (base.as_number(), exponent.as_number()) {
            (Some(Number::Int(b)), Some(Number::Int(e))) if e >= 0 => checked_int_pow(b, e).map(Value::Integer),
            (Some(b), Some(e)) => {
                let (b, e) = (b.as_f64(), e.as_f64());
                if b == 0.0 && e < 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }

                let result = b.powf(e);
                if result.is_infinite() && b.is_finite() && e.is_finite() {
                    return Err(RuntimeError::Overflow);
                }
                if result.is_nan() && !b.is_nan() && !e.is_nan() {
                    return Err(RuntimeError::MathDomain { function: "pow" });
                }
                Ok(Value::Real(result))
            },
            _ => Err(unsupported(base, exponent)),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_bases_accept_huge_exponents() {
        let huge = Value::Integer(i64::MAX);
        assert_eq!(Context::eval_pow(&Value::Integer(1), &huge).unwrap(), Value::Integer(1));
        assert_eq!(Context::eval_pow(&Value::Integer(-1), &huge).unwrap(), Value::Integer(-1));
        assert_eq!(Context::eval_pow(&Value::Integer(2), &huge), Err(RuntimeError::Overflow));
    }

    #[test]
    fn negative_base_with_fraction_is_out_of_domain() {
        assert_eq!(Context::eval_pow(&Value::Real(-8.0), &Value::Real(0.5)),
                   Err(RuntimeError::MathDomain { function: "pow" }));
    }

    #[test]
    fn strings_have_no_power() {
        assert_eq!(Context::eval_pow(&Value::from("a"), &Value::Integer(2)),
                   Err(RuntimeError::UnsupportedOperands { op:    "**",
                                                           left:  "str",
                                                           right: "int", }));
    }
}
