#[cfg(feature = "vectorized")]
use crate::value::array::NdArray;
use crate::{
    evaluator::core::{Context, EvalResult},
    node::operator::BinaryOperator,
    value::core::Value,
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. If either operand is an array the
    /// operation is element-wise: both operands are converted to arrays and
    /// handed to `eval_array_binary`. Otherwise arithmetic goes to
    /// `eval_scalar_op`, power to `eval_pow` and the six comparisons to
    /// `eval_comparison`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     evaluator::core::Context,
    ///     node::operator::BinaryOperator,
    ///     value::core::Value,
    /// };
    ///
    /// let result = Context::eval_binary(BinaryOperator::Sum, &Value::Integer(3), &Value::Integer(4));
    /// assert_eq!(result.unwrap(), Value::Integer(7));
    ///
    /// let result = Context::eval_binary(BinaryOperator::Less, &Value::Real(1.5), &Value::Integer(2));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual, Power, Product, Quotient, Sum,
        };

        #[cfg(feature = "vectorized")]
        if left.is_array() || right.is_array() {
            let (left, right) = (NdArray::from_value(left)?, NdArray::from_value(right)?);
            return Ok(Self::eval_array_binary(op, &left, &right)?.into_value());
        }

        match op {
            Sum | Product | Quotient => Self::eval_scalar_op(op, left, right),
            Power => Self::eval_pow(left, right),
            Less | LessEqual | Equal | NotEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
        }
    }
}
