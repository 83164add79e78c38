use crate::{
    evaluator::core::{Context, EvalResult},
    node::operator::Apply,
    value::core::Value,
};

impl Context {
    /// Evaluates an apply-style operation on the single runtime input.
    ///
    /// Negation, indexing and attribute access are native operations on the
    /// input. Logical negation, the elementary functions, reductions and
    /// dtype conversion go to the context's backend together with the
    /// parameters stored on the node.
    ///
    /// # Parameters
    /// - `apply`: The operation and its stored parameters.
    /// - `input`: The runtime input.
    ///
    /// # Returns
    /// The result of the operation.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     backend::core::BackendKind,
    ///     evaluator::core::Context,
    ///     node::operator::{Apply, Elementary, ElementaryParams},
    ///     value::core::Value,
    /// };
    ///
    /// let ctx = Context::new(BackendKind::Scalar);
    /// let sqrt = Apply::Elementary(Elementary::Sqrt, ElementaryParams::default());
    ///
    /// assert_eq!(ctx.eval_apply(&sqrt, &Value::Integer(9)).unwrap(), Value::Real(3.0));
    /// assert!(ctx.eval_apply(&sqrt, &Value::Integer(-9)).is_err());
    /// ```
    pub fn eval_apply(&self, apply: &Apply, input: &Value) -> EvalResult<Value> {
        match apply {
            Apply::Neg => Self::eval_neg(input),
            Apply::Not => self.backend().logical_not(input),
            Apply::Elementary(func, params) => self.backend().elementary(*func, input, params),
            Apply::SumCall(params) => self.backend().sum(input, params),
            Apply::Indexing(index) => input.get_item(index),
            Apply::Attribute(name) => input.attribute(name),
            Apply::AsType(dtype) => self.backend().astype(input, *dtype),
        }
    }
}
