use std::{collections::BTreeMap, sync::Arc};

use crate::{
    evaluator::core::{Context, EvalResult, Kwargs},
    node::{core::Node, operator::BinaryOperator},
    value::{core::Value, key::MapKey},
};

impl Context {
    /// Evaluates a mapping node.
    ///
    /// All keys are evaluated first, then all values; the results are paired
    /// by position. When two keys evaluate equal, the later pair wins.
    ///
    /// # Errors
    /// Any failure of a key or value node, or `Unhashable` if a key evaluates
    /// to a list, array or mapping.
    pub fn eval_dict(&self,
                     keys: &[Node],
                     values: &[Node],
                     args: &[Value],
                     kwargs: &Kwargs)
                     -> EvalResult<Value> {
        let keys = self.eval_all(keys, args, kwargs)?;
        let values = self.eval_all(values, args, kwargs)?;

        let mut map = BTreeMap::new();
        for (key, value) in keys.iter().zip(values) {
            map.insert(MapKey::try_from(key)?, value);
        }
        Ok(Value::Map(Arc::new(map)))
    }

    /// Evaluates `low <= value < high`.
    ///
    /// The three operands are evaluated exactly once, in the order low,
    /// high, value. Both comparisons are always computed and then combined with
    /// the backend's logical and, so array operands give an array of
    /// booleans on the vectorized backend.
    ///
    /// # Example
    /// ```
    /// use fframe::{
    ///     backend::core::BackendKind,
    ///     evaluator::core::{Context, Kwargs},
    ///     node::core::Node,
    ///     value::core::Value,
    /// };
    ///
    /// let ctx = Context::new(BackendKind::Scalar);
    /// let x = Node::identity();
    /// let tree = x.in_between(0, 1);
    ///
    /// let inside = ctx.eval(&tree, &[Value::Real(0.0)], &Kwargs::new()).unwrap();
    /// let outside = ctx.eval(&tree, &[Value::Real(1.0)], &Kwargs::new()).unwrap();
    /// assert_eq!((inside, outside), (Value::Bool(true), Value::Bool(false)));
    /// ```
    pub fn eval_in_between(&self,
                           value: &Node,
                           low: &Node,
                           high: &Node,
                           args: &[Value],
                           kwargs: &Kwargs)
                           -> EvalResult<Value> {
        let low = self.eval(low, args, kwargs)?;
        let high = self.eval(high, args, kwargs)?;
        let value = self.eval(value, args, kwargs)?;

        let above = Self::eval_binary(BinaryOperator::LessEqual, &low, &value)?;
        let below = Self::eval_binary(BinaryOperator::Less, &value, &high)?;
        self.backend().logical_and(&above, &below)
    }

    /// Evaluates a clip node: `low`, `high` and `leaf` are evaluated in that
    /// order and the backend clips `leaf` into `[low, high]`.
    pub fn eval_clip(&self,
                     low: &Node,
                     high: &Node,
                     leaf: &Node,
                     args: &[Value],
                     kwargs: &Kwargs)
                     -> EvalResult<Value> {
        let low = self.eval(low, args, kwargs)?;
        let high = self.eval(high, args, kwargs)?;
        let leaf = self.eval(leaf, args, kwargs)?;
        self.backend().clip(&leaf, &low, &high)
    }
}
