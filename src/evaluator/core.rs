use std::{collections::HashMap, sync::Arc};

use crate::{
    backend::{
        core::{Backend, BackendKind},
        selection,
    },
    error::RuntimeError,
    node::core::{Node, NodeKind},
    value::core::Value,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Keyword arguments of a call.
///
/// Built-in nodes ignore them; they reach custom evaluables unchanged.
pub type Kwargs = HashMap<String, Value>;

/// Stores the evaluation context.
///
/// A context holds the backend that backend-dependent nodes (`not`, the
/// elementary functions, reductions, dtype conversion, clipping and range
/// tests) delegate to. It is read-only and cheap to copy, so one context can
/// evaluate any number of trees, from any number of threads.
///
/// ## Usage
///
/// [`Context::global`] uses the process-wide backend, which is resolved once
/// on first use. [`Context::new`] pins a specific backend, which is how the
/// two backends can be compared side by side.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    backend: &'static dyn Backend,
}

impl Context {
    /// Creates a context that evaluates with the given backend.
    ///
    /// Asking for the vectorized backend in a build without the `vectorized`
    /// feature yields the scalar backend.
    #[must_use]
    pub fn new(kind: BackendKind) -> Self {
        Self { backend: selection::for_kind(kind) }
    }

    /// Creates a context that evaluates with the process-wide backend.
    #[must_use]
    pub fn global() -> Self {
        Self::new(selection::active())
    }

    /// The backend this context evaluates with.
    #[must_use]
    pub fn backend(&self) -> &'static dyn Backend {
        self.backend
    }

    /// Evaluates a node with concrete arguments and returns the result.
    ///
    /// This is the main entry point for evaluation. The evaluator dispatches
    /// on the node kind; every child is evaluated with the same `args` and
    /// `kwargs`, except the outer node of a composition, which receives the
    /// inner result as its only argument.
    ///
    /// # Parameters
    /// - `node`: Root of the tree to evaluate.
    /// - `args`: Positional call arguments.
    /// - `kwargs`: Keyword call arguments.
    ///
    /// # Returns
    /// The value the tree computes for these arguments.
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
    /// let tree = (&x * &x + 1).sqrt();
    ///
    /// let result = ctx.eval(&tree, &[Value::Integer(3)], &Kwargs::new()).unwrap();
    /// assert!((result.as_real().unwrap() - 10f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn eval(&self, node: &Node, args: &[Value], kwargs: &Kwargs) -> EvalResult<Value> {
        match node.kind() {
            NodeKind::Constant(value) => Ok(value.clone()),
            NodeKind::Identity => Ok(Self::eval_identity(args)),
            NodeKind::Custom(evaluable) => evaluable.evaluate(self, args, kwargs),
            NodeKind::Binary { op, left, right } => {
                let left = self.eval(left, args, kwargs)?;
                let right = self.eval(right, args, kwargs)?;
                Self::eval_binary(*op, &left, &right)
            },
            NodeKind::InBetween { value, low, high } => {
                self.eval_in_between(value, low, high, args, kwargs)
            },
            NodeKind::Clip { low, high, leaf } => self.eval_clip(low, high, leaf, args, kwargs),
            NodeKind::Apply(apply) => self.eval_apply(apply, single_argument(args)?),
            NodeKind::Convert(conversion) => {
                Self::eval_conversion(*conversion, single_argument(args)?)
            },
            NodeKind::Composed { first, then } => {
                let inner = self.eval(first, args, kwargs)?;
                self.eval(then, std::slice::from_ref(&inner), &Kwargs::new())
            },
            NodeKind::List(items) => Ok(Value::List(Arc::new(self.eval_all(items, args, kwargs)?))),
            NodeKind::Tuple(items) => {
                Ok(Value::Tuple(Arc::new(self.eval_all(items, args, kwargs)?)))
            },
            NodeKind::Dict { keys, values } => self.eval_dict(keys, values, args, kwargs),
        }
    }

    /// Returns the call arguments: the single argument itself, or a tuple of
    /// all arguments when there are zero or several.
    ///
    /// # Example
    /// ```
    /// use fframe::{evaluator::core::Context, value::core::Value};
    ///
    /// assert_eq!(Context::eval_identity(&[Value::Integer(5)]), Value::Integer(5));
    /// assert_eq!(Context::eval_identity(&[Value::Integer(5), Value::Integer(6)]),
    ///            Value::tuple([5, 6]));
    /// ```
    #[must_use]
    pub fn eval_identity(args: &[Value]) -> Value {
        match args {
            [single] => single.clone(),
            _ => Value::Tuple(Arc::new(args.to_vec())),
        }
    }

    /// Evaluates every node with the same arguments, in order.
    pub fn eval_all(&self, nodes: &[Node], args: &[Value], kwargs: &Kwargs) -> EvalResult<Vec<Value>> {
        nodes.iter().map(|node| self.eval(node, args, kwargs)).collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::global()
    }
}

/// Returns the only positional argument of an apply-style or conversion node.
fn single_argument(args: &[Value]) -> EvalResult<&Value> {
    match args {
        [single] => Ok(single),
        _ => Err(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                       found:    args.len(), }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ops;

    #[test]
    fn apply_nodes_take_exactly_one_argument() {
        let ctx = Context::new(BackendKind::Scalar);
        let err = ctx.eval(&ops::neg(), &[Value::Integer(1), Value::Integer(2)], &Kwargs::new());
        assert_eq!(err,
                   Err(RuntimeError::ArgumentCountMismatch { expected: 1,
                                                             found:    2, }));
        assert!(ctx.eval(&ops::int(), &[], &Kwargs::new()).is_err());
    }

    #[test]
    fn composition_drops_keyword_arguments() {
        let seen = Node::from_fn(|_, kwargs: &Kwargs| Ok(Value::Bool(kwargs.is_empty())));
        let kwargs = Kwargs::from([("k".to_string(), Value::Integer(1))]);

        assert_eq!(seen.call_with(&[], &kwargs).unwrap(), Value::Bool(false));
        assert_eq!(Node::constant(0).compose(&seen).call_with(&[], &kwargs).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn children_see_the_same_arguments() {
        let x = Node::identity();
        let tree = crate::node::lift::lift(vec![&x, &x]);
        assert_eq!(tree.call(&[Value::Integer(1), Value::Integer(2)]).unwrap(),
                   Value::list([Value::tuple([1, 2]), Value::tuple([1, 2])]));
    }
}
