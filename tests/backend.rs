use approx::assert_relative_eq;
use fframe::{
    Context, Kwargs, Node, Value,
    backend::core::BackendKind,
    error::RuntimeError,
    node::{
        operator::{Elementary, SumParams},
        ops::{constant, identity},
    },
};
use rstest::rstest;

fn eval_in(kind: BackendKind, node: &Node, args: &[Value]) -> Result<Value, RuntimeError> {
    Context::new(kind).eval(node, args, &Kwargs::new())
}

fn real(value: &Value) -> f64 {
    value.as_real().unwrap_or_else(|e| panic!("expected a number, got {value}: {e}"))
}

#[cfg(feature = "vectorized")]
#[rstest]
#[case(Elementary::Sin, 0.5)]
#[case(Elementary::Sin, -3.0)]
#[case(Elementary::Cos, 0.5)]
#[case(Elementary::Cos, 100.0)]
#[case(Elementary::Exp, 1.0)]
#[case(Elementary::Exp, -20.0)]
#[case(Elementary::Sqrt, 2.0)]
#[case(Elementary::Sqrt, 0.0)]
fn elementary_functions_agree_across_backends(#[case] func: Elementary, #[case] x: f64) {
    let tree = constant(x).elementary(func, Default::default());
    let vectorized = eval_in(BackendKind::Vectorized, &tree, &[]).unwrap();
    let scalar = eval_in(BackendKind::Scalar, &tree, &[]).unwrap();
    assert_relative_eq!(real(&vectorized), real(&scalar), max_relative = 1e-12);
    assert_relative_eq!(real(&scalar), func.apply(x), max_relative = 1e-12);
}

#[rstest]
#[case(BackendKind::Scalar)]
#[case(BackendKind::Vectorized)]
fn clip_and_range_on_scalars(#[case] kind: BackendKind) {
    let x = identity();
    let clipped = x.clip(0, 10);
    let inside = x.in_between(0, 10);

    for (input, expected_clip, expected_inside) in [(-5, 0, false), (0, 0, true), (15, 10, false)] {
        let args = [Value::Integer(input)];
        assert_eq!(eval_in(kind, &clipped, &args).unwrap(), Value::Integer(expected_clip));
        assert_eq!(eval_in(kind, &inside, &args).unwrap(), Value::Bool(expected_inside));
    }
}

#[rstest]
#[case(BackendKind::Scalar)]
#[case(BackendKind::Vectorized)]
fn wave_identity_holds(#[case] kind: BackendKind) {
    let x = identity();
    let wave = x.sin().pow(2) + x.cos().pow(2);
    for input in [-2.0, 0.0, 0.3, 7.5] {
        let result = eval_in(kind, &wave, &[Value::Real(input)]).unwrap();
        assert_relative_eq!(real(&result), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn scalar_backend_reports_domain_errors() {
    let tree = identity().sqrt();
    assert_eq!(eval_in(BackendKind::Scalar, &tree, &[Value::Integer(-4)]),
               Err(RuntimeError::MathDomain { function: "sqrt" }));
}

#[test]
fn scalar_sum_ignores_parameters() {
    let tree = identity().sum(SumParams::along(3));
    assert_eq!(eval_in(BackendKind::Scalar, &tree, &[Value::list([1.5, 2.5])]).unwrap(),
               Value::Real(4.0));
}

#[cfg(feature = "vectorized")]
mod vectorized {
    use fframe::{node::operator::ElementaryParams, value::dtype::DType};
    use ndarray::array;

    use super::*;

    #[test]
    fn operations_map_over_arrays() {
        let x = identity();
        let values = [Value::from(array![0.0, 1.0, 4.0])];

        let roots = eval_in(BackendKind::Vectorized, &x.sqrt(), &values).unwrap();
        assert_eq!(roots, Value::from(array![0.0, 1.0, 2.0]));

        let inside = eval_in(BackendKind::Vectorized, &x.in_between(1, 4), &values).unwrap();
        assert_eq!(inside, Value::from(array![false, true, false]));

        let clipped = eval_in(BackendKind::Vectorized, &x.clip(0.5, 2), &values).unwrap();
        assert_eq!(clipped, Value::from(array![0.5, 1.0, 2.0]));

        let negated = eval_in(BackendKind::Vectorized, &!x.greater(0.5), &values).unwrap();
        assert_eq!(negated, Value::from(array![true, false, false]));
    }

    #[test]
    fn reductions_honour_axis_and_dtype() {
        let x = identity();
        let matrix = [Value::from(array![[1.5, 2.0], [3.0, 4.0]])];

        let columns = x.sum(SumParams::along(0).with_dtype(DType::Int));
        assert_eq!(eval_in(BackendKind::Vectorized, &columns, &matrix).unwrap(),
                   Value::from(array![4_i64, 6]));

        let total = x.sum(SumParams::default());
        assert_eq!(eval_in(BackendKind::Vectorized, &total, &matrix).unwrap(), Value::Real(10.5));

        assert_eq!(eval_in(BackendKind::Vectorized, &x.sum(SumParams::along(2)), &matrix),
                   Err(RuntimeError::AxisOutOfBounds { axis: 2, ndim: 2 }));
    }

    #[test]
    fn elementary_dtype_converts_the_result() {
        let params = ElementaryParams { dtype: Some(DType::Int) };
        let tree = identity().elementary(Elementary::Sqrt, params);
        assert_eq!(eval_in(BackendKind::Vectorized, &tree, &[Value::list([4, 10])]).unwrap(),
                   Value::from(array![2_i64, 3]));
    }

    #[test]
    fn backends_differ_only_where_documented() {
        let tree = identity().sqrt();
        let nan = eval_in(BackendKind::Vectorized, &tree, &[Value::Real(-1.0)]).unwrap();
        assert!(real(&nan).is_nan());
        assert!(eval_in(BackendKind::Scalar, &tree, &[Value::Real(-1.0)]).is_err());
    }
}
