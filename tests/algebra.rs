use fframe::{
    Literal, Node, Value,
    error::RuntimeError,
    lift,
    node::ops::{constant, identity, sqrt},
    to_node,
    value::{dtype::DType, index::Index},
};

fn eval(node: &Node) -> Value {
    node.call(&[]).unwrap_or_else(|e| panic!("{node} failed: {e}"))
}

#[test]
fn conversion_is_idempotent() {
    let a = constant(3);
    assert!(to_node(&a).ptr_eq(&a));
    assert!(to_node(to_node(&a)).ptr_eq(&a));
    assert!(to_node(a.clone()).ptr_eq(&a));
}

#[test]
fn constants_ignore_arguments() {
    let c = constant("fixed");
    for args in [vec![], vec![Value::Integer(1)], vec![Value::Integer(1), Value::Real(2.0)]] {
        assert_eq!(c.call(&args).unwrap(), Value::from("fixed"));
    }
}

#[test]
fn identity_returns_its_arguments() {
    let x = identity();
    assert_eq!(x.call(&[Value::Integer(5)]).unwrap(), Value::Integer(5));
    assert_eq!(x.call(&[Value::Integer(5), Value::Integer(6)]).unwrap(),
               Value::tuple([5, 6]));
    assert_eq!(x.call(&[]).unwrap(), Value::tuple(Vec::<Value>::new()));
}

#[test]
fn arithmetic_composes() {
    let a = constant(3);
    let b = constant(4);
    assert_eq!(eval(&(&a + &b)), Value::Integer(7));
    assert_eq!(eval(&(&a * &b)), Value::Integer(12));
    assert_eq!(eval(&a.pow(&b)), Value::Integer(81));
    assert_eq!(eval(&(&a - &b)), Value::Integer(-1));
    assert_eq!(eval(&(&a / &b)), Value::Real(0.75));
}

#[test]
fn pipe_applies_the_right_side_last() {
    assert_eq!(eval(&constant(4).compose(sqrt())), Value::Real(2.0));
    assert_eq!(eval(&(constant(4) | sqrt())), Value::Real(2.0));
}

#[test]
fn double_negation_round_trips() {
    let mut values = vec![Value::Integer(3), Value::Real(-2.5)];
    #[cfg(feature = "vectorized")]
    values.push(Value::from(ndarray::array![1_i64, -2]));

    for value in values {
        let a = constant(value.clone());
        assert_eq!(eval(&-(-&a)), eval(&a));
    }
}

#[test]
fn comparisons_build_nodes() {
    let x = identity();
    let tree = x.less(2);
    assert_eq!(tree.call(&[Value::Integer(1)]).unwrap(), Value::Bool(true));
    assert_eq!(tree.call(&[Value::Integer(2)]).unwrap(), Value::Bool(false));
    assert_eq!(x.greater_equal(2).call(&[Value::Integer(2)]).unwrap(), Value::Bool(true));
    assert_eq!(x.equal(1.0).call(&[Value::Integer(1)]).unwrap(), Value::Bool(true));
    assert_eq!(x.not_equal("a").call(&[Value::from("a")]).unwrap(), Value::Bool(false));
}

#[test]
fn conversions_apply_to_the_result() {
    let x = identity();
    assert_eq!(x.to_int().call(&[Value::Real(3.9)]).unwrap(), Value::Integer(3));
    assert_eq!(x.to_float().call(&[Value::from("2.5")]).unwrap(), Value::Real(2.5));
    assert_eq!(x.to_bool().call(&[Value::from("")]).unwrap(), Value::Bool(false));
    assert_eq!((!x.to_bool()).call(&[Value::Integer(0)]).unwrap(), Value::Bool(true));
}

#[cfg(feature = "vectorized")]
#[test]
fn astype_converts_arrays() {
    let x = identity();
    assert_eq!(x.astype(DType::Int).call(&[Value::from(ndarray::array![1.5, 2.5])]).unwrap(),
               Value::from(ndarray::array![1_i64, 2]));
}

#[test]
fn indexing_and_attributes() {
    let x = identity();
    assert_eq!(x.at("k").call(&[Value::map([("k", 1)])]).unwrap(), Value::Integer(1));
    assert_eq!(x.at(Index::slice(Some(-2), None)).call(&[Value::from("hello")]).unwrap(),
               Value::from("lo"));
}

#[test]
fn failures_pass_through_unwrapped() {
    let direct = Value::Integer(5).get_item(&Index::from(0)).unwrap_err();
    let deferred = constant(5).at(0).call(&[]).unwrap_err();
    assert_eq!(deferred, direct);
    assert_eq!(deferred, RuntimeError::NotSubscriptable { type_name: "int" });

    let nested = ((constant(1) / 0) + 1).sqrt();
    assert_eq!(nested.call(&[]).unwrap_err(), RuntimeError::DivisionByZero);
}

#[test]
fn custom_evaluables_join_the_algebra() {
    let count = Node::from_fn(|args: &[Value], _| Ok(Value::Integer(args.len() as i64)));
    let tree = (&count * 10).less(25);
    assert_eq!(tree.call(&[Value::Integer(0), Value::Integer(0)]).unwrap(), Value::Bool(true));
    assert_eq!(tree.call(&vec![Value::Integer(0); 3]).unwrap(), Value::Bool(false));

    let failing = Node::from_fn(|_, _| Err(RuntimeError::Other { message: "boom".to_string() }));
    assert_eq!((failing + 1).call(&[]).unwrap_err(),
               RuntimeError::Other { message: "boom".to_string() });
}

#[test]
fn structural_equality_is_separate_from_identity() {
    let x = identity();
    let a = (&x + 1).clip(0, 10);
    let b = (identity() + 1).clip(0, 10);
    assert!(!a.ptr_eq(&b));
    assert!(a.structural_eq(&b));
    assert!(!a.structural_eq(&(&x + 1).clip(0, 11)));
    assert_eq!(a.size(), 6);
}

#[test]
fn trees_are_shared_across_threads() {
    let x = identity();
    let tree = (x.at(0) * x.at(1)).sqrt();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=8).map(|i| {
                                          let tree = &tree;
                                          scope.spawn(move || {
                                                   tree.call(&[Value::list([i, i])]).unwrap()
                                               })
                                      })
                                      .collect();
        for (i, handle) in (1..=8).zip(handles) {
            assert_eq!(handle.join().unwrap(), Value::Real(f64::from(i)));
        }
    });
}

#[cfg(feature = "vectorized")]
#[test]
fn arrays_index_by_position_paths() {
    let x = identity();
    let matrix = Value::from(ndarray::array![[1_i64, 2, 3], [4, 5, 6]]);
    assert_eq!(x.at(Value::tuple([1, 2])).call(&[matrix.clone()]).unwrap(), Value::Integer(6));
    assert_eq!(x.at(-1).call(&[matrix.clone()]).unwrap(), Value::from(ndarray::array![4_i64, 5, 6]));
    assert_eq!(x.attr("shape").call(&[matrix]).unwrap(), Value::tuple([2, 3]));
}

#[test]
fn numerically_equal_keys_merge() {
    let tree = lift(Literal::map([(Literal::from(1), Literal::from("a")),
                                  (Literal::from(1.0), Literal::from("b"))]));
    assert_eq!(eval(&tree), Value::map([(1, "b")]));
    assert_eq!(identity().at(1.0).call(&[Value::map([(1, "a")])]).unwrap(), Value::from("a"));
    assert_eq!(identity().at(true).call(&[Value::map([(1, "a")])]).unwrap(), Value::from("a"));
}

#[test]
fn repeating_beyond_memory_overflows() {
    assert_eq!((constant("ab") * i64::MAX).call(&[]), Err(RuntimeError::Overflow));
    assert_eq!((constant(Value::list([1, 2])) * i64::MAX).call(&[]), Err(RuntimeError::Overflow));
}
