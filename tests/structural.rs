use fframe::{
    Literal, Node, Value,
    error::RuntimeError,
    lift,
    node::ops::{clip, constant, identity, in_between},
};

#[test]
fn lifted_list_evaluates_children_in_order() {
    let a = constant(3);
    let b = constant(4);
    assert_eq!(lift(vec![&a, &b]).call(&[]).unwrap(), Value::list([3, 4]));
}

#[test]
fn lifted_map_pairs_keys_and_values() {
    let a = constant(3);
    let b = constant(4);
    assert_eq!(lift(Literal::map([(&a, &b)])).call(&[]).unwrap(), Value::map([(3, 4)]));
}

#[test]
fn nested_literals_unfold_into_one_tree() {
    let x = identity();
    let tree = lift(Literal::map([(Literal::from("sum"), Literal::from(x.at(0) + x.at(1))),
                                  (Literal::from("pair"), Literal::from((x.at(1), x.at(0)))),
                                  (Literal::from("all"),
                                   Literal::from(vec![Literal::from(&x), Literal::from(0)]))]));

    let args = [Value::Integer(1), Value::Integer(2)];
    let expected = Value::map([("sum", Value::Integer(3)),
                               ("pair", Value::tuple([2, 1])),
                               ("all",
                                Value::list([Value::tuple([1, 2]), Value::Integer(0)]))]);
    assert_eq!(tree.call(&args).unwrap(), expected);
}

#[test]
fn map_keys_must_be_hashable() {
    let tree = lift(Literal::map([(vec![1, 2], 0)]));
    assert_eq!(tree.call(&[]).unwrap_err(), RuntimeError::Unhashable { type_name: "list" });
}

#[test]
fn plain_values_lift_to_constants() {
    let tree = lift(5);
    assert_eq!(tree.call(&[Value::Integer(1)]).unwrap(), Value::Integer(5));
    assert_eq!(tree.size(), 1);
}

#[test]
fn clip_boundaries() {
    assert_eq!(clip(0, 10, constant(-5)).call(&[]).unwrap(), Value::Integer(0));
    assert_eq!(clip(0, 10, constant(15)).call(&[]).unwrap(), Value::Integer(10));
    assert_eq!(clip(0, 10, constant(5)).call(&[]).unwrap(), Value::Integer(5));
}

#[test]
fn in_between_includes_low_and_excludes_high() {
    assert_eq!(in_between(constant(5), 5, 10).call(&[]).unwrap(), Value::Bool(true));
    assert_eq!(in_between(constant(10), 5, 10).call(&[]).unwrap(), Value::Bool(false));
    assert_eq!(in_between(constant(4.999), 5, 10).call(&[]).unwrap(), Value::Bool(false));
}

#[test]
fn in_between_evaluates_each_operand_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static CALLS: AtomicUsize = AtomicUsize::new(0);
    let counted = Node::from_fn(|_, _| {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Integer(7))
    });

    let tree = counted.in_between(0, 5);
    assert_eq!(tree.call(&[]).unwrap(), Value::Bool(false));
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn in_between_evaluates_bounds_before_value() {
    use std::sync::Mutex;

    static ORDER: Mutex<Vec<&str>> = Mutex::new(Vec::new());
    let recorded = |label: &'static str, n: i64| {
        Node::from_fn(move |_, _| {
            ORDER.lock().unwrap().push(label);
            Ok(Value::Integer(n))
        })
    };

    let tree = in_between(recorded("value", 3), recorded("low", 1), recorded("high", 5));
    assert_eq!(tree.call(&[]).unwrap(), Value::Bool(true));
    assert_eq!(*ORDER.lock().unwrap(), ["low", "high", "value"]);
}
