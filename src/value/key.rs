use std::{fmt::Display, sync::Arc};

use ordered_float::OrderedFloat;

use crate::{error::RuntimeError, util::num::f64_to_i64_truncated, value::core::Value};

/// Enum representing values allowed as mapping keys.
///
/// Keys that compare equal as values share one key: booleans and integral
/// reals are stored as integers, so `1`, `1.0` and `true` address the same
/// entry.
///
/// Keys are totally ordered (variant first, then value), which keeps the
/// iteration and display order of a `Value::Map` deterministic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    /// An integer such as `-4` or `42`, or an equal boolean or real.
    Integer(i64),
    /// A real with a fractional part, an infinity or NaN.
    Real(OrderedFloat<f64>),
    /// A string such as `'name'`.
    Str(Arc<str>),
    /// A tuple of keys such as `(1, 'a')`.
    Tuple(Vec<MapKey>),
}

impl MapKey {
    /// The key of a real number. Integral reals within the `i64` range share
    /// the key of the equal integer.
    #[allow(clippy::float_cmp)]
    fn of_real(r: f64) -> Self {
        if r.fract() == 0.0 {
            if let Ok(i) = f64_to_i64_truncated(r) {
                return Self::Integer(i);
            }
        }
        Self::Real(OrderedFloat(r))
    }
}

impl TryFrom<&Value> for MapKey {
    type Error = RuntimeError;

    fn try_from(v: &Value) -> Result<Self, Self::Error> {
        match v {
            Value::Bool(b) => Ok(Self::Integer(i64::from(*b))),
            Value::Integer(i) => Ok(Self::Integer(*i)),
            Value::Real(r) => Ok(Self::of_real(*r)),
            Value::Str(s) => Ok(Self::Str(Arc::clone(s))),
            Value::Tuple(items) => {
                Ok(Self::Tuple(items.iter().map(Self::try_from).collect::<Result<_, _>>()?))
            },
            _ => Err(RuntimeError::Unhashable { type_name: v.type_name() }),
        }
    }
}

impl From<MapKey> for Value {
    fn from(k: MapKey) -> Self {
        match k {
            MapKey::Integer(i) => Self::Integer(i),
            MapKey::Real(r) => Self::Real(r.into_inner()),
            MapKey::Str(s) => Self::Str(s),
            MapKey::Tuple(items) => {
                Self::Tuple(Arc::new(items.into_iter().map(Self::from).collect()))
            },
        }
    }
}

impl From<bool> for MapKey {
    fn from(b: bool) -> Self {
        Self::Integer(i64::from(b))
    }
}

impl From<i32> for MapKey {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for MapKey {
    fn from(r: f64) -> Self {
        Self::of_real(r)
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        Self::Str(Arc::from(s))
    }
}

impl Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: Value = self.clone().into();
        write!(f, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutable_containers_are_unhashable() {
        let list = Value::list([1, 2]);
        assert_eq!(MapKey::try_from(&list),
                   Err(RuntimeError::Unhashable { type_name: "list" }));
    }

    #[test]
    fn tuples_of_scalars_are_keys() {
        let tuple = Value::tuple([Value::from(1), Value::from("a")]);
        let key = MapKey::try_from(&tuple).unwrap();
        assert_eq!(key, MapKey::Tuple(vec![MapKey::Integer(1), MapKey::from("a")]));
        assert_eq!(Value::from(key), tuple);
    }

    #[test]
    fn keys_order_by_variant_then_value() {
        let mut keys = vec![MapKey::from("b"), MapKey::from(2.5), MapKey::from(2), MapKey::from(-1)];
        keys.sort();
        assert_eq!(keys,
                   vec![MapKey::from(-1), MapKey::from(2), MapKey::from(2.5), MapKey::from("b")]);
    }

    #[test]
    fn equal_numbers_share_a_key() {
        let one = MapKey::from(1);
        assert_eq!(MapKey::try_from(&Value::Real(1.0)).unwrap(), one);
        assert_eq!(MapKey::try_from(&Value::Bool(true)).unwrap(), one);
        assert_eq!(MapKey::try_from(&Value::Real(-0.0)).unwrap(), MapKey::from(0));
        assert_eq!(MapKey::from(1.5), MapKey::Real(OrderedFloat(1.5)));
        assert_eq!(MapKey::from(1e300), MapKey::Real(OrderedFloat(1e300)));
        assert_eq!(MapKey::try_from(&Value::tuple([Value::Real(2.0), Value::Bool(false)])).unwrap(),
                   MapKey::Tuple(vec![MapKey::from(2), MapKey::from(0)]));
    }
}
