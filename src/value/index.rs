use std::{fmt::Display, sync::Arc};

use crate::{
    error::RuntimeError,
    evaluator::core::EvalResult,
    util::num::{normalize_index, slice_bounds},
    value::{core::Value, key::MapKey},
};

/// The key an indexing node applies to its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Index {
    /// A single key: an integer position for sequences and arrays, a tuple of
    /// positions for nested arrays, or any hashable value for mappings.
    Key(Value),
    /// A half-open range of positions. Missing bounds default to the start
    /// and end of the sequence; negative bounds count from the end.
    Slice {
        /// First position included in the slice.
        start: Option<i64>,
        /// First position excluded from the slice.
        stop:  Option<i64>,
    },
}

impl Index {
    /// Builds a slice index.
    #[must_use]
    pub const fn slice(start: Option<i64>, stop: Option<i64>) -> Self {
        Self::Slice { start, stop }
    }
}

macro_rules! index_from_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Index {
                fn from(key: $ty) -> Self {
                    Self::Key(key.into())
                }
            }
        )*
    };
}

index_from_key!(Value, i32, i64, f64, bool, &str, String);

impl Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = |b: &Option<i64>| b.map(|b| b.to_string()).unwrap_or_default();
        match self {
            Self::Key(key) => write!(f, "[{key}]"),
            Self::Slice { start, stop } => write!(f, "[{}:{}]", bound(start), bound(stop)),
        }
    }
}

/// Resolves a sequence key to a position.
fn position(key: &Value, len: usize) -> EvalResult<usize> {
    match key {
        Value::Integer(i) => normalize_index(*i, len),
        Value::Bool(b) => normalize_index(i64::from(*b), len),
        _ => Err(RuntimeError::TypeError { details: format!("Sequence indices must be integers, not '{}'",
                                                            key.type_name()) }),
    }
}

impl Value {
    /// Subscripts the value.
    ///
    /// - Lists, tuples and strings accept an integer position or a slice.
    /// - Arrays additionally accept a tuple of positions, one per nesting
    ///   level.
    /// - Mappings accept any hashable key.
    ///
    /// # Errors
    /// `IndexOutOfBounds`, `KeyNotFound`, `Unhashable` or `NotSubscriptable`,
    /// depending on the value and key.
    ///
    /// # Example
    /// ```
    /// use fframe::value::{core::Value, index::Index};
    ///
    /// let list = Value::list([10, 20, 30]);
    /// assert_eq!(list.get_item(&Index::from(-1)).unwrap(), Value::Integer(30));
    /// assert_eq!(list.get_item(&Index::slice(Some(1), None)).unwrap(),
    ///            Value::list([20, 30]));
    ///
    /// let table = Value::map([(1, "one")]);
    /// assert_eq!(table.get_item(&Index::from(1.0)).unwrap(), Value::from("one"));
    ///
    /// assert!(Value::Integer(5).get_item(&Index::from(0)).is_err());
    /// ```
    pub fn get_item(&self, index: &Index) -> EvalResult<Self> {
        match index {
            Index::Key(key) => self.get_key(key),
            Index::Slice { start, stop } => self.get_slice(*start, *stop),
        }
    }

    fn get_key(&self, key: &Self) -> EvalResult<Self> {
        match self {
            #[cfg(feature = "vectorized")]
            Self::Array(array) => match key {
                Self::Tuple(path) => {
                    path.iter().try_fold(self.clone(), |current, step| current.get_key(step))
                },
                _ => Ok(array.outer(position(key, array.outer_len())?).into_value()),
            },
            Self::List(items) | Self::Tuple(items) => {
                Ok(items[position(key, items.len())?].clone())
            },
            Self::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                Ok(Self::from(chars[position(key, chars.len())?].to_string()))
            },
            Self::Map(map) => {
                let map_key = MapKey::try_from(key)?;
                map.get(&map_key)
                   .cloned()
                   .ok_or_else(|| RuntimeError::KeyNotFound { key: key.to_string() })
            },
            _ => Err(RuntimeError::NotSubscriptable { type_name: self.type_name() }),
        }
    }

    fn get_slice(&self, start: Option<i64>, stop: Option<i64>) -> EvalResult<Self> {
        let sub = |items: &[Self]| {
            let (from, to) = slice_bounds(start, stop, items.len());
            Arc::new(items[from..to].to_vec())
        };

        match self {
            Self::List(items) => Ok(Self::List(sub(items))),
            Self::Tuple(items) => Ok(Self::Tuple(sub(items))),
            #[cfg(feature = "vectorized")]
            Self::Array(array) => {
                let (from, to) = slice_bounds(start, stop, array.outer_len());
                Ok(Self::Array(Arc::new(array.slice_outer(from, to))))
            },
            Self::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (from, to) = slice_bounds(start, stop, chars.len());
                Ok(Self::from(chars[from..to].iter().collect::<String>()))
            },
            _ => Err(RuntimeError::NotSubscriptable { type_name: self.type_name() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_index_by_character() {
        let s = Value::from("héllo");
        assert_eq!(s.get_item(&Index::from(1)).unwrap(), Value::from("é"));
        assert_eq!(s.get_item(&Index::slice(None, Some(-3))).unwrap(), Value::from("hé"));
    }

    #[test]
    fn missing_map_key() {
        let map = Value::map([("a", 1)]);
        assert_eq!(map.get_item(&Index::from("b")),
                   Err(RuntimeError::KeyNotFound { key: "'b'".to_string() }));
        assert_eq!(map.get_item(&Index::from(Value::list([1]))),
                   Err(RuntimeError::Unhashable { type_name: "list" }));
    }

    #[test]
    fn sequence_position_must_be_integer() {
        let list = Value::list([1, 2]);
        assert!(matches!(list.get_item(&Index::from(0.5)),
                         Err(RuntimeError::TypeError { .. })));
        assert_eq!(list.get_item(&Index::from(5)),
                   Err(RuntimeError::IndexOutOfBounds { index: 5, len: 2 }));
    }

    #[test]
    fn equal_numeric_keys_find_the_same_entry() {
        let map = Value::map([(1, "a")]);
        assert_eq!(map.get_item(&Index::from(1.0)).unwrap(), Value::from("a"));
        assert_eq!(map.get_item(&Index::from(true)).unwrap(), Value::from("a"));
        assert_eq!(map.get_item(&Index::from(1.5)),
                   Err(RuntimeError::KeyNotFound { key: "1.5".to_string() }));
    }

    #[cfg(feature = "vectorized")]
    mod arrays {
        use ndarray::array;

        use super::*;

        #[test]
        fn positions_select_sub_arrays() {
            let matrix = Value::from(array![[1_i64, 2], [3, 4]]);
            assert_eq!(matrix.get_item(&Index::from(-1)).unwrap(), Value::from(array![3_i64, 4]));
            assert_eq!(matrix.get_item(&Index::from(Value::tuple([1, 0]))).unwrap(),
                       Value::Integer(3));
            assert_eq!(matrix.get_item(&Index::slice(Some(1), None)).unwrap(),
                       Value::from(array![[3_i64, 4]]));
            assert_eq!(matrix.get_item(&Index::from(2)),
                       Err(RuntimeError::IndexOutOfBounds { index: 2, len: 2 }));
        }

        #[test]
        fn array_paths_stop_at_scalars() {
            let array = Value::from(array![1_i64, 2]);
            assert_eq!(array.get_item(&Index::from(Value::tuple([0, 0]))),
                       Err(RuntimeError::NotSubscriptable { type_name: "int" }));
        }
    }
}
