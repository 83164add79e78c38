use std::{collections::BTreeMap, sync::Arc};

#[cfg(feature = "vectorized")]
use crate::{util::num::usize_to_i64, value::array::NdArray};
use crate::{
    error::RuntimeError,
    evaluator::core::EvalResult,
    util::num::{f64_to_i64_truncated, i64_to_f64},
    value::{dtype::DType, key::MapKey},
};

/// Represents a runtime value.
///
/// This enum models every value a node can receive as an argument or produce
/// as a result. The framework treats values as opaque; only the nodes that
/// perform native operations (arithmetic, comparison, subscripting,
/// conversion) and the backends look inside.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit integer.
    Integer(i64),
    /// A double precision floating-point number.
    Real(f64),
    /// A boolean. Counts as `0` or `1` in arithmetic.
    Bool(bool),
    /// A string.
    Str(Arc<str>),
    /// An ordered sequence, as produced by a lifted list.
    List(Arc<Vec<Self>>),
    /// A fixed tuple, as produced by a lifted tuple or by an identity node
    /// called with other than one argument.
    Tuple(Arc<Vec<Self>>),
    /// A typed numeric array with at least one dimension. Arithmetic on
    /// arrays is element-wise.
    #[cfg(feature = "vectorized")]
    Array(Arc<NdArray>),
    /// A mapping from keys to values.
    Map(Arc<BTreeMap<MapKey, Self>>),
}

/// A numeric scalar after promotion of booleans to integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An integer operand.
    Int(i64),
    /// A real operand.
    Real(f64),
}

impl Number {
    /// Returns the number as `f64`.
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i64_to_f64(i),
            Self::Real(r) => r,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Self::Integer(i),
            Number::Real(r) => Self::Real(r),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Arc::from(v))
    }
}

impl Value {
    /// Builds a `Value::List` from any sequence of convertible items.
    pub fn list<I, T>(items: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Self>
    {
        Self::List(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a `Value::Tuple` from any sequence of convertible items.
    pub fn tuple<I, T>(items: I) -> Self
        where I: IntoIterator<Item = T>,
              T: Into<Self>
    {
        Self::Tuple(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds a `Value::Map` from key-value pairs. Later pairs overwrite
    /// earlier pairs with the same key.
    pub fn map<I, K, V>(pairs: I) -> Self
        where I: IntoIterator<Item = (K, V)>,
              K: Into<MapKey>,
              V: Into<Self>
    {
        Self::Map(Arc::new(pairs.into_iter()
                                .map(|(key, value)| (key.into(), value.into()))
                                .collect()))
    }

    /// The name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            #[cfg(feature = "vectorized")]
            Self::Array(_) => "array",
            Self::Map(_) => "dict",
        }
    }

    /// Returns the value as a [`Number`] if it is an integer, real or
    /// boolean.
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Integer(i) => Some(Number::Int(*i)),
            Self::Real(r) => Some(Number::Real(*r)),
            Self::Bool(b) => Some(Number::Int(i64::from(*b))),
            _ => None,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// # Example
    /// ```
    /// use fframe::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(10).as_real().unwrap(), 10.0);
    /// assert!(Value::from("ten").as_real().is_err());
    /// ```
    pub fn as_real(&self) -> EvalResult<f64> {
        self.as_number()
            .map(Number::as_f64)
            .ok_or_else(|| RuntimeError::TypeError { details: format!("Expected a number, found '{}'",
                                                                      self.type_name()) })
    }

    /// Returns `true` if the value is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        #[cfg(feature = "vectorized")]
        {
            matches!(self, Self::Array(..))
        }
        #[cfg(not(feature = "vectorized"))]
        {
            false
        }
    }

    /// Returns the truth value of the value.
    ///
    /// Zero numbers, `false` and empty strings or containers are false.
    /// An array is only truthy or falsy if it has exactly one element.
    ///
    /// # Errors
    /// `RuntimeError::AmbiguousTruth` for arrays with other than one element.
    pub fn truth(&self) -> EvalResult<bool> {
        match self {
            Self::Integer(i) => Ok(*i != 0),
            Self::Real(r) => Ok(*r != 0.0),
            Self::Bool(b) => Ok(*b),
            Self::Str(s) => Ok(!s.is_empty()),
            Self::List(items) | Self::Tuple(items) => Ok(!items.is_empty()),
            Self::Map(map) => Ok(!map.is_empty()),
            #[cfg(feature = "vectorized")]
            Self::Array(array) => match array.item() {
                Some(item) => item.truth(),
                None => Err(RuntimeError::AmbiguousTruth { len: array.size() }),
            },
        }
    }

    /// Converts the value to an integer.
    ///
    /// Reals are truncated towards zero, booleans become `0` or `1`, strings
    /// are parsed, and single-element arrays convert their element.
    ///
    /// # Example
    /// ```
    /// use fframe::value::core::Value;
    ///
    /// assert_eq!(Value::Real(-2.7).to_int().unwrap(), Value::Integer(-2));
    /// assert_eq!(Value::from(" 12 ").to_int().unwrap(), Value::Integer(12));
    /// assert!(Value::from("1.5").to_int().is_err());
    /// ```
    pub fn to_int(&self) -> EvalResult<Self> {
        match self {
            Self::Integer(i) => Ok(Self::Integer(*i)),
            Self::Bool(b) => Ok(Self::Integer(i64::from(*b))),
            Self::Real(r) => Ok(Self::Integer(f64_to_i64_truncated(*r)?)),
            Self::Str(s) => {
                s.trim()
                 .parse::<i64>()
                 .map(Self::Integer)
                 .map_err(|_| RuntimeError::InvalidLiteral { target:  "int",
                                                             literal: s.to_string(), })
            },
            #[cfg(feature = "vectorized")]
            Self::Array(array) if array.size() == 1 => self.array_item(array)?.to_int(),
            _ => Err(self.conversion_error("int")),
        }
    }

    /// Converts the value to a real.
    ///
    /// Strings are parsed, including `inf` and `nan`.
    pub fn to_float(&self) -> EvalResult<Self> {
        match self {
            Self::Integer(_) | Self::Real(_) | Self::Bool(_) => Ok(Self::Real(self.as_real()?)),
            Self::Str(s) => {
                s.trim()
                 .parse::<f64>()
                 .map(Self::Real)
                 .map_err(|_| RuntimeError::InvalidLiteral { target:  "float",
                                                             literal: s.to_string(), })
            },
            #[cfg(feature = "vectorized")]
            Self::Array(array) if array.size() == 1 => self.array_item(array)?.to_float(),
            _ => Err(self.conversion_error("float")),
        }
    }

    /// Converts the value to a boolean via [`Value::truth`].
    pub fn to_bool(&self) -> EvalResult<Self> {
        Ok(Self::Bool(self.truth()?))
    }

    /// Converts the value to the given element type.
    ///
    /// Arrays are converted element by element; every other value is
    /// converted as a whole.
    pub fn cast(&self, dtype: DType) -> EvalResult<Self> {
        match self {
            #[cfg(feature = "vectorized")]
            Self::Array(array) => Ok(array.cast(dtype)?.into_value()),
            _ => match dtype {
                DType::Bool => self.to_bool(),
                DType::Int => self.to_int(),
                DType::Float => self.to_float(),
            },
        }
    }

    fn conversion_error(&self, target: &str) -> RuntimeError {
        RuntimeError::TypeError { details: format!("Cannot convert '{}' to {target}",
                                                   self.type_name()) }
    }

    #[cfg(feature = "vectorized")]
    fn array_item(&self, array: &NdArray) -> EvalResult<Self> {
        array.item().ok_or_else(|| self.conversion_error("a scalar"))
    }

    /// Returns the element type of a scalar or array. Strings and other
    /// containers have no element type.
    #[must_use]
    pub fn dtype(&self) -> Option<DType> {
        match self {
            #[cfg(feature = "vectorized")]
            Self::Array(array) => Some(array.dtype()),
            _ => DType::of_scalar(self),
        }
    }

    /// Reads a named attribute.
    ///
    /// Numbers expose `real` and `imag`. Arrays expose `size`, `ndim`,
    /// `shape` and `dtype`.
    ///
    /// # Errors
    /// `RuntimeError::UnknownAttribute` for any other name.
    ///
    /// # Example
    /// ```
    /// use fframe::value::core::Value;
    ///
    /// assert_eq!(Value::Real(2.5).attribute("real").unwrap(), Value::Real(2.5));
    /// assert_eq!(Value::Integer(7).attribute("imag").unwrap(), Value::Integer(0));
    /// assert!(Value::Integer(7).attribute("length").is_err());
    /// ```
    pub fn attribute(&self, name: &str) -> EvalResult<Self> {
        match (self, name) {
            (Self::Integer(_) | Self::Bool(_), "real") => self.to_int(),
            (Self::Real(r), "real") => Ok(Self::Real(*r)),
            (Self::Integer(_) | Self::Bool(_), "imag") => Ok(Self::Integer(0)),
            (Self::Real(_), "imag") => Ok(Self::Real(0.0)),
            #[cfg(feature = "vectorized")]
            (Self::Array(array), "size") => Ok(Self::Integer(usize_to_i64(array.size())?)),
            #[cfg(feature = "vectorized")]
            (Self::Array(array), "ndim") => Ok(Self::Integer(usize_to_i64(array.ndim())?)),
            #[cfg(feature = "vectorized")]
            (Self::Array(array), "shape") => {
                let dims = array.shape()
                                .iter()
                                .map(|&dim| usize_to_i64(dim).map(Self::Integer))
                                .collect::<EvalResult<Vec<_>>>()?;
                Ok(Self::Tuple(Arc::new(dims)))
            },
            #[cfg(feature = "vectorized")]
            (Self::Array(array), "dtype") => Ok(Self::from(array.dtype().name())),
            _ => Err(RuntimeError::UnknownAttribute { type_name: self.type_name(),
                                                      name:      name.to_string(), }),
        }
    }
}

fn write_items(f: &mut std::fmt::Formatter<'_>, items: &[Value]) -> std::fmt::Result {
    for (index, value) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "'{s}'"),
            Self::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            },
            Self::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            },
            #[cfg(feature = "vectorized")]
            Self::Array(array) => write!(f, "{array}"),
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}
