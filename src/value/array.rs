use std::{fmt, sync::Arc};

use ndarray::{Array, Array1, ArrayD, ArrayViewD, Axis, Dimension, Slice, Zip, arr0};

use crate::{
    error::RuntimeError,
    evaluator::core::EvalResult,
    util::num::{f64_to_i64_truncated, i64_to_f64},
    value::{core::Value, dtype::DType},
};

/// A typed n-dimensional array.
///
/// Arrays inside a [`Value`] always have at least one dimension:
/// [`NdArray::into_value`] unwraps zero-dimensional results to plain
/// numbers, so element-wise operations on scalars give scalars back.
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    /// Boolean elements.
    Bool(ArrayD<bool>),
    /// 64-bit integer elements.
    Int(ArrayD<i64>),
    /// 64-bit floating-point elements.
    Float(ArrayD<f64>),
}

/// The element types an [`NdArray`] can hold.
pub trait Element: Copy + PartialOrd + Into<Value> {
    /// Wraps an array of this element type.
    fn wrap(array: ArrayD<Self>) -> NdArray;
}

impl Element for bool {
    fn wrap(array: ArrayD<Self>) -> NdArray {
        NdArray::Bool(array)
    }
}

impl Element for i64 {
    fn wrap(array: ArrayD<Self>) -> NdArray {
        NdArray::Int(array)
    }
}

impl Element for f64 {
    fn wrap(array: ArrayD<Self>) -> NdArray {
        NdArray::Float(array)
    }
}

impl<A: Element, D: Dimension> From<Array<A, D>> for NdArray {
    fn from(array: Array<A, D>) -> Self {
        A::wrap(array.into_dyn())
    }
}

/// Converts an `ndarray` array into a value.
///
/// # Example
/// ```
/// use fframe::value::core::Value;
/// use ndarray::array;
///
/// let matrix = Value::from(array![[1_i64, 2], [3, 4]]);
/// assert_eq!(matrix.to_string(), "array([[1, 2], [3, 4]])");
/// ```
impl<A: Element, D: Dimension> From<Array<A, D>> for Value {
    fn from(array: Array<A, D>) -> Self {
        NdArray::from(array).into_value()
    }
}

/// Applies the same shape operation to whichever element type an array holds.
macro_rules! map_kind {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            NdArray::Bool($a) => NdArray::Bool($body),
            NdArray::Int($a) => NdArray::Int($body),
            NdArray::Float($a) => NdArray::Float($body),
        }
    };
}

impl NdArray {
    /// Views a value as an array.
    ///
    /// Numbers and booleans become zero-dimensional arrays. Lists and tuples
    /// are converted recursively: every item must have the same shape, and
    /// the element type is the promotion of the items' element types. An
    /// empty sequence is an empty float array.
    ///
    /// # Errors
    /// - `TypeError` for strings and mappings.
    /// - `ShapeMismatch` for ragged sequences.
    ///
    /// # Example
    /// ```
    /// use fframe::value::{array::NdArray, core::Value, dtype::DType};
    ///
    /// let nested = Value::list([Value::tuple([1, 2]), Value::list([Value::Real(3.5), Value::Bool(true)])]);
    /// let array = NdArray::from_value(&nested).unwrap();
    ///
    /// assert_eq!(array.shape().to_vec(), vec![2, 2]);
    /// assert_eq!(array.dtype(), DType::Float);
    /// assert!(NdArray::from_value(&Value::list([Value::list([1]), Value::list([1, 2])])).is_err());
    /// ```
    pub fn from_value(value: &Value) -> EvalResult<Self> {
        match value {
            Value::Array(array) => Ok(array.as_ref().clone()),
            Value::Bool(b) => Ok(Self::Bool(arr0(*b).into_dyn())),
            Value::Integer(i) => Ok(Self::Int(arr0(*i).into_dyn())),
            Value::Real(r) => Ok(Self::Float(arr0(*r).into_dyn())),
            Value::List(items) | Value::Tuple(items) => Self::from_sequence(items),
            Value::Str(_) | Value::Map(_) => {
                Err(RuntimeError::TypeError { details: format!("Cannot convert '{}' to an array",
                                                               value.type_name()) })
            },
        }
    }

    fn from_sequence(items: &[Value]) -> EvalResult<Self> {
        let parts = items.iter().map(Self::from_value).collect::<EvalResult<Vec<_>>>()?;
        let Some(first) = parts.first() else {
            return Ok(Self::Float(Array1::zeros(0).into_dyn()));
        };
        if let Some(odd) = parts.iter().find(|part| part.shape() != first.shape()) {
            return Err(RuntimeError::ShapeMismatch { left:  first.shape().to_vec(),
                                                     right: odd.shape().to_vec(), });
        }

        match parts.iter().map(Self::dtype).fold(DType::Bool, DType::promote) {
            DType::Bool => Ok(Self::Bool(stack(&parts.iter().map(Self::to_bools).collect::<Vec<_>>())?)),
            DType::Int => {
                let ints = parts.iter().map(Self::to_ints).collect::<EvalResult<Vec<_>>>()?;
                Ok(Self::Int(stack(&ints)?))
            },
            DType::Float => {
                Ok(Self::Float(stack(&parts.iter().map(Self::to_floats).collect::<Vec<_>>())?))
            },
        }
    }

    /// Wraps the array as a value, unwrapping zero-dimensional arrays to
    /// their element.
    #[must_use]
    pub fn into_value(self) -> Value {
        if self.ndim() == 0 {
            if let Some(item) = self.item() {
                return item;
            }
        }
        Value::Array(Arc::new(self))
    }

    /// The element type.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Int(_) => DType::Int,
            Self::Float(_) => DType::Float,
        }
    }

    /// The length of every axis.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Bool(a) => a.shape(),
            Self::Int(a) => a.shape(),
            Self::Float(a) => a.shape(),
        }
    }

    /// The number of axes.
    #[must_use]
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// The total number of elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    /// The length of the first axis, or `0` for a zero-dimensional array.
    #[must_use]
    pub fn outer_len(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// The only element of an array with exactly one element.
    #[must_use]
    pub fn item(&self) -> Option<Value> {
        if self.size() != 1 {
            return None;
        }
        match self {
            Self::Bool(a) => a.first().map(|&x| Value::Bool(x)),
            Self::Int(a) => a.first().map(|&x| Value::Integer(x)),
            Self::Float(a) => a.first().map(|&x| Value::Real(x)),
        }
    }

    /// The truth value of every element.
    #[must_use]
    pub fn to_bools(&self) -> ArrayD<bool> {
        match self {
            Self::Bool(a) => a.clone(),
            Self::Int(a) => a.mapv(|x| x != 0),
            Self::Float(a) => a.mapv(|x| x != 0.0),
        }
    }

    /// The elements as integers; reals are truncated towards zero.
    ///
    /// # Errors
    /// `TypeError` or `Overflow` for reals that are NaN, infinite or out of
    /// range.
    pub fn to_ints(&self) -> EvalResult<ArrayD<i64>> {
        match self {
            Self::Bool(a) => Ok(a.mapv(i64::from)),
            Self::Int(a) => Ok(a.clone()),
            Self::Float(a) => try_map(a, |&x| f64_to_i64_truncated(x)),
        }
    }

    /// The elements as reals.
    #[must_use]
    pub fn to_floats(&self) -> ArrayD<f64> {
        match self {
            Self::Bool(a) => a.mapv(f64::from),
            Self::Int(a) => a.mapv(i64_to_f64),
            Self::Float(a) => a.clone(),
        }
    }

    /// Converts every element to `dtype`.
    pub fn cast(&self, dtype: DType) -> EvalResult<Self> {
        Ok(match dtype {
            DType::Bool => Self::Bool(self.to_bools()),
            DType::Int => Self::Int(self.to_ints()?),
            DType::Float => Self::Float(self.to_floats()),
        })
    }

    /// The sub-array at `position` along the first axis. The caller checks
    /// the position against [`NdArray::outer_len`].
    #[must_use]
    pub fn outer(&self, position: usize) -> Self {
        map_kind!(self, a => a.index_axis(Axis(0), position).to_owned())
    }

    /// The sub-arrays from `from` up to `to` along the first axis.
    #[must_use]
    pub fn slice_outer(&self, from: usize, to: usize) -> Self {
        map_kind!(self, a => a.slice_axis(Axis(0), Slice::from(from..to)).to_owned())
    }

    /// The sub-arrays along the first axis, as values.
    #[must_use]
    pub fn outer_values(&self) -> Vec<Value> {
        (0..self.outer_len()).map(|i| self.outer(i).into_value()).collect()
    }

    /// Whether two arrays have the same shape and numerically equal
    /// elements, regardless of their element types.
    #[must_use]
    pub fn same_elements(&self, other: &Self) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        match (self, other) {
            (Self::Float(_), _) | (_, Self::Float(_)) => self.to_floats() == other.to_floats(),
            _ => self.to_ints().ok() == other.to_ints().ok(),
        }
    }
}

fn stack<A: Clone>(parts: &[ArrayD<A>]) -> EvalResult<ArrayD<A>> {
    let views = parts.iter().map(|part| part.view()).collect::<Vec<_>>();
    Ok(ndarray::stack(Axis(0), &views)?)
}

/// Returns the shape two shapes broadcast to.
///
/// Shapes are aligned at their last axis; each pair of lengths must be
/// equal, or one of them must be `1`.
///
/// # Example
/// ```
/// use fframe::value::array::broadcast_shape;
///
/// assert_eq!(broadcast_shape(&[2, 1], &[3]).unwrap(), vec![2, 3]);
/// assert_eq!(broadcast_shape(&[], &[4]).unwrap(), vec![4]);
/// assert!(broadcast_shape(&[2], &[3]).is_err());
/// ```
pub fn broadcast_shape(left: &[usize], right: &[usize]) -> EvalResult<Vec<usize>> {
    let ndim = left.len().max(right.len());
    let dim = |shape: &[usize], axis: usize| {
        (axis + shape.len()).checked_sub(ndim).map_or(1, |i| shape[i])
    };

    (0..ndim).map(|axis| match (dim(left, axis), dim(right, axis)) {
                 (l, r) if l == r || r == 1 => Ok(l),
                 (1, r) => Ok(r),
                 _ => Err(RuntimeError::ShapeMismatch { left:  left.to_vec(),
                                                        right: right.to_vec(), }),
             })
             .collect()
}

/// Views `array` broadcast to `shape`.
pub fn broadcast_to<'a, A>(array: &'a ArrayD<A>, shape: &[usize]) -> EvalResult<ArrayViewD<'a, A>> {
    array.broadcast(shape)
         .ok_or_else(|| RuntimeError::ShapeMismatch { left:  array.shape().to_vec(),
                                                      right: shape.to_vec(), })
}

/// Combines two arrays element by element, broadcasting them against each
/// other.
pub fn zip_with<A, B, C, F>(left: &ArrayD<A>, right: &ArrayD<B>, f: F) -> EvalResult<ArrayD<C>>
    where F: FnMut(&A, &B) -> C
{
    let shape = broadcast_shape(left.shape(), right.shape())?;
    let (left, right) = (broadcast_to(left, &shape)?, broadcast_to(right, &shape)?);
    Ok(Zip::from(&left).and(&right).map_collect(f))
}

/// Like [`zip_with`], for an operation that can fail on some elements.
pub fn try_zip_with<A, B, C, F>(left: &ArrayD<A>, right: &ArrayD<B>, f: F) -> EvalResult<ArrayD<C>>
    where C: Clone,
          F: FnMut(&A, &B) -> EvalResult<C>
{
    collect_results(&zip_with(left, right, f)?)
}

/// Applies a fallible operation to every element.
pub fn try_map<A, B, F>(array: &ArrayD<A>, f: F) -> EvalResult<ArrayD<B>>
    where B: Clone,
          F: FnMut(&A) -> EvalResult<B>
{
    collect_results(&array.map(f))
}

/// Turns an array of results into the array of their values, or the first
/// failure in logical order.
pub fn collect_results<C: Clone>(results: &ArrayD<EvalResult<C>>) -> EvalResult<ArrayD<C>> {
    let items = results.iter().cloned().collect::<EvalResult<Vec<_>>>()?;
    Ok(ArrayD::from_shape_vec(results.raw_dim(), items)?)
}

fn write_nested<A: Element>(f: &mut fmt::Formatter<'_>, view: ArrayViewD<'_, A>) -> fmt::Result {
    if view.ndim() == 0 {
        return match view.first() {
            Some(&x) => {
                let item: Value = x.into();
                write!(f, "{item}")
            },
            None => Ok(()),
        };
    }

    write!(f, "[")?;
    for (index, sub) in view.outer_iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write_nested(f, sub)?;
    }
    write!(f, "]")
}

impl fmt::Display for NdArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "array(")?;
        match self {
            Self::Bool(a) => write_nested(f, a.view())?,
            Self::Int(a) => write_nested(f, a.view())?,
            Self::Float(a) => write_nested(f, a.view())?,
        }
        write!(f, ")")
    }
}
