use crate::value::{dtype::DType, index::Index};

/// Represents the operator of a binary node.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Sum,
    /// Multiplication (`*`)
    Product,
    /// True division (`/`)
    Quotient,
    /// Exponentiation (`**`)
    Power,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl BinaryOperator {
    /// The operator's symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Sum => "+",
            Self::Product => "*",
            Self::Quotient => "/",
            Self::Power => "**",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        !matches!(self, Self::Sum | Self::Product | Self::Quotient | Self::Power)
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A native type conversion applied to the single runtime input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Conversion to an integer.
    Int,
    /// Conversion to a real.
    Float,
    /// Conversion to a boolean.
    Bool,
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

/// The elementary math functions a backend provides.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Elementary {
    /// Cosine.
    Cos,
    /// Sine.
    Sin,
    /// Natural exponential.
    Exp,
    /// Square root.
    Sqrt,
}

impl Elementary {
    /// The function's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cos => "cos",
            Self::Sin => "sin",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
        }
    }

    /// Applies the function to a single `f64`.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Cos => x.cos(),
            Self::Sin => x.sin(),
            Self::Exp => x.exp(),
            Self::Sqrt => x.sqrt(),
        }
    }
}

/// Extra parameters stored on an elementary-function node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ElementaryParams {
    /// Element type the vectorized result is converted to.
    pub dtype: Option<DType>,
}

/// Extra parameters stored on a reduction node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SumParams {
    /// Axis to reduce along. `None` reduces over all elements.
    pub axis:  Option<usize>,
    /// Element type of the result.
    pub dtype: Option<DType>,
}

impl SumParams {
    /// Reduces along the given axis.
    #[must_use]
    pub const fn along(axis: usize) -> Self {
        Self { axis:  Some(axis),
               dtype: None, }
    }

    /// Sets the element type of the result.
    #[must_use]
    pub const fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }
}

/// An apply-style operation: a fixed operation on the single runtime input,
/// with parameters captured at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum Apply {
    /// Arithmetic negation.
    Neg,
    /// Logical negation through the backend.
    Not,
    /// An elementary function through the backend.
    Elementary(Elementary, ElementaryParams),
    /// A reduction through the backend.
    SumCall(SumParams),
    /// Subscripting with a stored key.
    Indexing(Index),
    /// Reading a named attribute.
    Attribute(String),
    /// Element type conversion through the backend.
    AsType(DType),
}

impl std::fmt::Display for Apply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "neg"),
            Self::Not => write!(f, "not"),
            Self::Elementary(func, params) => match params.dtype {
                Some(dtype) => write!(f, "{}(dtype={dtype})", func.name()),
                None => write!(f, "{}", func.name()),
            },
            Self::SumCall(params) => {
                write!(f, "sum(")?;
                if let Some(axis) = params.axis {
                    write!(f, "axis={axis}")?;
                    if params.dtype.is_some() {
                        write!(f, ", ")?;
                    }
                }
                if let Some(dtype) = params.dtype {
                    write!(f, "dtype={dtype}")?;
                }
                write!(f, ")")
            },
            Self::Indexing(index) => write!(f, "{index}"),
            Self::Attribute(name) => write!(f, ".{name}"),
            Self::AsType(dtype) => write!(f, "astype({dtype})"),
        }
    }
}
