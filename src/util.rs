/// Numeric conversion helpers.
///
/// This module provides the conversions between integer and floating-point
/// types, and the position arithmetic used by subscripting. Conversions that
/// can fail return a `RuntimeError` instead of panicking or silently
/// wrapping around.
pub mod num;
