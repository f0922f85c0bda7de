//! Element types that may cross the boundary.

use std::fmt;

use ndarray::ArrayD;
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use super::ArrayData;

/// Element type tag of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl DType {
    /// Every supported element type
    pub const ALL: [DType; 4] = [DType::I32, DType::I64, DType::F32, DType::F64];

    /// NumPy-style name (`int32`, `float64`, ...)
    pub fn name(self) -> &'static str {
        match self {
            DType::I32 => "int32",
            DType::I64 => "int64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }

    /// Size of one element in bytes
    pub fn item_size(self) -> usize {
        match self {
            DType::I32 | DType::F32 => 4,
            DType::I64 | DType::F64 => 8,
        }
    }

    /// Whether this is a floating-point type
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A Rust scalar type that maps to one [`DType`]
///
/// Implemented for `i32`, `i64`, `f32` and `f64` only. Casts between element
/// types follow `as` semantics: float to int truncates toward zero and
/// saturates, NaN becomes zero.
pub trait Element:
    sealed::Sealed
    + Copy
    + Default
    + PartialEq
    + fmt::Debug
    + 'static
    + AsPrimitive<i32>
    + AsPrimitive<i64>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
{
    /// Tag of this element type
    const DTYPE: DType;

    /// Convert from any other element type
    fn from_element<S: Element>(value: S) -> Self;

    /// Convert from a scalar call argument
    fn from_f64(value: f64) -> Self;

    /// Wrap a typed array into type-erased storage
    fn into_data(array: ArrayD<Self>) -> ArrayData;

    /// Borrow the typed array if `data` holds this element type
    fn typed(data: &ArrayData) -> Option<&ArrayD<Self>>;

    /// Mutably borrow the typed array if `data` holds this element type
    fn typed_mut(data: &mut ArrayData) -> Option<&mut ArrayD<Self>>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl sealed::Sealed for $t {}

        impl Element for $t {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn from_element<S: Element>(value: S) -> Self {
                <S as AsPrimitive<$t>>::as_(value)
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn into_data(array: ArrayD<Self>) -> ArrayData {
                ArrayData::$variant(array)
            }

            fn typed(data: &ArrayData) -> Option<&ArrayD<Self>> {
                match data {
                    ArrayData::$variant(a) => Some(a),
                    _ => None,
                }
            }

            fn typed_mut(data: &mut ArrayData) -> Option<&mut ArrayD<Self>> {
                match data {
                    ArrayData::$variant(a) => Some(a),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(i32, I32);
impl_element!(i64, I64);
impl_element!(f32, F32);
impl_element!(f64, F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_numpy() {
        let names: Vec<_> = DType::ALL.iter().map(|d| d.name()).collect();
        assert_eq!(names, ["int32", "int64", "float32", "float64"]);
    }

    #[test]
    fn float_to_int_truncates_and_saturates() {
        assert_eq!(i32::from_element(2.9_f64), 2);
        assert_eq!(i32::from_element(-2.9_f32), -2);
        assert_eq!(i32::from_element(1e20_f64), i32::MAX);
        assert_eq!(i64::from_element(f64::NAN), 0);
    }

    #[test]
    fn widening_is_exact() {
        assert_eq!(f64::from_element(0.1_f32), 0.1_f32 as f64);
        assert_eq!(i64::from_element(i32::MIN), i32::MIN as i64);
    }

    #[test]
    fn serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&DType::F32).unwrap();
        assert_eq!(json, "\"f32\"");
        let back: DType = serde_json::from_str("\"i64\"").unwrap();
        assert_eq!(back, DType::I64);
    }
}
