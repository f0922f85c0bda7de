//! Type-erased n-dimensional storage.

use ndarray::{ArrayD, IxDyn};

use super::{DType, Element};
use crate::error::BindingError;

/// Dense, C-ordered array of one of the supported element types
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    /// int32 elements
    I32(ArrayD<i32>),
    /// int64 elements
    I64(ArrayD<i64>),
    /// float32 elements
    F32(ArrayD<f32>),
    /// float64 elements
    F64(ArrayD<f64>),
}

/// Run `$body` with `$a` bound to the typed array, whatever the element type.
macro_rules! with_typed {
    ($data:expr, $a:ident => $body:expr) => {
        match $data {
            ArrayData::I32($a) => $body,
            ArrayData::I64($a) => $body,
            ArrayData::F32($a) => $body,
            ArrayData::F64($a) => $body,
        }
    };
}

impl ArrayData {
    /// Zero-filled storage
    pub fn zeros(dtype: DType, shape: &[usize]) -> Self {
        let dim = IxDyn(shape);
        match dtype {
            DType::I32 => ArrayData::I32(ArrayD::zeros(dim)),
            DType::I64 => ArrayData::I64(ArrayD::zeros(dim)),
            DType::F32 => ArrayData::F32(ArrayD::zeros(dim)),
            DType::F64 => ArrayData::F64(ArrayD::zeros(dim)),
        }
    }

    /// Build storage from a flat, row-major vector
    pub fn from_shape_vec<T: Element>(shape: &[usize], values: Vec<T>) -> Result<Self, BindingError> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(BindingError::ShapeMismatch {
                expected: format!("{} elements for shape {:?}", expected, shape),
                actual: vec![values.len()],
            });
        }
        let array = ArrayD::from_shape_vec(IxDyn(shape), values).map_err(|_| {
            BindingError::ShapeMismatch {
                expected: format!("{:?}", shape),
                actual: vec![expected],
            }
        })?;
        Ok(T::into_data(array))
    }

    /// Element type
    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::I32(_) => DType::I32,
            ArrayData::I64(_) => DType::I64,
            ArrayData::F32(_) => DType::F32,
            ArrayData::F64(_) => DType::F64,
        }
    }

    /// Dimension sizes
    pub fn shape(&self) -> &[usize] {
        with_typed!(self, a => a.shape())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        with_typed!(self, a => a.len())
    }

    /// Whether the storage holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the element payload in bytes
    pub fn nbytes(&self) -> usize {
        self.len() * self.dtype().item_size()
    }

    /// Borrow as a typed array, failing on element type mismatch
    pub fn typed<T: Element>(&self) -> Result<&ArrayD<T>, BindingError> {
        T::typed(self).ok_or(BindingError::TypeMismatch {
            expected: T::DTYPE,
            actual: self.dtype(),
        })
    }

    /// Mutably borrow as a typed array, failing on element type mismatch
    pub fn typed_mut<T: Element>(&mut self) -> Result<&mut ArrayD<T>, BindingError> {
        let actual = self.dtype();
        T::typed_mut(self).ok_or(BindingError::TypeMismatch {
            expected: T::DTYPE,
            actual,
        })
    }

    /// Deep copy converted to `T`
    ///
    /// Always allocates, even when the element type already matches.
    pub fn cast_to<T: Element>(&self) -> ArrayD<T> {
        with_typed!(self, a => a.mapv(T::from_element))
    }

    /// Deep copy converted to `dtype`
    pub fn cast(&self, dtype: DType) -> ArrayData {
        match dtype {
            DType::I32 => ArrayData::I32(self.cast_to()),
            DType::I64 => ArrayData::I64(self.cast_to()),
            DType::F32 => ArrayData::F32(self.cast_to()),
            DType::F64 => ArrayData::F64(self.cast_to()),
        }
    }

    /// Elements in row-major order, widened to f64 (lossy for large int64)
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_typed!(self, a => a.iter().map(|&v| f64::from_element(v)).collect())
    }

    /// Reallocate to `shape`, keeping the flat element order and zero-filling
    /// any new elements
    pub(crate) fn resized(&self, shape: &[usize]) -> ArrayData {
        with_typed!(self, a => {
            let len: usize = shape.iter().product();
            let mut flat: Vec<_> = a.iter().copied().take(len).collect();
            flat.resize(len, Default::default());
            let array = ArrayD::from_shape_vec(IxDyn(shape), flat)
                .unwrap_or_else(|_| ArrayD::default(IxDyn(shape)));
            Element::into_data(array)
        })
    }
}

impl<T: Element> From<ArrayD<T>> for ArrayData {
    fn from(array: ArrayD<T>) -> Self {
        T::into_data(array)
    }
}
