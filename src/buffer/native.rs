//! Storage owned by native objects.

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::{Array, ArrayViewD, ArrayViewMutD, Dimension};

use super::host::{HostArray, SharedStorage};
use super::{ArrayData, DType, Element};
use crate::error::BindingError;

/// A buffer owned by a native object (the member matrix of a class, say)
///
/// The host sees it either as an owning copy or as a view aliasing this
/// storage; see [`crate::exchange::return_ref`].
#[derive(Debug)]
pub struct NativeBuffer {
    storage: SharedStorage,
}

impl NativeBuffer {
    /// Take ownership of `data`
    pub fn new(data: ArrayData) -> Self {
        NativeBuffer {
            storage: Rc::new(RefCell::new(data)),
        }
    }

    /// Zero-filled buffer
    pub fn zeros(dtype: DType, shape: &[usize]) -> Self {
        Self::new(ArrayData::zeros(dtype, shape))
    }

    /// Take ownership of a typed ndarray
    pub fn from_array<T: Element, D: Dimension>(array: Array<T, D>) -> Self {
        Self::new(T::into_data(array.into_dyn()))
    }

    /// Element type
    pub fn dtype(&self) -> Result<DType, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(data.dtype())
    }

    /// Dimension sizes
    pub fn shape(&self) -> Result<Vec<usize>, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(data.shape().to_vec())
    }

    /// Number of host views currently aliasing this buffer
    pub fn view_count(&self) -> usize {
        Rc::strong_count(&self.storage) - 1
    }

    /// Read the buffer through an immutable view
    pub fn read<T: Element, R>(&self, f: impl FnOnce(ArrayViewD<'_, T>) -> R) -> Result<R, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(f(data.typed::<T>()?.view()))
    }

    /// Modify the buffer through a mutable view
    pub fn write<T: Element, R>(
        &self,
        f: impl FnOnce(ArrayViewMutD<'_, T>) -> R,
    ) -> Result<R, BindingError> {
        let mut data = self.storage.try_borrow_mut().map_err(|_| BindingError::BorrowConflict)?;
        Ok(f(data.typed_mut::<T>()?.view_mut()))
    }

    /// Deep copy handed to the host as an owning array
    pub fn to_host_copy(&self) -> Result<HostArray, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        tracing::debug!(
            dtype = %data.dtype(),
            shape = ?data.shape(),
            bytes = data.nbytes(),
            "deep-copying native buffer"
        );
        Ok(HostArray::from_data(data.clone()))
    }

    /// Non-owning host handle aliasing this buffer
    pub fn to_host_view(&self, writable: bool) -> Result<HostArray, BindingError> {
        tracing::trace!(writable, "aliasing native buffer");
        HostArray::alias(&self.storage, writable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn host_view_writes_reach_native_storage() {
        let native = NativeBuffer::from_array(array![[0.0_f64, 0.0], [0.0, 0.0]]);
        let view = native.to_host_view(true).unwrap();
        assert!(!view.owns_data());
        view.set(&[0, 1], 2.5_f64).unwrap();

        let seen = native.read::<f64, _>(|v| v.iter().copied().collect::<Vec<_>>()).unwrap();
        assert_eq!(seen, vec![0.0, 2.5, 0.0, 0.0]);
        assert_eq!(native.view_count(), 1);
    }

    #[test]
    fn host_copy_is_detached() {
        let native = NativeBuffer::zeros(DType::I32, &[3]);
        let copy = native.to_host_copy().unwrap();
        copy.fill(7_i32).unwrap();
        assert_eq!(native.read::<i32, _>(|v| v.sum()).unwrap(), 0);
        assert_eq!(native.view_count(), 0);
    }

    #[test]
    fn native_writes_are_visible_through_existing_views() {
        let native = NativeBuffer::zeros(DType::F32, &[2]);
        let view = native.to_host_view(false).unwrap();
        native.write::<f32, _>(|mut v| v.fill(1.5)).unwrap();
        assert_eq!(view.to_vec::<f32>().unwrap(), vec![1.5, 1.5]);
    }

    #[test]
    fn typed_access_requires_matching_dtype() {
        let native = NativeBuffer::zeros(DType::F64, &[2]);
        assert!(matches!(
            native.read::<f32, _>(|_| ()),
            Err(BindingError::TypeMismatch { .. })
        ));
    }
}
