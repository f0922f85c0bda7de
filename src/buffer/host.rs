//! Host-side array objects.
//!
//! A [`HostArray`] is what the scripting caller holds: a handle to shared
//! storage plus the two flags the caller can inspect after a call, whether the
//! array owns its data and whether it is writable.
//!
//! # Lifetime of views
//!
//! Storage is reference counted. A view keeps the storage of its source alive,
//! so dropping the owning handle never leaves a view dangling. Resizing is the
//! only operation that reallocates, and it is refused while any other handle
//! aliases the storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ndarray::{Array, Dimension};

use super::{ArrayData, DType, Element};
use crate::error::BindingError;

/// Shared, single-threaded array storage
pub(crate) type SharedStorage = Rc<RefCell<ArrayData>>;

/// Whether a handle owns its storage or aliases another buffer's storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    /// Freshly allocated, independent storage
    Owned,
    /// Aliases the storage of exactly one source buffer
    View,
}

/// Caller-side array object
///
/// `Clone` yields another reference to the same host object (same storage,
/// same flags), the way a scripting runtime copies an object reference.
/// Use [`HostArray::copy`] for a deep copy.
#[derive(Clone)]
pub struct HostArray {
    storage: SharedStorage,
    ownership: Ownership,
    writable: bool,
    dtype: DType,
    shape: Vec<usize>,
}

impl HostArray {
    /// Take ownership of `data`
    pub fn from_data(data: ArrayData) -> Self {
        let dtype = data.dtype();
        let shape = data.shape().to_vec();
        HostArray {
            storage: Rc::new(RefCell::new(data)),
            ownership: Ownership::Owned,
            writable: true,
            dtype,
            shape,
        }
    }

    /// Take ownership of a typed ndarray of any dimensionality
    pub fn from_array<T: Element, D: Dimension>(array: Array<T, D>) -> Self {
        Self::from_data(T::into_data(array.into_dyn()))
    }

    /// Owning array from a flat, row-major vector
    pub fn from_shape_vec<T: Element>(shape: &[usize], values: Vec<T>) -> Result<Self, BindingError> {
        Ok(Self::from_data(ArrayData::from_shape_vec(shape, values)?))
    }

    /// Owning, zero-filled array
    pub fn zeros(dtype: DType, shape: &[usize]) -> Self {
        Self::from_data(ArrayData::zeros(dtype, shape))
    }

    /// Non-owning handle over `storage`
    pub(crate) fn alias(storage: &SharedStorage, writable: bool) -> Result<Self, BindingError> {
        let data = storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        let dtype = data.dtype();
        let shape = data.shape().to_vec();
        drop(data);
        Ok(HostArray {
            storage: Rc::clone(storage),
            ownership: Ownership::View,
            writable,
            dtype,
            shape,
        })
    }

    pub(crate) fn storage(&self) -> &SharedStorage {
        &self.storage
    }

    /// Non-owning view of this array; inherits writability
    pub fn view(&self) -> HostArray {
        HostArray {
            storage: Rc::clone(&self.storage),
            ownership: Ownership::View,
            writable: self.writable,
            dtype: self.dtype,
            shape: self.shape.clone(),
        }
    }

    /// Non-owning, read-only view of this array
    pub fn readonly_view(&self) -> HostArray {
        let mut view = self.view();
        view.writable = false;
        view
    }

    /// Deep copy into fresh, owning, writable storage
    pub fn copy(&self) -> Result<HostArray, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(Self::from_data(data.clone()))
    }

    /// Ownership of this handle
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Whether this handle owns its storage
    pub fn owns_data(&self) -> bool {
        self.ownership == Ownership::Owned
    }

    /// Whether writes through this handle are permitted
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Clear the writable flag; there is no way back
    pub fn set_readonly(&mut self) {
        self.writable = false;
    }

    /// Element type
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Dimension sizes
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both handles alias the same storage
    pub fn shares_storage(&self, other: &HostArray) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    /// Number of live handles (owner, views, references) on this storage
    pub fn reference_count(&self) -> usize {
        Rc::strong_count(&self.storage)
    }

    /// Read one element; the element type must match exactly
    pub fn get<T: Element>(&self, index: &[usize]) -> Result<T, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        let array = data.typed::<T>()?;
        array
            .get(index)
            .copied()
            .ok_or_else(|| BindingError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            })
    }

    /// Write one element; fails on read-only handles without touching storage
    pub fn set<T: Element>(&self, index: &[usize], value: T) -> Result<(), BindingError> {
        self.check_writable()?;
        let mut data = self.storage.try_borrow_mut().map_err(|_| BindingError::BorrowConflict)?;
        let array = data.typed_mut::<T>()?;
        let slot = array
            .get_mut(index)
            .ok_or_else(|| BindingError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            })?;
        *slot = value;
        Ok(())
    }

    /// Overwrite every element
    pub fn fill<T: Element>(&self, value: T) -> Result<(), BindingError> {
        self.check_writable()?;
        let mut data = self.storage.try_borrow_mut().map_err(|_| BindingError::BorrowConflict)?;
        data.typed_mut::<T>()?.fill(value);
        Ok(())
    }

    /// Elements in row-major order; the element type must match exactly
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(data.typed::<T>()?.iter().copied().collect())
    }

    /// Snapshot of the storage
    pub fn to_data(&self) -> Result<ArrayData, BindingError> {
        let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
        Ok(data.clone())
    }

    /// Reallocate to a new shape
    ///
    /// Only an owning handle with no other handle on its storage may resize.
    /// The flat element order is kept and new elements are zero.
    pub fn resize(&mut self, shape: &[usize]) -> Result<(), BindingError> {
        if !self.owns_data() {
            return Err(BindingError::NotOwner);
        }
        let references = Rc::strong_count(&self.storage) - 1;
        if references > 0 {
            return Err(BindingError::ResizeShared { references });
        }
        let resized = {
            let data = self.storage.try_borrow().map_err(|_| BindingError::BorrowConflict)?;
            data.resized(shape)
        };
        tracing::debug!(from = ?self.shape, to = ?shape, "resizing owned array");
        self.storage = Rc::new(RefCell::new(resized));
        self.shape = shape.to_vec();
        Ok(())
    }

    pub(crate) fn check_writable(&self) -> Result<(), BindingError> {
        if self.writable {
            Ok(())
        } else {
            Err(BindingError::MutationOnImmutable)
        }
    }
}

impl fmt::Debug for HostArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostArray")
            .field("dtype", &self.dtype)
            .field("shape", &self.shape)
            .field("owns_data", &self.owns_data())
            .field("writable", &self.writable)
            .finish()
    }
}

impl fmt::Display for HostArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.storage.try_borrow() {
            Ok(data) => write!(
                f,
                "array(shape={:?}, {:?}, dtype={})",
                self.shape,
                data.to_f64_vec(),
                self.dtype
            ),
            Err(_) => write!(f, "array(shape={:?}, <borrowed>, dtype={})", self.shape, self.dtype),
        }
    }
}

impl<T: Element, D: Dimension> From<Array<T, D>> for HostArray {
    fn from(array: Array<T, D>) -> Self {
        HostArray::from_array(array)
    }
}
