//! Buffer Exchange Layer
//!
//! Moves numeric arrays across the boundary. What the native side receives is
//! decided by the parameter kind it declares:
//!
//! | Kind                    | Native side receives | Element type           |
//! |-------------------------|----------------------|------------------------|
//! | [`ParamKind::Value`]    | owning deep copy     | converted if allowed   |
//! | [`ParamKind::MutRef`]   | mutable view         | must match exactly     |
//! | [`ParamKind::ConstRef`] | immutable view       | must match exactly     |
//!
//! Return values mirror this: a value return hands the host an owning array,
//! a reference return hands it a view over native storage whose writability
//! follows the reference ([`ReturnKind`]).
//!
//! Views passed into a native call are ndarray borrows and cannot outlive the
//! call. Views returned to the host keep the native storage alive through
//! shared ownership.

mod casters;
mod shape;

pub use casters::{FromHost, IntoHost};
pub use shape::ShapeSpec;

use std::fmt;

use ndarray::{Array, ArrayView, ArrayViewMut, Dimension};
use serde::{Deserialize, Serialize};

use crate::buffer::{Element, HostArray, NativeBuffer};
use crate::error::BindingError;

/// How a native operation declares an array parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Owning copy; element type conversion allowed
    Value,
    /// Mutable view over caller storage
    MutRef,
    /// Immutable view over caller storage
    ConstRef,
}

impl ParamKind {
    /// Whether an element type conversion may happen for this kind
    pub fn allows_conversion(self) -> bool {
        self == ParamKind::Value
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParamKind::Value => "value",
            ParamKind::MutRef => "mut ref",
            ParamKind::ConstRef => "const ref",
        })
    }
}

/// How a native operation declares its returned array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    /// Host receives an owning copy
    Value,
    /// Host receives a writable view of native storage
    MutRef,
    /// Host receives a read-only view of native storage
    ConstRef,
}

// ============================================================================
// Host -> native
// ============================================================================

/// Load a by-value array parameter
///
/// Always deep-copies. When the element type differs it is converted during
/// the copy if `convert` is set; otherwise the call fails with a type
/// mismatch.
pub fn load_value<T: Element, D: Dimension>(
    arg: &HostArray,
    spec: &ShapeSpec,
    convert: bool,
) -> Result<Array<T, D>, BindingError> {
    spec.check(arg.shape())?;
    if arg.dtype() != T::DTYPE && !convert {
        return Err(BindingError::TypeMismatch {
            expected: T::DTYPE,
            actual: arg.dtype(),
        });
    }
    let data = arg.storage().try_borrow().map_err(|_| BindingError::BorrowConflict)?;
    tracing::debug!(
        from = %arg.dtype(),
        to = %T::DTYPE,
        shape = ?arg.shape(),
        "copying by-value array argument"
    );
    data.cast_to::<T>()
        .into_dimensionality::<D>()
        .map_err(|_| rank_mismatch::<D>(arg.shape()))
}

/// Run `f` with a mutable view over the caller's storage
///
/// The element type must match exactly and the host array must be writable.
/// Every check runs before `f`, so a rejected call has no side effects.
pub fn with_mut_ref<T: Element, D: Dimension, R>(
    arg: &HostArray,
    spec: &ShapeSpec,
    f: impl FnOnce(ArrayViewMut<'_, T, D>) -> R,
) -> Result<R, BindingError> {
    check_exact_dtype::<T>(arg)?;
    spec.check(arg.shape())?;
    arg.check_writable()?;
    let mut data = arg
        .storage()
        .try_borrow_mut()
        .map_err(|_| BindingError::BorrowConflict)?;
    let view = data
        .typed_mut::<T>()?
        .view_mut()
        .into_dimensionality::<D>()
        .map_err(|_| rank_mismatch::<D>(arg.shape()))?;
    tracing::trace!(dtype = %T::DTYPE, shape = ?arg.shape(), "passing mutable view");
    Ok(f(view))
}

/// Run `f` with an immutable view over the caller's storage
///
/// The element type must match exactly. Read-only host arrays are accepted.
pub fn with_const_ref<T: Element, D: Dimension, R>(
    arg: &HostArray,
    spec: &ShapeSpec,
    f: impl FnOnce(ArrayView<'_, T, D>) -> R,
) -> Result<R, BindingError> {
    check_exact_dtype::<T>(arg)?;
    spec.check(arg.shape())?;
    let data = arg.storage().try_borrow().map_err(|_| BindingError::BorrowConflict)?;
    let view = data
        .typed::<T>()?
        .view()
        .into_dimensionality::<D>()
        .map_err(|_| rank_mismatch::<D>(arg.shape()))?;
    tracing::trace!(dtype = %T::DTYPE, shape = ?arg.shape(), "passing immutable view");
    Ok(f(view))
}

// ============================================================================
// Native -> host
// ============================================================================

/// Hand a native result to the host as an owning array
pub fn return_value<T: Element, D: Dimension>(array: Array<T, D>) -> HostArray {
    HostArray::from_array(array)
}

/// Hand native-owned storage to the host according to `kind`
pub fn return_ref(native: &NativeBuffer, kind: ReturnKind) -> Result<HostArray, BindingError> {
    match kind {
        ReturnKind::Value => native.to_host_copy(),
        ReturnKind::MutRef => native.to_host_view(true),
        ReturnKind::ConstRef => native.to_host_view(false),
    }
}

fn check_exact_dtype<T: Element>(arg: &HostArray) -> Result<(), BindingError> {
    if arg.dtype() == T::DTYPE {
        Ok(())
    } else {
        Err(BindingError::TypeMismatch {
            expected: T::DTYPE,
            actual: arg.dtype(),
        })
    }
}

fn rank_mismatch<D: Dimension>(shape: &[usize]) -> BindingError {
    BindingError::ShapeMismatch {
        expected: D::NDIM.map_or_else(|| "any rank".to_string(), |n| format!("rank {}", n)),
        actual: shape.to_vec(),
    }
}
