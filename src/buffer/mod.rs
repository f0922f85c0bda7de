//! Buffer model
//!
//! - [`DType`] / [`Element`]: the element types that can cross the boundary
//! - [`ArrayData`]: type-erased, C-ordered n-dimensional storage
//! - [`HostArray`]: the caller-side array object with ownership and
//!   writability flags
//! - [`NativeBuffer`]: storage owned by a native object, exposed to the host
//!   by copy or by view

mod data;
mod dtype;
mod host;
mod native;

pub use data::ArrayData;
pub use dtype::{DType, Element};
pub use host::{HostArray, Ownership};
pub use native::NativeBuffer;
