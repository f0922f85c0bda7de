//! # hello_bindings
//!
//! Example bindings between a dynamic host and native Rust code.
//!
//! ## Features
//!
//! - **Buffer exchange**: arrays cross the boundary as an owning copy, a
//!   mutable view or an immutable view, with exact element-type and
//!   writability checks for views
//! - **Fixed-shape casters**: `glam` vectors, matrices, quaternions and
//!   affine transforms to and from row-major host arrays
//! - **Overload dispatch**: named arguments, defaults and two-pass
//!   resolution (exact, then converting)
//! - **Class demos**: composition, capability traits, tagged-variant
//!   overloads, nested types and factory constructors
//! - **Python**: a CPython extension over the same code (`python` feature)
//!
//! ## Example
//!
//! ```rust
//! use hello_bindings::prelude::*;
//!
//! let m = hello_module(ModuleConfig::default());
//! assert_eq!(m.call("add", vec![Value::Int(1), Value::Int(3)]).unwrap().as_int(), Some(4));
//!
//! // In-place update through a mutable view
//! let v = HostArray::from_array(ndarray::array![1.0_f64, 2.0, 3.0]);
//! m.call("eig_inplace_multiply_d", vec![Value::Array(v.clone()), Value::Float(2.0)]).unwrap();
//! assert_eq!(v.to_vec::<f64>().unwrap(), vec![2.0, 4.0, 6.0]);
//!
//! // A read-only view refuses writes
//! let holder = MatrixHolder::new(2, 2);
//! let view = holder.view_matrix().unwrap();
//! assert!(matches!(view.set(&[0, 0], 1.0_f64), Err(BindingError::MutationOnImmutable)));
//! ```

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exchange;
pub mod functions;
pub mod linalg;
pub mod module;
pub mod oop;

#[cfg(feature = "python")]
pub mod python;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::buffer::{ArrayData, DType, Element, HostArray, NativeBuffer, Ownership};
    pub use crate::config::ModuleConfig;
    pub use crate::dispatch::{CallArgs, Module, Overload, Param, ParamType, Value};
    pub use crate::error::BindingError;
    pub use crate::exchange::{
        load_value, return_ref, return_value, with_const_ref, with_mut_ref, FromHost, IntoHost, ParamKind,
        ReturnKind, ShapeSpec,
    };
    pub use crate::linalg::MatrixHolder;
    pub use crate::module::hello_module;
    pub use crate::oop::*;
}

// Re-exports for convenience
pub use buffer::HostArray;
pub use error::BindingError;
pub use module::hello_module;
