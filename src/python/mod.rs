//! Python bindings for hello_bindings
//!
//! Provides the `hello_bindings` extension module via PyO3 and the `numpy`
//! crate. Array parameters follow the same kinds as the native exchange
//! layer: by-value parameters accept any array-like and convert, reference
//! parameters require the exact element type.

#![cfg(feature = "python")]

mod functions;
mod helpers;
mod linalg;
mod oop;

pub use linalg::PyMatrixHolder;
pub use oop::{PyBird, PyDog, PyOverlord, PyPet, PyPet2};

use pyo3::prelude::*;

use crate::config::ModuleConfig;

/// Python module
#[pymodule]
pub fn hello_bindings(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__doc__", ModuleConfig::default().doc)?;
    m.add("__version__", crate::VERSION)?;

    // Functions and attributes
    m.add_function(wrap_pyfunction!(functions::add, m)?)?;
    m.add_function(wrap_pyfunction!(functions::mult, m)?)?;
    m.add("the_answer", crate::functions::THE_ANSWER)?;
    m.add("what", crate::functions::WHAT)?;

    // Linear algebra
    m.add_function(wrap_pyfunction!(linalg::eig_add_mat3d, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_compose_affine, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_compose_affine_mat, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_cref, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_ccref, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_inplace_multiply_f, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_inplace_multiply_d, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_quatd_mult, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_quatf_mult, m)?)?;
    m.add_function(wrap_pyfunction!(linalg::eig_scale_tensor, m)?)?;
    m.add_class::<linalg::PyMatrixHolder>()?;

    // Classes
    m.add_class::<oop::PyPet>()?;
    m.add_class::<oop::PyPet2>()?;
    m.add_class::<oop::PyDog>()?;
    m.add_class::<oop::PyPolymorphicPet>()?;
    m.add_class::<oop::PyPolymorphicDog>()?;
    m.add_class::<oop::PyOverlord>()?;
    m.add_class::<oop::PyBird>()?;
    m.add_class::<oop::PyPrivateCtor>()?;
    m.add_class::<oop::PyPublicCtor>()?;
    m.add_function(wrap_pyfunction!(oop::pet_store, m)?)?;
    m.add_function(wrap_pyfunction!(oop::pet_store2, m)?)?;
    Ok(())
}
