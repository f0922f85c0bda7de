//! Module-level #[pyfunction]s: add, mult.

use pyo3::prelude::*;

use crate::functions::{add as native_add, mult_number, Number};

/// `int` or `float` argument; ints are tried first
#[derive(FromPyObject, Clone, Copy)]
pub enum PyNumber {
    /// Python int
    Int(i64),
    /// Python float
    Float(f64),
}

impl From<PyNumber> for Number {
    fn from(n: PyNumber) -> Self {
        match n {
            PyNumber::Int(v) => Number::Int(v),
            PyNumber::Float(v) => Number::Float(v),
        }
    }
}

/// A function that adds two numbers
#[pyfunction]
#[pyo3(signature = (i=1, j=2))]
pub fn add(i: i64, j: i64) -> i64 {
    native_add(i, j)
}

/// Multiply 2 ints, or 2 numbers when either is a float
#[pyfunction]
#[pyo3(signature = (i=PyNumber::Int(2), j=PyNumber::Int(4)))]
pub fn mult(py: Python<'_>, i: PyNumber, j: PyNumber) -> PyResult<PyObject> {
    Ok(match mult_number(i.into(), j.into()) {
        Number::Int(v) => v.into_pyobject(py)?.into_any().unbind(),
        Number::Float(v) => v.into_pyobject(py)?.into_any().unbind(),
    })
}
