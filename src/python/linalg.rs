//! Linear-algebra #[pyfunction]s and the MatrixHolder class.

use glam::{DAffine3, DMat3, DMat4, DQuat, Quat};
use numpy::{
    AllowTypeChange, IntoPyArray, PyArray3, PyArrayDyn, PyArrayLike1, PyArrayLike2, PyUntypedArrayMethods,
    PyReadonlyArray1, PyReadonlyArray3, PyReadwriteArray1,
};
use pyo3::prelude::*;

use crate::exchange::ShapeSpec;
use crate::linalg::{self, MatrixHolder, DEFAULT_MATRIX_DIM};

use super::helpers::{check_shape, host_to_numpy, load_by_value, to_numpy};

/// A function that adds two 3x3 matrices
#[pyfunction]
pub fn eig_add_mat3d<'py>(
    py: Python<'py>,
    m1: PyArrayLike2<'py, f64, AllowTypeChange>,
    m2: PyArrayLike2<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyAny>> {
    let m1: DMat3 = load_by_value(m1.as_array())?;
    let m2: DMat3 = load_by_value(m2.as_array())?;
    to_numpy(py, linalg::add_mat3(m1, m2))
}

/// Compose affine transformations
#[pyfunction]
pub fn eig_compose_affine<'py>(
    py: Python<'py>,
    t1: PyArrayLike2<'py, f64, AllowTypeChange>,
    t2: PyArrayLike2<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyAny>> {
    let t1: DAffine3 = load_by_value(t1.as_array())?;
    let t2: DAffine3 = load_by_value(t2.as_array())?;
    to_numpy(py, linalg::compose_affine(t1, t2))
}

/// Compose 4x4 matrices as affine transformations
#[pyfunction]
pub fn eig_compose_affine_mat<'py>(
    py: Python<'py>,
    t1: PyArrayLike2<'py, f64, AllowTypeChange>,
    t2: PyArrayLike2<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyAny>> {
    let t1: DMat4 = load_by_value(t1.as_array())?;
    let t2: DMat4 = load_by_value(t2.as_array())?;
    to_numpy(py, linalg::compose_affine_mat(t1, t2))
}

/// Checking const ref
#[pyfunction]
pub fn eig_cref<'py>(py: Python<'py>, v: PyReadonlyArray1<'py, f32>, x: f64) -> PyResult<Bound<'py, PyAny>> {
    check_shape(&ShapeSpec::vector(3), v.shape())?;
    Ok(linalg::scaled(v.as_array(), x).into_pyarray(py).into_any())
}

/// Checking const ref
#[pyfunction]
pub fn eig_ccref<'py>(py: Python<'py>, v: PyReadonlyArray1<'py, f32>, x: f64) -> PyResult<Bound<'py, PyAny>> {
    eig_cref(py, v, x)
}

/// Inplace multiply float
#[pyfunction]
pub fn eig_inplace_multiply_f(mut v: PyReadwriteArray1<'_, f32>, x: f64) -> PyResult<()> {
    check_shape(&ShapeSpec::vector(3), v.shape())?;
    linalg::inplace_multiply_f(v.as_array_mut(), x);
    Ok(())
}

/// Inplace multiply double
#[pyfunction]
pub fn eig_inplace_multiply_d(mut v: PyReadwriteArray1<'_, f64>, x: f64) {
    linalg::inplace_multiply_d(v.as_array_mut(), x);
}

/// Multiply two double quaternions
#[pyfunction]
pub fn eig_quatd_mult<'py>(
    py: Python<'py>,
    q1: PyArrayLike1<'py, f64, AllowTypeChange>,
    q2: PyArrayLike1<'py, f64, AllowTypeChange>,
) -> PyResult<Bound<'py, PyAny>> {
    let q1: DQuat = load_by_value(q1.as_array())?;
    let q2: DQuat = load_by_value(q2.as_array())?;
    to_numpy(py, linalg::quatd_mult(q1, q2))
}

/// Multiply two float quaternions
#[pyfunction]
pub fn eig_quatf_mult<'py>(
    py: Python<'py>,
    q1: PyArrayLike1<'py, f32, AllowTypeChange>,
    q2: PyArrayLike1<'py, f32, AllowTypeChange>,
) -> PyResult<Bound<'py, PyAny>> {
    let q1: Quat = load_by_value(q1.as_array())?;
    let q2: Quat = load_by_value(q2.as_array())?;
    to_numpy(py, linalg::quatf_mult(q1, q2))
}

/// Scale a rank-3 tensor
#[pyfunction]
pub fn eig_scale_tensor<'py>(
    py: Python<'py>,
    t: PyReadonlyArray3<'py, f64>,
    k: f64,
) -> PyResult<Bound<'py, PyArray3<f64>>> {
    Ok(linalg::scale_tensor(t.as_array(), k).into_pyarray(py))
}

/// Python-visible MatrixHolder wrapper
///
/// `get_matrix` and `view_matrix` return arrays borrowing the holder's
/// storage; each array keeps the holder alive.
#[pyclass(name = "MatrixHolder", unsendable)]
pub struct PyMatrixHolder {
    inner: MatrixHolder,
}

impl PyMatrixHolder {
    fn borrowed<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let container = slf.clone().into_any();
        let holder = slf.borrow();
        let array = holder.inner.matrix().read::<f64, _>(|view| {
            // SAFETY: `container` owns the NativeBuffer this view points into.
            // The buffer is never reallocated, and the returned array holds a
            // reference to `container`, so the data outlives the array.
            unsafe { PyArrayDyn::<f64>::borrow_from_array(&view, container) }
        })?;
        Ok(array)
    }
}

#[pymethods]
impl PyMatrixHolder {
    #[new]
    #[pyo3(signature = (rows=DEFAULT_MATRIX_DIM, cols=DEFAULT_MATRIX_DIM))]
    fn new(rows: usize, cols: usize) -> Self {
        PyMatrixHolder {
            inner: MatrixHolder::new(rows, cols),
        }
    }

    /// Owning copy of the matrix
    fn copy_matrix<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        host_to_numpy(py, &self.inner.copy_matrix()?)
    }

    /// Writable array aliasing the matrix
    fn get_matrix<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        Self::borrowed(slf)
    }

    /// Read-only array aliasing the matrix
    fn view_matrix<'py>(slf: &Bound<'py, Self>) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
        let array = Self::borrowed(slf)?;
        array.getattr("flags")?.setattr("writeable", false)?;
        Ok(array)
    }

    /// Matrix shape
    #[getter]
    fn shape(&self) -> PyResult<Vec<usize>> {
        Ok(self.inner.matrix().shape()?)
    }
}
