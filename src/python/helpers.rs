//! Shared helper functions for NumPy <-> native conversion.

use ndarray::{ArrayView, Dimension};
use numpy::IntoPyArray;
use pyo3::prelude::*;

use crate::buffer::{ArrayData, Element, HostArray};
use crate::exchange::{FromHost, IntoHost, ShapeSpec};

/// Helper: load a by-value argument through the native casters
///
/// The view is copied into a fresh host array first, so the caster sees the
/// same owning input it sees from any other host.
#[inline]
pub fn load_by_value<T, E, D>(array: ArrayView<'_, E, D>) -> PyResult<T>
where
    T: FromHost,
    E: Element,
    D: Dimension,
{
    let host = HostArray::from_array(array.to_owned());
    Ok(T::load(&host, false)?)
}

/// Helper: check a reference argument's shape before touching its data
#[inline]
pub fn check_shape(spec: &ShapeSpec, shape: &[usize]) -> PyResult<()> {
    spec.check(shape)?;
    Ok(())
}

/// Helper: convert an owning host array into a NumPy array
pub fn host_to_numpy<'py>(py: Python<'py>, host: &HostArray) -> PyResult<Bound<'py, PyAny>> {
    Ok(match host.to_data()? {
        ArrayData::I32(a) => a.into_pyarray(py).into_any(),
        ArrayData::I64(a) => a.into_pyarray(py).into_any(),
        ArrayData::F32(a) => a.into_pyarray(py).into_any(),
        ArrayData::F64(a) => a.into_pyarray(py).into_any(),
    })
}

/// Helper: hand a fixed-size native value to Python as a NumPy array
#[inline]
pub fn to_numpy<'py>(py: Python<'py>, value: impl IntoHost) -> PyResult<Bound<'py, PyAny>> {
    host_to_numpy(py, &value.into_host())
}
