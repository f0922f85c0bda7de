//! By-value casters for native types with a known shape.
//!
//! Host matrices are row-major. glam stores columns, so loads transpose and
//! casts read column by column. Quaternions travel as `[x, y, z, w]`.

use glam::{DAffine3, DMat3, DMat4, DQuat, DVec3, Quat, Vec3};
use ndarray::{Array, Array1, Array2, ArrayD, Dimension};

use super::{load_value, return_value, ShapeSpec};
use crate::buffer::{Element, HostArray};
use crate::error::BindingError;

/// Native type that can be loaded from a host array by value
pub trait FromHost: Sized {
    /// Shape the host array must have
    fn shape_spec() -> ShapeSpec;

    /// Copy (and, with `convert`, element-convert) the host array
    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError>;
}

/// Native value that can be handed to the host as an owning array
pub trait IntoHost {
    /// Move into a fresh host array
    fn into_host(self) -> HostArray;
}

impl<T: Element, D: Dimension> FromHost for Array<T, D> {
    fn shape_spec() -> ShapeSpec {
        D::NDIM.map_or(ShapeSpec::Any, ShapeSpec::Rank)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        load_value(arg, &Self::shape_spec(), convert)
    }
}

impl<T: Element, D: Dimension> IntoHost for Array<T, D> {
    fn into_host(self) -> HostArray {
        return_value(self)
    }
}

/// Row-major elements of a by-value argument that must match `spec`
fn load_flat<T: Element>(arg: &HostArray, spec: &ShapeSpec, convert: bool) -> Result<Vec<T>, BindingError> {
    let array: ArrayD<T> = load_value(arg, spec, convert)?;
    Ok(array.iter().copied().collect())
}

// ============================================================================
// Vectors
// ============================================================================

impl FromHost for Vec3 {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::vector(3)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let v = load_flat::<f32>(arg, &Self::shape_spec(), convert)?;
        Ok(Vec3::new(v[0], v[1], v[2]))
    }
}

impl IntoHost for Vec3 {
    fn into_host(self) -> HostArray {
        return_value(Array1::from_vec(self.to_array().to_vec()))
    }
}

impl FromHost for DVec3 {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::vector(3)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let v = load_flat::<f64>(arg, &Self::shape_spec(), convert)?;
        Ok(DVec3::new(v[0], v[1], v[2]))
    }
}

impl IntoHost for DVec3 {
    fn into_host(self) -> HostArray {
        return_value(Array1::from_vec(self.to_array().to_vec()))
    }
}

// ============================================================================
// Quaternions
// ============================================================================

impl FromHost for Quat {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::vector(4)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let v = load_flat::<f32>(arg, &Self::shape_spec(), convert)?;
        Ok(Quat::from_xyzw(v[0], v[1], v[2], v[3]))
    }
}

impl IntoHost for Quat {
    fn into_host(self) -> HostArray {
        return_value(Array1::from_vec(self.to_array().to_vec()))
    }
}

impl FromHost for DQuat {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::vector(4)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let v = load_flat::<f64>(arg, &Self::shape_spec(), convert)?;
        Ok(DQuat::from_xyzw(v[0], v[1], v[2], v[3]))
    }
}

impl IntoHost for DQuat {
    fn into_host(self) -> HostArray {
        return_value(Array1::from_vec(self.to_array().to_vec()))
    }
}

// ============================================================================
// Matrices and transforms
// ============================================================================

impl FromHost for DMat3 {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::matrix(3, 3)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let rows = load_flat::<f64>(arg, &Self::shape_spec(), convert)?;
        Ok(DMat3::from_cols_slice(&rows).transpose())
    }
}

impl IntoHost for DMat3 {
    fn into_host(self) -> HostArray {
        return_value(Array2::from_shape_fn((3, 3), |(r, c)| self.col(c)[r]))
    }
}

impl FromHost for DMat4 {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::matrix(4, 4)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        let rows = load_flat::<f64>(arg, &Self::shape_spec(), convert)?;
        Ok(DMat4::from_cols_slice(&rows).transpose())
    }
}

impl IntoHost for DMat4 {
    fn into_host(self) -> HostArray {
        return_value(Array2::from_shape_fn((4, 4), |(r, c)| self.col(c)[r]))
    }
}

/// 4x4 homogeneous matrix; the bottom row is ignored on load
impl FromHost for DAffine3 {
    fn shape_spec() -> ShapeSpec {
        ShapeSpec::matrix(4, 4)
    }

    fn load(arg: &HostArray, convert: bool) -> Result<Self, BindingError> {
        Ok(DAffine3::from_mat4(DMat4::load(arg, convert)?))
    }
}

impl IntoHost for DAffine3 {
    fn into_host(self) -> HostArray {
        DMat4::from(self).into_host()
    }
}
