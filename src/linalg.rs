//! Linear-algebra demos: fixed-size matrices, affine transforms, quaternions
//! and in-place vector updates, plus a class that owns a large matrix and
//! hands it out by copy or by view.

use glam::{DAffine3, DMat3, DMat4, DQuat, Quat};
use ndarray::{Array1, Array3, ArrayView1, ArrayView3, ArrayViewMut1, Ix1, Ix3};

use crate::buffer::{DType, HostArray, NativeBuffer};
use crate::dispatch::{Module, Overload, Param, ParamType, Value};
use crate::error::BindingError;
use crate::exchange::{return_ref, IntoHost, ParamKind, ReturnKind, ShapeSpec};

/// Side length of the matrix a default [`MatrixHolder`] allocates
pub const DEFAULT_MATRIX_DIM: usize = 10_000;

/// Sum of two 3x3 matrices
pub fn add_mat3(m1: DMat3, m2: DMat3) -> DMat3 {
    m1 + m2
}

/// Compose two 4x4 matrices as affine transforms
pub fn compose_affine_mat(t1: DMat4, t2: DMat4) -> DMat4 {
    DMat4::from(DAffine3::from_mat4(t1) * DAffine3::from_mat4(t2))
}

/// Compose two affine transforms
pub fn compose_affine(t1: DAffine3, t2: DAffine3) -> DAffine3 {
    t1 * t2
}

/// `v * x` into a new vector; `v` is borrowed, never copied
pub fn scaled(v: ArrayView1<'_, f32>, x: f64) -> Array1<f32> {
    let x = x as f32;
    v.mapv(|e| e * x)
}

/// Multiply every element of `v` by `x`, in place
pub fn inplace_multiply_f(mut v: ArrayViewMut1<'_, f32>, x: f64) {
    let x = x as f32;
    v.mapv_inplace(|e| e * x);
}

/// Multiply every element of `v` by `x`, in place
pub fn inplace_multiply_d(mut v: ArrayViewMut1<'_, f64>, x: f64) {
    v.mapv_inplace(|e| e * x);
}

/// Hamilton product of two f64 quaternions
pub fn quatd_mult(q1: DQuat, q2: DQuat) -> DQuat {
    q1 * q2
}

/// Hamilton product of two f32 quaternions
pub fn quatf_mult(q1: Quat, q2: Quat) -> Quat {
    q1 * q2
}

/// Rank-3 tensor scaled by `k`; same shape as the input
pub fn scale_tensor(t: ArrayView3<'_, f64>, k: f64) -> Array3<f64> {
    t.mapv(|e| e * k)
}

// ============================================================================
// MatrixHolder
// ============================================================================

/// Native object owning a zero-initialised f64 matrix
#[derive(Debug)]
pub struct MatrixHolder {
    matrix: NativeBuffer,
}

impl MatrixHolder {
    /// Allocate a `rows x cols` zero matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        MatrixHolder {
            matrix: NativeBuffer::zeros(DType::F64, &[rows, cols]),
        }
    }

    /// Owning deep copy of the matrix
    pub fn copy_matrix(&self) -> Result<HostArray, BindingError> {
        return_ref(&self.matrix, ReturnKind::Value)
    }

    /// Writable view aliasing the matrix
    pub fn get_matrix(&self) -> Result<HostArray, BindingError> {
        return_ref(&self.matrix, ReturnKind::MutRef)
    }

    /// Read-only view aliasing the matrix
    pub fn view_matrix(&self) -> Result<HostArray, BindingError> {
        return_ref(&self.matrix, ReturnKind::ConstRef)
    }

    /// The owned buffer
    pub fn matrix(&self) -> &NativeBuffer {
        &self.matrix
    }
}

/// Allocates [`DEFAULT_MATRIX_DIM`] squared elements (800 MB)
impl Default for MatrixHolder {
    fn default() -> Self {
        Self::new(DEFAULT_MATRIX_DIM, DEFAULT_MATRIX_DIM)
    }
}

// ============================================================================
// Registration
// ============================================================================

fn by_value(dtype: DType, shape: ShapeSpec) -> Param {
    Param::positional(ParamType::array(ParamKind::Value, dtype, shape))
}

fn by_const_ref(dtype: DType, shape: ShapeSpec) -> Param {
    Param::positional(ParamType::array(ParamKind::ConstRef, dtype, shape))
}

fn by_mut_ref(dtype: DType, shape: ShapeSpec) -> Param {
    Param::positional(ParamType::array(ParamKind::MutRef, dtype, shape))
}

fn scalar() -> Param {
    Param::positional(ParamType::Float)
}

/// Register the `eig_*` functions
pub fn register(m: &mut Module) {
    m.def(
        "eig_add_mat3d",
        Overload::new(
            vec![by_value(DType::F64, ShapeSpec::matrix(3, 3)), by_value(DType::F64, ShapeSpec::matrix(3, 3))],
            |args| Ok(add_mat3(args.load(0)?, args.load(1)?).into_host().into()),
        )
        .doc("A function that adds two 3x3 matrices")
        .returns("ndarray[float64 (3, 3)]"),
    );
    m.def(
        "eig_compose_affine",
        Overload::new(
            vec![by_value(DType::F64, ShapeSpec::matrix(4, 4)), by_value(DType::F64, ShapeSpec::matrix(4, 4))],
            |args| {
                let t: DAffine3 = compose_affine(args.load(0)?, args.load(1)?);
                Ok(t.into_host().into())
            },
        )
        .doc("Compose affine transformations")
        .returns("ndarray[float64 (4, 4)]"),
    );
    m.def(
        "eig_compose_affine_mat",
        Overload::new(
            vec![by_value(DType::F64, ShapeSpec::matrix(4, 4)), by_value(DType::F64, ShapeSpec::matrix(4, 4))],
            |args| Ok(compose_affine_mat(args.load(0)?, args.load(1)?).into_host().into()),
        )
        .doc("Compose 4x4 matrices as affine transformations")
        .returns("ndarray[float64 (4, 4)]"),
    );
    for name in ["eig_cref", "eig_ccref"] {
        m.def(
            name,
            Overload::new(vec![by_const_ref(DType::F32, ShapeSpec::vector(3)), scalar()], |args| {
                let x = args.float(1)?;
                let out = args.with_ref::<f32, Ix1, _>(0, |v| scaled(v, x))?;
                Ok(out.into_host().into())
            })
            .doc("Checking const ref")
            .returns("ndarray[float32 (3)]"),
        );
    }
    m.def(
        "eig_inplace_multiply_f",
        Overload::new(vec![by_mut_ref(DType::F32, ShapeSpec::vector(3)), scalar()], |args| {
            let x = args.float(1)?;
            args.with_mut::<f32, Ix1, _>(0, |v| inplace_multiply_f(v, x))?;
            Ok(Value::None)
        })
        .doc("Inplace multiply float"),
    );
    m.def(
        "eig_inplace_multiply_d",
        Overload::new(vec![by_mut_ref(DType::F64, ShapeSpec::dyn_vector()), scalar()], |args| {
            let x = args.float(1)?;
            args.with_mut::<f64, Ix1, _>(0, |v| inplace_multiply_d(v, x))?;
            Ok(Value::None)
        })
        .doc("Inplace multiply double"),
    );
    m.def(
        "eig_quatd_mult",
        Overload::new(
            vec![by_value(DType::F64, ShapeSpec::vector(4)), by_value(DType::F64, ShapeSpec::vector(4))],
            |args| {
                let q: DQuat = quatd_mult(args.load(0)?, args.load(1)?);
                Ok(q.into_host().into())
            },
        )
        .doc("Multiply two double quaternions")
        .returns("ndarray[float64 (4)]"),
    );
    m.def(
        "eig_quatf_mult",
        Overload::new(
            vec![by_value(DType::F32, ShapeSpec::vector(4)), by_value(DType::F32, ShapeSpec::vector(4))],
            |args| {
                let q: Quat = quatf_mult(args.load(0)?, args.load(1)?);
                Ok(q.into_host().into())
            },
        )
        .doc("Multiply two float quaternions")
        .returns("ndarray[float32 (4)]"),
    );
    m.def(
        "eig_scale_tensor",
        Overload::new(vec![by_const_ref(DType::F64, ShapeSpec::Rank(3)), scalar()], |args| {
            let k = args.float(1)?;
            let out = args.with_ref::<f64, Ix3, _>(0, |t| scale_tensor(t, k))?;
            Ok(out.into_host().into())
        })
        .doc("Scale a rank-3 tensor")
        .returns("ndarray[float64 rank 3]"),
    );
}
