//! Integration tests: linear-algebra demos through the module

mod common;

use common::*;
use hello_bindings::linalg::DEFAULT_MATRIX_DIM;
use hello_bindings::prelude::*;
use ndarray::array;

fn result_vec(value: &Value) -> Vec<f64> {
    value.as_array().unwrap().to_vec::<f64>().unwrap()
}

#[test]
fn add_mat3d_keeps_row_major_layout() {
    let m = test_module();
    let a = arange_matrix(3, 3);
    let out = m.call("eig_add_mat3d", vec![arr(&a), arr(&a)]).unwrap();
    let expected: Vec<f64> = (0..9).map(|i| 2.0 * i as f64).collect();
    assert_eq!(result_vec(&out), expected);
    assert_eq!(out.as_array().unwrap().shape(), &[3, 3]);
}

#[test]
fn add_mat3d_converts_integer_input() {
    let m = test_module();
    let a = HostArray::from_array(array![[1_i64, 0, 0], [0, 1, 0], [0, 0, 1]]);
    let out = m.call("eig_add_mat3d", vec![arr(&a), arr(&a)]).unwrap();
    assert_eq!(result_vec(&out), vec![2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0]);
    assert_eq!(a.dtype(), DType::I64);
}

#[test]
fn add_mat3d_rejects_wrong_shape() {
    let m = test_module();
    let a = arange_matrix(2, 3);
    let err = m.call("eig_add_mat3d", vec![arr(&a), arr(&a)]).unwrap_err();
    assert!(matches!(err, BindingError::ShapeMismatch { .. }));
}

#[test]
fn compose_affine_mat_translation_then_scale() {
    let m = test_module();
    let translate = HostArray::from_array(array![
        [1.0_f64, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0]
    ]);
    let scale = HostArray::from_array(ndarray::Array2::<f64>::eye(4) * 2.0);
    scale.set(&[3, 3], 1.0_f64).unwrap();

    let out = m
        .call("eig_compose_affine_mat", vec![arr(&translate), arr(&scale)])
        .unwrap();
    assert_all_close(
        &result_vec(&out),
        &[2.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        1e-12,
    );

    let affine = m.call("eig_compose_affine", vec![arr(&translate), arr(&scale)]).unwrap();
    assert_eq!(result_vec(&affine), result_vec(&out));
}

#[test]
fn compose_affine_identity() {
    let m = test_module();
    let id = identity4();
    let out = m.call("eig_compose_affine", vec![arr(&id), arr(&id)]).unwrap();
    assert_eq!(result_vec(&out), id.to_vec::<f64>().unwrap());
}

#[test]
fn cref_returns_scaled_copy_and_accepts_readonly() {
    let m = test_module();
    let v = f32_vector(&[1.0, 2.0, 3.0]);
    for name in ["eig_cref", "eig_ccref"] {
        let out = m
            .call(name, vec![Value::Array(v.readonly_view()), Value::Float(2.0)])
            .unwrap();
        let out = out.as_array().unwrap();
        assert_eq!(out.to_vec::<f32>().unwrap(), vec![2.0, 4.0, 6.0]);
        assert!(!out.shares_storage(&v));
    }
    assert_eq!(v.to_vec::<f32>().unwrap(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn inplace_multiply_takes_int_scalar_in_conversion_pass() {
    let m = test_module();
    let v = f32_vector(&[1.0, -2.0, 0.5]);
    m.call("eig_inplace_multiply_f", vec![arr(&v), Value::Int(4)]).unwrap();
    assert_eq!(v.to_vec::<f32>().unwrap(), vec![4.0, -8.0, 2.0]);
}

#[test]
fn host_view_of_native_buffer_is_written_by_native_call() {
    let m = test_module();
    let native = NativeBuffer::from_array(array![1.0_f64, 2.0, 3.0]);
    let view = return_ref(&native, ReturnKind::MutRef).unwrap();
    m.call("eig_inplace_multiply_d", vec![Value::Array(view), Value::Float(2.0)])
        .unwrap();
    assert_eq!(native.read::<f64, _>(|v| v.sum()).unwrap(), 12.0);
}

#[test]
fn quaternion_identity_is_neutral() {
    let m = test_module();
    let identity = f64_vector(&[0.0, 0.0, 0.0, 1.0]);
    let half = 0.25_f64;
    let q = f64_vector(&[0.0, 0.0, half.sin(), half.cos()]);
    let out = m.call("eig_quatd_mult", vec![arr(&identity), arr(&q)]).unwrap();
    assert_all_close(&result_vec(&out), &q.to_vec::<f64>().unwrap(), 1e-12);
}

#[test]
fn quaternion_rejects_three_elements() {
    let m = test_module();
    let q = f64_vector(&[0.0, 0.0, 1.0]);
    assert!(matches!(
        m.call("eig_quatd_mult", vec![arr(&q), arr(&q)]),
        Err(BindingError::ShapeMismatch { .. })
    ));
}

#[test]
fn default_holder_is_ten_thousand_square() {
    // allocating the default holder takes 800 MB; only the constant is checked
    assert_eq!(DEFAULT_MATRIX_DIM, 10_000);
    let holder = MatrixHolder::new(3, 5);
    assert_eq!(holder.matrix().shape().unwrap(), vec![3, 5]);
    assert_eq!(holder.matrix().dtype().unwrap(), DType::F64);
}
