//! Common test helpers for hello_bindings integration tests

#![allow(dead_code)]

use hello_bindings::prelude::*;

// ============================================================================
// Module
// ============================================================================

/// Example module with the default configuration
pub fn test_module() -> Module {
    hello_module(ModuleConfig::default())
}

/// Example module that never converts arguments
pub fn strict_module() -> Module {
    hello_module(ModuleConfig {
        implicit_conversion: false,
        ..ModuleConfig::default()
    })
}

// ============================================================================
// Standard host arrays
// ============================================================================

/// Owning f64 vector
pub fn f64_vector(values: &[f64]) -> HostArray {
    HostArray::from_array(ndarray::Array1::from(values.to_vec()))
}

/// Owning f32 vector
pub fn f32_vector(values: &[f32]) -> HostArray {
    HostArray::from_array(ndarray::Array1::from(values.to_vec()))
}

/// Row-major `rows x cols` f64 matrix holding 0, 1, 2, ...
pub fn arange_matrix(rows: usize, cols: usize) -> HostArray {
    let values: Vec<f64> = (0..rows * cols).map(|i| i as f64).collect();
    HostArray::from_shape_vec(&[rows, cols], values).unwrap()
}

/// Row-major 4x4 f64 identity
pub fn identity4() -> HostArray {
    HostArray::from_array(ndarray::Array2::<f64>::eye(4))
}

/// Array argument
pub fn arr(host: &HostArray) -> Value {
    Value::Array(host.clone())
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert two f64 slices agree element-wise within `eps`
pub fn assert_all_close(actual: &[f64], expected: &[f64], eps: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= eps, "mismatch at {}: actual={}, expected={}", i, a, e);
    }
}
