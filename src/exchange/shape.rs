//! Declared shapes of array parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BindingError;

/// Shape a native parameter accepts
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeSpec {
    /// Any rank, any sizes
    #[default]
    Any,
    /// Fixed rank, any sizes
    Rank(usize),
    /// Fixed rank; `None` marks a dynamic dimension
    Dims(Vec<Option<usize>>),
}

impl ShapeSpec {
    /// Fixed-length vector
    pub fn vector(len: usize) -> Self {
        ShapeSpec::Dims(vec![Some(len)])
    }

    /// Vector of any length
    pub fn dyn_vector() -> Self {
        ShapeSpec::Dims(vec![None])
    }

    /// Fixed-size matrix
    pub fn matrix(rows: usize, cols: usize) -> Self {
        ShapeSpec::Dims(vec![Some(rows), Some(cols)])
    }

    /// Matrix of any size
    pub fn dyn_matrix() -> Self {
        ShapeSpec::Dims(vec![None, None])
    }

    /// Number of dimensions this spec requires, if fixed
    pub fn rank(&self) -> Option<usize> {
        match self {
            ShapeSpec::Any => None,
            ShapeSpec::Rank(n) => Some(*n),
            ShapeSpec::Dims(dims) => Some(dims.len()),
        }
    }

    /// Whether `shape` satisfies this spec. Zero-size dimensions never do.
    pub fn accepts(&self, shape: &[usize]) -> bool {
        if shape.contains(&0) {
            return false;
        }
        match self {
            ShapeSpec::Any => true,
            ShapeSpec::Rank(n) => shape.len() == *n,
            ShapeSpec::Dims(dims) => {
                dims.len() == shape.len()
                    && dims
                        .iter()
                        .zip(shape)
                        .all(|(want, &got)| want.map_or(true, |w| w == got))
            }
        }
    }

    /// Fail with a shape-mismatch error unless `shape` satisfies this spec
    pub fn check(&self, shape: &[usize]) -> Result<(), BindingError> {
        if self.accepts(shape) {
            Ok(())
        } else {
            Err(BindingError::ShapeMismatch {
                expected: self.to_string(),
                actual: shape.to_vec(),
            })
        }
    }
}

impl fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeSpec::Any => f.write_str("any shape"),
            ShapeSpec::Rank(n) => write!(f, "rank {}", n),
            ShapeSpec::Dims(dims) => {
                let parts: Vec<String> = dims
                    .iter()
                    .map(|d| d.map_or_else(|| "n".to_string(), |v| v.to_string()))
                    .collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_dynamic_dims() {
        assert!(ShapeSpec::vector(3).accepts(&[3]));
        assert!(!ShapeSpec::vector(3).accepts(&[4]));
        assert!(!ShapeSpec::vector(3).accepts(&[3, 1]));
        assert!(ShapeSpec::dyn_vector().accepts(&[17]));
        assert!(ShapeSpec::matrix(4, 4).accepts(&[4, 4]));
        assert!(ShapeSpec::Rank(3).accepts(&[2, 2, 2]));
        assert!(!ShapeSpec::Rank(3).accepts(&[8]));
        assert!(ShapeSpec::Any.accepts(&[]));
    }

    #[test]
    fn zero_size_dims_are_refused() {
        assert!(!ShapeSpec::Any.accepts(&[0]));
        assert!(!ShapeSpec::dyn_vector().accepts(&[0]));
        assert!(!ShapeSpec::Rank(3).accepts(&[2, 0, 2]));
        assert!(matches!(
            ShapeSpec::Rank(3).check(&[2, 0, 2]),
            Err(BindingError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn check_reports_expected_and_actual() {
        let err = ShapeSpec::matrix(3, 3).check(&[3, 4]).unwrap_err();
        match err {
            BindingError::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, "(3, 3)");
                assert_eq!(actual, vec![3, 4]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display() {
        assert_eq!(ShapeSpec::dyn_matrix().to_string(), "(n, n)");
        assert_eq!(ShapeSpec::Rank(2).to_string(), "rank 2");
    }
}
