//! Error type shared by the buffer model, the exchange layer and the dispatcher.

use crate::buffer::DType;
use thiserror::Error;

/// Errors raised at the binding boundary
///
/// Every error is local to the call that produced it. Nothing is retried and
/// no partial conversion is left behind.
#[derive(Error, Debug)]
pub enum BindingError {
    /// Element type does not match a reference-kind parameter, or a by-value
    /// parameter while conversion is disabled
    #[error(
        "type mismatch: expected {expected} elements, got {actual} \
         (element types are only converted across a by-value copy)"
    )]
    TypeMismatch {
        /// Element type the native side requires
        expected: DType,
        /// Element type the host supplied
        actual: DType,
    },

    /// Write attempted through a read-only array
    #[error("assignment destination is read-only")]
    MutationOnImmutable,

    /// Rank or dimension sizes do not match the declared shape
    #[error("shape mismatch: expected {expected}, got {actual:?}")]
    ShapeMismatch {
        /// Declared shape, rendered for humans
        expected: String,
        /// Shape the host supplied
        actual: Vec<usize>,
    },

    /// Element index outside the array bounds
    #[error("index {index:?} is out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        /// Requested index
        index: Vec<usize>,
        /// Array shape
        shape: Vec<usize>,
    },

    /// Storage is already borrowed in a conflicting way by an in-flight call
    #[error("storage is already borrowed by another argument of this call")]
    BorrowConflict,

    /// Resize requested while other handles alias the storage
    #[error("cannot resize an array that is referenced by {references} other handle(s)")]
    ResizeShared {
        /// Number of other handles aliasing the storage
        references: usize,
    },

    /// Resize requested on a view
    #[error("cannot resize this array: it does not own its data")]
    NotOwner,

    /// Scalar argument of the wrong kind, or an arity error
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No registered overload accepts the supplied arguments
    #[error("{name}(): incompatible function arguments. The following argument types are supported:\n{}", format_signatures(.signatures))]
    NoMatchingOverload {
        /// Function name
        name: String,
        /// Signature of every registered overload, in registration order
        signatures: Vec<String>,
    },

    /// Function is not registered in the module
    #[error("module has no function `{0}`")]
    UnknownFunction(String),

    /// Attribute is not registered in the module
    #[error("module has no attribute `{0}`")]
    UnknownAttribute(String),

    /// Configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

fn format_signatures(signatures: &[String]) -> String {
    signatures
        .iter()
        .enumerate()
        .map(|(i, s)| format!("    {}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(feature = "python")]
impl From<BindingError> for pyo3::PyErr {
    fn from(err: BindingError) -> Self {
        use pyo3::exceptions::{PyAttributeError, PyTypeError, PyValueError};
        match err {
            BindingError::TypeMismatch { .. } | BindingError::NoMatchingOverload { .. } => {
                PyTypeError::new_err(err.to_string())
            }
            BindingError::UnknownAttribute(_) => PyAttributeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_both_types() {
        let err = BindingError::TypeMismatch {
            expected: DType::F32,
            actual: DType::F64,
        };
        let msg = err.to_string();
        assert!(msg.contains("float32"));
        assert!(msg.contains("float64"));
    }

    #[test]
    fn no_matching_overload_lists_signatures() {
        let err = BindingError::NoMatchingOverload {
            name: "mult".to_string(),
            signatures: vec!["(i: int, j: int) -> int".into(), "(x: float, y: float) -> float".into()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("mult(): incompatible function arguments"));
        assert!(msg.contains("1. (i: int, j: int) -> int"));
        assert!(msg.contains("2. (x: float, y: float) -> float"));
    }
}
