//! Parameter declarations and argument coercion.

use std::fmt;

use super::Value;
use crate::buffer::DType;
use crate::error::BindingError;
use crate::exchange::{ParamKind, ShapeSpec};

/// Declared array parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayParam {
    /// Copy, mutable view or immutable view
    pub kind: ParamKind,
    /// Element type the native side works on
    pub dtype: DType,
    /// Accepted shape
    pub shape: ShapeSpec,
}

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamType {
    /// Integer
    Int,
    /// Float; accepts integers in the conversion pass
    Float,
    /// String
    Str,
    /// Boolean
    Bool,
    /// Numeric array
    Array(ArrayParam),
}

impl ParamType {
    /// Array parameter shorthand
    pub fn array(kind: ParamKind, dtype: DType, shape: ShapeSpec) -> Self {
        ParamType::Array(ArrayParam { kind, dtype, shape })
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Int => f.write_str("int"),
            ParamType::Float => f.write_str("float"),
            ParamType::Str => f.write_str("str"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Array(p) => write!(f, "ndarray[{} {}, {}]", p.dtype, p.shape, p.kind),
        }
    }
}

/// One parameter of an overload
#[derive(Debug, Clone)]
pub struct Param {
    /// Keyword name; unnamed parameters are positional-only
    pub name: Option<&'static str>,
    /// Declared type
    pub ty: ParamType,
    /// Value used when the caller omits the argument
    pub default: Option<Value>,
    /// Whether implicit conversion is allowed for this parameter
    pub convert: bool,
}

impl Param {
    /// Positional-only parameter
    pub fn positional(ty: ParamType) -> Self {
        Param {
            name: None,
            ty,
            default: None,
            convert: true,
        }
    }

    /// Parameter that can also be passed by keyword
    pub fn named(name: &'static str, ty: ParamType) -> Self {
        Param {
            name: Some(name),
            ..Self::positional(ty)
        }
    }

    /// Set the default value
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Forbid implicit conversion, even in the conversion pass
    pub fn no_convert(mut self) -> Self {
        self.convert = false;
        self
    }

    /// Rendering used in signatures: `i: int = 1`, `arg0: float`
    pub fn describe(&self, index: usize) -> String {
        let name = match self.name {
            Some(n) => n.to_string(),
            None => format!("arg{}", index),
        };
        match &self.default {
            Some(d) => format!("{}: {} = {}", name, self.ty, d),
            None => format!("{}: {}", name, self.ty),
        }
    }

    /// Check `value` against this parameter and produce the value the
    /// handler will see
    pub(crate) fn coerce(&self, index: usize, value: &Value, convert: bool) -> Result<Value, BindingError> {
        let convert = convert && self.convert;
        match (&self.ty, value) {
            (ParamType::Int, Value::Int(_))
            | (ParamType::Float, Value::Float(_))
            | (ParamType::Str, Value::Str(_))
            | (ParamType::Bool, Value::Bool(_)) => Ok(value.clone()),
            (ParamType::Float, Value::Int(v)) if convert => Ok(Value::Float(*v as f64)),
            (ParamType::Array(spec), Value::Array(array)) => {
                if array.dtype() != spec.dtype && !(convert && spec.kind.allows_conversion()) {
                    return Err(BindingError::TypeMismatch {
                        expected: spec.dtype,
                        actual: array.dtype(),
                    });
                }
                spec.shape.check(array.shape())?;
                if spec.kind == ParamKind::MutRef && !array.is_writable() {
                    return Err(BindingError::MutationOnImmutable);
                }
                Ok(value.clone())
            }
            (ty, other) => Err(BindingError::InvalidArgument(format!(
                "`{}` expects {}, got {}",
                self.name.map_or_else(|| format!("arg{}", index), str::to_string),
                ty,
                other.type_name()
            ))),
        }
    }
}
