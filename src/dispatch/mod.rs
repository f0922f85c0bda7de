//! Overload dispatch
//!
//! A [`Module`] maps a function name to an ordered list of [`Overload`]s.
//! A call is resolved once, at the boundary, in two passes:
//!
//! 1. every overload in registration order, without implicit conversion;
//! 2. if the module allows it, every overload again with conversion
//!    (int to float, element-type changes for by-value arrays).
//!
//! The first overload whose parameters bind is called. A function with a
//! single overload reports that overload's own error; otherwise the caller
//! gets the list of supported signatures.

mod param;
mod value;

pub use param::{ArrayParam, Param, ParamType};
pub use value::Value;

use std::collections::BTreeMap;

use ndarray::{ArrayView, ArrayViewMut, Dimension};

use crate::buffer::{Element, HostArray};
use crate::config::ModuleConfig;
use crate::error::BindingError;
use crate::exchange::{self, FromHost};

/// Native implementation behind an overload
pub type Handler = Box<dyn Fn(&CallArgs<'_>) -> Result<Value, BindingError>>;

/// One callable signature of a function
pub struct Overload {
    doc: String,
    params: Vec<Param>,
    returns: String,
    handler: Handler,
}

impl Overload {
    /// Overload with the given parameters
    pub fn new(
        params: Vec<Param>,
        handler: impl Fn(&CallArgs<'_>) -> Result<Value, BindingError> + 'static,
    ) -> Self {
        Overload {
            doc: String::new(),
            params,
            returns: "None".to_string(),
            handler: Box::new(handler),
        }
    }

    /// Set the doc string
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Set the displayed return type
    pub fn returns(mut self, returns: impl Into<String>) -> Self {
        self.returns = returns.into();
        self
    }

    /// Doc string
    pub fn doc_str(&self) -> &str {
        &self.doc
    }

    /// Declared parameters
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// `(i: int = 1, j: int = 2) -> int`
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| p.describe(i))
            .collect();
        format!("({}) -> {}", params.join(", "), self.returns)
    }

    fn bind(
        &self,
        args: &[Value],
        kwargs: &[(String, Value)],
        convert: bool,
    ) -> Result<Vec<Value>, BindingError> {
        if args.len() > self.params.len() {
            return Err(BindingError::InvalidArgument(format!(
                "takes {} positional argument(s) but {} were given",
                self.params.len(),
                args.len()
            )));
        }

        let mut slots: Vec<Option<&Value>> = vec![None; self.params.len()];
        for (slot, arg) in slots.iter_mut().zip(args) {
            *slot = Some(arg);
        }
        for (key, value) in kwargs {
            let index = self
                .params
                .iter()
                .position(|p| p.name == Some(key.as_str()))
                .ok_or_else(|| BindingError::InvalidArgument(format!("unexpected keyword argument `{}`", key)))?;
            if slots[index].is_some() {
                return Err(BindingError::InvalidArgument(format!(
                    "got multiple values for argument `{}`",
                    key
                )));
            }
            slots[index] = Some(value);
        }

        self.params
            .iter()
            .zip(slots)
            .enumerate()
            .map(|(i, (param, slot))| {
                let value = slot.or(param.default.as_ref()).ok_or_else(|| {
                    BindingError::InvalidArgument(format!("missing required argument `{}`", param.describe(i)))
                })?;
                param.coerce(i, value, convert)
            })
            .collect()
    }
}

/// Bound arguments handed to a [`Handler`]
pub struct CallArgs<'a> {
    params: &'a [Param],
    values: Vec<Value>,
    convert: bool,
}

impl<'a> CallArgs<'a> {
    /// Number of bound arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the overload takes no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether resolution happened in the conversion pass
    pub fn is_converting(&self) -> bool {
        self.convert
    }

    /// Bound value at `index`
    pub fn value(&self, index: usize) -> Result<&Value, BindingError> {
        self.values
            .get(index)
            .ok_or_else(|| BindingError::InvalidArgument(format!("no argument at position {}", index)))
    }

    /// Integer argument
    pub fn int(&self, index: usize) -> Result<i64, BindingError> {
        let value = self.value(index)?;
        value.as_int().ok_or_else(|| unexpected(index, "int", value))
    }

    /// Float argument
    pub fn float(&self, index: usize) -> Result<f64, BindingError> {
        let value = self.value(index)?;
        value.as_float().ok_or_else(|| unexpected(index, "float", value))
    }

    /// String argument
    pub fn str(&self, index: usize) -> Result<&str, BindingError> {
        let value = self.value(index)?;
        value.as_str().ok_or_else(|| unexpected(index, "str", value))
    }

    /// Array argument handle
    pub fn array(&self, index: usize) -> Result<&HostArray, BindingError> {
        let value = self.value(index)?;
        value.as_array().ok_or_else(|| unexpected(index, "ndarray", value))
    }

    /// Load a by-value array argument into a native type
    pub fn load<T: FromHost>(&self, index: usize) -> Result<T, BindingError> {
        let convert = self.convert && self.params.get(index).map_or(false, |p| p.convert);
        T::load(self.array(index)?, convert)
    }

    /// Pass a mutable-reference array argument to `f`
    pub fn with_mut<T: Element, D: Dimension, R>(
        &self,
        index: usize,
        f: impl FnOnce(ArrayViewMut<'_, T, D>) -> R,
    ) -> Result<R, BindingError> {
        exchange::with_mut_ref(self.array(index)?, &self.array_param(index)?.shape, f)
    }

    /// Pass a const-reference array argument to `f`
    pub fn with_ref<T: Element, D: Dimension, R>(
        &self,
        index: usize,
        f: impl FnOnce(ArrayView<'_, T, D>) -> R,
    ) -> Result<R, BindingError> {
        exchange::with_const_ref(self.array(index)?, &self.array_param(index)?.shape, f)
    }

    fn array_param(&self, index: usize) -> Result<&'a ArrayParam, BindingError> {
        match self.params.get(index).map(|p| &p.ty) {
            Some(ParamType::Array(spec)) => Ok(spec),
            _ => Err(BindingError::InvalidArgument(format!(
                "parameter {} is not declared as an array",
                index
            ))),
        }
    }
}

fn unexpected(index: usize, wanted: &str, got: &Value) -> BindingError {
    BindingError::InvalidArgument(format!(
        "argument {} should be {}, got {}",
        index,
        wanted,
        got.type_name()
    ))
}

/// A named collection of functions and attributes
pub struct Module {
    config: ModuleConfig,
    functions: BTreeMap<String, Vec<Overload>>,
    attrs: BTreeMap<String, Value>,
}

impl Module {
    /// Empty module
    pub fn new(config: ModuleConfig) -> Self {
        Module {
            config,
            functions: BTreeMap::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Module doc string
    pub fn doc(&self) -> &str {
        &self.config.doc
    }

    /// Active configuration
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Register an overload; later registrations of the same name are tried
    /// after earlier ones
    pub fn def(&mut self, name: &str, overload: Overload) -> &mut Self {
        self.functions.entry(name.to_string()).or_default().push(overload);
        self
    }

    /// Set a module attribute
    pub fn add_attr(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    /// Look up a module attribute
    pub fn attr(&self, name: &str) -> Result<&Value, BindingError> {
        self.attrs
            .get(name)
            .ok_or_else(|| BindingError::UnknownAttribute(name.to_string()))
    }

    /// Attributes in name order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Registered function names in name order
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Overloads of `name` in registration order
    pub fn overloads(&self, name: &str) -> Result<&[Overload], BindingError> {
        self.functions
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| BindingError::UnknownFunction(name.to_string()))
    }

    /// Call with positional arguments
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, BindingError> {
        self.call_kw(name, args, Vec::new())
    }

    /// Call with positional and keyword arguments
    pub fn call_kw(
        &self,
        name: &str,
        args: Vec<Value>,
        kwargs: Vec<(String, Value)>,
    ) -> Result<Value, BindingError> {
        let overloads = self.overloads(name)?;
        let passes: &[bool] = if self.config.implicit_conversion {
            &[false, true]
        } else {
            &[false]
        };

        let mut last_error = None;
        for &convert in passes {
            for (index, overload) in overloads.iter().enumerate() {
                match overload.bind(&args, &kwargs, convert) {
                    Ok(values) => {
                        tracing::trace!(function = name, overload = index, convert, "dispatching call");
                        let call = CallArgs {
                            params: &overload.params,
                            values,
                            convert,
                        };
                        return (overload.handler)(&call);
                    }
                    Err(err) => last_error = Some(err),
                }
            }
        }

        tracing::debug!(function = name, candidates = overloads.len(), "no overload accepted the arguments");
        match (overloads.len(), last_error) {
            (1, Some(err)) => Err(err),
            _ => Err(BindingError::NoMatchingOverload {
                name: name.to_string(),
                signatures: overloads.iter().map(Overload::signature).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> Module {
        let mut m = Module::new(ModuleConfig::default());
        m.def(
            "pick",
            Overload::new(vec![Param::named("v", ParamType::Int)], |_| Ok(Value::from("int"))).returns("str"),
        );
        m.def(
            "pick",
            Overload::new(vec![Param::named("v", ParamType::Float)], |_| Ok(Value::from("float"))).returns("str"),
        );
        m
    }

    #[test]
    fn exact_match_wins_before_conversion() {
        let m = module();
        assert_eq!(m.call("pick", vec![Value::Int(1)]).unwrap().as_str(), Some("int"));
        assert_eq!(m.call("pick", vec![Value::Float(1.0)]).unwrap().as_str(), Some("float"));
    }

    #[test]
    fn conversion_disabled_skips_second_pass() {
        let mut m = Module::new(ModuleConfig {
            implicit_conversion: false,
            ..ModuleConfig::default()
        });
        m.def(
            "half",
            Overload::new(vec![Param::positional(ParamType::Float)], |a| Ok(Value::Float(a.float(0)? / 2.0))),
        );
        assert!(m.call("half", vec![Value::Float(3.0)]).is_ok());
        assert!(m.call("half", vec![Value::Int(3)]).is_err());
    }

    #[test]
    fn failure_lists_every_signature() {
        let err = module().call("pick", vec![Value::from("x")]).unwrap_err();
        match err {
            BindingError::NoMatchingOverload { name, signatures } => {
                assert_eq!(name, "pick");
                assert_eq!(signatures, vec!["(v: int) -> str", "(v: float) -> str"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn keyword_binding_errors() {
        let m = module();
        assert!(m
            .call_kw("pick", vec![], vec![("w".into(), Value::Int(1))])
            .is_err());
        assert!(m
            .call_kw("pick", vec![Value::Int(1)], vec![("v".into(), Value::Int(1))])
            .is_err());
        assert_eq!(
            m.call_kw("pick", vec![], vec![("v".into(), Value::Int(1))]).unwrap().as_str(),
            Some("int")
        );
    }

    #[test]
    fn unknown_names() {
        let m = module();
        assert!(matches!(m.call("nope", vec![]), Err(BindingError::UnknownFunction(_))));
        assert!(matches!(m.attr("nope"), Err(BindingError::UnknownAttribute(_))));
    }
}
