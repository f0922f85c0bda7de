//! Plain function demos: named arguments, defaults, overloads and module
//! attributes.

use crate::dispatch::{CallArgs, Module, Overload, Param, ParamType, Value};
use crate::error::BindingError;

/// Value of the `the_answer` module attribute
pub const THE_ANSWER: i64 = 42;

/// Value of the `what` module attribute
pub const WHAT: &str = "World";

/// Add two integers
pub fn add(i: i64, j: i64) -> i64 {
    i.wrapping_add(j)
}

/// Multiply two integers
pub fn mult(i: i64, j: i64) -> i64 {
    tracing::trace!("functions::mult-int");
    i.wrapping_mul(j)
}

/// Multiply two floats
pub fn multd(x: f64, y: f64) -> f64 {
    tracing::trace!("functions::multd-double");
    x * y
}

/// An integer or a float, for callers that overload on the argument's type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer operand
    Int(i64),
    /// Float operand
    Float(f64),
}

impl Number {
    /// Widen to f64
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// `mult` over either operand type: integer when both are integers,
/// float otherwise
pub fn mult_number(a: Number, b: Number) -> Number {
    match (a, b) {
        (Number::Int(i), Number::Int(j)) => Number::Int(mult(i, j)),
        _ => Number::Float(multd(a.to_f64(), b.to_f64())),
    }
}

/// Register `add`, `mult` and the module attributes
pub fn register(m: &mut Module) {
    register_add(m);
    register_mult(m);
    m.add_attr("the_answer", THE_ANSWER);
    m.add_attr("what", WHAT);
}

fn add_handler() -> impl Fn(&CallArgs<'_>) -> Result<Value, BindingError> {
    |args: &CallArgs<'_>| Ok(Value::Int(add(args.int(0)?, args.int(1)?)))
}

fn mult_handler() -> impl Fn(&CallArgs<'_>) -> Result<Value, BindingError> {
    |args: &CallArgs<'_>| Ok(Value::Int(mult(args.int(0)?, args.int(1)?)))
}

fn register_add(m: &mut Module) {
    const DOC: &str = "A function that adds two numbers";
    let named = || vec![Param::named("i", ParamType::Int), Param::named("j", ParamType::Int)];
    let defaults = || {
        vec![
            Param::named("i", ParamType::Int).with_default(1),
            Param::named("j", ParamType::Int).with_default(2),
        ]
    };

    // positional only
    m.def(
        "add",
        Overload::new(
            vec![Param::positional(ParamType::Int), Param::positional(ParamType::Int)],
            add_handler(),
        )
        .doc(DOC)
        .returns("int"),
    );
    // named, registered twice as the long and the shorthand spelling
    for params in [named(), named()] {
        m.def("add", Overload::new(params, add_handler()).doc(DOC).returns("int"));
    }
    for params in [defaults(), defaults()] {
        m.def("add", Overload::new(params, add_handler()).doc(DOC).returns("int"));
    }
}

fn register_mult(m: &mut Module) {
    const DOC: &str = "Multiply 2 ints";
    m.def(
        "mult",
        Overload::new(
            vec![Param::positional(ParamType::Int), Param::positional(ParamType::Int)],
            mult_handler(),
        )
        .doc(DOC)
        .returns("int"),
    );
    m.def(
        "mult",
        Overload::new(
            vec![Param::named("i", ParamType::Int), Param::named("j", ParamType::Int)],
            mult_handler(),
        )
        .doc(DOC)
        .returns("int"),
    );
    m.def(
        "mult",
        Overload::new(
            vec![
                Param::named("i", ParamType::Int).with_default(2),
                Param::named("j", ParamType::Int).with_default(4),
            ],
            mult_handler(),
        )
        .doc(DOC)
        .returns("int"),
    );
    // registered last: int arguments bind to an int overload before this one
    m.def(
        "mult",
        Overload::new(
            vec![Param::named("x", ParamType::Float), Param::named("y", ParamType::Float)],
            |args| Ok(Value::Float(multd(args.float(0)?, args.float(1)?))),
        )
        .doc("Multiply 2 doubles")
        .returns("float"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mult_number_keeps_ints_integral() {
        assert_eq!(mult_number(Number::Int(2), Number::Int(3)), Number::Int(6));
        assert_eq!(mult_number(Number::Int(2), Number::Float(1.5)), Number::Float(3.0));
    }

    #[test]
    fn add_wraps_instead_of_panicking() {
        assert_eq!(add(i64::MAX, 1), i64::MIN);
    }
}
