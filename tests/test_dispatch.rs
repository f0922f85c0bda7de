//! Integration tests: overload resolution, keywords and defaults

mod common;

use common::*;
use hello_bindings::prelude::*;

fn int(v: i64) -> Value {
    Value::Int(v)
}

fn kw(name: &str, value: impl Into<Value>) -> (String, Value) {
    (name.to_string(), value.into())
}

// ============================================================================
// add
// ============================================================================

#[test]
fn add_positional_named_and_defaults() {
    let m = test_module();
    assert_eq!(m.call("add", vec![int(1), int(3)]).unwrap().as_int(), Some(4));
    assert_eq!(
        m.call_kw("add", vec![], vec![kw("i", 1_i64), kw("j", 3_i64)]).unwrap().as_int(),
        Some(4)
    );
    assert_eq!(m.call("add", vec![]).unwrap().as_int(), Some(3));
    assert_eq!(m.call("add", vec![int(5)]).unwrap().as_int(), Some(7));
    assert_eq!(m.call_kw("add", vec![], vec![kw("j", 10_i64)]).unwrap().as_int(), Some(11));
}

#[test]
fn add_signatures_are_listed_in_registration_order() {
    let m = test_module();
    let signatures: Vec<String> = m.overloads("add").unwrap().iter().map(Overload::signature).collect();
    assert_eq!(signatures[0], "(arg0: int, arg1: int) -> int");
    assert_eq!(signatures[1], "(i: int, j: int) -> int");
    assert_eq!(signatures[4], "(i: int = 1, j: int = 2) -> int");
}

#[test]
fn add_refuses_strings_with_every_signature() {
    let m = test_module();
    let err = m.call("add", vec![Value::from("a"), int(1)]).unwrap_err();
    match &err {
        BindingError::NoMatchingOverload { name, signatures } => {
            assert_eq!(name, "add");
            assert_eq!(signatures.len(), 5);
        }
        other => panic!("unexpected error: {other}"),
    }
    let msg = err.to_string();
    assert!(msg.starts_with("add(): incompatible function arguments"));
    assert!(msg.contains("1. (arg0: int, arg1: int) -> int"));
}

// ============================================================================
// mult
// ============================================================================

#[test]
fn mult_prefers_int_overloads() {
    let m = test_module();
    assert_eq!(m.call("mult", vec![]).unwrap().as_int(), Some(8));
    assert_eq!(m.call("mult", vec![int(2), int(3)]).unwrap().as_int(), Some(6));
    assert!(matches!(m.call("mult", vec![int(2), int(3)]).unwrap(), Value::Int(6)));
}

#[test]
fn mult_falls_back_to_floats() {
    let m = test_module();
    let exact = m.call("mult", vec![Value::Float(2.5), Value::Float(2.0)]).unwrap();
    assert!(matches!(exact, Value::Float(v) if v == 5.0));

    let converted = m
        .call_kw("mult", vec![], vec![kw("x", 1.5), kw("y", 2_i64)])
        .unwrap();
    assert!(matches!(converted, Value::Float(v) if v == 3.0));
    assert_eq!(converted.to_string(), "3.0");
}

#[test]
fn strict_module_skips_the_conversion_pass() {
    let m = strict_module();
    let err = m.call("mult", vec![Value::Float(2.0), int(3)]).unwrap_err();
    assert!(matches!(err, BindingError::NoMatchingOverload { ref signatures, .. } if signatures.len() == 4));
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn by_value_arrays_convert_only_in_second_pass() {
    let q = f64_vector(&[0.0, 0.0, 0.0, 1.0]);

    let out = test_module().call("eig_quatf_mult", vec![arr(&q), arr(&q)]).unwrap();
    let out = out.as_array().unwrap();
    assert_eq!(out.dtype(), DType::F32);
    assert_eq!(out.to_vec::<f32>().unwrap(), vec![0.0, 0.0, 0.0, 1.0]);

    let err = strict_module().call("eig_quatf_mult", vec![arr(&q), arr(&q)]).unwrap_err();
    assert!(matches!(
        err,
        BindingError::TypeMismatch {
            expected: DType::F32,
            actual: DType::F64
        }
    ));
}

#[test]
fn no_convert_array_parameter_skips_the_cast() {
    let mut m = test_module();
    let spec = ParamType::array(ParamKind::Value, DType::F32, ShapeSpec::dyn_vector());
    m.def(
        "sum_f",
        Overload::new(vec![Param::named("v", spec).no_convert()], |a| {
            let v: ndarray::Array1<f32> = a.load(0)?;
            Ok(Value::Float(f64::from(v.sum())))
        }),
    );

    let exact = m.call("sum_f", vec![arr(&f32_vector(&[1.0, 2.0]))]).unwrap();
    assert!(matches!(exact, Value::Float(v) if v == 3.0));

    let err = m.call("sum_f", vec![arr(&f64_vector(&[1.0, 2.0]))]).unwrap_err();
    assert!(matches!(
        err,
        BindingError::TypeMismatch {
            expected: DType::F32,
            actual: DType::F64
        }
    ));
}

#[test]
fn scalar_for_array_is_an_invalid_argument() {
    let m = test_module();
    let err = m.call("eig_inplace_multiply_d", vec![int(1), Value::Float(2.0)]).unwrap_err();
    assert!(matches!(err, BindingError::InvalidArgument(_)));
}

// ============================================================================
// Binding errors and lookup
// ============================================================================

#[test]
fn arity_errors() {
    let m = test_module();
    assert!(m.call("eig_cref", vec![]).is_err());
    assert!(m
        .call("eig_cref", vec![arr(&f32_vector(&[1.0, 2.0, 3.0])), Value::Float(1.0), int(1)])
        .is_err());
}

#[test]
fn attributes_and_unknown_names() {
    let m = test_module();
    assert_eq!(m.attr("the_answer").unwrap().as_int(), Some(42));
    assert_eq!(m.attr("what").unwrap().as_str(), Some("World"));
    assert!(matches!(m.attr("nope"), Err(BindingError::UnknownAttribute(_))));
    assert!(matches!(m.call("nope", vec![]), Err(BindingError::UnknownFunction(_))));
}

#[test]
fn cli_literals_parse_to_the_narrowest_value() {
    assert!(matches!(Value::parse_literal("3"), Value::Int(3)));
    assert!(matches!(Value::parse_literal("2.5"), Value::Float(v) if v == 2.5));
    assert!(matches!(Value::parse_literal("True"), Value::Bool(true)));
    assert!(Value::parse_literal("None").is_none());
    assert_eq!(Value::parse_literal("World").as_str(), Some("World"));
}
