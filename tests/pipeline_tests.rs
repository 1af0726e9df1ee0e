use pl::interpreter::Value;
use pl::pipeline::{PipelineError, run};
use pl::samples::{self, SAMPLES};
use pl::typed::HostValue;
use pl::types::{Type, TypeError};

#[test]
fn run_range_sum() {
    let outcome = run(&samples::range_sum()).unwrap();
    assert_eq!(outcome.ty, Type::Num);
    assert_eq!(outcome.value, Value::Number(55));
    assert_eq!(outcome.typed_value, HostValue::Number(55));
}

#[test]
fn run_deep_recursion() {
    let outcome = run(&samples::range_sum_to(10_000)).unwrap();
    assert_eq!(outcome.value, Value::Number(50_005_000));
    assert_eq!(outcome.typed_value, HostValue::Number(50_005_000));
}

#[test]
fn run_expected_results() {
    let expected = [
        ("range-sum", 55),
        ("fibonacci", 144),
        ("static-scoping", 3),
        ("closure-capture", 4),
        ("shadowing", 2),
        ("higher-order", 16),
        ("maximum", 7),
    ];
    for (name, result) in expected {
        let sample = samples::find(name).unwrap();
        let outcome = run(&sample.program()).unwrap();
        assert_eq!(outcome.value, Value::Number(result), "{}", name);
        assert_eq!(outcome.typed_value.as_number(), Some(result), "{}", name);
    }
}

#[test]
fn run_stops_at_type_error() {
    let result = run(&samples::ill_typed_addition());
    if let Err(PipelineError::Type(err)) = result {
        assert_eq!(
            err,
            TypeError::type_mismatch(Type::Num, Type::Bool).with_context("addition")
        );
    } else {
        panic!("expected a type error, got {:?}", result);
    }
}

#[test]
fn run_rejects_untaken_unbound_branch() {
    let result = run(&samples::untaken_branch());
    assert!(matches!(
        result,
        Err(PipelineError::Type(TypeError::UnboundVariable { .. }))
    ));
}

#[test]
fn run_every_sample_either_checks_or_reports_type_error() {
    for sample in SAMPLES {
        match run(&sample.program()) {
            Ok(_) | Err(PipelineError::Type(_)) => {}
            Err(other) => panic!("{} failed after checking: {}", sample.name, other),
        }
    }
}

#[test]
fn pipeline_error_display() {
    let err = run(&samples::ill_typed_addition()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type error: type mismatch in addition: expected Num, found Bool"
    );
}
