use std::rc::Rc;

use pl::ast::Expression;
use pl::samples;
use pl::typed::{
    Bool, Fun, HostFn, HostFunction, HostValue, Num, RuntimeError, SomeTypedExpr,
    TypedEnvironment, TypedExpr, Witnessed, interpret_erased, interpret_typed, typing,
};
use pl::types::{Type, TypeEnvironment, TypeError};

fn make_env() -> TypedEnvironment {
    TypedEnvironment::empty()
}

fn produce(expr: &Expression) -> SomeTypedExpr {
    let (typed, _) = typing(expr, &TypeEnvironment::empty()).unwrap();
    typed
}

#[test]
fn typed_range_sum_from_producer() {
    let typed = produce(&samples::range_sum()).cast::<Num>().unwrap();
    assert_eq!(interpret_typed(&typed, &make_env()), Ok(55));
}

#[test]
fn typed_deep_recursion() {
    let program = samples::range_sum_to(10_000);
    let typed = produce(&program);
    assert_eq!(
        interpret_erased(&typed, &make_env()),
        Ok(HostValue::Number(50_005_000))
    );

    let typed = typed.cast::<Num>().unwrap();
    assert_eq!(interpret_typed(&typed, &make_env()), Ok(50_005_000));
}

#[test]
fn typed_range_sum_built_by_hand() {
    let lower = || TypedExpr::<Num>::reference("lower");
    let upper = || TypedExpr::<Num>::reference("upper");
    let sum = || TypedExpr::<Fun<Num, Fun<Num, Num>>>::reference("sum");

    let recurse = TypedExpr::apply(
        TypedExpr::apply(sum(), TypedExpr::add(lower(), TypedExpr::number(1))),
        upper(),
    );
    let body = TypedExpr::conditional(
        TypedExpr::greater_than(lower(), upper()),
        TypedExpr::number(0),
        TypedExpr::add(lower(), recurse),
    );
    let function: TypedExpr<Fun<Num, Fun<Num, Num>>> =
        TypedExpr::function("lower", TypedExpr::function("upper", body));
    let program: TypedExpr<Num> = TypedExpr::recursive_binding(
        "sum",
        function,
        TypedExpr::apply(
            TypedExpr::apply(sum(), TypedExpr::number(1)),
            TypedExpr::number(10),
        ),
    );

    assert_eq!(interpret_typed(&program, &make_env()), Ok(55));
    assert_eq!(program.to_expression(), samples::range_sum());
}

#[test]
fn typed_static_scoping_and_closures() {
    let scoping = produce(&samples::static_scoping());
    assert_eq!(interpret_erased(&scoping, &make_env()), Ok(HostValue::Number(3)));

    let capture = produce(&samples::closure_capture());
    assert_eq!(interpret_erased(&capture, &make_env()), Ok(HostValue::Number(4)));

    let twice = produce(&samples::higher_order());
    assert_eq!(interpret_erased(&twice, &make_env()), Ok(HostValue::Number(16)));
}

#[test]
fn typed_function_result_is_host_closure() {
    let expr = Expression::function(
        "x",
        Type::Num,
        Expression::add(Expression::reference("x"), Expression::number(1)),
    );
    let inc = produce(&expr).cast::<Fun<Num, Num>>().unwrap();
    let host = interpret_typed(&inc, &make_env()).unwrap();
    assert_eq!(host(1), Ok(2));
    assert_eq!(host(-5), Ok(-4));
}

#[test]
fn typed_calls_host_function_from_environment() {
    let double: HostFn<i64, i64> = Rc::new(|n| Ok(n * 2));
    let env = make_env()
        .bind_host::<Fun<Num, Num>>("double", double)
        .bind_host::<Num>("seed", 21);

    let expr = Expression::apply(Expression::reference("double"), Expression::reference("seed"));
    let (typed, ty) = typing(&expr, &env.type_environment()).unwrap();

    assert_eq!(ty, Type::Num);
    assert_eq!(interpret_erased(&typed, &env), Ok(HostValue::Number(42)));
}

#[test]
fn typed_host_function_result_checked_against_its_type() {
    let num_to_num = Type::function(Type::Num, Type::Num);
    let broken = HostFunction::new(num_to_num.clone(), |_| Ok(HostValue::Boolean(true)));
    let env = make_env().bind("f", Witnessed::new(HostValue::Function(broken), num_to_num));

    let expr = Expression::apply(Expression::reference("f"), Expression::number(1));
    let (typed, ty) = typing(&expr, &env.type_environment()).unwrap();
    assert_eq!(ty, Type::Num);

    let expected = Err(RuntimeError::WitnessMismatch {
        expected: Type::Num,
        found: Type::Bool,
        context: "application".to_string(),
    });
    assert_eq!(interpret_erased(&typed, &env), expected);

    let typed = typed.cast::<Num>().unwrap();
    assert_eq!(interpret_typed(&typed, &env), expected.map(|_| 0));
}

#[test]
fn typed_cast_to_wrong_index() {
    let some = produce(&Expression::number(1));
    assert_eq!(
        some.cast::<Bool>().unwrap_err(),
        TypeError::type_mismatch(Type::Bool, Type::Num)
    );
}

#[test]
fn typed_hand_built_reference_mismatch() {
    let env = make_env().bind_host::<Num>("x", 1);
    let expr: TypedExpr<Bool> = TypedExpr::conditional(
        TypedExpr::reference("x"),
        TypedExpr::boolean(true),
        TypedExpr::boolean(false),
    );

    let result = interpret_typed(&expr, &env);
    assert_eq!(
        result,
        Err(RuntimeError::WitnessMismatch {
            expected: Type::Bool,
            found: Type::Num,
            context: "reference to x".to_string(),
        })
    );
}

#[test]
fn typed_environment_inconsistent_with_types() {
    let env = make_env().bind_host::<Bool>("flag", true);
    let expr = Expression::add(Expression::reference("flag"), Expression::number(1));

    // Checked against a type environment that lies about `flag`
    let types = TypeEnvironment::empty().bind("flag", Type::Num);
    let (typed, _) = typing(&expr, &types).unwrap();

    assert!(matches!(
        interpret_erased(&typed, &env),
        Err(RuntimeError::WitnessMismatch { .. })
    ));
}

#[test]
fn typed_recursive_value_reading_itself() {
    let expr = Expression::recursive_binding(
        "f",
        Type::function(Type::Num, Type::Num),
        Expression::reference("f"),
        Expression::number(0),
    );
    let typed = produce(&expr);
    assert_eq!(
        interpret_erased(&typed, &make_env()),
        Err(RuntimeError::unbound_variable("f"))
    );
}

#[test]
fn typed_untaken_branch_is_never_evaluated() {
    let env = make_env();
    // Reference claims Num but nothing is bound; the branch must not run
    let expr: TypedExpr<Num> = TypedExpr::conditional(
        TypedExpr::boolean(true),
        TypedExpr::number(1),
        TypedExpr::reference("undefined"),
    );
    assert_eq!(interpret_typed(&expr, &env), Ok(1));
}

#[test]
fn typing_rejects_what_checker_rejects() {
    let err = typing(&samples::ill_typed_addition(), &TypeEnvironment::empty()).unwrap_err();
    assert_eq!(
        err,
        TypeError::type_mismatch(Type::Num, Type::Bool).with_context("addition")
    );
}

#[test]
fn typed_display_matches_source() {
    let typed = produce(&samples::maximum());
    assert_eq!(typed.to_string(), samples::maximum().to_string());
}
