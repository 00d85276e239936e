use approx::assert_relative_eq;
use numeris::{Approximation, ErrorKind, Method, Outcome, Params, Registry, Value};

fn run(method: &str, params: &[(&str, &str)]) -> Outcome {
    let params: Params = params.iter().copied().collect();
    Registry::default().run(method, &params)
}

fn root(outcome: &Outcome) -> f64 {
    match outcome.value {
        Value::Root { root } => root,
        ref other => panic!("expected a root, got {other:?}"),
    }
}

fn vector(outcome: &Outcome) -> (Vec<f64>, f64) {
    match &outcome.value {
        Value::Vector {
            solution,
            spectral_radius,
        } => (solution.clone(), spectral_radius.expect("radius is computable")),
        other => panic!("expected a vector, got {other:?}"),
    }
}

fn coefficients(outcome: &Outcome) -> Vec<f64> {
    match &outcome.value {
        Value::Polynomial { coefficients, .. } => coefficients.clone(),
        other => panic!("expected a polynomial, got {other:?}"),
    }
}

#[test]
fn bracketing_root_is_small_or_iterations_are_exhausted() {
    let cases = [
        ("x^3 - x - 2", "1", "2"),
        ("exp(x) - 3", "0", "2"),
        ("sin(x)", "3", "4"),
        ("x^2 - 2", "0", "2"),
    ];
    for method in ["bisection", "regula_falsi"] {
        for (f, a, b) in cases {
            let outcome = run(
                method,
                &[
                    ("function_f", f),
                    ("a", a),
                    ("b", b),
                    ("tolerance", "1e-9"),
                    ("max_iterations", "25"),
                ],
            );
            assert!(outcome.is_successful, "{method} on {f}");
            if outcome.have_solution {
                let x = root(&outcome);
                let fx = numeris_expr::evaluate(f, x).unwrap();
                assert!(fx.abs() < 1e-6, "{method} on {f}: f({x}) = {fx}");
            } else {
                assert_eq!(outcome.trace.len(), 25, "{method} on {f}");
            }
        }
    }
}

#[test]
fn newton_finds_sqrt_two_quickly() {
    let outcome = run(
        "newton_raphson",
        &[
            ("function_f", "x^2 - 2"),
            ("x0", "1.5"),
            ("tolerance", "1e-6"),
            ("max_iterations", "100"),
        ],
    );

    assert!(outcome.have_solution);
    assert_relative_eq!(root(&outcome), 1.414_213_56, epsilon = 1e-6);
    assert!(outcome.trace.len() < 10);
}

#[test]
fn bisection_finds_two() {
    let outcome = run(
        "bisection",
        &[
            ("function_f", "x^2 - 4"),
            ("a", "0"),
            ("b", "10"),
            ("tolerance", "1e-4"),
            ("max_iterations", "100"),
        ],
    );

    assert!(outcome.is_successful);
    assert!(outcome.have_solution);
    assert_relative_eq!(root(&outcome), 2.0, epsilon = 1e-4);
}

#[test]
fn deeply_nested_function_is_a_syntax_failure() {
    let nested = format!("{}x", "-".repeat(10_000));
    let outcome = run(
        "newton_raphson",
        &[
            ("function_f", nested.as_str()),
            ("x0", "1"),
            ("tolerance", "1e-6"),
            ("max_iterations", "50"),
        ],
    );

    assert_eq!(outcome.failure, Some(ErrorKind::Syntax));
    assert!(!outcome.is_successful);
    assert!(outcome.trace.is_empty());
}

#[test]
fn same_sign_interval_is_rejected_before_iterating() {
    let outcome = run(
        "bisection",
        &[
            ("function_f", "x^2 - 4"),
            ("a", "1"),
            ("b", "2"),
            ("tolerance", "1e-4"),
            ("max_iterations", "100"),
        ],
    );

    assert_eq!(outcome.failure, Some(ErrorKind::InvalidInterval));
    assert!(!outcome.is_successful);
    assert!(!outcome.have_solution);
    assert!(outcome.trace.is_empty());
}

#[test]
fn iterative_solvers_converge_on_dominant_system() {
    let system = [
        ("matrix_a", "4 1; 2 5"),
        ("vector_b", "1 2"),
        ("initial_guess", "0 0"),
        ("tolerance", "1e-10"),
        ("max_iterations", "500"),
        ("w", "1.05"),
    ];

    let mut iterations = Vec::new();
    for method in ["jacobi", "gauss_seidel", "sor"] {
        let outcome = run(method, &system);
        assert!(outcome.have_solution, "{method}: {}", outcome.message);

        let (x, rho) = vector(&outcome);
        assert!(rho < 1.0, "{method}: spectral radius {rho}");
        assert_relative_eq!(x[0], 1.0 / 6.0, epsilon = 1e-9);
        assert_relative_eq!(x[1], 1.0 / 3.0, epsilon = 1e-9);
        iterations.push(outcome.trace.len());
    }
    assert!(iterations[1] <= iterations[0], "{iterations:?}");
}

#[test]
fn three_by_three_system_has_no_plot() {
    let outcome = run(
        "gauss_seidel",
        &[
            ("matrix_a", "[10 -1 2; -1 11 -1; 2 -1 10]"),
            ("vector_b", "[6, 25, -11]"),
            ("initial_guess", "[0, 0, 0]"),
            ("tolerance", "1e-12"),
            ("max_iterations", "200"),
        ],
    );

    assert!(outcome.have_solution);
    assert!(outcome.plot.is_none());
    let Some(record) = outcome.trace.last() else {
        panic!("trace is empty");
    };
    assert!(matches!(&record.approximation, Approximation::Vector(x) if x.len() == 3));
}

#[test]
fn polynomial_fits_agree() {
    let points = [("x", "-1 0 1.5 3"), ("y", "2 -1 0.5 4")];

    let fits: Vec<Vec<f64>> = ["vandermonde", "lagrange", "newton_divided"]
        .into_iter()
        .map(|method| coefficients(&run(method, &points)))
        .collect();

    for fit in &fits[1..] {
        assert_eq!(fit.len(), fits[0].len());
        for (a, b) in fit.iter().zip(&fits[0]) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }
}

#[test]
fn linear_spline_through_collinear_points_is_one_line() {
    let outcome = run("linear_spline", &[("x", "0 1 2"), ("y", "1 3 5")]);

    let Value::Piecewise { pieces } = &outcome.value else {
        panic!("expected pieces, got {:?}", outcome.value);
    };
    assert_eq!(pieces.len(), 2);
    for piece in pieces {
        assert_eq!(piece.expression, "2*x + 1");
    }
}

#[test]
fn duplicate_abscissa_is_rejected() {
    for method in Method::ALL.iter().filter(|m| m.family() == numeris::Family::Interpolation) {
        let outcome = run(method.name(), &[("x", "0 1 1"), ("y", "1 2 3")]);
        assert_eq!(
            outcome.failure,
            Some(ErrorKind::DuplicateAbscissa),
            "{method}"
        );
        assert!(outcome.plot.is_none());
    }
}

#[test]
fn identical_inputs_give_identical_outcomes() {
    let params = [
        ("function_f", "x^3 - 2*x - 5"),
        ("x0", "2"),
        ("x1", "3"),
        ("tolerance", "1e-12"),
        ("max_iterations", "50"),
        ("rounding", "significant_figures"),
    ];

    assert_eq!(run("secant", &params), run("secant", &params));
}

#[test]
fn outcome_serializes_to_json() {
    let outcome = run(
        "newton_raphson",
        &[
            ("function_f", "x^2 - 2"),
            ("x0", "1.5"),
            ("tolerance", "1e-6"),
            ("max_iterations", "100"),
        ],
    );
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["method"], "newton_raphson");
    assert_eq!(json["value"]["kind"], "root");
    assert_eq!(json["trace"][0]["iteration"], 1);
    assert!(json["trace"][0]["error"].is_null());
    assert_eq!(json["trace"][0]["columns"]["f'(x_prev)"], 3.0);
    assert!(json["failure"].is_null());

    let rejected = serde_json::to_value(run("sor", &[])).unwrap();
    assert_eq!(rejected["failure"], "input_validation");
}
