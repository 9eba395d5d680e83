use small_analysis::AnalysisResult;
use small_test_utils::programs::{self, parse};
use small_zero::{ZeroValue, zero_analysis};

fn value_at(result: &AnalysisResult<ZeroValue>, line: usize, name: &str) -> ZeroValue {
    let env = result
        .at_line(line)
        .unwrap_or_else(|| panic!("line {line} was not reached"));
    *env.get(name)
        .unwrap_or_else(|| panic!("{name} is unbound at line {line}"))
}

#[test]
fn test_simple_if() {
    let function = parse(programs::SIMPLE_IF);
    let result = zero_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 2, "b"), ZeroValue::NZ);
    assert_eq!(value_at(&result, 4, "c"), ZeroValue::U);
    assert_eq!(value_at(&result, 8, "b"), ZeroValue::NZ);
    assert_eq!(value_at(&result, 8, "c"), ZeroValue::U);
}

#[test]
fn test_sum_loses_precision_in_loop() {
    let function = parse(programs::SUM);
    let result = zero_analysis().run(&function).unwrap();

    for line in [4, 8] {
        assert_eq!(value_at(&result, line, "i"), ZeroValue::U, "line {line}");
        assert_eq!(value_at(&result, line, "sum"), ZeroValue::U, "line {line}");
    }
    assert!(result.iterations() < 50, "took {}", result.iterations());
}

#[test]
fn test_false_branch_is_unreached() {
    let function = parse(programs::UNREACHABLE);
    let result = zero_analysis().run(&function).unwrap();

    assert!(result.at_line(3).is_none());
    assert_eq!(value_at(&result, 5, "c"), ZeroValue::Z);
    assert_eq!(value_at(&result, 7, "c"), ZeroValue::Z);
    assert_eq!(value_at(&result, 7, "b"), ZeroValue::U);
}

#[test]
fn test_condition_narrows_branch() {
    let function = parse(
        "\
function main(x) {
    if (x == 0) {
        y = x;
    } else {
        y = x;
    }
    return y;
}
",
    );
    let result = zero_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 3, "y"), ZeroValue::Z);
    assert_eq!(value_at(&result, 5, "y"), ZeroValue::NZ);
    assert_eq!(value_at(&result, 7, "y"), ZeroValue::U);
    assert_eq!(
        result.input_at_line(3).and_then(|env| env.get("x")).copied(),
        Some(ZeroValue::Z)
    );
}

#[test]
fn test_every_sample_terminates() {
    for (name, src) in programs::ALL {
        let function = parse(src);
        let result = zero_analysis().run(&function);
        assert!(result.is_ok(), "{name}: {result:?}");
    }
}

#[test]
fn test_step_recording() {
    let function = parse(programs::UNREACHABLE);
    let result = zero_analysis().with_steps(true).run(&function).unwrap();

    assert!(!result.steps().is_empty());
    assert!(result.steps().iter().any(|step| step.rule == "Infeasible"));
    assert!(result.steps().iter().any(|step| step.rule == "Assignment(ZeroConstant)"));
}
