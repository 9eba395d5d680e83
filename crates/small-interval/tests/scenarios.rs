use small_interval::{Bound, IntervalValue, interval_analysis};
use small_test_utils::programs::{self, parse};

fn value_at(
    result: &small_analysis::AnalysisResult<IntervalValue>,
    line: usize,
    name: &str,
) -> IntervalValue {
    let env = result
        .at_line(line)
        .unwrap_or_else(|| panic!("line {line} was not reached"));
    *env.get(name)
        .unwrap_or_else(|| panic!("{name} is unbound at line {line}"))
}

#[test]
fn test_factorial_bounds() {
    let function = parse(programs::FAC);
    let result = interval_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 4, "i"), IntervalValue::int(0, Bound::PosInf));
    assert_eq!(value_at(&result, 4, "f"), IntervalValue::int(1, Bound::PosInf));
    assert_eq!(value_at(&result, 8, "f"), IntervalValue::int(1, Bound::PosInf));
    assert_eq!(value_at(&result, 4, "n"), IntervalValue::Top);
}

#[test]
fn test_sum_widens_both_accumulators() {
    let function = parse(programs::SUM);
    let result = interval_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 4, "i"), IntervalValue::int(0, Bound::PosInf));
    assert_eq!(value_at(&result, 4, "sum"), IntervalValue::int(0, Bound::PosInf));
    assert_eq!(value_at(&result, 8, "sum"), IntervalValue::int(0, Bound::PosInf));
}

#[test]
fn test_loop_exit_narrows_counter() {
    let function = parse(
        "\
function count() {
    i = 0;
    while (i < 10) {
        i = i + 1;
    }
    return i;
}
",
    );
    let result = interval_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 3, "i"), IntervalValue::int(0, Bound::PosInf));
    assert_eq!(value_at(&result, 4, "i"), IntervalValue::int(1, 10));
    assert_eq!(value_at(&result, 6, "i"), IntervalValue::int(10, Bound::PosInf));
}

#[test]
fn test_infeasible_branch_is_unreached() {
    let function = parse(programs::SIMPLE_IF);
    let result = interval_analysis().run(&function).unwrap();

    assert_eq!(value_at(&result, 2, "b"), IntervalValue::constant(-5));
    assert!(result.at_line(4).is_none());
    assert_eq!(value_at(&result, 6, "c"), IntervalValue::Top);
    assert_eq!(value_at(&result, 8, "b"), IntervalValue::constant(-5));
}

#[test]
fn test_false_condition_is_unreached() {
    let function = parse(programs::UNREACHABLE);
    let result = interval_analysis().run(&function).unwrap();

    assert!(result.at_line(3).is_none());
    assert_eq!(value_at(&result, 7, "c"), IntervalValue::constant(0));
    assert_eq!(value_at(&result, 7, "b"), IntervalValue::Top);
}

#[test]
fn test_every_sample_terminates() {
    for (name, src) in programs::ALL {
        let function = parse(src);
        let result = interval_analysis().run(&function);
        assert!(result.is_ok(), "{name}: {result:?}");
    }
}
