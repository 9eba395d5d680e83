use small_cfg::{Cfg, EdgeCase};
use small_test_utils::programs::{self, parse};

fn edges(cfg: &Cfg) -> Vec<String> {
    cfg.edges()
        .map(|(source, target, edge)| {
            format!("{} -> {} {}", source.line(), target.line(), edge.case)
        })
        .collect()
}

fn point(cfg: &Cfg, line: usize) -> &small_cfg::ProgramPoint {
    cfg.point_at_line(line)
        .unwrap_or_else(|| panic!("no point at line {line}"))
}

#[test]
fn test_if_branches_rejoin() {
    let cfg = Cfg::build(&parse(programs::SIMPLE_IF));
    assert_eq!(
        edges(&cfg),
        [
            "2 -> 3 fallthrough",
            "3 -> 4 true",
            "3 -> 6 false",
            "4 -> 8 fallthrough",
            "6 -> 8 fallthrough",
        ]
    );
    assert_eq!(cfg.entry().map(|entry| entry.line()), Some(2));
}

#[test]
fn test_false_edge_carries_negated_condition() {
    let cfg = Cfg::build(&parse(programs::SIMPLE_IF));
    let guard = point(&cfg, 3);
    let conditions: Vec<_> = cfg
        .outgoing(guard)
        .into_iter()
        .map(|(_, edge)| (edge.case, edge.condition.to_string()))
        .collect();
    assert_eq!(
        conditions,
        [
            (EdgeCase::True, "b > 0".to_string()),
            (EdgeCase::False, "b <= 0".to_string()),
        ]
    );
}

#[test]
fn test_loop_body_returns_to_guard() {
    let cfg = Cfg::build(&parse(programs::SUM));
    let guard = point(&cfg, 4);

    assert!(cfg.is_loop_head(guard));
    assert!(!cfg.is_loop_head(point(&cfg, 5)));
    assert!(edges(&cfg).contains(&"6 -> 4 fallthrough".to_string()));

    let lines = |points: Vec<&small_cfg::ProgramPoint>| {
        let mut lines: Vec<_> = points.into_iter().map(|point| point.line()).collect();
        lines.sort();
        lines
    };
    assert_eq!(lines(cfg.predecessors(guard)), [3, 6]);
    assert_eq!(lines(cfg.successors(guard)), [5, 8]);

    let reached = cfg.reachable_from(point(&cfg, 5));
    assert!(reached.contains(guard));
    assert!(reached.contains(point(&cfg, 8)));
}

#[test]
fn test_nested_loops_have_separate_heads() {
    let cfg = Cfg::build(&parse(programs::NESTED_WHILE));
    assert!(cfg.is_loop_head(point(&cfg, 4)));
    assert!(cfg.is_loop_head(point(&cfg, 6)));

    let inner_exit: Vec<_> = cfg
        .outgoing(point(&cfg, 6))
        .into_iter()
        .map(|(target, edge)| (target.line(), edge.case))
        .collect();
    assert_eq!(inner_exit, [(7, EdgeCase::True), (10, EdgeCase::False)]);
}

#[test]
fn test_empty_else_matches_missing_else() {
    let with_else = Cfg::build(&parse(
        "\
function f(x) {
    if (x > 0) {
        y = 1;
    } else {}
    return y;
}
",
    ));
    let without_else = Cfg::build(&parse(
        "\
function f(x) {
    if (x > 0) {
        y = 1;
    }
    return y;
}
",
    ));
    assert_eq!(with_else.to_string(), without_else.to_string());
    assert_eq!(
        edges(&with_else),
        ["2 -> 3 true", "3 -> 5 fallthrough", "2 -> 5 false"]
    );
}

#[test]
fn test_return_is_a_dead_end() {
    let cfg = Cfg::build(&parse(
        "\
function f(x) {
    if (x > 0) {
        return 1;
    }
    return 0;
    y = 2;
}
",
    ));
    assert!(cfg.successors(point(&cfg, 3)).is_empty());
    let into_return: Vec<_> = cfg
        .predecessors(point(&cfg, 5))
        .into_iter()
        .map(|point| point.line())
        .collect();
    assert_eq!(into_return, [2]);

    let dead = point(&cfg, 6);
    assert!(cfg.predecessors(dead).is_empty());
    let entry = cfg.entry().unwrap();
    assert!(!cfg.reachable_from(entry).contains(dead));
}

#[test]
fn test_merge_is_idempotent() {
    for (name, src) in programs::ALL {
        let cfg = Cfg::build(&parse(src));
        let mut merged = cfg.clone();
        merged.merge(&cfg);
        assert_eq!(merged.node_count(), cfg.node_count(), "{name}");
        assert_eq!(merged.edge_count(), cfg.edge_count(), "{name}");
        assert_eq!(merged.to_string(), cfg.to_string(), "{name}");
    }
}
