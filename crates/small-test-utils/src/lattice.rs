//! Assertion helpers for verifying lattice algebraic laws.
//!
//! These check properties over a given set of sample elements and collect all
//! violations into a single report, so you can see every failing law at once
//! rather than fixing them one at a time.
//!
//! # Example
//!
//! ```ignore
//! use small_test_utils::lattice::assert_lattice_laws;
//!
//! // Bottom and top are tested automatically.
//! assert_lattice_laws(&ZeroLattice, &[ZeroValue::Z, ZeroValue::NZ]);
//! ```

use small_lattice::Lattice;
use std::fmt::Write;

/// Collect violations into a `Vec<String>`, then panic with a combined report
/// if any were found.
fn report(violations: Vec<String>) {
    if violations.is_empty() {
        return;
    }
    let mut msg = format!("{} lattice law violation(s):\n", violations.len());
    for (i, v) in violations.iter().enumerate() {
        let _ = writeln!(msg, "  {}. {}", i + 1, v);
    }
    panic!("{msg}");
}

/// Check that `join` is commutative, associative, and idempotent over the
/// given elements.
pub fn assert_join_laws<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_join_laws(lattice, elements, &mut violations);
    report(violations);
}

/// Check that `meet` is commutative, associative, and idempotent over the
/// given elements.
pub fn assert_meet_laws<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_meet_laws(lattice, elements, &mut violations);
    report(violations);
}

/// Check the absorption laws over the given elements.
///
/// For every pair `(a, b)` drawn from `elements`, this verifies:
/// - `join(a, meet(a, b)) == a`
/// - `meet(a, join(a, b)) == a`
pub fn assert_absorption<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_absorption(lattice, elements, &mut violations);
    report(violations);
}

/// Check that `is_subseteq` is consistent with `join` and `meet`.
pub fn assert_ordering_consistent<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_ordering_consistent(lattice, elements, &mut violations);
    report(violations);
}

/// Check that `bottom()` and `top()` are the identities of `join` and `meet`
/// and sit below and above every element.
pub fn assert_bounds<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_bounds(lattice, elements, &mut violations);
    report(violations);
}

/// Check that `is_descendant` and `is_ancestor` are strict and mirror each
/// other.
pub fn assert_irreflexive<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_irreflexive(lattice, elements, &mut violations);
    report(violations);
}

/// Check that `successors` and `predecessors` only step to strictly larger
/// and smaller elements and are inverse to each other.
pub fn assert_covers_consistent<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut violations = Vec::new();
    check_covers(lattice, elements, &mut violations);
    report(violations);
}

/// Check all lattice laws over the given elements plus `bottom()` and
/// `top()`. All violations are collected and reported together.
///
/// This is the main entry point for testing a [`Lattice`] implementation.
pub fn assert_lattice_laws<L: Lattice>(lattice: &L, elements: &[L::Value]) {
    let mut all = elements.to_vec();
    for bound in [lattice.bottom(), lattice.top()] {
        if !all.contains(&bound) {
            all.push(bound);
        }
    }

    let mut violations = Vec::new();
    check_join_laws(lattice, &all, &mut violations);
    check_meet_laws(lattice, &all, &mut violations);
    check_absorption(lattice, &all, &mut violations);
    check_ordering_consistent(lattice, &all, &mut violations);
    check_bounds(lattice, &all, &mut violations);
    check_irreflexive(lattice, &all, &mut violations);
    check_covers(lattice, &all, &mut violations);
    report(violations);
}

// ---- internal helpers that push violations instead of panicking ----

fn check_join_laws<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        if l.join(a, a) != *a {
            v.push(format!("join not idempotent: join({a:?}, {a:?}) != {a:?}"));
        }
        for b in elements {
            if l.join(a, b) != l.join(b, a) {
                v.push(format!(
                    "join not commutative: join({a:?}, {b:?}) != join({b:?}, {a:?})"
                ));
            }
            for c in elements {
                if l.join(&l.join(a, b), c) != l.join(a, &l.join(b, c)) {
                    v.push(format!(
                        "join not associative: join(join({a:?}, {b:?}), {c:?}) != join({a:?}, join({b:?}, {c:?}))"
                    ));
                }
            }
        }
    }
}

fn check_meet_laws<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        if l.meet(a, a) != *a {
            v.push(format!("meet not idempotent: meet({a:?}, {a:?}) != {a:?}"));
        }
        for b in elements {
            if l.meet(a, b) != l.meet(b, a) {
                v.push(format!(
                    "meet not commutative: meet({a:?}, {b:?}) != meet({b:?}, {a:?})"
                ));
            }
            for c in elements {
                if l.meet(&l.meet(a, b), c) != l.meet(a, &l.meet(b, c)) {
                    v.push(format!(
                        "meet not associative: meet(meet({a:?}, {b:?}), {c:?}) != meet({a:?}, meet({b:?}, {c:?}))"
                    ));
                }
            }
        }
    }
}

fn check_absorption<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        for b in elements {
            if l.join(a, &l.meet(a, b)) != *a {
                v.push(format!(
                    "absorption violated: join({a:?}, meet({a:?}, {b:?})) != {a:?}"
                ));
            }
            if l.meet(a, &l.join(a, b)) != *a {
                v.push(format!(
                    "absorption violated: meet({a:?}, join({a:?}, {b:?})) != {a:?}"
                ));
            }
        }
    }
}

fn check_ordering_consistent<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        for b in elements {
            let sub = l.is_subseteq(a, b);
            let join_agrees = l.join(a, b) == *b;
            let meet_agrees = l.meet(a, b) == *a;
            if sub != join_agrees {
                v.push(format!(
                    "ordering inconsistent with join: is_subseteq({a:?}, {b:?}) = {sub}, \
                     but join({a:?}, {b:?}) == {b:?} is {join_agrees}"
                ));
            }
            if sub != meet_agrees {
                v.push(format!(
                    "ordering inconsistent with meet: is_subseteq({a:?}, {b:?}) = {sub}, \
                     but meet({a:?}, {b:?}) == {a:?} is {meet_agrees}"
                ));
            }
        }
    }
}

fn check_bounds<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    let bot = l.bottom();
    let top = l.top();
    for x in elements {
        if !l.is_subseteq(&bot, x) {
            v.push(format!("bottom not below element: {x:?}"));
        }
        if l.join(&bot, x) != *x {
            v.push(format!("bottom identity violated: join(bottom, {x:?}) != {x:?}"));
        }
        if l.meet(&bot, x) != bot {
            v.push(format!("bottom annihilation violated: meet(bottom, {x:?}) != bottom"));
        }
        if !l.is_subseteq(x, &top) {
            v.push(format!("element not below top: {x:?}"));
        }
        if l.join(&top, x) != top {
            v.push(format!("top annihilation violated: join(top, {x:?}) != top"));
        }
        if l.meet(&top, x) != *x {
            v.push(format!("top identity violated: meet(top, {x:?}) != {x:?}"));
        }
    }
}

fn check_irreflexive<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        if l.is_descendant(a, a) {
            v.push(format!("is_descendant not strict: {a:?} below itself"));
        }
        if l.is_ancestor(a, a) {
            v.push(format!("is_ancestor not strict: {a:?} above itself"));
        }
        for b in elements {
            if l.is_descendant(a, b) != l.is_ancestor(b, a) {
                v.push(format!(
                    "is_descendant({a:?}, {b:?}) disagrees with is_ancestor({b:?}, {a:?})"
                ));
            }
            if l.is_descendant(a, b) && l.is_descendant(b, a) {
                v.push(format!("order not antisymmetric: {a:?} and {b:?}"));
            }
        }
    }
}

fn check_covers<L: Lattice>(l: &L, elements: &[L::Value], v: &mut Vec<String>) {
    for a in elements {
        for up in l.successors(a) {
            if !l.is_descendant(a, &up) {
                v.push(format!("successor {up:?} of {a:?} is not above it"));
            }
            if !l.predecessors(&up).contains(a) {
                v.push(format!("{a:?} missing from predecessors of its successor {up:?}"));
            }
        }
        for down in l.predecessors(a) {
            if !l.is_descendant(&down, a) {
                v.push(format!("predecessor {down:?} of {a:?} is not below it"));
            }
        }
    }
}
