use std::collections::VecDeque;

use crate::lattice::Lattice;

/// Walk the lattice breadth-first from bottom through
/// [`Lattice::successors`], returning at most `limit` distinct values.
///
/// Values come out in order of their distance from bottom, so for finite
/// lattices with a large enough limit the result is the whole lattice.
pub fn enumerate<L: Lattice>(lattice: &L, limit: usize) -> Vec<L::Value> {
    let mut seen: Vec<L::Value> = Vec::new();
    let mut queue = VecDeque::from([lattice.bottom()]);
    while let Some(value) = queue.pop_front() {
        if seen.len() >= limit {
            break;
        }
        if seen.contains(&value) {
            continue;
        }
        for successor in lattice.successors(&value) {
            if !seen.contains(&successor) && !queue.contains(&successor) {
                queue.push_back(successor);
            }
        }
        seen.push(value);
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::tests::{Flat, FlatLattice};

    #[test]
    fn test_enumerate_finite_lattice() {
        let values = enumerate(&FlatLattice, 100);
        assert_eq!(
            values,
            vec![
                Flat::Bottom,
                Flat::Value(0),
                Flat::Value(1),
                Flat::Value(2),
                Flat::Top
            ]
        );
    }

    #[test]
    fn test_enumerate_respects_limit() {
        let values = enumerate(&FlatLattice, 2);
        assert_eq!(values, vec![Flat::Bottom, Flat::Value(0)]);
        assert!(enumerate(&FlatLattice, 0).is_empty());
    }
}
