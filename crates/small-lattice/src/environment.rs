use std::collections::BTreeMap;
use std::fmt;

use crate::lattice::Lattice;

/// A partial environment update: only the variables a transfer function
/// changes.
pub type Bindings<V> = BTreeMap<String, V>;

/// Maps each variable to an abstract value.
///
/// Environments are values: every operation returns a new environment and
/// leaves the receiver untouched.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbstractEnvironment<V> {
    values: BTreeMap<String, V>,
}

impl<V> Default for AbstractEnvironment<V> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<V: Clone + PartialEq> AbstractEnvironment<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every name in `names` to `value`.
    pub fn uniform<'a>(names: impl IntoIterator<Item = &'a String>, value: V) -> Self {
        Self {
            values: names
                .into_iter()
                .map(|name| (name.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    /// The value of `name`, or the lattice's top when it is unbound.
    pub fn lookup<L>(&self, lattice: &L, name: &str) -> V
    where
        L: Lattice<Value = V>,
    {
        self.values
            .get(name)
            .cloned()
            .unwrap_or_else(|| lattice.top())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.values.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// A copy of `self` with `bindings` overwriting existing entries.
    pub fn updated(&self, bindings: Bindings<V>) -> Self {
        let mut values = self.values.clone();
        values.extend(bindings);
        Self { values }
    }

    /// Pointwise join. A variable bound on only one side keeps that value.
    pub fn join<L>(&self, other: &Self, lattice: &L) -> Self
    where
        L: Lattice<Value = V>,
    {
        let mut values = self.values.clone();
        for (name, value) in &other.values {
            let joined = match values.get(name) {
                Some(current) => lattice.join(current, value),
                None => value.clone(),
            };
            values.insert(name.clone(), joined);
        }
        Self { values }
    }

    /// Narrow `self` with `bindings` by meeting each binding with the current
    /// value.
    ///
    /// Returns `None` when any variable becomes bottom: no concrete state
    /// satisfies the refinement.
    pub fn refine<L>(&self, bindings: &Bindings<V>, lattice: &L) -> Option<Self>
    where
        L: Lattice<Value = V>,
    {
        let mut values = self.values.clone();
        for (name, value) in bindings {
            let refined = match values.get(name) {
                Some(current) => lattice.meet(current, value),
                None => value.clone(),
            };
            if lattice.is_bottom(&refined) {
                return None;
            }
            values.insert(name.clone(), refined);
        }
        Some(Self { values })
    }

    /// Pointwise application of `f` to the values of `self` and `other`,
    /// used for widening. Variables missing from `self` take `other`'s value.
    pub fn combine(&self, other: &Self, mut f: impl FnMut(&str, &V, &V) -> V) -> Self {
        let mut values = self.values.clone();
        for (name, value) in &other.values {
            let combined = match self.values.get(name) {
                Some(current) => f(name, current, value),
                None => value.clone(),
            };
            values.insert(name.clone(), combined);
        }
        Self { values }
    }

    /// Pointwise `is_subseteq`. Unbound variables count as bottom.
    pub fn is_subseteq<L>(&self, other: &Self, lattice: &L) -> bool
    where
        L: Lattice<Value = V>,
    {
        self.values.iter().all(|(name, value)| match other.values.get(name) {
            Some(bound) => lattice.is_subseteq(value, bound),
            None => lattice.is_bottom(value),
        })
    }
}

impl<V> FromIterator<(String, V)> for AbstractEnvironment<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<V: fmt::Display> fmt::Display for AbstractEnvironment<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::tests::{Flat, FlatLattice};

    fn env(entries: &[(&str, Flat)]) -> AbstractEnvironment<Flat> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_updated_leaves_receiver_untouched() {
        let before = env(&[("x", Flat::Top), ("y", Flat::Value(1))]);
        let after = before.updated(Bindings::from([("x".to_string(), Flat::Value(0))]));
        assert_eq!(before.get("x"), Some(&Flat::Top));
        assert_eq!(after.get("x"), Some(&Flat::Value(0)));
        assert_eq!(after.get("y"), Some(&Flat::Value(1)));
    }

    #[test]
    fn test_join_is_pointwise() {
        let a = env(&[("x", Flat::Value(1)), ("y", Flat::Value(2))]);
        let b = env(&[("x", Flat::Value(1)), ("y", Flat::Value(0)), ("z", Flat::Bottom)]);
        let joined = a.join(&b, &FlatLattice);
        assert_eq!(
            joined,
            env(&[("x", Flat::Value(1)), ("y", Flat::Top), ("z", Flat::Bottom)])
        );
        assert!(a.is_subseteq(&joined, &FlatLattice));
        assert!(!joined.is_subseteq(&a, &FlatLattice));
    }

    #[test]
    fn test_refine_detects_contradiction() {
        let current = env(&[("x", Flat::Value(1)), ("y", Flat::Top)]);
        let narrowed = current
            .refine(&Bindings::from([("y".to_string(), Flat::Value(2))]), &FlatLattice)
            .unwrap();
        assert_eq!(narrowed.get("y"), Some(&Flat::Value(2)));

        let contradiction = Bindings::from([("x".to_string(), Flat::Value(2))]);
        assert!(current.refine(&contradiction, &FlatLattice).is_none());
    }

    #[test]
    fn test_lookup_defaults_to_top() {
        let current = env(&[("x", Flat::Value(1))]);
        assert_eq!(current.lookup(&FlatLattice, "x"), Flat::Value(1));
        assert_eq!(current.lookup(&FlatLattice, "missing"), Flat::Top);
    }

    #[test]
    fn test_combine_applies_to_shared_names() {
        let last = env(&[("x", Flat::Value(1))]);
        let new = env(&[("x", Flat::Value(2)), ("y", Flat::Value(0))]);
        let combined = last.combine(&new, |_, _, _| Flat::Top);
        assert_eq!(combined, env(&[("x", Flat::Top), ("y", Flat::Value(0))]));
    }
}
