//! Core trait definitions for pluggable edit costs.
//!
//! To score an alignment with your own rules, implement [`CostModel`] for a
//! struct that captures them (keyboard distances, phonetic classes, ...) and
//! install it with [`Levenshtein::set_cost_model`](crate::Levenshtein::set_cost_model).
//! For one-off tweaks, the per-operation setters that take a
//! [`CostFn`](crate::cost::CostFn) are usually simpler.
//!
//! All characters handed to a cost model have already been prepared: when the
//! engine is case-insensitive they arrive lowercased.

/// The three cost operations of a generalized edit distance.
///
/// Semantics:
/// - Costs are non-negative. `f64::INFINITY` forbids an operation outright.
/// - `match_cost(a, a)` is expected to be `0`. This is a convention and is
///   not enforced, but identity and symmetry properties depend on it.
/// - Implementations should be pure: the engine may call them any number of
///   times per cell and assumes the same answer each time.
pub trait CostModel {
    /// Cost of aligning source character `a` against target character `b`
    /// (a match when they are equal, a substitution otherwise).
    fn match_cost(&self, a: char, b: char) -> f64;

    /// Cost of inserting target character `c` into the source.
    ///
    /// `before` / `after` are the source characters flanking the insertion
    /// point. `None` means the insertion point touches a string boundary.
    fn insert_cost(&self, c: char, before: Option<char>, after: Option<char>) -> f64;

    /// Cost of deleting source character `c`.
    fn delete_cost(&self, c: char) -> f64;
}

impl<T: CostModel + ?Sized> CostModel for &T {
    fn match_cost(&self, a: char, b: char) -> f64 {
        (**self).match_cost(a, b)
    }

    fn insert_cost(&self, c: char, before: Option<char>, after: Option<char>) -> f64 {
        (**self).insert_cost(c, before, after)
    }

    fn delete_cost(&self, c: char) -> f64 {
        (**self).delete_cost(c)
    }
}
