//! Cost Model: late-bound cost functions for match, insert and delete.
//!
//! Each operation is configured independently as a [`CostFn`], which is
//! either a constant broadcast to every character or a callable installed
//! verbatim. The three settings are bundled in [`Costs`], which is what the
//! engine actually evaluates.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::traits::CostModel;

/// Signature of a match/substitute cost callable: `(source, target) -> cost`.
pub type MatchFn = dyn Fn(char, char) -> f64 + Send + Sync;

/// Signature of an insertion cost callable: `(inserted, before, after) -> cost`.
pub type InsertFn = dyn Fn(char, Option<char>, Option<char>) -> f64 + Send + Sync;

/// Signature of a deletion cost callable: `(deleted) -> cost`.
pub type DeleteFn = dyn Fn(char) -> f64 + Send + Sync;

/// A single cost setting: a constant or a callable.
pub enum CostFn<F: ?Sized> {
    /// Same cost for every character. For matching, equal characters still
    /// cost 0 and the constant applies to substitutions only.
    Constant(f64),
    /// User callable, invoked as-is.
    Custom(Arc<F>),
}

impl<F: ?Sized> CostFn<F> {
    pub fn constant(value: f64) -> Self {
        CostFn::Constant(value)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, CostFn::Constant(_))
    }

    /// Reject constants that cannot be a cost. `+∞` is allowed and forbids
    /// the operation.
    pub(crate) fn validate(&self, option: &'static str) -> Result<(), ConfigError> {
        match self {
            CostFn::Constant(value) if value.is_nan() || *value < 0.0 => {
                Err(ConfigError::InvalidCost {
                    option,
                    value: *value,
                })
            }
            _ => Ok(()),
        }
    }
}

impl<F: ?Sized> Clone for CostFn<F> {
    fn clone(&self) -> Self {
        match self {
            CostFn::Constant(value) => CostFn::Constant(*value),
            CostFn::Custom(f) => CostFn::Custom(Arc::clone(f)),
        }
    }
}

impl<F: ?Sized> fmt::Debug for CostFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostFn::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            CostFn::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<F: ?Sized> From<f64> for CostFn<F> {
    fn from(value: f64) -> Self {
        CostFn::Constant(value)
    }
}

impl CostFn<MatchFn> {
    pub fn custom(f: impl Fn(char, char) -> f64 + Send + Sync + 'static) -> Self {
        CostFn::Custom(Arc::new(f))
    }

    #[inline]
    pub(crate) fn eval(&self, a: char, b: char) -> f64 {
        match self {
            CostFn::Constant(value) => {
                if a == b {
                    0.0
                } else {
                    *value
                }
            }
            CostFn::Custom(f) => f(a, b),
        }
    }
}

impl CostFn<InsertFn> {
    pub fn custom(
        f: impl Fn(char, Option<char>, Option<char>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        CostFn::Custom(Arc::new(f))
    }

    #[inline]
    pub(crate) fn eval(&self, c: char, before: Option<char>, after: Option<char>) -> f64 {
        match self {
            CostFn::Constant(value) => *value,
            CostFn::Custom(f) => f(c, before, after),
        }
    }
}

impl CostFn<DeleteFn> {
    pub fn custom(f: impl Fn(char) -> f64 + Send + Sync + 'static) -> Self {
        CostFn::Custom(Arc::new(f))
    }

    #[inline]
    pub(crate) fn eval(&self, c: char) -> f64 {
        match self {
            CostFn::Constant(value) => *value,
            CostFn::Custom(f) => f(c),
        }
    }
}

/// The active cost configuration of an engine.
///
/// Defaults to unit costs: substitution, insertion and deletion all cost 1,
/// a match costs 0.
#[derive(Clone, Debug)]
pub struct Costs {
    pub matching: CostFn<MatchFn>,
    pub insertion: CostFn<InsertFn>,
    pub deletion: CostFn<DeleteFn>,
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            matching: CostFn::Constant(1.0),
            insertion: CostFn::Constant(1.0),
            deletion: CostFn::Constant(1.0),
        }
    }
}

impl Costs {
    /// Adapt a strategy object into the three per-operation settings.
    pub fn from_model<M>(model: M) -> Self
    where
        M: CostModel + Send + Sync + 'static,
    {
        let model = Arc::new(model);
        let for_match = Arc::clone(&model);
        let for_insert = Arc::clone(&model);
        Self {
            matching: CostFn::Custom(Arc::new(move |a: char, b: char| {
                for_match.match_cost(a, b)
            })),
            insertion: CostFn::Custom(Arc::new(
                move |c: char, before: Option<char>, after: Option<char>| {
                    for_insert.insert_cost(c, before, after)
                },
            )),
            deletion: CostFn::Custom(Arc::new(move |c: char| model.delete_cost(c))),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate("match_cost")?;
        self.insertion.validate("insert_cost")?;
        self.deletion.validate("delete_cost")
    }
}

impl CostModel for Costs {
    #[inline]
    fn match_cost(&self, a: char, b: char) -> f64 {
        self.matching.eval(a, b)
    }

    #[inline]
    fn insert_cost(&self, c: char, before: Option<char>, after: Option<char>) -> f64 {
        self.insertion.eval(c, before, after)
    }

    #[inline]
    fn delete_cost(&self, c: char) -> f64 {
        self.deletion.eval(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vowels;

    impl CostModel for Vowels {
        fn match_cost(&self, a: char, b: char) -> f64 {
            if a == b {
                0.0
            } else if "aeiou".contains(a) && "aeiou".contains(b) {
                0.5
            } else {
                1.0
            }
        }

        fn insert_cost(&self, _c: char, before: Option<char>, _after: Option<char>) -> f64 {
            if before.is_none() {
                0.25
            } else {
                1.0
            }
        }

        fn delete_cost(&self, c: char) -> f64 {
            if c == ' ' {
                f64::INFINITY
            } else {
                2.0
            }
        }
    }

    #[test]
    fn defaults_are_unit_costs() {
        let costs = Costs::default();
        assert_eq!(costs.match_cost('a', 'a'), 0.0);
        assert_eq!(costs.match_cost('a', 'b'), 1.0);
        assert_eq!(costs.insert_cost('x', None, Some('y')), 1.0);
        assert_eq!(costs.delete_cost('z'), 1.0);
    }

    #[test]
    fn constant_match_still_free_for_equal_chars() {
        let costs = Costs {
            matching: CostFn::constant(10.0),
            ..Costs::default()
        };
        assert_eq!(costs.match_cost('q', 'q'), 0.0);
        assert_eq!(costs.match_cost('q', 'Q'), 10.0);
    }

    #[test]
    fn custom_callables_are_used_verbatim() {
        let costs = Costs {
            matching: CostFn::<MatchFn>::custom(|_, _| 7.0),
            insertion: CostFn::<InsertFn>::custom(|c, before, after| {
                if c == 'x' && before == Some('a') && after.is_none() {
                    3.0
                } else {
                    4.0
                }
            }),
            deletion: CostFn::<DeleteFn>::custom(|c| if c == 'd' { 5.0 } else { 6.0 }),
        };
        // Not special-cased: a custom match function owns the equal case too.
        assert_eq!(costs.match_cost('a', 'a'), 7.0);
        assert_eq!(costs.insert_cost('x', Some('a'), None), 3.0);
        assert_eq!(costs.insert_cost('x', None, None), 4.0);
        assert_eq!(costs.delete_cost('d'), 5.0);
        assert_eq!(costs.delete_cost('e'), 6.0);
    }

    #[test]
    fn model_is_adapted_per_operation() {
        let costs = Costs::from_model(Vowels);
        assert_eq!(costs.match_cost('a', 'e'), 0.5);
        assert_eq!(costs.match_cost('a', 't'), 1.0);
        assert_eq!(costs.insert_cost('t', None, Some('a')), 0.25);
        assert_eq!(costs.insert_cost('t', Some('a'), None), 1.0);
        assert!(costs.delete_cost(' ').is_infinite());
        assert!(!costs.matching.is_constant());
    }

    #[test]
    fn validation_rejects_nan_and_negative_constants() {
        let mut costs = Costs::default();
        assert!(costs.validate().is_ok());

        costs.deletion = CostFn::constant(f64::INFINITY);
        assert!(costs.validate().is_ok());

        costs.insertion = CostFn::constant(-2.0);
        assert_eq!(
            costs.validate(),
            Err(ConfigError::InvalidCost {
                option: "insert_cost",
                value: -2.0
            })
        );

        costs.insertion = CostFn::constant(1.0);
        costs.matching = CostFn::constant(f64::NAN);
        assert!(matches!(
            costs.validate(),
            Err(ConfigError::InvalidCost {
                option: "match_cost",
                ..
            })
        ));
    }

    #[test]
    fn debug_hides_callables() {
        let f = CostFn::<DeleteFn>::custom(|_| 1.0);
        assert_eq!(format!("{f:?}"), "Custom(..)");
        assert_eq!(format!("{:?}", CostFn::<DeleteFn>::constant(2.0)), "Constant(2.0)");
    }
}
