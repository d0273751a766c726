//! Construct-with-options for [`Levenshtein`].

use crate::cost::{CostFn, Costs, DeleteFn, InsertFn, MatchFn};
use crate::error::ConfigError;
use crate::traits::CostModel;
use crate::utils::DEFAULT_MAX_LEN;
use crate::{Levenshtein, Mode};

/// Builder for [`Levenshtein`].
///
/// Defaults: case-insensitive, [`Mode::Whole`], [`DEFAULT_MAX_LEN`], unit
/// costs.
#[derive(Clone, Debug)]
pub struct LevenshteinBuilder {
    case_sensitive: bool,
    mode: Mode,
    max_len: usize,
    costs: Costs,
}

impl Default for LevenshteinBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LevenshteinBuilder {
    pub fn new() -> Self {
        Self {
            case_sensitive: false,
            mode: Mode::Whole,
            max_len: DEFAULT_MAX_LEN,
            costs: Costs::default(),
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<Mode>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_match_cost(mut self, cost: impl Into<CostFn<MatchFn>>) -> Self {
        self.costs.matching = cost.into();
        self
    }

    pub fn with_insert_cost(mut self, cost: impl Into<CostFn<InsertFn>>) -> Self {
        self.costs.insertion = cost.into();
        self
    }

    pub fn with_delete_cost(mut self, cost: impl Into<CostFn<DeleteFn>>) -> Self {
        self.costs.deletion = cost.into();
        self
    }

    pub fn with_costs(mut self, costs: Costs) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_cost_model<M>(mut self, model: M) -> Self
    where
        M: CostModel + Send + Sync + 'static,
    {
        self.costs = Costs::from_model(model);
        self
    }

    /// Validate constant costs and build the engine.
    pub fn build(self) -> Result<Levenshtein, ConfigError> {
        self.costs.validate()?;
        Ok(Levenshtein::from_parts(
            self.case_sensitive,
            self.mode,
            self.max_len,
            self.costs,
        ))
    }
}
