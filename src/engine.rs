//! The edit-distance engine.
//!
//! [`Levenshtein`] owns the matrix and the prepared strings of the last
//! `process` call and implements the three phases of a query:
//! 1. boundary seeding of row 0 / column 0 for the active [`Mode`],
//! 2. the row-major DP fill of the interior,
//! 3. goal-cell selection, total cost and path reconstruction.
//!
//! Cost configuration persists across calls. Changing it marks the affected
//! boundary dirty; dirty boundaries are re-seeded eagerly whenever a matrix
//! exists, and always on the next `process`.

use std::fmt;
use std::sync::Arc;

use crate::builder::LevenshteinBuilder;
use crate::cost::{CostFn, Costs, DeleteFn, InsertFn, MatchFn};
use crate::error::ConfigError;
use crate::matrix::{Cell, Matrix, Parent};
use crate::path::{self, EditNode, EditOp};
use crate::traits::CostModel;
use crate::utils::{PreparedString, DEFAULT_MAX_LEN};

/// Scoring regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Align both strings end to end.
    #[default]
    Whole,
    /// Cheapest alignment of the source against any span of the target.
    Substring,
}

impl Mode {
    /// Parse a mode name. Unknown names fall back to [`Mode::Whole`].
    pub fn parse_lossy(name: &str) -> Self {
        if name.eq_ignore_ascii_case("substring") {
            Mode::Substring
        } else {
            if !name.eq_ignore_ascii_case("whole") {
                #[cfg(feature = "tracing")]
                tracing::debug!(mode = name, "unknown mode, falling back to whole");
            }
            Mode::Whole
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Whole => "whole",
            Mode::Substring => "substring",
        }
    }
}

impl From<&str> for Mode {
    fn from(name: &str) -> Self {
        Mode::parse_lossy(name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value accepted by [`Levenshtein::set_option`].
#[derive(Clone)]
pub enum OptionValue {
    Number(f64),
    Text(String),
    Bool(bool),
    MatchFn(Arc<MatchFn>),
    InsertFn(Arc<InsertFn>),
    DeleteFn(Arc<DeleteFn>),
}

impl OptionValue {
    pub fn match_fn(f: impl Fn(char, char) -> f64 + Send + Sync + 'static) -> Self {
        OptionValue::MatchFn(Arc::new(f))
    }

    pub fn insert_fn(
        f: impl Fn(char, Option<char>, Option<char>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        OptionValue::InsertFn(Arc::new(f))
    }

    pub fn delete_fn(f: impl Fn(char) -> f64 + Send + Sync + 'static) -> Self {
        OptionValue::DeleteFn(Arc::new(f))
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Number(v) => f.debug_tuple("Number").field(v).finish(),
            OptionValue::Text(t) => f.debug_tuple("Text").field(t).finish(),
            OptionValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            OptionValue::MatchFn(_) => f.write_str("MatchFn(..)"),
            OptionValue::InsertFn(_) => f.write_str("InsertFn(..)"),
            OptionValue::DeleteFn(_) => f.write_str("DeleteFn(..)"),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<Mode> for OptionValue {
    fn from(v: Mode) -> Self {
        OptionValue::Text(v.as_str().to_string())
    }
}

/// Boundaries whose seed values no longer match the configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct DirtyBoundaries {
    row: bool,
    column: bool,
}

/// Generalized Levenshtein distance with pluggable costs.
///
/// Typical usage:
/// ```
/// use contextual_levenshtein::{Levenshtein, Mode};
///
/// let mut lev = Levenshtein::builder()
///     .with_case_sensitive(true)
///     .with_mode(Mode::Substring)
///     .build()
///     .unwrap();
/// lev.process("Bufalo", "the Buffalo run");
/// assert_eq!(lev.total_cost(), 1.0);
/// for node in lev.reconstruct_path() {
///     println!("{} at {}", node.op.symbol(), node.i);
/// }
/// ```
///
/// One instance serves one caller at a time: `process` mutates the shared
/// matrix.
#[derive(Clone, Debug)]
pub struct Levenshtein {
    case_sensitive: bool,
    mode: Mode,
    max_len: usize,
    costs: Costs,
    matrix: Matrix,
    source: PreparedString,
    target: PreparedString,
    dirty: DirtyBoundaries,
}

impl Default for Levenshtein {
    fn default() -> Self {
        Self::new()
    }
}

impl Levenshtein {
    /// Case-insensitive, whole-string engine with unit costs.
    pub fn new() -> Self {
        Self::from_parts(false, Mode::Whole, DEFAULT_MAX_LEN, Costs::default())
    }

    pub fn builder() -> LevenshteinBuilder {
        LevenshteinBuilder::new()
    }

    pub(crate) fn from_parts(
        case_sensitive: bool,
        mode: Mode,
        max_len: usize,
        costs: Costs,
    ) -> Self {
        Self {
            case_sensitive,
            mode,
            max_len,
            costs,
            matrix: Matrix::new(),
            source: PreparedString::default(),
            target: PreparedString::default(),
            dirty: DirtyBoundaries::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn costs(&self) -> &Costs {
        &self.costs
    }

    /// The DP matrix. Only `[0..source().len()) x [0..target().len())` is
    /// meaningful; cells outside hold values from earlier, larger calls.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Prepared source string of the last `process` call.
    pub fn source(&self) -> &PreparedString {
        &self.source
    }

    /// Prepared target string of the last `process` call.
    pub fn target(&self) -> &PreparedString {
        &self.target
    }

    /// Switch scoring regime. A change re-seeds row 0 immediately, so
    /// entering [`Mode::Substring`] restores the free-start row even before
    /// the next `process`. Costs and paths reflect the new mode only after
    /// that `process`.
    pub fn set_mode(&mut self, mode: Mode) {
        let old = self.mode;
        self.mode = mode;
        if old != mode {
            #[cfg(feature = "tracing")]
            tracing::debug!(from = %old, to = %mode, "mode changed");
            self.dirty.row = true;
            self.seed_dirty();
        }
    }

    /// Applied when strings are prepared, i.e. from the next `process`.
    pub fn set_case_sensitive(&mut self, case_sensitive: bool) {
        self.case_sensitive = case_sensitive;
    }

    /// Maximum number of characters kept per input, from the next `process`.
    pub fn set_max_len(&mut self, max_len: usize) {
        self.max_len = max_len;
    }

    pub fn set_match_cost(&mut self, cost: impl Into<CostFn<MatchFn>>) -> Result<(), ConfigError> {
        let cost = cost.into();
        cost.validate("match_cost")?;
        self.costs.matching = cost;
        Ok(())
    }

    /// Re-seeds row 0 when in [`Mode::Whole`].
    pub fn set_insert_cost(
        &mut self,
        cost: impl Into<CostFn<InsertFn>>,
    ) -> Result<(), ConfigError> {
        let cost = cost.into();
        cost.validate("insert_cost")?;
        self.costs.insertion = cost;
        if self.mode == Mode::Whole {
            self.dirty.row = true;
        }
        self.seed_dirty();
        Ok(())
    }

    /// Re-seeds column 0.
    pub fn set_delete_cost(
        &mut self,
        cost: impl Into<CostFn<DeleteFn>>,
    ) -> Result<(), ConfigError> {
        let cost = cost.into();
        cost.validate("delete_cost")?;
        self.costs.deletion = cost;
        self.dirty.column = true;
        self.seed_dirty();
        Ok(())
    }

    /// Replace all three cost settings at once.
    pub fn set_costs(&mut self, costs: Costs) -> Result<(), ConfigError> {
        costs.validate()?;
        self.costs = costs;
        self.dirty.row |= self.mode == Mode::Whole;
        self.dirty.column = true;
        self.seed_dirty();
        Ok(())
    }

    /// Install a strategy object for all three operations.
    pub fn set_cost_model<M>(&mut self, model: M)
    where
        M: CostModel + Send + Sync + 'static,
    {
        self.costs = Costs::from_model(model);
        self.dirty.row |= self.mode == Mode::Whole;
        self.dirty.column = true;
        self.seed_dirty();
    }

    /// Generic setter by option name.
    ///
    /// | name                 | accepted values                         |
    /// |----------------------|-----------------------------------------|
    /// | `mode` / `type`      | text; anything unrecognized → `Whole`   |
    /// | `case_sensitive`     | bool                                    |
    /// | `match_cost`         | number or [`OptionValue::MatchFn`]      |
    /// | `insert_cost`        | number or [`OptionValue::InsertFn`]     |
    /// | `delete_cost`        | number or [`OptionValue::DeleteFn`]     |
    pub fn set_option(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> Result<(), ConfigError> {
        let value = value.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(option = name, value = ?value, "set option");

        match name {
            "mode" | "type" => {
                let mode = match &value {
                    OptionValue::Text(text) => Mode::parse_lossy(text),
                    _ => Mode::Whole,
                };
                self.set_mode(mode);
                Ok(())
            }
            "case_sensitive" => match value {
                OptionValue::Bool(flag) => {
                    self.set_case_sensitive(flag);
                    Ok(())
                }
                _ => Err(ConfigError::InvalidValue {
                    option: "case_sensitive",
                    expected: "a boolean",
                }),
            },
            "match_cost" => {
                let cost = match value {
                    OptionValue::Number(v) => CostFn::Constant(v),
                    OptionValue::MatchFn(f) => CostFn::Custom(f),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            option: "match_cost",
                            expected: "a number or a match cost function",
                        })
                    }
                };
                self.set_match_cost(cost)
            }
            "insert_cost" => {
                let cost = match value {
                    OptionValue::Number(v) => CostFn::Constant(v),
                    OptionValue::InsertFn(f) => CostFn::Custom(f),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            option: "insert_cost",
                            expected: "a number or an insertion cost function",
                        })
                    }
                };
                self.set_insert_cost(cost)
            }
            "delete_cost" => {
                let cost = match value {
                    OptionValue::Number(v) => CostFn::Constant(v),
                    OptionValue::DeleteFn(f) => CostFn::Custom(f),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            option: "delete_cost",
                            expected: "a number or a deletion cost function",
                        })
                    }
                };
                self.set_delete_cost(cost)
            }
            other => Err(ConfigError::UnknownOption(other.to_string())),
        }
    }

    /// Prepare both strings, grow and re-seed the matrix, and fill it.
    pub fn process(&mut self, s1: &str, s2: &str) -> &mut Self {
        self.source = PreparedString::new(s1, self.case_sensitive, self.max_len);
        self.target = PreparedString::new(s2, self.case_sensitive, self.max_len);

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "process",
            mode = %self.mode,
            rows = self.source.len(),
            cols = self.target.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        self.matrix.ensure(self.source.len(), self.target.len());
        self.dirty = DirtyBoundaries {
            row: true,
            column: true,
        };
        self.seed_dirty();
        self.fill();
        self
    }

    fn seed_dirty(&mut self) {
        if self.matrix.is_empty() {
            return;
        }
        if self.dirty.row {
            match self.mode {
                Mode::Whole => self.seed_first_row_whole(),
                Mode::Substring => self.seed_first_row_substring(),
            }
        }
        if self.dirty.column {
            self.seed_first_column();
        }
        self.dirty = DirtyBoundaries::default();
    }

    /// Row 0 in whole mode: cumulative insertions, all scored at the start
    /// of the source.
    fn seed_first_row_whole(&mut self) {
        let width = self.target.len().min(self.matrix.cols());
        let (before, after) = self.insert_context(0);
        self.matrix.set(0, 0, 0.0, Parent::Origin);
        for j in 1..width {
            let cost = self.matrix.cost(0, j - 1)
                + self
                    .costs
                    .insert_cost(self.target.at(j), before, after);
            self.matrix.set(0, j, cost, Parent::Insert);
        }
    }

    /// Row 0 in substring mode: free start anywhere, over the whole
    /// allocated width.
    fn seed_first_row_substring(&mut self) {
        for cell in self.matrix.row_mut(0) {
            *cell = Cell::ORIGIN;
        }
    }

    fn seed_first_column(&mut self) {
        let height = self.source.len().min(self.matrix.rows());
        self.matrix.set(0, 0, 0.0, Parent::Origin);
        for i in 1..height {
            let cost = self.matrix.cost(i - 1, 0) + self.costs.delete_cost(self.source.at(i));
            self.matrix.set(i, 0, cost, Parent::Delete);
        }
    }

    /// Source characters flanking an insertion made while at row `i`.
    ///
    /// Row 0 anchors every insertion before the first source character,
    /// whatever the target column.
    fn insert_context(&self, i: usize) -> (Option<char>, Option<char>) {
        if i == 0 {
            (None, self.source.get(1))
        } else {
            (self.source.get(i), self.source.get(i + 1))
        }
    }

    fn fill(&mut self) {
        let rows = self.source.len();
        let cols = self.target.len();

        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("fill", rows, cols);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        for i in 1..rows {
            let c1 = self.source.at(i);
            let (before, after) = self.insert_context(i);
            let delete = self.costs.delete_cost(c1);

            for j in 1..cols {
                let c2 = self.target.at(j);
                let match_opt = self.matrix.cost(i - 1, j - 1) + self.costs.match_cost(c1, c2);
                let insert_opt =
                    self.matrix.cost(i, j - 1) + self.costs.insert_cost(c2, before, after);
                let delete_opt = self.matrix.cost(i - 1, j) + delete;

                // Ties keep the earlier option: match, then insert, then delete.
                let (mut cost, mut parent) = (match_opt, Parent::Match);
                if insert_opt < cost {
                    cost = insert_opt;
                    parent = Parent::Insert;
                }
                if delete_opt < cost {
                    cost = delete_opt;
                    parent = Parent::Delete;
                }
                self.matrix.set(i, j, cost, parent);
            }
        }
    }

    /// Cell holding the answer for the active mode.
    ///
    /// Whole mode: the bottom-right corner. Substring mode: the cheapest
    /// cell of the last row, leftmost on ties.
    pub fn goal_cell(&self) -> (usize, usize) {
        let i = self.source.len() - 1;
        let last_col = self.target.len() - 1;
        match self.mode {
            Mode::Whole => (i, last_col),
            Mode::Substring => {
                if self.matrix.is_empty() {
                    return (i, 0);
                }
                let mut best = 0;
                for k in 1..=last_col {
                    if self.matrix.cost(i, k) < self.matrix.cost(i, best) {
                        best = k;
                    }
                }
                (i, best)
            }
        }
    }

    /// Total cost of the optimal alignment from the last `process` call.
    ///
    /// When either string is empty the cost is summed directly over the
    /// other string's insertions or deletions.
    pub fn total_cost(&self) -> f64 {
        if self.source.is_empty() {
            self.target
                .chars()
                .iter()
                .map(|&c| self.costs.insert_cost(c, None, None))
                .sum()
        } else if self.target.is_empty() {
            self.source
                .chars()
                .iter()
                .map(|&c| self.costs.delete_cost(c))
                .sum()
        } else {
            let (i, j) = self.goal_cell();
            self.matrix.cost(i, j)
        }
    }

    /// Stream the optimal edit script in source order.
    pub fn for_each_path_node<F>(&self, f: F)
    where
        F: FnMut(EditNode),
    {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("reconstruct", mode = %self.mode);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        if self.source.is_empty() || self.target.is_empty() {
            path::straight_run(&self.source, &self.target, f);
        } else {
            path::walk(
                &self.matrix,
                &self.source,
                &self.target,
                self.goal_cell(),
                f,
            );
        }
    }

    /// The optimal edit script in source order.
    pub fn reconstruct_path(&self) -> Vec<EditNode> {
        let mut nodes = Vec::new();
        self.for_each_path_node(|node| nodes.push(node));
        nodes
    }

    /// Incremental cost of one edit step under the active cost functions,
    /// with the same insertion context the fill used.
    pub fn node_cost(&self, node: &EditNode) -> f64 {
        match node.op {
            EditOp::Match { letter } => self.costs.match_cost(letter, letter),
            EditOp::Substitute { from, to } => self.costs.match_cost(from, to),
            EditOp::Insert { letter } => {
                if self.source.is_empty() {
                    self.costs.insert_cost(letter, None, None)
                } else {
                    let (before, after) = self.insert_context(node.i);
                    self.costs.insert_cost(letter, before, after)
                }
            }
            EditOp::Delete { letter } => self.costs.delete_cost(letter),
        }
    }
}
