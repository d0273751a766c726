//! Contextual Levenshtein distance
//!
//! This crate computes a generalized edit distance between two strings under
//! pluggable, context-sensitive cost functions, and reconstructs the edit
//! script that achieves it.
//!
//! ## Core idea
//! 1. Configure a [`Levenshtein`] engine: case sensitivity, a [`Mode`], and
//!    the match / insert / delete costs (constants, closures, or a
//!    [`CostModel`] strategy object).
//! 2. Call [`Levenshtein::process`] with a source and a target string. The
//!    engine fills an `O(n·m)` DP matrix, reusing its allocation across calls.
//! 3. Query [`Levenshtein::total_cost`] or walk the optimal edit script with
//!    [`Levenshtein::reconstruct_path`] / [`Levenshtein::for_each_path_node`].
//!
//! Insertion costs see the source characters on either side of the insertion
//! point, so a cost function can, for example, make insertions at word
//! boundaries free while charging for insertions inside a word.
//!
//! ## Quick start
//! ```
//! use contextual_levenshtein::{EditOp, Levenshtein};
//!
//! let mut lev = Levenshtein::builder()
//!     .with_case_sensitive(true)
//!     .build()
//!     .unwrap();
//! lev.process("Strode", "sIdes");
//! assert_eq!(lev.total_cost(), 5.0);
//!
//! let ops: String = lev.reconstruct_path().iter().map(|n| n.op.symbol()).collect();
//! assert_eq!(ops, "DDSSMMI");
//! assert!(matches!(
//!     lev.reconstruct_path()[2].op,
//!     EditOp::Substitute { from: 'r', to: 's' }
//! ));
//! ```
//!
//! ## Modes
//! - [`Mode::Whole`]: classic edit distance between two complete strings.
//! - [`Mode::Substring`]: cheapest embedding of the source as an approximate
//!   substring anywhere inside the target.

pub mod builder;
pub mod cost;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod path;
pub mod traits;
pub mod utils;

pub use crate::builder::LevenshteinBuilder;
pub use crate::cost::{CostFn, Costs};
pub use crate::engine::{Levenshtein, Mode, OptionValue};
pub use crate::error::ConfigError;
pub use crate::path::{EditNode, EditOp};
pub use crate::traits::CostModel;
