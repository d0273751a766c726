//! Example: whole-string alignment with word-aware insertion costs.
//!
//! Run with:
//! `cargo run --example align`

use contextual_levenshtein::cost::{CostFn, InsertFn};
use contextual_levenshtein::{EditNode, EditOp, Levenshtein};

fn main() {
    let source = "the quick fox";
    let target = "the quick brown fox";

    let mut lev = Levenshtein::new();
    lev.process(source, target);
    println!("Unit costs:      {}", lev.total_cost());

    // Inserting next to a space is cheap; splitting a word is not.
    lev.set_insert_cost(CostFn::<InsertFn>::custom(|_, before, after| {
        if before == Some(' ') || after == Some(' ') {
            0.1
        } else {
            1.0
        }
    }))
    .expect("valid insertion cost");
    lev.process(source, target);
    println!("Word-aware cost: {:.1}", lev.total_cost());

    let path = lev.reconstruct_path();
    let ops: String = path.iter().map(|n| n.op.symbol()).collect();
    println!("Script: {ops}");

    let (aln_s, aln_t) = materialize_alignment(&path);
    println!("S': {aln_s}");
    println!("T': {aln_t}");
}

/// Render an edit script as two gapped rows.
fn materialize_alignment(path: &[EditNode]) -> (String, String) {
    let mut out_s = String::new();
    let mut out_t = String::new();
    for node in path {
        match node.op {
            EditOp::Match { letter } => {
                out_s.push(letter);
                out_t.push(letter);
            }
            EditOp::Substitute { from, to } => {
                out_s.push(from);
                out_t.push(to);
            }
            EditOp::Insert { letter } => {
                out_s.push('-');
                out_t.push(letter);
            }
            EditOp::Delete { letter } => {
                out_s.push(letter);
                out_t.push('-');
            }
        }
    }
    (out_s, out_t)
}
