//! Example: locate a misspelled phrase inside a longer text.
//!
//! Run with:
//! `cargo run --example substring_search`

use contextual_levenshtein::{EditOp, Levenshtein, Mode};

fn main() {
    let text = "A herd of Buffalo crossed the river at dawn.";
    let mut lev = Levenshtein::builder()
        .with_mode(Mode::Substring)
        .build()
        .expect("default costs are valid");

    for query in ["bufalo", "rivers", "dusk"] {
        lev.process(query, text);
        let (_, end) = lev.goal_cell();
        let path = lev.reconstruct_path();
        let start = path
            .iter()
            .find_map(|n| match n.op {
                EditOp::Delete { .. } => None,
                _ => n.j,
            })
            .unwrap_or(end);
        let found: String = lev.target().chars()[start..end].iter().collect();
        println!(
            "{query:>8}: cost {:.0}, span {start}..{end} {found:?}",
            lev.total_cost()
        );
    }
}
