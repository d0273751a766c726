use contextual_levenshtein::{EditNode, EditOp, Levenshtein, Mode};

fn node(i: usize, j: Option<usize>, op: EditOp) -> EditNode {
    EditNode { i, j, op }
}

#[test]
fn defaults_to_whole_mode() {
    let lev = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    assert_eq!(lev.mode(), Mode::Whole);

    let mut lev = Levenshtein::builder()
        .with_case_sensitive(true)
        .with_mode(Mode::Whole)
        .build()
        .unwrap();
    lev.process("shello", "SHmello");
    assert_eq!(lev.total_cost(), 3.0);
}

#[test]
fn distance_respects_case_sensitivity() {
    let mut sensitive = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    sensitive.process("shello", "SHmello");
    assert_eq!(sensitive.total_cost(), 3.0);

    let mut insensitive = Levenshtein::new();
    insensitive.process("shello", "SHmello");
    assert_eq!(insensitive.total_cost(), 1.0);
}

#[test]
fn empty_inputs_sum_insertions_or_deletions() {
    let mut lev = Levenshtein::new();
    lev.process("", "SHmello");
    assert_eq!(lev.total_cost(), 7.0);

    lev.process("shello", "");
    assert_eq!(lev.total_cost(), 6.0);

    lev.process("", "");
    assert_eq!(lev.total_cost(), 0.0);
    assert!(lev.reconstruct_path().is_empty());
}

#[test]
fn process_chains() {
    let mut lev = Levenshtein::new();
    let cost = lev.process("kitten", "sitting").total_cost();
    assert_eq!(cost, 3.0);
}

#[test]
fn case_sensitive_path() {
    let mut lev = Levenshtein::builder().with_case_sensitive(true).build().unwrap();
    lev.process("Strode", "sIdes");
    assert_eq!(
        lev.reconstruct_path(),
        vec![
            node(0, None, EditOp::Delete { letter: 'S' }),
            node(1, None, EditOp::Delete { letter: 't' }),
            node(2, Some(0), EditOp::Substitute { from: 'r', to: 's' }),
            node(3, Some(1), EditOp::Substitute { from: 'o', to: 'I' }),
            node(4, Some(2), EditOp::Match { letter: 'd' }),
            node(5, Some(3), EditOp::Match { letter: 'e' }),
            node(6, Some(4), EditOp::Insert { letter: 's' }),
        ]
    );
}

#[test]
fn case_insensitive_path_reports_folded_letters() {
    let mut lev = Levenshtein::new();
    lev.process("Strode", "sIDEs");
    assert_eq!(
        lev.reconstruct_path(),
        vec![
            node(0, Some(0), EditOp::Match { letter: 's' }),
            node(1, None, EditOp::Delete { letter: 't' }),
            node(2, None, EditOp::Delete { letter: 'r' }),
            node(3, Some(1), EditOp::Substitute { from: 'o', to: 'i' }),
            node(4, Some(2), EditOp::Match { letter: 'd' }),
            node(5, Some(3), EditOp::Match { letter: 'e' }),
            node(6, Some(4), EditOp::Insert { letter: 's' }),
        ]
    );
}

#[test]
fn empty_source_path_is_all_inserts() {
    let mut lev = Levenshtein::new();
    lev.process("", "sIDEs");
    let expected: Vec<EditNode> = "sides"
        .chars()
        .enumerate()
        .map(|(k, letter)| node(0, Some(k), EditOp::Insert { letter }))
        .collect();
    assert_eq!(lev.reconstruct_path(), expected);
}

#[test]
fn empty_target_path_is_all_deletes() {
    let mut lev = Levenshtein::new();
    lev.process("Strode", "");
    let expected: Vec<EditNode> = "strode"
        .chars()
        .enumerate()
        .map(|(k, letter)| node(k, None, EditOp::Delete { letter }))
        .collect();
    assert_eq!(lev.reconstruct_path(), expected);
}

#[test]
fn streaming_matches_collected_path() {
    let mut lev = Levenshtein::new();
    lev.process("wheel", "hello");

    let (mut matches, mut subs, mut inserts, mut deletes) = (0, 0, 0, 0);
    let mut streamed = Vec::new();
    lev.for_each_path_node(|n| {
        match n.op {
            EditOp::Match { .. } => matches += 1,
            EditOp::Substitute { .. } => subs += 1,
            EditOp::Insert { .. } => inserts += 1,
            EditOp::Delete { .. } => deletes += 1,
        }
        streamed.push(n);
    });

    assert_eq!((matches, subs, inserts, deletes), (3, 1, 1, 1));
    assert_eq!(streamed, lev.reconstruct_path());
}

#[test]
fn goal_is_bottom_right() {
    let mut lev = Levenshtein::new();
    lev.process("abc", "abxyz");
    assert_eq!(lev.goal_cell(), (3, 5));
}
