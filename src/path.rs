//! Path Reconstructor: edit scripts recovered from parent pointers.
//!
//! Parent pointers collapse to a single chain from the goal cell back to a
//! boundary origin. We walk that chain iteratively, pushing one node per
//! step onto an explicit stack, then pop to emit nodes in source order.
//! Depth is bounded by `L1 + L2`, independent of the call stack.

use crate::matrix::{Matrix, Parent};
use crate::utils::PreparedString;

/// One edit operation and the characters it involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op"))]
pub enum EditOp {
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Match { letter: char },
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Substitute { from: char, to: char },
    #[cfg_attr(feature = "serde", serde(rename = "I"))]
    Insert { letter: char },
    #[cfg_attr(feature = "serde", serde(rename = "D"))]
    Delete { letter: char },
}

impl EditOp {
    /// One-letter code: `M`, `S`, `I` or `D`.
    pub fn symbol(&self) -> char {
        match self {
            EditOp::Match { .. } => 'M',
            EditOp::Substitute { .. } => 'S',
            EditOp::Insert { .. } => 'I',
            EditOp::Delete { .. } => 'D',
        }
    }

    /// True for operations that change the string.
    pub fn is_edit(&self) -> bool {
        !matches!(self, EditOp::Match { .. })
    }
}

/// One step of an edit script.
///
/// Coordinates are 0-based positions in the prepared strings:
/// - `Match` / `Substitute`: `i` is the source character, `j` the target one.
/// - `Insert`: `i` is the insertion point in the source (the number of
///   source characters before it), `j` the inserted target character.
/// - `Delete`: `i` is the deleted source character; `j` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditNode {
    pub i: usize,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub j: Option<usize>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub op: EditOp,
}

/// Walk parent pointers from `goal` and emit nodes in source order.
pub(crate) fn walk<F>(
    matrix: &Matrix,
    source: &PreparedString,
    target: &PreparedString,
    goal: (usize, usize),
    mut emit: F,
) where
    F: FnMut(EditNode),
{
    let (mut i, mut j) = goal;
    let mut stack = Vec::with_capacity(i + j);

    loop {
        match matrix.parent(i, j) {
            Parent::Origin => break,
            Parent::Match => {
                debug_assert!(i > 0 && j > 0, "match parent on boundary ({i},{j})");
                if i == 0 || j == 0 {
                    break;
                }
                let (a, b) = (source.at(i), target.at(j));
                let op = if a == b {
                    EditOp::Match { letter: b }
                } else {
                    EditOp::Substitute { from: a, to: b }
                };
                stack.push(EditNode {
                    i: i - 1,
                    j: Some(j - 1),
                    op,
                });
                i -= 1;
                j -= 1;
            }
            Parent::Insert => {
                debug_assert!(j > 0, "insert parent in column 0 (row {i})");
                if j == 0 {
                    break;
                }
                stack.push(EditNode {
                    i,
                    j: Some(j - 1),
                    op: EditOp::Insert {
                        letter: target.at(j),
                    },
                });
                j -= 1;
            }
            Parent::Delete => {
                debug_assert!(i > 0, "delete parent in row 0 (column {j})");
                if i == 0 {
                    break;
                }
                stack.push(EditNode {
                    i: i - 1,
                    j: None,
                    op: EditOp::Delete {
                        letter: source.at(i),
                    },
                });
                i -= 1;
            }
        }
    }

    while let Some(node) = stack.pop() {
        emit(node);
    }
}

/// Script for a pair where one side is empty: all inserts or all deletes.
pub(crate) fn straight_run<F>(source: &PreparedString, target: &PreparedString, mut emit: F)
where
    F: FnMut(EditNode),
{
    if source.is_empty() {
        for (k, &letter) in target.chars().iter().enumerate() {
            emit(EditNode {
                i: 0,
                j: Some(k),
                op: EditOp::Insert { letter },
            });
        }
    } else if target.is_empty() {
        for (k, &letter) in source.chars().iter().enumerate() {
            emit(EditNode {
                i: k,
                j: None,
                op: EditOp::Delete { letter },
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_walk(
        m: &Matrix,
        s: &PreparedString,
        t: &PreparedString,
        goal: (usize, usize),
    ) -> Vec<EditNode> {
        let mut out = Vec::new();
        walk(m, s, t, goal, |n| out.push(n));
        out
    }

    #[test]
    fn symbols() {
        assert_eq!(EditOp::Match { letter: 'a' }.symbol(), 'M');
        assert_eq!(EditOp::Substitute { from: 'a', to: 'b' }.symbol(), 'S');
        assert_eq!(EditOp::Insert { letter: 'a' }.symbol(), 'I');
        assert_eq!(EditOp::Delete { letter: 'a' }.symbol(), 'D');
        assert!(!EditOp::Match { letter: 'a' }.is_edit());
        assert!(EditOp::Delete { letter: 'a' }.is_edit());
    }

    #[test]
    fn walk_emits_in_source_order() {
        // source "ab", target "xb": delete a, insert x, match b.
        let s = PreparedString::new("ab", true, 10);
        let t = PreparedString::new("xb", true, 10);
        let mut m = Matrix::new();
        m.ensure(3, 3);
        m.set(1, 0, 1.0, Parent::Delete);
        m.set(1, 1, 2.0, Parent::Insert);
        m.set(2, 2, 2.0, Parent::Match);

        let path = collect_walk(&m, &s, &t, (2, 2));
        assert_eq!(
            path,
            vec![
                EditNode {
                    i: 0,
                    j: None,
                    op: EditOp::Delete { letter: 'a' }
                },
                EditNode {
                    i: 1,
                    j: Some(0),
                    op: EditOp::Insert { letter: 'x' }
                },
                EditNode {
                    i: 1,
                    j: Some(1),
                    op: EditOp::Match { letter: 'b' }
                },
            ]
        );
    }

    #[test]
    fn walk_stops_at_origin() {
        let s = PreparedString::new("q", true, 10);
        let t = PreparedString::new("zq", true, 10);
        let mut m = Matrix::new();
        m.ensure(2, 3);
        // Substring-style free start at (0, 1).
        m.set(1, 2, 0.0, Parent::Match);

        let path = collect_walk(&m, &s, &t, (1, 2));
        assert_eq!(path.len(), 1);
        assert_eq!(path[0].op, EditOp::Match { letter: 'q' });
        assert_eq!((path[0].i, path[0].j), (0, Some(1)));

        assert!(collect_walk(&m, &s, &t, (0, 0)).is_empty());
    }

    #[test]
    fn straight_runs() {
        let empty = PreparedString::default();
        let word = PreparedString::new("abc", true, 10);

        let mut inserts = Vec::new();
        straight_run(&empty, &word, |n| inserts.push(n));
        assert_eq!(inserts.len(), 3);
        assert!(inserts.iter().all(|n| n.i == 0));
        assert_eq!(inserts[2].j, Some(2));
        assert_eq!(inserts[2].op, EditOp::Insert { letter: 'c' });

        let mut deletes = Vec::new();
        straight_run(&word, &empty, |n| deletes.push(n));
        assert_eq!(deletes.len(), 3);
        assert_eq!(deletes[1].i, 1);
        assert!(deletes.iter().all(|n| n.j.is_none()));

        let mut none = Vec::new();
        straight_run(&empty, &empty, |n| none.push(n));
        assert!(none.is_empty());
    }
}
