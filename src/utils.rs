//! String preparation helpers.
//!
//! Inputs are truncated, optionally case-folded, and given a leading
//! sentinel so that index `i` of a prepared string lines up with row/column
//! `i` of the DP matrix.

/// Default maximum number of characters considered per input string.
///
/// Bounds the matrix at `(DEFAULT_MAX_LEN + 1)^2` cells.
pub const DEFAULT_MAX_LEN: usize = 1000;

const SENTINEL: char = '\0';

/// A truncated, optionally case-folded string with a leading sentinel.
///
/// `len()` counts the sentinel, so an empty input has length 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedString {
    chars: Vec<char>,
}

impl Default for PreparedString {
    fn default() -> Self {
        Self {
            chars: vec![SENTINEL],
        }
    }
}

impl PreparedString {
    /// Truncate `raw` to `max_len` characters, then lowercase unless
    /// `case_sensitive`.
    pub fn new(raw: &str, case_sensitive: bool, max_len: usize) -> Self {
        let mut chars = Vec::with_capacity(max_len.min(raw.len()) + 1);
        chars.push(SENTINEL);
        if case_sensitive {
            chars.extend(raw.chars().take(max_len));
        } else {
            // Folding can expand a character, so fold after truncating.
            chars.extend(raw.chars().take(max_len).flat_map(char::to_lowercase));
        }
        Self { chars }
    }

    /// Length including the sentinel.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True if no real characters follow the sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.len() <= 1
    }

    /// Real character at matrix index `i` (1-based). `None` for the sentinel
    /// slot or past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<char> {
        if i == 0 {
            None
        } else {
            self.chars.get(i).copied()
        }
    }

    /// Character at matrix index `i`, for indices the caller knows are real.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> char {
        debug_assert!(i > 0 && i < self.chars.len());
        self.chars[i]
    }

    /// The real characters, sentinel excluded.
    #[inline]
    pub fn chars(&self) -> &[char] {
        &self.chars[1..]
    }

    /// The prepared text as an owned string.
    pub fn to_text(&self) -> String {
        self.chars().iter().collect()
    }
}
