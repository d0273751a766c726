//! Matrix Manager: the growable cost/parent grid.
//!
//! The grid is a single flat buffer addressed by `i * cols + j`. It only ever
//! grows: processing a smaller pair after a larger one reuses the existing
//! allocation and leaves the cells outside the active `[0..L1) x [0..L2)`
//! window untouched. Those stale cells are never read by the engine.

/// Operation that produced a cell's optimal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    /// Boundary origin: reachable at zero cost with no prior operation.
    Origin,
    Match,
    Insert,
    Delete,
}

/// One DP cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub cost: f64,
    pub parent: Parent,
}

impl Cell {
    pub const ORIGIN: Cell = Cell {
        cost: 0.0,
        parent: Parent::Origin,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Cell::ORIGIN
    }
}

/// Flat, monotonically growing 2D grid of [`Cell`]s.
#[derive(Debug, Clone, Default)]
pub struct Matrix {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocated row count (never decreases).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Allocated column count (never decreases).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Guarantee at least `rows x cols` cells. Returns `true` if the buffer
    /// was reallocated.
    ///
    /// Existing cells keep their values at the same `(i, j)`; new cells
    /// start as [`Cell::ORIGIN`].
    pub fn ensure(&mut self, rows: usize, cols: usize) -> bool {
        let new_rows = self.rows.max(rows);
        let new_cols = self.cols.max(cols);
        if new_rows == self.rows && new_cols == self.cols {
            return false;
        }

        if new_cols == self.cols {
            // Same row stride: appending rows is enough.
            self.cells.resize(new_rows * new_cols, Cell::ORIGIN);
        } else {
            let mut cells = vec![Cell::ORIGIN; new_rows * new_cols];
            for (i, row) in self.cells.chunks_exact(self.cols.max(1)).enumerate() {
                if i >= self.rows {
                    break;
                }
                let start = i * new_cols;
                cells[start..start + self.cols].copy_from_slice(row);
            }
            self.cells = cells;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            from_rows = self.rows,
            from_cols = self.cols,
            rows = new_rows,
            cols = new_cols,
            "matrix grown"
        );

        self.rows = new_rows;
        self.cols = new_cols;
        true
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols, "cell ({i},{j}) out of bounds");
        i * self.cols + j
    }

    /// Read a cell, or `None` outside the allocated area.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<&Cell> {
        if i < self.rows && j < self.cols {
            self.cells.get(i * self.cols + j)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn cost(&self, i: usize, j: usize) -> f64 {
        self.cells[self.index(i, j)].cost
    }

    #[inline]
    pub(crate) fn parent(&self, i: usize, j: usize) -> Parent {
        self.cells[self.index(i, j)].parent
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, cost: f64, parent: Parent) {
        let idx = self.index(i, j);
        self.cells[idx] = Cell { cost, parent };
    }

    /// Row `i`, full allocated width.
    pub fn row(&self, i: usize) -> &[Cell] {
        if i >= self.rows {
            return &[];
        }
        let start = i * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [Cell] {
        if i >= self.rows {
            return &mut [];
        }
        let start = i * self.cols;
        let end = start + self.cols;
        &mut self.cells[start..end]
    }
}
