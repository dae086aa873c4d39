//! Coding matrix kept in reduced row echelon form (RREF)

use crate::field::{FieldOps, FiniteField};
use std::fmt::Write;

/// Decoding matrix indexed by pivot column.
///
/// Row `c` is only meaningful once column `c` holds a pivot; every stored row
/// is normalized so its pivot coefficient is one, and every other stored row
/// is zero at that column.
#[derive(Debug, Clone)]
pub struct CodingMatrix {
    field: FiniteField,
    /// Flat storage, one packed coefficient vector per column (row-major)
    data: Vec<u8>,
    cols: usize,
    vector_size: usize,
    pivots: Vec<bool>,
    rank: usize,
}

impl CodingMatrix {
    /// Create an empty matrix for a generation of `cols` symbols
    pub fn new(field: FiniteField, cols: usize) -> Self {
        let vector_size = field.elements_to_bytes(cols);
        Self {
            field,
            data: vec![0; cols * vector_size],
            cols,
            vector_size,
            pivots: vec![false; cols],
            rank: 0,
        }
    }

    /// Number of columns (source symbols)
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size of a packed row in bytes
    #[inline]
    pub fn vector_size(&self) -> usize {
        self.vector_size
    }

    /// Current rank of the matrix
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Check if the matrix is full rank
    #[inline]
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.cols
    }

    /// Whether column `col` holds a pivot
    #[inline]
    pub fn is_pivot(&self, col: usize) -> bool {
        self.pivots[col]
    }

    /// Packed row stored at pivot column `col`
    #[inline]
    pub fn row(&self, col: usize) -> &[u8] {
        let start = col * self.vector_size;
        &self.data[start..start + self.vector_size]
    }

    #[inline]
    fn row_mut(&mut self, col: usize) -> &mut [u8] {
        let start = col * self.vector_size;
        &mut self.data[start..start + self.vector_size]
    }

    /// Eliminate every existing pivot from `incoming`.
    ///
    /// `on_step(pivot, factor)` is called for each subtracted row so the
    /// caller can apply the same operation to the symbol.
    pub fn reduce<S>(&self, incoming: &mut [u8], mut on_step: S)
    where
        S: FnMut(usize, u32),
    {
        debug_assert_eq!(incoming.len(), self.vector_size);
        for col in 0..self.cols {
            if !self.pivots[col] {
                continue;
            }
            let factor = self.field.get_value(incoming, col);
            if factor != 0 {
                self.field.multiply_subtract(incoming, self.row(col), factor);
                on_step(col, factor);
            }
        }
    }

    /// First nonzero column of `vector`, if any
    pub fn leading_column(&self, vector: &[u8]) -> Option<usize> {
        (0..self.cols).find(|&col| self.field.get_value(vector, col) != 0)
    }

    /// Check if `coefficients` would increase the rank
    pub fn check_rank_increase(&self, coefficients: &[u8]) -> bool {
        if self.is_full_rank() {
            return false;
        }
        let mut transformed = coefficients.to_vec();
        self.reduce(&mut transformed, |_, _| {});
        self.leading_column(&transformed).is_some()
    }

    /// Remove column `col` from every stored row using the normalized
    /// `new_row`, reporting each touched row through `on_step(row, factor)`
    pub fn back_substitute<S>(&mut self, col: usize, new_row: &[u8], mut on_step: S)
    where
        S: FnMut(usize, u32),
    {
        let field = self.field;
        for row in 0..self.cols {
            if row == col || !self.pivots[row] {
                continue;
            }
            let factor = field.get_value(self.row(row), col);
            if factor != 0 {
                field.multiply_subtract(self.row_mut(row), new_row, factor);
                on_step(row, factor);
            }
        }
    }

    /// Store `row` as the pivot row of column `col`.
    ///
    /// Panics if the column already holds a pivot.
    pub fn insert(&mut self, col: usize, row: &[u8]) {
        assert!(!self.pivots[col], "column {col} already holds a pivot");
        debug_assert_eq!(self.field.get_value(row, col), 1);
        self.row_mut(col).copy_from_slice(row);
        self.pivots[col] = true;
        self.rank += 1;
    }

    /// Whether the row at `col` has collapsed to the unit vector
    pub fn is_unit_row(&self, col: usize) -> bool {
        self.pivots[col]
            && (0..self.cols)
                .filter(|&c| c != col)
                .all(|c| self.field.get_value(self.row(col), c) == 0)
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.pivots.fill(false);
        self.rank = 0;
    }

    /// One line per column: index, a state mark, then the coefficients
    pub fn describe<M>(&self, mark: M) -> String
    where
        M: Fn(usize) -> char,
    {
        let mut out = String::new();
        for col in 0..self.cols {
            let _ = write!(out, "{col} {}:", mark(col));
            for c in 0..self.cols {
                let value = if self.pivots[col] {
                    self.field.get_value(self.row(col), c)
                } else {
                    0
                };
                let _ = write!(out, " {value}");
            }
            out.push('\n');
        }
        out
    }
}
