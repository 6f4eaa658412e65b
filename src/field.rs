use std::ops::{Index, IndexMut};

use crate::error::{SimError, SimResult};

/// Row-major index for cells known to be in range.
/// Use only when `row < rows` and `col < cols`.
#[inline(always)]
pub const fn idx(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// Fixed-shape 2D scalar buffer, row-major, zero-initialised.
///
/// Coordinate access through [`Field::at`] / [`Field::at_mut`] clamps into
/// the grid, so an out-of-range coordinate lands on the nearest edge cell.
/// Linear access through `field[i]` requires `i < size()` and panics
/// otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Field {
    pub fn new(rows: usize, cols: usize) -> SimResult<Self> {
        let size = rows
            .checked_mul(cols)
            .ok_or(SimError::FieldTooLarge { rows, cols })?;
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|source| SimError::Allocation { rows, cols, source })?;
        data.resize(size, 0.0);
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_shape_equal(&self, other: &Field) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    #[inline]
    fn clamped_index(&self, row: i32, col: i32) -> usize {
        debug_assert!(!self.is_empty(), "coordinate access on an empty field");
        let r = row.clamp(0, self.rows as i32 - 1) as usize;
        let c = col.clamp(0, self.cols as i32 - 1) as usize;
        idx(r, c, self.cols)
    }

    /// Value at `(row, col)`, clamped into the grid.
    #[inline]
    pub fn at(&self, row: i32, col: i32) -> f32 {
        self.data[self.clamped_index(row, col)]
    }

    /// Mutable cell at `(row, col)`, clamped into the grid.
    #[inline]
    pub fn at_mut(&mut self, row: i32, col: i32) -> &mut f32 {
        let i = self.clamped_index(row, col);
        &mut self.data[i]
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f32> {
        self.data.iter_mut()
    }
}

impl Index<usize> for Field {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Field {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.data[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let f = Field::new(4, 6).unwrap();
        assert_eq!(f.rows(), 4);
        assert_eq!(f.cols(), 6);
        assert_eq!(f.size(), 24);
        assert!(!f.is_empty());
        assert!(f.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_empty_field() {
        let f = Field::new(0, 5).unwrap();
        assert!(f.is_empty());
        assert_eq!(f.size(), 0);
    }

    #[test]
    fn test_overflowing_size_is_rejected() {
        let r = Field::new(usize::MAX, 2);
        assert!(matches!(r, Err(SimError::FieldTooLarge { .. })));
    }

    #[test]
    fn test_shape_equality() {
        let a = Field::new(3, 4).unwrap();
        let b = Field::new(3, 4).unwrap();
        let c = Field::new(4, 3).unwrap();
        assert!(a.is_shape_equal(&b));
        assert!(!a.is_shape_equal(&c));
        assert!(!a.is_square());
    }

    #[test]
    fn test_at_is_row_major() {
        let mut f = Field::new(3, 4).unwrap();
        *f.at_mut(1, 2) = 7.0;
        assert_eq!(f[idx(1, 2, 4)], 7.0);
        assert_eq!(f[6], 7.0);
        assert_eq!(f.at(1, 2), 7.0);
    }

    #[test]
    fn test_at_clamps_out_of_range() {
        let mut f = Field::new(5, 5).unwrap();
        *f.at_mut(-3, 2) += 1.0;
        *f.at_mut(2, 99) += 2.0;
        *f.at_mut(100, -100) += 3.0;
        assert_eq!(f.at(0, 2), 1.0);
        assert_eq!(f.at(2, 4), 2.0);
        assert_eq!(f.at(4, 0), 3.0);
        // Reads clamp the same way.
        assert_eq!(f.at(-1, 2), 1.0);
        assert_eq!(f.at(5, -1), 3.0);
    }

    #[test]
    #[should_panic]
    fn test_linear_index_out_of_range_panics() {
        let f = Field::new(3, 3).unwrap();
        let _ = f[9];
    }
}
