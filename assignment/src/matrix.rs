use std::ops::{Index, IndexMut};

use p3::{field::PrimeCharacteristicRing, matrix::dense::RowMajorMatrix};
use rayon::prelude::*;

/// One region of the assignment table: `height` rows by `width` columns in
/// row-major order. The height is fixed; columns can be appended.
#[derive(Clone, Debug)]
pub struct ColumnMatrix<T: Sized + Sync + Clone + Send + Copy> {
    inner: RowMajorMatrix<T>,
    height: usize,
}

impl<T: Sized + Sync + Clone + Send + Copy + Default + PrimeCharacteristicRing> ColumnMatrix<T> {
    pub fn new(height: usize, width: usize) -> Self {
        let values = (0..height * width)
            .into_par_iter()
            .map(|_| T::default())
            .collect();
        Self {
            inner: RowMajorMatrix::new(values, width),
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.inner.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, column: usize, row: usize) -> T {
        self[row][column]
    }

    pub fn set(&mut self, column: usize, row: usize, value: T) {
        self[row][column] = value;
    }

    pub fn column(&self, column: usize) -> Vec<T> {
        self.inner
            .values
            .iter()
            .skip(column)
            .step_by(self.width())
            .copied()
            .collect()
    }

    pub fn columns(&self) -> Vec<Vec<T>> {
        (0..self.width())
            .into_par_iter()
            .map(|column| self.column(column))
            .collect()
    }

    /// Appends zero columns until the matrix is `width` wide.
    pub fn grow_to(&mut self, width: usize) {
        let old_width = self.width();
        if width <= old_width {
            return;
        }
        let mut values = Vec::with_capacity(self.height * width);
        for row in 0..self.height {
            values.extend_from_slice(&self.inner.values[row * old_width..][..old_width]);
            values.extend(std::iter::repeat(T::default()).take(width - old_width));
        }
        self.inner = RowMajorMatrix::new(values, width);
    }
}

impl<T: Sized + Sync + Clone + Send + Copy> Index<usize> for ColumnMatrix<T> {
    type Output = [T];

    fn index(&self, row: usize) -> &Self::Output {
        let width = self.inner.width;
        &self.inner.values[width * row..][..width]
    }
}

impl<T: Sized + Sync + Clone + Send + Copy> IndexMut<usize> for ColumnMatrix<T> {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        let width = self.inner.width;
        &mut self.inner.values[width * row..][..width]
    }
}
