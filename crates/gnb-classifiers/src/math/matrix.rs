use std::error::Error;
use std::fmt;
use std::ops::{Index, IndexMut, RangeBounds};

use num_traits::Zero;

use crate::math::vector::Array1;

/// Row-major 2D container. Rows are samples, columns are features.
#[derive(Clone, Debug, PartialEq)]
pub struct Array2<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2<T> {
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<T>) -> Result<Self, ShapeError> {
        let (rows, cols) = shape;
        if data.len() != rows * cols {
            return Err(ShapeError {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for shape ({}, {})",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.data[start..start + self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }

    pub fn column(&self, col: usize) -> Array1<T>
    where
        T: Clone,
    {
        assert!(col < self.cols, "column index out of bounds");
        self.rows().map(|row| row[col].clone()).collect()
    }

    pub fn select_rows(&self, indices: &[usize]) -> Array2<T>
    where
        T: Clone,
    {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &row in indices {
            assert!(
                row < self.rows,
                "row index {} out of bounds for {} rows",
                row,
                self.rows
            );
            let start = row * self.cols;
            data.extend_from_slice(&self.data[start..start + self.cols]);
        }
        Array2 {
            data,
            rows: indices.len(),
            cols: self.cols,
        }
    }

    pub fn select_columns<R>(&self, range: R) -> Array2<T>
    where
        R: RangeBounds<usize>,
        T: Clone,
    {
        use std::ops::Bound;

        let start = match range.start_bound() {
            Bound::Unbounded => 0,
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
        };

        let end = match range.end_bound() {
            Bound::Unbounded => self.cols,
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
        };

        assert!(
            start <= end && end <= self.cols,
            "column slice out of bounds"
        );

        let new_cols = end - start;
        let mut data = Vec::with_capacity(self.rows * new_cols);
        for row in self.rows() {
            data.extend_from_slice(&row[start..end]);
        }

        Array2 {
            data,
            rows: self.rows,
            cols: new_cols,
        }
    }
}

impl<T> Array2<T>
where
    T: Clone + Zero,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Array2 {
            data: vec![T::zero(); rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> Index<(usize, usize)> for Array2<T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let offset = self.offset(index.0, index.1);
        &self.data[offset]
    }
}

impl<T> IndexMut<(usize, usize)> for Array2<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index.0, index.1);
        &mut self.data[offset]
    }
}

/// Renders one bracketed line per row with right-aligned cells:
///
/// ```text
/// [[10  0  0]
///  [ 0  9  1]
///  [ 0  0 10]]
/// ```
impl<T: fmt::Display> fmt::Display for Array2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(|v| v.to_string()).collect();
        let width = cells.iter().map(|c| c.len()).max().unwrap_or(0);

        write!(f, "[")?;
        for r in 0..self.rows {
            if r > 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cells[r * self.cols + c], width = width)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeError {
    rows: usize,
    cols: usize,
    len: usize,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid shape ({}, {}) for buffer of length {}",
            self.rows, self.cols, self.len
        )
    }
}

impl Error for ShapeError {}
