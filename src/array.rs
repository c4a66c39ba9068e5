// Copyright (c) 2024-2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The array module contains `ArrayView`, a borrowed row-major view of a
//! numeric array of rank one or two, used to pass batches of coordinate
//! triplets whose layout is only known at run time.

use crate::{Cartesian, Error};

/// A borrowed, row-major view of an array of rank one or two.
///
/// A rank one array of length n is treated as a single row: 1xn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrayView<'a> {
    data: &'a [f64],
    rows: usize,
    cols: usize,
}

impl<'a> ArrayView<'a> {
    /// Constructor.
    /// * `data` - the array values in row-major order.
    /// * `shape` - the array dimensions.
    ///
    /// # Errors
    ///
    /// `Error::Rank` if `shape` has more than two dimensions,
    /// `Error::DataLength` if `data` does not hold exactly the values that
    /// `shape` describes, `expected` is `usize::MAX` if their number
    /// overflows.
    pub fn new(data: &'a [f64], shape: &[usize]) -> Result<Self, Error> {
        let (rows, cols) = match *shape {
            [] => (1, 1),
            [n] => (1, n),
            [m, n] => (m, n),
            _ => return Err(Error::Rank(shape.len())),
        };
        match rows.checked_mul(cols) {
            Some(expected) if expected == data.len() => Ok(Self { data, rows, cols }),
            expected => Err(Error::DataLength {
                expected: expected.unwrap_or(usize::MAX),
                found: data.len(),
            }),
        }
    }

    /// Construct an Nx3 view of a slice of triplets.
    #[must_use]
    pub fn from_triplets(triplets: &'a [[f64; 3]]) -> Self {
        Self {
            data: triplets.as_flattened(),
            rows: triplets.len(),
            cols: 3,
        }
    }

    /// The number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The value at `row`, `col`.
    ///
    /// # Panics
    ///
    /// If `row` or `col` is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Unpack the array into positions, accepting either a 3xN array (one
    /// row per axis) or an Nx3 array (one row per position).
    ///
    /// A 3x3 array is read as 3xN.
    ///
    /// # Errors
    ///
    /// `Error::Shape` if neither dimension is 3.
    pub fn triplets(&self) -> Result<Vec<Cartesian>, Error> {
        if self.rows == 3 {
            Ok((0..self.cols)
                .map(|i| Cartesian::new(self.get(0, i), self.get(1, i), self.get(2, i)))
                .collect())
        } else {
            self.triplet_rows()
        }
    }

    /// Unpack an Nx3 array into positions, one per row.
    ///
    /// # Errors
    ///
    /// `Error::Shape` if the array does not have 3 columns.
    pub fn triplet_rows(&self) -> Result<Vec<Cartesian>, Error> {
        if self.cols == 3 {
            Ok(self
                .data
                .chunks_exact(3)
                .map(|row| Cartesian::new(row[0], row[1], row[2]))
                .collect())
        } else {
            Err(Error::Shape {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

/// Convert positions back into Nx3 triplets.
#[must_use]
pub fn to_triplets(positions: &[Cartesian]) -> Vec<[f64; 3]> {
    positions.iter().map(|p| p.to_array()).collect()
}
