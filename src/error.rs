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

//! Error types for frame conversions.

use core::fmt::{Display, Formatter};

/// Errors from frame conversions.
///
/// Only structural preconditions of a call are errors. Degenerate values
/// inside a batch (the Earth's centre, a missing timestamp) propagate as NaN
/// in their own slot instead.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An array has more than two dimensions.
    Rank(usize),
    /// The data length does not match the product of the array shape.
    DataLength { expected: usize, found: usize },
    /// Neither axis of a coordinate array is a triplet width of 3.
    Shape { rows: usize, cols: usize },
    /// Batch inputs that must be parallel have different lengths.
    LengthMismatch { expected: usize, found: usize },
    /// The ellipsoid parameters are outside their valid ranges.
    InvalidEllipsoid { a: f64, f: f64 },
    /// A sidereal time source cannot provide a value for the instant.
    SiderealUnavailable(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rank(rank) => write!(f, "expected an array of rank 1 or 2, found rank {rank}"),
            Self::DataLength { expected, found } => {
                write!(f, "array shape requires {expected} values, found {found}")
            }
            Self::Shape { rows, cols } => {
                write!(f, "expected Nx3 or 3xN triplets, found {rows}x{cols}")
            }
            Self::LengthMismatch { expected, found } => {
                write!(f, "batch length mismatch: expected {expected}, found {found}")
            }
            Self::InvalidEllipsoid { a, f: flattening } => write!(
                f,
                "invalid ellipsoid: semimajor axis {a} must be positive and flattening {flattening} in [0, 1)"
            ),
            Self::SiderealUnavailable(msg) => write!(f, "sidereal time unavailable: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
