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

//! The inertial module contains functions for rotating positions between
//! the Earth-Centred, Earth-Fixed (ECEF) and Earth-Centred Inertial (ECI)
//! frames.
//!
//! The frames share their origin and polar axis, so the conversion is a
//! single rotation about the polar axis by the Greenwich sidereal angle of
//! each position's `Epoch`.
//! The conversion is idealized: it does not model nutation, precession or
//! polar motion like the IAU-76/FK5 or IAU-2000/2006 models.

#![allow(clippy::suboptimal_flops)]

use crate::conversions::LocalFrame;
use crate::geodetic::{self, NewtonOptions};
use crate::local::Aer;
use crate::time::{Epoch, MeanSiderealTime, SiderealTime};
use crate::{AngleUnit, ArrayView, Cartesian, Ellipsoid, Error, Geodetic};

/// The matrix of a rotation by `theta` radians about the z axis:
/// ```text
/// R(θ) = [ cosθ  sinθ  0 ]
///        [-sinθ  cosθ  0 ]
///        [  0     0    1 ]
/// ```
#[must_use]
pub fn rotation_matrix(theta: f64) -> [[f64; 3]; 3] {
    let (sin_theta, cos_theta) = (libm::sin(theta), libm::cos(theta));
    [
        [cos_theta, sin_theta, 0.0],
        [-sin_theta, cos_theta, 0.0],
        [0.0, 0.0, 1.0],
    ]
}

/// Multiply a position by a matrix.
fn rotate(matrix: &[[f64; 3]; 3], position: &Cartesian) -> Cartesian {
    let v = position.to_array();
    let row = |i: usize| matrix[i][0] * v[0] + matrix[i][1] * v[1] + matrix[i][2] * v[2];
    Cartesian::new(row(0), row(1), row(2))
}

/// Multiply a position by the transpose of a matrix.
fn rotate_transposed(matrix: &[[f64; 3]; 3], position: &Cartesian) -> Cartesian {
    let v = position.to_array();
    let col = |j: usize| matrix[0][j] * v[0] + matrix[1][j] * v[1] + matrix[2][j] * v[2];
    Cartesian::new(col(0), col(1), col(2))
}

fn check_lengths(positions: usize, epochs: usize) -> Result<(), Error> {
    if positions == epochs {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            expected: positions,
            found: epochs,
        })
    }
}

/// Rotate ECEF positions into the ECI frame, calculating the sidereal
/// angles of timestamps with `source`.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn ecef_to_eci_with<S: SiderealTime + ?Sized>(
    positions: &[Cartesian],
    epochs: &[Epoch],
    source: &S,
) -> Result<Vec<Cartesian>, Error> {
    check_lengths(positions.len(), epochs.len())?;
    Ok(positions
        .iter()
        .zip(epochs)
        .map(|(position, epoch)| {
            rotate_transposed(&rotation_matrix(epoch.angle_with(source)), position)
        })
        .collect())
}

/// Rotate ECI positions into the ECEF frame, calculating the sidereal
/// angles of timestamps with `source`.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn eci_to_ecef_with<S: SiderealTime + ?Sized>(
    positions: &[Cartesian],
    epochs: &[Epoch],
    source: &S,
) -> Result<Vec<Cartesian>, Error> {
    check_lengths(positions.len(), epochs.len())?;
    Ok(positions
        .iter()
        .zip(epochs)
        .map(|(position, epoch)| rotate(&rotation_matrix(epoch.angle_with(source)), position))
        .collect())
}

/// Rotate ECEF positions into the ECI frame.
/// * `positions` - the ECEF positions in metres.
/// * `epochs` - the `Epoch` of each position.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
///
/// # Examples
/// ```
/// use wgs84_frames::{inertial, Cartesian, Epoch};
///
/// // A quarter turn of the Earth
/// let epochs = [Epoch::Sidereal(core::f64::consts::FRAC_PI_2)];
/// let eci = inertial::ecef_to_eci(&[Cartesian::new(1.0, 0.0, 0.0)], &epochs).unwrap();
/// assert!(eci[0].x.abs() < 1e-15);
/// assert!((eci[0].y - 1.0).abs() < 1e-15);
/// ```
pub fn ecef_to_eci(positions: &[Cartesian], epochs: &[Epoch]) -> Result<Vec<Cartesian>, Error> {
    ecef_to_eci_with(positions, epochs, &MeanSiderealTime)
}

/// Rotate ECI positions into the ECEF frame.
/// * `positions` - the ECI positions in metres.
/// * `epochs` - the `Epoch` of each position.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn eci_to_ecef(positions: &[Cartesian], epochs: &[Epoch]) -> Result<Vec<Cartesian>, Error> {
    eci_to_ecef_with(positions, epochs, &MeanSiderealTime)
}

/// Rotate an Nx3 array of ECEF triplets into the ECI frame.
///
/// # Errors
///
/// `Error::Shape` if the array does not have 3 columns,
/// `Error::LengthMismatch` if there is not one epoch per row.
pub fn ecef_array_to_eci(array: &ArrayView, epochs: &[Epoch]) -> Result<Vec<[f64; 3]>, Error> {
    let positions = array.triplet_rows()?;
    Ok(crate::array::to_triplets(&ecef_to_eci(&positions, epochs)?))
}

/// Rotate an Nx3 array of ECI triplets into the ECEF frame.
///
/// # Errors
///
/// `Error::Shape` if the array does not have 3 columns,
/// `Error::LengthMismatch` if there is not one epoch per row.
pub fn eci_array_to_ecef(array: &ArrayView, epochs: &[Epoch]) -> Result<Vec<[f64; 3]>, Error> {
    let positions = array.triplet_rows()?;
    Ok(crate::array::to_triplets(&eci_to_ecef(&positions, epochs)?))
}

/// Convert ECI positions to geodetic positions.
/// * `positions` - the ECI positions in metres.
/// * `epochs` - the `Epoch` of each position.
/// * `unit` - the unit of the returned latitudes and longitudes.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn eci_to_geodetic(
    positions: &[Cartesian],
    epochs: &[Epoch],
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Result<Vec<Geodetic>, Error> {
    let ecef = eci_to_ecef(positions, epochs)?;
    Ok(geodetic::ecef_to_geodetic_batch(
        &ecef,
        unit,
        ellipsoid,
        &NewtonOptions::default(),
    ))
}

/// Convert ECI positions to AER in an observer's local frame.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn eci_to_aer(
    positions: &[Cartesian],
    epochs: &[Epoch],
    frame: &LocalFrame,
) -> Result<Vec<Aer>, Error> {
    let ecef = eci_to_ecef(positions, epochs)?;
    Ok(frame.ecef_to_aer_batch(&ecef))
}

/// Convert AER positions in an observer's local frame to ECI.
///
/// # Errors
///
/// `Error::LengthMismatch` if there is not one epoch per position.
pub fn aer_to_eci(
    positions: &[Aer],
    epochs: &[Epoch],
    frame: &LocalFrame,
) -> Result<Vec<Cartesian>, Error> {
    ecef_to_eci(&frame.aer_to_ecef_batch(positions), epochs)
}
