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

//! The geodetic module contains functions for converting between geodetic
//! and Earth-Centred, Earth-Fixed (ECEF) Cartesian coordinates.
//!
//! Geodetic to ECEF is a closed form.  
//! ECEF to geodetic solves the latitude equation in terms of the
//! `parametric` latitude by Newton's method, see:
//! K. M. Borkowski, [Accurate algorithms to transform geocentric to geodetic coordinates](http://www.astro.uni.torun.pl/~kb/Papers/geod/Geod-BG.htm).
//! The method provides a uniform solution over all latitudes since it does
//! not divide by the sine or cosine of the latitude.

#![allow(clippy::suboptimal_flops)]

use crate::{Angle, AngleUnit, ArrayView, Cartesian, Ellipsoid, Error, Geodetic, Radians};

/// The default maximum number of Newton iterations.  
/// The method converges to machine precision in 2 or 3 iterations for any
/// physically realisable position.
pub const MAX_ITERATIONS: u32 = 5;

/// The default convergence tolerance of the parametric latitude.
pub const TOLERANCE: Radians = Radians(1e-12);

/// The options of the Newton iteration for the parametric latitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonOptions {
    /// The maximum number of iterations.
    pub max_iterations: u32,
    /// Iteration stops when every step is smaller than this.
    pub tolerance: Radians,
    /// If the iteration cap is reached with a final step larger than this,
    /// a warning is logged.
    pub warn_threshold: Option<Radians>,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: TOLERANCE,
            warn_threshold: None,
        }
    }
}

/// Convert a geodetic position to ECEF coordinates.
/// * `position` - the geodetic position, angles in `unit`.
/// * `unit` - the unit of the latitude and longitude.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the ECEF position in metres.
///
/// # Examples
/// ```
/// use wgs84_frames::{geodetic, AngleUnit, Geodetic, WGS84_ELLIPSOID};
///
/// let position = Geodetic::new(42.0, -82.0, 200.0);
/// let ecef = geodetic::geodetic_to_ecef(&position, AngleUnit::Degrees, &WGS84_ELLIPSOID);
/// assert!((ecef.x - 660_675.252).abs() < 1e-3);
/// assert!((ecef.y + 4_700_948.683).abs() < 1e-3);
/// assert!((ecef.z - 4_245_737.662).abs() < 1e-3);
/// ```
#[must_use]
pub fn geodetic_to_ecef(position: &Geodetic, unit: AngleUnit, ellipsoid: &Ellipsoid) -> Cartesian {
    let lat = unit.to_angle(position.lat);
    let lon = unit.to_angle(position.lon);
    let n = ellipsoid.calculate_radius_normal(lat).0;

    let r = (n + position.alt) * lat.cos().0;
    Cartesian::new(
        r * lon.cos().0,
        r * lon.sin().0,
        (n * (1.0 - ellipsoid.e_2()) + position.alt) * lat.sin().0,
    )
}

/// Convert geodetic positions to ECEF coordinates.
#[must_use]
pub fn geodetic_to_ecef_batch(
    positions: &[Geodetic],
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Vec<Cartesian> {
    positions
        .iter()
        .map(|position| geodetic_to_ecef(position, unit, ellipsoid))
        .collect()
}

/// The latitude equation of a position in terms of its parametric latitude.
#[derive(Clone, Copy, Debug)]
struct LatitudeEquation {
    /// The distance from the polar axis.
    rad: f64,
    z: f64,
    rho: f64,
    c: f64,
}

impl LatitudeEquation {
    fn new(position: &Cartesian, ellipsoid: &Ellipsoid) -> Self {
        let a = ellipsoid.a().0;
        let b = ellipsoid.b().0;
        let rad = libm::hypot(position.x, position.y);
        Self {
            rad,
            z: position.z,
            rho: libm::atan2(b * position.z, a * rad),
            c: a * a * ellipsoid.e_2() / libm::hypot(a * rad, b * position.z),
        }
    }

    /// The starting estimate of the parametric latitude.
    fn initial_estimate(&self, a: f64, b: f64) -> f64 {
        libm::atan2(a * self.z, b * self.rad)
    }

    /// The Newton step to subtract from the estimate `v`.
    fn newton_step(&self, v: f64) -> f64 {
        let two_v = 2.0 * v;
        (2.0 * libm::sin(v - self.rho) - self.c * libm::sin(two_v))
            / (2.0 * (libm::cos(v - self.rho) - self.c * libm::cos(two_v)))
    }
}

/// Solve the latitude equations for their parametric latitudes.
///
/// Every estimate is updated on every iteration while any finite estimate
/// has not converged, up to `options.max_iterations`. Estimates that are not
/// finite (e.g. at the centre of the ellipsoid) are left to propagate NaN.
///
/// returns the parametric latitudes in radians and the number of iterations.
fn solve_parametric_latitudes(
    equations: &[LatitudeEquation],
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> (Vec<f64>, u32) {
    let a = ellipsoid.a().0;
    let b = ellipsoid.b().0;
    let mut v: Vec<f64> = equations
        .iter()
        .map(|equation| equation.initial_estimate(a, b))
        .collect();

    let mut largest_step = 0.0;
    for iteration in 1..=options.max_iterations {
        largest_step = 0.0_f64;
        for (estimate, equation) in v.iter_mut().zip(equations) {
            let step = equation.newton_step(*estimate);
            *estimate -= step;
            if step.is_finite() {
                largest_step = largest_step.max(libm::fabs(step));
            }
        }

        if largest_step < options.tolerance.0 {
            return (v, iteration);
        }
    }

    if !equations.is_empty() && 0 < options.max_iterations {
        tracing::debug!(
            iterations = options.max_iterations,
            step = largest_step,
            "parametric latitude iteration cap reached"
        );
        if let Some(threshold) = options.warn_threshold {
            if threshold.0 < largest_step {
                tracing::warn!(
                    iterations = options.max_iterations,
                    step = largest_step,
                    threshold = threshold.0,
                    "parametric latitude did not converge"
                );
            }
        }
    }
    (v, options.max_iterations)
}

/// Calculate the geodetic position from a converged parametric latitude.
fn to_geodetic(
    position: &Cartesian,
    equation: &LatitudeEquation,
    v: f64,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Geodetic {
    if !v.is_finite() {
        return Geodetic::new(f64::NAN, f64::NAN, f64::NAN);
    }

    let a = ellipsoid.a().0;
    let b = ellipsoid.b().0;
    let lat = ellipsoid.calculate_geodetic_latitude(Angle::from(Radians(v)));
    // at the poles atan2 returns 0, the longitude is undefined
    let lon = libm::atan2(position.y, position.x);
    let alt = (equation.rad - a * libm::cos(v)) * lat.cos().0
        + (equation.z - b * libm::sin(v)) * lat.sin().0;

    Geodetic::new(
        unit.from_radians(Radians::from(lat).0),
        unit.from_radians(lon),
        alt,
    )
}

/// Convert ECEF positions to geodetic positions.
/// * `positions` - the ECEF positions in metres.
/// * `unit` - the unit of the returned latitudes and longitudes.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `options` - the Newton iteration options.
///
/// returns the geodetic positions and the number of iterations performed.
fn ecef_to_geodetic_iterations(
    positions: &[Cartesian],
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> (Vec<Geodetic>, u32) {
    let equations: Vec<LatitudeEquation> = positions
        .iter()
        .map(|position| LatitudeEquation::new(position, ellipsoid))
        .collect();
    let (v, iterations) = solve_parametric_latitudes(&equations, ellipsoid, options);

    let result = positions
        .iter()
        .zip(&equations)
        .zip(v)
        .map(|((position, equation), v)| to_geodetic(position, equation, v, unit, ellipsoid))
        .collect();
    (result, iterations)
}

/// Convert ECEF positions to geodetic positions.
/// * `positions` - the ECEF positions in metres.
/// * `unit` - the unit of the returned latitudes and longitudes.
/// * `ellipsoid` - the `Ellipsoid`.
/// * `options` - the Newton iteration options.
#[must_use]
pub fn ecef_to_geodetic_batch(
    positions: &[Cartesian],
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> Vec<Geodetic> {
    ecef_to_geodetic_iterations(positions, unit, ellipsoid, options).0
}

/// Convert an ECEF position to a geodetic position with the given Newton
/// iteration options.
#[must_use]
pub fn ecef_to_geodetic_with(
    position: &Cartesian,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> Geodetic {
    let (result, _) =
        ecef_to_geodetic_iterations(core::slice::from_ref(position), unit, ellipsoid, options);
    result[0]
}

/// Convert an ECEF position to a geodetic position.
/// * `position` - the ECEF position in metres.
/// * `unit` - the unit of the returned latitude and longitude.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// The longitude of a position on the polar axis is undefined and
/// returned as zero. The centre of the ellipsoid returns NaN.
///
/// # Examples
/// ```
/// use wgs84_frames::{geodetic, AngleUnit, Cartesian, WGS84_ELLIPSOID};
///
/// let ecef = Cartesian::new(660_675.252, -4_700_948.683, 4_245_737.662);
/// let position = geodetic::ecef_to_geodetic(&ecef, AngleUnit::Degrees, &WGS84_ELLIPSOID);
/// assert!((position.lat - 42.0).abs() < 1e-6);
/// assert!((position.lon + 82.0).abs() < 1e-6);
/// assert!((position.alt - 200.0).abs() < 1e-2);
/// ```
#[must_use]
pub fn ecef_to_geodetic(position: &Cartesian, unit: AngleUnit, ellipsoid: &Ellipsoid) -> Geodetic {
    ecef_to_geodetic_with(position, unit, ellipsoid, &NewtonOptions::default())
}

/// Convert ECEF positions given as separate x, y and z arrays to geodetic
/// positions.
///
/// # Errors
///
/// `Error::LengthMismatch` if the arrays have different lengths.
pub fn ecef_xyz_to_geodetic(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> Result<Vec<Geodetic>, Error> {
    for other in [ys, zs] {
        if other.len() != xs.len() {
            return Err(Error::LengthMismatch {
                expected: xs.len(),
                found: other.len(),
            });
        }
    }

    let positions: Vec<Cartesian> = xs
        .iter()
        .zip(ys)
        .zip(zs)
        .map(|((&x, &y), &z)| Cartesian::new(x, y, z))
        .collect();
    Ok(ecef_to_geodetic_batch(&positions, unit, ellipsoid, options))
}

/// Convert an array of ECEF triplets, either Nx3 or 3xN, to geodetic
/// positions.
///
/// # Errors
///
/// `Error::Shape` if neither dimension of the array is 3.
pub fn ecef_array_to_geodetic(
    array: &ArrayView,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
    options: &NewtonOptions,
) -> Result<Vec<Geodetic>, Error> {
    let positions = array.triplets()?;
    Ok(ecef_to_geodetic_batch(&positions, unit, ellipsoid, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WGS84_ELLIPSOID;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_geodetic_to_ecef() {
        let position = Geodetic::new(42.0, -82.0, 200.0);
        let result = geodetic_to_ecef(&position, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(660_675.251_824_733, result.x, 1e-6));
        assert!(is_within_tolerance(-4_700_948.683_162_267, result.y, 1e-6));
        assert!(is_within_tolerance(4_245_737.662_222_386, result.z, 1e-6));

        // the same position in radians
        let position = Geodetic::new(42.0_f64.to_radians(), -82.0_f64.to_radians(), 200.0);
        let radians = geodetic_to_ecef(&position, AngleUnit::Radians, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(result.x, radians.x, 1e-6));
        assert!(is_within_tolerance(result.y, radians.y, 1e-6));
        assert!(is_within_tolerance(result.z, radians.z, 1e-6));

        // On the Equator at the prime meridian
        let result = geodetic_to_ecef(&Geodetic::default(), AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert_eq!(WGS84_ELLIPSOID.a().0, result.x);
        assert_eq!(0.0, result.y);
        assert_eq!(0.0, result.z);
    }

    #[test]
    fn test_geodetic_to_ecef_poles() {
        let b = WGS84_ELLIPSOID.b().0;
        for unit in [AngleUnit::Degrees, AngleUnit::Radians] {
            let quarter = unit.full_turn() / 4.0;

            let north = Geodetic::new(quarter, 0.0, 100.0);
            let result = geodetic_to_ecef(&north, unit, &WGS84_ELLIPSOID);
            assert!(result.x.is_finite() && result.y.is_finite());
            assert!(libm::fabs(result.x) < 1e-9);
            assert!(libm::fabs(result.y) < 1e-9);
            assert!(is_within_tolerance(b + 100.0, result.z, 1e-6));

            let south = Geodetic::new(-quarter, 45.0, 0.0);
            let result = geodetic_to_ecef(&south, unit, &WGS84_ELLIPSOID);
            assert!(libm::fabs(result.x) < 1e-9);
            assert!(libm::fabs(result.y) < 1e-9);
            assert!(is_within_tolerance(-b, result.z, 1e-6));
        }
    }

    #[test]
    fn test_ecef_to_geodetic() {
        let ecef = Cartesian::new(660_675.251_824_733, -4_700_948.683_162_267, 4_245_737.662_222_386);
        let (result, iterations) = ecef_to_geodetic_iterations(
            &[ecef],
            AngleUnit::Degrees,
            &WGS84_ELLIPSOID,
            &NewtonOptions::default(),
        );
        assert!(iterations <= 3);
        assert!(is_within_tolerance(42.0, result[0].lat, 1e-9));
        assert!(is_within_tolerance(-82.0, result[0].lon, 1e-9));
        assert!(is_within_tolerance(200.0, result[0].alt, 1e-6));

        // A point 1 km above the ground, slightly north east of the origin
        let ecef = Cartesian::new(660_930.2, -4_701_424.2, 4_246_579.6);
        let result = ecef_to_geodetic(&ecef, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(42.002_582_074_127_645, result.lat, 1e-9));
        assert!(is_within_tolerance(-81.997_751_834_988_46, result.lon, 1e-9));
        assert!(is_within_tolerance(1_139.682_554_712_686_6, result.alt, 1e-6));

        let result = ecef_to_geodetic(&ecef, AngleUnit::Radians, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(
            42.002_582_074_127_645_f64.to_radians(),
            result.lat,
            1e-12
        ));
    }

    #[test]
    fn test_ecef_to_geodetic_poles_and_centre() {
        let b = WGS84_ELLIPSOID.b().0;

        let north = Cartesian::new(0.0, 0.0, b + 500.0);
        let result = ecef_to_geodetic(&north, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(90.0, result.lat, 1e-9));
        assert_eq!(0.0, result.lon);
        assert!(is_within_tolerance(500.0, result.alt, 1e-6));

        let south = Cartesian::new(0.0, 0.0, -b);
        let result = ecef_to_geodetic(&south, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(-90.0, result.lat, 1e-9));
        assert!(libm::fabs(result.alt) < 1e-6);

        let centre = Cartesian::default();
        let result = ecef_to_geodetic(&centre, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(result.lat.is_nan());
    }

    #[test]
    fn test_ecef_to_geodetic_round_trip() {
        for unit in [AngleUnit::Degrees, AngleUnit::Radians] {
            let tolerance = unit.from_radians(1e-7_f64.to_radians());
            for lat in (-89..90).step_by(7) {
                for lon in (-179..180).step_by(23) {
                    for alt in [-400.0, 0.0, 10_000.0, 400_000.0] {
                        let position = Geodetic::new(
                            unit.from_radians(f64::from(lat).to_radians()),
                            unit.from_radians(f64::from(lon).to_radians()),
                            alt,
                        );
                        let ecef = geodetic_to_ecef(&position, unit, &WGS84_ELLIPSOID);
                        let result = ecef_to_geodetic(&ecef, unit, &WGS84_ELLIPSOID);
                        assert!(is_within_tolerance(position.lat, result.lat, tolerance));
                        assert!(is_within_tolerance(position.lon, result.lon, tolerance));
                        assert!(is_within_tolerance(position.alt, result.alt, 1e-3));
                    }
                }
            }
        }
    }

    #[test]
    fn test_ecef_to_geodetic_batch_isolates_degenerate_rows() {
        let ecef = Cartesian::new(660_675.251_824_733, -4_700_948.683_162_267, 4_245_737.662_222_386);
        let positions = [ecef, Cartesian::default(), ecef];
        let result = ecef_to_geodetic_batch(
            &positions,
            AngleUnit::Degrees,
            &WGS84_ELLIPSOID,
            &NewtonOptions::default(),
        );
        assert_eq!(3, result.len());
        assert!(result[1].lat.is_nan());
        for row in [result[0], result[2]] {
            assert!(is_within_tolerance(42.0, row.lat, 1e-9));
            assert!(is_within_tolerance(-82.0, row.lon, 1e-9));
            assert!(is_within_tolerance(200.0, row.alt, 1e-6));
        }

        // batch results are the same as single results
        let single = ecef_to_geodetic(&ecef, AngleUnit::Degrees, &WGS84_ELLIPSOID);
        assert!(is_within_tolerance(single.lat, result[0].lat, 1e-12));
        assert!(is_within_tolerance(single.alt, result[2].alt, 1e-9));

        let empty = ecef_to_geodetic_batch(
            &[],
            AngleUnit::Degrees,
            &WGS84_ELLIPSOID,
            &NewtonOptions::default(),
        );
        assert!(empty.is_empty());
    }

    #[test]
    fn test_newton_options() {
        let options = NewtonOptions::default();
        assert_eq!(MAX_ITERATIONS, options.max_iterations);
        assert_eq!(TOLERANCE, options.tolerance);
        assert_eq!(None, options.warn_threshold);

        // A single iteration is not enough to reach the tolerance
        let ecef = Cartesian::new(660_675.251_824_733, -4_700_948.683_162_267, 4_245_737.662_222_386);
        let options = NewtonOptions {
            max_iterations: 1,
            tolerance: Radians(0.0),
            warn_threshold: Some(Radians(0.0)),
        };
        let (result, iterations) =
            ecef_to_geodetic_iterations(&[ecef], AngleUnit::Degrees, &WGS84_ELLIPSOID, &options);
        assert_eq!(1, iterations);
        assert!(is_within_tolerance(42.0, result[0].lat, 1e-6));

        // No iterations returns the starting estimate
        let options = NewtonOptions {
            max_iterations: 0,
            ..NewtonOptions::default()
        };
        let result = ecef_to_geodetic_with(&ecef, AngleUnit::Degrees, &WGS84_ELLIPSOID, &options);
        assert!(result.lat.is_finite());
        assert!(!is_within_tolerance(42.0, result.lat, 1e-9));
    }

    #[test]
    fn test_other_ellipsoids() {
        for f in [0.0, 1.0 / 300.0, 0.1] {
            let ellipsoid = Ellipsoid::new(crate::Metres(6_000_000.0), f).unwrap();
            let a = ellipsoid.a().0;
            let b = ellipsoid.b().0;

            let equator = geodetic_to_ecef(
                &Geodetic::new(0.0, 0.0, 100.0),
                AngleUnit::Degrees,
                &ellipsoid,
            );
            assert!(is_within_tolerance(a + 100.0, equator.x, 1e-6));
            let pole = geodetic_to_ecef(
                &Geodetic::new(90.0, 0.0, 100.0),
                AngleUnit::Degrees,
                &ellipsoid,
            );
            assert!(is_within_tolerance(b + 100.0, pole.z, 1e-6));

            for lat in [-75.0, -30.0, 10.0, 45.0, 80.0] {
                for alt in [0.0, 10_000.0] {
                    let position = Geodetic::new(lat, 120.0, alt);
                    let ecef = geodetic_to_ecef(&position, AngleUnit::Degrees, &ellipsoid);
                    let result = ecef_to_geodetic(&ecef, AngleUnit::Degrees, &ellipsoid);
                    assert!(is_within_tolerance(lat, result.lat, 1e-9));
                    assert!(is_within_tolerance(120.0, result.lon, 1e-9));
                    assert!(is_within_tolerance(alt, result.alt, 1e-6));
                }
            }
        }
    }

    #[test]
    fn test_ecef_xyz_and_array_to_geodetic() {
        let options = NewtonOptions::default();
        let xs = [6_378_137.0, 0.0];
        let ys = [0.0, 6_378_137.0];
        let zs = [0.0, 0.0];
        let result =
            ecef_xyz_to_geodetic(&xs, &ys, &zs, AngleUnit::Degrees, &WGS84_ELLIPSOID, &options)
                .unwrap();
        assert_eq!(0.0, result[0].lat);
        assert_eq!(0.0, result[0].lon);
        assert!(libm::fabs(result[0].alt) < 1e-9);
        assert!(is_within_tolerance(90.0, result[1].lon, 1e-12));

        assert_eq!(
            Err(Error::LengthMismatch {
                expected: 2,
                found: 1
            }),
            ecef_xyz_to_geodetic(
                &xs,
                &ys,
                &zs[..1],
                AngleUnit::Degrees,
                &WGS84_ELLIPSOID,
                &options
            )
        );

        // 3xN
        let data = [6_378_137.0, 0.0, 0.0, 6_378_137.0, 0.0, 0.0];
        let view = ArrayView::new(&data, &[3, 2]).unwrap();
        let columns =
            ecef_array_to_geodetic(&view, AngleUnit::Degrees, &WGS84_ELLIPSOID, &options).unwrap();
        assert_eq!(result, columns);

        let data = [0.0; 8];
        let view = ArrayView::new(&data, &[4, 2]).unwrap();
        assert_eq!(
            Err(Error::Shape { rows: 4, cols: 2 }),
            ecef_array_to_geodetic(&view, AngleUnit::Degrees, &WGS84_ELLIPSOID, &options)
        );
    }
}
