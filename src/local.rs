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

//! The local module contains the local tangent plane coordinate types:
//! East-North-Up (ENU), North-East-Down (NED) and Azimuth-Elevation-Range
//! (AER), and the rotation between an ECEF offset and the ENU frame at an
//! origin.

#![allow(clippy::suboptimal_flops)]

use crate::{Angle, AngleUnit, Cartesian};

/// A position in the East-North-Up frame, in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    #[must_use]
    pub const fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }
}

/// A position in the North-East-Down frame, in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ned {
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

impl Ned {
    #[must_use]
    pub const fn new(north: f64, east: f64, down: f64) -> Self {
        Self { north, east, down }
    }
}

impl From<Enu> for Ned {
    fn from(enu: Enu) -> Self {
        Self::new(enu.north, enu.east, -enu.up)
    }
}

impl From<Ned> for Enu {
    fn from(ned: Ned) -> Self {
        Self::new(ned.east, ned.north, -ned.down)
    }
}

/// A topocentric position: Azimuth, Elevation and slant Range.
///
/// The units of `az` and `el` are given by the `AngleUnit` of the call that
/// uses or returns the position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aer {
    /// The azimuth, clockwise from North.
    pub az: f64,
    /// The elevation above the local horizon.
    pub el: f64,
    /// The slant range in metres.
    pub range: f64,
}

impl Aer {
    #[must_use]
    pub const fn new(az: f64, el: f64, range: f64) -> Self {
        Self { az, el, range }
    }
}

/// Normalize an azimuth in radians into [0, 360°) or [0, 2π) in `unit`.
#[must_use]
pub fn normalize_azimuth(azimuth: f64, unit: AngleUnit) -> f64 {
    let full_turn = unit.full_turn();
    let az = unit.from_radians(azimuth).rem_euclid(full_turn);
    // rem_euclid of a tiny negative value rounds up to a full turn
    if az < full_turn || az.is_nan() {
        az
    } else {
        0.0
    }
}

/// Rotate an ECEF offset vector into the ENU frame at an origin.
/// * `offset` - the ECEF vector from the origin, in metres.
/// * `lat0`, `lon0` - the geodetic latitude and longitude of the origin.
#[must_use]
pub fn ecef_offset_to_enu(offset: &Cartesian, lat0: Angle, lon0: Angle) -> Enu {
    let (sin_lat, cos_lat) = (lat0.sin().0, lat0.cos().0);
    let (sin_lon, cos_lon) = (lon0.sin().0, lon0.cos().0);

    let t = cos_lon * offset.x + sin_lon * offset.y;
    Enu::new(
        -sin_lon * offset.x + cos_lon * offset.y,
        -sin_lat * t + cos_lat * offset.z,
        cos_lat * t + sin_lat * offset.z,
    )
}

/// Rotate an ENU vector at an origin into an ECEF offset vector, the
/// transpose of `ecef_offset_to_enu`.
/// * `enu` - the ENU vector, in metres.
/// * `lat0`, `lon0` - the geodetic latitude and longitude of the origin.
#[must_use]
pub fn enu_to_ecef_offset(enu: &Enu, lat0: Angle, lon0: Angle) -> Cartesian {
    let (sin_lat, cos_lat) = (lat0.sin().0, lat0.cos().0);
    let (sin_lon, cos_lon) = (lon0.sin().0, lon0.cos().0);

    let t = cos_lat * enu.up - sin_lat * enu.north;
    Cartesian::new(
        cos_lon * t - sin_lon * enu.east,
        sin_lon * t + cos_lon * enu.east,
        sin_lat * enu.up + cos_lat * enu.north,
    )
}

/// Convert an AER position to ENU.
/// * `aer` - the azimuth and elevation in `unit`, the range in metres.
/// * `unit` - the unit of the azimuth and elevation.
///
/// # Examples
/// ```
/// use wgs84_frames::{local, Aer, AngleUnit};
///
/// let enu = local::aer_to_enu(&Aer::new(90.0, 0.0, 1000.0), AngleUnit::Degrees);
/// assert!((enu.east - 1000.0).abs() < 1e-9);
/// assert!(enu.north.abs() < 1e-9);
/// assert!(enu.up.abs() < 1e-9);
/// ```
#[must_use]
pub fn aer_to_enu(aer: &Aer, unit: AngleUnit) -> Enu {
    let az = unit.to_angle(aer.az);
    let el = unit.to_angle(aer.el);
    let r = aer.range * el.cos().0;
    Enu::new(r * az.sin().0, r * az.cos().0, aer.range * el.sin().0)
}

/// Convert an ENU position to AER.
/// * `enu` - the ENU position, in metres.
/// * `unit` - the unit of the returned azimuth and elevation.
///
/// returns the azimuth in [0, 360°) or [0, 2π).
#[must_use]
pub fn enu_to_aer(enu: &Enu, unit: AngleUnit) -> Aer {
    let r = libm::hypot(enu.east, enu.north);
    Aer::new(
        normalize_azimuth(libm::atan2(enu.east, enu.north), unit),
        unit.from_radians(libm::atan2(enu.up, r)),
        libm::hypot(r, enu.up),
    )
}

/// Convert an AER position to NED.
#[must_use]
pub fn aer_to_ned(aer: &Aer, unit: AngleUnit) -> Ned {
    Ned::from(aer_to_enu(aer, unit))
}

/// Convert a NED position to AER.
#[must_use]
pub fn ned_to_aer(ned: &Ned, unit: AngleUnit) -> Aer {
    enu_to_aer(&Enu::from(*ned), unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Degrees;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ecef_offset_to_enu_axes() {
        let lat0 = Angle::from(Degrees(0.0));
        let lon0 = Angle::from(Degrees(0.0));

        // At lat 0, lon 0: x is up, y is east and z is north
        let result = ecef_offset_to_enu(&Cartesian::new(1.0, 0.0, 0.0), lat0, lon0);
        assert_eq!(Enu::new(0.0, 0.0, 1.0), result);
        let result = ecef_offset_to_enu(&Cartesian::new(0.0, 1.0, 0.0), lat0, lon0);
        assert_eq!(Enu::new(1.0, 0.0, 0.0), result);
        let result = ecef_offset_to_enu(&Cartesian::new(0.0, 0.0, 1.0), lat0, lon0);
        assert_eq!(Enu::new(0.0, 1.0, 0.0), result);

        // At the North pole, up is z
        let lat0 = Angle::from(Degrees(90.0));
        let result = ecef_offset_to_enu(&Cartesian::new(0.0, 0.0, 1.0), lat0, lon0);
        assert!(is_within_tolerance(1.0, result.up, f64::EPSILON));
        assert!(libm::fabs(result.north) < f64::EPSILON);
    }

    #[test]
    fn test_enu_ecef_offset_inverse() {
        let offset = Cartesian::new(1234.5, -6789.0, 42.0);
        let offset_length =
            libm::sqrt(offset.x * offset.x + offset.y * offset.y + offset.z * offset.z);
        for lat in (-90..91).step_by(15) {
            for lon in (-180..181).step_by(20) {
                let lat0 = Angle::from(Degrees(f64::from(lat)));
                let lon0 = Angle::from(Degrees(f64::from(lon)));
                let enu = ecef_offset_to_enu(&offset, lat0, lon0);

                // a rotation preserves length
                let length = libm::sqrt(enu.east * enu.east + enu.north * enu.north + enu.up * enu.up);
                assert!(is_within_tolerance(offset_length, length, 1e-9));

                let result = enu_to_ecef_offset(&enu, lat0, lon0);
                assert!(is_within_tolerance(offset.x, result.x, 1e-9));
                assert!(is_within_tolerance(offset.y, result.y, 1e-9));
                assert!(is_within_tolerance(offset.z, result.z, 1e-9));
            }
        }
    }

    #[test]
    fn test_enu_ned() {
        let enu = Enu::new(1.0, 2.0, 3.0);
        let ned = Ned::from(enu);
        assert_eq!(Ned::new(2.0, 1.0, -3.0), ned);
        assert_eq!(enu, Enu::from(ned));
    }

    #[test]
    fn test_aer_to_enu() {
        let result = aer_to_enu(&Aer::new(33.0, 70.0, 1000.0), AngleUnit::Degrees);
        assert!(is_within_tolerance(186.277_520_816_593_52, result.east, 1e-9));
        assert!(is_within_tolerance(286.842_227_851_714, result.north, 1e-9));
        assert!(is_within_tolerance(939.692_620_785_908_3, result.up, 1e-9));

        let aer = Aer::new(33.0_f64.to_radians(), 70.0_f64.to_radians(), 1000.0);
        let radians = aer_to_enu(&aer, AngleUnit::Radians);
        assert!(is_within_tolerance(result.east, radians.east, 1e-9));
        assert!(is_within_tolerance(result.north, radians.north, 1e-9));
        assert!(is_within_tolerance(result.up, radians.up, 1e-9));

        let ned = aer_to_ned(&Aer::new(33.0, 70.0, 1000.0), AngleUnit::Degrees);
        assert_eq!(Ned::from(result), ned);
    }

    #[test]
    fn test_enu_to_aer() {
        let result = enu_to_aer(&Enu::new(0.0, 0.0, 0.0), AngleUnit::Degrees);
        assert_eq!(Aer::new(0.0, 0.0, 0.0), result);

        let result = enu_to_aer(&Enu::new(0.0, 1.0, 0.0), AngleUnit::Degrees);
        assert_eq!(0.0, result.az);
        let result = enu_to_aer(&Enu::new(1.0, 0.0, 0.0), AngleUnit::Degrees);
        assert!(is_within_tolerance(90.0, result.az, 1e-12));
        let result = enu_to_aer(&Enu::new(0.0, -1.0, 0.0), AngleUnit::Degrees);
        assert!(is_within_tolerance(180.0, result.az, 1e-12));
        let result = enu_to_aer(&Enu::new(-1.0, 1.0, 0.0), AngleUnit::Degrees);
        assert!(is_within_tolerance(315.0, result.az, 1e-12));
        let result = enu_to_aer(&Enu::new(-1.0, 1.0, 0.0), AngleUnit::Radians);
        assert!(is_within_tolerance(
            1.75 * core::f64::consts::PI,
            result.az,
            1e-12
        ));

        let result = enu_to_aer(&Enu::new(3.0, 4.0, -12.0), AngleUnit::Degrees);
        assert!(is_within_tolerance(13.0, result.range, 1e-12));
        assert!(result.el < 0.0);

        let ned = ned_to_aer(&Ned::new(4.0, 3.0, 12.0), AngleUnit::Degrees);
        assert_eq!(result, ned);

        // NaN is propagated, not wrapped to north
        let result = enu_to_aer(&Enu::new(f64::NAN, f64::NAN, f64::NAN), AngleUnit::Degrees);
        assert!(result.az.is_nan());
        assert!(result.el.is_nan());
        let result = enu_to_aer(&Enu::new(f64::NAN, 1.0, 0.0), AngleUnit::Radians);
        assert!(result.az.is_nan());
    }

    #[test]
    fn test_normalize_azimuth() {
        for unit in [AngleUnit::Degrees, AngleUnit::Radians] {
            let full_turn = unit.full_turn();
            assert_eq!(0.0, normalize_azimuth(-1e-300, unit));
            assert_eq!(0.0, normalize_azimuth(core::f64::consts::TAU, unit));
            for azimuth in [-7.0, -3.0, -0.1, 0.0, 1.0, 3.5, 6.2, 12.0] {
                let result = normalize_azimuth(azimuth, unit);
                assert!((0.0..full_turn).contains(&result));
            }
            assert!(normalize_azimuth(f64::NAN, unit).is_nan());
        }
    }
}
