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

//! The celestial module contains functions for converting an observer's
//! azimuth and elevation of a celestial object to its right ascension and
//! declination.
//!
//! Source: D. Vallado, Fundamentals of Astrodynamics and Applications,
//! Algorithm 28. Atmospheric refraction is not modelled.

#![allow(clippy::suboptimal_flops)]

use crate::local::normalize_azimuth;
use crate::time::{self, MeanSiderealTime, SiderealTime};
use crate::{AngleUnit, Error};
use chrono::{DateTime, Utc};

/// The equatorial coordinates of a celestial object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaDec {
    /// The right ascension, in [0, 360°) or [0, 2π).
    pub ra: f64,
    /// The declination.
    pub dec: f64,
}

/// Convert an azimuth and elevation to right ascension and declination,
/// calculating the sidereal time with `source`.
/// * `az`, `el` - the azimuth and elevation of the object.
/// * `lat`, `lon` - the geodetic latitude and longitude of the observer.
/// * `time` - the time of the observation.
/// * `unit` - the unit of all the angles.
/// * `source` - the source of Greenwich sidereal time.
#[must_use]
pub fn azel_to_radec_with<S: SiderealTime + ?Sized>(
    az: f64,
    el: f64,
    lat: f64,
    lon: f64,
    time: &DateTime<Utc>,
    unit: AngleUnit,
    source: &S,
) -> RaDec {
    let az = unit.to_angle(az);
    let el = unit.to_angle(el);
    let lat = unit.to_angle(lat);
    let (sin_el, cos_el) = (el.sin().0, el.cos().0);
    let (sin_lat, cos_lat) = (lat.sin().0, lat.cos().0);

    let dec = libm::asin(sin_el * sin_lat + cos_el * cos_lat * az.cos().0);
    let (sin_dec, cos_dec) = (libm::sin(dec), libm::cos(dec));

    // the local hour angle
    let lha = libm::atan2(
        -(az.sin().0 * cos_el) / cos_dec,
        (sin_el - sin_lat * sin_dec) / (cos_dec * cos_lat),
    );
    let lst = time::local_sidereal_time_with(source, time, unit.to_radians(lon));

    RaDec {
        ra: normalize_azimuth(lst - lha, unit),
        dec: unit.from_radians(dec),
    }
}

/// Convert an azimuth and elevation to right ascension and declination
/// using the mean sidereal time.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use wgs84_frames::{celestial, AngleUnit};
///
/// // Kitt Peak, 2014-12-25 22:00 MST
/// let time = Utc.with_ymd_and_hms(2014, 12, 26, 5, 0, 0).unwrap();
/// let az = 264.0 + 55.0 / 60.0 + 6.0 / 3600.0;
/// let el = 37.0 + 54.0 / 60.0 + 41.0 / 3600.0;
/// let result = celestial::azel_to_radec(az, el, 31.9583, -111.5967, &time, AngleUnit::Degrees);
/// assert!((result.ra - 3.415_763).abs() < 1e-5);
/// assert!((result.dec - 15.422_486).abs() < 1e-5);
/// ```
#[must_use]
pub fn azel_to_radec(
    az: f64,
    el: f64,
    lat: f64,
    lon: f64,
    time: &DateTime<Utc>,
    unit: AngleUnit,
) -> RaDec {
    azel_to_radec_with(az, el, lat, lon, time, unit, &MeanSiderealTime)
}

/// Convert azimuths and elevations seen by one observer at one time to
/// right ascensions and declinations, calculating the sidereal time with
/// `source`.
///
/// # Errors
///
/// `Error::LengthMismatch` if `az` and `el` have different lengths.
pub fn azel_to_radec_batch_with<S: SiderealTime + ?Sized>(
    az: &[f64],
    el: &[f64],
    lat: f64,
    lon: f64,
    time: &DateTime<Utc>,
    unit: AngleUnit,
    source: &S,
) -> Result<Vec<RaDec>, Error> {
    if az.len() != el.len() {
        return Err(Error::LengthMismatch {
            expected: az.len(),
            found: el.len(),
        });
    }

    Ok(az
        .iter()
        .zip(el)
        .map(|(&az, &el)| azel_to_radec_with(az, el, lat, lon, time, unit, source))
        .collect())
}

/// Convert azimuths and elevations seen by one observer at one time to
/// right ascensions and declinations using the mean sidereal time.
///
/// # Errors
///
/// `Error::LengthMismatch` if `az` and `el` have different lengths.
pub fn azel_to_radec_batch(
    az: &[f64],
    el: &[f64],
    lat: f64,
    lon: f64,
    time: &DateTime<Utc>,
    unit: AngleUnit,
) -> Result<Vec<RaDec>, Error> {
    azel_to_radec_batch_with(az, el, lat, lon, time, unit, &MeanSiderealTime)
}
