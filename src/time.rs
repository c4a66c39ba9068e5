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

//! The time module contains functions for calculating the Julian date and
//! Greenwich Mean Sidereal Time (GMST) of a UTC timestamp.
//!
//! GMST is the angle between the ECEF and ECI frames about their common polar
//! axis. The idealized model here ignores nutation, so it is the mean rather
//! than the apparent sidereal time. Higher fidelity sidereal times may be
//! provided by implementing the `SiderealTime` trait.
//!
//! Sources:
//! - Julian date: J. Meeus, Astronomical Algorithms, 1991, Eq. 7.1.
//! - GMST: D. Vallado, Fundamentals of Astrodynamics and Applications,
//!   Eq. 3-47.

use crate::local::normalize_azimuth;
use crate::{AngleUnit, Error};
use chrono::{DateTime, Datelike, Timelike, Utc};
use core::f64::consts::TAU;

/// The Julian date of the J2000.0 epoch: 2000-Jan-01 12:00.
pub const J2000_JD: f64 = 2_451_545.0;

/// The number of days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calculate the Julian date of a UTC timestamp on the Gregorian calendar.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use wgs84_frames::time;
///
/// let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(time::J2000_JD, time::julian_date(&j2000));
/// ```
#[must_use]
pub fn julian_date(time: &DateTime<Utc>) -> f64 {
    // January and February are months 13 and 14 of the previous year
    let (year, month) = if time.month() < 3 {
        (time.year() - 1, time.month() + 12)
    } else {
        (time.year(), time.month())
    };
    let year = f64::from(year);
    let month = f64::from(month);

    let a = libm::trunc(year / 100.0);
    let b = 2.0 - a + libm::trunc(a / 4.0);
    let seconds = f64::from(time.second()) + f64::from(time.nanosecond()) * 1e-9;
    let day_fraction =
        ((seconds / 60.0 + f64::from(time.minute())) / 60.0 + f64::from(time.hour())) / 24.0;

    libm::trunc(365.25 * (year + 4716.0))
        + libm::trunc(30.6001 * (month + 1.0))
        + f64::from(time.day())
        + b
        - 1524.5
        + day_fraction
}

/// Calculate the Julian dates of a batch of UTC timestamps.
///
/// A missing timestamp gives a NaN Julian date and a warning, the other
/// timestamps are unaffected.
#[must_use]
pub fn julian_dates(times: &[Option<DateTime<Utc>>]) -> Vec<f64> {
    times
        .iter()
        .enumerate()
        .map(|(index, time)| {
            time.as_ref().map_or_else(
                || {
                    tracing::warn!(index, "missing timestamp, Julian date is NaN");
                    f64::NAN
                },
                julian_date,
            )
        })
        .collect()
}

/// Calculate the Greenwich Mean Sidereal Time at a Julian date.
/// * `julian_date` - the Julian date (UT1).
///
/// returns GMST in radians in [0, 2π).
#[must_use]
pub fn gmst(julian_date: f64) -> f64 {
    // Julian centuries from J2000.0
    let t = (julian_date - J2000_JD) / DAYS_PER_JULIAN_CENTURY;
    let gmst_seconds = 67_310.548_41
        + (876_600.0 * 3600.0 + 8_640_184.812_866) * t
        + 0.093_104 * t * t
        - 6.2e-6 * t * t * t;

    normalize_azimuth(gmst_seconds * TAU / SECONDS_PER_DAY, AngleUnit::Radians)
}

/// Calculate the Greenwich Mean Sidereal Times of a batch of UTC timestamps.
///
/// A missing timestamp gives a NaN angle.
#[must_use]
pub fn gmst_batch(times: &[Option<DateTime<Utc>>]) -> Vec<f64> {
    julian_dates(times).into_iter().map(gmst).collect()
}

/// Calculate the local mean sidereal time of a UTC timestamp.
/// * `time` - the UTC timestamp.
/// * `longitude` - the observer's longitude in radians, East positive.
///
/// returns the sum of GMST and `longitude` in radians, it is not reduced
/// to [0, 2π).
#[must_use]
pub fn local_sidereal_time(time: &DateTime<Utc>, longitude: f64) -> f64 {
    gmst(julian_date(time)) + longitude
}

/// A source of Greenwich sidereal time.
///
/// Implementations must return radians about the polar axis with the same
/// sign convention as `gmst`: the angle from the ECI x axis to the ECEF x
/// axis, increasing with time.
pub trait SiderealTime {
    /// The Greenwich sidereal time at `time` in radians.
    ///
    /// # Errors
    ///
    /// `Error::SiderealUnavailable` if the source has no data for `time`.
    fn greenwich_sidereal_time(&self, time: &DateTime<Utc>) -> Result<f64, Error>;
}

/// The idealized Greenwich Mean Sidereal Time source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeanSiderealTime;

impl SiderealTime for MeanSiderealTime {
    fn greenwich_sidereal_time(&self, time: &DateTime<Utc>) -> Result<f64, Error> {
        Ok(gmst(julian_date(time)))
    }
}

/// Calculate the Greenwich sidereal time of a UTC timestamp from `source`,
/// falling back to GMST with a warning if `source` is unavailable.
#[must_use]
pub fn greenwich_sidereal_time_with<S: SiderealTime + ?Sized>(
    source: &S,
    time: &DateTime<Utc>,
) -> f64 {
    source
        .greenwich_sidereal_time(time)
        .unwrap_or_else(|error| {
            tracing::warn!(%error, %time, "falling back to mean sidereal time");
            gmst(julian_date(time))
        })
}

/// Calculate the local sidereal time of a UTC timestamp from `source`,
/// falling back to GMST with a warning if `source` is unavailable.
/// * `longitude` - the observer's longitude in radians, East positive.
#[must_use]
pub fn local_sidereal_time_with<S: SiderealTime + ?Sized>(
    source: &S,
    time: &DateTime<Utc>,
    longitude: f64,
) -> f64 {
    greenwich_sidereal_time_with(source, time) + longitude
}

/// The instant of an ECEF/ECI rotation: either a UTC timestamp or the
/// Greenwich sidereal angle itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Epoch {
    /// A UTC timestamp.
    Civil(DateTime<Utc>),
    /// A Greenwich sidereal angle in radians.
    Sidereal(f64),
}

impl Epoch {
    /// The rotation angle of the `Epoch` in radians, using GMST for
    /// timestamps.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle_with(&MeanSiderealTime)
    }

    /// The rotation angle of the `Epoch` in radians, using `source` for
    /// timestamps.
    #[must_use]
    pub fn angle_with<S: SiderealTime + ?Sized>(&self, source: &S) -> f64 {
        match self {
            Self::Civil(time) => greenwich_sidereal_time_with(source, time),
            Self::Sidereal(angle) => *angle,
        }
    }
}

impl From<DateTime<Utc>> for Epoch {
    fn from(time: DateTime<Utc>) -> Self {
        Self::Civil(time)
    }
}

impl From<f64> for Epoch {
    fn from(angle: f64) -> Self {
        Self::Sidereal(angle)
    }
}
