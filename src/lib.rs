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

//! wgs84-frames
//!
//! [![crates.io](https://img.shields.io/crates/v/wgs84-frames.svg)](https://crates.io/crates/wgs84-frames)
//! [![docs.io](https://docs.rs/wgs84-frames/badge.svg)](https://docs.rs/wgs84-frames/)
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for converting positions between the coordinate frames used in
//! navigation, geodesy and orbital mechanics:
//!
//! - **Geodetic**: latitude, longitude and altitude above a reference
//!   ellipsoid, by default [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf);
//! - **ECEF**: Earth-Centred, Earth-Fixed Cartesian coordinates;
//! - **ENU** and **NED**: East-North-Up and North-East-Down local tangent
//!   planes centred on an observer;
//! - **AER**: topocentric Azimuth, Elevation and slant Range;
//! - **ECI**: Earth-Centred Inertial Cartesian coordinates.
//!
//! ## Design
//!
//! Every conversion passes through ECEF. Geodetic to ECEF is a closed form
//! using the radius of curvature of the prime vertical; ECEF to geodetic
//! solves the latitude equation for the `parametric` (reduced) latitude by
//! Newton's method, which is well conditioned at all latitudes since it never
//! divides by the sine or cosine of the latitude.
//!
//! ECEF and ECI share the same origin and polar axis, so the rotation between
//! them is a single rotation about the polar axis by the Greenwich sidereal
//! angle. The sidereal angle is either supplied directly in radians or
//! calculated from a UTC timestamp via its Julian date and Greenwich Mean
//! Sidereal Time (GMST). Nutation, precession and polar motion are not
//! modelled.
//!
//! The `Ellipsoid` type represents an ellipsoid of revolution.
//! The static `WGS84_ELLIPSOID` represents the WGS-84 `Ellipsoid`; every
//! conversion takes an `Ellipsoid` by reference, so other ellipsoids may be
//! used as well.
//!
//! The unit of angular inputs and outputs is selected by an `AngleUnit`
//! parameter; internal calculations are always performed in radians.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`;
//! - [chrono](https://crates.io/crates/chrono) - to define UTC timestamps;
//! - [tracing](https://crates.io/crates/tracing) - to report non-fatal
//!   diagnostics, e.g. missing timestamps in a batch.

extern crate angle_sc;
extern crate icao_units;

pub mod array;
pub mod celestial;
pub mod conversions;
pub mod ellipsoid;
pub mod error;
pub mod geodetic;
pub mod inertial;
pub mod local;
pub mod time;

pub use angle_sc::{Angle, Degrees, Radians};
pub use array::ArrayView;
pub use error::Error;
pub use geodetic::NewtonOptions;
pub use icao_units::si::Metres;
pub use local::{Aer, Enu, Ned};
pub use time::{Epoch, MeanSiderealTime, SiderealTime};

use lazy_static::lazy_static;

/// The unit of the angles passed to and returned from the conversions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    /// Angles in degrees.
    #[default]
    Degrees,
    /// Angles in radians.
    Radians,
}

impl AngleUnit {
    /// Convert a value in this unit to an `Angle`.
    #[must_use]
    pub fn to_angle(self, value: f64) -> Angle {
        match self {
            Self::Degrees => Angle::from(Degrees(value)),
            Self::Radians => Angle::from(Radians(value)),
        }
    }

    /// Convert a value in this unit to radians.
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Radians => value,
        }
    }

    /// Convert a value in radians to this unit.
    #[must_use]
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_degrees(),
            Self::Radians => value,
        }
    }

    /// A full turn in this unit: 360° or 2π radians.
    #[must_use]
    pub const fn full_turn(self) -> f64 {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => core::f64::consts::TAU,
        }
    }
}

/// A geodetic position: latitude, longitude and altitude above an ellipsoid.
///
/// The units of `lat` and `lon` are given by the `AngleUnit` of the call that
/// uses or returns the position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Geodetic {
    /// The geodetic latitude, valid range [-90°, 90°].
    pub lat: f64,
    /// The longitude, any real value.
    pub lon: f64,
    /// The height above the ellipsoid in metres.
    pub alt: f64,
}

impl Geodetic {
    #[must_use]
    pub const fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }
}

/// A Cartesian position in metres, in either the ECEF or the ECI frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cartesian {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Cartesian {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The position as an `[x, y, z]` triplet.
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Cartesian {
    fn from(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }
}

impl core::ops::Add for Cartesian {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl core::ops::Sub for Cartesian {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// The parameters of an `Ellipsoid`.
///
/// The Semiminor axis and eccentricity are always derived from the
/// Semimajor axis and flattening, they cannot be set independently.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`, must be positive.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio in [0, 1).
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` if `a` or `f` is out of range.
    ///
    /// # Examples
    /// ```
    /// use wgs84_frames::{Ellipsoid, Metres};
    ///
    /// // A sphere with the mean radius of the Earth.
    /// let sphere = Ellipsoid::new(Metres(6_371_008.8), 0.0).unwrap();
    /// assert_eq!(sphere.a(), sphere.b());
    ///
    /// assert!(Ellipsoid::new(Metres(6_378_137.0), 1.0).is_err());
    /// ```
    pub fn new(a: Metres, f: f64) -> Result<Self, Error> {
        if a.0.is_finite() && 0.0 < a.0 && (0.0..1.0).contains(&f) {
            Ok(Self::from_parameters(a, f))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, f })
        }
    }

    fn from_parameters(a: Metres, f: f64) -> Self {
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            one_minus_f: 1.0 - f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The radius of curvature of the prime vertical at a geodetic latitude.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn calculate_radius_normal(&self, lat: Angle) -> Metres {
        ellipsoid::calculate_radius_normal(lat, self.a, self.b)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}
