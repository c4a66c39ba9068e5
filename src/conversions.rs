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

//! The conversions module contains the conversions between geodetic and ECEF
//! positions and the local tangent plane frames of an observer: ENU, NED and
//! AER.
//!
//! The conversions are compositions of the geodetic/ECEF conversions in the
//! `geodetic` module and the tangent plane rotation in the `local` module.

use crate::geodetic::{self, NewtonOptions};
use crate::local::{self, Aer, Enu, Ned};
use crate::{Angle, AngleUnit, Cartesian, Ellipsoid, Geodetic};

/// The local tangent plane at an origin (observer) on or above an ellipsoid.
///
/// The origin's ECEF position and the sines and cosines of its latitude and
/// longitude are calculated once and shared by every conversion, so a frame
/// may be used for any number of positions.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalFrame<'a> {
    /// The ECEF position of the origin.
    origin: Cartesian,
    /// The geodetic latitude of the origin.
    lat0: Angle,
    /// The longitude of the origin.
    lon0: Angle,
    /// The unit of the angles of the positions.
    unit: AngleUnit,
    /// The options of conversions to geodetic positions.
    options: NewtonOptions,
    /// A reference to the underlying `Ellipsoid`.
    ellipsoid: &'a Ellipsoid,
}

impl<'a> LocalFrame<'a> {
    /// Constructor.
    /// * `origin` - the geodetic position of the origin, angles in `unit`.
    /// * `unit` - the unit of all angles passed to and returned by the frame.
    /// * `ellipsoid` - a reference to the `Ellipsoid`.
    ///
    /// # Examples
    /// ```
    /// use wgs84_frames::conversions::LocalFrame;
    /// use wgs84_frames::{Aer, AngleUnit, Geodetic, WGS84_ELLIPSOID};
    ///
    /// let origin = Geodetic::new(42.0, -82.0, 200.0);
    /// let frame = LocalFrame::new(&origin, AngleUnit::Degrees, &WGS84_ELLIPSOID);
    ///
    /// let target = frame.aer_to_geodetic(&Aer::new(33.0, 70.0, 1000.0));
    /// let aer = frame.geodetic_to_aer(&target);
    /// assert!((aer.az - 33.0).abs() < 1e-6);
    /// assert!((aer.el - 70.0).abs() < 1e-6);
    /// assert!((aer.range - 1000.0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn new(origin: &Geodetic, unit: AngleUnit, ellipsoid: &'a Ellipsoid) -> Self {
        Self {
            origin: geodetic::geodetic_to_ecef(origin, unit, ellipsoid),
            lat0: unit.to_angle(origin.lat),
            lon0: unit.to_angle(origin.lon),
            unit,
            options: NewtonOptions::default(),
            ellipsoid,
        }
    }

    /// Set the Newton iteration options used by conversions to geodetic
    /// positions.
    #[must_use]
    pub fn with_options(mut self, options: NewtonOptions) -> Self {
        self.options = options;
        self
    }

    /// Accessor for the ECEF position of the origin.
    #[must_use]
    pub const fn origin(&self) -> Cartesian {
        self.origin
    }

    /// Accessor for the angle unit.
    #[must_use]
    pub const fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Accessor for the reference to the underlying `Ellipsoid`.
    #[must_use]
    pub const fn ellipsoid(&self) -> &Ellipsoid {
        self.ellipsoid
    }

    /// Convert an ECEF position to ENU.
    #[must_use]
    pub fn ecef_to_enu(&self, position: &Cartesian) -> Enu {
        local::ecef_offset_to_enu(&(*position - self.origin), self.lat0, self.lon0)
    }

    /// Convert an ENU position to ECEF.
    #[must_use]
    pub fn enu_to_ecef(&self, enu: &Enu) -> Cartesian {
        self.origin + local::enu_to_ecef_offset(enu, self.lat0, self.lon0)
    }

    /// Convert a geodetic position to ENU.
    #[must_use]
    pub fn geodetic_to_enu(&self, position: &Geodetic) -> Enu {
        self.ecef_to_enu(&geodetic::geodetic_to_ecef(
            position,
            self.unit,
            self.ellipsoid,
        ))
    }

    /// Convert an ENU position to geodetic.
    #[must_use]
    pub fn enu_to_geodetic(&self, enu: &Enu) -> Geodetic {
        geodetic::ecef_to_geodetic_with(
            &self.enu_to_ecef(enu),
            self.unit,
            self.ellipsoid,
            &self.options,
        )
    }

    /// Convert an ECEF position to NED.
    #[must_use]
    pub fn ecef_to_ned(&self, position: &Cartesian) -> Ned {
        Ned::from(self.ecef_to_enu(position))
    }

    /// Convert a NED position to ECEF.
    #[must_use]
    pub fn ned_to_ecef(&self, ned: &Ned) -> Cartesian {
        self.enu_to_ecef(&Enu::from(*ned))
    }

    /// Convert a geodetic position to NED.
    #[must_use]
    pub fn geodetic_to_ned(&self, position: &Geodetic) -> Ned {
        Ned::from(self.geodetic_to_enu(position))
    }

    /// Convert a NED position to geodetic.
    #[must_use]
    pub fn ned_to_geodetic(&self, ned: &Ned) -> Geodetic {
        self.enu_to_geodetic(&Enu::from(*ned))
    }

    /// Convert an ECEF position to AER.
    #[must_use]
    pub fn ecef_to_aer(&self, position: &Cartesian) -> Aer {
        local::enu_to_aer(&self.ecef_to_enu(position), self.unit)
    }

    /// Convert an AER position to ECEF.
    #[must_use]
    pub fn aer_to_ecef(&self, aer: &Aer) -> Cartesian {
        self.enu_to_ecef(&local::aer_to_enu(aer, self.unit))
    }

    /// Convert a geodetic position to AER.
    #[must_use]
    pub fn geodetic_to_aer(&self, position: &Geodetic) -> Aer {
        local::enu_to_aer(&self.geodetic_to_enu(position), self.unit)
    }

    /// Convert an AER position to geodetic.
    #[must_use]
    pub fn aer_to_geodetic(&self, aer: &Aer) -> Geodetic {
        self.enu_to_geodetic(&local::aer_to_enu(aer, self.unit))
    }

    /// Convert ECEF positions to ENU.
    #[must_use]
    pub fn ecef_to_enu_batch(&self, positions: &[Cartesian]) -> Vec<Enu> {
        positions.iter().map(|p| self.ecef_to_enu(p)).collect()
    }

    /// Convert ENU positions to ECEF.
    #[must_use]
    pub fn enu_to_ecef_batch(&self, positions: &[Enu]) -> Vec<Cartesian> {
        positions.iter().map(|p| self.enu_to_ecef(p)).collect()
    }

    /// Convert geodetic positions to ENU.
    #[must_use]
    pub fn geodetic_to_enu_batch(&self, positions: &[Geodetic]) -> Vec<Enu> {
        positions.iter().map(|p| self.geodetic_to_enu(p)).collect()
    }

    /// Convert ENU positions to geodetic, solving the parametric latitudes
    /// of the whole batch together.
    #[must_use]
    pub fn enu_to_geodetic_batch(&self, positions: &[Enu]) -> Vec<Geodetic> {
        self.ecef_to_geodetic_batch(&self.enu_to_ecef_batch(positions))
    }

    /// Convert ECEF positions to NED.
    #[must_use]
    pub fn ecef_to_ned_batch(&self, positions: &[Cartesian]) -> Vec<Ned> {
        positions.iter().map(|p| self.ecef_to_ned(p)).collect()
    }

    /// Convert NED positions to ECEF.
    #[must_use]
    pub fn ned_to_ecef_batch(&self, positions: &[Ned]) -> Vec<Cartesian> {
        positions.iter().map(|p| self.ned_to_ecef(p)).collect()
    }

    /// Convert geodetic positions to NED.
    #[must_use]
    pub fn geodetic_to_ned_batch(&self, positions: &[Geodetic]) -> Vec<Ned> {
        positions.iter().map(|p| self.geodetic_to_ned(p)).collect()
    }

    /// Convert NED positions to geodetic.
    #[must_use]
    pub fn ned_to_geodetic_batch(&self, positions: &[Ned]) -> Vec<Geodetic> {
        self.ecef_to_geodetic_batch(&self.ned_to_ecef_batch(positions))
    }

    /// Convert ECEF positions to AER.
    #[must_use]
    pub fn ecef_to_aer_batch(&self, positions: &[Cartesian]) -> Vec<Aer> {
        positions.iter().map(|p| self.ecef_to_aer(p)).collect()
    }

    /// Convert AER positions to ECEF.
    #[must_use]
    pub fn aer_to_ecef_batch(&self, positions: &[Aer]) -> Vec<Cartesian> {
        positions.iter().map(|p| self.aer_to_ecef(p)).collect()
    }

    /// Convert geodetic positions to AER.
    #[must_use]
    pub fn geodetic_to_aer_batch(&self, positions: &[Geodetic]) -> Vec<Aer> {
        positions.iter().map(|p| self.geodetic_to_aer(p)).collect()
    }

    /// Convert AER positions to geodetic.
    #[must_use]
    pub fn aer_to_geodetic_batch(&self, positions: &[Aer]) -> Vec<Geodetic> {
        self.ecef_to_geodetic_batch(&self.aer_to_ecef_batch(positions))
    }

    fn ecef_to_geodetic_batch(&self, positions: &[Cartesian]) -> Vec<Geodetic> {
        geodetic::ecef_to_geodetic_batch(positions, self.unit, self.ellipsoid, &self.options)
    }
}

/// Convert a geodetic position to ENU at an origin.
/// * `position` - the geodetic position.
/// * `origin` - the geodetic position of the origin.
/// * `unit` - the unit of the latitudes and longitudes.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
pub fn geodetic_to_enu(
    position: &Geodetic,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Enu {
    LocalFrame::new(origin, unit, ellipsoid).geodetic_to_enu(position)
}

/// Convert an ENU position at an origin to geodetic.
#[must_use]
pub fn enu_to_geodetic(
    enu: &Enu,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Geodetic {
    LocalFrame::new(origin, unit, ellipsoid).enu_to_geodetic(enu)
}

/// Convert an ECEF position to ENU at an origin.
#[must_use]
pub fn ecef_to_enu(
    position: &Cartesian,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Enu {
    LocalFrame::new(origin, unit, ellipsoid).ecef_to_enu(position)
}

/// Convert an ENU position at an origin to ECEF.
#[must_use]
pub fn enu_to_ecef(
    enu: &Enu,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Cartesian {
    LocalFrame::new(origin, unit, ellipsoid).enu_to_ecef(enu)
}

/// Convert a geodetic position to NED at an origin.
#[must_use]
pub fn geodetic_to_ned(
    position: &Geodetic,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Ned {
    LocalFrame::new(origin, unit, ellipsoid).geodetic_to_ned(position)
}

/// Convert a NED position at an origin to geodetic.
#[must_use]
pub fn ned_to_geodetic(
    ned: &Ned,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Geodetic {
    LocalFrame::new(origin, unit, ellipsoid).ned_to_geodetic(ned)
}

/// Convert an ECEF position to NED at an origin.
#[must_use]
pub fn ecef_to_ned(
    position: &Cartesian,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Ned {
    LocalFrame::new(origin, unit, ellipsoid).ecef_to_ned(position)
}

/// Convert a NED position at an origin to ECEF.
#[must_use]
pub fn ned_to_ecef(
    ned: &Ned,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Cartesian {
    LocalFrame::new(origin, unit, ellipsoid).ned_to_ecef(ned)
}

/// Convert a geodetic position to AER from an origin.
#[must_use]
pub fn geodetic_to_aer(
    position: &Geodetic,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Aer {
    LocalFrame::new(origin, unit, ellipsoid).geodetic_to_aer(position)
}

/// Convert an AER position from an origin to geodetic.
#[must_use]
pub fn aer_to_geodetic(
    aer: &Aer,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Geodetic {
    LocalFrame::new(origin, unit, ellipsoid).aer_to_geodetic(aer)
}

/// Convert an ECEF position to AER from an origin.
#[must_use]
pub fn ecef_to_aer(
    position: &Cartesian,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Aer {
    LocalFrame::new(origin, unit, ellipsoid).ecef_to_aer(position)
}

/// Convert an AER position from an origin to ECEF.
#[must_use]
pub fn aer_to_ecef(
    aer: &Aer,
    origin: &Geodetic,
    unit: AngleUnit,
    ellipsoid: &Ellipsoid,
) -> Cartesian {
    LocalFrame::new(origin, unit, ellipsoid).aer_to_ecef(aer)
}
