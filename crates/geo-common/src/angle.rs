//! Angles with an explicit unit.
//!
//! All projection math runs in radians while every public coordinate
//! (centers, rotations, inverted points) is expressed in degrees. `Angle`
//! stores radians internally and converts on the way in and out, so a value
//! never has to carry its unit in a variable name.
//!
//! ```
//! use geo_common::{Angle, AngleExt};
//!
//! let a = 100.0_f64.deg().clamped_latitude();
//! assert!((a.degrees() - 90.0).abs() < 1e-12);
//! assert_eq!(Angle::from_radians(0.0), 0.0_f64.deg());
//! ```

use std::f64::consts::FRAC_PI_2;

use crate::error::{GeoError, GeoResult};

/// A planar angle.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { rad: 0.0 };

    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg.to_radians(),
        }
    }

    pub fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    /// Value in degrees.
    pub fn degrees(self) -> f64 {
        self.rad.to_degrees()
    }

    /// Value in radians.
    pub fn radians(self) -> f64 {
        self.rad
    }

    pub fn is_finite(self) -> bool {
        self.rad.is_finite()
    }

    /// Saturate into the latitude range `[-90°, 90°]`.
    pub fn clamped_latitude(self) -> Self {
        Self {
            rad: self.rad.clamp(-FRAC_PI_2, FRAC_PI_2),
        }
    }

    /// Check that this angle is a usable latitude: finite and within `[-90°, 90°]`.
    pub fn validate_latitude(self, param: &str) -> GeoResult<Self> {
        if !self.is_finite() {
            return Err(GeoError::invalid_angle(param, "latitude must be finite"));
        }
        // A few ulps of slack so that values round-tripped through degrees still pass.
        if self.rad.abs() > FRAC_PI_2 + 1e-12 {
            return Err(GeoError::invalid_angle(
                param,
                format!("latitude {}° is outside [-90°, 90°]", self.degrees()),
            ));
        }
        Ok(self.clamped_latitude())
    }

    /// Check that this angle is finite.
    pub fn validate_finite(self, param: &str) -> GeoResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(GeoError::invalid_angle(param, "angle must be finite"))
        }
    }
}

/// Unit suffixes for plain floats: `45.0_f64.deg()`, `PI.rad()`.
pub trait AngleExt {
    fn deg(self) -> Angle;
    fn rad(self) -> Angle;
}

impl AngleExt for f64 {
    fn deg(self) -> Angle {
        Angle::from_degrees(self)
    }

    fn rad(self) -> Angle {
        Angle::from_radians(self)
    }
}
