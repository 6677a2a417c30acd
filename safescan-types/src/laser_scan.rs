//! Host-side representation of an accepted measurement frame

use std::fmt;

use chrono::{DateTime, Utc};

use crate::angle::TenthOfDegree;

/// A single range/reflectivity sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Distance to the reflecting object in millimeters
    pub distance_mm: u16,

    /// Return strength of the laser pulse
    pub reflectivity: u16,
}

/// A processed scan, derived 1:1 from an accepted monitoring frame
///
/// Only frames received while the session is operational and carrying
/// at least one measurement ever become a `LaserScan`.
#[derive(Debug, Clone, PartialEq)]
pub struct LaserScan {
    /// Angle of the first measurement
    pub start_angle: TenthOfDegree,

    /// Angular distance between adjacent measurements
    pub resolution: TenthOfDegree,

    /// Ordered measurement sequence, never empty
    pub measurements: Vec<Measurement>,

    /// Time the frame was accepted on the host
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for LaserScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LaserScan[start={}, resolution={}, samples={}]",
            self.start_angle,
            self.resolution,
            self.measurements.len()
        )
    }
}
