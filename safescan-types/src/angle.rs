//! Angular units used by the scanner protocol
//!
//! The device expresses all angles in tenths of a degree, so the host
//! keeps them in that unit end to end and only converts at the edges.

use std::fmt;

use crate::error::{Error, Result};

/// An angle in tenths of a degree
///
/// # Examples
///
/// ```
/// use safescan_types::TenthOfDegree;
///
/// let angle = TenthOfDegree::new(2750);
/// assert_eq!(angle.value(), 2750);
/// assert_eq!(angle.to_degrees(), 275.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TenthOfDegree(i16);

impl TenthOfDegree {
    /// Create an angle from a raw tenth-of-degree count
    pub const fn new(value: i16) -> Self {
        Self(value)
    }

    /// Raw tenth-of-degree count
    pub const fn value(&self) -> i16 {
        self.0
    }

    /// Convert to degrees
    pub fn to_degrees(&self) -> f64 {
        f64::from(self.0) / 10.0
    }

    /// Convert to radians
    pub fn to_radians(&self) -> f64 {
        self.to_degrees().to_radians()
    }
}

impl fmt::Display for TenthOfDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.to_degrees())
    }
}

/// Angular range covered by a scan, in tenths of a degree
///
/// The range is half-open in spirit: `start` is the first measured
/// angle, `end` the last. Construction rejects empty or inverted
/// ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanRange {
    start: TenthOfDegree,
    end: TenthOfDegree,
}

impl ScanRange {
    /// Create a validated scan range
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start >= end`.
    pub fn new(start: TenthOfDegree, end: TenthOfDegree) -> Result<Self> {
        if start >= end {
            return Err(Error::Validation(format!(
                "scan range start ({start}) must lie before end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> TenthOfDegree {
        self.start
    }

    pub const fn end(&self) -> TenthOfDegree {
        self.end
    }
}

impl fmt::Display for ScanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tenth_of_degree_conversions() {
        let angle = TenthOfDegree::new(900);
        assert_eq!(angle.to_degrees(), 90.0);
        assert!((angle.to_radians() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_scan_range_valid() {
        let range = ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750)).unwrap();
        assert_eq!(range.start().value(), 0);
        assert_eq!(range.end().value(), 2750);
    }

    #[test]
    fn test_scan_range_rejects_empty() {
        assert!(ScanRange::new(TenthOfDegree::new(100), TenthOfDegree::new(100)).is_err());
    }

    #[test]
    fn test_scan_range_rejects_inverted() {
        let result = ScanRange::new(TenthOfDegree::new(2750), TenthOfDegree::new(0));
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
