//! Monitoring frame wire message
//!
//! One datagram on the data channel carries one measurement batch.

use bytes::{Buf, BytesMut};
use chrono::{DateTime, Utc};

use safescan_types::{LaserScan, Measurement, TenthOfDegree};

use crate::error::{Error, Result};

/// A single device-emitted measurement batch
///
/// # Wire layout
///
/// ```text
/// ┌─────────────┬─────────────┬──────────────┬──────────┬──────────────────────────┐
/// │ Start angle │ Resolution  │ Scan counter │  Count   │ Count × measurement      │
/// │   2 bytes   │   2 bytes   │   4 bytes    │  2 bytes │ (dist LE u16, refl LE    │
/// │  (LE i16)   │  (LE i16)   │  (LE u32)    │ (LE u16) │  u16) per sample         │
/// └─────────────┴─────────────┴──────────────┴──────────┴──────────────────────────┘
/// ```
///
/// Angles are in tenths of a degree. Decoding is total over well-formed
/// input and fails closed: a datagram whose length disagrees with the
/// declared sample count yields an error, never a partial frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringFrame {
    /// Angle of the first measurement
    pub start_angle: TenthOfDegree,

    /// Angular distance between adjacent measurements
    pub resolution: TenthOfDegree,

    /// Monotonically increasing per-device frame id
    pub scan_counter: u32,

    /// Ordered measurement sequence, possibly empty
    pub measurements: Vec<Measurement>,
}

impl MonitoringFrame {
    /// Frame header size in bytes
    pub const HEADER_SIZE: usize = 10;

    /// Bytes per encoded measurement
    pub const MEASUREMENT_SIZE: usize = 4;

    /// Decode a frame from one datagram
    ///
    /// # Errors
    ///
    /// Returns an error if the datagram is shorter than the header or
    /// the remaining length does not match the declared sample count.
    pub fn decode(mut buf: BytesMut) -> Result<Self> {
        if buf.len() < Self::HEADER_SIZE {
            return Err(Error::FrameTooShort {
                expected: Self::HEADER_SIZE,
                actual: buf.len(),
            });
        }

        let start_angle = TenthOfDegree::new(buf.get_i16_le());
        let resolution = TenthOfDegree::new(buf.get_i16_le());
        let scan_counter = buf.get_u32_le();
        let declared = buf.get_u16_le() as usize;

        if buf.remaining() != declared * Self::MEASUREMENT_SIZE {
            return Err(Error::MeasurementCountMismatch {
                declared,
                available: buf.remaining(),
            });
        }

        let mut measurements = Vec::with_capacity(declared);
        for _ in 0..declared {
            measurements.push(Measurement {
                distance_mm: buf.get_u16_le(),
                reflectivity: buf.get_u16_le(),
            });
        }

        Ok(Self {
            start_angle,
            resolution,
            scan_counter,
            measurements,
        })
    }

    /// Derive the host-side scan from an accepted frame
    pub fn to_laser_scan(&self, timestamp: DateTime<Utc>) -> LaserScan {
        LaserScan {
            start_angle: self.start_angle,
            resolution: self.resolution,
            measurements: self.measurements.clone(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn encode(start: i16, resolution: i16, counter: u32, samples: &[(u16, u16)]) -> BytesMut {
        let mut buf = BytesMut::new();
        buf.put_i16_le(start);
        buf.put_i16_le(resolution);
        buf.put_u32_le(counter);
        buf.put_u16_le(samples.len() as u16);
        for &(distance, reflectivity) in samples {
            buf.put_u16_le(distance);
            buf.put_u16_le(reflectivity);
        }
        buf
    }

    #[test]
    fn test_decode_frame() {
        let buf = encode(0, 275, 1, &[(100, 20), (2500, 10), (1000, 3)]);
        let frame = MonitoringFrame::decode(buf).unwrap();

        assert_eq!(frame.start_angle, TenthOfDegree::new(0));
        assert_eq!(frame.resolution, TenthOfDegree::new(275));
        assert_eq!(frame.scan_counter, 1);
        assert_eq!(
            frame.measurements,
            vec![
                Measurement { distance_mm: 100, reflectivity: 20 },
                Measurement { distance_mm: 2500, reflectivity: 10 },
                Measurement { distance_mm: 1000, reflectivity: 3 },
            ]
        );
    }

    #[test]
    fn test_decode_empty_measurement_set() {
        let buf = encode(1, 2, 42, &[]);
        let frame = MonitoringFrame::decode(buf).unwrap();
        assert!(frame.measurements.is_empty());
        assert_eq!(frame.scan_counter, 42);
    }

    #[test]
    fn test_decode_too_short() {
        let buf = BytesMut::from(&[1u8, 2, 3][..]);
        let result = MonitoringFrame::decode(buf);
        assert!(matches!(result, Err(Error::FrameTooShort { expected: 10, actual: 3 })));
    }

    #[test]
    fn test_decode_truncated_measurements() {
        let mut buf = encode(0, 275, 1, &[(100, 20), (200, 30)]);
        buf.truncate(buf.len() - 2);

        let result = MonitoringFrame::decode(buf);
        assert!(matches!(
            result,
            Err(Error::MeasurementCountMismatch { declared: 2, available: 6 })
        ));
    }

    #[test]
    fn test_decode_excess_bytes() {
        let mut buf = encode(0, 275, 1, &[(100, 20)]);
        buf.put_u8(0xFF);

        assert!(MonitoringFrame::decode(buf).is_err());
    }

    #[test]
    fn test_to_laser_scan_copies_fields() {
        let frame = MonitoringFrame::decode(encode(10, 25, 7, &[(500, 1), (600, 2)])).unwrap();
        let stamp = Utc::now();
        let scan = frame.to_laser_scan(stamp);

        assert_eq!(scan.start_angle, frame.start_angle);
        assert_eq!(scan.resolution, frame.resolution);
        assert_eq!(scan.measurements, frame.measurements);
        assert_eq!(scan.timestamp, stamp);
    }

    proptest! {
        #[test]
        fn test_decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let _ = MonitoringFrame::decode(BytesMut::from(&data[..]));
        }

        #[test]
        fn test_decode_accepts_consistent_frames(
            start in any::<i16>(),
            resolution in any::<i16>(),
            counter in any::<u32>(),
            samples in proptest::collection::vec((any::<u16>(), any::<u16>()), 0..64),
        ) {
            let frame = MonitoringFrame::decode(encode(start, resolution, counter, &samples)).unwrap();
            prop_assert_eq!(frame.measurements.len(), samples.len());
        }
    }
}
