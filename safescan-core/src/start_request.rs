//! Start request wire message

use bytes::{BufMut, BytesMut};

use crate::checksum;
use crate::config::ScannerConfiguration;
use crate::constants::OP_START;

/// Request telling the device to begin streaming monitoring frames
///
/// # Wire layout
///
/// ```text
/// ┌──────────┬──────────┬──────────┬──────────┬───────────┬───────────┬───────────┬──────────┬──────────┐
/// │ Checksum │ Sequence │  Opcode  │ Host IP  │ Ctrl Port │ Data Port │ Device IP │ Range    │ Range    │
/// │  2 bytes │  4 bytes │  4 bytes │  4 bytes │  2 bytes  │  2 bytes  │  4 bytes  │ start    │ end      │
/// │ (LE u16) │ (LE u32) │ (LE u32) │ (LE u32) │ (LE u16)  │ (LE u16)  │ (LE u32)  │ (LE i16) │ (LE i16) │
/// └──────────┴──────────┴──────────┴──────────┴───────────┴───────────┴───────────┴──────────┴──────────┘
/// ```
///
/// All multi-byte values are little-endian; the checksum covers every
/// byte after the checksum field. The layout has a stable field order
/// and no padding, so two requests built from equal field values
/// serialize to identical bytes.
///
/// The sequence number identifies one handshake attempt; the session
/// controller never reuses a sequence number within its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    config: ScannerConfiguration,
    sequence_number: u32,
}

impl StartRequest {
    /// Serialized request size in bytes
    pub const SIZE: usize = 26;

    /// Create a start request for one handshake attempt
    pub fn new(config: &ScannerConfiguration, sequence_number: u32) -> Self {
        Self {
            config: config.clone(),
            sequence_number,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Serialize to the fixed wire layout
    pub fn serialize(&self) -> BytesMut {
        let mut body = BytesMut::with_capacity(Self::SIZE - 2);
        body.put_u32_le(self.sequence_number);
        body.put_u32_le(OP_START);
        body.put_u32_le(u32::from(self.config.host_addr()));
        body.put_u16_le(self.config.host_control_port());
        body.put_u16_le(self.config.host_data_port());
        body.put_u32_le(u32::from(self.config.device_addr()));
        body.put_i16_le(self.config.scan_range().start().value());
        body.put_i16_le(self.config.scan_range().end().value());

        let mut buf = BytesMut::with_capacity(Self::SIZE);
        buf.put_u16_le(checksum::calculate(&body));
        buf.put_slice(&body);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use safescan_types::{ScanRange, TenthOfDegree};
    use std::net::Ipv4Addr;

    fn config() -> ScannerConfiguration {
        ScannerConfiguration::new(
            Ipv4Addr::new(127, 0, 0, 1),
            55055,
            50505,
            Ipv4Addr::new(127, 0, 0, 100),
            ScanRange::new(TenthOfDegree::new(0), TenthOfDegree::new(2750)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let a = StartRequest::new(&config(), 0).serialize();
        let b = StartRequest::new(&config(), 0).serialize();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize_has_fixed_size() {
        assert_eq!(StartRequest::new(&config(), 0).serialize().len(), StartRequest::SIZE);
    }

    #[test]
    fn test_sequence_number_changes_encoding() {
        let a = StartRequest::new(&config(), 0).serialize();
        let b = StartRequest::new(&config(), 1).serialize();
        assert_ne!(a, b);
    }

    #[test]
    fn test_field_order_is_stable() {
        let buf = StartRequest::new(&config(), 0x01020304).serialize();

        // Sequence number directly follows the checksum word
        assert_eq!(&buf[2..6], &[0x04, 0x03, 0x02, 0x01]);
        // Opcode
        assert_eq!(&buf[6..10], &[0x35, 0x00, 0x00, 0x00]);
        // Scan range occupies the final four bytes
        assert_eq!(&buf[22..24], &0i16.to_le_bytes());
        assert_eq!(&buf[24..26], &2750i16.to_le_bytes());
    }

    #[test]
    fn test_checksum_covers_body() {
        let buf = StartRequest::new(&config(), 7).serialize();
        let declared = u16::from_le_bytes([buf[0], buf[1]]);
        assert!(checksum::verify(&buf[2..], declared));
    }
}
