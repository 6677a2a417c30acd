//! Stop request wire message

use bytes::{BufMut, BytesMut};

use crate::checksum;
use crate::constants::OP_STOP;

/// Request telling the device to cease streaming
///
/// # Wire layout
///
/// ```text
/// ┌──────────┬──────────┬───────────┐
/// │ Checksum │  Opcode  │ Reserved  │
/// │  2 bytes │  4 bytes │ 12 bytes  │
/// │ (LE u16) │ (LE u32) │ (zeroed)  │
/// └──────────┴──────────┴───────────┘
/// ```
///
/// The request carries no payload fields; the encoding is fixed, so
/// every stop request serializes to the same bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopRequest;

impl StopRequest {
    /// Serialized request size in bytes
    pub const SIZE: usize = 18;

    const RESERVED: [u8; 12] = [0; 12];

    pub fn new() -> Self {
        Self
    }

    /// Serialize to the fixed wire layout
    pub fn serialize(&self) -> BytesMut {
        let mut body = BytesMut::with_capacity(Self::SIZE - 2);
        body.put_u32_le(OP_STOP);
        body.put_slice(&Self::RESERVED);

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

    #[test]
    fn test_serialize_is_deterministic() {
        assert_eq!(StopRequest::new().serialize(), StopRequest::new().serialize());
    }

    #[test]
    fn test_serialize_has_fixed_size() {
        assert_eq!(StopRequest::new().serialize().len(), StopRequest::SIZE);
    }

    #[test]
    fn test_opcode_and_reserved_block() {
        let buf = StopRequest::new().serialize();
        assert_eq!(&buf[2..6], &[0x36, 0x00, 0x00, 0x00]);
        assert!(buf[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_checksum_covers_body() {
        let buf = StopRequest::new().serialize();
        let declared = u16::from_le_bytes([buf[0], buf[1]]);
        assert!(checksum::verify(&buf[2..], declared));
    }
}
