//! Request checksum algorithm
//!
//! Control requests carry a 16-bit integrity word over everything that
//! follows the checksum field:
//! 1. Sum the body as unsigned 16-bit little-endian words
//! 2. When the sum exceeds 0xFFFF, subtract 0xFFFF (wrapping)
//! 3. Take the ones-complement: ~sum

use tracing::trace;

/// Calculate the request checksum over a serialized body
///
/// # Algorithm
///
/// ```text
/// 1. Sum all 16-bit words (little-endian); a trailing odd byte
///    counts as the low byte of a word
/// 2. While sum > 0xFFFF: sum -= 0xFFFF
/// 3. Return ~sum as u16
/// ```
///
/// # Examples
///
/// ```
/// use safescan_core::checksum;
///
/// let checksum = checksum::calculate(&[0x35, 0x00, 0x00, 0x00]);
/// println!("Checksum: 0x{:04X}", checksum);
/// ```
pub fn calculate(body: &[u8]) -> u16 {
    let mut sum: u32 = 0;

    for chunk in body.chunks(2) {
        let word = if chunk.len() == 2 {
            u16::from_le_bytes([chunk[0], chunk[1]]) as u32
        } else {
            // Odd trailing byte - treat as low byte of u16
            chunk[0] as u32
        };

        sum = sum.wrapping_add(word);

        while sum > 0xFFFF {
            sum = sum.wrapping_sub(0xFFFF);
        }
    }

    let checksum = !sum as u16;

    trace!(
        body_len = body.len(),
        checksum = format!("0x{:04X}", checksum),
        "Calculated checksum"
    );

    checksum
}

/// Verify a checksum against a serialized body
pub fn verify(body: &[u8], expected: u16) -> bool {
    calculate(body) == expected
}
