//! 16-bit Internet checksum (RFC 1071 style) over SimSSL packets.
//!
//! The sender computes the checksum with the checksum field zeroed and writes
//! it into the packet. A receiver runs [`compute`] over the whole packet with
//! the field filled in; an uncorrupted packet sums to 0.

/// Compute the checksum over the first `length` bytes of `data`.
///
/// Successive big-endian 16-bit words are summed. An odd trailing byte is
/// taken as the high byte of a word with a zero low byte. Carries out of bit
/// 16 are folded back (twice at most) and the complement is returned.
///
/// A `length` beyond the end of `data` is clamped to `data.len()`.
pub fn compute(data: &[u8], length: u16) -> u16 {
    let length = (length as usize).min(data.len());
    let data = &data[..length];

    let mut acc: u32 = 0;

    let mut words = data.chunks_exact(2);
    for word in &mut words {
        acc += u16::from_be_bytes([word[0], word[1]]) as u32;
    }
    if let [last] = words.remainder() {
        acc += (*last as u32) << 8;
    }

    acc = (acc >> 16) + (acc & 0xffff);
    if acc & 0xffff_0000 != 0 {
        acc = (acc >> 16) + (acc & 0xffff);
    }

    !(acc as u16)
}

/// Receiver rule: recomputing over a stamped packet yields 0.
pub fn verify(data: &[u8]) -> bool {
    match u16::try_from(data.len()) {
        Ok(len) => compute(data, len) == 0,
        Err(_) => false,
    }
}
