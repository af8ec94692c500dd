//! # Module for handling line number operands
//!
//! A line number that follows a GOTO-class keyword is stored as a marker byte and three
//! payload bytes.  The top two bits of each byte of the number are gathered into the first
//! payload byte, the remaining six bits of each byte go into the other two, so that no
//! payload byte can be mistaken for a keyword token or a line separator.

use log::{error,trace};
use super::{Error,MAX_LINE_NUMBER};

/// Introduces a packed line number
pub const MARKER: u8 = 0x8D;
/// Applied to the gathered high bits
pub const MASK: u8 = 0x54;
/// Length of a packed line number including the marker
pub const PACKED_LEN: usize = 4;

/// Pack a line number, valid range is 0..32768
pub fn encode(num: u16) -> Result<[u8;PACKED_LEN],Error> {
    if num > MAX_LINE_NUMBER {
        error!("line number {} cannot be packed",num);
        return Err(Error::InvalidLineNumberRange);
    }
    let [lo,hi] = u16::to_le_bytes(num);
    let top_bits = (((lo & 0xc0) >> 2) | ((hi & 0xc0) >> 4)) ^ MASK;
    let ans = [MARKER, top_bits, (lo & 0x3f) | 0x40, (hi & 0x3f) | 0x40];
    trace!("packed {} as {:02X?}",num,ans);
    Ok(ans)
}

/// Unpack a line number, `bytes` must begin with the marker
pub fn decode(bytes: &[u8]) -> Result<u16,Error> {
    if bytes.len() < PACKED_LEN {
        error!("packed line number needs {} bytes, got {}",PACKED_LEN,bytes.len());
        return Err(Error::MalformedGotoEncoding);
    }
    if bytes[0] != MARKER {
        error!("expected line number marker, got {:02X}",bytes[0]);
        return Err(Error::MalformedGotoEncoding);
    }
    if bytes[2] & 0xc0 != 0x40 || bytes[3] & 0xc0 != 0x40 {
        error!("line number payload {:02X?} is malformed",&bytes[0..PACKED_LEN]);
        return Err(Error::MalformedGotoEncoding);
    }
    let top_bits = bytes[1] ^ MASK;
    if top_bits & 0xc3 != 0 {
        error!("line number payload {:02X?} has stray high bits",&bytes[0..PACKED_LEN]);
        return Err(Error::MalformedGotoEncoding);
    }
    let lo = ((top_bits << 2) & 0xc0) | (bytes[2] & 0x3f);
    let hi = ((top_bits << 4) & 0xc0) | (bytes[3] & 0x3f);
    let num = u16::from_le_bytes([lo,hi]);
    if num > MAX_LINE_NUMBER {
        error!("line number payload {:02X?} decodes to {}",&bytes[0..PACKED_LEN],num);
        return Err(Error::MalformedGotoEncoding);
    }
    Ok(num)
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn known_encodings() {
        assert_eq!(encode(100).unwrap(),[0x8d,0x44,0x64,0x40]);
        assert_eq!(encode(0).unwrap(),[0x8d,0x54,0x40,0x40]);
        assert_eq!(encode(10).unwrap(),[0x8d,0x54,0x4a,0x40]);
        assert_eq!(encode(1000).unwrap(),[0x8d,0x64,0x68,0x43]);
        assert_eq!(encode(32767).unwrap(),[0x8d,0x60,0x7f,0x7f]);
    }
    #[test]
    fn bijection() {
        for n in 0..=MAX_LINE_NUMBER {
            let packed = encode(n).unwrap();
            assert_eq!(decode(&packed).unwrap(),n);
        }
    }
    #[test]
    fn out_of_range() {
        assert_eq!(encode(32768),Err(Error::InvalidLineNumberRange));
        assert_eq!(encode(u16::MAX),Err(Error::InvalidLineNumberRange));
    }
    #[test]
    fn bad_marker() {
        assert_eq!(decode(&[0x8c,0x44,0x64,0x40]),Err(Error::MalformedGotoEncoding));
        assert_eq!(decode(&[0x8d,0x44,0x64]),Err(Error::MalformedGotoEncoding));
        assert_eq!(decode(&[0x8d,0x44,0x0d,0x40]),Err(Error::MalformedGotoEncoding));
    }
    #[test]
    fn payload_beyond_range() {
        assert_eq!(decode(&[0x8d,0x5c,0x40,0x40]),Err(Error::MalformedGotoEncoding));
        assert_eq!(decode(&[0x8d,0x55,0x40,0x40]),Err(Error::MalformedGotoEncoding));
        assert_eq!(decode(&[0x8d,0xd4,0x40,0x40]),Err(Error::MalformedGotoEncoding));
    }
}
