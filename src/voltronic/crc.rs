//! Frame checksum used on every Voltronic link.
//!
//! This is CRC-16/XMODEM followed by a pass that bumps any byte of the
//! result which would collide with a framing character.

pub type Crc = u16;

/// Bytes the framing layer reserves: '(', '\r' and '\n'.
pub const RESERVED: [u8; 3] = [0x28, 0x0d, 0x0a];

/// Size of a serialised CRC.
pub const LEN: usize = 2;

fn is_reserved(byte: u8) -> bool {
    RESERVED.contains(&byte)
}

pub fn compute(buffer: &[u8]) -> Crc {
    let mut crc = crc16::State::<crc16::XMODEM>::calculate(buffer);

    if is_reserved((crc & 0xff) as u8) {
        crc = crc.wrapping_add(1);
    }
    if is_reserved((crc >> 8) as u8) {
        crc = crc.wrapping_add(0x100);
    }

    crc
}

/// Serialises `crc` big-endian into the first two bytes of `buf` and
/// returns the number of bytes written.
pub fn write(crc: Crc, buf: &mut [u8]) -> usize {
    buf[..LEN].copy_from_slice(&crc.to_be_bytes());
    LEN
}

/// Reads a big-endian CRC from the first two bytes of `buf`.
pub fn read(buf: &[u8]) -> Crc {
    u16::from_be_bytes([buf[0], buf[1]])
}
