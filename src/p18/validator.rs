use crate::error::{Error, Result};

use std::ops::Range;

/// Bytes in front of a query response payload: `^`, `D` and the length.
pub const HEADER_LEN: usize = 5;

// {{{ Acknowledgement
/// Outcome of a set command as reported by the inverter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Acknowledgement {
    Success,
    Failure,
}

impl Acknowledgement {
    /// Turns a refusal into [`Error::SetCommandFailure`].
    pub fn into_result(self) -> Result<()> {
        match self {
            Acknowledgement::Success => Ok(()),
            Acknowledgement::Failure => Err(Error::SetCommandFailure),
        }
    }
} // }}}

/// Checks the framing of a query response and returns the payload range.
///
/// `size` is the number of bytes read for the frame, which may exceed
/// `buf.len()` when the CRC and terminator were already stripped. The
/// range starts right after the length field and spans the declared
/// length minus three.
pub fn validate_query(buf: &[u8], size: usize) -> Result<Range<usize>> {
    if buf.len() < HEADER_LEN {
        return Err(malformed(format!("response of {} bytes is too short", buf.len())));
    }
    if buf[0] != b'^' || buf[1] != b'D' {
        return Err(malformed(format!(
            "response starts with {:?}, expected \"^D\"",
            String::from_utf8_lossy(&buf[..2])
        )));
    }

    let len = declared_length(&buf[2..HEADER_LEN])?;
    if size < len + 4 {
        return Err(malformed(format!(
            "response declares {} bytes but only {} were read",
            len, size
        )));
    }

    let data_len = len
        .checked_sub(3)
        .ok_or_else(|| malformed(format!("declared length {} is shorter than its own field", len)))?;

    Ok(HEADER_LEN..HEADER_LEN + data_len)
}

/// Checks the framing of a set command acknowledgement.
pub fn validate_set_ack(buf: &[u8], size: usize) -> Result<Acknowledgement> {
    if size < 2 || buf.len() < 2 || buf[0] != b'^' {
        return Err(malformed(format!(
            "invalid acknowledgement {:?}",
            String::from_utf8_lossy(buf)
        )));
    }

    Ok(if buf[1] == b'1' {
        Acknowledgement::Success
    } else {
        Acknowledgement::Failure
    })
}

/// The payload of `buf` within `range` as text.
///
/// The range is clamped to the buffer; bytes that aren't valid UTF-8 are
/// replaced rather than rejected.
pub fn payload(buf: &[u8], range: Range<usize>) -> String {
    let end = range.end.min(buf.len());
    let start = range.start.min(end);
    String::from_utf8_lossy(&buf[start..end]).into_owned()
}

fn declared_length(field: &[u8]) -> Result<usize> {
    if !field.iter().all(u8::is_ascii_digit) {
        return Err(malformed(format!(
            "length field {:?} is not numeric",
            String::from_utf8_lossy(field)
        )));
    }

    Ok(field
        .iter()
        .fold(0, |acc, digit| acc * 10 + usize::from(digit - b'0')))
}

fn malformed(message: String) -> Error {
    Error::MalformedResponse(message)
}
