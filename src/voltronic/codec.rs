use crate::error::Error;
use crate::voltronic::crc;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::{debug, trace};
use serde::Deserialize;
use tokio_util::codec::{Decoder, Encoder};

/// Every frame on the wire ends with a carriage return.
pub const TERMINATOR: u8 = b'\r';

/// Upper bound on a single frame; anything longer means we lost sync.
const MAX_FRAME_SIZE: usize = 1024;

// {{{ CrcOptions
/// The three independent CRC switches of the link layer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrcOptions {
    /// Don't append a CRC to outgoing commands.
    pub disable_write: bool,
    /// Don't split a CRC off incoming frames.
    pub disable_parse: bool,
    /// Split the CRC off, but don't compare it.
    pub disable_verify: bool,
}

impl CrcOptions {
    pub fn write(&self) -> bool {
        !self.disable_write
    }

    pub fn parse(&self) -> bool {
        !self.disable_parse
    }

    pub fn verify(&self) -> bool {
        self.parse() && !self.disable_verify
    }
} // }}}

// {{{ Reply
/// One frame read back from the inverter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    /// Frame content, without the trailing `\r` and (when parsed) the CRC.
    pub data: Bytes,
    /// Raw number of bytes the frame occupied on the wire.
    pub received: usize,
}

impl Reply {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
} // }}}

// {{{ FrameCodec
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCodec {
    options: CrcOptions,
}

impl FrameCodec {
    pub fn new(options: CrcOptions) -> Self {
        Self { options }
    }
}

impl<'a> Encoder<&'a [u8]> for FrameCodec {
    type Error = Error;

    fn encode(&mut self, command: &'a [u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(command.len() + crc::LEN + 1);
        dst.put_slice(command);

        if self.options.write() {
            let mut serialised = [0u8; crc::LEN];
            crc::write(crc::compute(command), &mut serialised);
            dst.put_slice(&serialised);
        }

        dst.put_u8(TERMINATOR);
        Ok(())
    }
}

impl Decoder for FrameCodec {
    type Item = Reply;
    type Error = Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // HID reports are zero padded; the padding of a previous frame can
        // still be sitting in front of the next one.
        let padding = src.iter().take_while(|&&b| b == 0).count();
        src.advance(padding);

        let Some(end) = src.iter().position(|&b| b == TERMINATOR) else {
            if src.len() > MAX_FRAME_SIZE {
                return Err(Error::MalformedResponse(format!(
                    "no frame terminator within {} bytes",
                    MAX_FRAME_SIZE
                )));
            }
            return Ok(None);
        };

        let mut frame = src.split_to(end + 1);
        let received = frame.len();
        frame.truncate(end);
        trace!("frame of {} bytes", received);

        if self.options.parse() && frame.len() >= crc::LEN {
            let content_len = frame.len() - crc::LEN;
            let actual = crc::read(&frame[content_len..]);
            frame.truncate(content_len);

            if self.options.verify() {
                let expected = crc::compute(&frame);
                if actual != expected {
                    return Err(Error::CrcMismatch { expected, actual });
                }
            } else {
                debug!("skipping CRC verification (received {:#06x})", actual);
            }
        }

        Ok(Some(Reply {
            data: frame.freeze(),
            received,
        }))
    }
} // }}}
