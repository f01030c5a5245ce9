pub mod codec;
pub mod crc;
pub mod transport;

pub use codec::{CrcOptions, FrameCodec, Reply};
pub use transport::{Device, Link, Transport};
