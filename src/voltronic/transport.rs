use crate::error::{Error, Result};
use crate::utils::Utils;
use crate::voltronic::codec::{CrcOptions, FrameCodec, Reply};

use {
    async_trait::async_trait,
    bytes::BytesMut,
    futures::StreamExt,
    log::{debug, info, warn},
    net2::TcpStreamExt,
    serde::Deserialize,
    std::path::PathBuf,
    std::time::Duration,
    tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf},
    tokio_util::codec::{Encoder, FramedRead},
};

/// USB identifiers of the inverter's HID interface.
pub const USB_VENDOR_ID: u16 = 0x0665;
pub const USB_PRODUCT_ID: u16 = 0x5161;

/// The HID interface accepts commands in reports of this size.
pub const HID_REPORT_SIZE: usize = 8;

const TCP_KEEPALIVE_SECS: u64 = 60;

// {{{ Transport
/// A half-duplex request/response link to one inverter.
///
/// `execute` writes one command and waits for exactly one frame back.
/// The whole round trip shares a single timeout; nothing is retried.
#[async_trait]
pub trait Transport: Send {
    async fn execute(&mut self, command: &[u8], timeout: Duration) -> Result<Reply>;
} // }}}

// {{{ Device
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Device {
    /// Linux hidraw node of the inverter's USB port.
    Hidraw { path: PathBuf },
    /// Serial-to-network bridge in front of the inverter's RS232 port.
    Tcp {
        host: String,
        port: u16,
        use_tcp_nodelay: Option<bool>,
    },
}

impl Default for Device {
    fn default() -> Self {
        Device::Hidraw {
            path: PathBuf::from("/dev/hidraw0"),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Hidraw { path } => write!(f, "hidraw:{}", path.display()),
            Device::Tcp { host, port, .. } => write!(f, "tcp:{}:{}", host, port),
        }
    }
}

impl Device {
    pub async fn open(&self, options: CrcOptions, timeout: Duration) -> Result<Box<dyn Transport>> {
        match self {
            Device::Hidraw { path } => {
                info!(
                    "opening {} (USB {:04x}:{:04x})",
                    path.display(),
                    USB_VENDOR_ID,
                    USB_PRODUCT_ID
                );
                let file = tokio::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(path)
                    .await?;

                Ok(Box::new(
                    Link::new(file, options)
                        .with_name(self.to_string())
                        .with_report_size(HID_REPORT_SIZE),
                ))
            }
            Device::Tcp {
                host,
                port,
                use_tcp_nodelay,
            } => {
                let address = format!("{}:{}", host, port);
                info!("connecting to {}", address);

                let stream = tokio::time::timeout(timeout, tokio::net::TcpStream::connect(&address))
                    .await
                    .map_err(|_| Error::Timeout(timeout))??;

                let std_stream = stream.into_std()?;
                if let Err(e) = std_stream.set_keepalive(Some(Duration::new(TCP_KEEPALIVE_SECS, 0))) {
                    warn!("failed to set TCP keepalive: {}", e);
                }
                let stream = tokio::net::TcpStream::from_std(std_stream)?;

                if use_tcp_nodelay.unwrap_or(true) {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("failed to set TCP_NODELAY: {}", e);
                    }
                }

                Ok(Box::new(Link::new(stream, options).with_name(self.to_string())))
            }
        }
    }
} // }}}

// {{{ Link
/// Generic link over any byte stream, framed by [`FrameCodec`].
pub struct Link<S> {
    name: String,
    codec: FrameCodec,
    reader: FramedRead<ReadHalf<S>, FrameCodec>,
    writer: WriteHalf<S>,
    report_size: Option<usize>,
}

impl<S> Link<S>
where
    S: AsyncRead + AsyncWrite + Send,
{
    pub fn new(stream: S, options: CrcOptions) -> Self {
        let codec = FrameCodec::new(options);
        let (reader, writer) = tokio::io::split(stream);

        Self {
            name: "link".to_string(),
            codec,
            reader: FramedRead::new(reader, codec),
            writer,
            report_size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Split every outgoing frame into zero-padded reports of `size` bytes.
    pub fn with_report_size(mut self, size: usize) -> Self {
        self.report_size = Some(size);
        self
    }

    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        match self.report_size {
            Some(size) => {
                for chunk in frame.chunks(size) {
                    let mut report = vec![0u8; size];
                    report[..chunk.len()].copy_from_slice(chunk);
                    self.writer.write_all(&report).await?;
                }
            }
            None => self.writer.write_all(frame).await?,
        }
        self.writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<S> Transport for Link<S>
where
    S: AsyncRead + AsyncWrite + Send,
{
    async fn execute(&mut self, command: &[u8], timeout: Duration) -> Result<Reply> {
        let mut frame = BytesMut::new();
        self.codec.encode(command, &mut frame)?;

        debug!(
            "{}: writing {} bytes:\n{}",
            self.name,
            frame.len(),
            Utils::hexdump(&frame)
        );

        // whatever is left over belongs to an earlier exchange
        self.reader.read_buffer_mut().clear();

        let round_trip = async {
            self.write_frame(&frame).await?;
            match self.reader.next().await {
                Some(reply) => reply,
                None => Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "link closed before a complete frame was read",
                ))),
            }
        };

        let reply = tokio::time::timeout(timeout, round_trip)
            .await
            .map_err(|_| Error::Timeout(timeout))??;

        debug!(
            "{}: read {} bytes:\n{}",
            self.name,
            reply.received,
            Utils::hexdump(reply.as_bytes())
        );

        Ok(reply)
    }
} // }}}
