use crate::command::Command;
use crate::print::Format;

use clap::Parser;
use std::path::PathBuf;

/// Query and configure Voltronic/InfiniSolar inverters over the P18 protocol
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Options {
    /// Config file to read, voltronic-p18.yaml is used when present
    #[clap(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,

    /// Response timeout in milliseconds (1 to 60000)
    #[clap(short = 't', long = "timeout", value_parser = clap::value_parser!(u64).range(1..=60000))]
    pub timeout: Option<u64>,

    /// Debug logging, with hexdumps of every frame
    #[clap(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Build the command and log it without touching the device
    #[clap(short = 'p', long = "pretend")]
    pub pretend: bool,

    /// Output format
    #[clap(short = 'f', long = "format", value_enum)]
    pub format: Option<Format>,

    /// hidraw device node
    #[clap(short = 'd', long = "device", conflicts_with = "tcp")]
    pub device: Option<PathBuf>,

    /// Serial-to-network bridge, as host:port
    #[clap(long = "tcp")]
    pub tcp: Option<String>,

    /// Don't append a CRC to commands
    #[clap(long = "no-write-crc")]
    pub no_write_crc: bool,

    /// Don't expect a CRC in responses
    #[clap(long = "no-parse-crc")]
    pub no_parse_crc: bool,

    /// Don't check the CRC of responses
    #[clap(long = "no-verify-crc")]
    pub no_verify_crc: bool,

    #[clap(subcommand)]
    pub command: Command,
}

impl Options {
    pub fn new() -> Self {
        Self::parse()
    }
}
