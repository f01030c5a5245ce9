pub use anyhow::{anyhow, bail, Context, Error, Result};
pub use log::{debug, error, info, trace, warn};

pub use crate::command::{Command, Request};
pub use crate::config::Config;
pub use crate::options::Options;
pub use crate::p18::{
    self, Acknowledgement, QueryCommand, Response, SetCommand,
};
pub use crate::print::{Format, Printable};
pub use crate::utils::Utils;
pub use crate::voltronic::{CrcOptions, Device, Reply, Transport};
