use crate::prelude::*;

use serde::Deserialize;
use serde_with::{serde_as, DurationMilliSeconds};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "voltronic-p18.yaml";
pub const MAX_TIMEOUT_MS: u64 = 60_000;

#[serde_as]
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_loglevel")]
    pub loglevel: String,

    #[serde(default)]
    pub format: Format,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "Config::default_timeout", rename = "timeout_ms")]
    pub timeout: Duration,

    #[serde(default)]
    pub device: Device,

    #[serde(default)]
    pub crc: CrcOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: Self::default_loglevel(),
            format: Format::default(),
            timeout: Self::default_timeout(),
            device: Device::default(),
            crc: CrcOptions::default(),
        }
    }
}

impl Config {
    pub fn new(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        info!("Reading configuration from {}", file.display());
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("error reading {}", file.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("error parsing {}", file.display()))?;

        info!("Configuration loaded:");
        info!("  Log Level: {}", config.loglevel);
        info!("  Format: {:?}", config.format);
        info!("  Timeout: {}ms", config.timeout.as_millis());
        info!("  Device: {}", config.device);
        info!(
            "  CRC: write={} parse={} verify={}",
            config.crc.write(),
            config.crc.parse(),
            config.crc.verify()
        );

        config.validate()?;
        Ok(config)
    }

    /// Loads `file` if given, else the default file when it exists, else defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(file) => Self::new(file),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::new(default)
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Applies command line overrides on top of the file.
    pub fn merge(&mut self, options: &Options) -> Result<()> {
        if let Some(timeout) = options.timeout {
            self.timeout = Duration::from_millis(timeout);
        }
        if let Some(format) = options.format {
            self.format = format;
        }
        if let Some(path) = &options.device {
            self.device = Device::Hidraw { path: path.clone() };
        }
        if let Some(address) = &options.tcp {
            let (host, port) = address
                .rsplit_once(':')
                .ok_or_else(|| anyhow!("--tcp expects host:port, got {}", address))?;
            let port = port
                .parse()
                .with_context(|| format!("invalid port in {}", address))?;
            self.device = Device::Tcp {
                host: host.to_string(),
                port,
                use_tcp_nodelay: None,
            };
        }

        self.crc.disable_write |= options.no_write_crc;
        self.crc.disable_parse |= options.no_parse_crc;
        self.crc.disable_verify |= options.no_verify_crc;

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        let timeout = self.timeout.as_millis();
        if timeout == 0 || timeout > MAX_TIMEOUT_MS as u128 {
            bail!("timeout_ms must be between 1 and {}", MAX_TIMEOUT_MS);
        }

        match &self.device {
            Device::Hidraw { path } => {
                if path.as_os_str().is_empty() {
                    bail!("device.path cannot be empty");
                }
            }
            Device::Tcp { host, port, .. } => {
                if host.is_empty() {
                    bail!("device.host cannot be empty");
                }
                if *port == 0 {
                    bail!("device.port must be between 1 and 65535");
                }
            }
        }

        Ok(())
    }

    pub fn loglevel(&self) -> &str {
        &self.loglevel
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn crc(&self) -> CrcOptions {
        self.crc
    }

    fn default_loglevel() -> String {
        "warn".to_string()
    }

    fn default_timeout() -> Duration {
        Duration::from_millis(1000)
    }
}
