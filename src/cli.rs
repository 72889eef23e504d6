use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{self, Config};
use crate::dns::{RecordType, WireMode};
use crate::error::Result;
use crate::printer::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "dns_bits")]
#[command(about = "Send one DNS query over UDP and print both packets bit by bit", long_about = None)]
pub struct Args {
    /// Domain name to query
    pub domain: String,

    /// Resolver address, `ip` or `ip:port` [default: 8.8.8.8:53]
    #[arg(short, long)]
    pub resolver: Option<String>,

    /// Record type to ask for (A, AAAA, MX, ... or TYPEnnn)
    #[arg(short = 't', long, default_value = "A")]
    pub qtype: RecordType,

    /// Read timeout in seconds, waits forever when unset
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Legacy packing: TC repeated in bit 3, QTYPE written as QCLASS
    #[arg(long)]
    pub legacy_wire: bool,

    /// Rendering for both packets [default: bits]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Optional `key: value` config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log filter for stderr, refined by RUST_LOG
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Loads the config file, if any, then layers the flags on top.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(resolver) = &self.resolver {
            config.resolver = config::parse_resolver(resolver)?;
        }
        if let Some(secs) = self.timeout {
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if self.legacy_wire {
            config.wire_mode = WireMode::Legacy;
        }
        if let Some(format) = self.format {
            config.format = format;
        }

        Ok(config)
    }
}
