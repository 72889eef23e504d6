use std::fs;
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use crate::dns::WireMode;
use crate::dns_consts::{DEFAULT_RESOLVER, DNS_PORT};
use crate::error::{DnsError, Result};
use crate::printer::OutputFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub resolver: SocketAddr,
    pub timeout: Option<Duration>,
    pub wire_mode: WireMode,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolver: DEFAULT_RESOLVER
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([8, 8, 8, 8], DNS_PORT))),
            timeout: None,
            wire_mode: WireMode::Rfc1035,
            format: OutputFormat::Bits,
        }
    }
}

impl Config {
    /// Reads a `key: value` file. Keys left out keep their defaults.
    pub fn load(path: &Path) -> Result<Config> {
        let content = read_config_file(path)?;
        Config::from_content(&content)
    }

    pub fn from_content(content: &str) -> Result<Config> {
        let mut config = Config::default();

        if let Some(value) = find_key_value(content, "resolver") {
            config.resolver = parse_resolver(&value)?;
        }
        if let Some(value) = find_key_value(content, "timeout_secs") {
            config.timeout = parse_timeout(&value)?;
        }
        if let Some(value) = find_key_value(content, "legacy_wire") {
            config.wire_mode = if parse_bool("legacy_wire", &value)? {
                WireMode::Legacy
            } else {
                WireMode::Rfc1035
            };
        }
        if let Some(value) = find_key_value(content, "format") {
            config.format = parse_format(&value)?;
        }

        Ok(config)
    }
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            DnsError::Config(format!("Configuration file '{}' not found", path.display()))
        }
        ErrorKind::PermissionDenied => {
            DnsError::Config(format!("Permission denied reading '{}'", path.display()))
        }
        _ => DnsError::Config(format!("Failed to read '{}': {}", path.display(), e)),
    })
}

fn find_key_value(content: &str, key: &str) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            continue;
        }

        // Only the first colon splits, IPv6 resolvers keep theirs
        if let Some((k, v)) = line.split_once(':') {
            if k.trim() == key {
                return Some(v.trim().trim_matches('"').to_string());
            }
        }
    }

    None
}

/// Accepts `ip:port`, `[v6]:port`, or a bare address on port 53.
pub fn parse_resolver(value: &str) -> Result<SocketAddr> {
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }

    value
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| DnsError::Config(format!("'{}' is not a valid resolver address", value)))
}

/// Zero means no timeout.
pub fn parse_timeout(value: &str) -> Result<Option<Duration>> {
    let secs = value
        .parse::<u64>()
        .map_err(|_| DnsError::Config(format!("timeout_secs '{}' is not a valid integer", value)))?;

    Ok(if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(DnsError::Config(format!(
            "{} '{}' is not a valid boolean",
            key, value
        ))),
    }
}

fn parse_format(value: &str) -> Result<OutputFormat> {
    match value.to_ascii_lowercase().as_str() {
        "bits" => Ok(OutputFormat::Bits),
        "hex" => Ok(OutputFormat::Hex),
        "base64" => Ok(OutputFormat::Base64),
        _ => Err(DnsError::Config(format!("unknown format '{}'", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.resolver, "8.8.8.8:53".parse().unwrap());
        assert_eq!(config.timeout, None);
        assert_eq!(config.wire_mode, WireMode::Rfc1035);
        assert_eq!(config.format, OutputFormat::Bits);
    }

    #[test]
    fn test_from_content() {
        let content = "\
# resolver settings
resolver: 1.1.1.1

timeout_secs: 5
legacy_wire: true
format: hex
unknown_key: ignored
";
        let config = Config::from_content(content).unwrap();
        assert_eq!(config.resolver, "1.1.1.1:53".parse().unwrap());
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.wire_mode, WireMode::Legacy);
        assert_eq!(config.format, OutputFormat::Hex);
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(Config::from_content("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_resolver() {
        assert_eq!(
            parse_resolver("9.9.9.9:5353").unwrap(),
            "9.9.9.9:5353".parse().unwrap()
        );
        assert_eq!(
            parse_resolver("2001:4860:4860::8888").unwrap(),
            "[2001:4860:4860::8888]:53".parse().unwrap()
        );
        assert!(matches!(
            parse_resolver("dns.google"),
            Err(DnsError::Config(_))
        ));
    }

    #[test]
    fn test_ipv6_resolver_in_file() {
        let config = Config::from_content("resolver: [::1]:5353").unwrap();
        assert_eq!(config.resolver, "[::1]:5353".parse().unwrap());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("0").unwrap(), None);
        assert_eq!(parse_timeout("3").unwrap(), Some(Duration::from_secs(3)));
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_bad_values() {
        assert!(Config::from_content("legacy_wire: maybe").is_err());
        assert!(Config::from_content("format: yaml").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/dns_bits.conf")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("dns_bits_test_{}.conf", std::process::id()));
        fs::write(&path, "format: base64\n").unwrap();

        let config = Config::load(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.format, OutputFormat::Base64);
    }
}
