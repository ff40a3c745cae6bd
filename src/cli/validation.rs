//! Validation helpers for CLI arguments.
//!
//! clap handles type conversion; these functions add the range and
//! filesystem checks that a plain type annotation cannot express.

use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Validate that a port number is within 1-65535.
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str
        .parse()
        .map_err(|_| format!("Port must be a number between 1 and 65535, got: '{}'", port_str))?;

    if port == 0 {
        return Err("Port 0 is not allowed; use a port between 1 and 65535".to_string());
    }

    Ok(port)
}

/// Validate that a configuration file path exists and is readable.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate rollback steps. Capped at 100 per invocation.
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{}'", steps_str))?;

    if steps == 0 {
        return Err("Rollback steps must be greater than 0".to_string());
    }

    if steps > 100 {
        return Err("Rollback steps cannot exceed 100".to_string());
    }

    Ok(steps)
}

/// Validate a host address. Accepts IP literals and hostnames.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }

    // Anything that looks like a dotted-quad must actually parse as one,
    // so typos like 999.999.999.999 are caught here instead of at bind time.
    if host.contains('.') && host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host
            .parse::<Ipv4Addr>()
            .map(|_| host.to_string())
            .map_err(|_| format!("Invalid IPv4 address: '{}'", host_str));
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}
