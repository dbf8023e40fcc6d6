//! config-rs/lib.rs
//! Environment-driven configuration for the classifier services.
//! Every lookup falls back to a default; bad values are logged, never fatal.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

/// Default port for the classifier gateway
pub const DEFAULT_CLASSIFIER_PORT: u16 = 5000;

/// Default maximum request payload size (10MB)
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Load a `.env` file from the working directory if one exists
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        log::debug!("Loaded environment overrides from .env");
    }
}

/// Get service port from `<NAME>_SERVICE_PORT` with fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "CLASSIFIER")
/// * `default_port` - The port to use if the variable is unset or invalid
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    match env::var(&var_name) {
        Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        }),
        Err(_) => default_port,
    }
}

/// Create a SocketAddr for binding a service
///
/// `<NAME>_SERVICE_ADDR` may hold `host:port` or `http://host:port`;
/// otherwise binds all interfaces on the port from [`get_service_port`].
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        let stripped = addr_str
            .trim()
            .trim_start_matches("http://")
            .trim_start_matches("https://")
            .trim_end_matches('/');

        match stripped.parse::<SocketAddr>() {
            Ok(addr) => return addr,
            Err(_) => log::warn!("Invalid address format in {}, using default", var_name),
        }
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

/// Get the request payload limit from `<NAME>_MAX_PAYLOAD_BYTES`
pub fn get_max_payload_bytes(service_name: &str, default_limit: usize) -> usize {
    let var_name = format!("{}_MAX_PAYLOAD_BYTES", service_name.to_uppercase());
    match env::var(&var_name) {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(limit) if limit > 0 => limit,
            _ => {
                log::warn!("Invalid payload limit in {}, using default {}", var_name, default_limit);
                default_limit
            }
        },
        Err(_) => default_limit,
    }
}

/// Resolved configuration for one service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub service_name: String,
    pub bind_address: SocketAddr,
    pub max_payload_bytes: usize,
}

impl ServiceConfig {
    /// Resolve configuration for `service_name` from the environment
    pub fn from_env(service_name: &str, default_port: u16) -> Self {
        Self {
            service_name: service_name.to_lowercase().replace('_', "-"),
            bind_address: get_bind_address(service_name, default_port),
            max_payload_bytes: get_max_payload_bytes(service_name, DEFAULT_MAX_PAYLOAD_BYTES),
        }
    }

    /// Configuration for the classifier gateway
    pub fn classifier() -> Self {
        Self::from_env("CLASSIFIER", DEFAULT_CLASSIFIER_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_service_port() {
        std::env::set_var("PORTTEST_SERVICE_PORT", "9000");
        assert_eq!(get_service_port("porttest", 8000), 9000);

        std::env::set_var("BADPORT_SERVICE_PORT", "not-a-port");
        assert_eq!(get_service_port("BADPORT", 8000), 8000);

        std::env::remove_var("UNKNOWN_SERVICE_PORT");
        assert_eq!(get_service_port("UNKNOWN", 8000), 8000);
    }

    #[test]
    fn test_get_bind_address() {
        std::env::set_var("ADDRTEST_SERVICE_ADDR", "127.0.0.1:7000");
        assert_eq!(
            get_bind_address("ADDRTEST", 8000),
            "127.0.0.1:7000".parse::<SocketAddr>().unwrap()
        );

        std::env::set_var("URLTEST_SERVICE_ADDR", "http://127.0.0.1:7001");
        assert_eq!(
            get_bind_address("URLTEST", 8000),
            "127.0.0.1:7001".parse::<SocketAddr>().unwrap()
        );

        std::env::set_var("JUNKADDR_SERVICE_ADDR", "somewhere");
        std::env::set_var("JUNKADDR_SERVICE_PORT", "7002");
        assert_eq!(
            get_bind_address("JUNKADDR", 8000),
            "0.0.0.0:7002".parse::<SocketAddr>().unwrap()
        );

        assert_eq!(
            get_bind_address("NOADDR", 8000),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_get_max_payload_bytes() {
        std::env::set_var("LIMITTEST_MAX_PAYLOAD_BYTES", "2048");
        assert_eq!(get_max_payload_bytes("LIMITTEST", 10), 2048);

        std::env::set_var("ZEROLIMIT_MAX_PAYLOAD_BYTES", "0");
        assert_eq!(get_max_payload_bytes("ZEROLIMIT", 10), 10);

        assert_eq!(get_max_payload_bytes("NOLIMIT", 10), 10);
    }

    #[test]
    fn test_service_config_from_env() {
        std::env::set_var("CFG_TEST_SERVICE_PORT", "6001");
        let config = ServiceConfig::from_env("CFG_TEST", 5000);
        assert_eq!(config.service_name, "cfg-test");
        assert_eq!(config.bind_address.port(), 6001);
        assert_eq!(config.max_payload_bytes, DEFAULT_MAX_PAYLOAD_BYTES);
    }
}
