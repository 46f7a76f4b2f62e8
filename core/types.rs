// Core types shared across all modelfetch components
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while building an [`Endpoint`] from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid IPv4 address: {0}")]
    InvalidHost(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("expected host:port, got: {0}")]
    MissingPort(String),
}

/// The fixed (host, port) address of the peer serving the artifact.
///
/// Built once at startup and never mutated. The port must be non-zero;
/// host validity is carried by the `Ipv4Addr` type itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: Ipv4Addr,
    port: u16,
}

impl Endpoint {
    pub fn new(host: Ipv4Addr, port: u16) -> Result<Self, EndpointError> {
        if port == 0 {
            return Err(EndpointError::InvalidPort("0".to_string()));
        }
        Ok(Endpoint { host, port })
    }

    pub fn host(&self) -> Ipv4Addr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::MissingPort(s.to_string()))?;

        let host: Ipv4Addr = host
            .parse()
            .map_err(|_| EndpointError::InvalidHost(host.to_string()))?;
        let port: u16 = port
            .parse()
            .map_err(|_| EndpointError::InvalidPort(port.to_string()))?;

        Endpoint::new(host, port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_and_port() {
        let ep: Endpoint = "127.0.0.1:12345".parse().unwrap();
        assert_eq!(ep.host(), Ipv4Addr::LOCALHOST);
        assert_eq!(ep.port(), 12345);
        assert_eq!(ep.to_string(), "127.0.0.1:12345");
    }

    #[test]
    fn rejects_port_zero() {
        assert_eq!(
            "127.0.0.1:0".parse::<Endpoint>(),
            Err(EndpointError::InvalidPort("0".to_string()))
        );
    }

    #[test]
    fn rejects_hostname_and_ipv6() {
        assert!("localhost:80".parse::<Endpoint>().is_err());
        assert!("::1:80".parse::<Endpoint>().is_err());
    }

    #[test]
    fn rejects_missing_port() {
        assert_eq!(
            "10.0.0.1".parse::<Endpoint>(),
            Err(EndpointError::MissingPort("10.0.0.1".to_string()))
        );
    }
}
