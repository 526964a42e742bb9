//! Node addressing: where a node listens and how to log in to it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network location of a node's RPC interface.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostAndPort {
    pub host: String,
    pub port: u16,
}

impl HostAndPort {
    /// Create an address
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for HostAndPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// RPC user credential pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to open a session: address plus credentials.
///
/// Deserialises from a flat table, e.g.
/// `{ host = "localhost", port = 10006, username = "bankUser", password = "test" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcTarget {
    #[serde(flatten)]
    pub address: HostAndPort,
    #[serde(flatten)]
    pub credentials: Credentials,
}

impl RpcTarget {
    /// Create a target
    pub fn new(address: HostAndPort, credentials: Credentials) -> Self {
        Self {
            address,
            credentials,
        }
    }
}

impl fmt::Display for RpcTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.credentials.username, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("bankUser", "test");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("bankUser"));
        assert!(!debug.contains("test\""));
    }

    #[test]
    fn test_target_deserialises_from_flat_table() {
        let json = r#"{"host":"localhost","port":10006,"username":"bankUser","password":"test"}"#;
        let target: RpcTarget = serde_json::from_str(json).unwrap();
        assert_eq!(target.address, HostAndPort::new("localhost", 10006));
        assert_eq!(target.credentials.username, "bankUser");
        assert_eq!(target.to_string(), "bankUser@localhost:10006");
    }
}
