//! Error types for node sessions.

use crate::types::HostAndPort;
use thiserror::Error;

/// Errors raised while connecting to a node or running a flow on it.
///
/// Messages reported by the remote node are carried verbatim.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The node could not be reached
    #[error("Could not connect to {address}: {message}")]
    Connection {
        address: HostAndPort,
        message: String,
    },

    /// The node rejected the credential pair
    #[error("Authentication rejected by {address} for user '{username}'")]
    Authentication {
        address: HostAndPort,
        username: String,
    },

    /// A started flow terminated with a fault
    #[error("Flow {flow} failed: {message}")]
    FlowFailed { flow: &'static str, message: String },

    /// Transport failure after the session was established
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with something the client cannot interpret
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl RpcError {
    /// Create a connection error
    pub fn connection(address: &HostAndPort, message: impl Into<String>) -> Self {
        Self::Connection {
            address: address.clone(),
            message: message.into(),
        }
    }

    /// Create a flow failure
    pub fn flow_failed(flow: &'static str, message: impl Into<String>) -> Self {
        Self::FlowFailed {
            flow,
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Whether the error happened before a session existed
    pub fn is_connection_fault(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Authentication { .. })
    }
}
