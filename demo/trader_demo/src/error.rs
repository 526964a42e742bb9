//! Error types for the trader demo.

use ledger_rpc::RpcError;
use thiserror::Error;

/// Demo error type
#[derive(Debug, Error)]
pub enum DemoError {
    /// Session or flow fault outside the backchain loop
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A flow inside the backchain loop failed; the whole run stops
    #[error("Backchain run aborted at depth {depth} during {step}: {source}")]
    BackchainAborted {
        depth: u32,
        step: &'static str,
        #[source]
        source: RpcError,
    },

    /// Timing report could not be produced
    #[error("Report error: {0}")]
    Report(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// Create a report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Depth at which a backchain run stopped, if this is such a failure
    pub fn aborted_depth(&self) -> Option<u32> {
        match self {
            Self::BackchainAborted { depth, .. } => Some(*depth),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_is_not_reworded() {
        let err: DemoError = RpcError::flow_failed("SellerNegotiationFlow", "counterparty declined").into();
        assert_eq!(
            err.to_string(),
            "Flow SellerNegotiationFlow failed: counterparty declined"
        );
    }

    #[test]
    fn test_backchain_aborted_display() {
        let err = DemoError::BackchainAborted {
            depth: 21,
            step: "payment party A -> notary",
            source: RpcError::flow_failed("CashPaymentFlow", "notary timeout"),
        };
        assert_eq!(err.aborted_depth(), Some(21));
        assert!(err.to_string().contains("depth 21"));
        assert!(err.to_string().contains("notary timeout"));
    }
}
