//! Session contract between orchestration code and a node.

use crate::error::RpcError;
use crate::flow::{FlowInvocation, FlowOutcome};
use crate::types::{HostAndPort, Party, RpcTarget};
use async_trait::async_trait;

/// An authenticated handle to one node's command interface.
///
/// Calls are request/response: `start_flow` returns only once the flow has
/// reached a terminal state.
#[async_trait]
pub trait RpcSession: Send + Sync {
    /// Address this session is connected to
    fn address(&self) -> &HostAndPort;

    /// Identity of the node behind this session
    async fn node_identity(&self) -> Result<Party, RpcError>;

    /// Start a flow and wait for its terminal result
    async fn start_flow(&self, invocation: FlowInvocation) -> Result<FlowOutcome, RpcError>;

    /// Release the session. Consumes the handle so it is closed at most once.
    async fn close(self) -> Result<(), RpcError>;
}

/// Opens sessions against nodes.
#[async_trait]
pub trait SessionConnector: Send + Sync {
    type Session: RpcSession;

    /// Connect and authenticate
    async fn connect(&self, target: &RpcTarget) -> Result<Self::Session, RpcError>;
}

/// Close a session, logging rather than returning a close failure.
///
/// Used on exit paths where an earlier error is already being propagated.
pub async fn close_quietly<S: RpcSession>(session: S) {
    let address = session.address().clone();
    match session.close().await {
        Ok(()) => tracing::debug!(%address, "Session closed"),
        Err(e) => tracing::warn!(%address, "Failed to close session: {}", e),
    }
}
