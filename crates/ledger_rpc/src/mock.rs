//! In-memory node network for tests.
//!
//! [`MockNetwork`] holds a set of nodes keyed by address. Sessions opened
//! through its [`MockConnector`] record every flow start in one shared,
//! ordered log, so tests can assert on call order across nodes. Faults can
//! be injected at connect time or at the n-th flow start.

use crate::error::RpcError;
use crate::flow::{FlowInvocation, FlowOutcome};
use crate::session::{RpcSession, SessionConnector};
use crate::types::{Credentials, HostAndPort, Party, RpcTarget};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// One flow start as seen by the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Identity of the node the flow was started on
    pub caller: Party,
    pub invocation: FlowInvocation,
}

impl RecordedCall {
    /// Recipient of a cash payment, if this call is one
    pub fn payment_recipient(&self) -> Option<&Party> {
        match &self.invocation {
            FlowInvocation::CashPayment { recipient, .. } => Some(recipient),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct MockNode {
    party: Party,
    credentials: Option<Credentials>,
}

#[derive(Debug, Default)]
struct MockState {
    nodes: HashMap<HostAndPort, MockNode>,
    refused: HashSet<HostAndPort>,
    calls: Vec<RecordedCall>,
    fail_at: Option<(usize, String)>,
    connects: HashMap<HostAndPort, usize>,
    closes: HashMap<HostAndPort, usize>,
}

/// Shared in-memory network of nodes.
#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    state: Arc<Mutex<MockState>>,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a node accepting any credentials
    pub fn with_node(self, address: HostAndPort, party: Party) -> Self {
        self.state().nodes.insert(
            address,
            MockNode {
                party,
                credentials: None,
            },
        );
        self
    }

    /// Add a node accepting only `credentials`
    pub fn with_secured_node(
        self,
        address: HostAndPort,
        party: Party,
        credentials: Credentials,
    ) -> Self {
        self.state().nodes.insert(
            address,
            MockNode {
                party,
                credentials: Some(credentials),
            },
        );
        self
    }

    /// Make connects to `address` fail as if nothing were listening
    pub fn refuse_connections(&self, address: HostAndPort) {
        self.state().refused.insert(address);
    }

    /// Make the `n`-th flow start (1-based, across all nodes) fail with `message`
    pub fn fail_flow_at(&self, n: usize, message: impl Into<String>) {
        self.state().fail_at = Some((n, message.into()));
    }

    /// Connector opening sessions on this network
    pub fn connector(&self) -> MockConnector {
        MockConnector {
            network: self.clone(),
        }
    }

    /// All flow starts so far, including a failed one, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn flow_count(&self) -> usize {
        self.state().calls.len()
    }

    pub fn connect_count(&self, address: &HostAndPort) -> usize {
        self.state().connects.get(address).copied().unwrap_or(0)
    }

    pub fn close_count(&self, address: &HostAndPort) -> usize {
        self.state().closes.get(address).copied().unwrap_or(0)
    }

    /// Sessions opened and not yet closed, across all nodes
    pub fn open_sessions(&self) -> usize {
        let state = self.state();
        let opened: usize = state.connects.values().sum();
        let closed: usize = state.closes.values().sum();
        opened - closed
    }
}

/// [`SessionConnector`] for a [`MockNetwork`].
#[derive(Debug, Clone)]
pub struct MockConnector {
    network: MockNetwork,
}

#[async_trait]
impl SessionConnector for MockConnector {
    type Session = MockSession;

    async fn connect(&self, target: &RpcTarget) -> Result<MockSession, RpcError> {
        let mut state = self.network.state();
        let address = &target.address;

        if state.refused.contains(address) {
            return Err(RpcError::connection(address, "connection refused"));
        }

        let node = state
            .nodes
            .get(address)
            .ok_or_else(|| RpcError::connection(address, "no node listening"))?;

        if let Some(expected) = &node.credentials {
            if expected != &target.credentials {
                return Err(RpcError::Authentication {
                    address: address.clone(),
                    username: target.credentials.username.clone(),
                });
            }
        }

        let party = node.party.clone();
        *state.connects.entry(address.clone()).or_insert(0) += 1;

        Ok(MockSession {
            network: self.network.clone(),
            address: address.clone(),
            party,
        })
    }
}

/// Session on a [`MockNetwork`] node.
#[derive(Debug)]
pub struct MockSession {
    network: MockNetwork,
    address: HostAndPort,
    party: Party,
}

#[async_trait]
impl RpcSession for MockSession {
    fn address(&self) -> &HostAndPort {
        &self.address
    }

    async fn node_identity(&self) -> Result<Party, RpcError> {
        Ok(self.party.clone())
    }

    async fn start_flow(&self, invocation: FlowInvocation) -> Result<FlowOutcome, RpcError> {
        let mut state = self.network.state();
        let flow = invocation.name();
        state.calls.push(RecordedCall {
            caller: self.party.clone(),
            invocation,
        });
        let n = state.calls.len();

        if let Some((fail_at, message)) = &state.fail_at {
            if *fail_at == n {
                return Err(RpcError::flow_failed(flow, message.clone()));
            }
        }

        Ok(FlowOutcome {
            run_id: format!("run-{}", n),
            value: serde_json::Value::Null,
        })
    }

    async fn close(self) -> Result<(), RpcError> {
        *self.network.state().closes.entry(self.address).or_insert(0) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Amount, Currency};

    fn address() -> HostAndPort {
        HostAndPort::new("localhost", 10006)
    }

    fn party() -> Party {
        Party::new("O=Bank of Corda,L=London,C=GB", "boc-key")
    }

    fn target(username: &str) -> RpcTarget {
        RpcTarget::new(address(), Credentials::new(username, "test"))
    }

    #[tokio::test]
    async fn test_session_records_calls_and_close() {
        let network = MockNetwork::new().with_node(address(), party());
        let session = network.connector().connect(&target("bankUser")).await.unwrap();

        assert_eq!(session.node_identity().await.unwrap(), party());
        let outcome = session
            .start_flow(FlowInvocation::cash_payment(
                Amount::from_minor(100, Currency::USD),
                &party(),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.run_id, "run-1");
        assert_eq!(network.open_sessions(), 1);

        session.close().await.unwrap();
        assert_eq!(network.flow_count(), 1);
        assert_eq!(network.close_count(&address()), 1);
        assert_eq!(network.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_injected_flow_failure() {
        let network = MockNetwork::new().with_node(address(), party());
        network.fail_flow_at(2, "Notary unavailable");
        let session = network.connector().connect(&target("bankUser")).await.unwrap();
        let payment =
            FlowInvocation::cash_payment(Amount::from_minor(100, Currency::USD), &party());

        assert!(session.start_flow(payment.clone()).await.is_ok());
        let err = session.start_flow(payment).await.unwrap_err();
        assert_eq!(err.to_string(), "Flow CashPaymentFlow failed: Notary unavailable");
    }

    #[tokio::test]
    async fn test_connect_faults() {
        let network = MockNetwork::new().with_secured_node(
            address(),
            party(),
            Credentials::new("bankUser", "test"),
        );

        let err = network.connector().connect(&target("intruder")).await.unwrap_err();
        assert!(matches!(err, RpcError::Authentication { .. }));

        network.refuse_connections(address());
        let err = network.connector().connect(&target("bankUser")).await.unwrap_err();
        assert!(matches!(err, RpcError::Connection { .. }));

        let unknown = RpcTarget::new(
            HostAndPort::new("localhost", 1),
            Credentials::new("bankUser", "test"),
        );
        assert!(network.connector().connect(&unknown).await.is_err());
        assert_eq!(network.connect_count(&address()), 0);
    }
}
