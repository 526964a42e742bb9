//! # ledger_rpc: Node Access for the Trader Demo
//!
//! ## Role
//!
//! ledger_rpc is the bottom layer of the trader demo. It owns everything the
//! orchestration layer needs to talk to a running ledger node:
//!
//! - **Value types** ([`types`]): parties, legal names, currencies, amounts,
//!   and the host/port/credential triple that addresses a node
//! - **Flow invocations** ([`flow`]): the remote workflows the demo starts,
//!   and their terminal outcomes
//! - **Session contract** ([`session`]): `connect`, `node_identity`,
//!   `start_flow`, `close`
//! - **HTTP transport** ([`http`]): a JSON-over-HTTP implementation of the
//!   session contract
//! - **Mock network** (`mock`, feature `mock`): an in-memory node network
//!   that records every call, used to test orchestration without live nodes
//!
//! ## Session lifecycle
//!
//! A session is acquired with [`SessionConnector::connect`] and released with
//! [`RpcSession::close`], which consumes the session so it cannot be closed
//! twice. Every flow start awaits the flow's terminal state before returning.

pub mod error;
pub mod flow;
pub mod http;
pub mod session;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::RpcError;
pub use flow::{FlowInvocation, FlowOutcome, IssueRef};
pub use session::{close_quietly, RpcSession, SessionConnector};
pub use types::{Amount, Credentials, Currency, HostAndPort, LegalName, Party, RpcTarget};
