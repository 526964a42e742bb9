//! Role-based trade launcher.
//!
//! The buyer bank waits for a trade to start; the seller contacts the buyer
//! and makes something happen. Each role talks to its own node and starts
//! exactly one negotiation flow with a deliberately large notional.

use super::{DemoWorkflow, ProgressCallback, WorkflowResult};
use crate::config::{DemoConfig, TradeConfig};
use crate::error::DemoError;
use async_trait::async_trait;
use clap::ValueEnum;
use ledger_rpc::{close_quietly, FlowInvocation, RpcSession, RpcTarget, SessionConnector};
use std::fmt;
use std::time::Instant;

/// Side of the trade this process plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    /// Issuer side: funds the buyer and sets up the seller's paper
    #[value(name = "BANK")]
    Bank,
    /// Seller side: offers the paper to the buyer
    #[value(name = "SELLER")]
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bank => "BANK",
            Self::Seller => "SELLER",
        }
    }

    /// Node this role connects to
    pub fn target<'a>(&self, config: &'a TradeConfig) -> &'a RpcTarget {
        match self {
            Self::Bank => &config.bank,
            Self::Seller => &config.seller,
        }
    }

    /// The one flow this role starts
    pub fn invocation(&self, config: &TradeConfig) -> FlowInvocation {
        match self {
            Self::Bank => FlowInvocation::IssuerNegotiation {
                amount: config.issuer_notional,
                buyer: config.buyer_name.clone(),
                seller: config.seller_name.clone(),
            },
            Self::Seller => FlowInvocation::SellerNegotiation {
                amount: config.seller_notional,
                buyer: config.buyer_name.clone(),
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade launcher workflow for one role
pub struct TradeWorkflow<C> {
    connector: C,
    role: Role,
}

impl<C: SessionConnector> TradeWorkflow<C> {
    pub fn new(connector: C, role: Role) -> Self {
        Self { connector, role }
    }
}

#[async_trait]
impl<C: SessionConnector> DemoWorkflow for TradeWorkflow<C> {
    fn name(&self) -> &str {
        match self.role {
            Role::Bank => "Trade (issuer)",
            Role::Seller => "Trade (seller)",
        }
    }

    async fn run(
        &self,
        config: &DemoConfig,
        _progress: Option<ProgressCallback>,
    ) -> Result<WorkflowResult, DemoError> {
        let start = Instant::now();
        let target = self.role.target(&config.trade);
        let invocation = self.role.invocation(&config.trade);
        let flow = invocation.name();

        tracing::info!(role = %self.role, node = %target, "Starting {} with {}", flow, invocation.amount());

        let session = self.connector.connect(target).await?;
        let outcome = session.start_flow(invocation).await;
        close_quietly(session).await;
        let outcome = outcome?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(run_id = %outcome.run_id, "{} completed in {}ms", flow, duration_ms);

        Ok(WorkflowResult::new(duration_ms, 1))
    }
}
