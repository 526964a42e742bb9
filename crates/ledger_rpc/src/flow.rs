//! Remote flows the demo starts on a node, and their outcomes.

use crate::types::{Amount, LegalName, Party};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque reference attached to an issuance so the issuer can tell issues apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueRef(Vec<u8>);

impl IssueRef {
    /// Wrap raw reference bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// A reference that has not been used before
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A flow start request: which flow, with which arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum FlowInvocation {
    /// Self-issue cash, notarised by `notary`
    CashIssue {
        amount: Amount,
        issue_ref: IssueRef,
        notary: Party,
    },
    /// Pay cash held by the calling node to `recipient`
    CashPayment {
        amount: Amount,
        recipient: Party,
        anonymous: bool,
    },
    /// Issuer side of the trade negotiation: fund the buyer and have the
    /// seller offer a commercial paper
    IssuerNegotiation {
        amount: Amount,
        buyer: LegalName,
        seller: LegalName,
    },
    /// Seller side of the trade negotiation: sell to `buyer`
    SellerNegotiation { amount: Amount, buyer: LegalName },
}

impl FlowInvocation {
    /// Flow class name as registered on the node
    pub fn name(&self) -> &'static str {
        match self {
            Self::CashIssue { .. } => "CashIssueFlow",
            Self::CashPayment { .. } => "CashPaymentFlow",
            Self::IssuerNegotiation { .. } => "IssuerNegotiationFlow",
            Self::SellerNegotiation { .. } => "SellerNegotiationFlow",
        }
    }

    pub fn cash_issue(amount: Amount, issue_ref: IssueRef, notary: &Party) -> Self {
        Self::CashIssue {
            amount,
            issue_ref,
            notary: notary.clone(),
        }
    }

    /// Non-anonymous payment to `recipient`
    pub fn cash_payment(amount: Amount, recipient: &Party) -> Self {
        Self::CashPayment {
            amount,
            recipient: recipient.clone(),
            anonymous: false,
        }
    }

    /// Amount carried by the invocation
    pub fn amount(&self) -> Amount {
        match self {
            Self::CashIssue { amount, .. }
            | Self::CashPayment { amount, .. }
            | Self::IssuerNegotiation { amount, .. }
            | Self::SellerNegotiation { amount, .. } => *amount,
        }
    }
}

/// Terminal value of a flow that completed successfully.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowOutcome {
    /// Identifier the node assigned to the flow run
    pub run_id: String,
    /// Flow return value, opaque to the caller
    #[serde(default)]
    pub value: serde_json::Value,
}
