//! Fixed demo values.
//!
//! These are the defaults behind [`DemoConfig`](crate::config::DemoConfig);
//! orchestration code reads them only through the configuration.

use ledger_rpc::{Amount, Currency};

/// Host every demo node listens on
pub const DEMO_HOST: &str = "localhost";

/// Legal name of the buying bank in the trade negotiation
pub const BUYER_NAME: &str = "O=Bank A,L=London,C=GB";
/// Legal name of the selling bank in the trade negotiation
pub const SELLER_NAME: &str = "O=Bank B,L=New York,C=US";

/// RPC port of the node the `BANK` role talks to
pub const BANK_RPC_PORT: u16 = 10012;
/// RPC port of the node the `SELLER` role talks to
pub const SELLER_RPC_PORT: u16 = 10009;
pub const DEMO_RPC_USERNAME: &str = "demo";
pub const DEMO_RPC_PASSWORD: &str = "demo";

// Backchain stress test endpoints
pub const PARTY_A_RPC_PORT: u16 = 10006;
pub const PARTY_A_RPC_USERNAME: &str = "bankUser";
pub const PARTY_A_RPC_PASSWORD: &str = "test";
pub const PARTY_B_RPC_PORT: u16 = 10009;
pub const PARTY_B_RPC_USERNAME: &str = "bigCorpUser";
pub const PARTY_B_RPC_PASSWORD: &str = "test";
pub const NOTARY_RPC_PORT: u16 = 10003;
pub const NOTARY_RPC_USERNAME: &str = "bankUser";
pub const NOTARY_RPC_PASSWORD: &str = "test";

/// Amount issued and moved by every backchain flow: 1.00 USD
pub const UNIT_AMOUNT: Amount = Amount::from_minor(100, Currency::USD);
/// Notional the issuer side negotiates: 1,100,000,000,000.00 USD
pub const ISSUER_NOTIONAL: Amount = Amount::from_minor(110_000_000_000_000, Currency::USD);
/// Notional the seller side offers: 1,000,000,000,000.00 USD
pub const SELLER_NOTIONAL: Amount = Amount::from_minor(100_000_000_000_000, Currency::USD);

/// First chain depth of the stress schedule
pub const SCHEDULE_START: u32 = 1;
/// Last depth the stress schedule may reach (inclusive)
pub const SCHEDULE_END: u32 = 1000;
pub const SCHEDULE_STEP: u32 = 10;
