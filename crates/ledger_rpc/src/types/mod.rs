//! Value types shared by sessions and orchestration code.
//!
//! - [`Currency`], [`Amount`]: immutable monetary values in minor units
//! - [`LegalName`], [`Party`]: ledger participants
//! - [`HostAndPort`], [`Credentials`], [`RpcTarget`]: how a node is addressed

pub mod amount;
pub mod currency;
pub mod endpoint;
pub mod party;

pub use amount::Amount;
pub use currency::{Currency, UnknownCurrency};
pub use endpoint::{Credentials, HostAndPort, RpcTarget};
pub use party::{LegalName, Party};
