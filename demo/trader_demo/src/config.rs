//! Demo configuration management.
//!
//! Handles loading of the demo configuration from TOML files with
//! environment variable override support. Every field defaults to the fixed
//! demo values in [`crate::constants`], so an empty file (or no file) yields
//! the stock setup. Node tables merge field by field: `[trade.bank]` with only
//! `host` set keeps the bank's default port and credentials.

use crate::constants::*;
use crate::schedule::{DepthSchedule, ScheduleError};
use ledger_rpc::{Amount, Credentials, HostAndPort, LegalName, RpcTarget};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

fn target(port: u16, username: &str, password: &str) -> RpcTarget {
    RpcTarget::new(
        HostAndPort::new(DEMO_HOST, port),
        Credentials::new(username, password),
    )
}

fn default_party_a() -> RpcTarget {
    target(PARTY_A_RPC_PORT, PARTY_A_RPC_USERNAME, PARTY_A_RPC_PASSWORD)
}

fn default_party_b() -> RpcTarget {
    target(PARTY_B_RPC_PORT, PARTY_B_RPC_USERNAME, PARTY_B_RPC_PASSWORD)
}

fn default_notary() -> RpcTarget {
    target(NOTARY_RPC_PORT, NOTARY_RPC_USERNAME, NOTARY_RPC_PASSWORD)
}

fn default_bank() -> RpcTarget {
    target(BANK_RPC_PORT, DEMO_RPC_USERNAME, DEMO_RPC_PASSWORD)
}

fn default_seller() -> RpcTarget {
    target(SELLER_RPC_PORT, DEMO_RPC_USERNAME, DEMO_RPC_PASSWORD)
}

/// A node table as written in the file; unset fields keep the node's default
#[derive(Debug, Deserialize)]
struct NodeTable {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
}

impl NodeTable {
    fn merge_into(self, mut target: RpcTarget) -> RpcTarget {
        if let Some(host) = self.host {
            target.address.host = host;
        }
        if let Some(port) = self.port {
            target.address.port = port;
        }
        if let Some(username) = self.username {
            target.credentials.username = username;
        }
        if let Some(password) = self.password {
            target.credentials.password = password;
        }
        target
    }
}

fn party_a_node<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RpcTarget, D::Error> {
    Ok(NodeTable::deserialize(deserializer)?.merge_into(default_party_a()))
}

fn party_b_node<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RpcTarget, D::Error> {
    Ok(NodeTable::deserialize(deserializer)?.merge_into(default_party_b()))
}

fn notary_node<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RpcTarget, D::Error> {
    Ok(NodeTable::deserialize(deserializer)?.merge_into(default_notary()))
}

fn bank_node<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RpcTarget, D::Error> {
    Ok(NodeTable::deserialize(deserializer)?.merge_into(default_bank()))
}

fn seller_node<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RpcTarget, D::Error> {
    Ok(NodeTable::deserialize(deserializer)?.merge_into(default_seller()))
}

/// Nodes and parameters of the backchain stress test
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackchainConfig {
    /// Party A: issues cash and pays everyone
    #[serde(deserialize_with = "party_a_node")]
    pub party_a: RpcTarget,
    /// Party B: receives one payment per depth
    #[serde(deserialize_with = "party_b_node")]
    pub party_b: RpcTarget,
    /// Notary; also the counterparty of the round-trip payments
    #[serde(deserialize_with = "notary_node")]
    pub notary: RpcTarget,
    /// Chain depths to build
    pub schedule: DepthSchedule,
    /// Amount issued and moved by every flow
    pub unit_amount: Amount,
}

impl Default for BackchainConfig {
    fn default() -> Self {
        Self {
            party_a: default_party_a(),
            party_b: default_party_b(),
            notary: default_notary(),
            schedule: DepthSchedule::default(),
            unit_amount: UNIT_AMOUNT,
        }
    }
}

/// Nodes and parameters of the role-based trade launcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Node used by the `BANK` role
    #[serde(deserialize_with = "bank_node")]
    pub bank: RpcTarget,
    /// Node used by the `SELLER` role
    #[serde(deserialize_with = "seller_node")]
    pub seller: RpcTarget,
    pub buyer_name: LegalName,
    pub seller_name: LegalName,
    /// Notional passed to the issuer side
    pub issuer_notional: Amount,
    /// Notional passed to the seller side
    pub seller_notional: Amount,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self {
            bank: default_bank(),
            seller: default_seller(),
            buyer_name: LegalName::new(BUYER_NAME),
            seller_name: LegalName::new(SELLER_NAME),
            issuer_notional: ISSUER_NOTIONAL,
            seller_notional: SELLER_NOTIONAL,
        }
    }
}

/// Demo configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Log level
    pub log_level: String,

    /// Directory the backchain timing report is written to, if any
    pub report_dir: Option<PathBuf>,

    pub backchain: BackchainConfig,

    pub trade: TradeConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            report_dir: None,
            backchain: BackchainConfig::default(),
            trade: TradeConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from `path` when given, otherwise start from the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("TRADER_DEMO_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(host) = std::env::var("TRADER_DEMO_HOST") {
            for target in self.targets_mut() {
                target.address.host = host.clone();
            }
        }

        if let Ok(report_dir) = std::env::var("TRADER_DEMO_REPORT_DIR") {
            self.report_dir = Some(PathBuf::from(report_dir));
        }

        self
    }

    fn targets_mut(&mut self) -> [&mut RpcTarget; 5] {
        [
            &mut self.backchain.party_a,
            &mut self.backchain.party_b,
            &mut self.backchain.notary,
            &mut self.trade.bank,
            &mut self.trade.seller,
        ]
    }

    fn targets(&self) -> [(&'static str, &RpcTarget); 5] {
        [
            ("backchain.party_a", &self.backchain.party_a),
            ("backchain.party_b", &self.backchain.party_b),
            ("backchain.notary", &self.backchain.notary),
            ("trade.bank", &self.trade.bank),
            ("trade.seller", &self.trade.seller),
        ]
    }

    /// Replace the backchain schedule
    pub fn with_schedule(mut self, schedule: DepthSchedule) -> Self {
        self.backchain.schedule = schedule;
        self
    }

    /// Validate the configuration, reporting every problem at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        for (name, target) in self.targets() {
            if target.address.host.trim().is_empty() {
                errors.push(format!("{}.host cannot be empty", name));
            }
            if target.address.port == 0 {
                errors.push(format!("{}.port must be between 1 and 65535", name));
            }
            if target.credentials.username.is_empty() {
                errors.push(format!("{}.username cannot be empty", name));
            }
        }

        let amounts = [
            ("backchain.unit_amount", &self.backchain.unit_amount),
            ("trade.issuer_notional", &self.trade.issuer_notional),
            ("trade.seller_notional", &self.trade.seller_notional),
        ];
        for (name, amount) in amounts {
            if amount.is_zero() {
                errors.push(format!("{} must be greater than 0", name));
            }
        }

        if self.trade.buyer_name.as_str().trim().is_empty() {
            errors.push("trade.buyer_name cannot be empty".to_string());
        }
        if self.trade.seller_name.as_str().trim().is_empty() {
            errors.push("trade.seller_name cannot be empty".to_string());
        }

        if let Some(dir) = &self.report_dir {
            if dir.as_os_str().is_empty() {
                errors.push("report_dir cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Schedule bounds rejected
    #[error("Invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_rpc::Currency;

    #[test]
    fn test_default_config_matches_constants() {
        let config = DemoConfig::default();
        assert_eq!(config.backchain.party_a.address.port, 10006);
        assert_eq!(config.backchain.party_b.address.port, 10009);
        assert_eq!(config.backchain.notary.address.port, 10003);
        assert_eq!(config.backchain.party_b.credentials.username, "bigCorpUser");
        assert_eq!(config.trade.bank.address.port, 10012);
        assert_eq!(config.trade.seller.address.port, 10009);
        assert_eq!(config.trade.bank.credentials, Credentials::new("demo", "demo"));
        assert_eq!(config.backchain.unit_amount, Amount::from_minor(100, Currency::USD));
        assert_eq!(config.backchain.schedule.len(), 100);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = DemoConfig::from_toml("").unwrap();
        assert_eq!(config.trade.buyer_name.as_str(), BUYER_NAME);
        assert_eq!(config.backchain.schedule, DepthSchedule::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = DemoConfig::from_toml(
            r#"
            log_level = "debug"

            [backchain]
            schedule = { start = 1, end = 31, step = 10 }
            unit_amount = { quantity = 500, currency = "EUR" }

            [backchain.notary]
            host = "notary.internal"
            port = 20003
            username = "notaryUser"
            password = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.backchain.schedule.len(), 4);
        assert_eq!(config.backchain.unit_amount, Amount::from_minor(500, Currency::EUR));
        assert_eq!(config.backchain.notary.address, HostAndPort::new("notary.internal", 20003));
        // untouched sections keep their defaults
        assert_eq!(config.backchain.party_a.address.port, PARTY_A_RPC_PORT);
        assert_eq!(config.trade.seller.address.port, SELLER_RPC_PORT);
    }

    #[test]
    fn test_partial_node_table_keeps_node_defaults() {
        let config = DemoConfig::from_toml(
            r#"
            [trade.bank]
            host = "bank.internal"

            [backchain.party_b]
            password = "s3cret"
            "#,
        )
        .unwrap();

        assert_eq!(config.trade.bank.address, HostAndPort::new("bank.internal", BANK_RPC_PORT));
        assert_eq!(config.trade.bank.credentials, Credentials::new("demo", "demo"));
        assert_eq!(config.backchain.party_b.address.port, PARTY_B_RPC_PORT);
        assert_eq!(
            config.backchain.party_b.credentials,
            Credentials::new(PARTY_B_RPC_USERNAME, "s3cret")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unit_currency_code_any_case() {
        let config =
            DemoConfig::from_toml("[backchain]\nunit_amount = { quantity = 100, currency = \"chf\" }")
                .unwrap();
        assert_eq!(config.backchain.unit_amount, Amount::from_minor(100, Currency::CHF));

        let result =
            DemoConfig::from_toml("[backchain]\nunit_amount = { quantity = 100, currency = \"XAU\" }");
        match result {
            Err(ConfigError::Parse(message)) => assert!(message.contains("Unknown currency: XAU")),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_schedule_in_toml() {
        let result = DemoConfig::from_toml("[backchain]\nschedule = { start = 0, end = 10, step = 1 }");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = DemoConfig::load(Path::new("/nonexistent/trader_demo.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = DemoConfig::load_or_default(None).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("TRADER_DEMO_HOST", "10.0.0.7");
        let config = DemoConfig::default().with_env_override();
        std::env::remove_var("TRADER_DEMO_HOST");

        assert_eq!(config.backchain.party_a.address.host, "10.0.0.7");
        assert_eq!(config.trade.seller.address.host, "10.0.0.7");
        // ports are untouched
        assert_eq!(config.trade.seller.address.port, SELLER_RPC_PORT);
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = DemoConfig::default();
        config.log_level = "loud".to_string();

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.contains("log_level")))
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = DemoConfig::default();
        config.backchain.notary.address.port = 0;
        config.trade.bank.address.host = "".to_string();
        config.trade.seller_notional = Amount::from_minor(0, Currency::USD);

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 3, "unexpected errors: {:?}", errors);
                assert!(errors.iter().any(|e| e.contains("backchain.notary.port")));
                assert!(errors.iter().any(|e| e.contains("trade.bank.host")));
                assert!(errors.iter().any(|e| e.contains("trade.seller_notional")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        assert_eq!(error.to_string(), "Validation errors: Error 1; Error 2");
    }
}
