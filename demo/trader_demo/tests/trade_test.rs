//! Trade Launcher Integration Tests
//!
//! Parses command lines the way the binary does and runs the selected
//! command against an in-memory node network.

use clap::Parser;
use ledger_rpc::mock::MockNetwork;
use ledger_rpc::{Credentials, FlowInvocation, HostAndPort, LegalName, Party};
use trader_demo::cli::parse_failure_status;
use trader_demo::constants::{
    BANK_RPC_PORT, BUYER_NAME, ISSUER_NOTIONAL, SELLER_NAME, SELLER_NOTIONAL, SELLER_RPC_PORT,
};
use trader_demo::prelude::*;

fn bank_address() -> HostAndPort {
    HostAndPort::new("localhost", BANK_RPC_PORT)
}

fn seller_address() -> HostAndPort {
    HostAndPort::new("localhost", SELLER_RPC_PORT)
}

/// Both trade nodes, accepting only the demo credentials
fn network() -> MockNetwork {
    MockNetwork::new()
        .with_secured_node(
            bank_address(),
            Party::new(BUYER_NAME, "bank-key"),
            Credentials::new("demo", "demo"),
        )
        .with_secured_node(
            seller_address(),
            Party::new(SELLER_NAME, "seller-key"),
            Credentials::new("demo", "demo"),
        )
}

async fn run_args(network: &MockNetwork, args: &[&str]) -> Result<WorkflowResult, DemoError> {
    let cli = Cli::try_parse_from(args).unwrap();
    let config = cli.load_config().unwrap();
    cli.command.execute(network.connector(), &config, None).await
}

/// Test BANK starts the issuer negotiation on the bank node
#[tokio::test]
async fn test_bank_role_starts_issuer_negotiation() {
    let network = network();

    let result = run_args(&network, &["trader-demo", "trade", "--role", "BANK"])
        .await
        .unwrap();
    assert_eq!(result.flows_started, 1);

    let calls = network.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].caller.name.as_str(), BUYER_NAME);
    assert_eq!(
        calls[0].invocation,
        FlowInvocation::IssuerNegotiation {
            amount: ISSUER_NOTIONAL,
            buyer: LegalName::new(BUYER_NAME),
            seller: LegalName::new(SELLER_NAME),
        }
    );

    assert_eq!(network.connect_count(&bank_address()), 1);
    assert_eq!(network.close_count(&bank_address()), 1);
    assert_eq!(network.connect_count(&seller_address()), 0);
}

/// Test SELLER starts the seller negotiation with only the buyer name
#[tokio::test]
async fn test_seller_role_starts_seller_negotiation() {
    let network = network();

    run_args(&network, &["trader-demo", "trade", "--role", "SELLER"])
        .await
        .unwrap();

    let calls = network.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].caller.name.as_str(), SELLER_NAME);
    assert_eq!(
        calls[0].invocation,
        FlowInvocation::SellerNegotiation {
            amount: SELLER_NOTIONAL,
            buyer: LegalName::new(BUYER_NAME),
        }
    );

    assert_eq!(network.connect_count(&seller_address()), 1);
    assert_eq!(network.close_count(&seller_address()), 1);
    assert_eq!(network.connect_count(&bank_address()), 0);
}

/// Test a failed negotiation surfaces the remote message and still closes once
#[tokio::test]
async fn test_failed_flow_closes_session_once() {
    let network = network();
    network.fail_flow_at(1, "Buyer rejected the offered price");

    let err = run_args(&network, &["trader-demo", "trade", "--role", "SELLER"])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Flow SellerNegotiationFlow failed: Buyer rejected the offered price"
    );
    assert_eq!(network.close_count(&seller_address()), 1);
    assert_eq!(network.open_sessions(), 0);
}

/// Test a refused connection starts no flow and leaves nothing open
#[tokio::test]
async fn test_connection_fault() {
    let network = network();
    network.refuse_connections(bank_address());

    let err = run_args(&network, &["trader-demo", "trade", "--role", "BANK"])
        .await
        .unwrap_err();

    assert!(matches!(err, DemoError::Rpc(ref e) if e.is_connection_fault()));
    assert_eq!(network.flow_count(), 0);
    assert_eq!(network.open_sessions(), 0);
}

/// Test wrong credentials are rejected before any flow starts
#[tokio::test]
async fn test_credentials_come_from_config() {
    let network = network();
    let cli = Cli::try_parse_from(["trader-demo", "trade", "--role", "BANK"]).unwrap();
    let mut config = cli.load_config().unwrap();
    config.trade.bank.credentials = Credentials::new("demo", "wrong");

    let err = cli
        .command
        .execute(network.connector(), &config, None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Authentication rejected"));
    assert_eq!(network.flow_count(), 0);
}

/// Test any other role value is a usage failure with status 1
#[test]
fn test_unknown_role_exit_status() {
    for role in ["BUYER", "seller", "", "ISSUER"] {
        let err = Cli::try_parse_from(["trader-demo", "trade", "--role", role]).unwrap_err();
        assert_eq!(parse_failure_status(&err), 1, "role {:?}", role);
    }

    let err = Cli::try_parse_from(["trader-demo", "trade"]).unwrap_err();
    assert_eq!(parse_failure_status(&err), 1);
}

/// Test the two modes are both reachable from the same binary
#[tokio::test]
async fn test_backchain_mode_selectable() {
    let party = |name: &str| Party::new(name, format!("{}-key", name));
    let network = MockNetwork::new()
        .with_node(HostAndPort::new("localhost", 10006), party("O=Bank of Corda,L=London,C=GB"))
        .with_node(HostAndPort::new("localhost", 10009), party("O=BigCorporation,L=New York,C=US"))
        .with_node(HostAndPort::new("localhost", 10003), party("O=Notary Service,L=Zurich,C=CH"));

    let result = run_args(&network, &["trader-demo", "backchain", "--end", "1"])
        .await
        .unwrap();

    assert_eq!(result.flows_started, 4);
    assert_eq!(result.timings.len(), 2);
    assert!(result.timings.iter().all(|t| t.depth == 1));
}
