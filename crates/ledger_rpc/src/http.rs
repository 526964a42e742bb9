//! JSON-over-HTTP implementation of the session contract.
//!
//! # Routes
//!
//! | Method | Path             | Body                | Response                |
//! |--------|------------------|---------------------|-------------------------|
//! | POST   | `/rpc/login`     | `{username, password}` | `{token}`            |
//! | GET    | `/rpc/node-info` |                     | `{legal_identities: [Party]}` |
//! | POST   | `/rpc/flows`     | [`FlowInvocation`]  | [`FlowResponse`]        |
//! | POST   | `/rpc/logout`    |                     | empty                   |
//!
//! Every call after login carries the session token as a bearer token. The
//! flow route responds only once the flow has terminated.

use crate::error::RpcError;
use crate::flow::{FlowInvocation, FlowOutcome};
use crate::session::{RpcSession, SessionConnector};
use crate::types::{HostAndPort, Party, RpcTarget};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct NodeInfoResponse {
    legal_identities: Vec<Party>,
}

/// Terminal state of a flow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Completed,
    Failed,
}

/// Body returned by `POST /rpc/flows`
#[derive(Debug, Deserialize)]
pub struct FlowResponse {
    pub run_id: String,
    pub status: FlowStatus,
    #[serde(default)]
    pub result: serde_json::Value,
    pub error: Option<String>,
}

impl FlowResponse {
    /// Turn the wire response into the flow's result or fault
    pub fn into_outcome(self, flow: &'static str) -> Result<FlowOutcome, RpcError> {
        match self.status {
            FlowStatus::Completed => Ok(FlowOutcome {
                run_id: self.run_id,
                value: self.result,
            }),
            FlowStatus::Failed => Err(RpcError::flow_failed(
                flow,
                self.error.unwrap_or_else(|| "flow failed without a message".to_string()),
            )),
        }
    }
}

fn base_url(address: &HostAndPort) -> String {
    format!("http://{}:{}/rpc", address.host, address.port)
}

/// Remote message from an error response, or the status line if the body is empty
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        _ => status.to_string(),
    }
}

/// Opens [`HttpSession`]s.
#[derive(Debug, Clone, Default)]
pub struct HttpConnector {
    client: reqwest::Client,
}

impl HttpConnector {
    /// Create a connector with a default HTTP client
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a connector reusing an existing HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionConnector for HttpConnector {
    type Session = HttpSession;

    async fn connect(&self, target: &RpcTarget) -> Result<HttpSession, RpcError> {
        let address = &target.address;
        let base_url = base_url(address);
        let request = LoginRequest {
            username: &target.credentials.username,
            password: &target.credentials.password,
        };

        let response = self
            .client
            .post(format!("{}/login", base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::connection(address, e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(RpcError::Authentication {
                    address: address.clone(),
                    username: target.credentials.username.clone(),
                })
            }
            status if !status.is_success() => {
                return Err(RpcError::connection(address, error_message(response).await))
            }
            _ => {}
        }

        let login: LoginResponse = response.json().await?;
        tracing::debug!(%address, user = %target.credentials.username, "Session opened");

        Ok(HttpSession {
            client: self.client.clone(),
            base_url,
            address: address.clone(),
            token: login.token,
        })
    }
}

/// A logged-in session against one node.
#[derive(Debug)]
pub struct HttpSession {
    client: reqwest::Client,
    base_url: String,
    address: HostAndPort,
    token: String,
}

#[async_trait]
impl RpcSession for HttpSession {
    fn address(&self) -> &HostAndPort {
        &self.address
    }

    async fn node_identity(&self) -> Result<Party, RpcError> {
        let response = self
            .client
            .get(format!("{}/node-info", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::protocol(error_message(response).await));
        }

        let info: NodeInfoResponse = response.json().await?;
        let mut identities = info.legal_identities.into_iter();
        match (identities.next(), identities.next()) {
            (Some(party), None) => Ok(party),
            (None, _) => Err(RpcError::protocol(format!(
                "node {} reported no legal identity",
                self.address
            ))),
            (Some(_), Some(_)) => Err(RpcError::protocol(format!(
                "node {} reported more than one legal identity",
                self.address
            ))),
        }
    }

    async fn start_flow(&self, invocation: FlowInvocation) -> Result<FlowOutcome, RpcError> {
        let flow = invocation.name();
        let response = self
            .client
            .post(format!("{}/flows", self.base_url))
            .bearer_auth(&self.token)
            .json(&invocation)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RpcError::flow_failed(flow, error_message(response).await));
        }

        let body: FlowResponse = response.json().await?;
        body.into_outcome(flow)
    }

    async fn close(self) -> Result<(), RpcError> {
        let response = self
            .client
            .post(format!("{}/logout", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(RpcError::protocol(error_message(response).await))
        }
    }
}
