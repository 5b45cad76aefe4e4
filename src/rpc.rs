use alloy::rpc::client::{ClientBuilder, RpcClient};
use serde_json::Value;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::types::RpcValue;

/// Default JSON-RPC endpoint of a local ELA node.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:20336";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("{method} returned {found}, expected {expected}")]
    UnexpectedResult {
        method: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// A node that answers positional JSON-RPC calls.
#[allow(async_fn_in_trait)]
pub trait NodeRpc {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<RpcValue, RpcError>;
}

impl<T: NodeRpc + ?Sized> NodeRpc for &T {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<RpcValue, RpcError> {
        (**self).call(method, params).await
    }
}

pub struct NodeRpcClient {
    url: Url,
    client: RpcClient,
}

impl NodeRpcClient {
    pub fn new(url: Url) -> Self {
        let client = ClientBuilder::default().http(url.clone());
        Self { url, client }
    }
}

impl NodeRpc for NodeRpcClient {
    async fn call(&self, method: &'static str, params: Vec<Value>) -> Result<RpcValue, RpcError> {
        debug!("Calling {} on {} with params {:?}", method, self.url, params);
        let result: Value = self
            .client
            .request(Cow::Borrowed(method), params)
            .await
            .map_err(|e| match e.as_error_resp() {
                Some(payload) => RpcError::Node {
                    code: payload.code,
                    message: payload.message.to_string(),
                },
                None => RpcError::Transport(e.to_string()),
            })?;
        debug!("{} returned {}", method, result);
        Ok(result.into())
    }
}
