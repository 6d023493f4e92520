//! rpcscope Client Implementation

use crate::error::{Result, SdkError};
use crate::types::PingResponse;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// rpcscope Client
///
/// Sends each payload as the single positional parameter of the call.
pub struct RpcScopeClient {
    client: HttpClient,
}

impl RpcScopeClient {
    /// Connect to an rpcscope server
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9528`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        Self::connect_with_timeout(url, DEFAULT_REQUEST_TIMEOUT).await
    }

    pub async fn connect_with_timeout(url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Call `method` (`<system>/<method>.v<version>`) with `payload`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use rpcscope_sdk::RpcScopeClient;
    /// # use serde_json::json;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = RpcScopeClient::connect("http://127.0.0.1:9528").await?;
    /// let sum: i64 = client.call("math/add.v1", json!({"a": 1, "b": 2})).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call<P, R>(&self, method: &str, payload: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let params = rpc_params![payload];
        let response: R = self.client.request(method, params).await?;

        Ok(response)
    }

    /// rpc/ping.v1
    pub async fn ping(&self) -> Result<PingResponse> {
        self.call("rpc/ping.v1", serde_json::Value::Null).await
    }

    /// rpc/methods.v1 - names of all registered methods
    pub async fn methods(&self) -> Result<Vec<String>> {
        self.call("rpc/methods.v1", serde_json::Value::Null).await
    }
}
