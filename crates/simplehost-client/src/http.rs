//! HTTP implementation of the provisioning client.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::traits::ProvisioningClient;
use crate::wire::{CreateInstanceRequest, RemoteInstance};

/// Provisioning client backed by the remote HTTP API.
///
/// Stateless apart from its connection pool; a single client can serve any
/// number of concurrent reconciliation operations.
pub struct HttpProvisioningClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpProvisioningClient {
    /// Builds a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    fn instances_url(&self) -> String {
        format!("{}/simplehosting/instances", self.base_url)
    }

    fn instance_url(&self, id: &str) -> String {
        format!("{}/simplehosting/instances/{id}", self.base_url)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("Apikey {}", self.api_key))
            .header("Accept", "application/json")
    }
}

#[derive(Debug, Deserialize)]
struct CreateInstanceResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Maps a non-success response to an `Api` error, preferring the remote
/// message when the body carries one.
async fn api_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiMessage>(&body)
        .map(|m| m.message)
        .unwrap_or(body);
    ClientError::api(status, message)
}

#[async_trait]
impl ProvisioningClient for HttpProvisioningClient {
    async fn create_instance(
        &self,
        request: &CreateInstanceRequest,
    ) -> Result<String, ClientError> {
        let url = self.instances_url();
        debug!(name = %request.name, "submitting instance creation");
        let resp = self
            .request(Method::POST, &url)
            .json(request)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let body = resp.text().await?;
        let created: CreateInstanceResponse = serde_json::from_str(&body)?;
        Ok(created.id)
    }

    async fn get_instance(&self, id: &str) -> Result<RemoteInstance, ClientError> {
        let url = self.instance_url(id);
        let resp = self.request(Method::GET, &url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(id));
        }
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn delete_instance(&self, id: &str) -> Result<(), ClientError> {
        let url = self.instance_url(id);
        debug!(id = %id, "submitting instance deletion");
        let resp = self.request(Method::DELETE, &url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(id));
        }
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_at_the_base() {
        let config = ClientConfig::new("https://api.example.net/v5/", "key").unwrap();
        let client = HttpProvisioningClient::new(config).unwrap();
        assert_eq!(
            client.instances_url(),
            "https://api.example.net/v5/simplehosting/instances"
        );
        assert_eq!(
            client.instance_url("abc123"),
            "https://api.example.net/v5/simplehosting/instances/abc123"
        );
    }
}
