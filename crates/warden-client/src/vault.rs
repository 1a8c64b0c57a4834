//! HTTP client for a Vault server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use warden_config::VaultConfig;

use crate::error::ClientError;
use crate::http::{Missing, into_secret};
use crate::{Logical, Secret};

const TOKEN_HEADER: &str = "X-Vault-Token";
const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Logical API client backed by reqwest.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    address: String,
    token: String,
    namespace: Option<String>,
}

impl VaultClient {
    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if no address is configured, or
    /// [`ClientError::Http`] if the underlying `reqwest::Client` fails to
    /// build.
    pub fn new(config: &VaultConfig) -> Result<Self, ClientError> {
        if config.base_address().is_empty() {
            return Err(ClientError::Config("vault address is not set".into()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("warden/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            address: config.base_address().to_string(),
            token: config.token.clone(),
            namespace: config.namespace().map(String::from),
        })
    }

    /// Full URL for a logical path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.address, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if !self.token.is_empty() {
            builder = builder.header(TOKEN_HEADER, &self.token);
        }
        if let Some(ns) = &self.namespace {
            builder = builder.header(NAMESPACE_HEADER, ns);
        }
        builder
    }
}

#[async_trait]
impl Logical for VaultClient {
    async fn write(
        &self,
        path: &str,
        data: Map<String, Value>,
    ) -> Result<Option<Secret>, ClientError> {
        tracing::debug!(%path, fields = data.len(), "vault write");
        let resp = self.request(Method::PUT, path).json(&data).send().await?;
        into_secret(resp, Missing::Error).await
    }

    async fn read(&self, path: &str) -> Result<Option<Secret>, ClientError> {
        tracing::debug!(%path, "vault read");
        let resp = self.request(Method::GET, path).send().await?;
        into_secret(resp, Missing::Absent).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        tracing::debug!(%path, "vault delete");
        let resp = self.request(Method::DELETE, path).send().await?;
        into_secret(resp, Missing::Error).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(address: &str) -> VaultConfig {
        VaultConfig {
            address: address.into(),
            token: "root".into(),
            namespace: "/team-a/".into(),
            ..VaultConfig::default()
        }
    }

    #[test]
    fn missing_address_is_config_error() {
        let err = VaultClient::new(&VaultConfig::default()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn url_joins_address_and_path() {
        let client = VaultClient::new(&config("http://127.0.0.1:8200/")).unwrap();
        assert_eq!(
            client.url("auth/approle/role/web"),
            "http://127.0.0.1:8200/v1/auth/approle/role/web"
        );
        assert_eq!(
            client.url("/auth/approle/role/web/role-id"),
            "http://127.0.0.1:8200/v1/auth/approle/role/web/role-id"
        );
    }

    #[test]
    fn requests_carry_token_and_namespace() {
        let client = VaultClient::new(&config("http://127.0.0.1:8200")).unwrap();
        let request = client
            .request(Method::GET, "auth/approle/role/web")
            .build()
            .unwrap();
        assert_eq!(request.headers()[TOKEN_HEADER], "root");
        assert_eq!(request.headers()[NAMESPACE_HEADER], "team-a");
        assert_eq!(request.method(), &Method::GET);
    }

    #[tokio::test]
    #[ignore] // requires a dev server: vault server -dev -dev-root-token-id=root
    async fn live_write_read_delete() {
        let client = VaultClient::new(&VaultConfig {
            address: "http://127.0.0.1:8200".into(),
            token: "root".into(),
            ..VaultConfig::default()
        })
        .unwrap();

        let path = "auth/approle/role/warden-live";
        let mut data = Map::new();
        data.insert("secret_id_num_uses".into(), Value::from(3));
        client.write(path, data).await.unwrap();

        let secret = client.read(path).await.unwrap().expect("role exists");
        assert_eq!(secret.data["secret_id_num_uses"], 3);

        client.delete(path).await.unwrap();
        assert!(client.read(path).await.unwrap().is_none());
    }
}
