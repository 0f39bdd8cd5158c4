use async_trait::async_trait;

use crate::config::Config;
use crate::core::error::{DirProbeError, Result};

/// Issues a single request for a candidate URL and reports its status code.
#[async_trait]
pub trait ProbeUrl: Send + Sync {
    async fn probe(&self, url: &str) -> Result<u16>;
}

/// Prober backed by a shared reqwest client.
///
/// The client keeps reqwest's defaults: no timeout, no extra headers and
/// the default redirect policy. A timeout or User-Agent is only applied
/// when configured.
#[derive(Debug, Clone, Default)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout_duration() {
            client_builder = client_builder.timeout(timeout);
        }
        if let Some(ref user_agent) = config.user_agent {
            client_builder = client_builder.user_agent(user_agent.as_str());
        }

        Ok(Self::new(client_builder.build()?))
    }
}

#[async_trait]
impl ProbeUrl for HttpProber {
    async fn probe(&self, url: &str) -> Result<u16> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        // Only the status matters, release the connection right away
        drop(response);
        Ok(status)
    }
}

/// Human-readable reason for a failed request, preferring the innermost cause
pub fn describe_failure(err: &DirProbeError) -> String {
    match err {
        DirProbeError::Http(inner) => std::error::Error::source(inner)
            .map(|e| e.to_string())
            .unwrap_or_else(|| inner.to_string()),
        DirProbeError::Request(reason) => reason.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_probe__returns_status_code() {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/admin").with_status(200).create_async().await;
        let _m404 = server.mock("GET", "/login").with_status(404).create_async().await;
        let prober = HttpProber::default();

        let ok = prober.probe(&format!("{}/admin", server.url())).await.unwrap();
        let missing = prober.probe(&format!("{}/login", server.url())).await.unwrap();

        assert_eq!(ok, 200);
        assert_eq!(missing, 404);
    }

    #[tokio::test]
    async fn test_probe__sends_configured_user_agent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/ua")
            .match_header("user-agent", "dirprobe-test")
            .with_status(200)
            .create_async()
            .await;
        let config = Config {
            user_agent: Some("dirprobe-test".to_string()),
            timeout: Some(5),
            ..Default::default()
        };
        let prober = HttpProber::from_config(&config).unwrap();

        let status = prober.probe(&format!("{}/ua", server.url())).await.unwrap();

        assert_eq!(status, 200);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_probe__unreachable_host_is_http_error() {
        let prober = HttpProber::default();

        // Port 1 on localhost is not expected to accept connections
        let err = prober.probe("http://127.0.0.1:1/admin").await.unwrap_err();

        assert!(matches!(err, DirProbeError::Http(_)));
        assert!(!describe_failure(&err).is_empty());
    }

    #[test]
    fn test_describe_failure__request_reason_is_kept() {
        let err = DirProbeError::Request("connection refused".to_string());
        assert_eq!(describe_failure(&err), "connection refused");
    }
}
