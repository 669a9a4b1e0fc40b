use std::time::Duration;

use crate::error::Result;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// A configured HTTP client pointed at a single inference endpoint.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
}

impl EndpointClient {
    pub fn builder(base_url: impl Into<String>, model: impl Into<String>) -> EndpointClientBuilder {
        EndpointClientBuilder {
            base_url: base_url.into(),
            model: model.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Builder for [`EndpointClient`].
pub struct EndpointClientBuilder {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl EndpointClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<EndpointClient> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(EndpointClient {
            http,
            base_url: self.base_url,
            api_key: self.api_key,
            model: self.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_no_api_key() {
        let client = EndpointClient::builder("http://localhost:8000", "llama3").build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.model(), "llama3");
        assert!(client.api_key.is_none());
    }

    #[test]
    fn builder_carries_api_key() {
        let client = EndpointClient::builder("http://localhost:8000", "llama3")
            .api_key("secret")
            .build()
            .unwrap();
        assert_eq!(client.api_key.as_deref(), Some("secret"));
    }
}
