use crate::{FetchError, FetchErrorResult};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

const USER_AGENT: &str = concat!("andr-shell/", env!("CARGO_PKG_VERSION"));

/// Retrieves a resource as text.
///
/// Implementations own the connection for the duration of the call and must
/// have released it by the time they return, on every path.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn get_text(&self, url: &Url) -> FetchErrorResult<String>;
}

/// Reqwest-backed transport.
///
/// Idle pooling is disabled, so every connection is closed once its response
/// body has been read or dropped.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// `timeout` bounds the whole request; `None` keeps reqwest's default.
    pub fn new(timeout: Option<Duration>) -> FetchErrorResult<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(FetchError::client_build)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &Url) -> FetchErrorResult<String> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(url.as_str(), status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
