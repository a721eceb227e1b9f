//! HTTP client abstraction used by the Hypixel status client.
//!
//! Production code goes through [`DefaultHttpClient`], a thin wrapper over
//! reqwest. Tests substitute the generated `MockHttpClient` so no request ever
//! leaves the process.

use async_trait::async_trait;
use reqwest;
use crate::Error;

/// A generic trait for making HTTP requests.
#[cfg_attr(test, mockall::automock(type Error = crate::Error;))]
#[async_trait]
pub trait HttpClient: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the response body whatever the status code; Hypixel reports
    /// errors such as an invalid key in a JSON body on 4xx responses.
    async fn get(&self, url: String) -> Result<String, Self::Error>;
}

#[derive(Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}

impl DefaultHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for DefaultHttpClient {
    type Error = Error;

    async fn get(&self, url: String) -> Result<String, Self::Error> {
        let response = self.client
            .get(&url)
            .send()
            .await?
            .text()
            .await?;
        Ok(response)
    }
}
