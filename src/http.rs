//! HTTP client wrapper for Box API requests.

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::{Client, RequestBuilder, redirect};

use crate::api::Response;
use crate::error::{BoxError, Result};

/// HTTP client for making requests to Box servers.
///
/// Redirects are never followed automatically: downloads answer with a
/// `302` whose `Location` the filesystem layer follows itself.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Create a new HTTP client with a proxy.
    pub fn with_proxy(proxy: &str, timeout: Duration) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| BoxError::Custom(format!("Invalid proxy: {}", e)))?;

        let client = Client::builder()
            .proxy(proxy)
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| BoxError::Custom(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    /// Start a request on the underlying client.
    pub fn request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send a request and classify the outcome.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(Response::classify(status, location, body))
    }
}
