//! Box API client with request/response handling.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::command::{Command, Host};
use super::response::Response;
use super::Gateway;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;

/// Box API client.
///
/// Implements [`Gateway`] over HTTPS with a caller-supplied bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = match &config.proxy {
            Some(proxy) => HttpClient::with_proxy(proxy, config.timeout)?,
            None => HttpClient::new(config.timeout)?,
        };
        Ok(Self { http, config })
    }

    /// Create a client from `BOX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, host: Host, path: &str) -> String {
        let base = match host {
            Host::Api => &self.config.api_base,
            Host::Upload => &self.config.upload_base,
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Gateway for ApiClient {
    async fn execute(&self, command: &Command) -> Result<Response> {
        let (method, host, path) = command.route();
        let url = self.url(host, &path);
        debug!(command = command.name(), %method, %url, "box api request");

        let mut request = self
            .http
            .request(method, &url)
            .bearer_auth(&self.config.access_token);

        if let Some(body) = command.json_body() {
            request = request.json(&body);
        } else if let Some((attributes, contents)) = command.upload_attributes() {
            let file_name = match command {
                Command::UploadFile { name, .. } => name.clone(),
                _ => "contents".to_string(),
            };
            let form = Form::new()
                .text("attributes", attributes.to_string())
                .part("file", Part::bytes(contents.to_vec()).file_name(file_name));
            request = request.multipart(form);
        }

        let response = self.http.send(request).await?;
        debug!(
            command = command.name(),
            status = response.status(),
            "box api response"
        );
        Ok(response)
    }

    async fn follow(&self, location: &str) -> Result<Response> {
        debug!(%location, "following redirect");
        // Download URLs are pre-signed and fetched without the bearer token.
        let request = self.http.request(reqwest::Method::GET, location);
        self.http.send(request).await
    }
}
