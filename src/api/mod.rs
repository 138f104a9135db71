//! Box API commands, responses and the gateway that executes them.

pub mod client;
pub mod command;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;
pub mod response;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

pub use client::ApiClient;
pub use command::{Command, Host};
pub use error::ApiErrorCode;
pub use response::{ItemCollection, ItemType, RemoteEntry, Response};

/// Executes typed commands against the remote service.
///
/// `Err` is reserved for transport problems; API-level failures come back as
/// [`Response::Failure`].
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run one command.
    async fn execute(&self, command: &Command) -> Result<Response>;

    /// Fetch an absolute URL handed out in a redirect.
    async fn follow(&self, location: &str) -> Result<Response>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn execute(&self, command: &Command) -> Result<Response> {
        (**self).execute(command).await
    }

    async fn follow(&self, location: &str) -> Result<Response> {
        (**self).follow(location).await
    }
}
