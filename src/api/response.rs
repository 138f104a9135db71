//! Gateway responses and the Box item records they carry.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ApiErrorBody;
use crate::error::{BoxError, Result};

/// Outcome of a gateway command.
///
/// Empty successes (`204 No Content`) and redirects are ordinary outcomes,
/// not decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 2xx with a body.
    Body { status: u16, body: Vec<u8> },
    /// 2xx without a body.
    Empty { status: u16 },
    /// 3xx pointing somewhere else.
    Redirect { status: u16, location: String },
    /// Anything else.
    Failure { status: u16, body: Vec<u8> },
}

impl Response {
    /// Classify a raw HTTP exchange.
    pub fn classify(status: u16, location: Option<String>, body: Vec<u8>) -> Self {
        match status {
            200..=299 if body.is_empty() => Response::Empty { status },
            200..=299 => Response::Body { status, body },
            300..=399 => match location {
                Some(location) => Response::Redirect { status, location },
                None => Response::Failure { status, body },
            },
            _ => Response::Failure { status, body },
        }
    }

    /// HTTP status of the exchange.
    pub fn status(&self) -> u16 {
        match self {
            Response::Body { status, .. }
            | Response::Empty { status }
            | Response::Redirect { status, .. }
            | Response::Failure { status, .. } => *status,
        }
    }

    /// Turn a `Failure` into a [`BoxError::ApiError`], passing everything else through.
    pub fn into_result(self) -> Result<Self> {
        match self {
            Response::Failure { status, body } => {
                let parsed = ApiErrorBody::parse(&body);
                let code = parsed.error_code(status);
                Err(BoxError::ApiError {
                    status,
                    code,
                    message: parsed
                        .message
                        .unwrap_or_else(|| code.description().to_string()),
                })
            }
            other => Ok(other),
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Response::Body { body, .. } => Ok(serde_json::from_slice(body)?),
            _ => Err(BoxError::InvalidResponse),
        }
    }
}

/// Box item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    File,
    Folder,
    /// Web links and anything Box adds later.
    #[serde(other)]
    Other,
}

/// A file or folder record as returned by listings and info calls.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEntry {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
}

/// A page of items (folder listings and upload results).
#[derive(Debug, Clone, Deserialize)]
pub struct ItemCollection {
    #[serde(default)]
    pub total_count: Option<u64>,
    pub entries: Vec<RemoteEntry>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

impl ItemCollection {
    /// First entry, as returned by uploads.
    pub fn into_first(self) -> Result<RemoteEntry> {
        self.entries
            .into_iter()
            .next()
            .ok_or(BoxError::InvalidResponse)
    }
}

/// Parse a Box ISO-8601 timestamp into Unix seconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.timestamp())
}
