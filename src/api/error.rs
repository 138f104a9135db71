//! Box API error codes.

use serde::Deserialize;

/// Box API error codes, as carried in the `code` field of an error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Malformed request
    BadRequest,
    /// Name contains invalid characters or is too long
    ItemNameInvalid,
    /// Name already used by a sibling
    ItemNameInUse,
    /// Missing or expired access token
    Unauthorized,
    /// Insufficient permissions on the item
    AccessDenied,
    /// Item does not exist or is not visible
    NotFound,
    /// Item is in the trash
    Trashed,
    /// Operation conflicts with the item's current state
    Conflict,
    /// Folder is not empty and the delete was not recursive
    FolderNotEmpty,
    /// Account storage limit reached
    StorageLimitExceeded,
    /// File larger than the account allows
    FileSizeLimitExceeded,
    /// Rate limit exceeded
    RateLimitExceeded,
    /// Internal error
    InternalServerError,
    /// Temporarily unavailable
    Unavailable,
    /// Unknown error
    Unknown,
}

impl From<&str> for ApiErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "bad_request" => ApiErrorCode::BadRequest,
            "item_name_invalid" | "item_name_too_long" => ApiErrorCode::ItemNameInvalid,
            "item_name_in_use" => ApiErrorCode::ItemNameInUse,
            "unauthorized" => ApiErrorCode::Unauthorized,
            "access_denied_insufficient_permissions" | "forbidden" => ApiErrorCode::AccessDenied,
            "not_found" => ApiErrorCode::NotFound,
            "trashed" | "item_trashed" => ApiErrorCode::Trashed,
            "conflict" | "operation_blocked_temporary" => ApiErrorCode::Conflict,
            "folder_not_empty" => ApiErrorCode::FolderNotEmpty,
            "storage_limit_exceeded" => ApiErrorCode::StorageLimitExceeded,
            "file_size_limit_exceeded" => ApiErrorCode::FileSizeLimitExceeded,
            "rate_limit_exceeded" => ApiErrorCode::RateLimitExceeded,
            "internal_server_error" => ApiErrorCode::InternalServerError,
            "unavailable" => ApiErrorCode::Unavailable,
            _ => ApiErrorCode::Unknown,
        }
    }
}

impl ApiErrorCode {
    /// Fallback classification when the error body carries no code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorCode::BadRequest,
            401 => ApiErrorCode::Unauthorized,
            403 => ApiErrorCode::AccessDenied,
            404 => ApiErrorCode::NotFound,
            409 => ApiErrorCode::Conflict,
            429 => ApiErrorCode::RateLimitExceeded,
            500 => ApiErrorCode::InternalServerError,
            503 => ApiErrorCode::Unavailable,
            _ => ApiErrorCode::Unknown,
        }
    }

    /// Get human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ApiErrorCode::BadRequest => "Bad request",
            ApiErrorCode::ItemNameInvalid => "Invalid item name",
            ApiErrorCode::ItemNameInUse => "Item name already in use",
            ApiErrorCode::Unauthorized => "Unauthorized",
            ApiErrorCode::AccessDenied => "Access denied",
            ApiErrorCode::NotFound => "Item not found",
            ApiErrorCode::Trashed => "Item is trashed",
            ApiErrorCode::Conflict => "Conflict",
            ApiErrorCode::FolderNotEmpty => "Folder not empty",
            ApiErrorCode::StorageLimitExceeded => "Storage limit exceeded",
            ApiErrorCode::FileSizeLimitExceeded => "File size limit exceeded",
            ApiErrorCode::RateLimitExceeded => "Rate limit exceeded",
            ApiErrorCode::InternalServerError => "Internal server error",
            ApiErrorCode::Unavailable => "Temporarily unavailable",
            ApiErrorCode::Unknown => "Unknown error",
        }
    }
}

/// Error body returned by Box on non-success responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
}

impl ApiErrorBody {
    /// Decode an error body, tolerating empty or non-JSON payloads.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Resolve the error code, falling back to the HTTP status.
    pub fn error_code(&self, status: u16) -> ApiErrorCode {
        match self.code.as_deref() {
            Some(code) => ApiErrorCode::from(code),
            None => ApiErrorCode::from_status(status),
        }
    }
}
