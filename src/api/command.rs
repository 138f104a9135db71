//! Typed Box API commands.

use reqwest::Method;
use serde_json::{Value, json};

/// Which Box host serves a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host {
    /// Metadata API (`api.box.com`)
    Api,
    /// Content upload API (`upload.box.com`)
    Upload,
}

/// A single remote operation against the Box API.
///
/// Every command is keyed by remote IDs only; translating paths into IDs is
/// the job of the resolver in [`crate::fs`].
#[derive(Clone, PartialEq, Eq)]
pub enum Command {
    /// List one page of a folder's immediate children.
    ListFolder { id: String, offset: u64, limit: u64 },
    /// Fetch full information about a file.
    GetFileInfo { id: String },
    /// Fetch full information about a folder.
    GetFolderInfo { id: String },
    /// Upload a new file under a parent folder.
    UploadFile {
        name: String,
        parent_id: String,
        contents: Vec<u8>,
    },
    /// Upload a new version of an existing file.
    UploadNewFileVersion { id: String, contents: Vec<u8> },
    /// Rename a file and/or move it to another folder.
    UpdateFileInfo {
        id: String,
        name: Option<String>,
        parent_id: Option<String>,
    },
    /// Copy a file into a folder, optionally under a new name.
    CopyFile {
        id: String,
        parent_id: String,
        name: Option<String>,
    },
    /// Delete a file.
    DeleteFile { id: String },
    /// Delete a folder.
    DeleteFolder { id: String, recursive: bool },
    /// Create a folder under a parent folder.
    CreateFolder { name: String, parent_id: String },
    /// Download file contents. Box usually answers with a redirect.
    DownloadFile { id: String },
}

impl Command {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListFolder { .. } => "list_folder",
            Command::GetFileInfo { .. } => "get_file_info",
            Command::GetFolderInfo { .. } => "get_folder_info",
            Command::UploadFile { .. } => "upload_file",
            Command::UploadNewFileVersion { .. } => "upload_new_file_version",
            Command::UpdateFileInfo { .. } => "update_file_info",
            Command::CopyFile { .. } => "copy_file",
            Command::DeleteFile { .. } => "delete_file",
            Command::DeleteFolder { .. } => "delete_folder",
            Command::CreateFolder { .. } => "create_folder",
            Command::DownloadFile { .. } => "download_file",
        }
    }

    /// The remote ID the command acts on (the parent for creations).
    pub fn target_id(&self) -> &str {
        match self {
            Command::ListFolder { id, .. }
            | Command::GetFileInfo { id }
            | Command::GetFolderInfo { id }
            | Command::UploadNewFileVersion { id, .. }
            | Command::UpdateFileInfo { id, .. }
            | Command::CopyFile { id, .. }
            | Command::DeleteFile { id }
            | Command::DeleteFolder { id, .. }
            | Command::DownloadFile { id } => id,
            Command::UploadFile { parent_id, .. } | Command::CreateFolder { parent_id, .. } => {
                parent_id
            }
        }
    }

    /// HTTP method, host and path (relative to the host's base URL).
    pub fn route(&self) -> (Method, Host, String) {
        match self {
            Command::ListFolder { id, offset, limit } => (
                Method::GET,
                Host::Api,
                format!(
                    "/folders/{}/items?fields=type,id,name,size,created_at,modified_at&offset={}&limit={}",
                    id, offset, limit
                ),
            ),
            Command::GetFileInfo { id } => (Method::GET, Host::Api, format!("/files/{}", id)),
            Command::GetFolderInfo { id } => (Method::GET, Host::Api, format!("/folders/{}", id)),
            Command::UploadFile { .. } => (Method::POST, Host::Upload, "/files/content".to_string()),
            Command::UploadNewFileVersion { id, .. } => {
                (Method::POST, Host::Upload, format!("/files/{}/content", id))
            }
            Command::UpdateFileInfo { id, .. } => (Method::PUT, Host::Api, format!("/files/{}", id)),
            Command::CopyFile { id, .. } => (Method::POST, Host::Api, format!("/files/{}/copy", id)),
            Command::DeleteFile { id } => (Method::DELETE, Host::Api, format!("/files/{}", id)),
            Command::DeleteFolder { id, recursive } => (
                Method::DELETE,
                Host::Api,
                format!("/folders/{}?recursive={}", id, recursive),
            ),
            Command::CreateFolder { .. } => (Method::POST, Host::Api, "/folders".to_string()),
            Command::DownloadFile { id } => {
                (Method::GET, Host::Api, format!("/files/{}/content", id))
            }
        }
    }

    /// JSON request body, if the command sends one.
    ///
    /// Uploads carry a multipart body instead; see [`Command::upload_attributes`].
    pub fn json_body(&self) -> Option<Value> {
        match self {
            Command::UpdateFileInfo {
                name, parent_id, ..
            } => {
                let mut body = serde_json::Map::new();
                if let Some(name) = name {
                    body.insert("name".into(), Value::from(name.as_str()));
                }
                if let Some(parent_id) = parent_id {
                    body.insert("parent".into(), json!({ "id": parent_id }));
                }
                Some(Value::Object(body))
            }
            Command::CopyFile {
                parent_id, name, ..
            } => {
                let mut body = json!({ "parent": { "id": parent_id } });
                if let Some(name) = name {
                    body["name"] = Value::from(name.as_str());
                }
                Some(body)
            }
            Command::CreateFolder { name, parent_id } => Some(json!({
                "name": name,
                "parent": { "id": parent_id }
            })),
            _ => None,
        }
    }

    /// Multipart `attributes` field and file contents for upload commands.
    pub fn upload_attributes(&self) -> Option<(Value, &[u8])> {
        match self {
            Command::UploadFile {
                name,
                parent_id,
                contents,
            } => Some((
                json!({ "name": name, "parent": { "id": parent_id } }),
                contents.as_slice(),
            )),
            Command::UploadNewFileVersion { contents, .. } => {
                Some((json!({}), contents.as_slice()))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Command {
    // File contents are left out so commands can be logged.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("target_id", &self.target_id())
            .finish()
    }
}
