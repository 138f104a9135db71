//! In-memory Box account used by the crate's tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::command::Command;
use super::response::Response;
use super::Gateway;
use crate::error::Result;

pub(crate) const TIMESTAMP: &str = "2024-05-01T12:00:00-07:00";
const DOWNLOAD_HOST: &str = "https://dl.mock.test/";

/// Raw HTTP exchange: status, `Location` header, body.
type Raw = (u16, Option<String>, Vec<u8>);

#[derive(Debug, Clone)]
struct Item {
    name: String,
    parent: Option<String>,
    folder: bool,
    contents: Vec<u8>,
    version: u32,
}

#[derive(Debug)]
struct State {
    items: BTreeMap<u64, Item>,
    next_id: u64,
    calls: HashMap<&'static str, usize>,
    log: Vec<Command>,
    page_size: u64,
    redirect_downloads: bool,
    pending_downloads: bool,
}

/// Fake Box account: numeric IDs, `0` is the root, deletes answer `204`,
/// downloads can answer with a redirect. Replies are raw status/body pairs
/// run through [`Response::classify`], like the HTTP client's.
#[derive(Debug)]
pub(crate) struct MockGateway {
    state: Mutex<State>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        let mut items = BTreeMap::new();
        items.insert(
            0,
            Item {
                name: "All Files".to_string(),
                parent: None,
                folder: true,
                contents: Vec::new(),
                version: 1,
            },
        );
        Self {
            state: Mutex::new(State {
                items,
                next_id: 100,
                calls: HashMap::new(),
                log: Vec::new(),
                page_size: 1000,
                redirect_downloads: false,
                pending_downloads: false,
            }),
        }
    }

    pub(crate) fn add_folder(&self, parent_id: &str, name: &str) -> String {
        self.insert(parent_id, name, true, Vec::new())
    }

    pub(crate) fn add_file(&self, parent_id: &str, name: &str, contents: &[u8]) -> String {
        self.insert(parent_id, name, false, contents.to_vec())
    }

    fn insert(&self, parent_id: &str, name: &str, folder: bool, contents: Vec<u8>) -> String {
        let mut state = self.state.lock().unwrap();
        state.create(parent_id, name, folder, contents).to_string()
    }

    /// Number of times a command (by [`Command::name`]) was executed.
    pub(crate) fn calls(&self, command: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.calls.get(command).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.calls.values().sum()
    }

    pub(crate) fn reset_calls(&self) {
        let mut state = self.state.lock().unwrap();
        state.calls.clear();
        state.log.clear();
    }

    /// Most recent executed command with the given name.
    pub(crate) fn last(&self, command: &str) -> Option<Command> {
        let state = self.state.lock().unwrap();
        state.log.iter().rev().find(|c| c.name() == command).cloned()
    }

    pub(crate) fn set_page_size(&self, page_size: u64) {
        self.state.lock().unwrap().page_size = page_size;
    }

    pub(crate) fn set_redirect_downloads(&self, enabled: bool) {
        self.state.lock().unwrap().redirect_downloads = enabled;
    }

    /// Answer downloads with `202 Accepted` and no body.
    pub(crate) fn set_pending_downloads(&self, enabled: bool) {
        self.state.lock().unwrap().pending_downloads = enabled;
    }

    /// ID of a child by name.
    pub(crate) fn child(&self, parent_id: &str, name: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.child(parent_id, name).map(|id| id.to_string())
    }

    /// Walk a `/`-separated path from the root the way a client without a
    /// cache would.
    pub(crate) fn lookup(&self, path: &str) -> Option<String> {
        let mut id = "0".to_string();
        for part in path.split('/').filter(|p| !p.is_empty()) {
            id = self.child(&id, part)?;
        }
        Some(id)
    }

    pub(crate) fn contents(&self, id: &str) -> Option<Vec<u8>> {
        let state = self.state.lock().unwrap();
        state.get(id).map(|item| item.contents.clone())
    }

    pub(crate) fn version(&self, id: &str) -> Option<u32> {
        let state = self.state.lock().unwrap();
        state.get(id).map(|item| item.version)
    }

    /// Remove an item behind the adapter's back.
    pub(crate) fn remove_remote(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.remove_tree(id);
    }
}

impl State {
    fn key(id: &str) -> Option<u64> {
        id.parse().ok()
    }

    fn get(&self, id: &str) -> Option<&Item> {
        Self::key(id).and_then(|k| self.items.get(&k))
    }

    fn folder(&self, id: &str) -> Option<&Item> {
        self.get(id).filter(|item| item.folder)
    }

    fn file(&self, id: &str) -> Option<&Item> {
        self.get(id).filter(|item| !item.folder)
    }

    fn children(&self, parent_id: &str) -> Vec<u64> {
        self.items
            .iter()
            .filter(|(_, item)| item.parent.as_deref() == Some(parent_id))
            .map(|(id, _)| *id)
            .collect()
    }

    fn child(&self, parent_id: &str, name: &str) -> Option<u64> {
        self.children(parent_id)
            .into_iter()
            .find(|id| self.items[id].name == name)
    }

    fn create(&mut self, parent_id: &str, name: &str, folder: bool, contents: Vec<u8>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(
            id,
            Item {
                name: name.to_string(),
                parent: Some(parent_id.to_string()),
                folder,
                contents,
                version: 1,
            },
        );
        id
    }

    fn remove_tree(&mut self, id: &str) {
        for child in self.children(id) {
            self.remove_tree(&child.to_string());
        }
        if let Some(key) = Self::key(id) {
            self.items.remove(&key);
        }
    }

    fn size(&self, id: u64) -> u64 {
        let item = &self.items[&id];
        if item.folder {
            self.children(&id.to_string())
                .into_iter()
                .map(|child| self.size(child))
                .sum()
        } else {
            item.contents.len() as u64
        }
    }

    fn item_json(&self, id: u64) -> Value {
        let item = &self.items[&id];
        json!({
            "type": if item.folder { "folder" } else { "file" },
            "id": id.to_string(),
            "name": item.name,
            "size": self.size(id),
            "created_at": TIMESTAMP,
            "modified_at": TIMESTAMP,
            "parent": item.parent.as_ref().map(|p| json!({ "type": "folder", "id": p })),
        })
    }

    fn name_taken(&self, parent_id: &str, name: &str, except: Option<u64>) -> bool {
        self.child(parent_id, name)
            .is_some_and(|existing| Some(existing) != except)
    }

    fn handle(&mut self, command: &Command) -> Raw {
        match command {
            Command::ListFolder { id, offset, limit } => {
                if self.folder(id).is_none() {
                    return not_found();
                }
                let children = self.children(id);
                let take = (*limit).min(self.page_size) as usize;
                let entries: Vec<Value> = children
                    .iter()
                    .skip(*offset as usize)
                    .take(take)
                    .map(|child| self.item_json(*child))
                    .collect();
                ok(200, json!({
                    "total_count": children.len(),
                    "entries": entries,
                    "offset": offset,
                    "limit": limit,
                }))
            }
            Command::GetFileInfo { id } => match (self.file(id), Self::key(id)) {
                (Some(_), Some(key)) => ok(200, self.item_json(key)),
                _ => not_found(),
            },
            Command::GetFolderInfo { id } => match (self.folder(id), Self::key(id)) {
                (Some(_), Some(key)) => ok(200, self.item_json(key)),
                _ => not_found(),
            },
            Command::UploadFile {
                name,
                parent_id,
                contents,
            } => {
                if self.folder(parent_id).is_none() {
                    return not_found();
                }
                if self.name_taken(parent_id, name, None) {
                    return name_in_use();
                }
                let id = self.create(parent_id, name, false, contents.clone());
                ok(201, json!({ "total_count": 1, "entries": [self.item_json(id)] }))
            }
            Command::UploadNewFileVersion { id, contents } => {
                let Some(key) = Self::key(id).filter(|_| self.file(id).is_some()) else {
                    return not_found();
                };
                if let Some(item) = self.items.get_mut(&key) {
                    item.contents = contents.clone();
                    item.version += 1;
                }
                ok(201, json!({ "total_count": 1, "entries": [self.item_json(key)] }))
            }
            Command::UpdateFileInfo {
                id,
                name,
                parent_id,
            } => {
                let Some(item) = self.file(id).cloned() else {
                    return not_found();
                };
                let key = Self::key(id).unwrap_or_default();
                let parent = parent_id.clone().or(item.parent.clone()).unwrap_or_default();
                if self.folder(&parent).is_none() {
                    return not_found();
                }
                let new_name = name.clone().unwrap_or(item.name);
                if self.name_taken(&parent, &new_name, Some(key)) {
                    return name_in_use();
                }
                if let Some(item) = self.items.get_mut(&key) {
                    item.name = new_name;
                    item.parent = Some(parent);
                }
                ok(200, self.item_json(key))
            }
            Command::CopyFile {
                id,
                parent_id,
                name,
            } => {
                let Some(item) = self.file(id).cloned() else {
                    return not_found();
                };
                if self.folder(parent_id).is_none() {
                    return not_found();
                }
                let new_name = name.clone().unwrap_or(item.name);
                if self.name_taken(parent_id, &new_name, None) {
                    return name_in_use();
                }
                let copy = self.create(parent_id, &new_name, false, item.contents);
                ok(201, self.item_json(copy))
            }
            Command::DeleteFile { id } => {
                if self.file(id).is_none() {
                    return not_found();
                }
                self.remove_tree(id);
                no_content()
            }
            Command::DeleteFolder { id, recursive } => {
                if id == "0" || self.folder(id).is_none() {
                    return not_found();
                }
                if !recursive && !self.children(id).is_empty() {
                    return failure(400, "folder_not_empty");
                }
                self.remove_tree(id);
                no_content()
            }
            Command::CreateFolder { name, parent_id } => {
                if self.folder(parent_id).is_none() {
                    return not_found();
                }
                if self.name_taken(parent_id, name, None) {
                    return name_in_use();
                }
                let id = self.create(parent_id, name, true, Vec::new());
                ok(201, self.item_json(id))
            }
            Command::DownloadFile { id } => match self.file(id) {
                Some(_) if self.pending_downloads => (202, None, Vec::new()),
                Some(_) if self.redirect_downloads => {
                    (302, Some(format!("{}{}", DOWNLOAD_HOST, id)), Vec::new())
                }
                Some(item) => (200, None, item.contents.clone()),
                None => not_found(),
            },
        }
    }
}

fn ok(status: u16, body: Value) -> Raw {
    (status, None, body.to_string().into_bytes())
}

fn no_content() -> Raw {
    (204, None, Vec::new())
}

fn failure(status: u16, code: &str) -> Raw {
    let body = json!({ "type": "error", "status": status, "code": code, "message": code });
    (status, None, body.to_string().into_bytes())
}

fn not_found() -> Raw {
    failure(404, "not_found")
}

fn name_in_use() -> Raw {
    failure(409, "item_name_in_use")
}

#[async_trait]
impl Gateway for MockGateway {
    async fn execute(&self, command: &Command) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(command.name()).or_insert(0) += 1;
        state.log.push(command.clone());
        let (status, location, body) = state.handle(command);
        Ok(Response::classify(status, location, body))
    }

    async fn follow(&self, location: &str) -> Result<Response> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry("follow").or_insert(0) += 1;
        let (status, redirect, body) = match location
            .strip_prefix(DOWNLOAD_HOST)
            .and_then(|id| state.file(id))
        {
            Some(item) => (200, None, item.contents.clone()),
            None => not_found(),
        };
        Ok(Response::classify(status, redirect, body))
    }
}
