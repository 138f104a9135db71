//! Example: Get information about a file or folder
//!
//! Usage:
//!   cargo run --example stat -- [--token TOKEN] <PATH>

mod cli;

use boxfs::error::Result;
use chrono::DateTime;
use cli::{init_tracing, parse_connection};

const USAGE: &str =
    "Usage: cargo run --example stat -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE, 1);
    let path = &conn.positionals[0];
    let adapter = conn.adapter()?;

    match adapter.get_metadata(path).await {
        Ok(meta) => {
            println!("Path:     {}", meta.path);
            println!("Name:     {}", meta.basename);
            println!("Type:     {}", meta.kind);
            if let Some(size) = meta.size {
                println!("Size:     {} bytes", size);
            }
            if let Some(modified) = meta.timestamp.and_then(|t| DateTime::from_timestamp(t, 0)) {
                println!("Modified: {}", modified.to_rfc3339());
            }
            if meta.is_file() {
                println!("MIME:     {}", adapter.get_mimetype(path));
            }
            if let Some(entry) = adapter.cached(path).await {
                println!("ID:       {}", entry.id);
            }
        }
        Err(e) if e.is_not_found() => {
            eprintln!("Not found: {}", path);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
