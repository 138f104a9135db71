//! Example: Delete a file or folder
//!
//! Usage:
//!   cargo run --example rm -- [--token TOKEN] <PATH>

mod cli;

use boxfs::EntryKind;
use cli::{init_tracing, parse_connection};

const USAGE: &str =
    "Usage: cargo run --example rm -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <PATH>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let conn = parse_connection(USAGE, 1);
    let path = &conn.positionals[0];
    let adapter = conn.adapter()?;

    let meta = adapter.get_metadata(path).await?;
    println!("Deleting {} {}...", meta.kind, meta.path);
    match meta.kind {
        EntryKind::File => adapter.delete(path).await?,
        EntryKind::Folder => adapter.delete_dir(path).await?,
    }

    println!("✅ Deleted");
    Ok(())
}
