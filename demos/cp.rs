//! Example: Copy a file
//!
//! DEST may be an existing folder (the copy keeps its name) or a new path.
//!
//! Usage:
//!   cargo run --example cp -- [--token TOKEN] <SOURCE> <DEST>

mod cli;

use cli::{init_tracing, parse_connection};

const USAGE: &str = "Usage: cargo run --example cp -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <SOURCE> <DEST>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let conn = parse_connection(USAGE, 2);
    let source = &conn.positionals[0];
    let dest = &conn.positionals[1];
    let adapter = conn.adapter()?;

    println!("Copying {} to {}...", source, dest);
    let meta = adapter.copy(source, dest).await?;

    println!("✅ Copied to {}", meta.path);
    Ok(())
}
