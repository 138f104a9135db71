//! Example: Rename or move a file
//!
//! Usage:
//!   cargo run --example mv -- [--token TOKEN] <SOURCE> <DEST>

mod cli;

use cli::{init_tracing, parse_connection};

const USAGE: &str = "Usage: cargo run --example mv -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <SOURCE> <DEST>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let conn = parse_connection(USAGE, 2);
    let source = &conn.positionals[0];
    let dest = &conn.positionals[1];
    let adapter = conn.adapter()?;

    println!("Moving {} to {}...", source, dest);
    let meta = adapter.rename(source, dest).await?;

    println!("✅ Move complete: {}", meta.path);
    Ok(())
}
