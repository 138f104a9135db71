//! Example: Download a file
//!
//! Usage:
//!   cargo run --example get -- [--token TOKEN] <REMOTE_PATH> <LOCAL_FILE>

mod cli;

use cli::{init_tracing, parse_connection};

const USAGE: &str = "Usage: cargo run --example get -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <REMOTE_PATH> <LOCAL_FILE>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let conn = parse_connection(USAGE, 2);
    let remote = &conn.positionals[0];
    let local = &conn.positionals[1];
    let adapter = conn.adapter()?;

    println!("Downloading {}...", remote);
    let contents = adapter.read(remote).await?;
    std::fs::write(local, &contents)?;

    println!("✅ Saved {} bytes to {}", contents.len(), local);
    Ok(())
}
