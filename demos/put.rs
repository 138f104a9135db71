//! Example: Upload a local file
//!
//! Usage:
//!   cargo run --example put -- [--token TOKEN] [--overwrite] <LOCAL_FILE> <REMOTE_PATH>

mod cli;

use cli::{ArgParser, connection_from_parser, init_tracing};

const USAGE: &str = "Usage: cargo run --example put -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] [--overwrite] <LOCAL_FILE> <REMOTE_PATH>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut parser = ArgParser::new(USAGE);
    let overwrite = parser.take_flag(&["--overwrite"]);
    let conn = connection_from_parser(parser, USAGE, 2);
    let local = &conn.positionals[0];
    let remote = &conn.positionals[1];
    let adapter = conn.adapter()?;

    let contents = std::fs::read(local)?;
    println!("Uploading {} ({} bytes) to {}...", local, contents.len(), remote);

    // update() falls back to a plain upload when nothing is there yet
    let meta = if overwrite {
        adapter.update(remote, &contents).await?
    } else {
        adapter.write(remote, &contents).await?
    };

    println!("✅ Uploaded {} ({} bytes)", meta.path, meta.size.unwrap_or(0));
    Ok(())
}
