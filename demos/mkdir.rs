mod cli;

use boxfs::error::Result;
use cli::{init_tracing, parse_connection};

const USAGE: &str =
    "Usage: cargo run --example mkdir -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE, 1);
    let target = conn.positionals[0].clone();
    let adapter = conn.adapter()?;

    println!("Creating directory: {}", target);
    match adapter.create_dir(&target).await {
        Ok(meta) => {
            println!("Directory ready: {}", meta.path);
            if let Some(entry) = adapter.cached(&target).await {
                println!("ID: {}", entry.id);
            }
        }
        Err(e) => {
            eprintln!("Failed to create directory: {}", e);
        }
    }

    Ok(())
}
