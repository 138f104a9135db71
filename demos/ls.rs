//! Example: List a Box folder
//!
//! Usage:
//!   cargo run --example ls -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <PATH>

mod cli;

use boxfs::error::Result;
use cli::{init_tracing, parse_connection};

const USAGE: &str =
    "Usage: cargo run --example ls -- [--token TOKEN] [--proxy PROXY] [--prefix PREFIX] <PATH>";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let conn = parse_connection(USAGE, 1);
    let path = &conn.positionals[0];
    let adapter = conn.adapter()?;

    println!("Listing: {}\n", path);
    let mut entries = adapter.list_contents(path).await?;
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    if entries.is_empty() {
        println!("  (empty)");
    }
    for entry in entries {
        let size = match (entry.is_file(), entry.size) {
            (true, Some(size)) => format_size(size),
            _ => String::new(),
        };
        println!("  {:<6} {} {}", entry.kind, entry.basename, size);
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else if bytes < 1_048_576 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else if bytes < 1_073_741_824 {
        format!("{:.1}MB", bytes as f64 / 1_048_576.0)
    } else {
        format!("{:.2}GB", bytes as f64 / 1_073_741_824.0)
    }
}
