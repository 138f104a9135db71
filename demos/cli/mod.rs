use std::env;
use std::process;

use boxfs::{BoxAdapter, ClientConfig};
use tracing_subscriber::{EnvFilter, fmt};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(1);
}

pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxfs=debug"));
    fmt().with_env_filter(filter).with_target(false).init();
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    #[allow(dead_code)]
    pub fn take_flag(&mut self, names: &[&str]) -> bool {
        match self.args.iter().position(|a| names.contains(&a.as_str())) {
            Some(i) => {
                self.args.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// Connection options shared by every demo.
pub struct Connection {
    pub token: String,
    pub proxy: Option<String>,
    pub prefix: Option<String>,
    pub positionals: Vec<String>,
}

/// Parse `--token` (or `BOX_ACCESS_TOKEN`), `--proxy` and `--prefix`,
/// exiting unless exactly `expected` positionals remain.
#[allow(dead_code)]
pub fn parse_connection(usage: &'static str, expected: usize) -> Connection {
    connection_from_parser(ArgParser::new(usage), usage, expected)
}

pub fn connection_from_parser(
    mut parser: ArgParser,
    usage: &'static str,
    expected: usize,
) -> Connection {
    let token = parser
        .take_value(&["--token", "-t"])
        .or_else(|| env::var("BOX_ACCESS_TOKEN").ok())
        .unwrap_or_else(|| usage_and_exit(usage));
    let proxy = parser.take_value(&["--proxy"]);
    let prefix = parser.take_value(&["--prefix"]);
    let positionals = parser.remaining();
    if positionals.len() != expected {
        usage_and_exit(usage);
    }

    Connection {
        token,
        proxy,
        prefix,
        positionals,
    }
}

impl Connection {
    pub fn adapter(&self) -> boxfs::Result<BoxAdapter> {
        let mut config = ClientConfig::new(&self.token);
        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(proxy);
        }
        let adapter = BoxAdapter::connect(config)?;
        Ok(match &self.prefix {
            Some(prefix) => adapter.with_prefix(prefix),
            None => adapter,
        })
    }
}
