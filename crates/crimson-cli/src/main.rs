//! Crimson shell - drive a crimsoncache instance with line commands on stdin

mod handler;
mod reply;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crimsoncache::{Cache, EvictionStrategy, RandomStrategy, RecencyStrategy};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::handler::CommandHandler;
use crate::reply::{tokenize, Reply};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 1000)]
    capacity: usize,

    /// Eviction strategy
    #[arg(short, long, value_enum, default_value_t = StrategyKind::Lru)]
    strategy: StrategyKind,

    /// Seed for the random strategy (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Do not print the startup banner
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyKind {
    /// Evict the least recently used entry
    Lru,
    /// Evict a uniformly random entry
    Random,
}

impl StrategyKind {
    fn build(self, seed: Option<u64>) -> Box<dyn EvictionStrategy> {
        match (self, seed) {
            (StrategyKind::Lru, _) => Box::new(RecencyStrategy::new()),
            (StrategyKind::Random, Some(seed)) => Box::new(RandomStrategy::with_seed(seed)),
            (StrategyKind::Random, None) => Box::new(RandomStrategy::new()),
        }
    }
}

/// Log filter from `RUST_LOG` directives, falling back to `info`
fn env_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only replies
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.seed.is_some() && args.strategy != StrategyKind::Random {
        warn!("--seed only applies to the random strategy; ignoring");
    }

    let mut cache = Cache::new(args.capacity)?;
    cache.bind_eviction_strategy(args.strategy.build(args.seed))?;
    let cache = Arc::new(Mutex::new(cache));

    info!("Starting crimson v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    info!("Eviction strategy: {:?}", args.strategy);

    if !args.quiet {
        eprintln!("crimson shell - capacity {}, strategy {:?}", args.capacity, args.strategy);
        eprintln!("Commands: PUT key value | GET key | PEEK key | EXISTS key.. | DEL key..");
        eprintln!("          LEN | KEYS | CLEAR | INFO | PING | QUIT");
        eprintln!("Quote values (\"a  b\") to keep their whitespace");
    }

    run(CommandHandler::new(cache)).await
}

async fn run(handler: CommandHandler) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let reply = match tokenize(&line) {
            Ok(None) => continue,
            Ok(Some(args)) if args[0].eq_ignore_ascii_case("quit") => break,
            Ok(Some(args)) => {
                debug!(command = %args[0], "handling command");
                handler.handle(&args)
            }
            Err(e) => {
                warn!("Parse error: {}", e);
                Reply::Error(format!("ERR {}", e))
            }
        };

        stdout.write_all(reply.render().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}
