use anyhow::Context;
use clap::{Parser, Subcommand};
use redis_map::{KeyValueMap, MapConfig, RedisMap};
use std::path::PathBuf;

/// Redis Map - inspect and edit a namespaced string map stored in Redis
#[derive(Parser, Debug)]
#[command(name = "redis-map")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (overrides host/port/prefix flags)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Redis host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Redis port
    #[arg(short, long, default_value_t = 6379)]
    port: u16,

    /// Key namespace
    #[arg(long)]
    prefix: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value stored under a key
    Get { key: String },
    /// Store a value and print the previous one
    Put { key: String, value: String },
    /// Delete a key and print the value it held
    Remove { key: String },
    /// Check whether a key exists
    Contains { key: String },
    /// Check whether any key holds this value
    ContainsValue { value: String },
    /// Print the number of entries
    Size,
    /// List keys
    Keys,
    /// List values
    Values,
    /// List key/value pairs
    Entries,
    /// Delete every entry in the namespace
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    redis_map::logging::init_subscriber(args.json_logs)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging subsystem")?;

    let config = match &args.config {
        Some(path) => MapConfig::from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => MapConfig::new(args.host.as_str(), args.port, args.prefix.as_deref()),
    };

    tracing::debug!(
        host = %config.host,
        port = config.port,
        prefix = config.key_prefix.as_deref().unwrap_or(""),
        "Configuration loaded"
    );

    let map = RedisMap::from_config(&config)?;
    run(&map, args.command).await?;
    map.close().await;
    Ok(())
}

async fn run(map: &RedisMap, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Get { key } => print_optional(map.get(key.as_str()).await?),
        Command::Put { key, value } => {
            print_optional(map.put(key.as_str(), value.as_str()).await?)
        }
        Command::Remove { key } => print_optional(map.remove(key.as_str()).await?),
        Command::Contains { key } => println!("{}", map.contains_key(key.as_str()).await?),
        Command::ContainsValue { value } => {
            println!("{}", map.contains_value(value.as_str()).await?)
        }
        Command::Size => println!("{}", map.size().await?),
        Command::Keys => {
            let mut keys: Vec<String> = map.keys().await?.into_iter().collect();
            keys.sort();
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Values => {
            for value in map.values().await? {
                println!("{}", value);
            }
        }
        Command::Entries => {
            let mut entries: Vec<(String, String)> = map.entries().await?.into_iter().collect();
            entries.sort();
            for (key, value) in entries {
                println!("{}\t{}", key, value);
            }
        }
        Command::Clear => map.clear().await?,
    }
    Ok(())
}

fn print_optional(value: Option<String>) {
    match value {
        Some(value) => println!("{}", value),
        None => println!("(nil)"),
    }
}
