use std::net::SocketAddr;
use std::process::exit;

use clap::{Parser, Subcommand};

use kvs::{KvsClient, Result};

const DEFAULT_ADDR: &str = "127.0.0.1:4000";

#[derive(Parser)]
#[command(name = "kvs-client", version, about = "A key-value store client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the value of a string key to a string
    Set {
        /// The key
        key: String,
        /// The value
        value: String,
        /// Server address
        #[arg(long, env = "KVS_ADDR", default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
        addr: SocketAddr,
    },
    /// Get the string value of a given string key
    Get {
        /// The key
        key: String,
        /// Server address
        #[arg(long, env = "KVS_ADDR", default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
        addr: SocketAddr,
    },
    /// List every key-value pair
    All {
        /// Server address
        #[arg(long, env = "KVS_ADDR", default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
        addr: SocketAddr,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Set { key, value, addr } => KvsClient::new(addr)?.set(key, value)?,
        Commands::Get { key, addr } => match KvsClient::new(addr)?.get(key)? {
            Some(value) => println!("{}", value),
            None => println!("Key not found"),
        },
        Commands::All { addr } => {
            for (key, value) in KvsClient::new(addr)?.all()? {
                println!("{}: {}", key, value);
            }
        }
    }
    Ok(())
}
