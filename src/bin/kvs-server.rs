use std::net::SocketAddr;
use std::process::exit;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use kvs::{KvStore, KvsServer, Result, DEFAULT_PAYLOAD_LIMIT};

const DEFAULT_ADDR: &str = "127.0.0.1:4000";

#[derive(Parser)]
#[command(name = "kvs-server", version, about = "An in-memory key-value store server")]
struct Cli {
    /// Server listening address
    #[arg(long, env = "KVS_ADDR", default_value = DEFAULT_ADDR, value_name = "IP-PORT")]
    addr: SocketAddr,

    /// Number of worker threads (defaults to the number of CPUs)
    #[arg(long, env = "KVS_WORKERS", value_name = "N")]
    workers: Option<usize>,

    /// Largest accepted request body in bytes
    #[arg(long, env = "KVS_PAYLOAD_LIMIT", default_value_t = DEFAULT_PAYLOAD_LIMIT, value_name = "BYTES")]
    payload_limit: usize,
}

#[actix_web::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("kvs-server {}", env!("CARGO_PKG_VERSION"));
    info!("Listening on {}", cli.addr);

    let mut server = KvsServer::new(KvStore::new()).payload_limit(cli.payload_limit);
    if let Some(workers) = cli.workers {
        server = server.workers(workers);
    }
    server.run(cli.addr).await?;

    info!("Server stopped");
    Ok(())
}
