use std::net::SocketAddr;

use clap::Parser;
use server::Server;
use store::MemoryLedger;
use tracing::{error, info};

mod error;
mod net;
mod server;
mod store;
mod transactions;
mod wallet;

#[derive(Parser, Debug)]
#[clap(author, version, about = "In-memory wallet ledger served over HTTP", long_about = None)]
struct Args {
  /// Address to listen on
  #[clap(short, long, default_value = "127.0.0.1:1234")]
  address: SocketAddr,

  /// Start without the demo wallets and history
  #[clap(long)]
  empty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wallet_ledger=info")),
    )
    .with_target(true)
    .init();

  let ledger = if args.empty {
    MemoryLedger::new()
  } else {
    MemoryLedger::seeded()
  };
  info!(seeded = !args.empty, "ledger ready");

  let server = Server::new(ledger);
  if let Err(err) = server.run(args.address).await {
    error!(address = %args.address, error = %err, "failed to start server");
    return Err(anyhow::Error::new(err).context(format!("cannot listen on {}", args.address)));
  }

  Ok(())
}
