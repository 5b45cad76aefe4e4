use ela_cli::{cli, NodeRpcClient};
use eyre::Result;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout().lock();
    let code = cli::run(
        std::env::args_os(),
        NodeRpcClient::new,
        &mut stdout,
        &mut io::stderr(),
    )
    .await;
    stdout.flush()?;

    std::process::exit(code)
}
