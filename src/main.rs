use anyhow::Result;
use graph_relay::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
