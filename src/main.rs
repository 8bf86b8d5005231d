use clap::Parser;
use flight_delay_dashboard::cli::{run, Cli};
use flight_delay_dashboard::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
