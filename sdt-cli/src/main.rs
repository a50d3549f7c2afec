//! Snow drift CLI - seasonal snow drift transport and fence sizing.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sdt-cli",
    version,
    about = "Snow drift transport toolkit (Tabler methodology)"
)]
struct Cli {
    #[command(subcommand)]
    command: sdt_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    sdt_cmd::run(cli.command).await
}
