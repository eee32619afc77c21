use clap::Parser;

use scoresheet::cli::{self, Cli};
use scoresheet::core::init_logging;

fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli::run(cli)
}
