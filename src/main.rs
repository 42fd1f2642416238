// src/main.rs

use doctask::errors::Result;
use doctask::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("doctask error: {err}");
        std::process::exit(err.exit_code());
    }
}

async fn run_main() -> Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
