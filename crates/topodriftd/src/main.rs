//! topodriftd - topology drift reconciliation daemon

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use recon_core::MemoryCache;
use topodriftd::{render, run, Args, SessionStore};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    info!("--- Starting topodriftd ---");

    let store = args
        .epoch
        .map(|_| SessionStore::new(Arc::new(MemoryCache::new())));

    match run(&args, store.as_ref()).await {
        Ok(report) => match render(&report, args.pretty) {
            Ok(rendered) => {
                println!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Failed to render report: {e:#}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Reconciliation failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
