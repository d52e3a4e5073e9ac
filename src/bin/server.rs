// src/bin/server.rs
use std::{process::ExitCode, sync::Arc};

use member_scrape::{
    api,
    config::{AppOptions, RoleTable, consts::DEFAULT_LOG_FILTER},
    core::HttpFetcher,
    log,
    normalize::Normalizer,
    service::DirectoryService,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let config = std::env::var_os("MEMBER_SCRAPE_CONFIG").map(std::path::PathBuf::from);
    let opts = match AppOptions::load(config.as_deref()) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::init(DEFAULT_LOG_FILTER, opts.log_file.as_deref());
    info!("Starting {} v{}", member_scrape::config::consts::SERVICE_NAME, env!("CARGO_PKG_VERSION"));

    let roles = match RoleTable::load_or_builtin(opts.scrape.member_types.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let normalizer = Normalizer::new(opts.scrape.base(), roles);
    let fetcher = Arc::new(HttpFetcher::new(&opts.scrape));
    let service = Arc::new(DirectoryService::new(opts.scrape.clone(), fetcher.clone(), normalizer));

    let served = api::serve(&opts.server.addr(), service).await;
    // The blocking reqwest client may not be dropped on an async worker.
    let _ = tokio::task::spawn_blocking(move || drop(fetcher)).await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {e}");
            ExitCode::FAILURE
        }
    }
}
