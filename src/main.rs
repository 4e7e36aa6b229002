use std::sync::Arc;

use anyhow::Context;
use blog_store::api::HttpPostService;
use blog_store::cli::{self, Cli};
use blog_store::config::Config;
use blog_store::logging::init_tracing;
use blog_store::store::{CancelToken, PostStore};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
        config.validate().context("Invalid --base-url")?;
    }

    let service = HttpPostService::new(&config.api).context("Failed to create HTTP client")?;
    tracing::debug!(base_url = %service.base_url(), "Using post service");
    let store = PostStore::new(Arc::new(service));

    let cancel = CancelToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling in-flight requests");
            on_signal.cancel();
        }
    });

    let state = cli::execute(&store, args.command, &cancel)
        .await
        .with_context(|| format!("Request to {} failed", config.api.base_url))?;

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
