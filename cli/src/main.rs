use std::rc::Rc;

use clap::Parser;
use client::LibraryClient;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod navigator;
mod storage;
mod transport;

use config::Cli;
use navigator::LoginHint;
use storage::FileStorage;
use transport::ReqwestTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let storage = match &cli.config.session_file {
        Some(path) => FileStorage::new(path.clone()),
        None => FileStorage::in_home_dir()?,
    };
    info!(config = ?cli.config, session_file = %storage.path().display(), "Starting library cli");

    let client = LibraryClient::new(
        ReqwestTransport::new(cli.config.endpoint.clone()),
        Rc::new(storage),
        Rc::new(LoginHint),
    );
    commands::run(&client, cli.command).await
}
