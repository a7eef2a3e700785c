use client::clients::RepertoireClient;
use client::config::Config;
use client::dispatch::Dispatcher;
use client::page::{RepertoirePage, TrainingPage};
use client::terminal;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so they don't interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let page = std::env::args().nth(1).unwrap_or_else(|| "repertoire".to_string());

    let client = RepertoireClient::new(&config)?;
    tracing::info!(server = %config.server_url, %page, "Starting client");

    let (dispatcher, inbound) = Dispatcher::new(client);

    match page.as_str() {
        "repertoire" => terminal::run(&mut RepertoirePage::new(), &dispatcher, inbound).await?,
        "training" => terminal::run(&mut TrainingPage::new(), &dispatcher, inbound).await?,
        other => anyhow::bail!("Unknown page '{other}', expected 'repertoire' or 'training'"),
    }

    Ok(())
}
