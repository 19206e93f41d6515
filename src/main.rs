use std::process::ExitCode;

use clap::Parser;

use crate::cli::Args;
use crate::config::NotifierConfig;
use crate::watcher::docker::DockerRuntime;
use crate::watcher::notifier::Notifier;
use crate::watcher::webhook::WebhookClient;

mod cli;
mod config;
mod signals;
mod watcher;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenv::dotenv();

    let args = Args::parse();
    let config = match NotifierConfig::try_from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            // The logger is not configured yet
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    config.init_logger();
    log::debug!("Log level set to {:?}", config.log_level);
    log::info!("WEBHOOK_URL is set to {}", config.webhook_url);

    signals::handle_shutdown();

    log::debug!("Initializing Docker client");
    let runtime = match DockerRuntime::connect().await {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("Unable to reach the Docker daemon: {err}");
            return ExitCode::FAILURE;
        }
    };

    let sink = WebhookClient::new(config.webhook_url.clone());
    let notifier = Notifier::new(config, runtime, sink);

    // The subscription borrows the runtime owned by the notifier
    let events = notifier.runtime().events();
    signals::notify_ready();

    match notifier.run(events).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Stopped listening for Docker events: {err}");
            ExitCode::FAILURE
        }
    }
}
