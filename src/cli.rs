use clap::Parser;

/// Forward health and lifecycle transitions of labeled Docker containers to a webhook.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Endpoint that receives the notifications. Must start with `http`.
    #[arg(long, env = "WEBHOOK_URL")]
    pub webhook_url: Option<String>,

    /// One of DEBUG, INFO, WARNING, ERROR or CRITICAL.
    #[arg(long, env = "LOGLEVEL", default_value = "INFO")]
    pub log_level: String,
}
