//! Shikimori command line client
//!
//! Thin front end over the API, OAuth2 and sign-in crates:
//! 1. Loads the TOML config (tokens and secrets from env or files)
//! 2. Runs one command against the configured site
//! 3. Prints the JSON response on stdout; logs go to stderr

mod cli;
mod config;

use anyhow::{Context, Result};
use serde::Serialize;
use shikimori_strategy::{ShikimoriStrategy, Strategy};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Args, Command, USAGE};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // JSON logs on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::parse(&raw) {
        Ok(args) => args,
        Err(msg) => anyhow::bail!("{msg}\n\n{USAGE}"),
    };

    let config_path = Config::resolve_path(args.config.as_deref());
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    info!(
        site = %config.site.url,
        app_name = %config.site.app_name,
        authenticated = config.auth.access_token.is_some(),
        proxied = config.proxy.is_some(),
        "configuration loaded"
    );

    run(args.command, &config).await
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Whoami => {
            let client = config.api_client().context("failed to build API client")?;
            let user = client
                .v1()
                .whoami(())
                .await
                .context("whoami request failed")?;
            print_json(&user)
        }
        Command::Get { path, query } => {
            let client = config.api_client().context("failed to build API client")?;
            let v1 = client.v1();
            let url = shikimori_api::uri::join(v1.base_url(), &[path.as_str()])
                .with_context(|| format!("invalid API path: {path}"))?;
            let body = v1
                .rest()
                .get(url, query)
                .await
                .with_context(|| format!("GET {path} failed"))?;
            print_json(&body)
        }
        Command::AuthorizeUrl => {
            let strategy = strategy(config)?;
            let redirect = strategy.authorize()?;
            info!(strategy = strategy.name(), "authorization URL issued");
            print_json(&serde_json::json!({
                "url": redirect.url,
                "state": redirect.state,
            }))
        }
        Command::Token { code } => {
            let strategy = strategy(config)?;
            let token = strategy
                .client()
                .exchange_code(&code, None)
                .await
                .context("code exchange failed")?;
            print_json(&token)
        }
        Command::Refresh => {
            let refresh = config.auth.refresh_token.as_ref().context(
                "no refresh token: set SHIKIMORI_REFRESH_TOKEN or auth.refresh_token_file",
            )?;
            let strategy = strategy(config)?;
            let token = strategy
                .client()
                .refresh_token(refresh.expose_str())
                .await
                .context("token refresh failed")?;
            print_json(&token)
        }
    }
}

fn strategy(config: &Config) -> Result<ShikimoriStrategy> {
    let options = config
        .strategy_options()
        .context("OAuth application is not configured")?;
    Ok(ShikimoriStrategy::new(options)?)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
