use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use docdocdoc_api::config::DEFAULT_BASE_URL;
use docdocdoc_api::{ApiSettings, DocDocDocApi};
use docdocdoc_mcp::serve::{serve_http, serve_stdio};
use docdocdoc_mcp::{DocDocDocServer, RequestCache, RequestTools, ServerError};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    Stdio,
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// MCP server for DocDocDoc document requests.
#[derive(Debug, Parser)]
#[command(name = "docdocdoc-mcp", version, about)]
struct Cli {
    /// DocDocDoc API key; without it every tool call returns a configuration error.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// DocDocDoc API base URL.
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "DOCDOCDOC_MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Stdio)]
    transport: TransportKind,

    /// Listen address for `--transport http`.
    #[arg(long, env = "DOCDOCDOC_MCP_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Log filter (`info`, `docdocdoc_api=debug`, ...).
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Do not remember fetched requests; every `request://` read becomes a miss.
    #[arg(long)]
    no_resource_cache: bool,
}

fn init_tracing(level: &str, format: LogFormat) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{level}'"))?;
    // stdout carries the stdio MCP stream.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format)?;

    let settings = ApiSettings::new(cli.api_key.clone(), cli.base_url.clone());
    if let Err(e) = settings.validate() {
        tracing::warn!(error = %e, "starting without credentials; tool calls will fail");
    }
    tracing::info!(base_url = %settings.base_url(), "DocDocDoc API configured");

    let api = DocDocDocApi::from_settings(settings).map_err(ServerError::from)?;
    let cache = (!cli.no_resource_cache).then(|| Arc::new(RequestCache::new()));
    let server = DocDocDocServer::new(RequestTools::new(api, cache));

    match cli.transport {
        TransportKind::Stdio => serve_stdio(server).await?,
        TransportKind::Http => serve_http(server, cli.bind).await?,
    }
    Ok(())
}
