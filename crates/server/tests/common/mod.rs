use anyhow::Context as _;
use std::process::{Command, Stdio};
use std::time::Duration;

use docdocdoc_test_support::KillOnDrop;

pub use docdocdoc_test_support::MockUpstream;

#[allow(dead_code)]
/// Running `docdocdoc-mcp --transport http`; killed on drop.
pub struct SpawnedServer {
    pub base_url: String,
    _child: KillOnDrop,
}

/// Spawn the server binary over HTTP, pointed at `upstream_base`, and wait for `/health`.
///
/// `api_key: None` starts it unconfigured.
#[allow(dead_code)]
pub async fn spawn_server(
    upstream_base: &str,
    api_key: Option<&str>,
    extra_args: &[&str],
) -> anyhow::Result<SpawnedServer> {
    let port = docdocdoc_test_support::pick_unused_port()?;
    let bin = env!("CARGO_BIN_EXE_docdocdoc-mcp");

    let mut cmd = Command::new(bin);
    cmd.arg("--transport")
        .arg("http")
        .arg("--bind")
        .arg(format!("127.0.0.1:{port}"))
        .arg("--log-level")
        .arg("info")
        .args(extra_args)
        .env_remove("API_KEY")
        .env_remove("DOCDOCDOC_MCP_TRANSPORT")
        .env("BASE_URL", upstream_base)
        .stdin(Stdio::null());
    if let Some(key) = api_key {
        cmd.env("API_KEY", key);
    }
    let child = KillOnDrop(cmd.spawn().context("spawn docdocdoc-mcp")?);

    let base_url = format!("http://127.0.0.1:{port}");
    docdocdoc_test_support::wait_http_ok(&format!("{base_url}/health"), Duration::from_secs(20))
        .await?;

    Ok(SpawnedServer {
        base_url,
        _child: child,
    })
}
