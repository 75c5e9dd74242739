//! One-shot liveness probe for the site container.
//!
//! Issues a single `GET /health` against the local server and maps the
//! response onto a process exit code: 0 for a success status, 1 for
//! anything else (non-2xx, bad `PORT`, network failure). Deliberately
//! silent and retry-free: the only consumer is the orchestrator's health
//! check, which owns the retry cadence.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

const PORT_ENV: &str = "PORT";
const DEFAULT_PORT: u16 = 4321;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(
    name = "healthcheck",
    version,
    about = "Probe the local /health endpoint and exit 0 if healthy"
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    let healthy = match parse_port(std::env::var(PORT_ENV).ok().as_deref()) {
        Ok(port) => probe(port).await.unwrap_or(false),
        Err(_) => false,
    };
    std::process::exit(if healthy { 0 } else { 1 });
}

/// Port to probe: `PORT` env var when set, the server default otherwise.
fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("invalid {PORT_ENV} value {value:?}")),
        None => Ok(DEFAULT_PORT),
    }
}

/// One GET against the local liveness endpoint; true iff 2xx.
async fn probe(port: u16) -> Result<bool> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")?;
    let response = client
        .get(format!("http://127.0.0.1:{port}/health"))
        .send()
        .await
        .context("request /health")?;
    Ok(response.status().is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Minimal HTTP listener answering one request with a fixed response.
    async fn stub_server(response: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        port
    }

    #[tokio::test]
    async fn healthy_endpoint_probes_ok() {
        let port = stub_server(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 17\r\n\r\n{\"healthy\": true}",
        )
        .await;

        assert!(probe(port).await.expect("probe"));
    }

    #[tokio::test]
    async fn server_error_probes_unhealthy() {
        let port = stub_server(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\n\r\n",
        )
        .await;

        assert!(!probe(port).await.expect("probe"));
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        // Bind to grab a free port, then drop the listener before probing.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
            listener.local_addr().expect("local addr").port()
        };

        assert!(probe(port).await.is_err());
    }

    #[test]
    fn port_defaults_when_env_is_unset() {
        assert_eq!(parse_port(None).expect("default"), DEFAULT_PORT);
    }

    #[test]
    fn port_is_read_from_env_value() {
        assert_eq!(parse_port(Some("8080")).expect("parse"), 8080);
    }

    #[test]
    fn garbage_port_is_an_error() {
        assert!(parse_port(Some("not-a-port")).is_err());
        assert!(parse_port(Some("99999")).is_err());
    }
}
