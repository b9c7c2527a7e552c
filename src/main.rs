use anyhow::Context;

use courier::client::HttpClient;
use courier::config::Config;
use courier::http::request::{Method, Request, RequestBuilder};
use courier::net::ConnectionManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let target = url::Url::parse(&cfg.url).context("invalid target URL")?;
    let host = target
        .host_str()
        .context("target URL missing host")?
        .to_string();
    let port = target.port().unwrap_or(80).to_string();

    let request = build_request(&cfg, &target, &host, &port)?;

    let mut client = HttpClient::new(ConnectionManager::new());

    tokio::select! {
        outcome = client.process_request(&request, &host, &port) => {
            match outcome {
                Some(response) => println!("{response}"),
                None => anyhow::bail!("request to {host}:{port} failed"),
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn build_request(cfg: &Config, target: &url::Url, host: &str, port: &str) -> anyhow::Result<Request> {
    let method = Method::from_str(&cfg.method)
        .with_context(|| format!("unsupported HTTP method {:?}", cfg.method))?;

    let path = if target.path().is_empty() {
        "/"
    } else {
        target.path()
    };

    let mut builder = RequestBuilder::new()
        .method(method)
        .uri(path)
        .header("Host", format!("{host}:{port}"))
        .header("Connection", "keep-alive");
    if let Some(body) = &cfg.body {
        builder = builder.body(body.clone().into_bytes());
    }

    builder.build().map_err(|e| anyhow::anyhow!(e))
}
