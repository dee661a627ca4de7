use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::app::{AppContext, Result, SkimmerError};
use crate::bridge::{BridgeSession, LivenessMonitor, Relay};
use crate::domain::{OrchestratorResponse, PageMessage, RelayMessage};
use crate::extract::PageSnapshot;

/// Extract one URL end to end and print the relay's reply.
pub async fn extract_url(ctx: &AppContext, url: &str, pretty: bool) -> Result<()> {
    let handle = Arc::new(ctx.launch_orchestrator().await?);
    let (tx, mut rx) = mpsc::channel(1);
    let relay = Relay::new(handle.clone(), BridgeSession::new(), tx);

    relay.extract(url.to_string()).await;
    drop(relay);

    if let Some(reply) = rx.recv().await {
        print_json(&reply, pretty)?;
    }

    handle.shutdown().await;
    Ok(())
}

/// Serve page messages from stdin until it closes.
pub async fn run_bridge(ctx: &AppContext) -> Result<()> {
    let handle = Arc::new(ctx.launch_orchestrator().await?);
    let capacity = ctx.config.bridge.queue_capacity.max(1);
    let (inbox_tx, inbox_rx) = mpsc::channel(capacity);
    let (outbox_tx, mut outbox_rx) = mpsc::channel::<RelayMessage>(capacity);

    let session = BridgeSession::new();
    let monitor = LivenessMonitor::new(
        handle.clone(),
        session.clone(),
        outbox_tx.clone(),
        ctx.config.bridge.liveness_interval(),
    )
    .spawn();
    let relay = tokio::spawn(Relay::new(handle.clone(), session, outbox_tx).run(inbox_rx));

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(message) = outbox_rx.recv().await {
            let line = serde_json::to_string(&message)?;
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<(), SkimmerError>(())
    });

    info!("Bridge ready");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(message) = decode_line(&line) {
            if inbox_tx.send(message).await.is_err() {
                break;
            }
        }
    }

    // Let in-flight extractions reply before the writer drains.
    drop(inbox_tx);
    monitor.abort();
    let _ = relay.await;
    writer
        .await
        .map_err(|e| SkimmerError::Other(format!("Writer task failed: {}", e)))??;

    handle.shutdown().await;
    Ok(())
}

/// Run the pipeline over a saved HTML file.
pub fn parse_file(ctx: &AppContext, path: &Path, url: &str) -> Result<OrchestratorResponse> {
    let html = std::fs::read_to_string(path)?;
    let snapshot = PageSnapshot::from_html(html, url);
    Ok(ctx.extractor.extract(&snapshot).into())
}

pub fn print_parse(ctx: &AppContext, path: &Path, url: &str, pretty: bool) -> Result<()> {
    let response = parse_file(ctx, path, url)?;
    print_json(&response, pretty)
}

fn decode_line(line: &str) -> Option<PageMessage> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(message) => Some(message),
        Err(e) => {
            warn!("Ignoring unrecognised page message: {}", e);
            None
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
