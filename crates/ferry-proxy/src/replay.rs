use crate::connection::{spawn_connection, SessionStats};
use anyhow::Context;
use ferry_data::Catalog;
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaServerbound};
use ferry_translator::{SessionSettings, TranslatorRegistry};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// A packet the proxy sent, tagged with where it was going.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "to", content = "packet", rename_all = "lowercase")]
pub enum Outbound {
    Bedrock(BedrockClientbound),
    Java(JavaServerbound),
}

#[derive(Debug)]
pub struct ReplayOutput {
    pub stats: SessionStats,
    /// Everything sent to Bedrock, then everything sent to Java, each in send order.
    pub outbound: Vec<Outbound>,
}

/// Parse a capture: one JSON `InboundPacket` per line, blank lines skipped.
pub fn parse_capture(contents: &str) -> anyhow::Result<Vec<InboundPacket>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", index + 1))
        })
        .collect()
}

/// Feed a capture file through a fresh session and collect what it sent.
pub async fn replay_file(
    path: &Path,
    registry: Arc<TranslatorRegistry>,
    catalog: Arc<dyn Catalog>,
    settings: SessionSettings,
) -> anyhow::Result<ReplayOutput> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let packets =
        parse_capture(&contents).with_context(|| format!("parsing {}", path.display()))?;

    let mut conn = spawn_connection(path.display().to_string(), registry, catalog, settings);
    for packet in packets {
        conn.inbound
            .send(packet)
            .context("session task stopped early")?;
    }
    drop(conn.inbound);
    let stats = conn.task.await?;

    let mut outbound = Vec::new();
    while let Some(packet) = conn.upstream.recv().await {
        outbound.push(Outbound::Bedrock(packet));
    }
    while let Some(packet) = conn.downstream.recv().await {
        outbound.push(Outbound::Java(packet));
    }
    Ok(ReplayOutput { stats, outbound })
}
