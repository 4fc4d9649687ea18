use ferry_data::Catalog;
use ferry_protocol::{BedrockClientbound, InboundPacket, JavaServerbound};
use ferry_translator::{Session, SessionSettings, TranslatorRegistry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Counters reported when a session task finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub translated: u64,
    pub dropped: u64,
}

/// The channel ends a transport uses to talk to one session task.
pub struct Connection {
    /// Decoded packets from either side, in arrival order.
    pub inbound: mpsc::UnboundedSender<InboundPacket>,
    /// Packets for the Bedrock client.
    pub upstream: mpsc::UnboundedReceiver<BedrockClientbound>,
    /// Packets for the Java server.
    pub downstream: mpsc::UnboundedReceiver<JavaServerbound>,
    pub task: JoinHandle<SessionStats>,
}

/// Start a session task. It runs until `inbound` is dropped, then drops the
/// session, which closes `upstream` and `downstream`.
pub fn spawn_connection(
    name: String,
    registry: Arc<TranslatorRegistry>,
    catalog: Arc<dyn Catalog>,
    settings: SessionSettings,
) -> Connection {
    // Channel: transport -> session task (inbound packets)
    let (in_tx, in_rx) = mpsc::unbounded_channel::<InboundPacket>();
    // Channels: session task -> transport writers
    let (up_tx, up_rx) = mpsc::unbounded_channel::<BedrockClientbound>();
    let (down_tx, down_rx) = mpsc::unbounded_channel::<JavaServerbound>();

    let session = Session::new(settings, catalog, up_tx, down_tx);
    let task = tokio::spawn(run_session(name, registry, session, in_rx));

    Connection {
        inbound: in_tx,
        upstream: up_rx,
        downstream: down_rx,
        task,
    }
}

/// Translate inbound packets one at a time, in the order they arrive.
pub async fn run_session(
    name: String,
    registry: Arc<TranslatorRegistry>,
    mut session: Session,
    mut inbound: mpsc::UnboundedReceiver<InboundPacket>,
) -> SessionStats {
    info!("Session {} started", name);
    let mut stats = SessionStats::default();

    while let Some(packet) = inbound.recv().await {
        match registry.dispatch(&mut session, &packet) {
            Ok(()) => stats.translated += 1,
            Err(e) => {
                debug!("Session {}: {}", name, e);
                stats.dropped += 1;
            }
        }
    }

    info!(
        "Session {} ended ({} translated, {} dropped)",
        name, stats.translated, stats.dropped
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferry_data::BuiltinCatalog;
    use ferry_protocol::{BedrockServerbound, JavaClientbound};

    fn connect(registry: TranslatorRegistry) -> Connection {
        spawn_connection(
            "test".into(),
            Arc::new(registry),
            Arc::new(BuiltinCatalog),
            SessionSettings::default(),
        )
    }

    #[tokio::test]
    async fn packets_are_translated_in_order() {
        let mut conn = connect(TranslatorRegistry::with_default_handlers());
        for value in [0.25, 0.0] {
            conn.inbound
                .send(InboundPacket::Java(JavaClientbound::GameEvent {
                    event: 7,
                    value,
                }))
                .unwrap();
        }
        drop(conn.inbound);

        let stats = conn.task.await.unwrap();
        assert_eq!(stats, SessionStats { translated: 2, dropped: 0 });

        let mut events = Vec::new();
        while let Some(packet) = conn.upstream.recv().await {
            if let BedrockClientbound::LevelEvent { event_id, .. } = packet {
                events.push(event_id);
            }
        }
        assert_eq!(events, vec![3001, 3003]);
    }

    #[tokio::test]
    async fn unregistered_packets_are_dropped() {
        let mut conn = connect(TranslatorRegistry::new());
        conn.inbound
            .send(InboundPacket::Bedrock(BedrockServerbound::ContainerClose {
                window_id: 1,
                server_initiated: false,
            }))
            .unwrap();
        drop(conn.inbound);

        let stats = conn.task.await.unwrap();
        assert_eq!(stats, SessionStats { translated: 0, dropped: 1 });
        assert!(conn.downstream.recv().await.is_none());
    }
}
