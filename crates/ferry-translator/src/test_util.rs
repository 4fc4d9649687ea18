use crate::{Session, SessionSettings};
use ferry_data::BuiltinCatalog;
use ferry_protocol::{BedrockClientbound, JavaServerbound};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A session wired to in-memory channels so tests can inspect what was sent.
pub struct TestSession {
    pub session: Session,
    upstream: mpsc::UnboundedReceiver<BedrockClientbound>,
    downstream: mpsc::UnboundedReceiver<JavaServerbound>,
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_settings(SessionSettings::default())
    }

    pub fn with_settings(settings: SessionSettings) -> Self {
        let (up_tx, upstream) = mpsc::unbounded_channel();
        let (down_tx, downstream) = mpsc::unbounded_channel();
        let session = Session::new(settings, Arc::new(BuiltinCatalog), up_tx, down_tx);
        Self {
            session,
            upstream,
            downstream,
        }
    }

    pub fn drain_upstream(&mut self) -> Vec<BedrockClientbound> {
        let mut sent = Vec::new();
        while let Ok(packet) = self.upstream.try_recv() {
            sent.push(packet);
        }
        sent
    }

    pub fn drain_downstream(&mut self) -> Vec<JavaServerbound> {
        let mut sent = Vec::new();
        while let Ok(packet) = self.downstream.try_recv() {
            sent.push(packet);
        }
        sent
    }
}
