mod config;
mod connection;
mod replay;

use config::ProxyConfig;
use ferry_data::{BuiltinCatalog, Catalog};
use ferry_translator::TranslatorRegistry;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ProxyConfig::load(Path::new("config/ferry.toml"))?;

    // Logs go to stderr; stdout carries the replayed packets.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Ferry...");
    info!(
        "Config loaded: locale={}, max_pending_teleports={}, teleport_resend_after={}",
        config.default_locale, config.max_pending_teleports, config.teleport_resend_after
    );

    let captures: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if captures.is_empty() {
        anyhow::bail!("usage: ferry <capture.jsonl>...");
    }

    let registry = Arc::new(TranslatorRegistry::with_default_handlers());
    let catalog: Arc<dyn Catalog> = Arc::new(BuiltinCatalog);
    info!("{} translators registered", registry.len());

    // Each capture is an independent session; run them side by side.
    let tasks: Vec<_> = captures
        .into_iter()
        .map(|path| {
            let registry = registry.clone();
            let catalog = catalog.clone();
            let settings = config.session_settings();
            tokio::spawn(async move {
                let output = replay::replay_file(&path, registry, catalog, settings).await;
                (path, output)
            })
        })
        .collect();

    let mut failed = 0;
    let mut stdout = std::io::stdout().lock();
    for task in tasks {
        let (path, output) = task.await?;
        match output {
            Ok(output) => {
                for packet in &output.outbound {
                    writeln!(stdout, "{}", serde_json::to_string(packet)?)?;
                }
            }
            Err(e) => {
                error!("Replay of {} failed: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} capture(s) failed", failed);
    }
    Ok(())
}
