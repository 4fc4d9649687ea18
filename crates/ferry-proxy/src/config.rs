use ferry_translator::SessionSettings;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ProxyConfig {
    /// Language used for translated strings shown to Bedrock players.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_max_pending_teleports")]
    pub max_pending_teleports: usize,
    #[serde(default = "default_teleport_resend_after")]
    pub teleport_resend_after: u32,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_locale() -> String {
    ferry_data::DEFAULT_LOCALE.into()
}

fn default_max_pending_teleports() -> usize {
    16
}

fn default_teleport_resend_after() -> u32 {
    20
}

fn default_log_filter() -> String {
    "info".into()
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            max_pending_teleports: default_max_pending_teleports(),
            teleport_resend_after: default_teleport_resend_after(),
            log_filter: default_log_filter(),
        }
    }
}

impl ProxyConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: ProxyConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            locale: self.default_locale.clone(),
            max_pending_teleports: self.max_pending_teleports,
            teleport_resend_after: self.teleport_resend_after,
        }
    }
}
