//! Configuration types for the vidbrief terminal client.
//!
//! The TUI crate owns file I/O (locating, reading and writing
//! `vidbrief.toml`); this crate only defines the persisted shape and its
//! defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Canonical config file name.
pub const CONFIG_FILE_NAME: &str = "vidbrief.toml";

/// Top-level configuration (persisted as `vidbrief.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub export: ExportSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,
    /// Per-request timeout. Unset means requests run until the transport
    /// itself resolves or fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportSettings {
    /// Directory PDF exports are written to; the working directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl ExportSettings {
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Redraw/spinner interval of the event loop.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub mouse_capture: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            mouse_capture: true,
        }
    }
}

// ── Serde default functions ─────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_tick_ms() -> u64 {
    100
}
fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.url, "http://127.0.0.1:5000");
        assert_eq!(cfg.server.request_timeout_secs, None);
        assert_eq!(cfg.export.resolved_directory(), PathBuf::from("."));
        assert_eq!(cfg.ui.tick_ms, 100);
        assert!(cfg.ui.mouse_capture);
    }

    #[test]
    fn partial_toml_fills_missing_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
[server]
url = "https://vidbrief.example"
request_timeout_secs = 90
"#,
        )
        .expect("parse toml");

        assert_eq!(cfg.server.url, "https://vidbrief.example");
        assert_eq!(cfg.server.request_timeout_secs, Some(90));
        assert_eq!(cfg.ui.tick_ms, 100);
        assert!(cfg.export.directory.is_none());
    }

    #[test]
    fn export_directory_deserializes_from_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
[export]
directory = "/tmp/summaries"

[ui]
mouse_capture = false
"#,
        )
        .expect("parse export config");

        assert_eq!(
            cfg.export.resolved_directory(),
            PathBuf::from("/tmp/summaries")
        );
        assert!(!cfg.ui.mouse_capture);
    }

    #[test]
    fn unset_optionals_are_not_serialized() {
        let encoded = toml::to_string(&AppConfig::default()).expect("serialize config");
        assert!(encoded.contains("url = "));
        assert!(!encoded.contains("request_timeout_secs"));
        assert!(!encoded.contains("directory"));
    }
}
