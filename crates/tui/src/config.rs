use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use vidbrief_runtime_config::{AppConfig, CONFIG_FILE_NAME};

// ── File I/O ────────────────────────────────────────────────────────────

pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("vidbrief"))
}

/// `~/.config/vidbrief/vidbrief.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Explicit `path` or the default location.
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the config at `path`. A missing file yields the defaults; an
/// unreadable or invalid one is an error.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn request_timeout(config: &AppConfig) -> Option<Duration> {
    config
        .server
        .request_timeout_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

// ── `vidbrief config` ───────────────────────────────────────────────────

pub fn show_config(path: &Path) -> Result<()> {
    let config = load_config(path)?;
    println!("Config file: {}", path.display());
    println!();
    println!("[server]");
    println!("  url                  = {}", config.server.url);
    println!(
        "  request_timeout_secs = {}",
        config
            .server
            .request_timeout_secs
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );
    println!();
    println!("[export]");
    println!(
        "  directory = {}",
        config.export.resolved_directory().display()
    );
    println!();
    println!("[ui]");
    println!("  tick_ms       = {}", config.ui.tick_ms);
    println!("  mouse_capture = {}", config.ui.mouse_capture);
    Ok(())
}

/// Apply the given overrides to the file at `path`, then print it.
pub fn set_config(path: &Path, server: Option<String>, export_dir: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(path)?;
    apply_overrides(&mut config, server, export_dir);
    save_config(&config, path)?;
    println!("Configuration updated.");
    show_config(path)
}

pub fn apply_overrides(config: &mut AppConfig, server: Option<String>, export_dir: Option<PathBuf>) {
    if let Some(url) = server {
        config.server.url = url;
    }
    if let Some(dir) = export_dir {
        config.export.directory = Some(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.url, "http://127.0.0.1:5000");
        assert_eq!(request_timeout(&config), None);
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = AppConfig::default();
        apply_overrides(
            &mut config,
            Some("https://vidbrief.example".to_string()),
            Some(PathBuf::from("/tmp/pdfs")),
        );
        config.server.request_timeout_secs = Some(30);
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.server.url, "https://vidbrief.example");
        assert_eq!(loaded.export.directory, Some(PathBuf::from("/tmp/pdfs")));
        assert_eq!(request_timeout(&loaded), Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server\nurl = ").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn zero_timeout_means_none() {
        let mut config = AppConfig::default();
        config.server.request_timeout_secs = Some(0);
        assert_eq!(request_timeout(&config), None);
    }

    #[test]
    fn explicit_path_wins() {
        let path = PathBuf::from("/tmp/custom.toml");
        assert_eq!(resolve_config_path(Some(&path)).unwrap(), path);
    }
}
