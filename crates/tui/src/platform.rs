use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::Command;
use vidbrief_core::SummaryDocument;

/// Desktop services the summary modal hands its actions to.
pub trait Platform {
    fn copy_text(&mut self, text: &str) -> Result<()>;

    fn open_url(&mut self, url: &str) -> Result<()>;

    /// Write `summary` as a PDF and return the written path.
    fn export_pdf(&mut self, summary: &SummaryDocument, title: Option<&str>) -> Result<PathBuf>;
}

/// The real desktop: system clipboard, browser launcher, files on disk.
pub struct SystemPlatform {
    export_dir: PathBuf,
    clipboard: Option<arboard::Clipboard>,
}

impl SystemPlatform {
    pub fn new(export_dir: PathBuf) -> Self {
        Self {
            export_dir,
            clipboard: None,
        }
    }
}

impl Platform for SystemPlatform {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        // Created on first use; X11/Wayland keep ownership while it lives.
        let clipboard = match &mut self.clipboard {
            Some(clipboard) => clipboard,
            slot => slot.insert(arboard::Clipboard::new().context("open system clipboard")?),
        };
        clipboard
            .set_text(text.to_string())
            .context("write to clipboard")
    }

    fn open_url(&mut self, url: &str) -> Result<()> {
        let mut command = browser_command(url)?;
        let status = command
            .status()
            .with_context(|| format!("launch browser for {url}"))?;
        if !status.success() {
            bail!("browser launcher exited with {status}");
        }
        Ok(())
    }

    fn export_pdf(&mut self, summary: &SummaryDocument, title: Option<&str>) -> Result<PathBuf> {
        vidbrief_export::export_pdf(summary, title, &self.export_dir)
            .context("export summary as PDF")
    }
}

#[allow(unreachable_code)]
fn browser_command(url: &str) -> Result<Command> {
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        return Ok(command);
    }

    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(url);
        return Ok(command);
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        return Ok(command);
    }

    bail!("opening links is unavailable on this platform")
}
