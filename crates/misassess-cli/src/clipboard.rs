//! Clipboard integration.
//!
//! The summary is placed on the system clipboard by piping it to a platform
//! command. A write is a single attempt; failures are reported, never retried.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use misassess_core::config::AssessConfig;

use crate::status::StatusLine;

/// Status shown after a successful copy.
pub const COPIED_STATUS: &str = "Copied.";

/// Status shown after a failed copy.
pub const COPY_FAILED_STATUS: &str = "Copy failed (clipboard unavailable).";

/// Errors from a clipboard write.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The configured clipboard command is blank.
    #[error("clipboard command is empty")]
    EmptyCommand,

    /// The clipboard command could not be started or fed.
    #[error("failed to run {command}: {message}")]
    Io { command: String, message: String },

    /// The clipboard command exited unsuccessfully.
    #[error("{command} exited with {status}")]
    Failed { command: String, status: String },

    /// The clipboard command did not finish in time.
    #[error("{command} timed out after {timeout_ms}ms")]
    Timeout { command: String, timeout_ms: u64 },
}

/// Something that can receive text for the clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Write `text` to the clipboard.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard backed by an external command that reads the text from stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandClipboard {
    /// Build from a whitespace-separated command line, e.g. `xclip -selection clipboard`.
    pub fn new(command_line: &str, timeout: Duration) -> Result<Self, ClipboardError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ClipboardError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            timeout,
        })
    }

    /// Use the configured command, or the usual command for this platform.
    pub fn from_config(config: &AssessConfig) -> Result<Self, ClipboardError> {
        let timeout = Duration::from_millis(config.clipboard_timeout_ms);
        match &config.clipboard_command {
            Some(command) => Self::new(command, timeout),
            None => Self::new(default_command(), timeout),
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn default_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy"
    } else if cfg!(windows) {
        "clip"
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        "wl-copy"
    } else {
        "xclip -selection clipboard"
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let command = self.command_line();
        let io_err = |e: std::io::Error| ClipboardError::Io {
            command: command.clone(),
            message: e.to_string(),
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(io_err)?;

        let run = async {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(text.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            child.wait().await
        };

        let status = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| ClipboardError::Timeout {
                command: command.clone(),
                timeout_ms: self.timeout.as_millis() as u64,
            })?
            .map_err(io_err)?;

        if !status.success() {
            return Err(ClipboardError::Failed {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// How long each copy outcome stays on the status line.
#[derive(Debug, Clone, Copy)]
pub struct CopyStatusDurations {
    pub copied: Duration,
    pub failed: Duration,
}

impl CopyStatusDurations {
    pub fn from_config(config: &AssessConfig) -> Self {
        Self {
            copied: Duration::from_millis(config.copied_status_ms),
            failed: Duration::from_millis(config.copy_failed_status_ms),
        }
    }
}

/// Copy `text` once and report the outcome on `status`. Returns whether it worked.
pub async fn copy_to_clipboard(
    clipboard: &dyn Clipboard,
    text: &str,
    status: &StatusLine,
    durations: CopyStatusDurations,
) -> bool {
    match clipboard.write_text(text).await {
        Ok(()) => {
            status.set_transient(COPIED_STATUS, durations.copied);
            true
        }
        Err(e) => {
            tracing::warn!("clipboard write failed: {e}");
            status.set_transient(COPY_FAILED_STATUS, durations.failed);
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockClipboard;
    use super::*;

    fn durations() -> CopyStatusDurations {
        CopyStatusDurations::from_config(&AssessConfig::default())
    }

    #[test]
    fn parses_command_line() {
        let clip = CommandClipboard::new("xclip -selection clipboard", Duration::from_secs(1)).unwrap();
        assert_eq!(clip.program, "xclip");
        assert_eq!(clip.args, vec!["-selection", "clipboard"]);
        assert_eq!(clip.command_line(), "xclip -selection clipboard");
        assert!(matches!(
            CommandClipboard::new("   ", Duration::from_secs(1)),
            Err(ClipboardError::EmptyCommand)
        ));
    }

    #[test]
    fn configured_command_wins() {
        let config = AssessConfig {
            clipboard_command: Some("tee /dev/null".into()),
            ..Default::default()
        };
        let clip = CommandClipboard::from_config(&config).unwrap();
        assert_eq!(clip.program, "tee");
    }

    #[tokio::test(start_paused = true)]
    async fn successful_copy_sets_copied_status() {
        let clipboard = MockClipboard::default();
        let status = StatusLine::new();
        assert!(copy_to_clipboard(&clipboard, "summary", &status, durations()).await);
        assert_eq!(clipboard.writes(), vec!["summary"]);
        assert_eq!(status.current().as_deref(), Some(COPIED_STATUS));

        tokio::time::sleep(Duration::from_millis(1501)).await;
        assert_eq!(status.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_copy_is_not_fatal() {
        let clipboard = MockClipboard::failing();
        let status = StatusLine::new();
        assert!(!copy_to_clipboard(&clipboard, "summary", &status, durations()).await);
        assert_eq!(status.current().as_deref(), Some(COPY_FAILED_STATUS));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(status.current().as_deref(), Some(COPY_FAILED_STATUS));
        tokio::time::sleep(Duration::from_millis(501)).await;
        assert_eq!(status.current(), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_reports_io_error() {
        let clip = CommandClipboard::new("misassess-no-such-clipboard-tool", Duration::from_secs(1)).unwrap();
        let err = clip.write_text("x").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Io { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_receives_text() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clip.txt");
        let clip = CommandClipboard::new(&format!("tee {}", out.display()), Duration::from_secs(5)).unwrap();
        clip.write_text("hello clipboard").await.unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "hello clipboard");
    }
}
