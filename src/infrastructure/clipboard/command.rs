//! Clipboard backed by a platform copy tool

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::domain::{Clipboard, DomainError};

/// Pipes text into a copy command such as `pbcopy` or `xclip -selection clipboard`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parse a whitespace-separated command line
    pub fn from_command_line(command_line: &str) -> Result<Self, DomainError> {
        let mut parts = command_line.split_whitespace().map(str::to_string);

        let program = parts
            .next()
            .ok_or_else(|| DomainError::configuration("Clipboard command is empty"))?;

        Ok(Self::new(program, parts.collect()))
    }

    /// Default copy tool for the current platform
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", vec![])
        } else if cfg!(target_os = "windows") {
            Self::new("clip", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", vec![])
        } else {
            Self::new("xclip", vec!["-selection".to_string(), "clipboard".to_string()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), DomainError> {
        debug!("Copying to clipboard with {}", self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                DomainError::provider("clipboard", format!("Failed to start {}: {}", self.program, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DomainError::provider("clipboard", "Copy command has no stdin"))?;

        stdin
            .write_all(text.as_bytes())
            .await
            .map_err(|e| DomainError::provider("clipboard", format!("Write failed: {}", e)))?;
        drop(stdin);

        let status = child
            .wait()
            .await
            .map_err(|e| DomainError::provider("clipboard", format!("Wait failed: {}", e)))?;

        if !status.success() {
            return Err(DomainError::provider(
                "clipboard",
                format!("{} exited with {}", self.program, status),
            ));
        }

        Ok(())
    }
}
