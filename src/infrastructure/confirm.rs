//! Confirmation gate implementations

use std::io::{BufRead, Write};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::api_key::{ApiKeyId, KeyAction};
use crate::domain::ConfirmationGate;

/// Answers every confirmation the same way (`--yes`, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub bool);

#[async_trait]
impl ConfirmationGate for FixedConfirmation {
    async fn confirm(&self, _action: KeyAction, _id: &ApiKeyId, _prompt: &str) -> bool {
        self.0
    }
}

/// Asks on the terminal; anything but `y`/`yes` declines
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmation;

impl TerminalConfirmation {
    pub fn new() -> Self {
        Self
    }
}

/// Whether a typed answer counts as consent
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "s" | "si" | "sí")
}

#[async_trait]
impl ConfirmationGate for TerminalConfirmation {
    async fn confirm(&self, _action: KeyAction, id: &ApiKeyId, prompt: &str) -> bool {
        let question = format!("{} ({}) [y/N] ", prompt, id);

        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            write!(stderr, "{}", question)?;
            stderr.flush()?;

            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok::<_, std::io::Error>(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(e)) => {
                warn!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                warn!("Confirmation prompt task failed: {}", e);
                false
            }
        }
    }
}
