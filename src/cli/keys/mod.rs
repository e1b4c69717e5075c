//! Keys command - the API key workflow from the terminal

mod table;

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::config::AppConfig;
use crate::domain::{ApiKeyId, Clipboard, ConfirmationGate};
use crate::infrastructure::api_key::{ActionOutcome, KeyLifecycleManager};
use crate::infrastructure::clipboard::CommandClipboard;
use crate::infrastructure::confirm::{FixedConfirmation, TerminalConfirmation};
use crate::infrastructure::diagnostics::TracingSink;
use crate::infrastructure::i18n::translate;
use crate::infrastructure::identity::BearerIdentityProvider;

#[derive(Args, Clone, Debug)]
pub struct KeysArgs {
    /// Access token of the operator (overrides `auth.access_token`)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: KeysCommand,
}

#[derive(Subcommand, Clone, Debug)]
pub enum KeysCommand {
    /// List your API keys, newest first
    List,

    /// Generate a new key; it is printed only once
    Generate {
        description: String,

        /// Also copy the key to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Revoke an active key
    Revoke {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Permanently delete a revoked key
    Delete {
        id: String,

        #[arg(long)]
        yes: bool,
    },
}

impl KeysCommand {
    fn skip_confirmation(&self) -> bool {
        match self {
            Self::Revoke { yes, .. } | Self::Delete { yes, .. } => *yes,
            Self::List | Self::Generate { .. } => false,
        }
    }
}

pub async fn run(args: KeysArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let mut manager = build_manager(&config, &args).await?;

    match args.command {
        KeysCommand::List => {
            let outcome = manager.list().await;
            expect_success(&manager, outcome)?;
            print_table(&manager);
        }
        KeysCommand::Generate { description, copy } => {
            match manager.generate(&description).await {
                ActionOutcome::Skipped => {
                    anyhow::bail!(translate(
                        manager.locale(),
                        "settings.apiKeys.errors.validationError"
                    ))
                }
                outcome => expect_success(&manager, outcome)?,
            }

            let key = manager.new_key().map(str::to_string).unwrap_or_default();
            println!("{}", key);
            eprintln!(
                "{}",
                translate(manager.locale(), "settings.apiKeys.saveKeyWarning")
            );

            if copy {
                let outcome = manager.copy_to_clipboard(&key).await;
                expect_success(&manager, outcome)?;
                eprintln!("{}", translate(manager.locale(), "settings.apiKeys.copied"));
            }

            manager.dismiss_new_key();
        }
        KeysCommand::Revoke { id, .. } => {
            let id = ApiKeyId::parse(&id)?;
            let outcome = manager.revoke(&id).await;
            report(&manager, outcome)?;
        }
        KeysCommand::Delete { id, .. } => {
            let id = ApiKeyId::parse(&id)?;
            let outcome = manager.delete(&id).await;
            report(&manager, outcome)?;
        }
    }

    Ok(())
}

async fn build_manager(config: &AppConfig, args: &KeysArgs) -> anyhow::Result<KeyLifecycleManager> {
    let jwt = crate::create_jwt_service(config)?;
    let token = args.token.clone().or_else(|| config.auth.access_token.clone());
    let identity = Arc::new(BearerIdentityProvider::new(token, jwt));

    let service = crate::create_api_key_service(config, identity).await?;

    let confirmation: Arc<dyn ConfirmationGate> = if args.command.skip_confirmation() {
        Arc::new(FixedConfirmation(true))
    } else {
        Arc::new(TerminalConfirmation::new())
    };

    let clipboard: Arc<dyn Clipboard> = match &config.console.clipboard_command {
        Some(command) => Arc::new(CommandClipboard::from_command_line(command)?),
        None => Arc::new(CommandClipboard::platform_default()),
    };

    Ok(KeyLifecycleManager::new(
        service,
        confirmation,
        clipboard,
        Arc::new(TracingSink),
        crate::console_locale(config),
    ))
}

fn expect_success(manager: &KeyLifecycleManager, outcome: ActionOutcome) -> anyhow::Result<()> {
    match (outcome, manager.error()) {
        (ActionOutcome::Failed, Some(message)) => anyhow::bail!(message),
        (ActionOutcome::Failed, None) => anyhow::bail!("Operation failed"),
        _ => Ok(()),
    }
}

/// Print the refreshed table after a confirmed action; a decline prints nothing
fn report(manager: &KeyLifecycleManager, outcome: ActionOutcome) -> anyhow::Result<()> {
    expect_success(manager, outcome)?;

    if outcome == ActionOutcome::Completed {
        print_table(manager);
    }

    Ok(())
}

fn print_table(manager: &KeyLifecycleManager) {
    println!("{}", table::render(&manager.rows(), manager.locale()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_confirmation() {
        let revoke = KeysCommand::Revoke {
            id: "x".to_string(),
            yes: true,
        };
        let delete = KeysCommand::Delete {
            id: "x".to_string(),
            yes: false,
        };

        assert!(revoke.skip_confirmation());
        assert!(!delete.skip_confirmation());
        assert!(!KeysCommand::List.skip_confirmation());
    }
}
