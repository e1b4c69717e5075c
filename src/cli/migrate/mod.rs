//! Migrate command - applies the `api_keys` schema

use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{connect_pool, Migrator, PostgresConfig, PostgresMigrator};

#[derive(Args, Clone, Debug)]
pub struct MigrateArgs {
    /// Revert the last applied migration instead
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let url = config
        .database
        .url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("database.url is not configured (set APP__DATABASE__URL)"))?;

    let pool = connect_pool(&PostgresConfig::new(url)).await?;
    let migrator = PostgresMigrator::new(pool);

    if args.revert {
        match migrator.revert().await? {
            Some(version) => println!("Reverted migration {}", version),
            None => println!("No migrations to revert"),
        }
        return Ok(());
    }

    let applied = migrator.run().await?;
    let version = migrator.version().await?;
    info!("Migrations complete: applied={}, version={:?}", applied, version);

    println!(
        "Applied {} migration(s); schema version {}",
        applied,
        version.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
    );

    Ok(())
}
