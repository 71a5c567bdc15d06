//! `stash restore` implementation

use miette::IntoDiagnostic;
use stash_cache::{Cache, CacheConfig, RestoreOptions, RestoreOutcome};

pub async fn run(
    paths: &[String],
    key: &str,
    restore_keys: &[String],
    lookup_only: bool,
    json: bool,
) -> miette::Result<()> {
    let config = CacheConfig::from_env();
    tracing::debug!(
        repository = %config.repository,
        ref_name = %config.ref_name,
        "resolved cache scope"
    );
    let cache = Cache::from_config(config);

    let outcome = cache
        .restore(paths, key, restore_keys, RestoreOptions { lookup_only })
        .await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).into_diagnostic()?
        );
        return Ok(());
    }

    match &outcome {
        RestoreOutcome::Hit {
            key,
            bytes: Some(bytes),
        } => println!("restored cache entry '{key}' ({bytes} bytes)"),
        RestoreOutcome::Hit { key, bytes: None } => println!("cache entry '{key}' exists"),
        RestoreOutcome::Miss => println!("cache miss"),
        RestoreOutcome::Degraded { detail } => println!("cache unavailable: {detail}"),
    }
    Ok(())
}
