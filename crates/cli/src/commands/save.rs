//! `stash save` implementation

use miette::IntoDiagnostic;
use stash_cache::{Cache, CacheConfig, SaveOutcome};

pub async fn run(paths: &[String], key: &str, json: bool) -> miette::Result<()> {
    let config = CacheConfig::from_env();
    tracing::debug!(
        repository = %config.repository,
        ref_name = %config.ref_name,
        "resolved cache scope"
    );
    let cache = Cache::from_config(config);

    let outcome = cache.save(paths, key).await?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).into_diagnostic()?
        );
        return Ok(());
    }

    match &outcome {
        SaveOutcome::Saved { key, bytes } => println!("saved cache entry '{key}' ({bytes} bytes)"),
        SaveOutcome::Skipped => println!("save skipped (no cache configured)"),
        SaveOutcome::Degraded { detail } => println!("save failed: {detail}"),
    }
    Ok(())
}
