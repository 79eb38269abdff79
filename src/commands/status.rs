//! Status and catalogue commands.

use fieldstore::storage::open_cache;
use fieldstore::{FieldstoreConfig, Record, ResourceKind};

/// Status command.
///
/// Reads the cache directly so that nothing is seeded or written.
pub fn cmd_status(config: &FieldstoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let cache = open_cache(config.cache_backend, &config.data_dir)?;
    let token = fieldstore::remote::resolve_token(config.auth_token.as_ref(), cache.as_ref());

    println!("Fieldstore Status");
    println!("=================");
    println!("API base: {}", config.api_base);
    println!("Data directory: {}", config.data_dir.display());
    println!("Cache backend: {}", config.cache_backend);
    println!(
        "HTTP timeouts: {}ms request, {}ms connect",
        config.http.timeout_ms, config.http.connect_timeout_ms
    );
    println!("Auth token: {}", if token.is_some() { "present" } else { "none" });
    println!();

    let stored = match cache.keys() {
        Ok(keys) => Some(keys),
        Err(e) => {
            tracing::warn!(backend = cache.name(), error = %e, "Failed to list cache keys");
            None
        },
    };

    println!("{:<14} {:>8} {:>8}  cache key", "resource", "cached", "pending");
    for kind in ResourceKind::all() {
        let spec = kind.spec();
        if stored
            .as_ref()
            .is_some_and(|keys| !keys.iter().any(|key| key == spec.cache_key))
        {
            println!("{:<14} {:>8} {:>8}  {}", spec.name, "-", "-", spec.cache_key);
            continue;
        }
        let (cached, pending) = match cache.load(spec.cache_key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(items) => {
                    let pending = items.iter().filter(|r| r.is_pending()).count();
                    (items.len().to_string(), pending.to_string())
                },
                Err(_) => ("corrupt".to_string(), "-".to_string()),
            },
            Ok(None) => ("-".to_string(), "-".to_string()),
            Err(e) => {
                tracing::warn!(resource = spec.name, error = %e, "Failed to read cache");
                ("error".to_string(), "-".to_string())
            },
        };
        println!("{:<14} {cached:>8} {pending:>8}  {}", spec.name, spec.cache_key);
    }

    let others: Vec<&str> = stored
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|key| ResourceKind::all().iter().all(|kind| kind.spec().cache_key != *key))
        .collect();
    if !others.is_empty() {
        println!();
        println!("Other cache entries: {}", others.join(", "));
    }

    Ok(())
}

/// Resources command: prints the catalogue.
pub fn cmd_resources(config: &FieldstoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{:<14} {:<8} {:<36} search fields", "resource", "per page", "endpoint");
    for kind in ResourceKind::all() {
        let spec = kind.spec();
        println!(
            "{:<14} {:<8} {:<36} {}",
            spec.name,
            config.items_per_page(*kind),
            config.endpoint(*kind),
            spec.search_fields.join(", ")
        );
    }
    Ok(())
}
