//! Command handlers module.
//!
//! - `resource.rs`: per-resource commands (list, create, update, delete,
//!   retry, sync)
//! - `status.rs`: configuration and cache overview, resource catalogue

mod resource;
mod status;

pub use resource::{cmd_create, cmd_delete, cmd_list, cmd_retry, cmd_sync, cmd_update};
pub use status::{cmd_resources, cmd_status};

use fieldstore::remote::{build_http_client, resolve_token};
use fieldstore::storage::{CacheBackend, open_cache};
use fieldstore::{FieldstoreConfig, HttpCollection, RemoteCollection, ResourceKind, ResourceStore};
use serde_json::{Map, Value};

/// Store type used by every command.
pub type CliStore = ResourceStore<HttpCollection, Box<dyn CacheBackend>>;

/// Opens the store for `kind` without touching the network.
pub fn open_store(
    config: &FieldstoreConfig,
    kind: ResourceKind,
) -> Result<CliStore, Box<dyn std::error::Error>> {
    let cache = open_cache(config.cache_backend, &config.data_dir)?;
    let token = resolve_token(config.auth_token.as_ref(), cache.as_ref());
    let remote = HttpCollection::with_client(build_http_client(config.http), config.endpoint(kind))
        .with_token(token);
    tracing::debug!(
        resource = kind.as_str(),
        endpoint = remote.endpoint(),
        authenticated = remote.has_token(),
        backend = cache.name(),
        "Opening store"
    );

    Ok(ResourceStore::open(*kind.spec(), remote, cache).with_items_per_page(config.items_per_page(kind)))
}

/// Parses `key=value` pairs into record fields.
///
/// Values that parse as JSON (`140`, `true`, `"x"`, `[1,2]`) keep their JSON
/// type; anything else is taken as a string.
pub fn parse_fields(pairs: &[String]) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let mut fields = Map::with_capacity(pairs.len());
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            return Err(format!("invalid field '{pair}': expected key=value").into());
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid field '{pair}': empty key").into());
        }
        if key == "id" {
            return Err("the id field cannot be set".into());
        }
        let value = serde_json::from_str(raw.trim()).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}
