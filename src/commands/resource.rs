//! Per-resource command handlers.
//!
//! Each invocation behaves like one dashboard page load: open the store from
//! its cache, refresh from the server (unless `--offline`), then act.

use super::{CliStore, open_store, parse_fields};
use fieldstore::rendering::{OutputFormat, TableRenderer};
use fieldstore::{
    FieldstoreConfig, MutationOutcome, RefreshOutcome, RemoteError, ResourceKind, SyncReport,
};

/// Refreshes the store as a page load would and reports what was lost.
fn load(store: &mut CliStore, offline: bool) {
    if store.is_mirror_suspended() {
        eprintln!(
            "Warning: the local cache could not be read. Showing demo data; \
             changes are not saved until the server list loads."
        );
    }
    if offline {
        return;
    }
    match store.refresh() {
        RefreshOutcome::Refreshed {
            discarded_pending, ..
        } if discarded_pending > 0 => {
            eprintln!(
                "Warning: {discarded_pending} unsynced record(s) were replaced by the server list. \
                 Use `fieldstore sync` before listing to push them."
            );
        },
        RefreshOutcome::Fallback { error } => auth_hint(&error),
        RefreshOutcome::Refreshed { .. } => {},
    }
}

/// Points at the token settings when the server rejected the credentials.
fn auth_hint(error: &RemoteError) {
    if error.is_unauthorized() {
        eprintln!(
            "Hint: the server rejected the auth token. Set `auth_token` in the config file \
             or FIELDSTORE_AUTH_TOKEN."
        );
    }
}

fn print_page(store: &CliStore, page: usize, format: OutputFormat) {
    let spec = store.spec();
    let view = store.render(page);
    let renderer = TableRenderer::new(spec.label, spec.columns).with_format(format);
    print!("{}", renderer.render(&view, store.banner()));
    if format == OutputFormat::Json {
        println!();
    }
}

fn print_outcome(action: &str, id: &str, outcome: &MutationOutcome) {
    if let Some(message) = outcome.fallback_message() {
        eprintln!("Server error: {message}");
    }
    println!("{action} {id}: {outcome}");
}

/// List command.
pub fn cmd_list(
    config: &FieldstoreConfig,
    kind: ResourceKind,
    page: usize,
    search: Option<String>,
    format: OutputFormat,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config, kind)?;
    load(&mut store, offline);
    if let Some(term) = search {
        store.set_search(term);
    }
    print_page(&store, page, format);
    Ok(())
}

/// Create command.
pub fn cmd_create(
    config: &FieldstoreConfig,
    kind: ResourceKind,
    fields: &[String],
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fields = parse_fields(fields)?;
    if fields.is_empty() {
        return Err("create needs at least one --field key=value".into());
    }

    let mut store = open_store(config, kind)?;
    load(&mut store, offline);
    let created = store.create(fields);
    let id = created
        .id
        .as_ref()
        .map_or_else(|| "record".to_string(), ToString::to_string);
    print_outcome("Created", &id, &created.outcome);
    Ok(())
}

/// Update command.
pub fn cmd_update(
    config: &FieldstoreConfig,
    kind: ResourceKind,
    id: &str,
    fields: &[String],
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let patch = parse_fields(fields)?;
    if patch.is_empty() {
        return Err("update needs at least one --field key=value".into());
    }

    let mut store = open_store(config, kind)?;
    load(&mut store, offline);
    let record_id = store.resolve(id)?;
    let outcome = store.update(&record_id, &patch)?;
    print_outcome("Updated", id.trim(), &outcome);
    Ok(())
}

/// Delete command.
pub fn cmd_delete(
    config: &FieldstoreConfig,
    kind: ResourceKind,
    id: &str,
    offline: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config, kind)?;
    load(&mut store, offline);
    let record_id = store.resolve(id)?;
    let outcome = store.delete(&record_id)?;
    print_outcome("Deleted", id.trim(), &outcome);
    Ok(())
}

/// Retry command: the banner's retry action.
pub fn cmd_retry(
    config: &FieldstoreConfig,
    kind: ResourceKind,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config, kind)?;
    match store.retry() {
        RefreshOutcome::Refreshed { count, .. } => println!("Reconnected: {count} record(s) loaded."),
        RefreshOutcome::Fallback { error } => {
            eprintln!("Still offline: {error}");
            auth_hint(&error);
        },
    }
    print_page(&store, 1, format);
    Ok(())
}

/// Sync command: pushes records created offline.
pub fn cmd_sync(config: &FieldstoreConfig, kind: ResourceKind) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store(config, kind)?;
    let pending = store.pending_count();
    if pending == 0 {
        println!("Nothing to sync: no unsynced {kind} records.");
        return Ok(());
    }

    println!("Pushing {pending} unsynced record(s)...");
    let SyncReport {
        pushed,
        remaining,
        error,
    } = store.push_pending();
    println!("Pushed: {pushed}");
    println!("Remaining: {remaining}");
    match error {
        Some(error) => {
            auth_hint(&error);
            Err(format!("sync stopped: {error}").into())
        },
        None => Ok(()),
    }
}
