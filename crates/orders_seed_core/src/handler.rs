use serde_json::Value;
use tracing::{error, info};

use crate::contract::{
    decode_event, LifecycleEvent, LifecycleResponse, RequestType, TABLE_NAME_PROPERTY,
};
use crate::error::SeedError;
use crate::seed::{seed_records, SEED_SET_VERSION};
use crate::store::KeyedStore;

pub const HANDLER_METHOD: &str = "populate-orders.handler";

/// Writes the fixed seed set into `table_name` with a single bulk put.
///
/// Any write the store reports as unprocessed fails the whole call; nothing is
/// retried here; the provisioning engine owns retries.
pub fn seed_table(store: &impl KeyedStore, table_name: &str) -> Result<usize, SeedError> {
    let records = seed_records();
    let outcome = store
        .batch_put(table_name, &records)
        .map_err(SeedError::Store)?;

    if !outcome.is_complete() {
        let unprocessed = serde_json::to_string(&outcome.unprocessed).map_err(|error| {
            SeedError::Store(format!("failed to encode unprocessed set: {error}"))
        })?;
        return Err(SeedError::UnprocessedWrites(unprocessed));
    }

    info!(
        table_name,
        seed_set_version = SEED_SET_VERSION,
        records = records.len(),
        "seed set written"
    );
    Ok(records.len())
}

pub fn process_event(
    event: &LifecycleEvent,
    store: &impl KeyedStore,
) -> Result<LifecycleResponse, SeedError> {
    let table_name = event
        .resource_properties
        .table_name()
        .ok_or(SeedError::MissingProperty(TABLE_NAME_PROPERTY))?;

    match event.request_type()? {
        RequestType::Create | RequestType::Update => {
            seed_table(store, table_name)?;
        }
        // The table owns its own teardown.
        RequestType::Delete => {}
    }

    Ok(LifecycleResponse::success(event))
}

/// Handles one lifecycle event. Never fails: every error becomes a FAILED
/// envelope so the provisioning engine is not left waiting.
pub fn handle_lifecycle_event(
    event: &LifecycleEvent,
    store: &impl KeyedStore,
    correlation_id: &str,
) -> LifecycleResponse {
    let raw_event = serde_json::to_string(event).unwrap_or_default();
    log_received(correlation_id, &raw_event);
    respond(event, process_event(event, store), correlation_id)
}

/// Decodes and handles a raw provider payload. A payload that does not decode
/// still yields a FAILED envelope echoing whichever identifiers it carries.
pub fn handle_raw_event(
    payload: Value,
    store: &impl KeyedStore,
    correlation_id: &str,
) -> LifecycleResponse {
    log_received(correlation_id, &payload.to_string());
    let identifiers = LifecycleEvent::identifiers_from(&payload);
    match decode_event(payload) {
        Ok(event) => {
            let result = process_event(&event, store);
            respond(&event, result, correlation_id)
        }
        Err(decode_error) => respond(&identifiers, Err(decode_error), correlation_id),
    }
}

fn respond(
    event: &LifecycleEvent,
    result: Result<LifecycleResponse, SeedError>,
    correlation_id: &str,
) -> LifecycleResponse {
    let response = match result {
        Ok(response) => response,
        Err(seed_error) => {
            error!(
                correlation_id,
                method = HANDLER_METHOD,
                request_type = %event.request_type,
                error_kind = seed_error.kind(),
                error = %seed_error,
                "lifecycle event failed"
            );
            LifecycleResponse::failed(event, seed_error.to_string())
        }
    };

    info!(
        correlation_id,
        method = HANDLER_METHOD,
        status = response.status.as_str(),
        response = %serde_json::to_string(&response).unwrap_or_default(),
        "response"
    );
    response
}

fn log_received(correlation_id: &str, raw_event: &str) {
    info!(correlation_id, method = HANDLER_METHOD, "started");
    info!(
        correlation_id,
        method = HANDLER_METHOD,
        event = raw_event,
        "event request"
    );
}
