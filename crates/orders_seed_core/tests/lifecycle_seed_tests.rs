use orders_seed_core::contract::{ResponseStatus, PHYSICAL_RESOURCE_ID};
use orders_seed_core::handler::handle_raw_event;
use orders_seed_core::seed::{seed_records, STORE_RECORD_TYPE};
use orders_seed_core::store::InMemoryKeyedStore;
use serde_json::{json, Value};

const TABLE: &str = "orders-table-feature-dev";

fn provider_event(request_type: &str) -> Value {
    json!({
        "RequestType": request_type,
        "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:populate-orders-provider",
        "ResponseURL": "https://cloudformation-custom-resource-response-euwest1.s3.amazonaws.com/x",
        "StackId": "arn:aws:cloudformation:eu-west-1:123456789012:stack/orders-stateless/1",
        "RequestId": format!("{request_type}-request"),
        "LogicalResourceId": "DbTableConfigCustomResource",
        "ResourceType": "AWS::CloudFormation::CustomResource",
        "ResourceProperties": {
            "ServiceToken": "arn:aws:lambda:eu-west-1:123456789012:function:populate-orders-provider",
            "tableName": TABLE
        }
    })
}

#[test]
fn every_lifecycle_kind_succeeds_with_constant_physical_id() {
    for request_type in ["Create", "Update", "Delete"] {
        let store = InMemoryKeyedStore::new();
        let response = handle_raw_event(provider_event(request_type), &store, "corr");

        assert_eq!(response.status, ResponseStatus::Success, "{request_type}");
        assert_eq!(response.physical_resource_id, PHYSICAL_RESOURCE_ID);
        assert_eq!(response.request_id, format!("{request_type}-request"));
        assert_eq!(response.logical_resource_id, "DbTableConfigCustomResource");
    }
}

#[test]
fn create_on_empty_table_writes_exactly_the_seed_set() {
    let store = InMemoryKeyedStore::new();
    handle_raw_event(provider_event("Create"), &store, "corr-create");

    let items = store.items(TABLE);
    assert_eq!(items.len(), 3);
    for record in seed_records() {
        let item = store.item(TABLE, &record.id).expect("seed record written");
        assert_eq!(item["type"], json!(STORE_RECORD_TYPE));
        assert_eq!(item["storeCode"], json!(record.store_code));
        assert_eq!(item["storeName"], json!(record.store_name));
    }
}

#[test]
fn update_is_idempotent_and_keeps_unrelated_records() {
    let store = InMemoryKeyedStore::new();
    let order = json!({
        "id": "0c4b1e8e-order",
        "quantity": 2,
        "productId": "widget",
        "storeId": "59b8a675-9bb7-46c7-955d-2566edfba8ea",
        "created": "2026-10-01T10:00:00Z",
        "type": "Orders"
    });
    store
        .put_item(TABLE, order.clone())
        .expect("order should be stored");

    handle_raw_event(provider_event("Create"), &store, "corr-create");
    let before = store.items(TABLE);

    let response = handle_raw_event(provider_event("Update"), &store, "corr-update");
    let second = handle_raw_event(provider_event("Update"), &store, "corr-update-retry");

    assert!(response.is_success());
    assert!(second.is_success());
    assert_eq!(store.items(TABLE), before);
    assert_eq!(store.items(TABLE).len(), 4);
    assert_eq!(store.item(TABLE, "0c4b1e8e-order"), Some(order));
}

#[test]
fn delete_never_writes() {
    let mut event = provider_event("Delete");
    event["PhysicalResourceId"] = json!(PHYSICAL_RESOURCE_ID);
    let store = InMemoryKeyedStore::new();

    let response = handle_raw_event(event, &store, "corr-delete");

    assert!(response.is_success());
    assert!(store.write_calls().is_empty());
}

#[test]
fn missing_table_name_fails_without_write() {
    let mut event = provider_event("Create");
    event["ResourceProperties"]
        .as_object_mut()
        .expect("properties object")
        .remove("tableName");
    let store = InMemoryKeyedStore::new();

    let response = handle_raw_event(event, &store, "corr-missing");

    assert_eq!(response.status, ResponseStatus::Failed);
    assert!(response.reason.contains("tableName"));
    assert!(store.write_calls().is_empty());
}

#[test]
fn partial_write_fails_and_lists_unprocessed_entries() {
    let records = seed_records();
    let store = InMemoryKeyedStore::new()
        .with_unprocessed_ids([records[0].id.clone(), records[2].id.clone()]);

    let response = handle_raw_event(provider_event("Create"), &store, "corr-partial");

    assert_eq!(response.status, ResponseStatus::Failed);
    let (_, serialized) = response
        .reason
        .split_once(" - ")
        .expect("reason should carry the unprocessed set");
    let unprocessed: Value = serde_json::from_str(serialized).expect("set should be JSON");
    let entries = unprocessed[TABLE].as_array().expect("entries for table");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["PutRequest"]["Item"]["storeCode"], json!("NEW"));
    assert_eq!(entries[1]["PutRequest"]["Item"]["storeCode"], json!("MAN"));
}

#[test]
fn unrecognized_request_type_fails_without_write() {
    let store = InMemoryKeyedStore::new();
    let response = handle_raw_event(provider_event("Replace"), &store, "corr-replace");

    assert_eq!(response.status, ResponseStatus::Failed);
    assert!(response.reason.contains("Replace"));
    assert!(store.write_calls().is_empty());
}
