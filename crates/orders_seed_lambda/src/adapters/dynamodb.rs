use std::collections::{BTreeMap, HashMap};

use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use orders_seed_core::seed::SeedRecord;
use orders_seed_core::store::{BatchPutOutcome, KeyedStore};
use serde_json::{json, Map, Value};

/// DynamoDB-backed keyed store. The client is cheap to clone and holds no
/// per-call state, so one instance serves every invocation.
#[derive(Clone)]
pub struct DynamoDbKeyedStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoDbKeyedStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig, endpoint_url: Option<&str>) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);
        if let Some(url) = endpoint_url {
            builder = builder.endpoint_url(url);
        }
        Self::new(aws_sdk_dynamodb::Client::from_conf(builder.build()))
    }
}

impl KeyedStore for DynamoDbKeyedStore {
    fn batch_put(
        &self,
        table_name: &str,
        records: &[SeedRecord],
    ) -> Result<BatchPutOutcome, String> {
        let write_requests = records
            .iter()
            .map(seed_write_request)
            .collect::<Result<Vec<_>, _>>()?;
        let table = table_name.to_string();
        let client = self.client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .batch_write_item()
                    .request_items(table, write_requests)
                    .send()
                    .await
                    .map_err(|error| store_error_message(&error))
            })
        })?;

        Ok(unprocessed_outcome(output.unprocessed_items()))
    }
}

/// The SDK error with its full source chain, passed through unprefixed so
/// the FAILED reason carries the store's own message.
fn store_error_message(error: &(dyn std::error::Error + 'static)) -> String {
    DisplayErrorContext(error).to_string()
}

pub fn seed_item(record: &SeedRecord) -> HashMap<String, AttributeValue> {
    record
        .attributes()
        .into_iter()
        .map(|(name, value)| (name.to_string(), AttributeValue::S(value.to_string())))
        .collect()
}

fn seed_write_request(record: &SeedRecord) -> Result<WriteRequest, String> {
    let put_request = PutRequest::builder()
        .set_item(Some(seed_item(record)))
        .build()
        .map_err(|error| format!("failed to build put request for '{}': {error}", record.id))?;
    Ok(WriteRequest::builder().put_request(put_request).build())
}

fn unprocessed_outcome(
    unprocessed: Option<&HashMap<String, Vec<WriteRequest>>>,
) -> BatchPutOutcome {
    let unprocessed = unprocessed
        .into_iter()
        .flatten()
        .filter(|(_, requests)| !requests.is_empty())
        .map(|(table, requests)| {
            (
                table.clone(),
                requests.iter().map(write_request_to_json).collect(),
            )
        })
        .collect::<BTreeMap<_, _>>();
    BatchPutOutcome { unprocessed }
}

/// Renders an unapplied write in the document shape an operator would
/// recognise from the console.
pub fn write_request_to_json(request: &WriteRequest) -> Value {
    let mut entry = Map::new();
    if let Some(put) = request.put_request() {
        entry.insert(
            "PutRequest".to_string(),
            json!({ "Item": item_to_json(put.item()) }),
        );
    }
    if let Some(delete) = request.delete_request() {
        entry.insert(
            "DeleteRequest".to_string(),
            json!({ "Key": item_to_json(delete.key()) }),
        );
    }
    Value::Object(entry)
}

fn item_to_json(item: &HashMap<String, AttributeValue>) -> Value {
    let ordered: BTreeMap<_, _> = item
        .iter()
        .map(|(name, value)| (name.clone(), attribute_to_json(value)))
        .collect();
    Value::Object(ordered.into_iter().collect())
}

pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(number) => number_to_json(number),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(values) => Value::Array(values.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => item_to_json(map),
        AttributeValue::Ss(values) => json!(values),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|number| number_to_json(number))
                .collect(),
        ),
        AttributeValue::B(blob) => json!(format!("<binary {} bytes>", blob.as_ref().len())),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| json!(format!("<binary {} bytes>", blob.as_ref().len())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn number_to_json(number: &str) -> Value {
    serde_json::from_str::<serde_json::Number>(number)
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(number.to_string()))
}
