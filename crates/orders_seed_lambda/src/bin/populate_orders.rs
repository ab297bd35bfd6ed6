use lambda_runtime::{service_fn, Error, LambdaEvent};
use orders_seed_core::contract::LifecycleResponse;
use orders_seed_core::handler::{handle_raw_event, HANDLER_METHOD};
use orders_seed_lambda::adapters::dynamodb::DynamoDbKeyedStore;
use orders_seed_lambda::config::RuntimeConfig;
use orders_seed_lambda::logging::init_logging;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

async fn handle_request(
    store: &DynamoDbKeyedStore,
    event: LambdaEvent<Value>,
) -> Result<LifecycleResponse, Error> {
    let correlation_id = Uuid::new_v4().to_string();
    info!(
        correlation_id = %correlation_id,
        aws_request_id = %event.context.request_id,
        method = HANDLER_METHOD,
        "invocation received"
    );

    Ok(handle_raw_event(event.payload, store, &correlation_id))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = RuntimeConfig::from_env().map_err(Error::from)?;
    init_logging(config.log_format)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store =
        DynamoDbKeyedStore::from_sdk_config(&aws_config, config.dynamodb_endpoint.as_deref());
    info!(
        endpoint_override = config.dynamodb_endpoint.is_some(),
        "populate-orders runtime initialised"
    );

    let store = &store;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(store, event).await
    }))
    .await
}
