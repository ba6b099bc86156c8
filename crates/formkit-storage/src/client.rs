use aws_sdk_s3::Client;

use crate::config::StoreConfig;
use crate::error::StorageError;

/// Build an S3 client for the configured region using the default
/// credential chain.
pub async fn build_client(config: &StoreConfig) -> Result<Client, StorageError> {
    if config.bucket.trim().is_empty() {
        return Err(StorageError::Config("bucket name is empty".to_string()));
    }

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()))
        .load()
        .await;

    tracing::info!(region = %config.region, bucket = %config.bucket, "built S3 client");
    Ok(Client::new(&sdk_config))
}
