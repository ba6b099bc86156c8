//! Typed JSON documents on top of raw objects.

use serde::{Serialize, de::DeserializeOwned};

use crate::bucket::ObjectBucket;
use crate::error::StorageError;

/// Load a JSON document. Returns `None` when the key does not exist, and
/// the ETag alongside the value otherwise.
pub async fn load_json<T, B>(bucket: &B, key: &str) -> Result<Option<(T, String)>, StorageError>
where
    T: DeserializeOwned,
    B: ObjectBucket + ?Sized,
{
    let Some(output) = bucket.get(key).await? else {
        return Ok(None);
    };
    let value: T = serde_json::from_slice(&output.body)?;
    Ok(Some((value, output.etag.unwrap_or_default())))
}

/// Save a JSON document. Returns the new ETag.
pub async fn save_json<T, B>(bucket: &B, key: &str, value: &T) -> Result<String, StorageError>
where
    T: Serialize,
    B: ObjectBucket + ?Sized,
{
    let body = serde_json::to_vec_pretty(value)?;
    bucket.put(key, body, None).await
}

/// Save a JSON document only if it has not changed since `expected_etag`
/// was read.
pub async fn save_json_if_match<T, B>(
    bucket: &B,
    key: &str,
    value: &T,
    expected_etag: &str,
) -> Result<String, StorageError>
where
    T: Serialize,
    B: ObjectBucket + ?Sized,
{
    let body = serde_json::to_vec_pretty(value)?;
    bucket.put(key, body, Some(expected_etag)).await
}
