//! Raw object access under [`S3FormStore`](crate::S3FormStore).

use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::objects::{self, GetObjectOutput};
use crate::store::BoxFuture;

/// A flat key/value object space with ETag-conditional writes.
pub trait ObjectBucket: Send + Sync {
    /// `None` when the key does not exist.
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<GetObjectOutput>, StorageError>>;

    /// Write `body` and return the new ETag. With `if_match`, fails with
    /// `PreconditionFailed` unless the stored ETag still equals it.
    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        if_match: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, StorageError>>;

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Every key under `prefix`.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;
}

/// A real S3 bucket.
#[derive(Clone)]
pub struct S3Bucket {
    client: Client,
    name: String,
}

impl S3Bucket {
    pub fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ObjectBucket for S3Bucket {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<GetObjectOutput>, StorageError>> {
        Box::pin(async move {
            match objects::get_object(&self.client, &self.name, key).await {
                Ok(output) => Ok(Some(output)),
                Err(StorageError::NotFound { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        if_match: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        let put = objects::put_json(&self.client, &self.name, key, body, if_match);
        Box::pin(put)
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(objects::delete_object(&self.client, &self.name, key))
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(objects::list_objects(&self.client, &self.name, prefix))
    }
}
