use aws_sdk_s3::Client;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use formkit_core::models::{
    Form, FormField, FormResponse, FormUpdate, ResponseMap, SubmissionMetadata,
};
use formkit_core::s3_keys;

use crate::bucket::{ObjectBucket, S3Bucket};
use crate::client;
use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::state;
use crate::store::{BoxFuture, FormStore};

/// How many times a read-modify-write is retried when another writer
/// changed the object in between.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

/// [`FormStore`] backed by JSON objects in a bucket.
///
/// Layout: `forms/{id}.json` and `responses/{form_id}/{id}.json`.
#[derive(Clone)]
pub struct S3FormStore<B = S3Bucket> {
    bucket: B,
}

impl S3FormStore<S3Bucket> {
    pub fn new(s3: Client, bucket: impl Into<String>) -> Self {
        Self::with_bucket(S3Bucket::new(s3, bucket))
    }

    pub async fn connect(config: &StoreConfig) -> Result<Self, StorageError> {
        let s3 = client::build_client(config).await?;
        Ok(Self::new(s3, config.bucket.clone()))
    }
}

impl<B: ObjectBucket> S3FormStore<B> {
    pub fn with_bucket(bucket: B) -> Self {
        Self { bucket }
    }

    pub fn bucket(&self) -> &B {
        &self.bucket
    }

    async fn load_form(&self, form_id: Uuid) -> Result<Option<(Form, String)>, StorageError> {
        let key = s3_keys::form(form_id);
        state::load_json(&self.bucket, &key).await
    }

    /// Read a form, change it, and write it back guarded by its ETag.
    async fn modify_form<F>(&self, form_id: Uuid, change: F) -> Result<Option<Form>, StorageError>
    where
        F: Fn(&mut Form) -> Result<(), StorageError> + Send + Sync,
    {
        let key = s3_keys::form(form_id);

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            let Some((mut form, etag)) = self.load_form(form_id).await? else {
                return Ok(None);
            };
            change(&mut form)?;

            let saved = state::save_json_if_match(&self.bucket, &key, &form, &etag);
            match saved.await {
                Ok(_) => return Ok(Some(form)),
                Err(StorageError::PreconditionFailed { .. }) => {
                    tracing::warn!(%form_id, attempt, "form changed during update, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(StorageError::WriteConflict {
            key,
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    async fn load_all<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, StorageError> {
        let keys = self.bucket.list(prefix).await?;
        let mut items = Vec::with_capacity(keys.len());
        for key in &keys {
            // A key listed a moment ago may already be gone.
            if let Some((item, _etag)) = state::load_json(&self.bucket, key).await? {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Remove a response whose submission did not complete.
    async fn discard_response(&self, key: &str) {
        if let Err(e) = self.bucket.delete(key).await {
            tracing::warn!(key, error = %e, "failed to remove incomplete response");
        }
    }
}

impl<B: ObjectBucket> FormStore for S3FormStore<B> {
    fn list_forms_by_owner<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Form>, StorageError>> {
        Box::pin(async move {
            let mut forms: Vec<Form> = self.load_all(s3_keys::FORMS_PREFIX).await?;
            forms.retain(|f| f.user_id == user_id);
            forms.sort_by_key(|f| (f.created_at, f.id));
            Ok(forms)
        })
    }

    fn create_form<'a>(
        &'a self,
        user_id: &'a str,
        title: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<Form, StorageError>> {
        let form = Form::new(user_id, title, description, jiff::Timestamp::now());
        self.insert_form(form)
    }

    fn insert_form(&self, form: Form) -> BoxFuture<'_, Result<Form, StorageError>> {
        Box::pin(async move {
            form.check_fields()?;
            let key = s3_keys::form(form.id);
            state::save_json(&self.bucket, &key, &form).await?;
            tracing::info!(form_id = %form.id, user_id = %form.user_id, "form stored");
            Ok(form)
        })
    }

    fn read_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            let loaded = self.load_form(form_id).await?;
            Ok(loaded.map(|(form, _etag)| form))
        })
    }

    fn update_form(
        &self,
        form_id: Uuid,
        update: FormUpdate,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            self.modify_form(form_id, |form| {
                update.clone().apply(form, jiff::Timestamp::now())?;
                Ok(())
            })
            .await
        })
    }

    fn add_field(
        &self,
        form_id: Uuid,
        field: FormField,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            self.modify_form(form_id, |form| {
                form.add_field(field.clone())?;
                form.updated_at = jiff::Timestamp::now();
                Ok(())
            })
            .await
        })
    }

    fn delete_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<bool, StorageError>> {
        Box::pin(async move {
            if self.load_form(form_id).await?.is_none() {
                return Ok(false);
            }

            // Responses first, so a failure part-way never leaves orphans.
            let keys = self.bucket.list(&s3_keys::responses_prefix(form_id)).await?;
            for key in &keys {
                self.bucket.delete(key).await?;
            }
            self.bucket.delete(&s3_keys::form(form_id)).await?;

            tracing::info!(%form_id, responses = keys.len(), "form deleted");
            Ok(true)
        })
    }

    fn list_responses(
        &self,
        form_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<FormResponse>, StorageError>> {
        Box::pin(async move {
            let mut responses: Vec<FormResponse> =
                self.load_all(&s3_keys::responses_prefix(form_id)).await?;
            responses.sort_by_key(|r| (r.submitted_at, r.id));
            Ok(responses)
        })
    }

    fn create_response(
        &self,
        form_id: Uuid,
        responses: ResponseMap,
        metadata: Option<SubmissionMetadata>,
    ) -> BoxFuture<'_, Result<Option<FormResponse>, StorageError>> {
        Box::pin(async move {
            if self.load_form(form_id).await?.is_none() {
                return Ok(None);
            }

            let response = FormResponse::new(form_id, responses, metadata, jiff::Timestamp::now());
            let key = s3_keys::response(form_id, response.id);
            state::save_json(&self.bucket, &key, &response).await?;

            let bumped = self
                .modify_form(form_id, |form| {
                    form.response_count += 1;
                    Ok(())
                })
                .await;

            match bumped {
                Ok(Some(_)) => {
                    tracing::info!(%form_id, response_id = %response.id, "response stored");
                    Ok(Some(response))
                }
                Ok(None) => {
                    self.discard_response(&key).await;
                    tracing::warn!(%form_id, "form vanished while storing response");
                    Ok(None)
                }
                Err(e) => {
                    self.discard_response(&key).await;
                    Err(e)
                }
            }
        })
    }
}
