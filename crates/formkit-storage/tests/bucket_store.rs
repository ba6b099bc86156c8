//! `S3FormStore` over an in-memory bucket that can be told to misbehave:
//! concurrent writers, failing writes, forms deleted mid-submission.

use std::collections::BTreeMap;
use std::future::ready;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use formkit_core::models::{AnswerValue, FieldType, FormField, FormUpdate, ResponseMap};
use formkit_core::s3_keys;
use formkit_storage::objects::GetObjectOutput;
use formkit_storage::s3_store::MAX_WRITE_ATTEMPTS;
use formkit_storage::{BoxFuture, FormStore, ObjectBucket, S3FormStore, StorageError};
use uuid::Uuid;

#[derive(Default)]
struct ScriptedBucket {
    objects: Mutex<BTreeMap<String, (Vec<u8>, String)>>,
    next_etag: AtomicU64,
    /// Conditional writes that find the object already changed by someone else.
    conflicts: AtomicU32,
    /// Conditional writes fail with a backend error.
    broken_conditional_puts: AtomicBool,
    /// Writing a response first removes every form.
    forms_vanish: AtomicBool,
    /// Title another writer sets just before the next conditional write.
    concurrent_title: Mutex<Option<String>>,
    deleted: Mutex<Vec<String>>,
}

impl ScriptedBucket {
    fn script_conflicts(&self, count: u32) {
        self.conflicts.store(count, Ordering::SeqCst);
    }

    fn break_conditional_puts(&self) {
        self.broken_conditional_puts.store(true, Ordering::SeqCst);
    }

    fn drop_forms_on_response_write(&self) {
        self.forms_vanish.store(true, Ordering::SeqCst);
    }

    fn rename_concurrently(&self, title: &str) {
        *self.concurrent_title.lock().unwrap() = Some(title.to_string());
    }

    fn write(&self, key: &str, body: Vec<u8>) -> String {
        let etag = format!("\"{}\"", self.next_etag.fetch_add(1, Ordering::SeqCst));
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (body, etag.clone()));
        etag
    }

    fn current_etag(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, etag)| etag.clone())
    }

    /// Another writer rewrites the object, changing its ETag.
    fn interfere(&self, key: &str, title: Option<String>) {
        let Some((body, _)) = self.objects.lock().unwrap().get(key).cloned() else {
            return;
        };
        let mut doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        if let Some(title) = title {
            doc["title"] = title.into();
        }
        self.write(key, serde_json::to_vec(&doc).unwrap());
    }

    fn put_now(
        &self,
        key: &str,
        body: Vec<u8>,
        if_match: Option<&str>,
    ) -> Result<String, StorageError> {
        if key.starts_with("responses/") && self.forms_vanish.load(Ordering::SeqCst) {
            self.objects
                .lock()
                .unwrap()
                .retain(|k, _| !k.starts_with(s3_keys::FORMS_PREFIX));
        }

        if let Some(expected) = if_match {
            if self.broken_conditional_puts.load(Ordering::SeqCst) {
                return Err(StorageError::PutObject("service unavailable".to_string()));
            }
            let title = self.concurrent_title.lock().unwrap().take();
            if title.is_some() {
                self.interfere(key, title);
            } else if self.take_conflict() {
                self.interfere(key, None);
            }
            if self.current_etag(key).as_deref() != Some(expected) {
                return Err(StorageError::PreconditionFailed {
                    key: key.to_string(),
                });
            }
        }

        Ok(self.write(key, body))
    }

    fn take_conflict(&self) -> bool {
        self.conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn keys_under(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl ObjectBucket for ScriptedBucket {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<GetObjectOutput>, StorageError>> {
        let found = self.objects.lock().unwrap().get(key).cloned();
        let output = found.map(|(body, etag)| GetObjectOutput {
            body,
            etag: Some(etag),
        });
        Box::pin(ready(Ok(output)))
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        if_match: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(ready(self.put_now(key, body, if_match)))
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        self.objects.lock().unwrap().remove(key);
        self.deleted.lock().unwrap().push(key.to_string());
        Box::pin(ready(Ok(())))
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(ready(Ok(self.keys_under(prefix))))
    }
}

fn store() -> S3FormStore<ScriptedBucket> {
    S3FormStore::with_bucket(ScriptedBucket::default())
}

fn answers(value: &str) -> ResponseMap {
    ResponseMap::from([("q".to_string(), AnswerValue::from(value))])
}

#[tokio::test]
async fn update_retries_after_concurrent_writes() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().script_conflicts(MAX_WRITE_ATTEMPTS - 1);

    let updated = store
        .update_form(form.id, FormUpdate::publish(true))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.is_published);

    let stored = store.read_form(form.id).await.unwrap().unwrap();
    assert!(stored.is_published);
}

#[tokio::test]
async fn update_gives_up_after_repeated_conflicts() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().script_conflicts(MAX_WRITE_ATTEMPTS);

    let err = store
        .update_form(form.id, FormUpdate::publish(true))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::WriteConflict { attempts, .. } if attempts == MAX_WRITE_ATTEMPTS
    ));

    let stored = store.read_form(form.id).await.unwrap().unwrap();
    assert!(!stored.is_published);
}

#[tokio::test]
async fn add_field_keeps_a_concurrent_edit() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().rename_concurrently("Renamed");

    let field = FormField::new("q", FieldType::Text, "Question");
    let updated = store.add_field(form.id, field).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.fields.len(), 1);

    let stored = store.read_form(form.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Renamed");
    assert_eq!(stored.fields.len(), 1);
}

#[tokio::test]
async fn conflicting_count_bump_leaves_no_response() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().script_conflicts(MAX_WRITE_ATTEMPTS);

    let err = store
        .create_response(form.id, answers("a"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::WriteConflict { .. }));
    assert!(store.list_responses(form.id).await.unwrap().is_empty());

    let stored = store.read_form(form.id).await.unwrap().unwrap();
    assert_eq!(stored.response_count, 0);
}

#[tokio::test]
async fn failed_count_bump_leaves_no_response() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().break_conditional_puts();

    let err = store
        .create_response(form.id, answers("a"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::PutObject(_)));
    assert!(store.bucket().keys_under("responses/").is_empty());
}

#[tokio::test]
async fn response_to_vanished_form_is_discarded() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    store.bucket().drop_forms_on_response_write();

    let stored = store
        .create_response(form.id, answers("a"), None)
        .await
        .unwrap();
    assert!(stored.is_none());
    assert!(store.bucket().keys_under("responses/").is_empty());
}

#[tokio::test]
async fn response_to_missing_form_writes_nothing() {
    let store = store();
    let stored = store
        .create_response(Uuid::new_v4(), answers("a"), None)
        .await
        .unwrap();
    assert!(stored.is_none());
    assert!(store.bucket().keys_under("").is_empty());
}

#[tokio::test]
async fn delete_removes_responses_before_form() {
    let store = store();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    for value in ["a", "b"] {
        store
            .create_response(form.id, answers(value), None)
            .await
            .unwrap()
            .unwrap();
    }

    assert!(store.delete_form(form.id).await.unwrap());

    let deleted = store.bucket().deleted.lock().unwrap().clone();
    assert_eq!(deleted.len(), 3);
    let prefix = s3_keys::responses_prefix(form.id);
    assert!(deleted[..2].iter().all(|k| k.starts_with(&prefix)));
    assert_eq!(deleted[2], s3_keys::form(form.id));
    assert!(store.bucket().keys_under("").is_empty());
}
