use std::sync::Arc;

use formkit_core::models::{
    AnswerValue, FieldType, FormField, FormUpdate, ResponseMap, SubmissionMetadata,
};
use formkit_storage::{FormStore, MemoryFormStore};
use uuid::Uuid;

fn answers(value: &str) -> ResponseMap {
    ResponseMap::from([("q".to_string(), AnswerValue::from(value))])
}

async fn submit(store: &MemoryFormStore, form_id: Uuid, value: &str) {
    store
        .create_response(form_id, answers(value), None)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn create_and_read_form() {
    let store = MemoryFormStore::new();
    let form = store
        .create_form("user-1", "Survey", "Tell us")
        .await
        .unwrap();

    assert!(form.fields.is_empty());
    assert!(!form.is_published);

    let read = store.read_form(form.id).await.unwrap().unwrap();
    assert_eq!(read.title, "Survey");
    assert_eq!(read.description, "Tell us");
}

#[tokio::test]
async fn missing_ids_resolve_to_absent() {
    let store = MemoryFormStore::new();
    let id = Uuid::new_v4();

    assert!(store.read_form(id).await.unwrap().is_none());
    let publish = FormUpdate::publish(true);
    assert!(store.update_form(id, publish).await.unwrap().is_none());
    assert!(!store.delete_form(id).await.unwrap());
    assert!(store.list_responses(id).await.unwrap().is_empty());
    let response = store.create_response(id, answers("x"), None).await;
    assert!(response.unwrap().is_none());
}

#[tokio::test]
async fn list_forms_by_owner_filters() {
    let store = MemoryFormStore::new();
    store.create_form("alice", "A1", "").await.unwrap();
    store.create_form("bob", "B1", "").await.unwrap();
    store.create_form("alice", "A2", "").await.unwrap();

    let titles: Vec<String> = store
        .list_forms_by_owner("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.title)
        .collect();
    assert_eq!(titles, ["A1", "A2"]);
}

#[tokio::test]
async fn update_form_applies_partial_changes() {
    let store = MemoryFormStore::new();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();

    let fields = vec![FormField::new("q", FieldType::Text, "Question")];
    let updated = store
        .update_form(form.id, FormUpdate::fields(fields.clone()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.fields, fields);
    assert_eq!(updated.title, "Survey");
    assert!(updated.updated_at >= form.updated_at);

    let duplicate = FormUpdate::fields(vec![fields[0].clone(), fields[0].clone()]);
    assert!(store.update_form(form.id, duplicate).await.is_err());
}

#[tokio::test]
async fn add_field_appends_to_current_fields() {
    let store = MemoryFormStore::new();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();
    let first = FormField::new("a", FieldType::Text, "A");
    let second = FormField::new("b", FieldType::Email, "B");

    store
        .add_field(form.id, first.clone())
        .await
        .unwrap()
        .unwrap();
    let updated = store.add_field(form.id, second).await.unwrap().unwrap();

    let ids: Vec<&str> = updated.fields.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(updated.updated_at >= form.updated_at);

    assert!(store.add_field(form.id, first.clone()).await.is_err());
    let missing = Uuid::new_v4();
    assert!(store.add_field(missing, first).await.unwrap().is_none());
}

#[tokio::test]
async fn create_response_bumps_count_and_keeps_metadata() {
    let store = MemoryFormStore::new();
    let form = store.create_form("user-1", "Survey", "").await.unwrap();

    let metadata = SubmissionMetadata {
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: Some("curl/8".to_string()),
    };
    let first = store
        .create_response(form.id, answers("one"), Some(metadata))
        .await
        .unwrap()
        .unwrap();
    submit(&store, form.id, "two").await;

    assert_eq!(first.form_id, form.id);
    assert_eq!(first.ip_address.as_deref(), Some("203.0.113.7"));

    let responses = store.list_responses(form.id).await.unwrap();
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].id, first.id);
    assert_eq!(responses[1].responses["q"], AnswerValue::from("two"));

    let form = store.read_form(form.id).await.unwrap().unwrap();
    assert_eq!(form.response_count, 2);
}

#[tokio::test]
async fn delete_cascades_to_responses() {
    let store = MemoryFormStore::new();
    let doomed = store.create_form("user-1", "Doomed", "").await.unwrap();
    let kept = store.create_form("user-1", "Kept", "").await.unwrap();
    submit(&store, doomed.id, "a").await;
    submit(&store, kept.id, "b").await;

    assert!(store.delete_form(doomed.id).await.unwrap());
    assert!(store.list_responses(doomed.id).await.unwrap().is_empty());
    assert!(store.read_form(doomed.id).await.unwrap().is_none());
    assert_eq!(store.list_responses(kept.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_stats_counts_owned_forms() {
    let store = MemoryFormStore::new();
    let published = store.create_form("user-1", "Published", "").await.unwrap();
    store.create_form("user-1", "Draft", "").await.unwrap();
    store
        .create_form("someone-else", "Other", "")
        .await
        .unwrap();
    store
        .update_form(published.id, FormUpdate::publish(true))
        .await
        .unwrap();
    submit(&store, published.id, "a").await;
    submit(&store, published.id, "b").await;

    let stats = store.dashboard_stats("user-1", 3).await.unwrap();
    assert_eq!(stats.total_forms, 2);
    assert_eq!(stats.published_forms, 1);
    assert_eq!(stats.total_responses, 2);
    assert_eq!(stats.recent_activity.len(), 3);
}

#[tokio::test]
async fn works_behind_a_trait_object() {
    let store: Arc<dyn FormStore> = Arc::new(MemoryFormStore::new());
    let form_id = store.create_form("user-1", "Shared", "").await.unwrap().id;

    let handle = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store.create_response(form_id, answers("x"), None).await
        })
    };
    handle.await.unwrap().unwrap();

    assert_eq!(store.list_responses(form_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn stores_are_isolated() {
    let a = MemoryFormStore::new();
    let b = MemoryFormStore::new();
    let form = a.create_form("user-1", "Only in a", "").await.unwrap();
    assert!(b.read_form(form.id).await.unwrap().is_none());
}
