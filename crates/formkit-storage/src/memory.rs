use tokio::sync::Mutex;
use uuid::Uuid;

use formkit_core::models::{
    Form, FormField, FormResponse, FormUpdate, ResponseMap, SubmissionMetadata,
};

use crate::error::StorageError;
use crate::store::{BoxFuture, FormStore};

/// A [`FormStore`] that keeps everything in memory. Each instance is its
/// own isolated store, which is what tests want.
#[derive(Default)]
pub struct MemoryFormStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    forms: Vec<Form>,
    responses: Vec<FormResponse>,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormStore for MemoryFormStore {
    fn list_forms_by_owner<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Form>, StorageError>> {
        Box::pin(async move {
            let tables = self.inner.lock().await;
            Ok(tables
                .forms
                .iter()
                .filter(|f| f.user_id == user_id)
                .cloned()
                .collect())
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
            let mut tables = self.inner.lock().await;
            tables.forms.push(form.clone());
            Ok(form)
        })
    }

    fn read_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            let tables = self.inner.lock().await;
            Ok(tables.forms.iter().find(|f| f.id == form_id).cloned())
        })
    }

    fn update_form(
        &self,
        form_id: Uuid,
        update: FormUpdate,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            let mut tables = self.inner.lock().await;
            let Some(form) = tables.forms.iter_mut().find(|f| f.id == form_id) else {
                return Ok(None);
            };
            update.apply(form, jiff::Timestamp::now())?;
            Ok(Some(form.clone()))
        })
    }

    fn add_field(
        &self,
        form_id: Uuid,
        field: FormField,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
        Box::pin(async move {
            let mut tables = self.inner.lock().await;
            let Some(form) = tables.forms.iter_mut().find(|f| f.id == form_id) else {
                return Ok(None);
            };
            form.add_field(field)?;
            form.updated_at = jiff::Timestamp::now();
            Ok(Some(form.clone()))
        })
    }

    fn delete_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<bool, StorageError>> {
        Box::pin(async move {
            let mut tables = self.inner.lock().await;
            let before = tables.forms.len();
            tables.forms.retain(|f| f.id != form_id);
            if tables.forms.len() == before {
                return Ok(false);
            }
            tables.responses.retain(|r| r.form_id != form_id);
            Ok(true)
        })
    }

    fn list_responses(
        &self,
        form_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<FormResponse>, StorageError>> {
        Box::pin(async move {
            let tables = self.inner.lock().await;
            Ok(tables
                .responses
                .iter()
                .filter(|r| r.form_id == form_id)
                .cloned()
                .collect())
        })
    }

    fn create_response(
        &self,
        form_id: Uuid,
        responses: ResponseMap,
        metadata: Option<SubmissionMetadata>,
    ) -> BoxFuture<'_, Result<Option<FormResponse>, StorageError>> {
        Box::pin(async move {
            let mut tables = self.inner.lock().await;
            let Some(form) = tables.forms.iter_mut().find(|f| f.id == form_id) else {
                return Ok(None);
            };
            form.response_count += 1;

            let response =
                FormResponse::new(form_id, responses, metadata, jiff::Timestamp::now());
            tables.responses.push(response.clone());
            Ok(Some(response))
        })
    }
}
