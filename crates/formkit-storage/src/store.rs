use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use uuid::Uuid;

use formkit_core::models::{
    DashboardStats, Form, FormField, FormResponse, FormUpdate, ResponseMap, SubmissionMetadata,
};

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence for forms and their responses.
///
/// Ids that do not resolve come back as `None` / `false`, never as an
/// error. `Err` is reserved for the backend failing.
pub trait FormStore: Send + Sync {
    /// Forms owned by `user_id`, oldest first.
    fn list_forms_by_owner<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Form>, StorageError>>;

    /// Create an empty, unpublished form.
    fn create_form<'a>(
        &'a self,
        user_id: &'a str,
        title: &'a str,
        description: &'a str,
    ) -> BoxFuture<'a, Result<Form, StorageError>>;

    /// Store a fully built form as-is (used for duplication and imports).
    fn insert_form(&self, form: Form) -> BoxFuture<'_, Result<Form, StorageError>>;

    fn read_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<Option<Form>, StorageError>>;

    fn update_form(
        &self,
        form_id: Uuid,
        update: FormUpdate,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>>;

    /// Append `field` to the form's current field list in one
    /// read-modify-write, so concurrent edits to the form are kept.
    fn add_field(
        &self,
        form_id: Uuid,
        field: FormField,
    ) -> BoxFuture<'_, Result<Option<Form>, StorageError>>;

    /// Delete a form and every response to it. `false` if it did not exist.
    fn delete_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<bool, StorageError>>;

    /// Responses to a form, oldest first.
    fn list_responses(
        &self,
        form_id: Uuid,
    ) -> BoxFuture<'_, Result<Vec<FormResponse>, StorageError>>;

    /// Store a response and bump the form's cached response count. `None`
    /// if the form does not exist. On `Err` nothing is left stored.
    fn create_response(
        &self,
        form_id: Uuid,
        responses: ResponseMap,
        metadata: Option<SubmissionMetadata>,
    ) -> BoxFuture<'_, Result<Option<FormResponse>, StorageError>>;

    /// Dashboard numbers for a user, with at most `activity_limit` recent
    /// activity entries.
    fn dashboard_stats<'a>(
        &'a self,
        user_id: &'a str,
        activity_limit: usize,
    ) -> BoxFuture<'a, Result<DashboardStats, StorageError>> {
        Box::pin(async move {
            let forms = self.list_forms_by_owner(user_id).await?;
            let mut responses = Vec::new();
            for form in &forms {
                responses.extend(self.list_responses(form.id).await?);
            }
            Ok(DashboardStats::collect(&forms, &responses, activity_limit))
        })
    }
}

macro_rules! forward_form_store {
    ($ptr:ident) => {
        impl<T: FormStore + ?Sized> FormStore for $ptr<T> {
            fn list_forms_by_owner<'a>(
                &'a self,
                user_id: &'a str,
            ) -> BoxFuture<'a, Result<Vec<Form>, StorageError>> {
                (**self).list_forms_by_owner(user_id)
            }

            fn create_form<'a>(
                &'a self,
                user_id: &'a str,
                title: &'a str,
                description: &'a str,
            ) -> BoxFuture<'a, Result<Form, StorageError>> {
                (**self).create_form(user_id, title, description)
            }

            fn insert_form(&self, form: Form) -> BoxFuture<'_, Result<Form, StorageError>> {
                (**self).insert_form(form)
            }

            fn read_form(
                &self,
                form_id: Uuid,
            ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
                (**self).read_form(form_id)
            }

            fn update_form(
                &self,
                form_id: Uuid,
                update: FormUpdate,
            ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
                (**self).update_form(form_id, update)
            }

            fn add_field(
                &self,
                form_id: Uuid,
                field: FormField,
            ) -> BoxFuture<'_, Result<Option<Form>, StorageError>> {
                (**self).add_field(form_id, field)
            }

            fn delete_form(&self, form_id: Uuid) -> BoxFuture<'_, Result<bool, StorageError>> {
                (**self).delete_form(form_id)
            }

            fn list_responses(
                &self,
                form_id: Uuid,
            ) -> BoxFuture<'_, Result<Vec<FormResponse>, StorageError>> {
                (**self).list_responses(form_id)
            }

            fn create_response(
                &self,
                form_id: Uuid,
                responses: ResponseMap,
                metadata: Option<SubmissionMetadata>,
            ) -> BoxFuture<'_, Result<Option<FormResponse>, StorageError>> {
                (**self).create_response(form_id, responses, metadata)
            }

            fn dashboard_stats<'a>(
                &'a self,
                user_id: &'a str,
                activity_limit: usize,
            ) -> BoxFuture<'a, Result<DashboardStats, StorageError>> {
                (**self).dashboard_stats(user_id, activity_limit)
            }
        }
    };
}

forward_form_store!(Arc);
forward_form_store!(Box);
