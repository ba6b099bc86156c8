use serde_json::json;
use uuid::Uuid;

use formkit_analytics::FormAnalytics;
use formkit_audit::{AuditAction, AuditEvent};
use formkit_core::models::{
    DashboardStats, FieldType, Form, FormResponse, FormUpdate, ResponseMap, SubmissionMetadata,
};
use formkit_core::registry;
use formkit_export::ExportOptions;
use formkit_storage::FormStore;
use formkit_validation::ValidationError;

use crate::config::ServiceConfig;
use crate::error::ServiceError;

/// Outcome of a public submission.
#[derive(Debug)]
pub enum Submission {
    /// Stored.
    Accepted(FormResponse),
    /// Not stored; errors are in field order.
    Rejected(Vec<ValidationError>),
    /// The form does not exist or is not published.
    Unavailable,
}

/// A CSV download ready to hand to the browser.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

const RESOURCE_FORM: &str = "form";
const RESOURCE_RESPONSE: &str = "form_response";

pub struct FormService<S> {
    store: S,
    config: ServiceConfig,
    export_options: ExportOptions,
}

impl<S: FormStore> FormService<S> {
    pub fn new(store: S, config: ServiceConfig) -> Result<Self, ServiceError> {
        let export_options = config.export.to_options()?;
        Ok(Self {
            store,
            config,
            export_options,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub async fn list_forms(&self, user_id: &str) -> Result<Vec<Form>, ServiceError> {
        Ok(self.store.list_forms_by_owner(user_id).await?)
    }

    pub async fn create_form(
        &self,
        user_id: &str,
        title: &str,
        description: &str,
    ) -> Result<Form, ServiceError> {
        let form = self.store.create_form(user_id, title, description).await?;
        form_event(AuditAction::FormCreated, &form).emit();
        Ok(form)
    }

    /// Copy a form's fields into a new draft titled "... (Copy)".
    pub async fn duplicate_form(&self, form_id: Uuid) -> Result<Option<Form>, ServiceError> {
        let Some(original) = self.store.read_form(form_id).await? else {
            return Ok(None);
        };
        let copy = self
            .store
            .insert_form(original.duplicate(jiff::Timestamp::now()))
            .await?;

        form_event(AuditAction::FormCreated, &copy)
            .with_details(json!({ "duplicated_from": form_id.to_string() }))
            .emit();
        Ok(Some(copy))
    }

    /// The form as its owner sees it, published or not.
    pub async fn get_form(&self, form_id: Uuid) -> Result<Option<Form>, ServiceError> {
        Ok(self.store.read_form(form_id).await?)
    }

    /// The form as the public submission page sees it: absent unless
    /// published.
    pub async fn get_published_form(&self, form_id: Uuid) -> Result<Option<Form>, ServiceError> {
        Ok(self
            .store
            .read_form(form_id)
            .await?
            .filter(|form| form.is_published))
    }

    pub async fn update_form(
        &self,
        form_id: Uuid,
        update: FormUpdate,
    ) -> Result<Option<Form>, ServiceError> {
        let Some(form) = self.store.update_form(form_id, update).await? else {
            return Ok(None);
        };
        form_event(AuditAction::FormUpdated, &form).emit();
        Ok(Some(form))
    }

    pub async fn set_published(
        &self,
        form_id: Uuid,
        is_published: bool,
    ) -> Result<Option<Form>, ServiceError> {
        let Some(form) = self
            .store
            .update_form(form_id, FormUpdate::publish(is_published))
            .await?
        else {
            return Ok(None);
        };

        let action = if is_published {
            AuditAction::FormPublished
        } else {
            AuditAction::FormUnpublished
        };
        form_event(action, &form).emit();
        Ok(Some(form))
    }

    /// Append a registry-default field of `field_type` to the form.
    pub async fn add_field(
        &self,
        form_id: Uuid,
        field_type: FieldType,
    ) -> Result<Option<Form>, ServiceError> {
        let field = registry::new_field(field_type);
        let Some(form) = self.store.add_field(form_id, field).await? else {
            return Ok(None);
        };
        form_event(AuditAction::FormUpdated, &form)
            .with_details(json!({ "added_field": field_type.as_str() }))
            .emit();
        Ok(Some(form))
    }

    /// Delete a form together with all of its responses.
    pub async fn delete_form(&self, form_id: Uuid) -> Result<bool, ServiceError> {
        let Some(form) = self.store.read_form(form_id).await? else {
            return Ok(false);
        };
        let deleted = self.store.delete_form(form_id).await?;
        if deleted {
            form_event(AuditAction::FormDeleted, &form)
                .with_details(json!({ "responses": form.response_count }))
                .emit();
        }
        Ok(deleted)
    }

    /// Validate and store a public submission.
    pub async fn submit_response(
        &self,
        form_id: Uuid,
        responses: ResponseMap,
        metadata: Option<SubmissionMetadata>,
    ) -> Result<Submission, ServiceError> {
        let Some(form) = self.get_published_form(form_id).await? else {
            tracing::debug!(%form_id, "submission to unavailable form");
            return Ok(Submission::Unavailable);
        };

        let actor = metadata
            .as_ref()
            .and_then(|m| m.ip_address.clone())
            .unwrap_or_else(|| "anonymous".to_string());

        let errors = formkit_validation::validate_response(&form.fields, &responses);
        if !errors.is_empty() {
            AuditEvent::new(AuditAction::ResponseRejected, RESOURCE_FORM, form_id, actor)
                .with_details(json!({ "errors": errors.len() }))
                .emit();
            return Ok(Submission::Rejected(errors));
        }

        let Some(response) = self
            .store
            .create_response(form_id, responses, metadata)
            .await?
        else {
            return Ok(Submission::Unavailable);
        };

        AuditEvent::new(
            AuditAction::ResponseSubmitted,
            RESOURCE_RESPONSE,
            response.id,
            actor,
        )
        .with_details(json!({ "form_id": form_id.to_string() }))
        .emit();
        Ok(Submission::Accepted(response))
    }

    pub async fn list_responses(&self, form_id: Uuid) -> Result<Vec<FormResponse>, ServiceError> {
        Ok(self.store.list_responses(form_id).await?)
    }

    pub async fn form_analytics(&self, form_id: Uuid) -> Result<Option<FormAnalytics>, ServiceError> {
        let Some(form) = self.store.read_form(form_id).await? else {
            return Ok(None);
        };
        let responses = self.store.list_responses(form_id).await?;
        Ok(Some(formkit_analytics::aggregate(&form, &responses)))
    }

    /// CSV of every response, named after the form and today's date in the
    /// export time zone.
    pub async fn export_responses(
        &self,
        form_id: Uuid,
    ) -> Result<Option<CsvExport>, ServiceError> {
        let Some(form) = self.store.read_form(form_id).await? else {
            return Ok(None);
        };
        let responses = self.store.list_responses(form_id).await?;

        let content = formkit_export::to_csv(&form, &responses, &self.export_options)?;
        let today = jiff::Timestamp::now()
            .to_zoned(self.export_options.time_zone.clone())
            .date();
        let filename = formkit_export::export_filename(&form.title, today);

        form_event(AuditAction::ResponsesExported, &form)
            .with_details(json!({ "rows": responses.len() }))
            .emit();
        Ok(Some(CsvExport { filename, content }))
    }

    pub async fn dashboard(&self, user_id: &str) -> Result<DashboardStats, ServiceError> {
        Ok(self
            .store
            .dashboard_stats(user_id, self.config.recent_activity_limit)
            .await?)
    }
}

/// Audit event about a form, attributed to its owner.
fn form_event(action: AuditAction, form: &Form) -> AuditEvent {
    AuditEvent::new(action, RESOURCE_FORM, form.id, &form.user_id)
}
