use std::fmt;

use serde::Serialize;
use tracing::info;

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    FormCreated,
    FormUpdated,
    FormPublished,
    FormUnpublished,
    FormDeleted,
    ResponseSubmitted,
    ResponseRejected,
    ResponsesExported,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuditAction::FormCreated => "form_created",
            AuditAction::FormUpdated => "form_updated",
            AuditAction::FormPublished => "form_published",
            AuditAction::FormUnpublished => "form_unpublished",
            AuditAction::FormDeleted => "form_deleted",
            AuditAction::ResponseSubmitted => "response_submitted",
            AuditAction::ResponseRejected => "response_rejected",
            AuditAction::ResponsesExported => "responses_exported",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured audit event.
///
/// `actor` is the owning user for builder actions and the submitter's
/// address (or `anonymous`) for public submissions.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl ToString,
        actor: impl Into<String>,
    ) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.to_string(),
            actor: actor.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor = %self.actor,
            audit.details = %details,
            "audit event"
        );
    }
}
