pub mod answer;
pub mod dashboard;
pub mod field;
pub mod form;
pub mod response;

pub use answer::{AnswerValue, FileRef, ResponseMap};
pub use dashboard::{ActivityEntry, ActivityKind, DashboardStats};
pub use field::{FieldSettings, FieldType, FormField};
pub use form::{Form, FormUpdate};
pub use response::{FormResponse, SubmissionMetadata};
