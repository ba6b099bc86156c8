use formkit_core::models::{AnswerValue, Form, FormResponse};

use crate::error::ExportError;
use crate::options::ExportOptions;

/// Join separator for multi-value answers.
const LIST_SEPARATOR: &str = "; ";

/// Render `responses` to `form` as CSV.
///
/// Columns are `Response ID`, `Submitted At`, then one per field label in
/// form order. Rows keep the order of `responses`. Every cell is quoted with
/// inner quotes doubled and rows are joined by `\n`. With no responses the
/// result is the header row alone.
pub fn to_csv(
    form: &Form,
    responses: &[FormResponse],
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let mut lines = Vec::with_capacity(responses.len() + 1);

    let header = ["Response ID", "Submitted At"]
        .into_iter()
        .chain(form.fields.iter().map(|f| f.label.as_str()));
    lines.push(row(header));

    for response in responses {
        let submitted_at = format_timestamp(response.submitted_at, options)?;
        let id = response.id.to_string();
        let answers: Vec<String> = form
            .fields
            .iter()
            .map(|field| cell_text(response.responses.get(&field.id)))
            .collect();

        let cells = [id.as_str(), submitted_at.as_str()]
            .into_iter()
            .chain(answers.iter().map(String::as_str));
        lines.push(row(cells));
    }

    tracing::debug!(
        form_id = %form.id,
        rows = responses.len(),
        columns = form.fields.len() + 2,
        "exported responses to csv"
    );

    Ok(lines.join("\n"))
}

fn format_timestamp(
    timestamp: jiff::Timestamp,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let zoned = timestamp.to_zoned(options.time_zone.clone());
    let formatted = jiff::fmt::strtime::format(&options.timestamp_format, &zoned)?;
    Ok(formatted)
}

/// Plain-text rendering of one answer.
fn cell_text(value: Option<&AnswerValue>) -> String {
    match value {
        None | Some(AnswerValue::Null) => String::new(),
        Some(AnswerValue::Text(s)) => s.clone(),
        Some(AnswerValue::Number(n)) => n.to_string(),
        Some(AnswerValue::List(items)) => items.join(LIST_SEPARATOR),
        Some(AnswerValue::File(file)) => file.name.clone(),
    }
}

fn row<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    cells
        .into_iter()
        .map(quote)
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
