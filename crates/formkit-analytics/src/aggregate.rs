use formkit_core::models::{AnswerValue, FieldType, Form, FormField, FormResponse};

use crate::stats::{FieldAnalytic, FormAnalytics, OptionCount};

/// Compute per-field statistics for `form` over `responses`.
///
/// A field counts as answered when its answer is present and not blank.
/// Answers keyed by ids no longer in the form are ignored.
pub fn aggregate(form: &Form, responses: &[FormResponse]) -> FormAnalytics {
    FormAnalytics {
        form_id: form.id,
        total_responses: responses.len(),
        field_analytics: form
            .fields
            .iter()
            .map(|field| analyze_field(field, responses))
            .collect(),
    }
}

fn analyze_field(field: &FormField, responses: &[FormResponse]) -> FieldAnalytic {
    let answers: Vec<&AnswerValue> = responses
        .iter()
        .filter_map(|r| r.answer(&field.id))
        .collect();

    let response_rate = if responses.is_empty() {
        0.0
    } else {
        answers.len() as f64 / responses.len() as f64 * 100.0
    };

    let mut analytic = FieldAnalytic {
        field_id: field.id.clone(),
        field_label: field.label.clone(),
        field_type: field.field_type,
        response_count: answers.len(),
        response_rate,
        option_counts: None,
        average: None,
        min: None,
        max: None,
        average_length: None,
    };

    match field.field_type {
        FieldType::Select | FieldType::Radio => {
            analytic.option_counts = Some(count_options(field, |option| {
                answers
                    .iter()
                    .filter(|a| a.as_text() == Some(option))
                    .count()
            }));
        }
        FieldType::Checkbox => {
            analytic.option_counts = Some(count_options(field, |option| {
                answers
                    .iter()
                    .filter_map(|a| a.as_list())
                    .filter(|items| items.iter().any(|i| i == option))
                    .count()
            }));
        }
        FieldType::Number => {
            let numbers: Vec<f64> = answers.iter().filter_map(|a| a.as_number()).collect();
            if !numbers.is_empty() {
                analytic.average = Some(numbers.iter().sum::<f64>() / numbers.len() as f64);
                analytic.min = numbers.iter().copied().reduce(f64::min);
                analytic.max = numbers.iter().copied().reduce(f64::max);
            }
        }
        FieldType::Text | FieldType::Textarea | FieldType::Email => {
            let lengths: Vec<usize> = answers
                .iter()
                .filter_map(|a| a.as_text())
                .map(|s| s.chars().count())
                .collect();
            analytic.average_length = Some(if lengths.is_empty() {
                0.0
            } else {
                lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
            });
        }
        FieldType::Date
        | FieldType::File
        | FieldType::Url
        | FieldType::Phone
        | FieldType::Rating
        | FieldType::Scale
        | FieldType::Matrix
        | FieldType::Section => {}
    }

    analytic
}

/// One bucket per declared option, in declared order. Fields without
/// options get no buckets.
fn count_options(field: &FormField, count: impl Fn(&str) -> usize) -> Vec<OptionCount> {
    field
        .options
        .iter()
        .flatten()
        .map(|option| OptionCount {
            option: option.clone(),
            count: count(option.as_str()),
        })
        .collect()
}
