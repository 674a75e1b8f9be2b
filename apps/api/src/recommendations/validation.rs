//! Input validation for POST /api/recommendations.
//!
//! All violations are collected and reported together, one message per
//! violated field. Pure functions, no side effects.

use serde_json::Value;

const MIN_FIELD_LEN: usize = 2;
const MAX_FIELD_LEN: usize = 100;
const MIN_DOCUMENT_LEN: usize = 10;
const MAX_DOCUMENT_LEN: usize = 50_000;

/// Normalized request after validation. Values are trimmed; bounds were
/// checked against the trimmed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub industry: String,
    pub region: String,
    pub file_content: String,
}

/// Checks shape and bounds of the three required fields.
///
/// `industry` and `region` must be strings of 2–100 characters,
/// `fileContent` a string of 10–50000 characters. Character counts, not
/// bytes.
pub fn validate(body: &Value) -> Result<ValidatedRequest, Vec<String>> {
    let mut errors = Vec::new();

    let industry = check_field(body, "industry", MIN_FIELD_LEN, MAX_FIELD_LEN, &mut errors);
    let region = check_field(body, "region", MIN_FIELD_LEN, MAX_FIELD_LEN, &mut errors);
    let file_content = check_field(
        body,
        "fileContent",
        MIN_DOCUMENT_LEN,
        MAX_DOCUMENT_LEN,
        &mut errors,
    );

    match (industry, region, file_content) {
        (Some(industry), Some(region), Some(file_content)) => Ok(ValidatedRequest {
            industry,
            region,
            file_content,
        }),
        _ => Err(errors),
    }
}

fn check_field(
    body: &Value,
    name: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<String>,
) -> Option<String> {
    let value = match body.get(name) {
        Some(Value::String(raw)) => raw.trim().to_string(),
        Some(_) => {
            errors.push(format!("\"{name}\" must be a string"));
            return None;
        }
        None => {
            errors.push(format!("\"{name}\" is required"));
            return None;
        }
    };

    let len = value.chars().count();
    if len < min {
        errors.push(format!(
            "\"{name}\" length must be at least {min} characters long"
        ));
        return None;
    }
    if len > max {
        errors.push(format!(
            "\"{name}\" length must be less than or equal to {max} characters long"
        ));
        return None;
    }

    Some(value)
}
