//! Draft records and form payloads backing the CRM routes.

use std::collections::HashSet;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod lead;
pub mod order;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid lead id: {0}")]
    InvalidLeadId(String),

    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
}

/// Rejects values with no non-whitespace characters.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Strips markup from free text and trims it, mapping empty input to `None`.
///
/// The result is plain text: entities produced while stripping are decoded
/// again, escaping happens when templates render it.
pub(crate) fn clean_text(value: &str) -> Option<String> {
    let stripped = ammonia::Builder::default()
        .tags(HashSet::new())
        .clean(value)
        .to_string();
    let text = decode_text_entities(&stripped);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Reverses the escaping ammonia applies to text nodes; `&amp;` goes last.
fn decode_text_entities(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Missing-value error attached to `field`.
pub(crate) fn required(field: &'static str) -> FormError {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new("required"));
    FormError::Validation(errors)
}
