//! Product payload validation.
//!
//! Rules run in a fixed order and the first failure wins; callers never see
//! more than one reason at a time.

use crate::domain::ProductDraft;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

const REQUIRED_FIELDS: [&str; 4] = ["name", "description", "price", "category"];

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    /// Reject empty descriptions instead of storing `""`.
    pub require_description: bool,
}

impl Validator {
    pub fn new(require_description: bool) -> Self {
        Self { require_description }
    }

    pub fn validate(&self, payload: &Value) -> Result<ProductDraft, ValidationError> {
        let fields = match payload {
            Value::Object(fields) if REQUIRED_FIELDS.iter().all(|f| fields.contains_key(*f)) => fields,
            _ => {
                return Err(ValidationError(format!(
                    "Missing required fields: {}",
                    REQUIRED_FIELDS.join(", ")
                )))
            }
        };

        let name = non_empty_string(fields, "name", "Name")?;

        let description = match fields.get("description") {
            Some(Value::String(s)) if !self.require_description || !s.trim().is_empty() => {
                s.trim().to_string()
            }
            _ if self.require_description => {
                return Err(ValidationError("Description must be a non-empty string".into()))
            }
            _ => return Err(ValidationError("Description must be a string".into())),
        };

        let price = match fields.get("price").and_then(Value::as_f64) {
            Some(price) if price >= 0.0 => price,
            _ => return Err(ValidationError("Price must be a non-negative number".into())),
        };

        let category = non_empty_string(fields, "category", "Category")?;

        let in_stock = match fields.get("inStock") {
            None => true,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => return Err(ValidationError("inStock must be a boolean".into())),
        };

        Ok(ProductDraft { name, description, price, category, in_stock })
    }
}

fn non_empty_string(
    fields: &Map<String, Value>,
    key: &str,
    label: &str,
) -> Result<String, ValidationError> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError(format!("{label} must be a non-empty string"))),
    }
}
