//! Submission validation
//!
//! Order of checks:
//! 1. every required field is present (absent and `null` both count as missing);
//!    if any is missing, stop
//! 2. owner id is a non-empty string
//! 3. amount is a number, > 0 and <= the configured maximum
//! 4. category is one of the known categories
//! 5. description is long enough
//! 6. receipt flag is strictly a boolean

use chrono::{DateTime, Utc};
use claimflow_core::{
    Category, ClaimAttributes, FIELD_AMOUNT, FIELD_CATEGORY, FIELD_DESCRIPTION, FIELD_OWNER_ID,
    FIELD_RECEIPT_PROVIDED, REQUIRED_FIELDS,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::config::ValidationConfig;

/// Claim field validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

/// Typed fields minus the submission timestamp
struct Parsed {
    owner_id: String,
    amount: Decimal,
    category: Category,
    description: String,
    receipt_provided: bool,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Ordered list of validation errors; empty means the claim is valid
    pub fn validate(&self, fields: &Map<String, Value>) -> Vec<String> {
        match self.check(fields) {
            Ok(_) => Vec::new(),
            Err(errors) => errors,
        }
    }

    /// Validate and produce typed attributes
    pub fn parse(
        &self,
        fields: &Map<String, Value>,
        submitted_at: DateTime<Utc>,
    ) -> Result<ClaimAttributes, Vec<String>> {
        let parsed = self.check(fields)?;

        Ok(ClaimAttributes {
            owner_id: parsed.owner_id,
            amount: parsed.amount,
            category: parsed.category,
            description: parsed.description,
            receipt_provided: parsed.receipt_provided,
            submitted_at,
        })
    }

    fn check(&self, fields: &Map<String, Value>) -> Result<Parsed, Vec<String>> {
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|name| matches!(fields.get(**name), None | Some(Value::Null)))
            .map(|name| format!("Missing required field: {}", name))
            .collect();

        if !missing.is_empty() {
            return Err(missing);
        }

        let mut errors = Vec::new();

        let owner_id = match fields.get(FIELD_OWNER_ID).and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => Some(s.to_string()),
            _ => {
                errors.push("Owner ID must be a non-empty string".to_string());
                None
            }
        };

        let amount = match self.check_amount(fields.get(FIELD_AMOUNT)) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let category = match fields
            .get(FIELD_CATEGORY)
            .and_then(Value::as_str)
            .and_then(|s| Category::parse(s).ok())
        {
            Some(category) => Some(category),
            None => {
                errors.push(format!("Category must be one of: {}", Category::names()));
                None
            }
        };

        let description = match fields.get(FIELD_DESCRIPTION).and_then(Value::as_str) {
            Some(s) if s.chars().count() >= self.config.min_description_length => {
                Some(s.to_string())
            }
            _ => {
                errors.push(format!(
                    "Description must be at least {} characters",
                    self.config.min_description_length
                ));
                None
            }
        };

        let receipt_provided = match fields.get(FIELD_RECEIPT_PROVIDED) {
            Some(Value::Bool(b)) => Some(*b),
            _ => {
                errors.push("Receipt flag must be a boolean".to_string());
                None
            }
        };

        match (owner_id, amount, category, description, receipt_provided) {
            (Some(owner_id), Some(amount), Some(category), Some(description), Some(receipt_provided))
                if errors.is_empty() =>
            {
                Ok(Parsed {
                    owner_id,
                    amount,
                    category,
                    description,
                    receipt_provided,
                })
            }
            _ => Err(errors),
        }
    }

    fn check_amount(&self, value: Option<&Value>) -> Result<Decimal, String> {
        let number = match value {
            Some(Value::Number(n)) => n,
            _ => return Err("Amount must be a number".to_string()),
        };

        let text = number.to_string();
        let amount = Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| "Amount must be a finite number".to_string())?;

        if amount <= Decimal::ZERO {
            return Err("Amount must be greater than 0".to_string());
        }
        if amount > self.config.max_amount {
            return Err(format!("Amount must not exceed {}", self.config.max_amount));
        }

        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn valid() -> Value {
        json!({
            "owner_id": "emp-1",
            "amount": 45.0,
            "category": "meals",
            "description": "Team lunch at downtown restaurant",
            "receipt_provided": true,
        })
    }

    #[test]
    fn test_valid_claim() {
        let validator = Validator::default();
        assert!(validator.validate(&fields(valid())).is_empty());

        let attrs = validator.parse(&fields(valid()), Utc::now()).unwrap();
        assert_eq!(attrs.amount, dec!(45));
        assert_eq!(attrs.category, Category::Meals);
        assert!(attrs.receipt_provided);
    }

    #[test]
    fn test_missing_fields_one_error_each() {
        let validator = Validator::default();
        let errors = validator.validate(&fields(json!({ "owner_id": "emp-1", "amount": null })));

        assert_eq!(
            errors,
            vec![
                "Missing required field: amount",
                "Missing required field: category",
                "Missing required field: description",
                "Missing required field: receipt_provided",
            ]
        );
    }

    #[test]
    fn test_missing_fields_short_circuit() {
        let validator = Validator::default();
        // owner is empty and amount is a string, but the missing field wins
        let errors = validator.validate(&fields(json!({
            "owner_id": "",
            "amount": "lots",
            "category": "meals",
            "description": "Lunch",
        })));

        assert_eq!(errors, vec!["Missing required field: receipt_provided"]);
    }

    #[test]
    fn test_type_and_range_errors_in_order() {
        let validator = Validator::default();
        let errors = validator.validate(&fields(json!({
            "owner_id": "  ",
            "amount": -5,
            "category": "gadgets",
            "description": "ab",
            "receipt_provided": "yes",
        })));

        assert_eq!(errors.len(), 5);
        assert_eq!(errors[0], "Owner ID must be a non-empty string");
        assert_eq!(errors[1], "Amount must be greater than 0");
        assert!(errors[2].starts_with("Category must be one of: travel"));
        assert_eq!(errors[3], "Description must be at least 3 characters");
        assert_eq!(errors[4], "Receipt flag must be a boolean");
    }

    #[test]
    fn test_amount_not_numeric() {
        let mut value = valid();
        value["amount"] = json!("45.00");

        let errors = Validator::default().validate(&fields(value));
        assert_eq!(errors, vec!["Amount must be a number"]);
    }

    #[test]
    fn test_amount_above_maximum() {
        let mut value = valid();
        value["amount"] = json!(10000.01);

        let errors = Validator::default().validate(&fields(value));
        assert_eq!(errors, vec!["Amount must not exceed 10000"]);
    }

    #[test]
    fn test_amount_at_maximum_is_valid() {
        let mut value = valid();
        value["amount"] = json!(10000);

        assert!(Validator::default().validate(&fields(value)).is_empty());
    }

    #[test]
    fn test_receipt_must_be_strict_boolean() {
        let mut value = valid();
        value["receipt_provided"] = json!(1);

        let errors = Validator::default().validate(&fields(value));
        assert_eq!(errors, vec!["Receipt flag must be a boolean"]);
    }

    #[test]
    fn test_parse_keeps_submission_time() {
        let at = Utc::now();
        let attrs = Validator::default().parse(&fields(valid()), at).unwrap();
        assert_eq!(attrs.submitted_at, at);
    }
}
