//! Claim - the unit of work flowing through the pipeline

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::check::CheckResult;
use crate::identity::ClaimId;
use crate::record::WorkflowFault;
use crate::risk::RiskAssessment;

pub const FIELD_OWNER_ID: &str = "owner_id";
pub const FIELD_AMOUNT: &str = "amount";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_RECEIPT_PROVIDED: &str = "receipt_provided";

/// Fields every submission must carry, in validation order
pub const REQUIRED_FIELDS: [&str; 5] = [
    FIELD_OWNER_ID,
    FIELD_AMOUNT,
    FIELD_CATEGORY,
    FIELD_DESCRIPTION,
    FIELD_RECEIPT_PROVIDED,
];

/// Sanitized submission as handed over by the boundary layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    pub fields: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
}

impl ClaimSubmission {
    /// Submission stamped with the current time
    pub fn new(fields: Map<String, Value>) -> Self {
        Self::at(fields, Utc::now())
    }

    pub fn at(fields: Map<String, Value>, submitted_at: DateTime<Utc>) -> Self {
        Self {
            fields,
            submitted_at,
        }
    }

    /// Build from any JSON value; non-objects become an empty field set
    pub fn from_value(value: Value, submitted_at: DateTime<Utc>) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::at(fields, submitted_at)
    }
}

/// Typed claim attributes, available once validation has passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAttributes {
    pub owner_id: String,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub receipt_provided: bool,
    pub submitted_at: DateTime<Utc>,
}

/// In-flight claim with the results each step attached.
///
/// Step results are attached with the `with_*` methods; submitted fields are
/// never touched after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub owner_id: String,
    pub submitted_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<CheckResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<CheckResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<WorkflowFault>,
}

impl Claim {
    /// Create a claim from a submission, deriving its identity
    pub fn from_submission(submission: ClaimSubmission) -> Self {
        let id = ClaimId::from_fields(&submission.fields, submission.submitted_at);
        let owner_id = submission
            .fields
            .get(FIELD_OWNER_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            id,
            owner_id,
            submitted_at: submission.submitted_at,
            fields: submission.fields,
            validation: None,
            policy: None,
            risk: None,
            fault: None,
        }
    }

    pub fn with_validation(mut self, result: CheckResult) -> Self {
        self.validation = Some(result);
        self
    }

    pub fn with_policy(mut self, result: CheckResult) -> Self {
        self.policy = Some(result);
        self
    }

    pub fn with_risk(mut self, assessment: RiskAssessment) -> Self {
        self.risk = Some(assessment);
        self
    }

    pub fn with_fault(mut self, fault: WorkflowFault) -> Self {
        self.fault = Some(fault);
        self
    }
}
