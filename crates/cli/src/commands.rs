//! Command handlers
//!
//! Each handler returns the JSON document the binary prints.

use anyhow::{bail, Context};
use claimflow_core::{ClaimId, ClaimSubmission, Outcome};
use claimflow_workflow::ManualDecision;
use serde_json::{json, Map, Number, Value};

use crate::context::AppContext;

/// Fields for a claim given on the command line
pub struct ClaimArgs {
    pub owner: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub receipt: bool,
}

impl ClaimArgs {
    fn into_fields(self) -> anyhow::Result<Map<String, Value>> {
        let amount: Number = self
            .amount
            .parse()
            .with_context(|| format!("amount '{}' is not a number", self.amount))?;

        let mut fields = Map::new();
        fields.insert("owner_id".to_string(), Value::String(self.owner));
        fields.insert("amount".to_string(), Value::Number(amount));
        fields.insert("category".to_string(), Value::String(self.category));
        fields.insert("description".to_string(), Value::String(self.description));
        fields.insert("receipt_provided".to_string(), Value::Bool(self.receipt));
        Ok(fields)
    }
}

/// Submit from explicit fields
pub async fn submit(ctx: &AppContext, args: ClaimArgs) -> anyhow::Result<Value> {
    let submission = ClaimSubmission::new(args.into_fields()?);
    let receipt = ctx.service.submit(submission).await;
    Ok(serde_json::to_value(receipt)?)
}

/// Submit a raw JSON object as-is
pub async fn submit_json(ctx: &AppContext, payload: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(payload).context("payload is not valid JSON")?;
    let Value::Object(fields) = value else {
        bail!("payload must be a JSON object");
    };

    let receipt = ctx.service.submit(ClaimSubmission::new(fields)).await;
    Ok(serde_json::to_value(receipt)?)
}

pub async fn get(ctx: &AppContext, id: &str) -> anyhow::Result<Value> {
    let id = ClaimId::from_string(id);
    match ctx.service.get(&id).await? {
        Some(record) => Ok(serde_json::to_value(record)?),
        None => bail!("Claim not found: {}", id),
    }
}

pub async fn list(ctx: &AppContext, owner: &str, cursor: Option<&str>) -> anyhow::Result<Value> {
    let page = ctx.service.query_by_owner(owner, cursor).await?;
    Ok(serde_json::to_value(page)?)
}

pub async fn review(
    ctx: &AppContext,
    id: &str,
    approve: bool,
    reason: String,
    reviewer: Option<String>,
) -> anyhow::Result<Value> {
    let manual = ManualDecision {
        outcome: if approve {
            Outcome::Approved
        } else {
            Outcome::Rejected
        },
        reason,
        reviewer,
    };

    let record = ctx
        .service
        .apply_manual_decision(&ClaimId::from_string(id), manual)
        .await?;
    Ok(serde_json::to_value(record)?)
}

pub async fn delete(ctx: &AppContext, id: &str) -> anyhow::Result<Value> {
    let deleted = ctx.service.delete(&ClaimId::from_string(id)).await?;
    Ok(json!({ "id": id, "deleted": deleted }))
}
