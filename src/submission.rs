//! One form submission, from raw fields to stored rows and a notification.

use log::{error, info};
use serde::Deserialize;

use crate::db::{models::SubmissionHeader, Database};
use crate::error::SubmissionError;
use crate::materials::parse_materials;
use crate::notifier::{Notifier, SubmissionSummary};
use crate::tracking::Clock;

pub const MISSING_FIELDS: &str = "Purchase order reference and client name are required.";
pub const NO_MATERIALS: &str = "No valid material lines were detected.";

/// Fields posted by the intake form. Absent fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionForm {
    pub purchase_order_ref: String,
    pub client_name: String,
    pub materials_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub tracking_code: String,
    pub rows_added: usize,
}

impl SubmissionOutcome {
    pub fn message(&self) -> String {
        format!(
            "Saved. Tracking code: {}. Rows added: {}.",
            self.tracking_code, self.rows_added
        )
    }
}

pub async fn handle_submission(
    db: &Database,
    clock: &dyn Clock,
    notifier: &dyn Notifier,
    form: SubmissionForm,
) -> Result<SubmissionOutcome, SubmissionError> {
    let purchase_order_ref = form.purchase_order_ref.trim();
    let client_name = form.client_name.trim();
    if purchase_order_ref.is_empty() || client_name.is_empty() {
        return Err(SubmissionError::Validation(MISSING_FIELDS.into()));
    }

    let materials = parse_materials(&form.materials_text);
    if materials.is_empty() {
        return Err(SubmissionError::Validation(NO_MATERIALS.into()));
    }

    let header = SubmissionHeader {
        purchase_order_ref: purchase_order_ref.to_string(),
        client_name: client_name.to_string(),
    };
    let stored = db
        .record_submission(header.clone(), materials.clone(), clock.now())
        .await?;

    info!(
        "Stored submission {} ({} rows) for PO {}",
        stored.tracking.code, stored.rows_added, header.purchase_order_ref
    );

    let summary = SubmissionSummary {
        tracking_code: stored.tracking.code.clone(),
        purchase_order_ref: header.purchase_order_ref,
        client_name: header.client_name,
        materials,
    };
    if let Err(err) = notifier.notify(&summary).await {
        error!(
            target: "intake::notify",
            "notification for {} not delivered: {err}",
            summary.tracking_code
        );
    }

    Ok(SubmissionOutcome {
        tracking_code: stored.tracking.code,
        rows_added: stored.rows_added,
    })
}
