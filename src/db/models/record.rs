//! Intake row models.

use crate::materials::Material;
use crate::tracking::TrackingCode;

/// A stored material line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub tracking_code: String,
    pub submitted_date: String,
    pub purchase_order_ref: String,
    pub client_name: String,
    pub description: String,
    pub quantity: String,
}

/// A row about to be inserted; `id` is assigned by SQLite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub tracking_code: String,
    pub submitted_date: String,
    pub purchase_order_ref: String,
    pub client_name: String,
    pub description: String,
    pub quantity: String,
}

impl NewRecord {
    pub fn from_material(
        tracking: &TrackingCode,
        header: &SubmissionHeader,
        material: &Material,
    ) -> Self {
        Self {
            tracking_code: tracking.code.clone(),
            submitted_date: tracking.display_date.clone(),
            purchase_order_ref: header.purchase_order_ref.clone(),
            client_name: header.client_name.clone(),
            description: material.description.clone(),
            quantity: material.quantity.clone(),
        }
    }
}

/// Fields shared by every row of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionHeader {
    pub purchase_order_ref: String,
    pub client_name: String,
}

/// Result of persisting one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSubmission {
    pub tracking: TrackingCode,
    pub rows_added: usize,
}
