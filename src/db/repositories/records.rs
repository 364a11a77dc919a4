use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

use crate::db::{
    helpers::{quantity_from_column, to_u64},
    models::{NewRecord, Record, StoredSubmission, SubmissionHeader},
    Database,
};
use crate::materials::Material;
use crate::tracking::TrackingCode;

fn row_to_record(row: &Row) -> Result<Record, rusqlite::Error> {
    Ok(Record {
        id: row.get("id")?,
        tracking_code: row.get("tracking_code")?,
        submitted_date: row.get("submitted_date")?,
        purchase_order_ref: row.get("purchase_order_ref")?,
        client_name: row.get("client_name")?,
        description: row.get("description")?,
        quantity: quantity_from_column(row.get("quantity")?),
    })
}

fn count_rows_on(conn: &Connection, display_date: &str) -> Result<u64> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM records WHERE submitted_date = ?1",
            params![display_date],
            |row| row.get(0),
        )
        .with_context(|| format!("failed to count rows for {display_date}"))?;
    to_u64(count, "row count")
}

fn insert_all(conn: &Connection, rows: &[NewRecord]) -> Result<usize> {
    let mut stmt = conn.prepare(
        "INSERT INTO records (tracking_code, submitted_date, purchase_order_ref, client_name, description, quantity)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for row in rows {
        stmt.execute(params![
            row.tracking_code,
            row.submitted_date,
            row.purchase_order_ref,
            row.client_name,
            row.description,
            row.quantity,
        ])
        .with_context(|| format!("failed to insert row for {}", row.tracking_code))?;
    }
    Ok(rows.len())
}

impl Database {
    /// Number of rows already stored with the given display date.
    pub async fn count_rows_for_date(&self, display_date: &str) -> Result<u64> {
        let display_date = display_date.to_string();
        self.execute(move |conn| count_rows_on(conn, &display_date))
            .await
    }

    /// Insert every row or none of them.
    pub async fn insert_rows(&self, rows: Vec<NewRecord>) -> Result<usize> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open insert transaction")?;
            let inserted = insert_all(&tx, &rows)?;
            tx.commit().context("failed to commit inserted rows")?;
            Ok(inserted)
        })
        .await
    }

    /// The code the next submission would receive right now. Nothing is
    /// reserved, so a concurrent submission may claim it first.
    pub async fn preview_tracking_code(&self, now: NaiveDateTime) -> Result<TrackingCode> {
        let display_date = crate::tracking::display_date(now);
        let existing = self.count_rows_for_date(&display_date).await?;
        Ok(TrackingCode::next(now, existing))
    }

    /// Assign a tracking code and store one row per material.
    ///
    /// The count and the insert share one task on the database thread and one
    /// transaction, so two submissions can never be handed the same code.
    pub async fn record_submission(
        &self,
        header: SubmissionHeader,
        materials: Vec<Material>,
        now: NaiveDateTime,
    ) -> Result<StoredSubmission> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open submission transaction")?;

            let display_date = crate::tracking::display_date(now);
            let existing = count_rows_on(&tx, &display_date)?;
            let tracking = TrackingCode::next(now, existing);

            let rows: Vec<NewRecord> = materials
                .iter()
                .map(|material| NewRecord::from_material(&tracking, &header, material))
                .collect();
            let rows_added = insert_all(&tx, &rows)?;

            tx.commit().context("failed to commit submission")?;

            Ok(StoredSubmission {
                tracking,
                rows_added,
            })
        })
        .await
    }

    /// All rows stored under one tracking code, in insertion order.
    pub async fn rows_for_tracking_code(&self, tracking_code: &str) -> Result<Vec<Record>> {
        let tracking_code = tracking_code.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, tracking_code, submitted_date, purchase_order_ref, client_name, description, quantity
                 FROM records
                 WHERE tracking_code = ?1
                 ORDER BY id ASC",
            )?;

            let records = stmt
                .query_map(params![tracking_code], row_to_record)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(records)
        })
        .await
    }
}
