//! Diagnostic points recorded against work orders

use crate::StorageError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};
use viking_core::types::{CreateDiagnosticPoint, DiagnosticPoint, DiagnosticPointId, WorkOrderId};

type Result<T> = std::result::Result<T, StorageError>;

fn from_row(row: &SqliteRow) -> Result<DiagnosticPoint> {
    Ok(DiagnosticPoint {
        id: row.try_get("id")?,
        work_order_id: row.try_get("work_order_id")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn insert<'e, E>(executor: E, point: &CreateDiagnosticPoint) -> Result<DiagnosticPoint>
where
    E: SqliteExecutor<'e>,
{
    let now = crate::now();

    let result = sqlx::query(
        "INSERT INTO diagnostic_points (work_order_id, description, created_at) VALUES (?, ?, ?)",
    )
    .bind(point.work_order_id)
    .bind(&point.description)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(DiagnosticPoint {
        id: result.last_insert_rowid(),
        work_order_id: point.work_order_id,
        description: point.description.clone(),
        created_at: now,
    })
}

pub async fn get_by_id<'e, E>(executor: E, id: DiagnosticPointId) -> Result<Option<DiagnosticPoint>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        "SELECT id, work_order_id, description, created_at FROM diagnostic_points WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get the diagnostic points of a work order, oldest first
pub async fn get_by_work_order<'e, E>(
    executor: E,
    work_order_id: WorkOrderId,
) -> Result<Vec<DiagnosticPoint>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        r#"
        SELECT id, work_order_id, description, created_at
        FROM diagnostic_points
        WHERE work_order_id = ?
        ORDER BY id
        "#,
    )
    .bind(work_order_id)
    .fetch_all(executor)
    .await?;

    rows.iter().map(from_row).collect()
}

pub async fn get_all<'e, E>(executor: E) -> Result<Vec<DiagnosticPoint>>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "SELECT id, work_order_id, description, created_at FROM diagnostic_points ORDER BY id",
    )
    .fetch_all(executor)
    .await?;

    rows.iter().map(from_row).collect()
}
