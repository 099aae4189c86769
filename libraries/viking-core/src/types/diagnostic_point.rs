/// Diagnostic point domain types
use serde::{Deserialize, Serialize};

use super::ids::{DiagnosticPointId, WorkOrderId};

/// A single finding recorded against a work order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticPoint {
    /// Row identifier
    pub id: DiagnosticPointId,
    /// Work order the finding belongs to
    pub work_order_id: WorkOrderId,
    /// What was found
    pub description: String,
    /// Recording timestamp (Unix epoch seconds)
    pub created_at: i64,
}

/// Request to record a diagnostic point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiagnosticPoint {
    /// Work order the finding belongs to
    pub work_order_id: WorkOrderId,
    /// What was found
    pub description: String,
}
