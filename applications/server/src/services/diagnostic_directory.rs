/// Diagnostic point directory - findings recorded against work orders
use crate::error::{Result, ServerError};
use crate::services::search::{self, blank_as_none, SearchResult};
use serde::Deserialize;
use sqlx::SqlitePool;
use viking_core::{CreateDiagnosticPoint, DiagnosticPoint, DiagnosticPointId, WorkOrderId};
use viking_storage::diagnostic_points;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticPointSearchParams {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<DiagnosticPointId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub work_order_id: Option<WorkOrderId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticPointSearch {
    All,
    ById(DiagnosticPointId),
    ByWorkOrder(WorkOrderId),
}

impl TryFrom<DiagnosticPointSearchParams> for DiagnosticPointSearch {
    type Error = ServerError;

    fn try_from(params: DiagnosticPointSearchParams) -> Result<Self> {
        let query = search::discriminator(params.query.as_deref())?;

        match query.as_str() {
            "all" => Ok(Self::All),
            "by-id" => Ok(Self::ById(search::required(params.id, "ID", &query)?)),
            "by-work-order" => Ok(Self::ByWorkOrder(search::required(
                params.work_order_id,
                "Work order ID",
                &query,
            )?)),
            _ => Err(search::unsupported(&query)),
        }
    }
}

pub struct DiagnosticPointDirectory {
    pool: SqlitePool,
}

impl DiagnosticPointDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn search(
        &self,
        criteria: DiagnosticPointSearch,
    ) -> Result<SearchResult<DiagnosticPoint>> {
        match criteria {
            DiagnosticPointSearch::All => Ok(SearchResult::Many(
                diagnostic_points::get_all(&self.pool).await?,
            )),
            DiagnosticPointSearch::ByWorkOrder(work_order_id) => Ok(SearchResult::Many(
                diagnostic_points::get_by_work_order(&self.pool, work_order_id).await?,
            )),
            DiagnosticPointSearch::ById(id) => diagnostic_points::get_by_id(&self.pool, id)
                .await?
                .map(SearchResult::One)
                .ok_or_else(|| {
                    ServerError::NotFound(format!("Diagnostic point with ID {id} not found"))
                }),
        }
    }

    pub async fn create(&self, point: CreateDiagnosticPoint) -> Result<DiagnosticPoint> {
        if point.description.trim().is_empty() {
            return Err(ServerError::BadRequest("Description is required".to_string()));
        }

        let point = diagnostic_points::insert(&self.pool, &point).await?;
        tracing::info!(
            diagnostic_point_id = point.id,
            work_order_id = point.work_order_id,
            "Diagnostic point recorded"
        );

        Ok(point)
    }
}
