/// Role directory
use crate::error::{Result, ServerError};
use crate::services::search::{self, blank_as_none, SearchResult};
use serde::Deserialize;
use sqlx::SqlitePool;
use viking_core::{CreateRole, Role, RoleId};
use viking_storage::roles;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSearchParams {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSearch {
    All,
    ById(RoleId),
}

impl TryFrom<RoleSearchParams> for RoleSearch {
    type Error = ServerError;

    fn try_from(params: RoleSearchParams) -> Result<Self> {
        let query = search::discriminator(params.query.as_deref())?;

        match query.as_str() {
            "all" => Ok(Self::All),
            "by-id" => Ok(Self::ById(RoleId::new(search::required_text(
                params.id, "ID", &query,
            )?))),
            _ => Err(search::unsupported(&query)),
        }
    }
}

pub struct RoleDirectory {
    pool: SqlitePool,
}

impl RoleDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn search(&self, criteria: RoleSearch) -> Result<SearchResult<Role>> {
        match criteria {
            RoleSearch::All => Ok(SearchResult::Many(roles::get_all(&self.pool).await?)),
            RoleSearch::ById(id) => roles::get_by_id(&self.pool, &id)
                .await?
                .map(SearchResult::One)
                .ok_or_else(|| ServerError::NotFound(format!("Role with ID {id} not found"))),
        }
    }

    /// Create a role; a taken name is a conflict
    pub async fn create(&self, role: CreateRole) -> Result<Role> {
        if role.name.trim().is_empty() || role.permission.trim().is_empty() {
            return Err(ServerError::BadRequest(
                "Role name and permission are required".to_string(),
            ));
        }

        let role = roles::insert(&self.pool, &role).await?;
        tracing::info!(role_id = %role.id, name = %role.name, "Role created");

        Ok(role)
    }
}
