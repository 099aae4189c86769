/// User directory - search, create, update and delete users and their role link
use crate::error::{Result, ServerError};
use crate::services::auth::Caller;
use crate::services::password::PasswordEncoder;
use crate::services::search::{self, blank_as_none, SearchResult};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::sync::Arc;
use viking_core::{NewUser, RoleId, User, UserId, UserType};
use viking_storage::{roles, user_roles, users};

/// Raw search parameters as they arrive on the query string
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchParams {
    pub query: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub dni: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub cuit: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role_id: Option<String>,
}

/// A validated user lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSearch {
    All,
    ById(UserId),
    ByDni(i64),
    ByEmail(String),
    ByCuit(String),
    ByRole(RoleId),
}

impl TryFrom<UserSearchParams> for UserSearch {
    type Error = ServerError;

    fn try_from(params: UserSearchParams) -> Result<Self> {
        let query = search::discriminator(params.query.as_deref())?;

        match query.as_str() {
            "all" => Ok(Self::All),
            "by-id" => Ok(Self::ById(UserId::new(search::required_text(
                params.id, "ID", &query,
            )?))),
            "by-dni" => Ok(Self::ByDni(search::required(params.dni, "DNI", &query)?)),
            "by-email" => Ok(Self::ByEmail(search::required_text(
                params.email,
                "Email",
                &query,
            )?)),
            "by-cuit" => Ok(Self::ByCuit(search::required_text(
                params.cuit,
                "CUIT",
                &query,
            )?)),
            "by-role" => Ok(Self::ByRole(RoleId::new(search::required_text(
                params.role_id,
                "Role ID",
                &query,
            )?))),
            _ => Err(search::unsupported(&query)),
        }
    }
}

/// Incoming user body for save and update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<UserId>,
    pub name: String,
    pub dni: i64,
    pub user_type: UserType,
    pub address: String,
    pub phone_number: String,
    pub secondary_phone_number: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub cuit: Option<String>,
    #[serde(default)]
    pub role_id: Option<RoleId>,
}

impl UserPayload {
    fn validate(&self) -> Result<()> {
        let required = [
            ("Name", &self.name),
            ("Address", &self.address),
            ("Phone number", &self.phone_number),
            ("Secondary phone number", &self.secondary_phone_number),
            ("Email", &self.email),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ServerError::BadRequest(format!("{field} is required")));
            }
        }

        Ok(())
    }

    /// Non-empty replacement password, if one was supplied
    fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    fn to_new_user(&self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name.clone(),
            dni: self.dni,
            cuit: self.cuit.clone().filter(|c| !c.trim().is_empty()),
            user_type: self.user_type,
            address: self.address.clone(),
            phone_number: self.phone_number.clone(),
            secondary_phone_number: self.secondary_phone_number.clone(),
            email: self.email.clone(),
            password_hash,
        }
    }
}

/// External user representation: the stored user plus its linked role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub role_id: Option<RoleId>,
}

pub struct UserDirectory {
    pool: SqlitePool,
    encoder: Arc<dyn PasswordEncoder>,
    admin_permission: String,
}

impl UserDirectory {
    /// `admin_permission` is the role permission label that may create,
    /// delete and re-role users
    pub fn new(
        pool: SqlitePool,
        encoder: Arc<dyn PasswordEncoder>,
        admin_permission: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            encoder,
            admin_permission: admin_permission.into(),
        }
    }

    /// Run a validated lookup
    ///
    /// Keyed lookups return a single view or `NotFound`; `All` and `ByRole`
    /// return lists. A link pointing at a missing user fails the whole
    /// `ByRole` lookup.
    pub async fn search(&self, criteria: UserSearch) -> Result<SearchResult<UserView>> {
        let single = match criteria {
            UserSearch::All => {
                let all = users::get_all(&self.pool).await?;
                let links = user_roles::get_all(&self.pool).await?;

                let views = all
                    .into_iter()
                    .map(|user| {
                        let role_id = links
                            .iter()
                            .find(|link| link.user_id == user.id)
                            .map(|link| link.role_id.clone());
                        UserView { user, role_id }
                    })
                    .collect();
                return Ok(SearchResult::Many(views));
            }
            UserSearch::ByRole(role_id) => {
                let links = user_roles::find_by_role(&self.pool, &role_id).await?;
                let mut views = Vec::with_capacity(links.len());

                for link in links {
                    let user = users::get_by_id(&self.pool, &link.user_id)
                        .await?
                        .ok_or_else(|| user_not_found("ID", &link.user_id))?;
                    views.push(UserView {
                        user,
                        role_id: Some(link.role_id),
                    });
                }
                return Ok(SearchResult::Many(views));
            }
            UserSearch::ById(id) => users::get_by_id(&self.pool, &id)
                .await?
                .ok_or_else(|| user_not_found("ID", &id))?,
            UserSearch::ByDni(dni) => users::get_by_dni(&self.pool, dni)
                .await?
                .ok_or_else(|| user_not_found("DNI", dni))?,
            UserSearch::ByEmail(email) => users::get_by_email(&self.pool, &email)
                .await?
                .ok_or_else(|| user_not_found("email", &email))?,
            UserSearch::ByCuit(cuit) => users::get_by_cuit(&self.pool, &cuit)
                .await?
                .ok_or_else(|| user_not_found("CUIT", &cuit))?,
        };

        Ok(SearchResult::One(self.view(single).await?))
    }

    /// Create a user on behalf of an administrator
    pub async fn create(&self, caller: &Caller, payload: UserPayload) -> Result<UserView> {
        self.require_admin(caller, "create users").await?;
        self.provision(payload).await
    }

    /// Create a user linked to an existing role, without a caller check
    ///
    /// Only the operator CLI uses this directly, to seed the first
    /// administrator. The user row and its link are written in one
    /// transaction.
    pub async fn provision(&self, payload: UserPayload) -> Result<UserView> {
        payload.validate()?;

        let role_id = payload
            .role_id
            .clone()
            .ok_or_else(|| ServerError::BadRequest("Role ID is required".to_string()))?;
        let password = payload
            .new_password()
            .ok_or_else(|| ServerError::BadRequest("Password is required".to_string()))?;

        let role = roles::get_by_id(&self.pool, &role_id)
            .await?
            .ok_or_else(|| role_not_found(&role_id))?;

        let password_hash = self.encoder.encode(password)?;
        let id = UserId::generate();

        let mut tx = self.pool.begin().await?;
        let user = users::insert(&mut *tx, &id, &payload.to_new_user(password_hash)).await?;
        let link = user_roles::insert(&mut *tx, &user.id, &role.id).await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, role_id = %role.id, "User created");

        Ok(UserView {
            user,
            role_id: Some(link.role_id),
        })
    }

    /// Replace a user's mutable fields, optionally rotating the password and
    /// reassigning the role
    ///
    /// Users may edit themselves; editing someone else or changing a role
    /// takes the admin permission.
    pub async fn update(
        &self,
        caller: &Caller,
        id: &UserId,
        payload: UserPayload,
    ) -> Result<UserView> {
        if payload.id.as_ref() != Some(id) {
            return Err(ServerError::BadRequest(
                "Path ID and payload ID must match".to_string(),
            ));
        }
        payload.validate()?;

        if &caller.user_id != id {
            self.require_admin(caller, "edit other users").await?;
        }

        let existing = users::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| user_not_found("ID", id))?;

        let current_role = user_roles::find_by_user(&self.pool, id)
            .await?
            .map(|link| link.role_id);

        let role = match &payload.role_id {
            Some(role_id) if current_role.as_ref() != Some(role_id) => {
                self.require_admin(caller, "change roles").await?;
                Some(
                    roles::get_by_id(&self.pool, role_id)
                        .await?
                        .ok_or_else(|| role_not_found(role_id))?,
                )
            }
            _ => None,
        };

        let password_hash = match payload.new_password() {
            Some(password) => self.encoder.encode(password)?,
            None => existing.password_hash,
        };

        let mut tx = self.pool.begin().await?;

        if !users::update(&mut *tx, id, &payload.to_new_user(password_hash)).await? {
            return Err(user_not_found("ID", id));
        }

        if let Some(role) = role {
            match user_roles::find_by_user(&mut *tx, id).await? {
                Some(link) => {
                    user_roles::set_role(&mut *tx, &link.id, &role.id).await?;
                }
                None => {
                    user_roles::insert(&mut *tx, id, &role.id).await?;
                }
            }
        }

        tx.commit().await?;

        tracing::info!(user_id = %id, "User updated");

        let user = users::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| user_not_found("ID", id))?;
        self.view(user).await
    }

    /// Delete a user and its role link
    ///
    /// Returns `false` when no such user exists.
    pub async fn delete(&self, caller: &Caller, id: &UserId) -> Result<bool> {
        self.require_admin(caller, "delete users").await?;

        let mut tx = self.pool.begin().await?;

        if users::get_by_id(&mut *tx, id).await?.is_none() {
            return Ok(false);
        }

        user_roles::delete_by_user(&mut *tx, id).await?;
        let deleted = users::delete(&mut *tx, id).await?;
        tx.commit().await?;

        if deleted {
            tracing::info!(user_id = %id, "User deleted");
        }

        Ok(deleted)
    }

    /// Permission label of the caller's role
    pub async fn permission_of(&self, caller: &Caller) -> Result<String> {
        let link = user_roles::find_by_user(&self.pool, &caller.user_id)
            .await?
            .ok_or_else(|| {
                ServerError::NotFound(format!("User {} has no role assigned", caller.user_id))
            })?;

        let role = roles::get_by_id(&self.pool, &link.role_id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("Role {} not found", link.role_id)))?;

        Ok(role.permission)
    }

    /// Whether the user with this email is linked to the role
    pub async fn has_role(&self, email: &str, role_id: &RoleId) -> Result<bool> {
        let Some(user) = users::get_by_email(&self.pool, email).await? else {
            return Ok(false);
        };

        let link = user_roles::find_by_user(&self.pool, &user.id).await?;
        Ok(link.is_some_and(|link| &link.role_id == role_id))
    }

    /// Check credentials, returning the user on success
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let invalid = || ServerError::Auth("Invalid email or password".to_string());

        let user = users::get_by_email(&self.pool, email)
            .await?
            .ok_or_else(invalid)?;

        if !self.encoder.matches(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Rejected login");
            return Err(invalid());
        }

        Ok(user)
    }

    async fn require_admin(&self, caller: &Caller, action: &str) -> Result<()> {
        let role = match user_roles::find_by_user(&self.pool, &caller.user_id).await? {
            Some(link) => roles::get_by_id(&self.pool, &link.role_id).await?,
            None => None,
        };

        if role.is_some_and(|role| role.permission == self.admin_permission) {
            Ok(())
        } else {
            Err(ServerError::Forbidden(format!(
                "Only {} users may {action}",
                self.admin_permission
            )))
        }
    }

    async fn view(&self, user: User) -> Result<UserView> {
        let role_id = user_roles::find_by_user(&self.pool, &user.id)
            .await?
            .map(|link| link.role_id);
        Ok(UserView { user, role_id })
    }
}

fn user_not_found(field: &str, value: impl std::fmt::Display) -> ServerError {
    ServerError::NotFound(format!("User with {field} {value} not found"))
}

fn role_not_found(role_id: &RoleId) -> ServerError {
    ServerError::BadRequest(format!("Role with ID {role_id} does not exist"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::password::MockPasswordEncoder;
    use tempfile::TempDir;
    use viking_core::CreateRole;

    fn params(query: &str) -> UserSearchParams {
        UserSearchParams {
            query: Some(query.to_string()),
            ..Default::default()
        }
    }

    async fn directory(encoder: MockPasswordEncoder) -> (UserDirectory, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        let pool = viking_storage::create_pool(&url).await.unwrap();
        viking_storage::run_migrations(&pool).await.unwrap();
        (UserDirectory::new(pool, Arc::new(encoder), "ADMIN"), dir)
    }

    fn payload(role_id: &RoleId) -> UserPayload {
        UserPayload {
            id: None,
            name: "Ana".to_string(),
            dni: 111,
            user_type: UserType::Individual,
            address: "Calle 1".to_string(),
            phone_number: "555".to_string(),
            secondary_phone_number: "556".to_string(),
            email: "a@x.com".to_string(),
            password: Some("secret".to_string()),
            cuit: None,
            role_id: Some(role_id.clone()),
        }
    }

    #[test]
    fn test_parse_by_id_requires_id() {
        let err = UserSearch::try_from(params("by-id")).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(msg) if msg.contains("ID")));
    }

    #[test]
    fn test_parse_unknown_query_names_value() {
        let err = UserSearch::try_from(params("by-shoe-size")).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(msg) if msg.contains("by-shoe-size")));
    }

    #[test]
    fn test_parse_blank_id_is_missing() {
        let mut p = params("by-id");
        p.id = Some("   ".to_string());
        let err = UserSearch::try_from(p).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(msg) if msg.contains("ID")));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let mut p = params("BY-DNI");
        p.dni = Some(42);
        assert_eq!(UserSearch::try_from(p).unwrap(), UserSearch::ByDni(42));
    }

    #[test]
    fn test_parse_by_role() {
        let mut p = params("by-role");
        p.role_id = Some("r1".to_string());
        assert_eq!(
            UserSearch::try_from(p).unwrap(),
            UserSearch::ByRole(RoleId::new("r1"))
        );
    }

    #[test]
    fn test_payload_deserializes_camel_case() {
        let payload: UserPayload = serde_json::from_value(serde_json::json!({
            "name": "Ana",
            "dni": 111,
            "userType": "business",
            "address": "Calle 1",
            "phoneNumber": "555",
            "secondaryPhoneNumber": "556",
            "email": "a@x.com",
            "roleId": "r1"
        }))
        .unwrap();

        assert_eq!(payload.user_type, UserType::Business);
        assert_eq!(payload.role_id, Some(RoleId::new("r1")));
        assert!(payload.password.is_none());
    }

    #[tokio::test]
    async fn test_update_without_password_keeps_hash_and_skips_encoder() {
        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_encode()
            .times(1)
            .returning(|raw| Ok(format!("hashed:{raw}")));

        let (directory, _dir) = directory(encoder).await;
        let role = roles::insert(
            &directory.pool,
            &CreateRole {
                name: "admin".to_string(),
                permission: "ADMIN".to_string(),
            },
        )
        .await
        .unwrap();

        let created = directory.provision(payload(&role.id)).await.unwrap();

        let mut update = payload(&role.id);
        update.id = Some(created.user.id.clone());
        update.password = Some(String::new());
        update.name = "Ana Maria".to_string();

        let caller = Caller {
            user_id: created.user.id.clone(),
        };
        let updated = directory
            .update(&caller, &created.user.id, update)
            .await
            .unwrap();
        assert_eq!(updated.user.name, "Ana Maria");
        assert_eq!(updated.user.password_hash, "hashed:secret");
    }

    #[tokio::test]
    async fn test_create_with_unknown_role_never_hashes() {
        let mut encoder = MockPasswordEncoder::new();
        encoder.expect_encode().times(0);

        let (directory, _dir) = directory(encoder).await;
        let err = directory
            .provision(payload(&RoleId::new("missing")))
            .await
            .unwrap_err();

        assert!(matches!(err, ServerError::BadRequest(_)));
        assert!(users::get_all(&directory.pool).await.unwrap().is_empty());
    }
}
