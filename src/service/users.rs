//! User record workflows: create, fetch, list, delete.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::dto::{UserDto, UserPage};
use super::error::{ConflictKind, Operation, ServiceError, ServiceResult};
use crate::db::{Database, DbError, Gender, NewUser, UniqueField, UserQuery, UserRepository};
use crate::validation::{CREATE_USER_RULES, FieldViolation, normalize_pagination, validate};

/// Raw create payload, before validation.
#[derive(Debug, Clone, Default)]
pub struct CreateUserInput {
    pub aadhaar_application_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub gender: String,
}

impl CreateUserInput {
    /// Field value by wire name; unknown names read as empty.
    pub fn field(&self, name: &str) -> &str {
        match name {
            "aadhaar_application_id" => &self.aadhaar_application_id,
            "name" => &self.name,
            "email" => &self.email,
            "phone" => &self.phone,
            "address" => &self.address,
            "date_of_birth" => &self.date_of_birth,
            "gender" => &self.gender,
            _ => "",
        }
    }
}

/// Raw list parameters as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

/// Stateless user service over an injected database handle.
pub struct UserService<D: Database> {
    db: Arc<D>,
}

impl<D: Database> Clone for UserService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> UserService<D> {
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Validate, check uniqueness, insert.
    ///
    /// The email / application ID lookups are a fast path only. The store's
    /// UNIQUE constraints decide races between concurrent creates, and a
    /// violation there is reported as the same `Conflict`.
    #[instrument(skip(self, input), fields(application_id = %input.aadhaar_application_id))]
    pub async fn create(&self, input: CreateUserInput) -> ServiceResult<UserDto> {
        let details = validate(CREATE_USER_RULES, |field| input.field(field));
        if !details.is_empty() {
            warn!(violations = details.len(), "Create payload failed validation");
            return Err(ServiceError::Invalid { details });
        }
        let gender: Gender = input
            .gender
            .parse()
            .map_err(|message| ServiceError::Invalid {
                details: vec![FieldViolation {
                    field: "gender".to_string(),
                    message,
                }],
            })?;

        let users = self.db.users();

        self.ensure_absent(&users, UniqueField::Email, &input.email)
            .await?;
        self.ensure_absent(&users, UniqueField::ApplicationId, &input.aadhaar_application_id)
            .await?;

        let new_user = NewUser {
            aadhaar_application_id: input.aadhaar_application_id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            date_of_birth: input.date_of_birth,
            gender,
        };

        let user = users.create(&new_user).await.map_err(|e| match e.violated_column() {
            Some(column) => {
                let kind = ConflictKind::from_column(column);
                warn!(%kind, "Unique constraint rejected insert");
                ServiceError::Conflict(kind)
            }
            None => internal(Operation::Create, e),
        })?;

        info!(id = %user.id, "Created user");
        Ok(UserDto::created(user))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ServiceResult<UserDto> {
        let id = parse_id(id)?;
        let user = self
            .db
            .users()
            .get(id)
            .await
            .map_err(|e| not_found_or_internal(id, Operation::Get, e))?;
        Ok(UserDto::from(user))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, params: ListParams) -> ServiceResult<UserPage> {
        let page = normalize_pagination(params.page, params.limit);
        let query = UserQuery::new(
            page,
            params.sort_by.as_deref(),
            params.order.as_deref(),
            params.search.as_deref(),
        );

        let result = self
            .db
            .users()
            .list(&query)
            .await
            .map_err(|e| internal(Operation::List, e))?;

        Ok(UserPage {
            users: result.items.into_iter().map(UserDto::from).collect(),
            total: result.total,
            page: page.number,
            limit: page.limit,
            total_pages: page.total_pages(result.total),
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let id = parse_id(id)?;
        let users = self.db.users();

        users
            .get(id)
            .await
            .map_err(|e| not_found_or_internal(id, Operation::Delete, e))?;
        users
            .delete(id)
            .await
            .map_err(|e| not_found_or_internal(id, Operation::Delete, e))?;

        info!(%id, "Deleted user");
        Ok(())
    }

    async fn ensure_absent(
        &self,
        users: &D::Users<'_>,
        field: UniqueField,
        value: &str,
    ) -> ServiceResult<()> {
        match users.get_by_field(field, value).await {
            Ok(_) => {
                let kind = match field {
                    UniqueField::Email => ConflictKind::EmailExists,
                    UniqueField::ApplicationId => ConflictKind::ApplicationIdExists,
                };
                warn!(%kind, "Duplicate found before insert");
                Err(ServiceError::Conflict(kind))
            }
            Err(DbError::NotFound { .. }) => Ok(()),
            Err(e) => Err(internal(Operation::Create, e)),
        }
    }
}

fn parse_id(raw: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::InvalidFormat {
        value: raw.to_string(),
    })
}

fn internal(operation: Operation, source: DbError) -> ServiceError {
    error!(%operation, error = %source, "Store operation failed");
    ServiceError::internal(operation, source)
}

fn not_found_or_internal(id: Uuid, operation: Operation, e: DbError) -> ServiceError {
    match e {
        DbError::NotFound { .. } => {
            warn!(%id, "User not found");
            ServiceError::NotFound { id: id.to_string() }
        }
        other => internal(operation, other),
    }
}
