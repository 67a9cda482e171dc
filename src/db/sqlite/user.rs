//! SQLite UserRepository implementation.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::helpers::{
    build_limit_offset_clause, build_order_clause, build_search_condition, search_key,
};
use crate::db::{DbError, DbResult, ListResult, NewUser, UniqueField, User, UserQuery, UserRepository};

const USER_COLUMNS: &str = "id, aadhaar_application_id, name, email, phone, address, \
                            date_of_birth, gender, created_at, updated_at";

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn create(&self, user: &NewUser) -> DbResult<User> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let updated_at = created_at;

        sqlx::query(
            "INSERT INTO users (id, aadhaar_application_id, name, email, phone, address, \
             date_of_birth, gender, search_key, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&user.aadhaar_application_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.date_of_birth)
        .bind(user.gender.as_str())
        .bind(search_key(
            &user.name,
            &user.email,
            &user.aadhaar_application_id,
        ))
        .bind(created_at)
        .bind(updated_at)
        .execute(self.pool)
        .await?;

        debug!(%id, "Inserted user");

        Ok(User {
            id,
            aadhaar_application_id: user.aadhaar_application_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            date_of_birth: user.date_of_birth.clone(),
            gender: user.gender,
            created_at,
            updated_at,
        })
    }

    async fn get(&self, id: Uuid) -> DbResult<User> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| DbError::not_found("User", id.to_string()))?;
        row_to_user(&row)
    }

    async fn get_by_field(&self, field: UniqueField, value: &str) -> DbResult<User> {
        let sql = format!(
            "SELECT {} FROM users WHERE {} = ?",
            USER_COLUMNS,
            field.column()
        );
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(self.pool)
            .await?;

        let row = row.ok_or_else(|| {
            DbError::not_found("User", format!("{}={}", field.column(), value))
        })?;
        row_to_user(&row)
    }

    async fn list(&self, query: &UserQuery) -> DbResult<ListResult<User>> {
        let search = build_search_condition(query.search.as_deref());
        let where_clause = search
            .as_ref()
            .map(|(condition, _)| *condition)
            .unwrap_or("");

        let count_sql = format!("SELECT COUNT(*) FROM users {}", where_clause);
        let sql = format!(
            "SELECT {} FROM users {} {}{}",
            USER_COLUMNS,
            where_clause,
            build_order_clause(query.sort_by, query.order),
            build_limit_offset_clause(&query.page)
        );
        debug!(sql = %sql, "Listing users");

        // Total is taken over the filtered set, before LIMIT/OFFSET
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some((_, pattern)) = &search {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(self.pool).await?;

        let mut rows_query = sqlx::query(&sql);
        if let Some((_, pattern)) = &search {
            rows_query = rows_query.bind(pattern);
        }
        let rows = rows_query.fetch_all(self.pool).await?;

        let items = rows
            .iter()
            .map(row_to_user)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(ListResult {
            items,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id.to_string()));
        }

        debug!(%id, "Deleted user");
        Ok(())
    }
}

fn row_to_user(row: &SqliteRow) -> DbResult<User> {
    let raw_id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&raw_id).map_err(|e| DbError::InvalidData {
        message: format!("stored id '{}' is not a uuid: {}", raw_id, e),
        help: "Rows in the users table must have uuid ids".to_string(),
    })?;

    let raw_gender: String = row.try_get("gender")?;
    let gender = raw_gender.parse().map_err(|message| DbError::InvalidData {
        message,
        help: "Gender must be one of: male, female, other".to_string(),
    })?;

    Ok(User {
        id,
        aadhaar_application_id: row.try_get("aadhaar_application_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        date_of_birth: row.try_get("date_of_birth")?,
        gender,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
