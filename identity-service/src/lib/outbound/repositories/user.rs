use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::errors::AuthError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Postgres-backed credential store.
///
/// Emails are stored as entered; the `users_email_lower_idx` unique index
/// enforces case-insensitive uniqueness and backs case-insensitive lookup.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_into_user(row: &PgRow) -> Result<User, AuthError> {
    let id: Uuid = row
        .try_get("id")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let first_name: String = row
        .try_get("first_name")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let last_name: String = row
        .try_get("last_name")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

    Ok(User {
        id: UserId(id),
        email: EmailAddress::new(email)?,
        password_hash,
        first_name,
        last_name,
        role: role
            .parse::<Role>()
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?,
        created_at,
    })
}

fn map_unique_violation(e: sqlx::Error) -> AuthError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AuthError::EmailAlreadyExists;
        }
    }
    AuthError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, first_name, last_name, role, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        row.as_ref().map(row_into_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, AuthError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, first_name = $4, last_name = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }
}
