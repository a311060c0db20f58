use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{db_error_code, AppError, Result, PG_UNIQUE_VIOLATION};
use crate::features::users::dtos::{CreateUserDto, UserResponseDto};
use crate::features::users::models::User;

const EMAIL_TAKEN: &str = "Email already registered";

/// Service for user accounts
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all users, newest first
    pub async fn list(&self) -> Result<Vec<UserResponseDto>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list users: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    /// Get user by ID
    pub async fn get(&self, id: Uuid) -> Result<UserResponseDto> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get user: {:?}", e);
            AppError::Database(e)
        })?
        .map(|u| u.into())
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Create a user. Emails are unique.
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&dto.email)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if email_taken {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let role = dto.role.unwrap_or_default();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&dto.email)
        .bind(&dto.name)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Lost a race with a concurrent registration of the same email
            if db_error_code(&e).as_deref() == Some(PG_UNIQUE_VIOLATION) {
                return AppError::Conflict(EMAIL_TAKEN.to_string());
            }
            tracing::error!("Failed to insert user: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("User created: id={}, role={}", user.id, user.role);

        Ok(user.into())
    }
}
