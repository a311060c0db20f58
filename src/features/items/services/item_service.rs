use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{db_error_code, AppError, Result, PG_FOREIGN_KEY_VIOLATION};
use crate::features::items::dtos::{CreateItemDto, ItemChanges, ItemQueryParams, ItemResponseDto};
use crate::features::items::models::{Item, ITEM_COLUMNS};
use crate::features::items::services::item_query::{
    count_query, page_query, update_query, ItemFilter,
};

const ITEM_NOT_FOUND: &str = "Item not found";
const REPORTER_NOT_FOUND: &str = "Reporter user not found";

/// Service for item queries and mutations
pub struct ItemService {
    pool: PgPool,
}

impl ItemService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List items matching the filters. Returns one page plus the total size of the filtered set.
    pub async fn list(&self, params: &ItemQueryParams) -> Result<(Vec<ItemResponseDto>, i64)> {
        let filter = ItemFilter::from_params(params);

        let mut count = count_query(&filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count items: {:?}", e);
                AppError::Database(e)
            })?;

        let mut page = page_query(&filter, params.limit(), params.offset());
        let items = page
            .build_query_as::<Item>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list items: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((items.into_iter().map(ItemResponseDto::from).collect(), total))
    }

    /// Get a single item by ID
    pub async fn get(&self, id: Uuid) -> Result<ItemResponseDto> {
        let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get item: {:?}", e);
                AppError::Database(e)
            })?
            .map(ItemResponseDto::from)
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.to_string()))
    }

    /// Create an item for an existing reporter
    pub async fn create(&self, dto: CreateItemDto) -> Result<ItemResponseDto> {
        let reporter_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)",
        )
        .bind(dto.reporter_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if !reporter_exists {
            return Err(AppError::NotFound(REPORTER_NOT_FOUND.to_string()));
        }

        let query = format!(
            r#"
            INSERT INTO items (id, title, description, category, status, location, date,
                               image_url, contact_info, reporter_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(Uuid::now_v7())
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.category)
            .bind(dto.status.as_str())
            .bind(&dto.location)
            .bind(dto.date.0)
            .bind(&dto.image_url)
            .bind(&dto.contact_info)
            .bind(dto.reporter_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // The reporter can disappear between the existence check and the insert
                if db_error_code(&e).as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) {
                    return AppError::NotFound(REPORTER_NOT_FOUND.to_string());
                }
                tracing::error!("Failed to insert item: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Item created: id={}, status={}, reporter_id={}",
            item.id,
            item.status,
            item.reporter_id
        );

        Ok(item.into())
    }

    /// Apply a partial update. Only the supplied columns change; `updated_at` always does.
    pub async fn update(&self, id: Uuid, changes: ItemChanges) -> Result<ItemResponseDto> {
        let mut query = update_query(id, changes);

        let item = query
            .build_query_as::<Item>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update item: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.to_string()))?;

        tracing::info!("Item updated: id={}", item.id);

        Ok(item.into())
    }

    /// Hard delete
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete item: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(ITEM_NOT_FOUND.to_string()));
        }

        tracing::info!("Item deleted: id={}", id);

        Ok(())
    }

    /// Clear the flag on an item after review
    pub async fn approve(&self, id: Uuid) -> Result<ItemResponseDto> {
        let query = format!(
            r#"
            UPDATE items
            SET is_flagged = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to approve item: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(ITEM_NOT_FOUND.to_string()))?;

        tracing::info!("Item approved: id={}", item.id);

        Ok(item.into())
    }

    /// Remove a reviewed item. Same semantics as [`ItemService::delete`].
    pub async fn reject(&self, id: Uuid) -> Result<()> {
        self.delete(id).await?;
        tracing::info!("Item rejected: id={}", id);
        Ok(())
    }
}
