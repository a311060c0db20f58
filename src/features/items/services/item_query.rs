//! SQL builders for item listing and partial updates.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::features::items::dtos::{ItemChanges, ItemQueryParams};
use crate::features::items::models::ITEM_COLUMNS;

/// Filters applied to an item listing. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Substring matched case-insensitively against title, description or location
    pub search: Option<String>,
    /// Uppercased status
    pub status: Option<String>,
    pub category: Option<String>,
    pub is_flagged: Option<bool>,
}

impl ItemFilter {
    /// Empty strings are treated as "no filter"
    pub fn from_params(params: &ItemQueryParams) -> Self {
        Self {
            search: non_empty(params.query.as_deref()).map(str::to_string),
            status: non_empty(params.status.as_deref()).map(str::to_uppercase),
            category: non_empty(params.category.as_deref()).map(str::to_string),
            is_flagged: params.is_flagged,
        }
    }

    fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.is_flagged.is_none()
    }

    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if self.is_empty() {
            return;
        }

        qb.push(" WHERE ");
        let mut conditions = qb.separated(" AND ");

        if let Some(ref search) = self.search {
            let pattern = like_pattern(search);
            conditions.push("(title ILIKE ");
            conditions.push_bind_unseparated(pattern.clone());
            conditions.push_unseparated(" OR description ILIKE ");
            conditions.push_bind_unseparated(pattern.clone());
            conditions.push_unseparated(" OR location ILIKE ");
            conditions.push_bind_unseparated(pattern);
            conditions.push_unseparated(")");
        }

        if let Some(ref status) = self.status {
            conditions.push("status = ");
            conditions.push_bind_unseparated(status.clone());
        }

        if let Some(ref category) = self.category {
            conditions.push("category = ");
            conditions.push_bind_unseparated(category.clone());
        }

        if let Some(is_flagged) = self.is_flagged {
            conditions.push("is_flagged = ");
            conditions.push_bind_unseparated(is_flagged);
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Wrap a search term for ILIKE, escaping the pattern metacharacters so the
/// term is matched literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// `SELECT COUNT(*)` over the filtered set, ignoring pagination
pub fn count_query(filter: &ItemFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM items");
    filter.push_where(&mut qb);
    qb
}

/// One page of the filtered set, newest first. `id` (UUID v7) breaks ties on `created_at`.
pub fn page_query(filter: &ItemFilter, limit: i64, offset: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM items", ITEM_COLUMNS));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);
    qb
}

/// `UPDATE ... RETURNING` that writes only the supplied columns.
/// `updated_at` is always refreshed, so an empty change set still touches the row.
pub fn update_query(id: Uuid, changes: ItemChanges) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE items SET ");

    {
        let mut set = qb.separated(", ");

        if let Some(title) = changes.title {
            set.push("title = ");
            set.push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ");
            set.push_bind_unseparated(description);
        }
        if let Some(category) = changes.category {
            set.push("category = ");
            set.push_bind_unseparated(category);
        }
        if let Some(status) = changes.status {
            set.push("status = ");
            set.push_bind_unseparated(status.as_str());
        }
        if let Some(location) = changes.location {
            set.push("location = ");
            set.push_bind_unseparated(location);
        }
        if let Some(date) = changes.date {
            set.push("date = ");
            set.push_bind_unseparated(date);
        }
        if let Some(image_url) = changes.image_url {
            set.push("image_url = ");
            set.push_bind_unseparated(image_url);
        }
        if let Some(contact_info) = changes.contact_info {
            set.push("contact_info = ");
            set.push_bind_unseparated(contact_info);
        }

        set.push("updated_at = NOW()");
    }

    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" RETURNING ");
    qb.push(ITEM_COLUMNS);
    qb
}
