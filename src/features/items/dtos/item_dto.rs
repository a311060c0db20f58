use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::items::models::{Item, ItemStatus};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::patch::Patch;
use crate::shared::validation::{validate_no_nul, IMAGE_URL_REGEX};

// =============================================================================
// EVENT DATE
// =============================================================================

/// When the item was lost or found.
///
/// Accepts RFC 3339 (`2025-10-18T14:30:00+07:00`), a naive datetime
/// (`2025-10-18T14:30:00`, read as UTC) or a bare date (`2025-10-18`, midnight UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDate(pub DateTime<Utc>);

impl EventDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(Self(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Self(naive.and_utc()))
    }
}

impl<'de> Deserialize<'de> for EventDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        EventDate::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

// =============================================================================
// LIST
// =============================================================================

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query params for listing items
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ItemQueryParams {
    /// Case-insensitive search in title, description and location
    #[validate(custom(
        function = "validate_no_nul",
        message = "query must not contain NUL characters"
    ))]
    pub query: Option<String>,

    /// Filter by status: LOST, FOUND, REUNITED (any case)
    #[validate(custom(
        function = "validate_no_nul",
        message = "status must not contain NUL characters"
    ))]
    pub status: Option<String>,

    /// Filter by exact category
    #[validate(custom(
        function = "validate_no_nul",
        message = "category must not contain NUL characters"
    ))]
    pub category: Option<String>,

    /// Filter flagged (true) or unflagged (false) items
    pub is_flagged: Option<bool>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,

    /// Items per page (default: 20, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i64,
}

impl Default for ItemQueryParams {
    fn default() -> Self {
        Self {
            query: None,
            status: None,
            category: None,
            is_flagged: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ItemQueryParams {
    /// Calculate SQL OFFSET from page number. Saturates at `i64::MAX`, so a
    /// page far past the data still yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

// =============================================================================
// CREATE
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(
        length(min = 1, max = 255, message = "title must be 1-255 characters"),
        custom(function = "validate_no_nul", message = "title must not contain NUL characters")
    )]
    pub title: String,

    #[validate(
        length(min = 1, message = "description is required"),
        custom(function = "validate_no_nul", message = "description must not contain NUL characters")
    )]
    pub description: String,

    #[validate(
        length(min = 1, max = 50, message = "category must be 1-50 characters"),
        custom(function = "validate_no_nul", message = "category must not contain NUL characters")
    )]
    pub category: String,

    /// LOST, FOUND or REUNITED, case-insensitive; stored uppercase
    pub status: ItemStatus,

    #[validate(
        length(min = 1, max = 255, message = "location must be 1-255 characters"),
        custom(function = "validate_no_nul", message = "location must not contain NUL characters")
    )]
    pub location: String,

    #[schema(value_type = String, format = DateTime, example = "2025-10-18T14:30:00Z")]
    pub date: EventDate,

    #[validate(
        length(max = 500, message = "image_url must not exceed 500 characters"),
        regex(path = *IMAGE_URL_REGEX, message = "image_url must be an http(s) URL or an absolute path"),
        custom(function = "validate_no_nul", message = "image_url must not contain NUL characters")
    )]
    pub image_url: Option<String>,

    #[validate(
        length(max = 255, message = "contact_info must not exceed 255 characters"),
        custom(function = "validate_no_nul", message = "contact_info must not contain NUL characters")
    )]
    pub contact_info: Option<String>,

    pub reporter_id: Uuid,
}

// =============================================================================
// UPDATE
// =============================================================================

/// Partial update body. Keys left out are not touched; `null` clears nullable fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateItemDto {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub category: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<ItemStatus>)]
    pub status: Patch<ItemStatus>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub location: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub date: Patch<EventDate>,

    /// Send `null` to remove the image
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub image_url: Patch<String>,

    /// Send `null` to remove the contact info
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub contact_info: Patch<String>,
}

/// Validated column changes for an item update.
///
/// `None` means "leave the column alone". For the nullable columns,
/// `Some(None)` writes NULL.
#[derive(Debug, Default, Validate)]
pub struct ItemChanges {
    #[validate(
        length(min = 1, max = 255, message = "title must be 1-255 characters"),
        custom(function = "validate_no_nul", message = "title must not contain NUL characters")
    )]
    pub title: Option<String>,

    #[validate(
        length(min = 1, message = "description must not be empty"),
        custom(function = "validate_no_nul", message = "description must not contain NUL characters")
    )]
    pub description: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "category must be 1-50 characters"),
        custom(function = "validate_no_nul", message = "category must not contain NUL characters")
    )]
    pub category: Option<String>,

    pub status: Option<ItemStatus>,

    #[validate(
        length(min = 1, max = 255, message = "location must be 1-255 characters"),
        custom(function = "validate_no_nul", message = "location must not contain NUL characters")
    )]
    pub location: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(
        length(max = 500, message = "image_url must not exceed 500 characters"),
        regex(path = *IMAGE_URL_REGEX, message = "image_url must be an http(s) URL or an absolute path"),
        custom(function = "validate_no_nul", message = "image_url must not contain NUL characters")
    )]
    pub image_url: Option<Option<String>>,

    #[validate(
        length(max = 255, message = "contact_info must not exceed 255 characters"),
        custom(function = "validate_no_nul", message = "contact_info must not contain NUL characters")
    )]
    pub contact_info: Option<Option<String>>,
}

impl TryFrom<UpdateItemDto> for ItemChanges {
    type Error = AppError;

    fn try_from(dto: UpdateItemDto) -> Result<Self, Self::Error> {
        let changes = Self {
            title: dto.title.required("title")?,
            description: dto.description.required("description")?,
            category: dto.category.required("category")?,
            status: dto.status.required("status")?,
            location: dto.location.required("location")?,
            date: dto.date.map(|d| d.0).required("date")?,
            image_url: dto.image_url.into_option(),
            contact_info: dto.contact_info.into_option(),
        };

        changes
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(changes)
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub contact_info: Option<String>,
    pub reporter_id: Uuid,
    pub is_flagged: bool,
    pub ai_category_prediction: Option<String>,
    pub ai_moderation_score: Option<f64>,
    pub embedding: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponseDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            title: i.title,
            description: i.description,
            category: i.category,
            status: i.status,
            location: i.location,
            date: i.date,
            image_url: i.image_url,
            contact_info: i.contact_info,
            reporter_id: i.reporter_id,
            is_flagged: i.is_flagged,
            ai_category_prediction: i.ai_category_prediction,
            ai_moderation_score: i.ai_moderation_score,
            embedding: i.embedding,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_event_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 10, 18, 14, 30, 0).unwrap();

        assert_eq!(EventDate::parse("2025-10-18T14:30:00Z").unwrap().0, expected);
        assert_eq!(
            EventDate::parse("2025-10-18T21:30:00+07:00").unwrap().0,
            expected
        );
        assert_eq!(EventDate::parse("2025-10-18T14:30:00").unwrap().0, expected);
        assert_eq!(EventDate::parse("2025-10-18 14:30:00").unwrap().0, expected);
        assert_eq!(EventDate::parse("2025-10-18T14:30").unwrap().0, expected);
        assert_eq!(
            EventDate::parse("2025-10-18").unwrap().0,
            Utc.with_ymd_and_hms(2025, 10, 18, 0, 0, 0).unwrap()
        );
        assert!(EventDate::parse("18/10/2025").is_none());
        assert!(EventDate::parse("").is_none());
    }

    #[test]
    fn test_query_params_defaults_and_offset() {
        let params: ItemQueryParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert_eq!(params.offset(), 0);

        let params = ItemQueryParams {
            page: 3,
            page_size: 15,
            ..Default::default()
        };
        assert_eq!(params.offset(), 30);
        assert_eq!(params.limit(), 15);
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        let params = ItemQueryParams {
            page: 1_000_000_000_000_000_000,
            page_size: 20,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.offset(), i64::MAX);

        let params = ItemQueryParams {
            page: i64::MAX,
            page_size: 100,
            ..Default::default()
        };
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_query_params_range_validation() {
        let ok = ItemQueryParams {
            page_size: 100,
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        for (page, page_size) in [(0, 20), (1, 0), (1, 101), (-2, 20)] {
            let params = ItemQueryParams {
                page,
                page_size,
                ..Default::default()
            };
            assert!(
                params.validate().is_err(),
                "page={} page_size={} should be rejected",
                page,
                page_size
            );
        }
    }

    fn create_body() -> serde_json::Value {
        serde_json::json!({
            "title": "iPhone 13 Pro",
            "description": "Black iPhone 13 Pro, cracked screen protector",
            "category": "Electronics",
            "status": "lost",
            "location": "Library 2nd Floor",
            "date": "2025-10-18",
            "reporter_id": "0192a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b"
        })
    }

    #[test]
    fn test_create_dto_normalizes_status() {
        let dto: CreateItemDto = serde_json::from_value(create_body()).unwrap();
        assert_eq!(dto.status, ItemStatus::Lost);
        assert_eq!(dto.status.as_str(), "LOST");
        assert!(dto.image_url.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_unknown_status() {
        let mut body = create_body();
        body["status"] = serde_json::json!("stolen");
        assert!(serde_json::from_value::<CreateItemDto>(body).is_err());
    }

    #[test]
    fn test_create_dto_validation() {
        let mut body = create_body();
        body["title"] = serde_json::json!("");
        body["image_url"] = serde_json::json!("not a url");
        let dto: CreateItemDto = serde_json::from_value(body).unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("image_url"));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let dto: UpdateItemDto = serde_json::from_str("{}").unwrap();
        let changes = ItemChanges::try_from(dto).unwrap();

        assert!(changes.title.is_none());
        assert!(changes.status.is_none());
        assert!(changes.date.is_none());
        assert!(changes.image_url.is_none());
        assert!(changes.contact_info.is_none());
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let dto: UpdateItemDto =
            serde_json::from_str(r#"{"contact_info": null, "status": "reunited"}"#).unwrap();
        let changes = ItemChanges::try_from(dto).unwrap();

        assert_eq!(changes.contact_info, Some(None));
        assert_eq!(changes.image_url, None);
        assert_eq!(changes.status, Some(ItemStatus::Reunited));
    }

    #[test]
    fn test_patch_rejects_null_on_required_fields() {
        for field in ["title", "description", "category", "status", "location", "date"] {
            let body = format!(r#"{{"{}": null}}"#, field);
            let dto: UpdateItemDto = serde_json::from_str(&body).unwrap();
            let err = ItemChanges::try_from(dto).unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref msg) if msg == &format!("{} cannot be null", field)),
                "unexpected error for {}: {:?}",
                field,
                err
            );
        }
    }

    #[test]
    fn test_patch_validates_supplied_values() {
        let dto: UpdateItemDto =
            serde_json::from_str(r#"{"title": "", "image_url": "ftp://x/y.png"}"#).unwrap();
        assert!(matches!(
            ItemChanges::try_from(dto),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_nul_characters_are_rejected() {
        let params = ItemQueryParams {
            query: Some("pho\0ne".to_string()),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let mut body = create_body();
        body["title"] = serde_json::json!("iPhone\u{0}13");
        let dto: CreateItemDto = serde_json::from_value(body).unwrap();
        assert!(dto.validate().unwrap_err().field_errors().contains_key("title"));

        let dto: UpdateItemDto =
            serde_json::from_str(r#"{"contact_info": "desk\u0000 B"}"#).unwrap();
        assert!(matches!(
            ItemChanges::try_from(dto),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_patch_accepts_new_image_url() {
        let dto: UpdateItemDto =
            serde_json::from_str(r#"{"image_url": "/uploads/abc.png"}"#).unwrap();
        let changes = ItemChanges::try_from(dto).unwrap();
        assert_eq!(changes.image_url, Some(Some("/uploads/abc.png".to_string())));
    }
}
