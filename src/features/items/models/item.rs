use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Column list shared by every statement that returns full item rows
pub const ITEM_COLUMNS: &str = "id, title, description, category, status, location, date, \
     image_url, contact_info, reporter_id, is_flagged, ai_category_prediction, \
     ai_moderation_score, embedding, created_at, updated_at";

/// Item status. Stored as uppercase text; accepted in any case on input.
///
/// Any status may follow any other, there is no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Lost,
    Found,
    Reunited,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "LOST",
            ItemStatus::Found => "FOUND",
            ItemStatus::Reunited => "REUNITED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOST" => Ok(ItemStatus::Lost),
            "FOUND" => Ok(ItemStatus::Found),
            "REUNITED" => Ok(ItemStatus::Reunited),
            _ => Err(format!(
                "Invalid status '{}'. Allowed: LOST, FOUND, REUNITED",
                s
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Database model for items
#[derive(Debug, Clone, FromRow)]
pub struct Item {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("lost".parse::<ItemStatus>().unwrap(), ItemStatus::Lost);
        assert_eq!("Found".parse::<ItemStatus>().unwrap(), ItemStatus::Found);
        assert_eq!(" REUNITED ".parse::<ItemStatus>().unwrap(), ItemStatus::Reunited);
        assert!("missing".parse::<ItemStatus>().is_err());
        assert!("".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ItemStatus::Reunited).unwrap();
        assert_eq!(json, "\"REUNITED\"");

        let status: ItemStatus = serde_json::from_str("\"lost\"").unwrap();
        assert_eq!(status.as_str(), "LOST");
    }
}
