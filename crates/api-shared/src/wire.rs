//! JSON wire types.
//!
//! Response bodies keep the key names the frontend already consumes
//! (`spots`/`count`, `error`/`spot_id`/`fields`).

use serde::{Deserialize, Serialize};
use spots_core::SpotRecord;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
}

/// Body of `GET /api/spots`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListSpotsRes {
    #[schema(value_type = Vec<SpotDoc>)]
    pub spots: Vec<SpotRecord>,
    pub count: usize,
}

impl ListSpotsRes {
    pub fn new(spots: Vec<SpotRecord>) -> Self {
        let count = spots.len();
        Self { spots, count }
    }
}

/// Error body returned by every JSON endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            spot_id: None,
            fields: None,
        }
    }

    pub fn spot_not_found(spot_id: impl Into<String>) -> Self {
        Self {
            spot_id: Some(spot_id.into()),
            ..Self::new("Spot not found")
        }
    }

    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self {
            fields: Some(fields),
            ..Self::new("Missing required fields")
        }
    }
}

/// OpenAPI description of a stored spot.
///
/// Documentation only; records travel as [`SpotRecord`] and may carry extra keys.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpotDoc {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub hero_image: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Option<Vec<String>>,
    pub detail_sections: Option<Vec<DetailSectionDoc>>,
}

/// OpenAPI description of a detail section.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetailSectionDoc {
    pub title: String,
    pub emphasis: String,
    pub paragraphs: Vec<String>,
    pub image: String,
    pub image_alt: String,
}
