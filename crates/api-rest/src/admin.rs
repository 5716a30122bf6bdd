//! Admin data-entry pages under `/admin`.
//!
//! Two form flows: create a spot, then attach detail sections to it. Validation
//! failures re-render the form with the submitted values filled back in.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use serde_json::Value;
use spots_core::{validation::missing_fields, DetailSection, SpotRecord};

use crate::error::AdminError;
use crate::html::{self, DetailPage, SpotPage};
use crate::state::AppState;

/// Fields of the "new spot" form. `tags` is the raw comma-separated text.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotForm {
    pub id: String,
    pub name: String,
    pub location: String,
    pub summary: String,
    pub hero_image: String,
    pub thumbnail: String,
    pub tags: String,
}

impl SpotForm {
    fn trimmed(self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            summary: self.summary.trim().to_string(),
            hero_image: self.hero_image.trim().to_string(),
            thumbnail: self.thumbnail.trim().to_string(),
            tags: split_tags(&self.tags).join(", "),
        }
    }

    fn is_filled(&self, field: &str) -> bool {
        match field {
            "id" => !self.id.is_empty(),
            "name" => !self.name.is_empty(),
            _ => true,
        }
    }

    /// The record stored for a new spot: every form field plus an empty
    /// `detailSections` list.
    fn to_record(&self) -> SpotRecord {
        let tags: Vec<Value> = split_tags(&self.tags).into_iter().map(Value::from).collect();

        SpotRecord::new(self.id.as_str(), self.name.as_str())
            .with("location", self.location.as_str())
            .with("summary", self.summary.as_str())
            .with("heroImage", self.hero_image.as_str())
            .with("thumbnail", self.thumbnail.as_str())
            .with("tags", tags)
            .with("detailSections", Vec::<Value>::new())
    }
}

/// Fields of the "new detail section" form. `paragraphs` is the raw
/// newline-separated text.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailForm {
    pub title: String,
    pub emphasis: String,
    pub paragraphs: String,
    pub image: String,
    pub image_alt: String,
}

impl DetailForm {
    fn to_section(&self) -> DetailSection {
        DetailSection {
            title: self.title.trim().to_string(),
            emphasis: self.emphasis.trim().to_string(),
            paragraphs: split_paragraphs(&self.paragraphs),
            image: self.image.trim().to_string(),
            image_alt: self.image_alt.trim().to_string(),
            ..Default::default()
        }
    }

    /// The form as re-rendered after a failed submit: trimmed values, raw paragraphs.
    fn refill(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            emphasis: self.emphasis.trim().to_string(),
            paragraphs: self.paragraphs.clone(),
            image: self.image.trim().to_string(),
            image_alt: self.image_alt.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub created: Option<String>,
}

/// Renders the empty "new spot" form.
pub async fn new_spot_form(State(state): State<AppState>) -> Result<Html<String>, AdminError> {
    let spots = state.store.list_spots()?;
    Ok(html::spot_page(&spots, &SpotPage::default()))
}

/// Handles the "new spot" form.
///
/// On success redirects to the detail-section form of the new spot with
/// `created=1`; otherwise re-renders the form with errors.
pub async fn create_spot(
    State(state): State<AppState>,
    Form(form): Form<SpotForm>,
) -> Result<Response, AdminError> {
    let form = form.trimmed();
    let mut page = SpotPage::default();

    let missing = missing_fields(&["id", "name"], |field| form.is_filled(field));
    if !missing.is_empty() {
        page.errors
            .push(format!("Required fields missing: {}", missing.join(", ")));
        page.prefill = form;
    } else {
        match state.store.upsert_spot(form.to_record()) {
            Ok(record) => {
                let target = format!(
                    "{}?created=1",
                    html::detail_form_path(record.id().unwrap_or(&form.id))
                );
                return Ok(Redirect::to(&target).into_response());
            }
            Err(e) => {
                tracing::warn!("Admin create spot rejected: {}", e);
                page.errors.push(e.to_string());
                page.prefill = form;
            }
        }
    }

    let spots = state.store.list_spots()?;
    Ok(html::spot_page(&spots, &page).into_response())
}

/// Renders the detail-section form for an existing spot.
pub async fn new_detail_form(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Html<String>, AdminError> {
    let spot = load_spot(&state, &spot_id)?;
    let page = DetailPage {
        created: query.created.as_deref() == Some("1"),
        ..Default::default()
    };
    Ok(html::detail_page(&spot, &page))
}

/// Handles the detail-section form.
///
/// `title` and `image` are required. On success the page is re-rendered with
/// an empty form and the refreshed spot.
pub async fn create_detail(
    State(state): State<AppState>,
    Path(spot_id): Path<String>,
    Form(form): Form<DetailForm>,
) -> Result<Html<String>, AdminError> {
    let mut spot = load_spot(&state, &spot_id)?;
    let section = form.to_section();
    let mut page = DetailPage::default();

    let missing = missing_fields(&["title", "image"], |field| match field {
        "title" => !section.title.is_empty(),
        "image" => !section.image.is_empty(),
        _ => true,
    });

    if !missing.is_empty() {
        page.errors
            .push(format!("Required fields missing: {}", missing.join(", ")));
        page.prefill = form.refill();
    } else {
        match state.store.append_detail_section(&spot_id, section) {
            Ok(_) => {
                page.submitted = true;
                spot = load_spot(&state, &spot_id)?;
            }
            Err(e) => {
                tracing::warn!("Admin append detail section rejected: {}", e);
                page.errors.push(e.to_string());
                page.prefill = form.refill();
            }
        }
    }

    Ok(html::detail_page(&spot, &page))
}

fn load_spot(state: &AppState, spot_id: &str) -> Result<SpotRecord, AdminError> {
    state
        .store
        .get_spot(spot_id)?
        .ok_or_else(|| AdminError::spot_not_found(spot_id))
}

fn split_tags(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Line boundaries recognised in pasted paragraph text.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

fn split_paragraphs(raw: &str) -> Vec<String> {
    raw.split(LINE_BREAKS)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}
