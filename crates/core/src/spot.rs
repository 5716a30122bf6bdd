//! Spot data model.
//!
//! The persisted document is schema-loose: records may carry fields this crate
//! knows nothing about, and those must survive a load/save cycle untouched. A
//! [`SpotRecord`] is therefore a thin wrapper over a JSON object with typed
//! accessors for the fields the backend and admin flow understand.
//!
//! ```text
//! {
//!   "spots": [
//!     {
//!       "id": "lake-1",
//!       "name": "Lake",
//!       "tags": ["water"],
//!       "detailSections": [{ "title": "...", "paragraphs": ["..."] }]
//!     }
//!   ]
//! }
//! ```

use crate::constants::{DETAIL_SECTIONS_KEY, ID_KEY, NAME_KEY};
use crate::validation::id_matches;
use crate::{StorageError, StorageResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single scenic spot record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotRecord(Map<String, Value>);

impl SpotRecord {
    /// Creates a record holding only an id and a name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let (id, name): (String, String) = (id.into(), name.into());
        Self::default().with(ID_KEY, id).with(NAME_KEY, name)
    }

    /// Builder-style setter, replacing any previous value under `key`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field(ID_KEY)
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field(NAME_KEY)
    }

    pub fn location(&self) -> Option<&str> {
        self.str_field("location")
    }

    pub fn summary(&self) -> Option<&str> {
        self.str_field("summary")
    }

    pub fn hero_image(&self) -> Option<&str> {
        self.str_field("heroImage")
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.str_field("thumbnail")
    }

    /// String entries of `tags`; non-string entries are skipped.
    pub fn tags(&self) -> Vec<&str> {
        self.0
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Decoded `detailSections`, one per stored entry and in stored order.
    ///
    /// Decoding is lenient (see [`DetailSection`]). An entry that is not a JSON
    /// object reads as an empty section; the stored value is left untouched.
    pub fn detail_sections(&self) -> Vec<DetailSection> {
        self.0
            .get(DETAIL_SECTIONS_KEY)
            .and_then(Value::as_array)
            .map(|sections| {
                sections
                    .iter()
                    .map(|raw| serde_json::from_value(raw.clone()).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Case-insensitive id comparison against a precomputed lookup key.
    /// Records without a string id compare as the empty id.
    pub(crate) fn matches_key(&self, key: &str) -> bool {
        id_matches(self.id().unwrap_or(""), key)
    }

    /// Appends an already-serialised section, creating `detailSections` if absent.
    pub(crate) fn push_detail_section(&mut self, section: Value) -> StorageResult<()> {
        if !matches!(self.0.get(DETAIL_SECTIONS_KEY), None | Some(Value::Array(_))) {
            return Err(StorageError::validation(format!(
                "Spot '{}' has a non-list '{}' field; cannot append detail section.",
                self.id().unwrap_or_default(),
                DETAIL_SECTIONS_KEY
            )));
        }

        if let Value::Array(sections) = self
            .0
            .entry(DETAIL_SECTIONS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            sections.push(section);
        }
        Ok(())
    }
}

impl From<Map<String, Value>> for SpotRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for SpotRecord {
    type Error = StorageError;

    fn try_from(value: Value) -> StorageResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StorageError::validation(format!(
                "Spot record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// A titled block of descriptive content attached to a spot.
///
/// Stored sections are not validated, so decoding accepts off-shape values:
/// `null` reads as empty, numbers and booleans read as their text, and a bare
/// string under `paragraphs` reads as a single paragraph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailSection {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub emphasis: String,
    #[serde(default, deserialize_with = "lenient_paragraphs")]
    pub paragraphs: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_alt: String,
    /// Keys not covered by the fields above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole persisted state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub spots: Vec<SpotRecord>,
    /// Top-level keys other than `spots`, kept so rewrites do not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Position of the first record whose id matches `key` case-insensitively.
    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.spots.iter().position(|spot| spot.matches_key(key))
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_paragraphs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_fields_survive_round_trip() {
        let raw = json!({
            "id": "lake-1",
            "name": "Lake",
            "rating": 4.5,
            "detailSections": [{ "title": "Shore", "credit": "A. Person" }]
        });

        let record = SpotRecord::try_from(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);

        let sections = record.detail_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Shore");
        assert_eq!(sections[0].extra.get("credit"), Some(&json!("A. Person")));
    }

    #[test]
    fn accessors_read_known_fields() {
        let record = SpotRecord::new("peak", "Peak")
            .with("location", "North ridge")
            .with("heroImage", "/img/peak.jpg")
            .with("tags", json!(["hike", 3, "view"]));

        assert_eq!(record.id(), Some("peak"));
        assert_eq!(record.name(), Some("Peak"));
        assert_eq!(record.location(), Some("North ridge"));
        assert_eq!(record.hero_image(), Some("/img/peak.jpg"));
        assert_eq!(record.summary(), None);
        assert_eq!(record.tags(), vec!["hike", "view"]);
    }

    #[test]
    fn section_serialises_camel_case() {
        let section = DetailSection {
            title: "Gate".into(),
            image_alt: "Stone gate".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["imageAlt"], "Stone gate");
        assert_eq!(value["paragraphs"], json!([]));
    }

    #[test]
    fn off_shape_sections_are_still_listed() {
        let record = SpotRecord::try_from(json!({
            "id": "t",
            "detailSections": [
                { "title": "A", "paragraphs": "single string" },
                { "title": null, "image": "x.jpg", "paragraphs": ["p1", null, 2] },
                "loose text"
            ]
        }))
        .unwrap();

        let sections = record.detail_sections();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "A");
        assert_eq!(sections[0].paragraphs, vec!["single string"]);
        assert_eq!(sections[1].title, "");
        assert_eq!(sections[1].image, "x.jpg");
        assert_eq!(sections[1].paragraphs, vec!["p1", "2"]);
        assert_eq!(sections[2], DetailSection::default());
    }

    #[test]
    fn push_detail_section_rejects_non_list_field() {
        let mut record = SpotRecord::new("a", "A").with(DETAIL_SECTIONS_KEY, "oops");
        let err = record.push_detail_section(json!({})).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)));
    }

    #[test]
    fn document_without_spots_key_is_empty() {
        let doc: Document = serde_json::from_value(json!({ "version": 2 })).unwrap();
        assert!(doc.spots.is_empty());
        assert_eq!(doc.extra.get("version"), Some(&json!(2)));
    }

    #[test]
    fn non_object_value_is_not_a_record() {
        let err = SpotRecord::try_from(json!(["lake"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
    }
}
