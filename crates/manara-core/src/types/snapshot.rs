//! Flat field-name → string snapshots of an entity's trackable state.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::model_type::{ID_FIELD, ModelType, field_label};
use super::value::{FieldKind, SnapshotValue, coerce_json};
use crate::error::AppError;
use crate::result::AppResult;

/// An ordered field-name → string map captured at one point in time.
///
/// Values are always coerced strings (see [`SnapshotValue`]). Deserializing
/// accepts any flat JSON object and coerces scalars with the same rules, so
/// rows written by older code or submitted by forms compare consistently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct Snapshot(IndexMap<String, String>);

/// One field whose value differs between two snapshots, labelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Field name.
    pub field: String,
    /// Display label for the field.
    pub label: String,
    /// Value before the change.
    pub old: String,
    /// Value after the change.
    pub new: String,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Builder-style insert of a coerced value.
    pub fn field(mut self, name: &str, value: impl SnapshotValue) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or overwrite a coerced value.
    pub fn set(&mut self, name: &str, value: impl SnapshotValue) {
        self.0.insert(name.to_string(), value.to_snapshot());
    }

    /// Look up a raw snapshot string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields, identifier included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in capture order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(field, value)` pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a flat JSON object, coercing every scalar value.
    pub fn from_json(value: &serde_json::Value) -> AppResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| AppError::validation("Snapshot must be a JSON object"))?;
        let mut map = IndexMap::with_capacity(object.len());
        for (field, v) in object {
            map.insert(field.clone(), coerce_json(field, v)?);
        }
        Ok(Self(map))
    }

    /// Render as a JSON object of strings.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    /// The record identifier carried in the `id` field, if any.
    pub fn id(&self) -> Option<i64> {
        self.get(ID_FIELD).and_then(|v| v.parse().ok())
    }

    /// Check that this snapshot carries exactly the identifier plus the
    /// trackable fields of `model_type`.
    pub fn validate_for(&self, model_type: ModelType) -> AppResult<()> {
        let expected = model_type.tracked_fields();
        let missing: Vec<&str> = std::iter::once(ID_FIELD)
            .chain(expected.iter().copied())
            .filter(|f| !self.contains(f))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::validation(format!(
                "Snapshot for {model_type} is missing fields: {}",
                missing.join(", ")
            )));
        }
        let unexpected: Vec<&str> = self
            .keys()
            .filter(|k| *k != ID_FIELD && !expected.contains(k))
            .collect();
        if !unexpected.is_empty() {
            return Err(AppError::validation(format!(
                "Snapshot for {model_type} has unknown fields: {}",
                unexpected.join(", ")
            )));
        }
        Ok(())
    }

    /// Rewrite every field into the canonical form of its kind for
    /// `model_type` (`"true"` → `"1"`, `"3.0"` → `"3"`, datetimes → dates).
    ///
    /// Fails when a value cannot be read as its field's kind. The
    /// identifier is kept as is.
    pub fn normalized_for(&self, model_type: ModelType) -> AppResult<Snapshot> {
        self.iter()
            .map(|(field, value)| {
                let value = model_type.field_kind(field).normalize(field, value)?;
                Ok((field.to_string(), value))
            })
            .collect()
    }

    /// Labelled list of fields whose values differ from `new`.
    ///
    /// The identifier is never reported. Used for display only.
    pub fn changes_to(&self, new: &Snapshot) -> Vec<FieldChange> {
        self.keys()
            .chain(new.keys().filter(|k| !self.contains(k)))
            .filter(|f| *f != ID_FIELD)
            .filter_map(|f| {
                let old = self.get(f).unwrap_or_default();
                let new = new.get(f).unwrap_or_default();
                (old != new).then(|| FieldChange {
                    field: f.to_string(),
                    label: field_label(f),
                    old: old.to_string(),
                    new: new.to_string(),
                })
            })
            .collect()
    }

    /// Required text value.
    pub fn text(&self, name: &str) -> AppResult<String> {
        self.get(name)
            .map(str::to_string)
            .ok_or_else(|| AppError::validation(format!("Snapshot is missing '{name}'")))
    }

    /// Optional text value; an empty string reads as `None`.
    pub fn opt_text(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Boolean value written as `"1"`/`"0"`. Form spellings accepted by
    /// [`FieldKind::Flag`] are read too; an empty string is false.
    pub fn flag(&self, name: &str) -> AppResult<bool> {
        let v = FieldKind::Flag.normalize(name, self.get(name).unwrap_or_default())?;
        Ok(v == "1")
    }

    /// Required integer value.
    pub fn int(&self, name: &str) -> AppResult<i64> {
        self.opt_int(name)?
            .ok_or_else(|| AppError::validation(format!("Field '{name}' is required")))
    }

    /// Optional integer value; an empty string reads as `None`.
    pub fn opt_int(&self, name: &str) -> AppResult<Option<i64>> {
        let v = FieldKind::Integer.normalize(name, self.get(name).unwrap_or_default())?;
        if v.is_empty() {
            return Ok(None);
        }
        v.parse().map(Some).map_err(|_| {
            AppError::validation(format!("Field '{name}' is not an integer: '{v}'"))
        })
    }

    /// Optional ISO-8601 date; an empty string reads as `None`.
    pub fn opt_date(&self, name: &str) -> AppResult<Option<NaiveDate>> {
        match self.get(name).unwrap_or_default() {
            "" => Ok(None),
            v => NaiveDate::parse_from_str(v, "%Y-%m-%d").map(Some).map_err(|_| {
                AppError::validation(format!("Field '{name}' is not a date: '{v}'"))
            }),
        }
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for Snapshot {
    type Error = AppError;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut map = IndexMap::with_capacity(raw.len());
        for (field, v) in raw {
            let coerced = coerce_json(&field, &v)?;
            map.insert(field, coerced);
        }
        Ok(Self(map))
    }
}

impl FromIterator<(String, String)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
