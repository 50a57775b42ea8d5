//! Normalisation of typed column values into snapshot strings.
//!
//! Snapshots compare values as strings, so every value is coerced through
//! the same rules on both sides of a comparison:
//!
//! | input | snapshot string |
//! |---|---|
//! | `true` / `false` | `"1"` / `"0"` |
//! | `None` / JSON `null` | `""` |
//! | integers | decimal (`42`) |
//! | floats | shortest decimal (`10.0` → `"10"`, `2.5` → `"2.5"`) |
//! | dates | ISO-8601 (`2025-03-01`) |
//! | timestamps | RFC 3339, UTC, whole seconds |

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

/// A value that can be stored in a [`Snapshot`](super::Snapshot).
pub trait SnapshotValue {
    /// Coerce the value into its canonical snapshot string.
    fn to_snapshot(&self) -> String;
}

impl SnapshotValue for str {
    fn to_snapshot(&self) -> String {
        self.to_string()
    }
}

impl SnapshotValue for String {
    fn to_snapshot(&self) -> String {
        self.clone()
    }
}

impl SnapshotValue for bool {
    fn to_snapshot(&self) -> String {
        let s = if *self { "1" } else { "0" };
        s.to_string()
    }
}

macro_rules! integer_snapshot_value {
    ($($t:ty),*) => {
        $(
            impl SnapshotValue for $t {
                fn to_snapshot(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_snapshot_value!(i16, i32, i64, u16, u32, u64);

impl SnapshotValue for f64 {
    fn to_snapshot(&self) -> String {
        canonical_float(*self)
    }
}

impl SnapshotValue for NaiveDate {
    fn to_snapshot(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl SnapshotValue for DateTime<Utc> {
    fn to_snapshot(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl SnapshotValue for Uuid {
    fn to_snapshot(&self) -> String {
        self.to_string()
    }
}

impl<T: SnapshotValue> SnapshotValue for Option<T> {
    fn to_snapshot(&self) -> String {
        match self {
            Some(v) => v.to_snapshot(),
            None => String::new(),
        }
    }
}

impl<T: SnapshotValue + ?Sized> SnapshotValue for &T {
    fn to_snapshot(&self) -> String {
        (**self).to_snapshot()
    }
}

/// Coerce a JSON scalar (as submitted by an admin form) into a snapshot string.
///
/// Arrays and objects are rejected: snapshots are flat.
pub fn coerce_json(field: &str, value: &serde_json::Value) -> AppResult<String> {
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Bool(b) => Ok(b.to_snapshot()),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_snapshot())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_snapshot())
            } else {
                n.as_f64()
                    .map(canonical_float)
                    .ok_or_else(|| AppError::validation(format!("Invalid number for '{field}'")))
            }
        }
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(AppError::validation(
            format!("Field '{field}' must be a scalar value"),
        )),
    }
}

/// The storage type of a trackable field, used to normalise submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, kept as submitted.
    Text,
    /// Boolean column stored as `"1"`/`"0"`.
    Flag,
    /// Integer column.
    Integer,
    /// Date column stored as `YYYY-MM-DD`.
    Date,
}

impl FieldKind {
    /// Rewrite a submitted string into the canonical snapshot form for this
    /// kind, so form text and typed column values compare equal.
    ///
    /// An empty string stays empty for every kind.
    pub fn normalize(&self, field: &str, raw: &str) -> AppResult<String> {
        match self {
            Self::Text => Ok(raw.to_string()),
            Self::Flag => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => Ok(true.to_snapshot()),
                "0" | "false" | "off" | "no" => Ok(false.to_snapshot()),
                "" => Ok(String::new()),
                _ => Err(AppError::validation(format!(
                    "Field '{field}' is not a boolean: '{raw}'"
                ))),
            },
            Self::Integer => {
                let v = raw.trim();
                if v.is_empty() {
                    return Ok(String::new());
                }
                if let Ok(i) = v.parse::<i64>() {
                    return Ok(i.to_snapshot());
                }
                match v.parse::<f64>() {
                    Ok(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                        Ok((f as i64).to_snapshot())
                    }
                    _ => Err(AppError::validation(format!(
                        "Field '{field}' is not an integer: '{raw}'"
                    ))),
                }
            }
            Self::Date => {
                let v = raw.trim();
                if v.is_empty() {
                    return Ok(String::new());
                }
                // Datetime inputs keep only their date part.
                let date_part = v.get(..10).filter(|_| {
                    v.len() == 10 || matches!(v.as_bytes().get(10), Some(b'T' | b' '))
                });
                date_part
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                    .map(|d| d.to_snapshot())
                    .ok_or_else(|| {
                        AppError::validation(format!("Field '{field}' is not a date: '{raw}'"))
                    })
            }
        }
    }
}

fn canonical_float(v: f64) -> String {
    if v == 0.0 {
        // Collapses -0.0 as well.
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_and_null_coercion() {
        assert_eq!(true.to_snapshot(), "1");
        assert_eq!(false.to_snapshot(), "0");
        assert_eq!(None::<String>.to_snapshot(), "");
        assert_eq!(Some(5_i32).to_snapshot(), "5");
    }

    #[test]
    fn test_float_canonical_form() {
        assert_eq!(10.0_f64.to_snapshot(), "10");
        assert_eq!(2.5_f64.to_snapshot(), "2.5");
        assert_eq!((-0.0_f64).to_snapshot(), "0");
    }

    #[test]
    fn test_date_formats() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 1).expect("date");
        assert_eq!(d.to_snapshot(), "2025-03-01");
    }

    #[test]
    fn test_json_coercion_matches_typed_coercion() {
        assert_eq!(coerce_json("f", &json!(true)).unwrap(), true.to_snapshot());
        assert_eq!(coerce_json("f", &json!(null)).unwrap(), None::<i64>.to_snapshot());
        assert_eq!(coerce_json("f", &json!(12)).unwrap(), 12_i64.to_snapshot());
        assert_eq!(coerce_json("f", &json!(12.0)).unwrap(), "12");
        assert_eq!(coerce_json("f", &json!("Rebar")).unwrap(), "Rebar");
    }

    #[test]
    fn test_flag_normalisation() {
        for raw in ["1", "true", "TRUE", "on", "yes"] {
            assert_eq!(FieldKind::Flag.normalize("f", raw).unwrap(), "1", "{raw}");
        }
        for raw in ["0", "false", "off", "no"] {
            assert_eq!(FieldKind::Flag.normalize("f", raw).unwrap(), "0", "{raw}");
        }
        assert_eq!(FieldKind::Flag.normalize("f", "").unwrap(), "");
        assert!(FieldKind::Flag.normalize("f", "maybe").is_err());
    }

    #[test]
    fn test_integer_normalisation() {
        assert_eq!(FieldKind::Integer.normalize("n", "3.0").unwrap(), "3");
        assert_eq!(FieldKind::Integer.normalize("n", " 10 ").unwrap(), "10");
        assert_eq!(FieldKind::Integer.normalize("n", "-2").unwrap(), "-2");
        assert_eq!(FieldKind::Integer.normalize("n", "").unwrap(), "");
        assert!(FieldKind::Integer.normalize("n", "3.5").is_err());
        assert!(FieldKind::Integer.normalize("n", "abc").is_err());
    }

    #[test]
    fn test_date_normalisation() {
        assert_eq!(
            FieldKind::Date.normalize("d", "2025-03-01").unwrap(),
            "2025-03-01"
        );
        assert_eq!(
            FieldKind::Date.normalize("d", "2025-03-01T00:00:00Z").unwrap(),
            "2025-03-01"
        );
        assert_eq!(
            FieldKind::Date.normalize("d", "2025-03-01 08:30:00").unwrap(),
            "2025-03-01"
        );
        assert_eq!(FieldKind::Date.normalize("d", "").unwrap(), "");
        assert!(FieldKind::Date.normalize("d", "01/03/2025").is_err());
        assert!(FieldKind::Date.normalize("d", "2025-03-011").is_err());
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        assert_eq!(FieldKind::Text.normalize("t", " 3.0 ").unwrap(), " 3.0 ");
    }

    #[test]
    fn test_json_rejects_nested_values() {
        assert!(coerce_json("f", &json!([1, 2])).is_err());
        assert!(coerce_json("f", &json!({"a": 1})).is_err());
    }
}
