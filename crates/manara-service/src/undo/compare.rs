//! Field-level comparison of two snapshots.

use serde::{Deserialize, Serialize};

use manara_core::types::Snapshot;

/// One field whose coerced value differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDiff {
    pub field: String,
    pub old: String,
    pub new: String,
}

/// Result of [`compare`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// `true` iff `diff` is non-empty.
    pub changed: bool,
    pub diff: Vec<FieldDiff>,
}

/// Compare two snapshots field by field, skipping `id_field`.
///
/// Values are compared as exact strings; both snapshots must already have
/// gone through the same coercion. A field present on only one side is
/// compared against `""`. The diff follows the field order of `old`, then
/// any fields only `new` carries.
pub fn compare(old: &Snapshot, new: &Snapshot, id_field: &str) -> Comparison {
    let diff: Vec<FieldDiff> = old
        .keys()
        .chain(new.keys().filter(|k| !old.contains(k)))
        .filter(|field| *field != id_field)
        .filter_map(|field| {
            let before = old.get(field).unwrap_or_default();
            let after = new.get(field).unwrap_or_default();
            (before != after).then(|| FieldDiff {
                field: field.to_string(),
                old: before.to_string(),
                new: after.to_string(),
            })
        })
        .collect();

    Comparison {
        changed: !diff.is_empty(),
        diff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manara_core::types::model_type::ID_FIELD;

    fn product(name: &str) -> Snapshot {
        Snapshot::new()
            .field("id", 42_i64)
            .field("name_en", name)
            .field("name_ar", "حديد")
            .field("is_active", true)
            .field("sort_order", 2_i32)
    }

    #[test]
    fn test_identical_snapshots_unchanged() {
        let result = compare(&product("Rebar 10mm"), &product("Rebar 10mm"), ID_FIELD);
        assert!(!result.changed);
        assert!(result.diff.is_empty());
    }

    #[test]
    fn test_single_field_change() {
        let result = compare(&product("Rebar 10mm"), &product("Rebar 12mm"), ID_FIELD);
        assert!(result.changed);
        assert_eq!(
            result.diff,
            vec![FieldDiff {
                field: "name_en".to_string(),
                old: "Rebar 10mm".to_string(),
                new: "Rebar 12mm".to_string(),
            }]
        );
    }

    #[test]
    fn test_identifier_is_ignored() {
        let old = product("x");
        let new = product("x").field("id", 43_i64);
        assert!(!compare(&old, &new, ID_FIELD).changed);
    }

    #[test]
    fn test_coerced_booleans_compare_equal() {
        // A form posting "1" must match a stored `true`.
        let old = product("x");
        let new = product("x").field("is_active", "1").field("sort_order", "2");
        assert!(!compare(&old, &new, ID_FIELD).changed);
    }

    #[test]
    fn test_missing_field_compares_as_empty() {
        let old = Snapshot::new().field("id", 1_i64).field("notes", "");
        let new = Snapshot::new().field("id", 1_i64);
        assert!(!compare(&old, &new, ID_FIELD).changed);

        let new = Snapshot::new().field("id", 1_i64).field("phone", "555");
        let result = compare(&old, &new, ID_FIELD);
        assert_eq!(result.diff.len(), 1);
        assert_eq!(result.diff[0].field, "phone");
    }

    #[test]
    fn test_diff_order_follows_old_snapshot() {
        let old = product("a").field("slug", "a");
        let new = product("b").field("is_active", false).field("slug", "b");
        let fields: Vec<_> = compare(&old, &new, ID_FIELD)
            .diff
            .into_iter()
            .map(|d| d.field)
            .collect();
        assert_eq!(fields, vec!["name_en", "is_active", "slug"]);
    }
}
