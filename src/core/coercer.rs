use crate::domain::model::PolymorphicField;
use serde_json::Value;

/// Display string for a category/tag/author value of any shape.
pub fn coerce_name(field: &Value) -> String {
    PolymorphicField::from_value(field).display_name()
}

/// Same as [`coerce_name`] for an attribute that may be missing.
pub fn coerce_optional(field: Option<&Value>) -> String {
    field.map(coerce_name).unwrap_or_default()
}

/// Labels for a tag list. A single non-array value is treated as one tag;
/// null gives no tags.
pub fn coerce_names(field: &Value) -> Vec<String> {
    match field {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().map(coerce_name).collect(),
        single => vec![coerce_name(single)],
    }
}

pub fn join_labels(fields: &[PolymorphicField], separator: &str) -> String {
    fields
        .iter()
        .map(PolymorphicField::display_name)
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_name_examples() {
        assert_eq!(coerce_name(&json!(null)), "");
        assert_eq!(coerce_name(&json!({"name": "Phishing"})), "Phishing");
        assert_eq!(coerce_name(&json!(7)), "7");
        assert_eq!(coerce_name(&json!("Cloud")), "Cloud");
    }

    #[test]
    fn test_coerce_name_is_total() {
        assert_eq!(coerce_name(&json!({})), "");
        assert_eq!(coerce_name(&json!({"name": null})), "");
        assert_eq!(coerce_name(&json!({"name": 12})), "12");
        assert_eq!(coerce_name(&json!(2.5)), "2.5");
        assert_eq!(coerce_name(&json!(true)), "true");
        assert_eq!(coerce_name(&json!(["a"])), "[\"a\"]");
        assert_eq!(coerce_optional(None), "");
    }

    #[test]
    fn test_coerce_names_for_tags() {
        assert_eq!(
            coerce_names(&json!(["xss", {"id": 1, "name": "csrf"}, 4])),
            vec!["xss", "csrf", "4"]
        );
        assert_eq!(coerce_names(&json!("single")), vec!["single"]);
        assert!(coerce_names(&json!(null)).is_empty());
    }

    #[test]
    fn test_join_labels_skips_empty() {
        let fields = vec![
            PolymorphicField::Label("xss".to_string()),
            PolymorphicField::Absent,
            PolymorphicField::from_value(&json!({"name": "sqli"})),
        ];
        assert_eq!(join_labels(&fields, ", "), "xss, sqli");
    }
}
