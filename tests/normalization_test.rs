use cyberlearn_client::core::coercer::coerce_names;
use cyberlearn_client::core::normalizer::{normalize_as, normalize_records};
use cyberlearn_client::domain::model::Article;
use cyberlearn_client::{coerce_name, normalize, normalize_or_empty};
use serde_json::{json, Value};

/// Enveloped article with an embedded category object renders the category name.
#[test]
fn test_enveloped_record_with_object_category() {
    let raw = json!({
        "results": [{"id": 1, "category": {"id": 5, "name": "Phishing"}}],
        "count": 1
    });

    let records = normalize_records(raw).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), Some(1));
    assert_eq!(records[0].display("category"), "Phishing");
}

/// Bare array comes back unchanged and a string category is used as is.
#[test]
fn test_bare_array_with_string_category() {
    let raw = json!([{"id": 2, "category": "Basics"}]);

    let items = normalize(raw.clone()).unwrap();
    assert_eq!(Value::Array(items.clone()), raw);
    assert_eq!(coerce_name(&items[0]["category"]), "Basics");
}

#[test]
fn test_detail_body_becomes_empty_list() {
    let raw = json!({"detail": "Not found"});
    assert!(normalize_or_empty(raw.clone()).is_empty());
    assert!(normalize(raw).is_err());
}

#[test]
fn test_envelope_extra_keys_are_ignored() {
    let results = json!([{"id": 10}, {"id": 4}, {"id": 7}]);
    let raw = json!({
        "count": 3,
        "next": "http://localhost:8000/api/v1/tests/?page=2",
        "previous": null,
        "facets": {"level": ["beginner"]},
        "results": results.clone()
    });
    assert_eq!(Value::Array(normalize(raw).unwrap()), results);
}

#[test]
fn test_normalize_twice_is_stable() {
    let raw = json!([{"id": 1}, {"id": 2}]);
    let once = normalize(raw).unwrap();
    let twice = normalize(Value::Array(once.clone())).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_scalar_and_null_shapes() {
    for raw in [json!(null), json!(42), json!({}), json!({"foo": 1})] {
        assert_eq!(normalize_or_empty(raw), Vec::<Value>::new());
    }
}

#[test]
fn test_coerce_name_contract() {
    assert_eq!(coerce_name(&json!(null)), "");
    assert_eq!(coerce_name(&json!({"name": "Phishing"})), "Phishing");
    assert_eq!(coerce_name(&json!(7)), "7");
    assert_eq!(coerce_name(&json!("Cloud")), "Cloud");
}

/// Article list variants seen from different serializers decode into one type.
#[test]
fn test_typed_articles_from_mixed_variants() {
    let raw = json!({"results": [
        {"id": 1, "title": "A", "category": {"id": 5, "name": "Phishing", "slug": "phishing"},
         "tags": [{"id": 1, "name": "email"}], "author": {"id": 3, "username": "kim"}},
        {"id": 2, "title": "B", "category": "Basics", "tags": ["intro"]},
        {"id": 3, "title": "C", "category": 9, "tags": []}
    ]});

    let articles: Vec<Article> = normalize_as(raw).unwrap();
    let labels: Vec<String> = articles.iter().map(|a| a.category.display_name()).collect();
    assert_eq!(labels, vec!["Phishing", "Basics", "9"]);
    assert_eq!(articles[0].category.slug_or_name(), "phishing");
    assert_eq!(coerce_names(&json!(["intro", {"name": "email"}])), vec!["intro", "email"]);
}
