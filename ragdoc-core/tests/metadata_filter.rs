use ragdoc_core::{Metadata, MetadataFilter, Value};

fn metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("tag".to_string(), Value::from("alpha"));
    metadata.insert("score".to_string(), Value::from(5));
    metadata.insert("group".to_string(), Value::from("b"));
    metadata
}

#[test]
fn metadata_filter_roundtrip() {
    let filter = MetadataFilter::All(vec![
        MetadataFilter::Eq("tag".to_string(), Value::String("alpha".to_string())),
        MetadataFilter::Any(vec![
            MetadataFilter::Range {
                key: "score".to_string(),
                min: Some(Value::Number(1.into())),
                max: Some(Value::Number(10.into())),
            },
            MetadataFilter::In(
                "group".to_string(),
                vec![
                    Value::String("a".to_string()),
                    Value::String("b".to_string()),
                ],
            ),
        ]),
    ]);

    let json = serde_json::to_string(&filter).unwrap();
    let parsed: MetadataFilter = serde_json::from_str(&json).unwrap();
    assert_eq!(filter, parsed);
    assert!(parsed.matches(&metadata()));
}

#[test]
fn metadata_filter_eq_and_in() {
    let metadata = metadata();
    assert!(MetadataFilter::Eq("tag".to_string(), Value::from("alpha")).matches(&metadata));
    assert!(!MetadataFilter::Eq("tag".to_string(), Value::from("beta")).matches(&metadata));
    assert!(!MetadataFilter::Eq("missing".to_string(), Value::from("alpha")).matches(&metadata));
    assert!(MetadataFilter::In(
        "group".to_string(),
        vec![Value::from("a"), Value::from("b")]
    )
    .matches(&metadata));
}

#[test]
fn metadata_filter_range_bounds_are_inclusive() {
    let metadata = metadata();
    let range = |min: Option<Value>, max: Option<Value>| MetadataFilter::Range {
        key: "score".to_string(),
        min,
        max,
    };

    assert!(range(Some(Value::from(5)), Some(Value::from(5))).matches(&metadata));
    assert!(range(None, Some(Value::from(6))).matches(&metadata));
    assert!(!range(Some(Value::from(6)), None).matches(&metadata));
    assert!(!range(Some(Value::from("low")), None).matches(&metadata));
}

#[test]
fn metadata_filter_range_rejects_non_numeric_values() {
    let filter = MetadataFilter::Range {
        key: "tag".to_string(),
        min: None,
        max: None,
    };
    assert!(!filter.matches(&metadata()));
}

#[test]
fn metadata_filter_any_and_all() {
    let metadata = metadata();
    let hit = MetadataFilter::Eq("tag".to_string(), Value::from("alpha"));
    let miss = MetadataFilter::Eq("tag".to_string(), Value::from("beta"));

    assert!(MetadataFilter::Any(vec![miss.clone(), hit.clone()]).matches(&metadata));
    assert!(!MetadataFilter::All(vec![miss, hit]).matches(&metadata));
    assert!(MetadataFilter::All(Vec::new()).matches(&metadata));
    assert!(!MetadataFilter::Any(Vec::new()).matches(&metadata));
}
