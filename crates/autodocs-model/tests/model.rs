//! Tests for autodocs-model types.

use autodocs_model::{
    FailurePolicy, GenerationOptions, HeightFormat, NormalizedContext, PatientRecord,
    TemplateKind,
};

#[test]
fn context_serializes_with_template_field_names() {
    let context = NormalizedContext {
        first_name: "Jane".to_string(),
        left: "☐".to_string(),
        right: "☑".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_value(&context).expect("serialize context");
    assert_eq!(json["first_name"], "Jane");
    assert_eq!(json["L"], "☐");
    assert_eq!(json["R"], "☑");
    assert!(json.get("left").is_none());
}

#[test]
fn context_round_trips_through_json() {
    let context = NormalizedContext {
        zip: "10001".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_string(&context).expect("serialize context");
    let round: NormalizedContext = serde_json::from_str(&json).expect("deserialize context");
    assert_eq!(round, context);
}

#[test]
fn options_parse_from_cli_spellings() {
    assert_eq!("decimal".parse(), Ok(HeightFormat::Decimal));
    assert_eq!("Trim-Suffix".parse(), Ok(HeightFormat::TrimSuffix));
    assert_eq!("continue".parse(), Ok(FailurePolicy::Continue));
    let err = "sometimes".parse::<FailurePolicy>().unwrap_err();
    assert!(err.to_string().contains("abort, continue"));
}

#[test]
fn options_deserialize_kebab_case() {
    let options: GenerationOptions = serde_json::from_str(
        r#"{"height_format":"decimal","failure_policy":"continue","strict_placeholders":true}"#,
    )
    .expect("deserialize options");
    assert_eq!(
        options,
        GenerationOptions::new()
            .with_height_format(HeightFormat::Decimal)
            .with_failure_policy(FailurePolicy::Continue)
            .with_strict_placeholders(true)
    );
}

#[test]
fn record_from_mixed_values() {
    let mut record = PatientRecord::from_pairs(2, [("Products", "LKB"), ("City", "")]);
    record.insert("Weight", 180.0);
    assert_eq!(record.text("Products"), "LKB");
    assert_eq!(record.text("City"), "");
    assert!(record.contains("City"));
    assert_eq!(record.text("Weight"), "180.0");
    assert_eq!(record.len(), 3);
}

#[test]
fn kind_labels() {
    assert_eq!(TemplateKind::BackBrace.to_string(), "Back Brace");
    assert_eq!(TemplateKind::ALL.len(), 2);
}
