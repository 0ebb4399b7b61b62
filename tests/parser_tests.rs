use pine_iris::{Error, ResponseParser};
use pine_iris::parser::extract_json_region;

#[test]
fn test_analysis_inside_markdown_fence() {
    let raw = r#"Here is my review.

```json
{
  "parameters": {"identified": ["length"], "suggestions": []},
  "logic": {"strengths": ["Clear"], "weaknesses": [], "improvements": []},
  "risk": {"assessment": "Uses {braces} in prose", "recommendations": "Add a stop"},
  "performance": {}
}
```

Anything else?"#;

    let analysis = ResponseParser::new()
        .parse_analysis(raw)
        .expect("fenced analysis should parse");
    assert_eq!(analysis.parameters.identified, vec!["length"]);
    assert_eq!(analysis.risk.assessment, "Uses {braces} in prose");
    assert_eq!(analysis.risk.recommendations, vec!["Add a stop"]);
    assert!(analysis.performance.optimizations.is_empty());
}

#[test]
fn test_unbalanced_object_is_parse_error() {
    let raw = r#"{"parameters": {"identified": ["a"]"#;
    let err = ResponseParser::new()
        .parse_analysis(raw)
        .expect_err("truncated JSON cannot parse");
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(err.raw_response(), Some(raw));
}

#[test]
fn test_enhancements_skip_unusable_elements() {
    let raw = r#"[
        {"version": "v1", "code": "//@version=5\nstrategy(\"A\")", "explanation": "a"},
        {"version": "v2", "explanation": "no code"},
        "just a string",
        {"code": "//@version=5\nstrategy(\"C\")", "expectedImprovements": "Faster"}
    ]"#;
    let variants = ResponseParser::new()
        .parse_enhancements(raw, 3)
        .expect("two usable variants");
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].version, "v1");
    assert!(variants[1].version.is_empty());
    assert_eq!(variants[1].expected_improvements, vec!["Faster"]);
}

#[test]
fn test_enhancements_without_any_code_fail() {
    let err = ResponseParser::new()
        .parse_enhancements(r#"[{"version": "v1"}]"#, 1)
        .expect_err("no usable variants");
    assert!(err.is_retryable());
}

#[test]
fn test_brackets_inside_strings_do_not_end_region() {
    let raw = r#"prefix [{"code": "a = close[1] // ]"}] suffix ]"#;
    assert_eq!(
        extract_json_region(raw, '['),
        Some(r#"[{"code": "a = close[1] // ]"}]"#)
    );
}

#[test]
fn test_enhancements_after_bracketed_pinescript_in_prose() {
    let raw = r#"I used the [basis, upper, lower] tuple from ta.bb:
```json
[{"version": "v1", "code": "//@version=5\nstrategy(\"BB\")"}]
```"#;
    let variants = ResponseParser::new()
        .parse_enhancements(raw, 1)
        .expect("stray brackets before the payload are skipped");
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].version, "v1");
}

#[test]
fn test_undecodable_regions_report_first_failure() {
    let err = ResponseParser::new()
        .parse_enhancements("see [basis, upper] and [lower]", 1)
        .expect_err("no region is JSON");
    assert!(err.to_string().contains("invalid JSON"));
}
