use pine_iris::{Error, TemplateCategory, TemplateRegistry, list_templates, resolve_template};

#[test]
fn test_ma_cross_resolves_crossover_strategy() {
    let body = resolve_template("strategy", "ma cross").expect("strategy is a valid category");
    assert!(body.starts_with("//@version=5"));
    assert!(body.contains("Moving Average Crossover Strategy"));
    assert!(body.contains("fastLength = input(9"));
}

#[test]
fn test_bollinger_bands_indicator_has_multiplier_input() {
    let body =
        resolve_template("indicator", "bollinger bands").expect("indicator is a valid category");
    assert!(body.contains("Bollinger Bands"));
    assert!(body.contains("mult = input.float(2.0"));
    assert!(!body.contains("strategy.entry"));
}

#[test]
fn test_lookup_is_case_and_whitespace_insensitive() {
    assert_eq!(
        resolve_template("Strategy", "  MA CROSS ").ok(),
        resolve_template("strategy", "ma cross").ok()
    );
}

#[test]
fn test_invalid_category_is_rejected() {
    let err = resolve_template("invalid-category", "rsi").expect_err("unknown category");
    assert!(matches!(err, Error::UnknownCategory(ref name) if name == "invalid-category"));
    assert!(err.to_string().contains("Unknown template type"));
}

#[test]
fn test_unknown_name_returns_generic_skeleton() {
    let strategy = resolve_template("strategy", "neural net arbitrage").expect("valid category");
    assert!(strategy.contains("strategy("));
    assert_eq!(
        TemplateRegistry::global()
            .lookup(TemplateCategory::Strategy, "neural net arbitrage")
            .canonical_name,
        "Basic Strategy"
    );

    let indicator = resolve_template("indicator", "").expect("valid category");
    assert!(indicator.contains("indicator("));
}

#[test]
fn test_same_name_differs_by_category() {
    let strategy = resolve_template("strategy", "rsi").expect("valid category");
    let indicator = resolve_template("indicator", "rsi").expect("valid category");
    assert_ne!(strategy, indicator);
    assert!(strategy.contains("strategy.entry"));
    assert!(!indicator.contains("strategy.entry"));
}

#[test]
fn test_list_templates_ends_with_fallback() {
    let names = list_templates("indicator").expect("valid category");
    assert_eq!(names.first(), Some(&"Bollinger Bands"));
    assert_eq!(names.last(), Some(&"Basic Indicator"));
    assert!(list_templates("library").is_err());
}

#[test]
fn test_every_listed_name_resolves_to_itself() {
    let registry = TemplateRegistry::global();
    for category in TemplateCategory::ALL {
        for name in registry.names(category) {
            assert_eq!(registry.lookup(category, name).canonical_name, name);
        }
    }
}
