use lcsk_core::errors::{ErrorInfo, LcskError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("k", "30")
        .with_context("filename", "a.fa")
}

#[test]
fn plan_error_surface() {
    let err = LcskError::Plan(sample_info("plan-k-range", "k_min exceeds k_max"));
    assert_eq!(err.code(), "plan-k-range");
    assert!(err.info().context.contains_key("k"));
}

#[test]
fn ledger_error_surface() {
    let err = LcskError::Ledger(sample_info("ledger-missing", "ledger not found"));
    assert_eq!(err.info().code, "ledger-missing");
    assert!(err.info().context.contains_key("filename"));
}

#[test]
fn stats_error_surface() {
    let err = LcskError::Stats(sample_info("stats-exit", "stats binary failed"));
    assert_eq!(err.code(), "stats-exit");
}

#[test]
fn serde_error_surface() {
    let err = LcskError::Serde(sample_info("config-yaml", "bad config"));
    assert_eq!(err.code(), "config-yaml");
}

#[test]
fn display_includes_context_and_hint() {
    let err = LcskError::Stats(
        ErrorInfo::new("stats-shape", "unexpected output")
            .with_context("tokens", "3")
            .with_hint("expected four tokens"),
    );
    assert_eq!(
        err.to_string(),
        "stats error: unexpected output (code: stats-shape) | context: [tokens=3] | hint: expected four tokens"
    );
}

#[test]
fn error_serializes_with_family_tag() {
    let err = LcskError::Ledger(ErrorInfo::new("ledger-append", "append failed"));
    let value = serde_json::to_value(&err).expect("json");
    assert_eq!(value["family"], "Ledger");
    assert_eq!(value["detail"]["code"], "ledger-append");
    assert!(value["detail"].get("hint").is_none());
}
