use std::io::Write;

use indoc::indoc;
use syntax_rewriter::config::{ConfigError, ParameterHoisting, RewriteOptions, ScriptTarget};
use tempfile::NamedTempFile;

#[test]
fn test_load_full_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        indoc! {r#"
            {
                "target": "ES2015",
                "parameter_hoisting": "always",
                "visit_tokens": true,
                "ensure_use_strict": true
            }
        "#}
    )
    .unwrap();

    let options = RewriteOptions::from_json_file(file.path()).unwrap();
    assert_eq!(
        options,
        RewriteOptions {
            target: ScriptTarget::Es2015,
            parameter_hoisting: ParameterHoisting::Always,
            visit_tokens: true,
            ensure_use_strict: true,
        }
    );
}

#[test]
fn test_empty_object_is_default() {
    let options = RewriteOptions::from_json_str("{}").unwrap();
    assert_eq!(options, RewriteOptions::default());
}

#[test]
fn test_unknown_target_is_rejected() {
    let err = RewriteOptions::from_json_str(indoc! {r#"
        { "target": "ES1999" }
    "#})
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().starts_with("invalid config"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = RewriteOptions::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_options_round_trip_through_json() {
    let options = RewriteOptions {
        target: ScriptTarget::EsNext,
        parameter_hoisting: ParameterHoisting::Never,
        ..RewriteOptions::default()
    };
    let json = serde_json::to_string(&options).unwrap();
    assert!(json.contains(r#""target":"ESNEXT""#));
    assert!(json.contains(r#""parameter_hoisting":"never""#));
    assert_eq!(RewriteOptions::from_json_str(&json).unwrap(), options);
}
