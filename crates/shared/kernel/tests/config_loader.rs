use album_domain::schema::SchemaFeatures;
use album_kernel::config::{ConfigError, load_album_config, load_config};
use std::io::Write;

#[test]
fn explicit_file_is_loaded() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().expect("temp file");
    writeln!(
        file,
        r#"
[members]
seed_demo = false
placeholder_photo_url = "https://example.org/blank.png"

[validation]
min_age = 14
schema = ["structured_address"]
"#
    )
    .expect("write config");

    let cfg = load_album_config(Some(file.path())).expect("config loads");
    assert!(!cfg.members.seed_demo);
    assert_eq!(cfg.members.placeholder_photo_url, "https://example.org/blank.png");
    assert_eq!(cfg.validation.min_age, 14);
    assert_eq!(cfg.validation.adult_age, 18);
    assert_eq!(cfg.validation.schema, SchemaFeatures::STRUCTURED_ADDRESS);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.toml");

    let err = load_config::<serde_json::Value>(Some(&missing)).expect_err("must fail");
    assert!(matches!(err, ConfigError::Config { .. }));
    assert!(err.to_string().contains("Failed to build config"), "{err}");
}
