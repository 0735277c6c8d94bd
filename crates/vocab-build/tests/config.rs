use vocab_build::{BuildError, BuilderConfig, SystemRule};
use vocab_model::ContentType;

#[test]
fn default_table_covers_every_system() {
    let config = BuilderConfig::default();
    config.validate().expect("default config is valid");
    let keys: Vec<&str> = config.systems.iter().map(|system| system.key.as_str()).collect();
    assert_eq!(keys, ["icd", "medcode", "snomed", "opcs", "dmd_pid", "dmd", "name"]);
    assert_eq!(config.header_row(), 1);
    assert_eq!(config.pause.every, 59);
    assert_eq!(config.destinations.intensional, "intensional");
}

#[test]
fn toml_overrides_parts() {
    let config = BuilderConfig::from_toml_str(
        r#"
        header_rows = 3

        [pause]
        every = 10
        seconds = 5

        [[systems]]
        key = "read"
        header = "Read"
        suffix = " (READ)"
        system = "READ"
        columns = { code = 2, label = 3 }
        content_type = "concepts"
        "#,
    )
    .expect("parse config");
    assert_eq!(config.header_rows, 3);
    assert_eq!(config.pause.every, 10);
    assert_eq!(config.destinations.value_sets, "staging");
    assert_eq!(config.systems.len(), 1);
    assert_eq!(config.systems[0].rule, SystemRule::Plain);
    assert_eq!(config.systems[0].content_type, ContentType::Concepts);
}

#[test]
fn invalid_configs_are_rejected() {
    let err = BuilderConfig::from_toml_str("header_rows = 0").expect_err("zero header rows");
    assert!(matches!(err, BuildError::InvalidConfig { .. }));

    let err = BuilderConfig::from_toml_str(
        r#"
        [[systems]]
        key = "a"
        header = "A"
        suffix = ""
        system = "A"
        columns = { code = 4, label = 4 }
        content_type = "concepts"
        "#,
    )
    .expect_err("shared column");
    assert!(err.to_string().contains("column 4"));

    let err = BuilderConfig::from_toml_str("header_rows = \"two\"").expect_err("bad type");
    assert!(matches!(err, BuildError::Toml(_)));
}
