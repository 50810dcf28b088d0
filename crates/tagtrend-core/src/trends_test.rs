use std::path::Path;

use super::*;

const VALID_YAML: &str = r"
data_columns: [snapshot_date, country, video_tags]
countries: [US, CA, GB, AU, NZ, IE]
similarity_threshold: 0.8
tag_limit: 30
evolution_top_n: 10
";

fn valid_config() -> TrendsConfig {
    parse_trends_config(VALID_YAML).unwrap()
}

#[test]
fn parses_valid_yaml_with_defaults() {
    let cfg = valid_config();
    assert_eq!(cfg.countries, vec!["US", "CA", "GB", "AU", "NZ", "IE"]);
    assert!((cfg.similarity_threshold - 0.8).abs() < f64::EPSILON);
    assert_eq!(cfg.tag_limit, 30);
    assert_eq!(cfg.evolution_top_n, 10);
    assert_eq!(cfg.evolution_weeks, 10);
    assert_eq!(cfg.evaluation_sample, 30);
}

#[test]
fn accepts_legacy_key_names() {
    let yaml = r"
data_columns: [snapshot_date, country, video_tags]
paises: [US, GB]
porc_similitud: 0.75
num_etiquetas: 5
top_n: 3
";
    let cfg = parse_trends_config(yaml).unwrap();
    assert_eq!(cfg.countries, vec!["US", "GB"]);
    assert!((cfg.similarity_threshold - 0.75).abs() < f64::EPSILON);
    assert_eq!(cfg.tag_limit, 5);
    assert_eq!(cfg.evolution_top_n, 3);
}

#[test]
fn rejects_malformed_yaml() {
    let result = parse_trends_config("countries: [US");
    assert!(
        matches!(result, Err(ConfigError::ConfigFileParse(_))),
        "expected ConfigFileParse, got: {result:?}"
    );
}

#[test]
fn rejects_missing_threshold() {
    let yaml = r"
data_columns: [snapshot_date, country, video_tags]
countries: [US]
tag_limit: 5
evolution_top_n: 3
";
    let result = parse_trends_config(yaml);
    assert!(
        matches!(result, Err(ConfigError::ConfigFileParse(_))),
        "expected ConfigFileParse, got: {result:?}"
    );
}

#[test]
fn rejects_threshold_out_of_range() {
    for bad in [0.0, -0.5, 1.5, f64::NAN] {
        let mut cfg = valid_config();
        cfg.similarity_threshold = bad;
        let err = cfg.validate().unwrap_err();
        assert!(
            err.to_string().contains("similarity_threshold"),
            "unexpected error for {bad}: {err}"
        );
    }
}

#[test]
fn accepts_threshold_of_one() {
    let mut cfg = valid_config();
    cfg.similarity_threshold = 1.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_empty_country_list() {
    let mut cfg = valid_config();
    cfg.countries.clear();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("countries must not be empty"));
}

#[test]
fn rejects_duplicate_country() {
    let mut cfg = valid_config();
    cfg.countries.push("US".to_string());
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate country: 'US'"));
}

#[test]
fn rejects_blank_country() {
    let mut cfg = valid_config();
    cfg.countries.push(" ".to_string());
    assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn rejects_projection_without_required_column() {
    let mut cfg = valid_config();
    cfg.data_columns.retain(|c| c != "video_tags");
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("'video_tags'"));
}

#[test]
fn rejects_duplicate_data_column() {
    let mut cfg = valid_config();
    cfg.data_columns.push("country".to_string());
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate data column"));
}

#[test]
fn rejects_zero_limits() {
    let mut cfg = valid_config();
    cfg.tag_limit = 0;
    assert!(cfg.validate().unwrap_err().to_string().contains("tag_limit"));

    let mut cfg = valid_config();
    cfg.evaluation_sample = 0;
    assert!(cfg
        .validate()
        .unwrap_err()
        .to_string()
        .contains("evaluation_sample"));
}

#[test]
fn load_reports_missing_file() {
    let result = load_trends_config(Path::new("/nonexistent/tagtrend.yaml"));
    assert!(
        matches!(result, Err(ConfigError::ConfigFileIo { ref path, .. }) if path.contains("tagtrend.yaml")),
        "expected ConfigFileIo, got: {result:?}"
    );
}
