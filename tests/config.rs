use engagement_insights::config::EngineConfig;

#[test]
fn partial_config_keeps_remaining_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("engine.toml");
    std::fs::write(
        &path,
        "[composite]\nbaseline = 30.0\n\n[time]\nutc_offset_minutes = -300\n",
    )
    .expect("write config");

    let (config, loaded_from) = EngineConfig::load(Some(path.clone())).expect("load");

    assert_eq!(loaded_from, Some(path));
    assert!((config.composite.baseline - 30.0).abs() < 1e-6);
    assert!((config.composite.divisor - 10.0).abs() < 1e-6);
    assert_eq!(config.time.utc_offset().local_minus_utc(), -300 * 60);
    assert_eq!(config.recommendations.min_comments, 5);
    assert_eq!(config.best_time.default_platforms.len(), 4);
}

#[test]
fn written_config_loads_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("engine.toml");
    let mut config = EngineConfig::default();
    config.recommendations.share_rate_threshold = 0.5;
    config.best_time.jitter_seed = 9;

    config.write(&path).expect("write");
    let (loaded, _) = EngineConfig::load(Some(path)).expect("load");

    assert!((loaded.recommendations.share_rate_threshold - 0.5).abs() < 1e-6);
    assert_eq!(loaded.best_time.jitter_seed, 9);
    assert_eq!(loaded.cache.stale_after_days, 7);
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, _) = EngineConfig::load(Some(dir.path().join("absent.toml"))).expect("load");

    assert_eq!(config.recommendations.quoted_terms, 3);
    assert!((config.composite.weights.share - 5.0).abs() < 1e-6);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[composite\nbaseline = ").expect("write config");

    let err = EngineConfig::load(Some(path)).expect_err("parse failure");
    assert!(err.starts_with("failed to parse config"));
}
