use hf_chat::config::Config;

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert!(config.api_key.is_none());
    assert!(config.model.is_none());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::new();
    config.api_key = Some("hf_test_key".to_string());
    config.model = Some("mistralai/Mixtral-8x7B-Instruct-v0.1".to_string());
    config.max_new_tokens = Some(500);
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.api_key.as_deref(), Some("hf_test_key"));
    assert_eq!(
        loaded.model.as_deref(),
        Some("mistralai/Mixtral-8x7B-Instruct-v0.1")
    );
    assert_eq!(loaded.max_new_tokens, Some(500));
}

#[test]
fn api_key_comes_from_env_then_config_else_fails() {
    // Single test so the env var is not raced by parallel cases
    std::env::remove_var("HF_API_KEY");

    let mut config = Config::new();
    assert!(config.resolve_api_key().is_err());

    config.api_key = Some("hf_from_file".to_string());
    assert_eq!(config.resolve_api_key().unwrap(), "hf_from_file");

    std::env::set_var("HF_API_KEY", "hf_from_env");
    assert_eq!(config.resolve_api_key().unwrap(), "hf_from_env");
    std::env::remove_var("HF_API_KEY");
}

#[test]
fn model_defaults_and_overrides() {
    let config = Config::new();
    assert_eq!(
        config.resolve_model(None),
        "mistralai/Mixtral-8x7B-Instruct-v0.1"
    );

    let mut config = Config::new();
    config.model = Some("google/gemma-7b-it".to_string());
    assert_eq!(config.resolve_model(None), "google/gemma-7b-it");
    assert_eq!(
        config.resolve_model(Some("cli-model".to_string())),
        "cli-model"
    );
}

#[test]
fn api_url_is_derived_from_the_model() {
    let config = Config::new();
    assert_eq!(
        config.resolve_api_url(None, "mistralai/Mixtral-8x7B-Instruct-v0.1"),
        "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1"
    );
    assert_eq!(
        config.resolve_api_url(Some("http://localhost:8080".to_string()), "ignored"),
        "http://localhost:8080"
    );
}
