//! Config tests.

use crate::config::{ServerConfig, TutorConfig, MAX_HISTORY_WINDOW};
use prompt::DEFAULT_TUTOR_INSTRUCTION;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn clear_env() {
    for key in [
        "BIND_ADDR",
        "LOG_FILE",
        "LOG_LEVEL",
        "INDEX_HTML_PATH",
        "HISTORY_WINDOW",
        "SESSION_IDLE_TTL_SECS",
        "DEBUG_ENDPOINT",
        "GROQ_API_KEY",
        "OPENAI_API_KEY",
        "LLM_BASE_URL",
        "OPENAI_BASE_URL",
        "MODEL",
        "LLM_TEMPERATURE",
        "LLM_SYSTEM_PROMPT",
        "SYSTEM_PROMPT",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("GROQ_API_KEY", "gsk_test");

    let config = TutorConfig::load(None).unwrap();

    assert_eq!(config.server().bind_addr, "0.0.0.0:8000");
    assert_eq!(config.server().log_file, "logs/tutor-server.log");
    assert_eq!(config.server().log_level, "info");
    assert_eq!(config.server().index_html_path, PathBuf::from("public/index.html"));
    assert_eq!(config.server().history_window, 5);
    assert_eq!(config.server().session_idle_ttl_secs, 3600);
    assert!(config.server().debug_endpoint);
    assert_eq!(config.llm().model, "llama-3.1-8b-instant");
    assert_eq!(config.system_instruction(), DEFAULT_TUTOR_INSTRUCTION);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("GROQ_API_KEY", "gsk_test");
    env::set_var("BIND_ADDR", "127.0.0.1:9000");
    env::set_var("HISTORY_WINDOW", "3");
    env::set_var("SESSION_IDLE_TTL_SECS", "120");
    env::set_var("DEBUG_ENDPOINT", "false");
    env::set_var("INDEX_HTML_PATH", "/srv/tutor/index.html");
    env::set_var("LLM_SYSTEM_PROMPT", "You are a patient tutor.");

    let config = TutorConfig::load(None).unwrap();

    assert_eq!(config.server().bind_addr, "127.0.0.1:9000");
    assert_eq!(config.server().history_window, 3);
    assert_eq!(config.server().session_idle_ttl_secs, 120);
    assert!(!config.server().debug_endpoint);
    assert_eq!(
        config.server().index_html_path,
        PathBuf::from("/srv/tutor/index.html")
    );
    assert_eq!(config.system_instruction(), "You are a patient tutor.");

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_override_bind() {
    clear_env();
    env::set_var("GROQ_API_KEY", "gsk_test");
    env::set_var("BIND_ADDR", "127.0.0.1:9000");

    let config = TutorConfig::load(Some("127.0.0.1:7000".to_string())).unwrap();

    assert_eq!(config.server().bind_addr, "127.0.0.1:7000");
    clear_env();
}

#[test]
#[serial]
fn test_load_config_without_api_key_fails() {
    clear_env();

    let err = TutorConfig::load(None).unwrap_err();

    assert!(err.to_string().contains("GROQ_API_KEY"));
}

#[test]
#[serial]
fn test_invalid_window_value_fails() {
    clear_env();
    env::set_var("HISTORY_WINDOW", "five");

    assert!(ServerConfig::load(None).is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_bind_and_zero_window() {
    clear_env();
    env::set_var("BIND_ADDR", "localhost");
    let config = ServerConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    env::set_var("BIND_ADDR", "127.0.0.1:8000");
    env::set_var("HISTORY_WINDOW", "0");
    let config = ServerConfig::load(None).unwrap();
    assert!(config.validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_bounds_history_window() {
    clear_env();
    env::set_var("HISTORY_WINDOW", MAX_HISTORY_WINDOW.to_string());
    assert!(ServerConfig::load(None).unwrap().validate().is_ok());

    env::set_var("HISTORY_WINDOW", (MAX_HISTORY_WINDOW + 1).to_string());
    let err = ServerConfig::load(None).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("HISTORY_WINDOW"));

    env::set_var("HISTORY_WINDOW", (usize::MAX / 2).to_string());
    assert!(ServerConfig::load(None).unwrap().validate().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_zero_idle_ttl() {
    clear_env();
    env::set_var("SESSION_IDLE_TTL_SECS", "0");

    let err = ServerConfig::load(None).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("SESSION_IDLE_TTL_SECS"));

    env::set_var("SESSION_IDLE_TTL_SECS", "1");
    assert!(ServerConfig::load(None).unwrap().validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_validate_rejects_bad_log_level() {
    clear_env();
    env::set_var("LOG_LEVEL", "tutor_server=debug,info");
    assert!(ServerConfig::load(None).unwrap().validate().is_ok());

    env::set_var("LOG_LEVEL", "tutor_server=loud");
    assert!(ServerConfig::load(None).unwrap().validate().is_err());

    clear_env();
}
