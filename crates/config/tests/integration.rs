//! Integration tests for config

#[cfg(test)]
mod tests {
    use pagesum_config::*;
    use pagesum_types::{ColorChoice, OutputFormat};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to ensure env var tests don't run concurrently
    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        for var in [
            "PAGESUM_OUTPUT",
            "PAGESUM_COLOR",
            "PAGESUM_TIMEOUT",
            "PAGESUM_CONNECT_TIMEOUT",
            "PAGESUM_USER_AGENT",
        ] {
            std::env::remove_var(var);
        }
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[general]
default_output = "plain"
color = "never"

[network]
timeout = 15
user_agent = "pagesum-test"
        "#
        )
        .unwrap();

        let config = Config::load_from_file(temp_file.path()).await.unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Plain);
        assert_eq!(config.general.color, ColorChoice::Never);
        assert_eq!(config.network.timeout, 15);
        assert_eq!(config.network.connect_timeout, 30);
        assert_eq!(config.network.user_agent.as_deref(), Some("pagesum-test"));
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files() {
        let missing = Config::load_from_file(std::path::Path::new("/nonexistent/pagesum.toml")).await;
        assert!(matches!(
            missing,
            Err(pagesum_errors::Error::Config(
                pagesum_errors::ConfigError::NotFound { .. }
            ))
        ));

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[network\ntimeout = ").unwrap();
        let malformed = Config::load_from_file(temp_file.path()).await;
        assert!(matches!(
            malformed,
            Err(pagesum_errors::Error::Config(
                pagesum_errors::ConfigError::ParseError { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_zero_timeouts_in_file_are_rejected() {
        for (key, field) in [
            ("timeout", "network.timeout"),
            ("connect_timeout", "network.connect_timeout"),
        ] {
            let mut temp_file = NamedTempFile::new().unwrap();
            writeln!(temp_file, "[network]\n{key} = 0").unwrap();

            let result = Config::load_from_file(temp_file.path()).await;
            match result {
                Err(pagesum_errors::Error::Config(pagesum_errors::ConfigError::InvalidValue {
                    field: reported,
                    value,
                })) => {
                    assert_eq!(reported, field);
                    assert_eq!(value, "0");
                }
                other => panic!("expected invalid value for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_merge_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PAGESUM_OUTPUT", "json");
        std::env::set_var("PAGESUM_COLOR", "always");
        std::env::set_var("PAGESUM_TIMEOUT", "5");

        let mut config = Config::default();
        config.merge_env().unwrap();

        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.general.color, ColorChoice::Always);
        assert_eq!(config.network.timeout, 5);

        clear_env();
    }

    #[test]
    fn test_invalid_env_value() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        clear_env();

        std::env::set_var("PAGESUM_TIMEOUT", "0");
        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        clear_env();
        std::env::set_var("PAGESUM_OUTPUT", "invalid");
        let mut config = Config::default();
        assert!(config.merge_env().is_err());

        clear_env();
    }

    #[test]
    fn test_static_inputs() {
        assert_eq!(DOC_URLS.len(), 19);
        assert_eq!(MAX_RESPONSE_BYTES, 1_000_000);
        assert_eq!(doc_urls().first().map(String::as_str), Some("https://docs.microsoft.com"));
    }
}
