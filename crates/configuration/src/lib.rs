// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    AnalyticsConfig, Config, DEFAULT_DURATION_BINS, DEFAULT_PROFIT_BINS, LoggingConfig,
    OutputConfig, OutputFormat,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `TRADELENS__ANALYTICS__REQUIRE_NON_EMPTY=true`.
pub const ENV_PREFIX: &str = "TRADELENS";

/// Loads the application configuration.
///
/// The TOML file at `path` is optional; every section falls back to its defaults.
/// Environment variables prefixed with [`ENV_PREFIX`] take precedence over the file.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
    finish(builder)
}

/// Parses configuration from an in-memory TOML document.
pub fn load_config_from_toml(contents: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Toml));
    finish(builder)
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        require_non_empty = config.analytics.require_non_empty,
        profit_bins = config.analytics.profit_bins.len(),
        duration_bins = config.analytics.duration_bins.len(),
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_document_yields_defaults() {
        let config = load_config_from_toml("").unwrap();
        assert!(!config.analytics.require_non_empty);
        assert_eq!(config.analytics.profit_bins.len(), 7);
        assert_eq!(config.analytics.duration_bins[0], dec!(30));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn sections_override_defaults() {
        let config = load_config_from_toml(
            r#"
            [analytics]
            require_non_empty = true
            profit_bins = [-50, 0, 50]

            [logging]
            level = "debug"

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert!(config.analytics.require_non_empty);
        assert_eq!(config.analytics.profit_bins, vec![dec!(-50), dec!(0), dec!(50)]);
        // Untouched keys keep their defaults.
        assert_eq!(config.analytics.duration_bins.len(), 6);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn rejects_unordered_bins() {
        let err = load_config_from_toml(
            r#"
            [analytics]
            profit_bins = [0, 100, 100]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn rejects_non_positive_duration_edges() {
        let err = load_config_from_toml(
            r#"
            [analytics]
            duration_bins = [0, 30]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let config = load_config("does-not-exist.toml").unwrap();
        assert_eq!(config.analytics.profit_bins.len(), 7);
    }
}
