use crate::config::types::{
    AnalyzerConfig, CharWidths, Config, FetcherConfig, Range, ReadabilityConfig,
};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_analyzer_config(&config.analyzer)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 1, got {}",
            config.timeout_ms
        )));
    }

    if config.connect_timeout_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms must be >= 1, got {}",
            config.connect_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates analyzer configuration
fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    validate_range("title-px", &config.title_px)?;
    validate_range("meta-px", &config.meta_px)?;
    validate_range("title-chars", &config.title_chars)?;
    validate_range("meta-chars", &config.meta_chars)?;
    validate_char_widths(&config.char_widths)?;
    validate_readability(&config.readability)?;
    Ok(())
}

fn validate_range(name: &str, range: &Range) -> Result<(), ConfigError> {
    if range.min > range.max {
        return Err(ConfigError::Validation(format!(
            "{} min ({}) must not exceed max ({})",
            name, range.min, range.max
        )));
    }
    Ok(())
}

fn validate_char_widths(widths: &CharWidths) -> Result<(), ConfigError> {
    for (name, width) in [
        ("uppercase", widths.uppercase),
        ("lowercase", widths.lowercase),
        ("digit", widths.digit),
        ("whitespace", widths.whitespace),
        ("other", widths.other),
    ] {
        if !width.is_finite() || width <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "char-widths.{} must be a positive number, got {}",
                name, width
            )));
        }
    }
    Ok(())
}

fn validate_readability(config: &ReadabilityConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("base", config.base),
        ("sentence-weight", config.sentence_weight),
        ("syllable-weight", config.syllable_weight),
        ("easy-threshold", config.easy_threshold),
        ("max-average-sentence-length", config.max_average_sentence_length),
    ] {
        if !value.is_finite() {
            return Err(ConfigError::Validation(format!(
                "readability.{} must be finite, got {}",
                name, value
            )));
        }
    }
    Ok(())
}
