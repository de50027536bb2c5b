use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if env var values fail to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if env var values fail to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let google_api_key = lookup("GOOGLE_API_KEY").ok();
    let openai_api_key = lookup("OPENAI_API_KEY").ok();

    let qdrant_url = or_default("QDRANT_URL", "http://localhost:6333");
    let qdrant_api_key = lookup("QDRANT_API_KEY").ok();
    let collection = or_default("CARTWISE_COLLECTION", "groceries");
    let embedding_model = or_default("CARTWISE_EMBEDDING_MODEL", "text-embedding-3-small");

    // Fallback location used when a conversation thread carries none.
    let default_lat = parse_f64("CARTWISE_DEFAULT_LAT", "48.7318664")?;
    let default_lng = parse_f64("CARTWISE_DEFAULT_LNG", "21.2431019")?;
    let default_radius_m = parse_u32("CARTWISE_DEFAULT_RADIUS_M", "2000")?;

    let threads_dir = PathBuf::from(or_default("CARTWISE_THREADS_DIR", "./thread_data"));

    let http_timeout_secs = parse_u64("CARTWISE_HTTP_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("CARTWISE_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("CARTWISE_RETRY_BACKOFF_BASE_MS", "500")?;

    let log_level = or_default("CARTWISE_LOG_LEVEL", "info");

    let price_threshold_percent = parse_f64("CARTWISE_PRICE_THRESHOLD_PERCENT", "5.0")?;
    let min_similarity = parse_f64("CARTWISE_MIN_SIMILARITY", "0.6")?;

    Ok(AppConfig {
        google_api_key,
        openai_api_key,
        qdrant_url,
        qdrant_api_key,
        collection,
        embedding_model,
        default_lat,
        default_lng,
        default_radius_m,
        threads_dir,
        http_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        log_level,
        price_threshold_percent,
        min_similarity,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.google_api_key.is_none());
        assert!(cfg.openai_api_key.is_none());
        assert_eq!(cfg.qdrant_url, "http://localhost:6333");
        assert_eq!(cfg.collection, "groceries");
        assert_eq!(cfg.embedding_model, "text-embedding-3-small");
        assert_eq!(cfg.default_radius_m, 2000);
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 500);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_default_location_is_kosice() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.default_lat - 48.731_866_4).abs() < 1e-9);
        assert!((cfg.default_lng - 21.243_101_9).abs() < 1e-9);
    }

    #[test]
    fn build_app_config_reads_api_keys() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("GOOGLE_API_KEY", "g-key");
        map.insert("OPENAI_API_KEY", "o-key");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.google_api_key.as_deref(), Some("g-key"));
        assert_eq!(cfg.openai_api_key.as_deref(), Some("o-key"));
    }

    #[test]
    fn build_app_config_overrides_numeric_fields() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTWISE_DEFAULT_RADIUS_M", "1500");
        map.insert("CARTWISE_MIN_SIMILARITY", "0.4");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.default_radius_m, 1500);
        assert!((cfg.min_similarity - 0.4).abs() < 1e-9);
    }

    #[test]
    fn build_app_config_invalid_radius_is_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTWISE_DEFAULT_RADIUS_M", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTWISE_DEFAULT_RADIUS_M"),
            "expected InvalidEnvVar(CARTWISE_DEFAULT_RADIUS_M)"
        );
    }

    #[test]
    fn build_app_config_invalid_threshold_is_rejected() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("CARTWISE_PRICE_THRESHOLD_PERCENT", "five");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARTWISE_PRICE_THRESHOLD_PERCENT"),
            "expected InvalidEnvVar(CARTWISE_PRICE_THRESHOLD_PERCENT)"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("GOOGLE_API_KEY", "super-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
