//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `SITE_BASE_URL` - Public URL of the site, used for absolute links
//! - `SITE_SESSION_SECRET` - Session cookie signing key (min 64 chars, high entropy)
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_SETTINGS_CACHE_SECS` - Site settings cache TTL, 0 disables (default: 0)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (default: development)
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.1)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Signed cookies need at least 64 bytes of key material.
const MIN_SESSION_SECRET_LENGTH: usize = 64;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that mark a secret as copied from a template (matched lowercase).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "your-",
    "put-your",
    "xxx",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Contains the database password
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL, without trailing slash
    pub base_url: String,
    /// Session cookie signing key
    pub session_secret: SecretString,
    /// Zero disables the settings cache
    pub settings_cache_ttl: Duration,
    pub sentry: SentryConfig,
}

/// Sentry options. Sentry stays disabled without a DSN.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: String,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: "development".to_string(),
            sample_rate: 1.0,
            traces_sample_rate: 0.1,
        }
    }
}

/// Variable source. The process environment in production, a map in tests.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_owned()))
    }

    fn parsed<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
        })
    }

    fn secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.required(key)?;
        check_secret(&value)
            .map_err(|reason| ConfigError::InsecureSecret(key.to_owned(), reason))?;
        Ok(SecretString::from(value))
    }
}

impl SiteConfig {
    /// Load configuration from environment variables, reading `.env` first
    /// when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the session secret is short, a placeholder, or low in entropy.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal outside development
        let _ = dotenvy::dotenv();
        Self::load(&Vars(|key: &str| std::env::var(key).ok()))
    }

    fn load<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = vars
            .optional("SITE_DATABASE_URL")
            .or_else(|| vars.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("SITE_DATABASE_URL".to_owned()))?;

        let base_url = vars.required("SITE_BASE_URL")?.trim_end_matches('/').to_owned();
        if let Err(e) = url::Url::parse(&base_url) {
            return Err(ConfigError::InvalidEnvVar("SITE_BASE_URL".to_owned(), e.to_string()));
        }

        Ok(Self {
            database_url,
            host: vars.parsed("SITE_HOST", IpAddr::from([127, 0, 0, 1]))?,
            port: vars.parsed("SITE_PORT", 3000)?,
            base_url,
            session_secret: vars.secret("SITE_SESSION_SECRET")?,
            settings_cache_ttl: Duration::from_secs(vars.parsed("SITE_SETTINGS_CACHE_SECS", 0)?),
            sentry: SentryConfig::load(vars)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl SentryConfig {
    fn load<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            dsn: vars.optional("SENTRY_DSN"),
            environment: vars.optional("SENTRY_ENVIRONMENT").unwrap_or(defaults.environment),
            sample_rate: vars.parsed("SENTRY_SAMPLE_RATE", defaults.sample_rate)?,
            traces_sample_rate: vars
                .parsed("SENTRY_TRACES_SAMPLE_RATE", defaults.traces_sample_rate)?,
        })
    }
}

/// Reject short, template-looking, or low-entropy secrets. The error is the
/// reason, without the secret itself.
fn check_secret(secret: &str) -> Result<(), String> {
    let length = secret.chars().count();
    if length < MIN_SESSION_SECRET_LENGTH {
        return Err(format!(
            "must be at least {MIN_SESSION_SECRET_LENGTH} characters (got {length})"
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Err(format!("looks like a placeholder (contains '{pattern}')"));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(format!(
            "entropy {entropy:.2} bits/char is below {MIN_ENTROPY_BITS_PER_CHAR:.1}; \
             generate a random secret"
        ));
    }

    Ok(())
}

/// Shannon entropy in bits per character.
#[allow(clippy::cast_precision_loss)] // counts are far below 2^52
fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    counts
        .values()
        .map(|&n| {
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GOOD_SECRET: &str =
        "q8Z#vR2m!Lp7@wN4$kT9^bX1&hJ6*cF3(dG5)sA0-yU8+eI2=oP7~tM4%nB9?zQ1";

    fn load(pairs: &[(&str, &str)]) -> Result<SiteConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        SiteConfig::load(&Vars(move |key: &str| map.get(key).cloned()))
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("SITE_DATABASE_URL", "postgres://localhost/wayfarer"),
            ("SITE_BASE_URL", "https://wayfarer.travel/"),
            ("SITE_SESSION_SECRET", GOOD_SECRET),
        ]
    }

    #[test]
    fn loads_with_defaults() {
        let config = load(&minimal()).unwrap();
        assert_eq!(config.base_url, "https://wayfarer.travel");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.settings_cache_ttl, Duration::ZERO);
        assert!(config.is_secure());
        assert!(config.sentry.dsn.is_none());
        assert_eq!(config.sentry.environment, "development");
    }

    #[test]
    fn database_url_falls_back_to_generic_name() {
        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "SITE_DATABASE_URL");
        vars.push(("DATABASE_URL", "postgres://db.internal/wayfarer"));
        assert!(load(&vars).is_ok());

        vars.retain(|(k, _)| *k != "DATABASE_URL");
        assert!(
            matches!(load(&vars), Err(ConfigError::MissingEnvVar(k)) if k == "SITE_DATABASE_URL")
        );
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let mut vars = minimal();
        vars.push(("SITE_PORT", "eighty"));
        assert!(matches!(load(&vars), Err(ConfigError::InvalidEnvVar(k, _)) if k == "SITE_PORT"));

        let mut vars = minimal();
        vars.retain(|(k, _)| *k != "SITE_BASE_URL");
        vars.push(("SITE_BASE_URL", "not a url"));
        assert!(
            matches!(load(&vars), Err(ConfigError::InvalidEnvVar(k, _)) if k == "SITE_BASE_URL")
        );
    }

    #[test]
    fn overrides_are_applied() {
        let mut vars = minimal();
        vars.extend([
            ("SITE_HOST", "0.0.0.0"),
            ("SITE_PORT", "8080"),
            ("SITE_SETTINGS_CACHE_SECS", "30"),
            ("SENTRY_TRACES_SAMPLE_RATE", "0.5"),
        ]);
        let config = load(&vars).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.settings_cache_ttl, Duration::from_secs(30));
        assert!((config.sentry.traces_sample_rate - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let mut vars = minimal();
        vars.push(("SENTRY_DSN", "  "));
        assert!(load(&vars).unwrap().sentry.dsn.is_none());
    }

    #[test]
    fn session_secret_checks() {
        assert!(check_secret(GOOD_SECRET).is_ok());
        assert!(check_secret(GOOD_SECRET.get(..63).unwrap()).is_err());
        assert!(check_secret(&format!("{GOOD_SECRET}changeme")).is_err());
        assert!(check_secret(&"ab".repeat(40)).is_err());
    }

    #[test]
    fn entropy() {
        assert!(shannon_entropy("").abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("aB3$xY9!mK2@nL5#") > MIN_ENTROPY_BITS_PER_CHAR);
    }
}
